//! Secure token secret wrapper that redacts sensitive material.

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::_prelude::*;

const TOKEN_SECRET_LEN: usize = 32;

/// Redacted single-use token value keeping sensitive material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps an existing secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Generates a fresh unguessable secret value.
	pub fn generate() -> Self {
		Self(rand::rng().sample_iter(Alphanumeric).take(TOKEN_SECRET_LEN).map(char::from).collect())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let secret = TokenSecret::new("super-secret");

		assert_eq!(format!("{secret:?}"), "TokenSecret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
	}

	#[test]
	fn generated_secrets_are_alphanumeric_and_distinct() {
		let first = TokenSecret::generate();
		let second = TokenSecret::generate();

		assert_eq!(first.expose().len(), TOKEN_SECRET_LEN);
		assert!(first.expose().chars().all(char::is_alphanumeric));
		assert_ne!(first.expose(), second.expose());
	}
}
