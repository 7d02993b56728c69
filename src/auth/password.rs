//! Password policy, redacted credential material, and the hashing contract.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};
// self
use crate::_prelude::*;

const PASSWORD_MIN_LEN: usize = 8;
const PASSWORD_MAX_LEN: usize = 128;

/// Error returned when a plaintext password violates the policy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum PasswordPolicyError {
	/// The password was shorter than the minimum length.
	#[error("Password must contain at least {min} characters.")]
	TooShort {
		/// Minimum permitted character count.
		min: usize,
	},
	/// The password contains whitespace characters.
	#[error("Password contains whitespace.")]
	ContainsWhitespace,
	/// The password exceeded the allowed character count.
	#[error("Password exceeds {max} characters.")]
	TooLong {
		/// Maximum permitted character count.
		max: usize,
	},
}

/// Policy-validated plaintext password keeping sensitive material out of logs.
///
/// Plaintext never serializes and never leaves the process; it exists only long
/// enough to be handed to a [`PasswordHasher`] or the sign-in primitive.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);
impl Password {
	/// Validates the plaintext against the policy and wraps it.
	pub fn new(value: impl AsRef<str>) -> Result<Self, PasswordPolicyError> {
		let view = value.as_ref();

		if view.chars().count() < PASSWORD_MIN_LEN {
			return Err(PasswordPolicyError::TooShort { min: PASSWORD_MIN_LEN });
		}
		if view.chars().any(char::is_whitespace) {
			return Err(PasswordPolicyError::ContainsWhitespace);
		}
		if view.chars().count() > PASSWORD_MAX_LEN {
			return Err(PasswordPolicyError::TooLong { max: PASSWORD_MAX_LEN });
		}

		Ok(Self(view.to_owned()))
	}

	/// Returns the inner plaintext. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl Debug for Password {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Password").field(&"<redacted>").finish()
	}
}
impl Display for Password {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// One-way digest of a password as produced by a [`PasswordHasher`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordDigest(String);
impl PasswordDigest {
	/// Wraps a digest string produced by a hashing primitive.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner digest value.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl Debug for PasswordDigest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("PasswordDigest").field(&"<redacted>").finish()
	}
}

/// One-way credential hashing primitive supplied by the host.
///
/// Digest strength is the implementation's concern; the broker only stores and
/// compares through this contract.
pub trait PasswordHasher
where
	Self: Send + Sync,
{
	/// Produces the digest persisted for the provided plaintext.
	fn hash(&self, plaintext: &Password) -> PasswordDigest;
}

/// SHA-256 hashing primitive for local development and tests.
///
/// Production deployments should supply an adaptive primitive (bcrypt, argon2)
/// through the [`PasswordHasher`] contract instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256PasswordHasher;
impl PasswordHasher for Sha256PasswordHasher {
	fn hash(&self, plaintext: &Password) -> PasswordDigest {
		let mut hasher = Sha256::new();

		hasher.update(plaintext.expose().as_bytes());

		PasswordDigest::new(URL_SAFE_NO_PAD.encode(hasher.finalize()))
	}
}
