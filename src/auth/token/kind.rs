//! Token kind namespaces shared by the lifecycle manager and the store.

// self
use crate::_prelude::*;

/// Flow namespace a token belongs to.
///
/// The two kinds share identical lifecycle rules but are looked up, superseded, and
/// redeemed independently; a verification secret can never complete a reset flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
	/// Email-address confirmation flow.
	Verification,
	/// Password reset flow.
	PasswordReset,
}
impl TokenKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			TokenKind::Verification => "verification",
			TokenKind::PasswordReset => "password_reset",
		}
	}
}
impl Display for TokenKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn labels_are_stable() {
		assert_eq!(TokenKind::Verification.as_str(), "verification");
		assert_eq!(TokenKind::PasswordReset.as_str(), "password_reset");
		assert_eq!(
			serde_json::to_string(&TokenKind::PasswordReset)
				.expect("Kind should serialize to JSON."),
			"\"password_reset\""
		);
	}
}
