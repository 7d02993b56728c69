//! Credential subject model consumed by the action flows.

// self
use crate::{
	_prelude::*,
	auth::{
		id::{DisplayName, EmailAddress, UserId},
		password::PasswordDigest,
	},
};

/// Credential subject as stored by the backend.
///
/// The broker consumes existence, digest presence, and the verification timestamp;
/// everything else is carried verbatim for the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	/// Subject identifier assigned by the store.
	pub id: UserId,
	/// Human-readable account name.
	pub name: String,
	/// Owner address; canonicalized at verification time from the token row.
	pub email: EmailAddress,
	/// Stored credential digest; absent for provider-only accounts.
	pub password: Option<PasswordDigest>,
	/// Instant the address was verified, if it ever was.
	pub email_verified: Option<OffsetDateTime>,
}
impl User {
	/// Returns `true` when the subject carries a stored credential digest.
	pub const fn has_password(&self) -> bool {
		self.password.is_some()
	}

	/// Returns `true` when the subject's address has been verified.
	pub const fn is_verified(&self) -> bool {
		self.email_verified.is_some()
	}
}

/// Subject payload handed to the store on registration; the backend assigns the id.
#[derive(Clone, Debug)]
pub struct NewUser {
	/// Validated account name.
	pub name: DisplayName,
	/// Validated owner address.
	pub email: EmailAddress,
	/// Credential digest; `None` for provider-only accounts created by the host.
	pub password: Option<PasswordDigest>,
}

/// Field mutation applied to a stored subject.
#[derive(Clone, Debug)]
pub enum UserUpdate {
	/// Marks the address verified and persists the canonical email from the token row.
	EmailVerified {
		/// Verification instant.
		verified_at: OffsetDateTime,
		/// Canonical address the token was issued for.
		email: EmailAddress,
	},
	/// Replaces the stored credential digest.
	Password {
		/// Replacement digest.
		digest: PasswordDigest,
	},
}
