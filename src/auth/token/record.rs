//! Persisted token rows and lifecycle status helpers.

// self
use crate::{
	_prelude::*,
	auth::{
		id::{EmailAddress, TokenId},
		token::{kind::TokenKind, secret::TokenSecret},
	},
};

/// Lifecycle status of a persisted token row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenStatus {
	/// Row is live and redeemable.
	Active,
	/// Row exceeded its expiry instant but has not been removed.
	///
	/// Expired rows are only removed lazily, by supersession or by a later
	/// successful redemption cycle; there is no scheduled purge.
	Expired,
}

/// Persisted single-use token row.
///
/// The id is assigned by the store; expiry policy and the at-most-one-active-row
/// invariant are enforced by the broker, never by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
	/// Row identifier assigned by the store.
	pub id: TokenId,
	/// Flow namespace the row belongs to.
	pub kind: TokenKind,
	/// Owner address the token was issued for.
	pub email: EmailAddress,
	/// Unguessable single-use value; callers must avoid logging it.
	pub secret: TokenSecret,
	/// Instant past which the row can no longer be redeemed.
	pub expires_at: OffsetDateTime,
}
impl TokenRecord {
	/// Computes the lifecycle status at a given instant.
	pub fn status_at(&self, instant: OffsetDateTime) -> TokenStatus {
		if self.expires_at < instant { TokenStatus::Expired } else { TokenStatus::Active }
	}

	/// Convenience helper that checks the status using the current UTC instant.
	pub fn status(&self) -> TokenStatus {
		self.status_at(OffsetDateTime::now_utc())
	}

	/// Returns `true` if the row is past its deadline at the provided instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		self.status_at(instant) == TokenStatus::Expired
	}
}
