//! Token lifecycle core: issuance with supersession, and redemption checks.
//!
//! The broker owns all token policy: expiry duration, the at-most-one-active-row
//! invariant, and single-use redemption. The store only persists rows. Supersession
//! is an explicit two-step sequence (delete the prior row by id, then create the
//! replacement); the pair is not transactional, and an interruption between the two
//! steps leaves at most a duplicate-active state that the next issuance heals.

// self
use crate::{
	_prelude::*,
	auth::{EmailAddress, TokenKind, TokenRecord, TokenSecret, User},
	flows::Broker,
	store::TokenDraft,
};

/// Tokens expire this long after issuance.
pub const TOKEN_TTL: Duration = Duration::hours(1);

/// Key protecting concurrent issuance for one owner + kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct IssueKey {
	kind: TokenKind,
	email: EmailAddress,
}

impl Broker {
	/// Issues a fresh verification token for the address, superseding any active one.
	pub async fn issue_verification_token(&self, email: &EmailAddress) -> Result<TokenRecord> {
		self.issue_token(TokenKind::Verification, email).await
	}

	/// Issues a fresh password reset token for the address, superseding any active one.
	pub async fn issue_password_reset_token(&self, email: &EmailAddress) -> Result<TokenRecord> {
		self.issue_token(TokenKind::PasswordReset, email).await
	}

	pub(crate) async fn issue_token(
		&self,
		kind: TokenKind,
		email: &EmailAddress,
	) -> Result<TokenRecord> {
		let guard = self.issue_guard(&IssueKey { kind, email: email.clone() });
		let _singleflight = guard.lock().await;

		if let Some(existing) = self.store.find_token_by_email(kind, email).await? {
			// The delete must be dispatched before the create so at most one row
			// survives; its success is not otherwise a precondition.
			self.store.delete_token(kind, &existing.id).await?;
		}

		let draft = TokenDraft {
			kind,
			email: email.clone(),
			secret: TokenSecret::generate(),
			expires_at: OffsetDateTime::now_utc() + TOKEN_TTL,
		};

		Ok(self.store.create_token(draft).await?)
	}

	/// Resolves a raw token value into its row and owning account.
	///
	/// The row is left in place (including on the expired path) so callers apply the
	/// kind-specific effect first and then consume the row by deleting its id.
	pub(crate) async fn resolve_redeemable(
		&self,
		kind: TokenKind,
		raw: &str,
	) -> Result<(TokenRecord, User)> {
		let Some(record) = self.store.find_token_by_secret(kind, raw).await? else {
			return Err(Error::InvalidToken);
		};

		if record.is_expired_at(OffsetDateTime::now_utc()) {
			return Err(Error::TokenExpired);
		}

		let Some(user) = self.store.find_user_by_email(&record.email).await? else {
			return Err(Error::OwnerNotFound);
		};

		Ok((record, user))
	}
}
