//! Password reset confirmation flow.

// self
use crate::{
	_prelude::*,
	auth::{Password, TokenKind, UserUpdate},
	flows::{Broker, common::ActionOutcome},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// Parameters for [`Broker::new_password`].
#[derive(Clone, Debug)]
pub struct NewPasswordRequest {
	/// Raw replacement password as submitted.
	pub password: String,
}
impl NewPasswordRequest {
	/// Creates a confirmation request.
	pub fn new(password: impl Into<String>) -> Self {
		Self { password: password.into() }
	}
}

impl Broker {
	/// Redeems a password reset token and replaces the stored credential digest.
	///
	/// The token is consumed on success; replaying the same raw value afterwards
	/// answers as if it was never issued.
	pub async fn new_password(
		&self,
		request: NewPasswordRequest,
		token: Option<&str>,
	) -> Result<ActionOutcome> {
		const KIND: FlowKind = FlowKind::NewPassword;

		let span = FlowSpan::new(KIND, "new_password");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span.instrument(self.new_password_inner(request, token)).await;

		match &result {
			Ok(outcome) if outcome.is_success() =>
				obs::record_flow_outcome(KIND, FlowOutcome::Success),
			_ => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}

	async fn new_password_inner(
		&self,
		request: NewPasswordRequest,
		token: Option<&str>,
	) -> Result<ActionOutcome> {
		let Some(raw) = token else {
			return Ok(ActionOutcome::error("Token is required"));
		};
		let Ok(password) = Password::new(&request.password) else {
			return Ok(ActionOutcome::error("Invalid fields"));
		};
		let (record, user) = match self.resolve_redeemable(TokenKind::PasswordReset, raw).await {
			Ok(resolved) => resolved,
			Err(Error::InvalidToken) => return Ok(ActionOutcome::error("Invalid token")),
			Err(Error::TokenExpired) => return Ok(ActionOutcome::error("Token has expired")),
			Err(Error::OwnerNotFound) => return Ok(ActionOutcome::error("Email not found")),
			Err(other) => return Err(other),
		};
		let digest = self.hasher.hash(&password);

		// The subject mutation lands before the row is consumed; a failure in
		// between leaves the token redeemable for a retry.
		let _ = self.store.update_user(&user.id, UserUpdate::Password { digest }).await?;

		self.store.delete_token(TokenKind::PasswordReset, &record.id).await?;

		Ok(ActionOutcome::success("Password updated successfully"))
	}
}
