//! Email verification confirmation flow.

// self
use crate::{
	_prelude::*,
	auth::{TokenKind, UserUpdate},
	flows::{Broker, common::ActionOutcome},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

impl Broker {
	/// Redeems a verification token, marking the owner's address as verified.
	///
	/// The address stored on the token row becomes the subject's canonical email.
	/// The token is consumed on success; replaying the same raw value afterwards
	/// answers as if it was never issued.
	pub async fn new_verification(&self, token: &str) -> Result<ActionOutcome> {
		const KIND: FlowKind = FlowKind::Verification;

		let span = FlowSpan::new(KIND, "new_verification");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span.instrument(self.new_verification_inner(token)).await;

		match &result {
			Ok(outcome) if outcome.is_success() =>
				obs::record_flow_outcome(KIND, FlowOutcome::Success),
			_ => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}

	async fn new_verification_inner(&self, token: &str) -> Result<ActionOutcome> {
		let (record, user) = match self.resolve_redeemable(TokenKind::Verification, token).await {
			Ok(resolved) => resolved,
			Err(Error::InvalidToken) => return Ok(ActionOutcome::error("Token does not exist")),
			Err(Error::TokenExpired) => return Ok(ActionOutcome::error("Token has expired")),
			Err(Error::OwnerNotFound) => return Ok(ActionOutcome::error("User does not exist")),
			Err(other) => return Err(other),
		};
		let update = UserUpdate::EmailVerified {
			verified_at: OffsetDateTime::now_utc(),
			email: record.email.clone(),
		};

		let _ = self.store.update_user(&user.id, update).await?;

		self.store.delete_token(TokenKind::Verification, &record.id).await?;

		Ok(ActionOutcome::success("Email verified. Go to login to continue"))
	}
}
