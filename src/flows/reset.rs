//! Password reset request flow.

// self
use crate::{
	_prelude::*,
	auth::{EmailAddress, TokenKind},
	flows::{Broker, common::{ActionOutcome, RATE_LIMITED_MESSAGE}},
	mail::TokenMail,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// Parameters for [`Broker::reset`].
#[derive(Clone, Debug)]
pub struct ResetRequest {
	/// Raw address as submitted.
	pub email: String,
}
impl ResetRequest {
	/// Creates a reset request.
	pub fn new(email: impl Into<String>) -> Self {
		Self { email: email.into() }
	}
}

impl Broker {
	/// Starts a password reset by mailing a fresh single-use token to the owner.
	///
	/// A repeated request supersedes the earlier token; only the newest secret can
	/// complete the flow.
	pub async fn reset(&self, request: ResetRequest) -> Result<ActionOutcome> {
		const KIND: FlowKind = FlowKind::Reset;

		let span = FlowSpan::new(KIND, "reset");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span.instrument(self.reset_inner(request)).await;

		match &result {
			Ok(outcome) if outcome.is_success() =>
				obs::record_flow_outcome(KIND, FlowOutcome::Success),
			_ => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}

	async fn reset_inner(&self, request: ResetRequest) -> Result<ActionOutcome> {
		let Ok(email) = EmailAddress::new(&request.email) else {
			return Ok(ActionOutcome::error("Invalid email!"));
		};

		if self.throttle("reset", email.as_ref()).is_err() {
			return Ok(ActionOutcome::error(RATE_LIMITED_MESSAGE));
		}
		if self.store.find_user_by_email(&email).await?.is_none() {
			return Ok(ActionOutcome::error("Email does not exist!"));
		}

		let token = self.issue_token(TokenKind::PasswordReset, &email).await?;

		self.mailer
			.send(&TokenMail::new(TokenKind::PasswordReset, token.email, token.secret))
			.await?;

		Ok(ActionOutcome::success("Reset email sent"))
	}
}
