//! Email + password sign-in flow.

// self
use crate::{
	_prelude::*,
	auth::{EmailAddress, Password, TokenKind},
	flows::{Broker, common::{ActionOutcome, RATE_LIMITED_MESSAGE}},
	mail::TokenMail,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// Parameters for [`Broker::login`].
#[derive(Clone, Debug)]
pub struct LoginRequest {
	/// Raw address as submitted.
	pub email: String,
	/// Raw password as submitted.
	pub password: String,
	/// Destination the host should navigate to after a successful sign-in.
	pub redirect_to: Option<String>,
}
impl LoginRequest {
	/// Creates a request without a redirect target.
	pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
		Self { email: email.into(), password: password.into(), redirect_to: None }
	}

	/// Sets the post-sign-in redirect target.
	pub fn with_redirect_to(mut self, target: impl Into<String>) -> Self {
		self.redirect_to = Some(target.into());

		self
	}
}

impl Broker {
	/// Signs a subject in with email + password credentials.
	///
	/// Unknown addresses and provider-only accounts (no stored digest) answer with
	/// the same message, and an unverified address receives a fresh verification
	/// token before any credential comparison happens. Redirect signals and
	/// unclassified sign-in failures propagate unchanged.
	pub async fn login(&self, request: LoginRequest) -> Result<ActionOutcome> {
		const KIND: FlowKind = FlowKind::Login;

		let span = FlowSpan::new(KIND, "login");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span.instrument(self.login_inner(request)).await;

		match &result {
			Ok(outcome) if outcome.is_success() =>
				obs::record_flow_outcome(KIND, FlowOutcome::Success),
			_ => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}

	async fn login_inner(&self, request: LoginRequest) -> Result<ActionOutcome> {
		let Ok(email) = EmailAddress::new(&request.email) else {
			return Ok(ActionOutcome::error("Invalid fields"));
		};
		let Ok(password) = Password::new(&request.password) else {
			return Ok(ActionOutcome::error("Invalid fields"));
		};

		if self.throttle("login", email.as_ref()).is_err() {
			return Ok(ActionOutcome::error(RATE_LIMITED_MESSAGE));
		}

		let Some(user) = self.store.find_user_by_email(&email).await? else {
			return Ok(ActionOutcome::error("Email does not exist"));
		};

		if !user.has_password() {
			// Provider-only accounts answer identically to unknown addresses.
			return Ok(ActionOutcome::error("Email does not exist"));
		}
		if !user.is_verified() {
			// Short-circuits before any credential comparison.
			let token = self.issue_token(TokenKind::Verification, &email).await?;

			self.mailer
				.send(&TokenMail::new(TokenKind::Verification, token.email, token.secret))
				.await?;

			return Ok(ActionOutcome::success("Confirmation email sent!"));
		}

		match self
			.authenticator
			.sign_in(&email, &password, request.redirect_to.as_deref())
			.await
			.map_err(Error::from)
		{
			Ok(()) => Ok(ActionOutcome::success("Logged in!")),
			Err(Error::CredentialsInvalid) => Ok(ActionOutcome::error("Invalid credentials")),
			Err(Error::UpstreamAuth { .. }) => Ok(ActionOutcome::error("Something went wrong")),
			Err(other) => Err(other),
		}
	}
}
