//! Account registration flow.

// self
use crate::{
	_prelude::*,
	auth::{DisplayName, EmailAddress, NewUser, Password, TokenKind},
	flows::{Broker, common::{ActionOutcome, RATE_LIMITED_MESSAGE}},
	mail::TokenMail,
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};

/// Parameters for [`Broker::register`].
#[derive(Clone, Debug)]
pub struct RegisterRequest {
	/// Raw account name as submitted.
	pub name: String,
	/// Raw address as submitted.
	pub email: String,
	/// Raw password as submitted.
	pub password: String,
}
impl RegisterRequest {
	/// Creates a registration request.
	pub fn new(
		name: impl Into<String>,
		email: impl Into<String>,
		password: impl Into<String>,
	) -> Self {
		Self { name: name.into(), email: email.into(), password: password.into() }
	}
}

impl Broker {
	/// Registers a new subject and dispatches its first verification token.
	///
	/// The account starts unverified; sign-in stays blocked until the confirmation
	/// link is followed. The token secret travels only through the mailer.
	pub async fn register(&self, request: RegisterRequest) -> Result<ActionOutcome> {
		const KIND: FlowKind = FlowKind::Register;

		let span = FlowSpan::new(KIND, "register");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span.instrument(self.register_inner(request)).await;

		match &result {
			Ok(outcome) if outcome.is_success() =>
				obs::record_flow_outcome(KIND, FlowOutcome::Success),
			_ => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}

	async fn register_inner(&self, request: RegisterRequest) -> Result<ActionOutcome> {
		let Ok(name) = DisplayName::new(&request.name) else {
			return Ok(ActionOutcome::error("Invalid fields"));
		};
		let Ok(email) = EmailAddress::new(&request.email) else {
			return Ok(ActionOutcome::error("Invalid fields"));
		};
		let Ok(password) = Password::new(&request.password) else {
			return Ok(ActionOutcome::error("Invalid fields"));
		};

		if self.throttle("register", email.as_ref()).is_err() {
			return Ok(ActionOutcome::error(RATE_LIMITED_MESSAGE));
		}
		if self.store.find_user_by_email(&email).await?.is_some() {
			return Ok(ActionOutcome::error("Email already taken"));
		}

		let digest = self.hasher.hash(&password);

		self.store
			.create_user(NewUser { name, email: email.clone(), password: Some(digest) })
			.await?;

		let token = self.issue_token(TokenKind::Verification, &email).await?;

		self.mailer
			.send(&TokenMail::new(TokenKind::Verification, token.email, token.secret))
			.await?;

		Ok(ActionOutcome::success("Confirmation email sent!"))
	}
}
