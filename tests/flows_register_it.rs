// self
use credential_broker::{
	_preludet::*,
	auth::{EmailAddress, TokenKind},
	flows::{ActionOutcome, RegisterRequest},
	store::CredentialStore,
};

fn make_email(value: &str) -> EmailAddress {
	EmailAddress::new(value).expect("Address fixture should be valid.")
}

#[tokio::test]
async fn malformed_fields_are_rejected_before_any_lookup() {
	let (broker, backends) = build_test_broker();

	for (name, email, password) in [
		("", "user@example.com", "password123"),
		("John", "not-an-email", "password123"),
		("John", "user@example.com", "short"),
		("John", "user@example.com", "pass word 123"),
	] {
		let outcome = broker
			.register(RegisterRequest::new(name, email, password))
			.await
			.expect("Registration should recover validation failures.");

		assert_eq!(outcome, ActionOutcome::error("Invalid fields"));
	}

	assert!(backends.mailer.sent().is_empty());
}

#[tokio::test]
async fn taken_addresses_are_rejected() {
	let (broker, _backends) = build_test_broker();

	broker
		.register(RegisterRequest::new("John", "taken@example.com", "password123"))
		.await
		.expect("First registration should succeed.");

	let outcome = broker
		.register(RegisterRequest::new("Jane", "taken@example.com", "password456"))
		.await
		.expect("Second registration should recover the conflict.");

	assert_eq!(outcome, ActionOutcome::error("Email already taken"));
}

#[tokio::test]
async fn registration_creates_the_account_and_mails_a_verification_token() {
	let (broker, backends) = build_test_broker();
	let outcome = broker
		.register(RegisterRequest::new("John Doe", "new@example.com", "password123"))
		.await
		.expect("Registration should succeed.");

	assert_eq!(outcome, ActionOutcome::success("Confirmation email sent!"));

	let user = backends
		.store
		.find_user_by_email(&make_email("new@example.com"))
		.await
		.expect("Lookup of the new account should succeed.")
		.expect("The new account should exist.");

	assert_eq!(user.name, "John Doe");
	assert!(!user.is_verified(), "Fresh registrations must start unverified.");

	let digest = user.password.expect("The account should carry a digest.");

	assert_ne!(digest.expose(), "password123", "The plaintext must never be persisted.");

	let mail = backends.mailer.last().expect("A verification mail should have been recorded.");

	assert_eq!(mail.kind, TokenKind::Verification);
	assert_eq!(mail.recipient.as_ref(), "new@example.com");
	assert_eq!(
		backends.store.token_rows_for(TokenKind::Verification, &make_email("new@example.com")),
		1
	);

	let stored = backends
		.store
		.find_token_by_secret(TokenKind::Verification, mail.secret.expose())
		.await
		.expect("Lookup of the mailed secret should succeed.")
		.expect("The mailed secret should match the stored row.");

	assert_eq!(stored.email.as_ref(), "new@example.com");
}

#[tokio::test]
async fn the_eleventh_attempt_for_one_address_is_throttled() {
	let (broker, _backends) = build_test_broker();

	// The first attempt registers; the rest bounce off the conflict check.
	for _ in 0..10 {
		broker
			.register(RegisterRequest::new("John", "busy@example.com", "password123"))
			.await
			.expect("Registration attempts should recover their rejections.");
	}

	let throttled = broker
		.register(RegisterRequest::new("John", "busy@example.com", "password123"))
		.await
		.expect("Registration should recover the throttled case.");

	assert_eq!(throttled, ActionOutcome::error("Too many requests. Try again later."));
}
