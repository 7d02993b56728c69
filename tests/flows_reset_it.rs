// self
use credential_broker::{
	_preludet::*,
	auth::{
		DisplayName, EmailAddress, NewUser, Password, PasswordHasher, Sha256PasswordHasher,
		TokenKind, TokenSecret,
	},
	flows::{ActionOutcome, NewPasswordRequest, ResetRequest},
	store::{CredentialStore, TokenDraft},
};

fn make_email(value: &str) -> EmailAddress {
	EmailAddress::new(value).expect("Address fixture should be valid.")
}

async fn seed_user(backends: &TestBackends, email: &str) -> credential_broker::auth::User {
	backends
		.store
		.create_user(NewUser {
			name: DisplayName::new("Test User").expect("Name fixture should be valid."),
			email: make_email(email),
			password: Some(
				Sha256PasswordHasher
					.hash(&Password::new("password123").expect("Password fixture is valid.")),
			),
		})
		.await
		.expect("Creating the user fixture should succeed.")
}

#[tokio::test]
async fn malformed_addresses_are_rejected() {
	let (broker, _backends) = build_test_broker();

	for email in ["", "not-valid"] {
		let outcome = broker
			.reset(ResetRequest::new(email))
			.await
			.expect("Reset should recover validation failures.");

		assert_eq!(outcome, ActionOutcome::error("Invalid email!"));
	}
}

#[tokio::test]
async fn unknown_addresses_are_rejected() {
	let (broker, _backends) = build_test_broker();
	let outcome = broker
		.reset(ResetRequest::new("nobody@example.com"))
		.await
		.expect("Reset should recover the missing-account case.");

	assert_eq!(outcome, ActionOutcome::error("Email does not exist!"));
}

#[tokio::test]
async fn reset_mails_a_single_use_token() {
	let (broker, backends) = build_test_broker();

	seed_user(&backends, "user@example.com").await;

	let outcome = broker
		.reset(ResetRequest::new("user@example.com"))
		.await
		.expect("Reset should succeed for a known account.");

	assert_eq!(outcome, ActionOutcome::success("Reset email sent"));

	let mail = backends.mailer.last().expect("A reset mail should have been recorded.");

	assert_eq!(mail.kind, TokenKind::PasswordReset);
	assert_eq!(mail.recipient.as_ref(), "user@example.com");
	assert_eq!(
		backends.store.token_rows_for(TokenKind::PasswordReset, &make_email("user@example.com")),
		1
	);
}

#[tokio::test]
async fn repeated_requests_supersede_the_earlier_token() {
	let (broker, backends) = build_test_broker();

	seed_user(&backends, "user@example.com").await;
	broker.reset(ResetRequest::new("user@example.com")).await.expect("First reset should pass.");

	let first = backends.mailer.last().expect("First mail should be recorded.");

	broker
		.reset(ResetRequest::new("user@example.com"))
		.await
		.expect("Second reset should pass.");

	let second = backends.mailer.last().expect("Second mail should be recorded.");

	assert_ne!(first.secret, second.secret);
	assert_eq!(
		backends.store.token_rows_for(TokenKind::PasswordReset, &make_email("user@example.com")),
		1
	);

	let stale = broker
		.new_password(NewPasswordRequest::new("replacement1"), Some(first.secret.expose()))
		.await
		.expect("Redeeming the superseded secret should recover.");

	assert_eq!(stale, ActionOutcome::error("Invalid token"));
}

#[tokio::test]
async fn a_missing_token_is_required_before_validation() {
	let (broker, _backends) = build_test_broker();
	let outcome = broker
		.new_password(NewPasswordRequest::new("replacement1"), None)
		.await
		.expect("Confirmation should recover the missing-token case.");

	assert_eq!(outcome, ActionOutcome::error("Token is required"));
}

#[tokio::test]
async fn weak_replacement_passwords_are_rejected() {
	let (broker, _backends) = build_test_broker();
	let outcome = broker
		.new_password(NewPasswordRequest::new("short"), Some("whatever-token"))
		.await
		.expect("Confirmation should recover validation failures.");

	assert_eq!(outcome, ActionOutcome::error("Invalid fields"));
}

#[tokio::test]
async fn unissued_tokens_are_rejected() {
	let (broker, _backends) = build_test_broker();
	let outcome = broker
		.new_password(NewPasswordRequest::new("replacement1"), Some("never-issued"))
		.await
		.expect("Confirmation should recover the unknown-token case.");

	assert_eq!(outcome, ActionOutcome::error("Invalid token"));
}

#[tokio::test]
async fn expired_tokens_are_reported_and_left_in_place() {
	let (broker, backends) = build_test_broker();

	seed_user(&backends, "user@example.com").await;
	backends
		.store
		.create_token(TokenDraft {
			kind: TokenKind::PasswordReset,
			email: make_email("user@example.com"),
			secret: TokenSecret::new("expired-token"),
			expires_at: OffsetDateTime::now_utc() - Duration::seconds(10),
		})
		.await
		.expect("Creating the expired fixture should succeed.");

	let outcome = broker
		.new_password(NewPasswordRequest::new("replacement1"), Some("expired-token"))
		.await
		.expect("Confirmation should recover the expired case.");

	assert_eq!(outcome, ActionOutcome::error("Token has expired"));
	// Expired rows are reported, not purged.
	assert_eq!(
		backends.store.token_rows_for(TokenKind::PasswordReset, &make_email("user@example.com")),
		1
	);
}

#[tokio::test]
async fn tokens_whose_owner_vanished_are_rejected() {
	let (broker, backends) = build_test_broker();

	backends
		.store
		.create_token(TokenDraft {
			kind: TokenKind::PasswordReset,
			email: make_email("ghost@example.com"),
			secret: TokenSecret::new("orphan-token"),
			expires_at: OffsetDateTime::now_utc() + Duration::hours(1),
		})
		.await
		.expect("Creating the orphan fixture should succeed.");

	let outcome = broker
		.new_password(NewPasswordRequest::new("replacement1"), Some("orphan-token"))
		.await
		.expect("Confirmation should recover the missing-owner case.");

	assert_eq!(outcome, ActionOutcome::error("Email not found"));
}

#[tokio::test]
async fn a_valid_token_rotates_the_digest_exactly_once() {
	let (broker, backends) = build_test_broker();
	let user = seed_user(&backends, "user@example.com").await;
	let old_digest = user.password.clone().expect("Seeded account should carry a digest.");

	broker.reset(ResetRequest::new("user@example.com")).await.expect("Reset should pass.");

	let mail = backends.mailer.last().expect("A reset mail should have been recorded.");
	let outcome = broker
		.new_password(NewPasswordRequest::new("replacement1"), Some(mail.secret.expose()))
		.await
		.expect("Confirmation should succeed with the mailed secret.");

	assert_eq!(outcome, ActionOutcome::success("Password updated successfully"));

	let updated = backends
		.store
		.find_user_by_id(&user.id)
		.await
		.expect("Lookup of the updated account should succeed.")
		.expect("The account should still exist.");

	assert_ne!(updated.password, Some(old_digest));
	assert_eq!(
		backends.store.token_rows_for(TokenKind::PasswordReset, &make_email("user@example.com")),
		0
	);

	// Single use: replaying the consumed secret answers as never issued.
	let replay = broker
		.new_password(NewPasswordRequest::new("replacement2"), Some(mail.secret.expose()))
		.await
		.expect("The replay should recover.");

	assert_eq!(replay, ActionOutcome::error("Invalid token"));
}

#[tokio::test]
async fn the_eleventh_request_for_one_address_is_throttled() {
	let (broker, backends) = build_test_broker();

	seed_user(&backends, "user@example.com").await;

	for _ in 0..10 {
		broker
			.reset(ResetRequest::new("user@example.com"))
			.await
			.expect("Reset attempts should pass or recover.");
	}

	let throttled = broker
		.reset(ResetRequest::new("user@example.com"))
		.await
		.expect("Reset should recover the throttled case.");

	assert_eq!(throttled, ActionOutcome::error("Too many requests. Try again later."));
}
