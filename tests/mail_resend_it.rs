#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use credential_broker::{
	_preludet::*,
	auth::{EmailAddress, TokenKind, TokenSecret},
	mail::{MailError, Mailer, ResendConfig, ResendMailer, TokenMail},
};

fn make_mail(kind: TokenKind) -> TokenMail {
	TokenMail::new(
		kind,
		EmailAddress::new("user@example.com").expect("Address fixture should be valid."),
		TokenSecret::new("raw-secret"),
	)
}

fn make_config(server: &MockServer) -> ResendConfig {
	let app_url = Url::parse("https://quizzly.dev").expect("App URL fixture should parse.");
	let api_url = Url::parse(&server.base_url()).expect("Mock server URL should parse.");

	ResendConfig::new("test-key", "quizzly@mail.quizzly.dev", app_url).with_api_url(api_url)
}

#[tokio::test]
async fn verification_mail_posts_the_action_link() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/emails")
				.header("authorization", "Bearer test-key")
				.body_includes("auth/new-verification?token=raw-secret")
				.body_includes("Confirm your email");
			then.status(200).json_body(serde_json::json!({ "id": "email-1" }));
		})
		.await;
	let mailer = ResendMailer::new(make_config(&server));

	mailer
		.send(&make_mail(TokenKind::Verification))
		.await
		.expect("Delivery should succeed against the mock provider.");
	mock.assert_async().await;
}

#[tokio::test]
async fn reset_mail_uses_the_reset_subject_and_path() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/emails")
				.body_includes("auth/new-password?token=raw-secret")
				.body_includes("Reset your password");
			then.status(200).json_body(serde_json::json!({ "id": "email-2" }));
		})
		.await;
	let mailer = ResendMailer::new(make_config(&server));

	mailer
		.send(&make_mail(TokenKind::PasswordReset))
		.await
		.expect("Delivery should succeed against the mock provider.");
	mock.assert_async().await;
}

#[tokio::test]
async fn provider_rejections_surface_with_their_status() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/emails");
			then.status(422).body("invalid sender");
		})
		.await;

	let mailer = ResendMailer::new(make_config(&server));
	let error = mailer
		.send(&make_mail(TokenKind::Verification))
		.await
		.expect_err("A rejected message must surface as an error.");

	assert!(matches!(error, MailError::Provider { status: Some(422), .. }));
}

#[tokio::test]
async fn malformed_provider_responses_surface_as_parse_errors() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/emails");
			then.status(200).body("not json");
		})
		.await;

	let mailer = ResendMailer::new(make_config(&server));
	let error = mailer
		.send(&make_mail(TokenKind::Verification))
		.await
		.expect_err("A malformed response must surface as an error.");

	assert!(matches!(error, MailError::ResponseParse { .. }));
}

#[tokio::test]
async fn verified_recipients_are_registered_with_the_audience_best_effort() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/emails");
			then.status(200).json_body(serde_json::json!({ "id": "email-3" }));
		})
		.await;

	let contacts = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/audiences/aud-1/contacts")
				.body_includes("user@example.com");
			then.status(200).json_body(serde_json::json!({ "id": "contact-1" }));
		})
		.await;
	let mailer = ResendMailer::new(make_config(&server).with_audience("aud-1"));

	mailer
		.send(&make_mail(TokenKind::Verification))
		.await
		.expect("Delivery should succeed against the mock provider.");
	contacts.assert_calls_async(1).await;

	// Reset mail never registers contacts.
	mailer
		.send(&make_mail(TokenKind::PasswordReset))
		.await
		.expect("Reset delivery should succeed.");
	contacts.assert_calls_async(1).await;
}
