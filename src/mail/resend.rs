//! Reqwest-backed [`Mailer`] delivering token mail through the Resend HTTP API.

// crates.io
use reqwest::Client as ReqwestClient;
// self
use crate::{
	_prelude::*,
	auth::TokenKind,
	mail::{MailError, MailFuture, Mailer, TokenMail},
};

const DEFAULT_API_URL: &str = "https://api.resend.com/";

/// Configuration for [`ResendMailer`].
#[derive(Clone, Debug)]
pub struct ResendConfig {
	/// Bearer token for the Resend API.
	pub api_key: String,
	/// Sender address, e.g. `quizzly@mail.quizzly.dev`.
	pub from: String,
	/// Application base URL the action links point back to.
	pub app_url: Url,
	/// Resend API base URL; overridable for tests.
	pub api_url: Url,
	/// Audience to register verified recipients with, if any.
	pub audience_id: Option<String>,
}
impl ResendConfig {
	/// Creates a configuration pointing at the public Resend API.
	pub fn new(api_key: impl Into<String>, from: impl Into<String>, app_url: Url) -> Self {
		let api_url = Url::parse(DEFAULT_API_URL).expect("Default API URL is a valid literal.");

		Self { api_key: api_key.into(), from: from.into(), app_url, api_url, audience_id: None }
	}

	/// Overrides the API base URL (used by tests to target a local mock).
	pub fn with_api_url(mut self, api_url: Url) -> Self {
		self.api_url = api_url;

		self
	}

	/// Registers verified recipients with the provided audience after sending.
	pub fn with_audience(mut self, audience_id: impl Into<String>) -> Self {
		self.audience_id = Some(audience_id.into());

		self
	}
}

#[derive(Debug, Deserialize)]
struct SendResponse {
	#[allow(dead_code)]
	id: String,
}

/// Mailer that posts token mail to the Resend HTTP API.
#[derive(Clone, Debug)]
pub struct ResendMailer {
	config: ResendConfig,
	client: ReqwestClient,
}
impl ResendMailer {
	/// Creates a mailer with a fresh reqwest client.
	pub fn new(config: ResendConfig) -> Self {
		Self::with_client(config, ReqwestClient::new())
	}

	/// Creates a mailer that reuses the caller-provided client.
	pub fn with_client(config: ResendConfig, client: ReqwestClient) -> Self {
		Self { config, client }
	}

	fn endpoint(&self, path: &str) -> Result<Url, MailError> {
		self.config.api_url.join(path).map_err(|e| MailError::Provider {
			message: format!("invalid endpoint `{path}`: {e}"),
			status: None,
		})
	}

	async fn deliver(&self, mail: &TokenMail) -> Result<(), MailError> {
		let link = mail.action_link(&self.config.app_url);
		let (subject, verb) = match mail.kind {
			TokenKind::Verification => ("Confirm your email", "confirm your email"),
			TokenKind::PasswordReset => ("Reset your password", "reset your password"),
		};
		let payload = serde_json::json!({
			"from": self.config.from,
			"to": [mail.recipient.as_ref()],
			"subject": subject,
			"html": format!("<p>Click <a href=\"{link}\">here</a> to {verb}.</p>"),
		});
		let response = self
			.client
			.post(self.endpoint("emails")?)
			.bearer_auth(&self.config.api_key)
			.json(&payload)
			.send()
			.await
			.map_err(MailError::network)?;
		let status = response.status();
		let bytes = response.bytes().await.map_err(MailError::network)?;

		if !status.is_success() {
			return Err(MailError::Provider {
				message: String::from_utf8_lossy(&bytes).into_owned(),
				status: Some(status.as_u16()),
			});
		}

		let mut deserializer = serde_json::Deserializer::from_slice(&bytes);
		let _: SendResponse = serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| MailError::ResponseParse { source })?;

		if mail.kind == TokenKind::Verification
			&& let Some(audience_id) = &self.config.audience_id
		{
			// Best-effort registration; delivery already succeeded.
			let _ = self.register_contact(mail, audience_id).await;
		}

		Ok(())
	}

	async fn register_contact(&self, mail: &TokenMail, audience_id: &str) -> Result<(), MailError> {
		let payload = serde_json::json!({ "email": mail.recipient.as_ref() });

		self.client
			.post(self.endpoint(&format!("audiences/{audience_id}/contacts"))?)
			.bearer_auth(&self.config.api_key)
			.json(&payload)
			.send()
			.await
			.map_err(MailError::network)?;

		Ok(())
	}
}
impl Mailer for ResendMailer {
	fn send<'a>(&'a self, mail: &'a TokenMail) -> MailFuture<'a> {
		Box::pin(self.deliver(mail))
	}
}
impl From<reqwest::Error> for MailError {
	fn from(e: reqwest::Error) -> Self {
		Self::network(e)
	}
}
