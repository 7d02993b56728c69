//! Mail contracts and built-in mailer implementations for token delivery.

pub mod memory;
#[cfg(feature = "reqwest")] pub mod resend;

pub use memory::MemoryMailer;
#[cfg(feature = "reqwest")] pub use resend::{ResendConfig, ResendMailer};

// self
use crate::{
	_prelude::*,
	auth::{EmailAddress, TokenKind, TokenSecret},
	error::BoxError,
};

/// Boxed future returned by [`Mailer::send`].
pub type MailFuture<'a> = Pin<Box<dyn Future<Output = Result<(), MailError>> + 'a + Send>>;

/// Outbound delivery contract handed freshly issued tokens.
///
/// Dispatch is fire-and-forget from the broker's perspective: a failure surfaces
/// once and is never retried here. Token secrets reach the recipient only through
/// this contract, never through action results.
pub trait Mailer
where
	Self: Send + Sync,
{
	/// Dispatches the message for the provided token.
	fn send<'a>(&'a self, mail: &'a TokenMail) -> MailFuture<'a>;
}

/// Message payload handed to a [`Mailer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenMail {
	/// Flow namespace the token belongs to.
	pub kind: TokenKind,
	/// Recipient address.
	pub recipient: EmailAddress,
	/// Single-use value embedded in the action link.
	pub secret: TokenSecret,
}
impl TokenMail {
	/// Creates a message payload for the provided token parts.
	pub fn new(kind: TokenKind, recipient: EmailAddress, secret: TokenSecret) -> Self {
		Self { kind, recipient, secret }
	}

	/// Builds the browser link the recipient follows to complete the flow.
	pub fn action_link(&self, app_url: &Url) -> Url {
		let mut link = app_url.clone();

		link.set_path(match self.kind {
			TokenKind::Verification => "auth/new-verification",
			TokenKind::PasswordReset => "auth/new-password",
		});
		link.query_pairs_mut().clear().append_pair("token", self.secret.expose());

		link
	}
}

/// Error type produced by [`Mailer`] implementations.
#[derive(Debug, ThisError)]
pub enum MailError {
	/// Provider rejected the message.
	#[error("Mail provider rejected the message: {message}.")]
	Provider {
		/// Human-readable error payload.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Provider responded with malformed JSON that could not be parsed.
	#[error("Mail provider returned malformed JSON.")]
	ResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Underlying transport reported a network failure.
	#[error("Network error occurred while contacting the mail provider.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl MailError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
