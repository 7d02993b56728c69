//! Thread-safe in-memory [`Mailer`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	mail::{MailFuture, Mailer, TokenMail},
};

/// Thread-safe mailer that records outbound messages instead of delivering them.
#[derive(Clone, Debug, Default)]
pub struct MemoryMailer(Arc<Mutex<Vec<TokenMail>>>);
impl MemoryMailer {
	/// Returns every message recorded so far.
	pub fn sent(&self) -> Vec<TokenMail> {
		self.0.lock().clone()
	}

	/// Returns the most recently recorded message, if any.
	pub fn last(&self) -> Option<TokenMail> {
		self.0.lock().last().cloned()
	}
}
impl Mailer for MemoryMailer {
	fn send<'a>(&'a self, mail: &'a TokenMail) -> MailFuture<'a> {
		let sink = self.0.clone();
		let mail = mail.clone();

		Box::pin(async move {
			sink.lock().push(mail);

			Ok(())
		})
	}
}
