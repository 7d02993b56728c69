//! High-level action flows powered by the broker facade.

pub mod common;
pub mod tokens;

mod login;
mod new_password;
mod register;
mod reset;
mod verification;

pub use common::*;
pub use login::*;
pub use new_password::*;
pub use register::*;
pub use reset::*;

// self
use crate::{
	_prelude::*,
	auth::PasswordHasher,
	flows::tokens::IssueKey,
	mail::Mailer,
	rate_limit::{RateLimitDecision, RateLimiter, composite_key},
	signin::Authenticator,
	store::CredentialStore,
};

/// Coordinates credential flows against injected collaborators.
///
/// The broker owns throttling and token lifecycle policy (expiry, supersession,
/// single-use redemption); persistence, mail delivery, credential hashing, and
/// session issuance are collaborator traits so hosts bring their own backends.
/// Every action answers with an [`ActionOutcome`] message; only faults the caller
/// must see (storage, mail, navigation signals, unclassified sign-in errors)
/// surface as [`enum@crate::error::Error`].
#[derive(Clone)]
pub struct Broker {
	/// Store that persists accounts and token rows.
	pub store: Arc<dyn CredentialStore>,
	/// Outbound mailer handed freshly issued tokens.
	pub mailer: Arc<dyn Mailer>,
	/// One-way credential hashing primitive.
	pub hasher: Arc<dyn PasswordHasher>,
	/// Session-issuing sign-in primitive.
	pub authenticator: Arc<dyn Authenticator>,
	/// Request limiter guarding abuse-prone actions.
	pub limiter: Arc<RateLimiter>,
	issue_guards: Arc<Mutex<HashMap<IssueKey, Arc<AsyncMutex<()>>>>>,
}
impl Broker {
	/// Creates a broker with a fresh rate limiter.
	pub fn new(
		store: Arc<dyn CredentialStore>,
		mailer: Arc<dyn Mailer>,
		hasher: Arc<dyn PasswordHasher>,
		authenticator: Arc<dyn Authenticator>,
	) -> Self {
		Self {
			store,
			mailer,
			hasher,
			authenticator,
			limiter: Arc::new(RateLimiter::new()),
			issue_guards: Default::default(),
		}
	}

	/// Replaces the rate limiter, e.g. to share one limiter across brokers.
	pub fn with_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
		self.limiter = limiter;

		self
	}

	/// Rejects with [`Error::RateLimited`] when the composite key is over budget.
	pub fn throttle(&self, action: &str, subject: &str) -> Result<()> {
		let key = composite_key(action, subject);

		if self.limiter.check(&key).success { Ok(()) } else { Err(Error::RateLimited { key }) }
	}

	/// Consults the rate limiter for `{action}:{subject}` and reports the decision.
	///
	/// Exposed so hosts can throttle actions outside this crate (e.g.
	/// `create-quiz:{user_id}`) through the same limiter the flows use.
	pub fn guard(&self, action: &str, subject: &str) -> RateLimitDecision {
		RateLimitDecision { success: self.throttle(action, subject).is_ok() }
	}

	pub(crate) fn issue_guard(&self, key: &IssueKey) -> Arc<AsyncMutex<()>> {
		let mut guards = self.issue_guards.lock();

		guards.entry(key.clone()).or_insert_with(|| Arc::new(AsyncMutex::new(()))).clone()
	}
}
impl Debug for Broker {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Broker").finish_non_exhaustive()
	}
}
