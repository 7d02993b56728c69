//! Rust’s turnkey credential broker—single-use email token flows, sliding-window throttles, and
//! store-agnostic account plumbing in one crate built for production.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod error;
pub mod flows;
pub mod mail;
pub mod obs;
pub mod rate_limit;
pub mod signin;
pub mod store;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// std
	use std::collections::VecDeque;
	// self
	use crate::{
		auth::{EmailAddress, Password, Sha256PasswordHasher},
		flows::Broker,
		mail::MemoryMailer,
		signin::{Authenticator, SignInError, SignInFuture},
		store::MemoryStore,
	};

	/// In-memory collaborator handles kept alongside a test broker for assertions.
	#[derive(Clone)]
	pub struct TestBackends {
		/// Store backend shared with the broker.
		pub store: Arc<MemoryStore>,
		/// Mailer backend recording outbound messages.
		pub mailer: Arc<MemoryMailer>,
		/// Scripted sign-in primitive.
		pub authenticator: Arc<ScriptedAuthenticator>,
	}

	/// Sign-in primitive that replays scripted outcomes and records every attempt.
	///
	/// An empty script answers `Ok(())`, so flows that never reach the sign-in step
	/// need no setup at all.
	#[derive(Debug, Default)]
	pub struct ScriptedAuthenticator {
		outcomes: Mutex<VecDeque<Result<(), SignInError>>>,
		attempts: Mutex<Vec<SignInAttempt>>,
	}

	/// One recorded call to [`ScriptedAuthenticator`].
	#[derive(Clone, Debug, PartialEq, Eq)]
	pub struct SignInAttempt {
		/// Address the flow attempted to sign in.
		pub email: EmailAddress,
		/// Redirect target forwarded by the flow, if any.
		pub redirect_to: Option<String>,
	}

	impl ScriptedAuthenticator {
		/// Queues the outcome returned by the next sign-in attempt.
		pub fn script(&self, outcome: Result<(), SignInError>) {
			self.outcomes.lock().push_back(outcome);
		}

		/// Returns every attempt observed so far.
		pub fn attempts(&self) -> Vec<SignInAttempt> {
			self.attempts.lock().clone()
		}
	}
	impl Authenticator for ScriptedAuthenticator {
		fn sign_in<'a>(
			&'a self,
			email: &'a EmailAddress,
			_password: &'a Password,
			redirect_to: Option<&'a str>,
		) -> SignInFuture<'a> {
			self.attempts.lock().push(SignInAttempt {
				email: email.clone(),
				redirect_to: redirect_to.map(str::to_owned),
			});

			let outcome = self.outcomes.lock().pop_front().unwrap_or(Ok(()));

			Box::pin(async move { outcome })
		}
	}

	/// Constructs a [`Broker`] backed by in-memory collaborators and the default hasher.
	pub fn build_test_broker() -> (Broker, TestBackends) {
		let store = Arc::new(MemoryStore::default());
		let mailer = Arc::new(MemoryMailer::default());
		let authenticator = Arc::new(ScriptedAuthenticator::default());
		let broker = Broker::new(
			store.clone(),
			mailer.clone(),
			Arc::new(Sha256PasswordHasher),
			authenticator.clone(),
		);

		(broker, TestBackends { store, mailer, authenticator })
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {credential_broker as _, httpmock as _, tokio as _};
