//! Broker-level error types shared across flows, stores, and mailers.

// self
use crate::_prelude::*;

/// Broker-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed error payload carried by unclassified failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical broker error exposed by public APIs.
///
/// Flow handlers recover the token/credential variants into user-facing messages at
/// the action boundary; [`Error::must_propagate`] variants are re-raised unchanged.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Storage-layer failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Mail-delivery failure.
	#[error("{0}")]
	Mail(
		#[from]
		#[source]
		crate::mail::MailError,
	),
	/// Host navigation signal raised through the sign-in primitive.
	///
	/// Never mapped to a user message; handler code re-raises it so the host's
	/// redirect machinery keeps working.
	#[error(transparent)]
	Redirect(#[from] Redirect),
	/// Sign-in failure outside the authentication taxonomy.
	#[error("Sign-in failed for an unclassified reason.")]
	Unclassified(#[source] BoxError),

	/// Presented token value does not match any issued token.
	#[error("Token does not match any issued token.")]
	InvalidToken,
	/// Token row exists but its deadline has passed.
	#[error("Token has passed its expiry deadline.")]
	TokenExpired,
	/// Token is valid but the owning account no longer exists.
	#[error("Token owner no longer exists.")]
	OwnerNotFound,
	/// The rate limiter rejected the attempt for this key.
	#[error("Rate limit exceeded for `{key}`.")]
	RateLimited {
		/// Composite `{action}:{subject}` key that was throttled.
		key: String,
	},
	/// Credential comparison failed during sign-in.
	#[error("Credentials were rejected.")]
	CredentialsInvalid,
	/// Named authentication failure other than a credential mismatch.
	#[error("Authentication failed: {kind}.")]
	UpstreamAuth {
		/// Host-assigned failure label.
		kind: String,
	},
}
impl Error {
	/// Returns `true` when the variant must reach the caller instead of being mapped
	/// to a user-facing message at the action boundary.
	pub const fn must_propagate(&self) -> bool {
		matches!(
			self,
			Self::Storage(_) | Self::Mail(_) | Self::Redirect(_) | Self::Unclassified(_)
		)
	}
}

/// Navigation signal produced by a sign-in that succeeded with a redirect target.
///
/// The host models navigation as a raised signal; it travels the error channel so it
/// can cross flow boundaries, but it is control flow, not a failure. Handlers must
/// let it pass untouched.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Redirecting to {target}.")]
pub struct Redirect {
	/// Destination the host should navigate to.
	pub target: String,
}
impl Redirect {
	/// Creates a signal for the provided destination.
	pub fn to(target: impl Into<String>) -> Self {
		Self { target: target.into() }
	}
}
