//! Sign-in contracts bridging the broker to the host's session machinery.

// self
use crate::{
	_prelude::*,
	auth::{EmailAddress, Password},
	error::{BoxError, Redirect},
};

/// Boxed future returned by [`Authenticator::sign_in`].
pub type SignInFuture<'a> = Pin<Box<dyn Future<Output = Result<(), SignInError>> + 'a + Send>>;

/// Session-issuing primitive supplied by the host.
///
/// Implementations compare the presented password against the stored digest and
/// establish whatever session state the host uses; cookies and session storage stay
/// on the host's side. The broker only interprets the error taxonomy below.
pub trait Authenticator
where
	Self: Send + Sync,
{
	/// Attempts to sign the subject in, navigating to `redirect_to` on success when
	/// the host supports it.
	fn sign_in<'a>(
		&'a self,
		email: &'a EmailAddress,
		password: &'a Password,
		redirect_to: Option<&'a str>,
	) -> SignInFuture<'a>;
}

/// Failure taxonomy produced by [`Authenticator`] implementations.
#[derive(Debug, ThisError)]
pub enum SignInError {
	/// Password comparison failed.
	#[error("Credentials were rejected.")]
	Credentials,
	/// Named authentication failure other than a credential mismatch.
	#[error("Authentication failed: {kind}.")]
	Auth {
		/// Host-assigned failure label.
		kind: String,
	},
	/// Navigation signal raised once sign-in succeeded with a redirect target.
	#[error(transparent)]
	Redirect(#[from] Redirect),
	/// Any other failure; the broker re-raises these unchanged.
	#[error("Sign-in failed for an unclassified reason.")]
	Other(#[source] BoxError),
}
impl From<SignInError> for Error {
	fn from(e: SignInError) -> Self {
		match e {
			SignInError::Credentials => Error::CredentialsInvalid,
			SignInError::Auth { kind } => Error::UpstreamAuth { kind },
			SignInError::Redirect(signal) => Error::Redirect(signal),
			SignInError::Other(source) => Error::Unclassified(source),
		}
	}
}
