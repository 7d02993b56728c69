//! Shared outcome shape and messages for action flows.

// self
use crate::_prelude::*;

/// Message returned whenever the rate limiter rejects an attempt.
pub const RATE_LIMITED_MESSAGE: &str = "Too many requests. Try again later.";

/// User-facing result shape returned by every action flow.
///
/// Message text is the contract consumed by the UI layer; no structured error codes
/// cross this boundary, and token secrets never appear in either branch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionOutcome {
	/// Short human-readable confirmation.
	Success(String),
	/// Short human-readable rejection.
	Error(String),
}
impl ActionOutcome {
	/// Creates a success outcome.
	pub fn success(message: impl Into<String>) -> Self {
		Self::Success(message.into())
	}

	/// Creates an error outcome.
	pub fn error(message: impl Into<String>) -> Self {
		Self::Error(message.into())
	}

	/// Returns `true` for the success branch.
	pub const fn is_success(&self) -> bool {
		matches!(self, Self::Success(_))
	}

	/// Returns the carried message regardless of branch.
	pub fn message(&self) -> &str {
		match self {
			Self::Success(message) | Self::Error(message) => message,
		}
	}
}
