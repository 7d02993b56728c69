//! Fixed-window request limiter guarding abuse-prone broker actions.

// self
use crate::_prelude::*;

/// Length of one counting window.
const WINDOW: Duration = Duration::milliseconds(60_000);
/// Attempts allowed per key within one window.
const MAX_REQUESTS: u32 = 10;

/// Decision returned by [`RateLimiter::check`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitDecision {
	/// `true` when the attempt may proceed.
	pub success: bool,
}

#[derive(Clone, Copy, Debug)]
struct RateLimitEntry {
	count: u32,
	window_start: OffsetDateTime,
}

/// Per-key fixed-window counter deciding whether an attempt is allowed.
///
/// Each key tracks its own window, anchored to the first request in that window;
/// the first ten attempts within sixty seconds succeed and the rest fail without
/// being counted against the next window. Keys are opaque strings used verbatim;
/// callers encode action and subject (`{action}:{subject}`) to get
/// per-action-per-subject isolation.
///
/// Construct one instance per process (or per test) and inject it; entries live for
/// the lifetime of the limiter and are never evicted. The check-and-increment runs
/// under a single lock, so concurrent attempts on one key can never both slip past
/// the boundary.
#[derive(Debug, Default)]
pub struct RateLimiter {
	entries: Mutex<HashMap<String, RateLimitEntry>>,
}
impl RateLimiter {
	/// Creates an empty limiter.
	pub fn new() -> Self {
		Self::default()
	}

	/// Decides the attempt for `key` using the current UTC instant.
	pub fn check(&self, key: &str) -> RateLimitDecision {
		self.check_at(key, OffsetDateTime::now_utc())
	}

	/// Decides the attempt for `key` at the provided observation instant.
	pub fn check_at(&self, key: &str, now: OffsetDateTime) -> RateLimitDecision {
		let mut entries = self.entries.lock();
		let entry = entries
			.entry(key.to_owned())
			.or_insert(RateLimitEntry { count: 0, window_start: now });

		if now - entry.window_start > WINDOW {
			entry.count = 0;
			entry.window_start = now;
		}
		if entry.count < MAX_REQUESTS {
			entry.count += 1;

			return RateLimitDecision { success: true };
		}

		// The rejected attempt does not count against the next window.
		RateLimitDecision { success: false }
	}
}

/// Builds the composite `{action}:{subject}` key used by flows and host actions.
pub fn composite_key(action: &str, subject: &str) -> String {
	format!("{action}:{subject}")
}
