//! Storage contracts and the built-in in-memory store for accounts and token rows.

pub mod memory;

pub use memory::MemoryStore;

// self
use crate::{
	_prelude::*,
	auth::{EmailAddress, NewUser, TokenId, TokenKind, TokenRecord, TokenSecret, User, UserId,
		UserUpdate},
};

/// Boxed future returned by [`CredentialStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Persistence contract for credential subjects and token rows.
///
/// The backend stores and retrieves rows verbatim; it never interprets expiry and
/// never enforces the single-active-token invariant; both stay with the broker.
pub trait CredentialStore
where
	Self: Send + Sync,
{
	/// Fetches the subject owning the provided address, if present.
	fn find_user_by_email<'a>(&'a self, email: &'a EmailAddress)
	-> StoreFuture<'a, Option<User>>;

	/// Fetches the subject with the provided id, if present.
	fn find_user_by_id<'a>(&'a self, id: &'a UserId) -> StoreFuture<'a, Option<User>>;

	/// Persists a new subject and returns it with its assigned id.
	fn create_user(&self, user: NewUser) -> StoreFuture<'_, User>;

	/// Applies a field mutation to the subject, returning the updated row if it exists.
	fn update_user<'a>(
		&'a self,
		id: &'a UserId,
		update: UserUpdate,
	) -> StoreFuture<'a, Option<User>>;

	/// Fetches the token row carrying the provided secret value, if present.
	fn find_token_by_secret<'a>(
		&'a self,
		kind: TokenKind,
		secret: &'a str,
	) -> StoreFuture<'a, Option<TokenRecord>>;

	/// Fetches the active token row for the owner address, if present.
	fn find_token_by_email<'a>(
		&'a self,
		kind: TokenKind,
		email: &'a EmailAddress,
	) -> StoreFuture<'a, Option<TokenRecord>>;

	/// Persists a new token row and returns it with its assigned id.
	fn create_token(&self, draft: TokenDraft) -> StoreFuture<'_, TokenRecord>;

	/// Removes the token row with the provided id.
	///
	/// Deleting an id that no longer exists is not an error; supersession and
	/// redemption both rely on the delete being idempotent.
	fn delete_token<'a>(&'a self, kind: TokenKind, id: &'a TokenId) -> StoreFuture<'a, ()>;
}

/// Row payload handed to [`CredentialStore::create_token`]; the backend assigns the id.
#[derive(Clone, Debug)]
pub struct TokenDraft {
	/// Flow namespace the row belongs to.
	pub kind: TokenKind,
	/// Owner address the token is issued for.
	pub email: EmailAddress,
	/// Unguessable single-use value.
	pub secret: TokenSecret,
	/// Instant past which the row can no longer be redeemed.
	pub expires_at: OffsetDateTime,
}

/// Error type produced by [`CredentialStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
