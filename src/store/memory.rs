//! Thread-safe in-memory [`CredentialStore`] implementation for local development and tests.

// std
use std::sync::atomic::{AtomicU64, Ordering};
// self
use crate::{
	_prelude::*,
	auth::{EmailAddress, NewUser, TokenId, TokenKind, TokenRecord, User, UserId, UserUpdate},
	store::{CredentialStore, StoreError, StoreFuture, TokenDraft},
};

#[derive(Debug, Default)]
struct MemoryInner {
	users: RwLock<HashMap<UserId, User>>,
	tokens: RwLock<HashMap<TokenId, TokenRecord>>,
	sequence: AtomicU64,
}
impl MemoryInner {
	fn next_id(&self, prefix: &str) -> String {
		let n = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;

		format!("{prefix}-{n}")
	}
}

/// Thread-safe storage backend that keeps rows in-process for tests and demos.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(Arc<MemoryInner>);
impl MemoryStore {
	fn user_by_email_now(inner: &MemoryInner, email: &EmailAddress) -> Option<User> {
		inner.users.read().values().find(|user| user.email == *email).cloned()
	}

	fn create_user_now(inner: &MemoryInner, user: NewUser) -> Result<User, StoreError> {
		let id = UserId::new(inner.next_id("user"))
			.map_err(|e| StoreError::Backend { message: e.to_string() })?;
		let row = User {
			id: id.clone(),
			name: user.name.into(),
			email: user.email,
			password: user.password,
			email_verified: None,
		};

		inner.users.write().insert(id, row.clone());

		Ok(row)
	}

	fn update_user_now(inner: &MemoryInner, id: &UserId, update: UserUpdate) -> Option<User> {
		let mut users = inner.users.write();
		let user = users.get_mut(id)?;

		match update {
			UserUpdate::EmailVerified { verified_at, email } => {
				user.email_verified = Some(verified_at);
				user.email = email;
			},
			UserUpdate::Password { digest } => user.password = Some(digest),
		}

		Some(user.clone())
	}

	fn token_by_secret_now(
		inner: &MemoryInner,
		kind: TokenKind,
		secret: &str,
	) -> Option<TokenRecord> {
		inner
			.tokens
			.read()
			.values()
			.find(|record| record.kind == kind && record.secret.expose() == secret)
			.cloned()
	}

	fn token_by_email_now(
		inner: &MemoryInner,
		kind: TokenKind,
		email: &EmailAddress,
	) -> Option<TokenRecord> {
		inner
			.tokens
			.read()
			.values()
			.find(|record| record.kind == kind && record.email == *email)
			.cloned()
	}

	fn create_token_now(inner: &MemoryInner, draft: TokenDraft) -> Result<TokenRecord, StoreError> {
		let id = TokenId::new(inner.next_id("token"))
			.map_err(|e| StoreError::Backend { message: e.to_string() })?;
		let row = TokenRecord {
			id: id.clone(),
			kind: draft.kind,
			email: draft.email,
			secret: draft.secret,
			expires_at: draft.expires_at,
		};

		inner.tokens.write().insert(id, row.clone());

		Ok(row)
	}

	fn delete_token_now(inner: &MemoryInner, kind: TokenKind, id: &TokenId) {
		let mut tokens = inner.tokens.write();

		if tokens.get(id).is_some_and(|record| record.kind == kind) {
			tokens.remove(id);
		}
	}

	/// Counts the token rows currently held for the owner address and kind.
	pub fn token_rows_for(&self, kind: TokenKind, email: &EmailAddress) -> usize {
		self.0
			.tokens
			.read()
			.values()
			.filter(|record| record.kind == kind && record.email == *email)
			.count()
	}
}
impl CredentialStore for MemoryStore {
	fn find_user_by_email<'a>(
		&'a self,
		email: &'a EmailAddress,
	) -> StoreFuture<'a, Option<User>> {
		let inner = self.0.clone();
		let email = email.to_owned();

		Box::pin(async move { Ok(Self::user_by_email_now(&inner, &email)) })
	}

	fn find_user_by_id<'a>(&'a self, id: &'a UserId) -> StoreFuture<'a, Option<User>> {
		let inner = self.0.clone();
		let id = id.to_owned();

		Box::pin(async move { Ok(inner.users.read().get(&id).cloned()) })
	}

	fn create_user(&self, user: NewUser) -> StoreFuture<'_, User> {
		let inner = self.0.clone();

		Box::pin(async move { Self::create_user_now(&inner, user) })
	}

	fn update_user<'a>(
		&'a self,
		id: &'a UserId,
		update: UserUpdate,
	) -> StoreFuture<'a, Option<User>> {
		let inner = self.0.clone();
		let id = id.to_owned();

		Box::pin(async move { Ok(Self::update_user_now(&inner, &id, update)) })
	}

	fn find_token_by_secret<'a>(
		&'a self,
		kind: TokenKind,
		secret: &'a str,
	) -> StoreFuture<'a, Option<TokenRecord>> {
		let inner = self.0.clone();
		let secret = secret.to_owned();

		Box::pin(async move { Ok(Self::token_by_secret_now(&inner, kind, &secret)) })
	}

	fn find_token_by_email<'a>(
		&'a self,
		kind: TokenKind,
		email: &'a EmailAddress,
	) -> StoreFuture<'a, Option<TokenRecord>> {
		let inner = self.0.clone();
		let email = email.to_owned();

		Box::pin(async move { Ok(Self::token_by_email_now(&inner, kind, &email)) })
	}

	fn create_token(&self, draft: TokenDraft) -> StoreFuture<'_, TokenRecord> {
		let inner = self.0.clone();

		Box::pin(async move { Self::create_token_now(&inner, draft) })
	}

	fn delete_token<'a>(&'a self, kind: TokenKind, id: &'a TokenId) -> StoreFuture<'a, ()> {
		let inner = self.0.clone();
		let id = id.to_owned();

		Box::pin(async move {
			Self::delete_token_now(&inner, kind, &id);

			Ok(())
		})
	}
}
