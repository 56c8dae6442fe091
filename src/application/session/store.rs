//! Persisted auth store.
//!
//! Every transition writes storage first, then updates the in-memory
//! state, then hands back the value the readable auth cookie must carry.
//! Callers set that cookie from the returned string so the cookie and the
//! store cannot drift apart.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::domain::{AuthSession, DomainResult, PersistedAuth, User};
use crate::infrastructure::storage::Storage;

/// Appended to the store key to form the refresh-token key.
pub const REFRESH_TOKEN_SUFFIX: &str = "-refresh";

pub struct AuthStore {
    storage: Arc<dyn Storage>,
    key: String,
    state: RwLock<AuthSession>,
}

impl AuthStore {
    pub fn new(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            state: RwLock::new(AuthSession::anonymous()),
        }
    }

    /// Store key; also the name of the mirror cookie.
    pub fn key(&self) -> &str {
        &self.key
    }

    fn refresh_key(&self) -> String {
        format!("{}{}", self.key, REFRESH_TOKEN_SUFFIX)
    }

    /// Load the persisted session. An unreadable entry counts as logged out.
    pub async fn hydrate(&self) -> DomainResult<AuthSession> {
        let restored = match self.storage.get(&self.key).await? {
            Some(raw) => match PersistedAuth::decode(&raw) {
                Ok(persisted) => persisted.state,
                Err(e) => {
                    warn!(key = %self.key, error = %e, "discarding corrupt auth entry");
                    AuthSession::anonymous()
                }
            },
            None => AuthSession::anonymous(),
        };
        *self.state.write().await = restored.clone();
        Ok(restored)
    }

    pub async fn snapshot(&self) -> AuthSession {
        self.state.read().await.clone()
    }

    pub async fn access_token(&self) -> Option<String> {
        self.state.read().await.access_token().map(str::to_string)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_valid()
    }

    pub async fn set_auth(&self, user: User, access_token: &str) -> DomainResult<String> {
        debug!(user_id = user.id, "storing authenticated session");
        self.commit(AuthSession::authenticated(user, access_token)).await
    }

    /// Replace the access token after a refresh, keeping the user.
    pub async fn set_access_token(&self, access_token: &str) -> DomainResult<String> {
        let mut next = self.snapshot().await;
        next.access_token = Some(access_token.to_string());
        next.is_authenticated = !access_token.is_empty();
        self.commit(next).await
    }

    pub async fn update_user(&self, user: User) -> DomainResult<String> {
        let mut next = self.snapshot().await;
        next.user = Some(user);
        self.commit(next).await
    }

    /// Forget the session and the refresh token.
    pub async fn logout(&self) -> DomainResult<String> {
        self.storage.remove(&self.refresh_key()).await?;
        self.commit(AuthSession::anonymous()).await
    }

    /// Current value for the readable auth cookie.
    pub async fn mirror_value(&self) -> DomainResult<String> {
        Ok(PersistedAuth::new(self.snapshot().await).encode()?)
    }

    pub async fn refresh_token(&self) -> DomainResult<Option<String>> {
        Ok(self
            .storage
            .get(&self.refresh_key())
            .await?
            .filter(|t| !t.is_empty()))
    }

    pub async fn set_refresh_token(&self, token: &str) -> DomainResult<()> {
        if token.is_empty() {
            return self.storage.remove(&self.refresh_key()).await;
        }
        self.storage.set(&self.refresh_key(), token).await
    }

    async fn commit(&self, next: AuthSession) -> DomainResult<String> {
        let encoded = PersistedAuth::new(next.clone()).encode()?;
        if next == AuthSession::anonymous() {
            self.storage.remove(&self.key).await?;
        } else {
            self.storage.set(&self.key, &encoded).await?;
        }
        *self.state.write().await = next;
        Ok(encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session_from_cookie;
    use crate::infrastructure::storage::InMemoryStorage;

    fn user() -> User {
        User {
            id: 1,
            email: "dana@example.kz".into(),
            first_name: "Dana".into(),
            last_name: "Serik".into(),
            role: "student".into(),
            university_id: None,
        }
    }

    fn store() -> (Arc<InMemoryStorage>, AuthStore) {
        let storage = Arc::new(InMemoryStorage::new());
        let store = AuthStore::new(storage.clone(), "client-auth-storage");
        (storage, store)
    }

    #[tokio::test]
    async fn login_writes_storage_and_mirror_together() {
        let (storage, store) = store();
        let mirror = store.set_auth(user(), "tok-1").await.unwrap();

        let stored = storage.get("client-auth-storage").await.unwrap().unwrap();
        assert_eq!(stored, mirror);
        assert!(session_from_cookie(Some(&mirror)).is_valid());
        assert!(store.is_authenticated().await);
    }

    #[tokio::test]
    async fn refresh_keeps_user_and_swaps_token() {
        let (_, store) = store();
        store.set_auth(user(), "old").await.unwrap();
        let mirror = store.set_access_token("new").await.unwrap();

        let session = session_from_cookie(Some(&mirror));
        assert_eq!(session.access_token(), Some("new"));
        assert_eq!(session.user.map(|u| u.id), Some(1));
    }

    #[tokio::test]
    async fn logout_clears_everything() {
        let (storage, store) = store();
        store.set_auth(user(), "tok").await.unwrap();
        store.set_refresh_token("r-1").await.unwrap();

        let mirror = store.logout().await.unwrap();
        assert!(!session_from_cookie(Some(&mirror)).is_valid());
        assert!(storage.is_empty());
        assert_eq!(store.refresh_token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn refresh_token_is_not_part_of_the_mirror() {
        let (_, store) = store();
        store.set_refresh_token("secret-refresh").await.unwrap();
        let mirror = store.set_auth(user(), "tok").await.unwrap();
        assert!(!mirror.contains("secret-refresh"));
        assert_eq!(store.refresh_token().await.unwrap().as_deref(), Some("secret-refresh"));
    }

    #[tokio::test]
    async fn hydrate_restores_or_discards() {
        let storage = Arc::new(InMemoryStorage::new());
        let first = AuthStore::new(storage.clone(), "auth-storage");
        first.set_auth(user(), "tok").await.unwrap();

        let second = AuthStore::new(storage.clone(), "auth-storage");
        assert!(second.hydrate().await.unwrap().is_valid());

        storage.set("auth-storage", "not-json").await.unwrap();
        let third = AuthStore::new(storage, "auth-storage");
        assert!(!third.hydrate().await.unwrap().is_valid());
    }
}
