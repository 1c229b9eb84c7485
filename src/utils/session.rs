use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::DomainError;
use crate::models::users::UserId;

/// Maps bearer tokens to user ids. The web layer only ever asks whether a
/// token resolves; issuing and revoking tokens is left to whatever fronts
/// the service.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn resolve(&self, token: &str) -> Result<Option<UserId>, DomainError>;
    async fn save(&self, token: &str, uid: &UserId) -> Result<(), DomainError>;
    async fn delete(&self, token: &str) -> Result<(), DomainError>;
}

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, UserId>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn resolve(
        &self,
        token: &str,
    ) -> Result<Option<UserId>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(token).cloned())
    }

    async fn save(
        &self,
        token: &str,
        uid: &UserId,
    ) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        let _ = sessions.insert(token.to_owned(), uid.clone());
        Ok(())
    }

    async fn delete(&self, token: &str) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        let _ = sessions.remove(token);
        Ok(())
    }
}
