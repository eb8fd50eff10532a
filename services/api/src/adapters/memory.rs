//! services/api/src/adapters/memory.rs
//!
//! In-memory implementations of the credential and session ports. Nothing
//! here survives a process restart.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use lesson_plan_core::{
    ports::{CredentialStore, PortError, PortResult, SessionStore},
    AuthSession, Credential,
};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

//=========================================================================================
// Credentials
//=========================================================================================

/// Username to plaintext password map guarded by a lock.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    users: RwLock<HashMap<String, String>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store holding `seed`. Later duplicates of a username are ignored.
    pub fn with_users(seed: impl IntoIterator<Item = Credential>) -> Self {
        let mut users = HashMap::new();
        for credential in seed {
            users.entry(credential.username).or_insert(credential.password);
        }
        Self {
            users: RwLock::new(users),
        }
    }

    #[cfg(test)]
    async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn verify(&self, username: &str, password: &str) -> bool {
        self.users
            .read()
            .await
            .get(username)
            .is_some_and(|stored| stored == password)
    }

    async fn register(&self, username: &str, password: &str) -> PortResult<()> {
        if username.trim().is_empty() || password.trim().is_empty() {
            return Err(PortError::InvalidInput(
                "username and password are required".to_string(),
            ));
        }

        let mut users = self.users.write().await;
        if users.contains_key(username) {
            return Err(PortError::AlreadyExists(username.to_string()));
        }
        users.insert(username.to_string(), password.to_string());
        Ok(())
    }
}

//=========================================================================================
// Sessions
//=========================================================================================

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, AuthSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, username: &str, ttl: Duration) -> PortResult<AuthSession> {
        let expires_at = Utc::now()
            .checked_add_signed(ttl)
            .ok_or_else(|| {
                PortError::InvalidInput(format!("session lifetime {} is out of range", ttl))
            })?;
        let session = AuthSession {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            expires_at,
        };
        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session.clone());
        Ok(session)
    }

    async fn get(&self, session_id: &str) -> PortResult<Option<AuthSession>> {
        let session = self.sessions.read().await.get(session_id).cloned();
        match session {
            Some(s) if s.is_expired(Utc::now()) => {
                self.sessions.write().await.remove(session_id);
                Ok(None)
            }
            other => Ok(other),
        }
    }

    async fn delete(&self, session_id: &str) -> PortResult<()> {
        self.sessions.write().await.remove(session_id);
        Ok(())
    }
}
