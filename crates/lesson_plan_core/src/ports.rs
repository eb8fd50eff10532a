//! crates/lesson_plan_core/src/ports.rs
//!
//! Defines the service contracts (traits) the web layer depends on.
//! Handlers only see these traits, so the in-memory adapters can be swapped
//! for test doubles or another backend without touching request handling.

use async_trait::async_trait;
use chrono::Duration;
use crate::domain::AuthSession;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// True iff `username` exists and its stored password equals `password`.
    async fn verify(&self, username: &str, password: &str) -> bool;

    /// Adds a new user. Blank fields are `InvalidInput`, a taken username
    /// is `AlreadyExists` and leaves the stored password untouched.
    async fn register(&self, username: &str, password: &str) -> PortResult<()>;
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self, username: &str, ttl: Duration) -> PortResult<AuthSession>;

    /// Returns the live session with this id. Expired sessions are dropped.
    async fn get(&self, session_id: &str) -> PortResult<Option<AuthSession>>;

    async fn delete(&self, session_id: &str) -> PortResult<()>;
}
