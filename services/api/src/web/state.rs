//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::adapters::{InMemoryCredentialStore, InMemorySessionStore};
use crate::config::Config;
use chrono::Duration;
use lesson_plan_core::{
    ports::{CredentialStore, SessionStore},
    PlanGenerator,
};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<dyn CredentialStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub generator: PlanGenerator,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wires the in-memory adapters, seeding the credential store from `config`.
    pub fn in_memory(config: Config) -> Self {
        Self {
            credentials: Arc::new(InMemoryCredentialStore::with_users(
                config.seed_users.iter().cloned(),
            )),
            sessions: Arc::new(InMemorySessionStore::new()),
            generator: PlanGenerator::new(config.school_name.clone()),
            config: Arc::new(config),
        }
    }

    /// `None` when the configured hours do not fit in a `Duration`.
    pub fn session_ttl(&self) -> Option<Duration> {
        Duration::try_hours(self.config.session_ttl_hours)
    }
}
