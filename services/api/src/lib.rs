//! services/api/src/lib.rs
//!
//! Web service for the lesson planner: configuration, in-memory adapters,
//! and the axum application.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;
