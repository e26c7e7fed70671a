//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the REST API. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{config::Config, util::lock::KeyedLocks};

/// Application state containing shared resources and dependencies.
///
/// All fields use cheap-to-clone types:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `Arc<Config>` is a reference-counted pointer
/// - `KeyedLocks` clones share the same lock registry
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Application configuration, including the clan registry and API token.
    pub config: Arc<Config>,

    /// Per-user lock registry serializing AFK declarations.
    pub afk_locks: KeyedLocks,

    /// Per-clan lock registry serializing membership reconciliation.
    pub clan_locks: KeyedLocks,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `config` - Application configuration
    /// - `afk_locks` - Per-user lock registry shared with the sweeps
    /// - `clan_locks` - Per-clan lock registry shared with the roster sync
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(
        db: DatabaseConnection,
        config: Arc<Config>,
        afk_locks: KeyedLocks,
        clan_locks: KeyedLocks,
    ) -> Self {
        Self {
            db,
            config,
            afk_locks,
            clan_locks,
        }
    }
}
