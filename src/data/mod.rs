//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to maintain separation between the data layer and business logic layer.
//! All database queries, inserts, updates, and deletes are performed through these
//! repositories.
//!
//! Repositories are generic over `sea_orm::ConnectionTrait` so the service layer can run
//! them against either the shared connection pool or a transaction, keeping every
//! multi-row mutation atomic per call.

pub mod afk_window;
pub mod membership;
pub mod user;
