//! Domain models and operation-specific parameter types.
//!
//! This module contains the domain models used by the service and data layers,
//! parameter structs for each operation, and the serde DTOs returned by the
//! REST API. Entity models from the `entity` crate are converted to domain
//! models at the repository boundary (`from_entity`), and domain models are
//! converted to DTOs at the controller boundary (`into_dto`).

pub mod afk;
pub mod api;
pub mod membership;
pub mod user;
