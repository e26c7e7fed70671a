//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Implementing core business rules and validation
//! - **Orchestration**: Coordinating multiple repository calls
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//! - **Transaction Management**: Running every multi-row mutation inside one transaction
//! - **Write Serialization**: Taking the per-user / per-clan lock around critical sections

pub mod afk;
pub mod membership;

#[cfg(test)]
mod test;
