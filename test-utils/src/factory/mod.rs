//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests. Factories automatically handle dependencies and foreign
//! key relationships, making tests more concise and maintainable.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let user = factory::user::create_user(&db).await?;
//!
//!     // Create with all dependencies
//!     let (user, window) = factory::helpers::create_afk_with_user(&db).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Customization
//!
//! Use the factory builders for custom values:
//!
//! ```rust,ignore
//! let window = factory::afk_window::AfkWindowFactory::new(&db)
//!     .user_id(&user.discord_id)
//!     .start_at(start)
//!     .end_at(end)
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Create user entities
//! - `afk_window` - Create AFK window entities
//! - `clan_membership` - Create clan membership interval entities
//! - `helpers` - Convenience methods for creating entities with dependencies

pub mod afk_window;
pub mod clan_membership;
pub mod helpers;
pub mod user;

// Re-export commonly used factory functions for concise usage
pub use afk_window::create_afk_window;
pub use clan_membership::create_membership;
pub use user::{create_user, create_user_with_id};
