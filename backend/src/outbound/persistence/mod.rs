//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module, and every driver failure leaves as a
//! [`PersistenceError`](crate::domain::PersistenceError).
//!
//! # Example
//!
//! ```no_run
//! use sky_backend::outbound::persistence::{DbPool, DieselDishRepository, PoolConfig};
//!
//! # async fn build() -> Result<(), sky_backend::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/sky_take_out")).await?;
//! let repository = DieselDishRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_dish_repository;
mod diesel_error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_dish_repository::DieselDishRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
