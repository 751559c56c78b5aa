//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports ([`DishRepository`]) describe what the domain needs from
//! storage; driving ports ([`DishCommand`], [`DishQuery`]) are the use-cases
//! inbound adapters call. Storage failures cross the boundary as
//! [`PersistenceError`](crate::domain::PersistenceError) values so adapters
//! never leak driver types into the domain.

mod dish_command;
mod dish_query;
mod dish_repository;

#[cfg(test)]
pub use dish_command::MockDishCommand;
pub use dish_command::DishCommand;
#[cfg(test)]
pub use dish_query::MockDishQuery;
pub use dish_query::DishQuery;
#[cfg(test)]
pub use dish_repository::MockDishRepository;
pub use dish_repository::{DishRepository, StoredDishStatus};
