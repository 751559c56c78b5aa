//! Driving port for dish mutations.

use async_trait::async_trait;

use crate::domain::{DishId, Error, NewDish};

/// Use-cases that change dish records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DishCommand: Send + Sync {
    /// Create a dish together with its flavours.
    async fn create(&self, dish: NewDish) -> Result<DishId, Error>;

    /// Delete a batch of dishes, refusing the whole batch when any dish is
    /// on sale or part of a set meal.
    async fn delete_batch(&self, ids: Vec<DishId>) -> Result<(), Error>;
}
