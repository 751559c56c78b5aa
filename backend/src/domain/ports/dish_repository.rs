//! Port for dish persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::Page;

use crate::domain::{DishId, DishPageQuery, DishStatus, DishSummary, NewDish, PersistenceError};

/// Current sale status of a stored dish, used by the deletion guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredDishStatus {
    pub id: DishId,
    pub status: DishStatus,
}

/// Storage operations backing the dish use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DishRepository: Send + Sync {
    /// Insert the dish and its flavours, returning the generated id.
    async fn insert(&self, dish: &NewDish, now: DateTime<Utc>) -> Result<DishId, PersistenceError>;

    /// Count and load one page of dishes matching the query filters, newest
    /// first.
    async fn page(&self, query: &DishPageQuery) -> Result<Page<DishSummary>, PersistenceError>;

    /// Load the status of each listed dish that exists.
    async fn statuses(&self, ids: &[DishId]) -> Result<Vec<StoredDishStatus>, PersistenceError>;

    /// Count set-meal entries referencing any of the listed dishes.
    async fn count_setmeal_links(&self, ids: &[DishId]) -> Result<u64, PersistenceError>;

    /// Delete the listed dishes and their flavours, returning the number of
    /// dish rows removed.
    async fn delete(&self, ids: &[DishId]) -> Result<u64, PersistenceError>;
}
