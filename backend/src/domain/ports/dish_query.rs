//! Driving port for dish reads.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{DishPageQuery, DishSummary, Error};

/// Read-side use-cases for dishes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DishQuery: Send + Sync {
    /// Return one page of dishes matching the query.
    async fn page(&self, query: DishPageQuery) -> Result<Page<DishSummary>, Error>;
}
