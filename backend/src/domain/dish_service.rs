//! Dish use-cases on top of the [`DishRepository`] port.
//!
//! Business rules live here; storage failures are passed through untouched
//! so the HTTP adapter can classify them.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::Page;
use tracing::debug;

use crate::domain::ports::{DishCommand, DishQuery, DishRepository};
use crate::domain::{BusinessError, DishId, DishPageQuery, DishStatus, DishSummary, Error, NewDish};

/// Message raised when a delete request names no dishes.
pub const NO_DISHES_SELECTED: &str = "no dishes selected";
/// Message raised when a dish on sale is selected for deletion.
pub const DISH_ON_SALE: &str = "dish is on sale and cannot be deleted";
/// Message raised when a dish belongs to a set meal.
pub const DISH_LINKED_TO_SETMEAL: &str = "dish is linked to a set meal and cannot be deleted";

/// Domain service implementing [`DishCommand`] and [`DishQuery`].
#[derive(Clone)]
pub struct DishService {
    repository: Arc<dyn DishRepository>,
    clock: Arc<dyn Clock>,
}

impl DishService {
    /// Build the service from its repository and clock.
    pub fn new(repository: Arc<dyn DishRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    async fn ensure_deletable(&self, ids: &[DishId]) -> Result<(), Error> {
        let statuses = self.repository.statuses(ids).await?;
        if statuses
            .iter()
            .any(|stored| stored.status == DishStatus::Enabled)
        {
            return Err(BusinessError::new(DISH_ON_SALE).into());
        }

        if self.repository.count_setmeal_links(ids).await? > 0 {
            return Err(BusinessError::new(DISH_LINKED_TO_SETMEAL).into());
        }
        Ok(())
    }
}

#[async_trait]
impl DishCommand for DishService {
    async fn create(&self, dish: NewDish) -> Result<DishId, Error> {
        let id = self.repository.insert(&dish, self.clock.utc()).await?;
        debug!(dish_id = %id, flavors = dish.flavors.len(), "dish created");
        Ok(id)
    }

    async fn delete_batch(&self, ids: Vec<DishId>) -> Result<(), Error> {
        let ids: Vec<DishId> = ids.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        if ids.is_empty() {
            return Err(BusinessError::new(NO_DISHES_SELECTED).into());
        }

        self.ensure_deletable(&ids).await?;
        let deleted = self.repository.delete(&ids).await?;
        debug!(requested = ids.len(), deleted, "dishes deleted");
        Ok(())
    }
}

#[async_trait]
impl DishQuery for DishService {
    async fn page(&self, query: DishPageQuery) -> Result<Page<DishSummary>, Error> {
        Ok(self.repository.page(&query).await?)
    }
}

#[cfg(test)]
#[path = "dish_service_tests.rs"]
mod tests;
