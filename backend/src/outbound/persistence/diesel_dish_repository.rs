//! PostgreSQL-backed `DishRepository` implementation using Diesel ORM.
//!
//! Writes are issued as individual statements on one pooled connection.
//! Listing runs a count and a page query over the same filters, then resolves
//! category names with a single lookup keyed by the category ids on the page.

use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::Page;
use tracing::{debug, warn};

use crate::domain::ports::{DishRepository, StoredDishStatus};
use crate::domain::{
    CategoryId, DishId, DishPageQuery, DishStatus, DishSummary, NewDish, PersistenceError,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{DishRow, NewDishFlavorRow, NewDishRow};
use super::pool::DbPool;
use super::schema::{category, dish, dish_flavor, setmeal_dish};

/// Diesel-backed implementation of the [`DishRepository`] port.
#[derive(Clone)]
pub struct DieselDishRepository {
    pool: DbPool,
}

impl DieselDishRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Escape `LIKE` wildcards so user input only ever matches literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn raw_ids(ids: &[DishId]) -> Vec<i64> {
    ids.iter().map(|id| id.get()).collect()
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

fn to_u64(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

fn decode_status(id: i64, code: i32) -> DishStatus {
    DishStatus::try_from(code).unwrap_or_else(|err| {
        warn!(dish_id = id, %err, "unrecognised dish status, treating as disabled");
        DishStatus::Disabled
    })
}

fn filtered(query: &DishPageQuery) -> dish::BoxedQuery<'static, Pg> {
    let mut statement = dish::table.into_boxed();
    if let Some(name) = query.name() {
        statement = statement.filter(dish::name.ilike(format!("%{}%", escape_like(name))));
    }
    if let Some(category_id) = query.category_id() {
        statement = statement.filter(dish::category_id.eq(category_id.get()));
    }
    if let Some(status) = query.status() {
        statement = statement.filter(dish::status.eq(status.code()));
    }
    statement
}

fn row_to_summary(row: DishRow, category_names: &HashMap<i64, String>) -> DishSummary {
    DishSummary {
        id: DishId::new(row.id),
        category_name: category_names.get(&row.category_id).cloned(),
        status: decode_status(row.id, row.status),
        name: row.name,
        category_id: CategoryId::new(row.category_id),
        price: row.price,
        image: row.image,
        description: row.description,
        update_time: row.update_time,
    }
}

#[async_trait]
impl DishRepository for DieselDishRepository {
    async fn insert(&self, new_dish: &NewDish, now: DateTime<Utc>) -> Result<DishId, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewDishRow {
            name: &new_dish.name,
            category_id: new_dish.category_id.get(),
            price: new_dish.price,
            image: new_dish.image.as_deref(),
            description: new_dish.description.as_deref(),
            status: new_dish.status.code(),
            create_time: now,
            update_time: now,
        };
        let id: i64 = diesel::insert_into(dish::table)
            .values(&row)
            .returning(dish::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if !new_dish.flavors.is_empty() {
            let flavors: Vec<NewDishFlavorRow<'_>> = new_dish
                .flavors
                .iter()
                .map(|flavor| NewDishFlavorRow {
                    dish_id: id,
                    name: &flavor.name,
                    value: &flavor.value,
                })
                .collect();
            diesel::insert_into(dish_flavor::table)
                .values(&flavors)
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;
        }

        debug!(dish_id = id, flavors = new_dish.flavors.len(), "dish row inserted");
        Ok(DishId::new(id))
    }

    async fn page(&self, query: &DishPageQuery) -> Result<Page<DishSummary>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = filtered(query)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if total == 0 {
            return Ok(Page::empty());
        }

        let rows: Vec<DishRow> = filtered(query)
            .select(DishRow::as_select())
            .order((dish::create_time.desc(), dish::id.desc()))
            .limit(to_i64(query.page().limit()))
            .offset(to_i64(query.page().offset()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let category_ids: Vec<i64> = rows
            .iter()
            .map(|row| row.category_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let category_names: HashMap<i64, String> = if category_ids.is_empty() {
            HashMap::new()
        } else {
            category::table
                .filter(category::id.eq_any(category_ids))
                .select((category::id, category::name))
                .load::<(i64, String)>(&mut conn)
                .await
                .map_err(map_diesel_error)?
                .into_iter()
                .collect()
        };

        let records = rows
            .into_iter()
            .map(|row| row_to_summary(row, &category_names))
            .collect();
        Ok(Page::new(to_u64(total), records))
    }

    async fn statuses(&self, ids: &[DishId]) -> Result<Vec<StoredDishStatus>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(i64, i32)> = dish::table
            .filter(dish::id.eq_any(raw_ids(ids)))
            .select((dish::id, dish::status))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|(id, code)| StoredDishStatus {
                id: DishId::new(id),
                status: decode_status(id, code),
            })
            .collect())
    }

    async fn count_setmeal_links(&self, ids: &[DishId]) -> Result<u64, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let links: i64 = setmeal_dish::table
            .filter(setmeal_dish::dish_id.eq_any(raw_ids(ids)))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(to_u64(links))
    }

    async fn delete(&self, ids: &[DishId]) -> Result<u64, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let flavors = diesel::delete(dish_flavor::table.filter(dish_flavor::dish_id.eq_any(raw_ids(ids))))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let dishes = diesel::delete(dish::table.filter(dish::id.eq_any(raw_ids(ids))))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        debug!(dishes, flavors, "dish rows deleted");
        Ok(u64::try_from(dishes).unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[rstest]
    #[case("tofu", "tofu")]
    #[case("100%", "100\\%")]
    #[case("a_b", "a\\_b")]
    #[case("back\\slash", "back\\\\slash")]
    fn like_wildcards_are_escaped(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_like(input), expected);
    }

    #[rstest]
    #[case(0, DishStatus::Disabled)]
    #[case(1, DishStatus::Enabled)]
    #[case(5, DishStatus::Disabled)]
    fn stored_status_codes_decode(#[case] code: i32, #[case] expected: DishStatus) {
        assert_eq!(decode_status(1, code), expected);
    }

    #[rstest]
    fn rows_pick_up_their_category_name() {
        let update_time = Utc
            .with_ymd_and_hms(2026, 3, 14, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        let row = DishRow {
            id: 3,
            name: "Mapo Tofu".to_owned(),
            category_id: 11,
            price: 3_800,
            image: None,
            description: None,
            status: 1,
            update_time,
        };
        let names = HashMap::from([(11, "Sichuan".to_owned())]);

        let summary = row_to_summary(row, &names);

        assert_eq!(summary.id, DishId::new(3));
        assert_eq!(summary.category_name.as_deref(), Some("Sichuan"));
        assert_eq!(summary.status, DishStatus::Enabled);
        assert_eq!(summary.update_time, update_time);
    }

    #[rstest]
    fn rows_without_a_category_keep_a_gap() {
        let row = DishRow {
            id: 4,
            name: "Orphan".to_owned(),
            category_id: 99,
            price: 0,
            image: None,
            description: None,
            status: 0,
            update_time: Utc::now(),
        };
        assert!(row_to_summary(row, &HashMap::new()).category_name.is_none());
    }

    #[rstest]
    fn unsigned_conversions_saturate() {
        assert_eq!(to_i64(u64::MAX), i64::MAX);
        assert_eq!(to_u64(-1), 0);
    }
}
