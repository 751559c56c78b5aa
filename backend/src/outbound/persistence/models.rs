//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{dish, dish_flavor};

/// Row struct for reading from the dish table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = dish)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DishRow {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    pub price: i64,
    pub image: Option<String>,
    pub description: Option<String>,
    pub status: i32,
    pub update_time: DateTime<Utc>,
}

/// Insertable struct for creating dish records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = dish)]
pub(crate) struct NewDishRow<'a> {
    pub name: &'a str,
    pub category_id: i64,
    pub price: i64,
    pub image: Option<&'a str>,
    pub description: Option<&'a str>,
    pub status: i32,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

/// Insertable struct for flavour rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = dish_flavor)]
pub(crate) struct NewDishFlavorRow<'a> {
    pub dish_id: i64,
    pub name: &'a str,
    pub value: &'a str,
}
