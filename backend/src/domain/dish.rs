//! Dish aggregate and the value types its endpoints exchange.
//!
//! Dishes belong to a category, carry a price in minor currency units, and
//! may list flavour options. Categories and set meals are owned elsewhere;
//! this module only refers to them by id.

use std::fmt;

use chrono::{DateTime, Utc};
use pagination::PageRequest;
use thiserror::Error;

/// Database identifier of a dish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DishId(i64);

impl DishId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for DishId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier of a dish category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CategoryId(i64);

impl CategoryId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

/// Raised when a stored status code is neither `0` nor `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown dish status code {0}")]
pub struct UnknownDishStatus(pub i32);

/// Whether a dish can currently be ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DishStatus {
    /// Off the menu. Stored as `0`.
    #[default]
    Disabled,
    /// On sale. Stored as `1`.
    Enabled,
}

impl DishStatus {
    /// Storage and wire representation.
    pub const fn code(self) -> i32 {
        match self {
            Self::Disabled => 0,
            Self::Enabled => 1,
        }
    }
}

impl TryFrom<i32> for DishStatus {
    type Error = UnknownDishStatus;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Disabled),
            1 => Ok(Self::Enabled),
            other => Err(UnknownDishStatus(other)),
        }
    }
}

impl From<DishStatus> for i32 {
    fn from(value: DishStatus) -> Self {
        value.code()
    }
}

/// A flavour option offered with a dish, e.g. name `spiciness` with value
/// `["mild","hot"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDishFlavor {
    pub name: String,
    pub value: String,
}

/// Dish as submitted for creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDish {
    pub name: String,
    pub category_id: CategoryId,
    /// Price in minor currency units.
    pub price: i64,
    pub image: Option<String>,
    pub description: Option<String>,
    pub status: DishStatus,
    pub flavors: Vec<NewDishFlavor>,
}

/// Listing projection of a stored dish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishSummary {
    pub id: DishId,
    pub name: String,
    pub category_id: CategoryId,
    /// Resolved category name; absent when the category row is gone.
    pub category_name: Option<String>,
    pub price: i64,
    pub image: Option<String>,
    pub description: Option<String>,
    pub status: DishStatus,
    pub update_time: DateTime<Utc>,
}

/// Filters and paging for the dish listing.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
/// use sky_backend::domain::{DishPageQuery, DishStatus};
///
/// let query = DishPageQuery::new(PageRequest::default())
///     .with_name("tofu")
///     .with_status(DishStatus::Enabled);
/// assert_eq!(query.name(), Some("tofu"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishPageQuery {
    page: PageRequest,
    name: Option<String>,
    category_id: Option<CategoryId>,
    status: Option<DishStatus>,
}

impl DishPageQuery {
    /// Unfiltered query for the given page.
    pub fn new(page: PageRequest) -> Self {
        Self {
            page,
            name: None,
            category_id: None,
            status: None,
        }
    }

    /// Restrict to names containing `name`. Blank input clears the filter.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        self.name = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self
    }

    /// Restrict to one category.
    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Restrict to one status.
    pub fn with_status(mut self, status: DishStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn page(&self) -> PageRequest {
        self.page
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn category_id(&self) -> Option<CategoryId> {
        self.category_id
    }

    pub fn status(&self) -> Option<DishStatus> {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, DishStatus::Disabled)]
    #[case(1, DishStatus::Enabled)]
    fn status_codes_round_trip(#[case] code: i32, #[case] status: DishStatus) {
        assert_eq!(DishStatus::try_from(code), Ok(status));
        assert_eq!(i32::from(status), code);
    }

    #[rstest]
    fn unknown_status_codes_are_rejected() {
        assert_eq!(DishStatus::try_from(7), Err(UnknownDishStatus(7)));
    }

    #[rstest]
    #[case("  ", None)]
    #[case("", None)]
    #[case("  tofu ", Some("tofu"))]
    fn name_filter_is_trimmed(#[case] input: &str, #[case] expected: Option<&str>) {
        let query = DishPageQuery::new(PageRequest::default()).with_name(input);
        assert_eq!(query.name(), expected);
    }
}
