//! Dish administration HTTP handlers.
//!
//! ```text
//! POST   /admin/dish            {"name":"Mapo Tofu","categoryId":11,"price":3800,...}
//! GET    /admin/dish/page?page=1&pageSize=10&name=tofu
//! DELETE /admin/dish?ids=1,2,3
//! ```
//!
//! Handlers translate wire DTOs into domain values and hand any
//! [`Error`](crate::domain::Error) straight back to the framework, where the
//! normaliser in [`crate::inbound::http::error`] turns it into a response.

use actix_web::{delete, get, post, web};
use pagination::{Page, PageRequest};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    CategoryId, DishId, DishPageQuery, DishStatus, DishSummary, Error, NewDish, NewDishFlavor,
};
use crate::inbound::http::schemas::{DishPageEnvelopeSchema, EmptyEnvelopeSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, ResultEnvelope};

/// Flavour option attached to a dish.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DishFlavorBody {
    #[schema(example = "spiciness")]
    pub name: String,
    /// Serialised option list, stored verbatim.
    #[schema(example = r#"["mild","hot"]"#)]
    pub value: String,
}

/// Request body for `POST /admin/dish`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DishRequest {
    #[schema(example = "Mapo Tofu")]
    pub name: String,
    #[schema(example = 11)]
    pub category_id: i64,
    /// Price in minor currency units.
    #[schema(example = 3800)]
    pub price: i64,
    pub image: Option<String>,
    pub description: Option<String>,
    /// `1` on sale, `0` off the menu. Defaults to `0`.
    #[schema(example = 1)]
    pub status: Option<i32>,
    #[serde(default)]
    pub flavors: Vec<DishFlavorBody>,
}

impl TryFrom<DishRequest> for NewDish {
    type Error = Error;

    fn try_from(value: DishRequest) -> Result<Self, Self::Error> {
        let DishRequest {
            name,
            category_id,
            price,
            image,
            description,
            status,
            flavors,
        } = value;

        let status = status
            .map(DishStatus::try_from)
            .transpose()
            .map_err(|err| Error::business(err.to_string()))?
            .unwrap_or_default();

        Ok(Self {
            name,
            category_id: CategoryId::new(category_id),
            price,
            image,
            description,
            status,
            flavors: flavors
                .into_iter()
                .map(|flavor| NewDishFlavor {
                    name: flavor.name,
                    value: flavor.value,
                })
                .collect(),
        })
    }
}

/// Query parameters for `GET /admin/dish/page`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DishPageParams {
    /// One-based page number. Defaults to 1.
    pub page: Option<u32>,
    /// Records per page. Defaults to 10.
    pub page_size: Option<u32>,
    /// Case-insensitive name substring.
    pub name: Option<String>,
    pub category_id: Option<i64>,
    pub status: Option<i32>,
}

impl TryFrom<DishPageParams> for DishPageQuery {
    type Error = Error;

    fn try_from(value: DishPageParams) -> Result<Self, Self::Error> {
        let page = PageRequest::from_optional(value.page, value.page_size)
            .map_err(|err| Error::business(err.to_string()))?;
        let mut query = Self::new(page);
        if let Some(name) = value.name {
            query = query.with_name(name);
        }
        if let Some(category_id) = value.category_id {
            query = query.with_category(CategoryId::new(category_id));
        }
        if let Some(status) = value.status {
            let status =
                DishStatus::try_from(status).map_err(|err| Error::business(err.to_string()))?;
            query = query.with_status(status);
        }
        Ok(query)
    }
}

/// Query parameters for `DELETE /admin/dish`.
///
/// Only the comma-separated form `ids=1,2,3` is understood; repeating the
/// key (`ids=1&ids=2`) is rejected by the extractor.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteDishesParams {
    /// Comma-separated dish ids, e.g. `1,2,3`.
    #[serde(default, deserialize_with = "deserialize_id_list")]
    #[param(value_type = String, example = "1,2,3")]
    pub ids: Vec<i64>,
}

fn deserialize_id_list<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .map_err(|err| D::Error::custom(format!("invalid dish id `{part}`: {err}")))
        })
        .collect()
}

/// One row of the dish listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DishRecordResponse {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    pub category_name: Option<String>,
    pub price: i64,
    pub image: Option<String>,
    pub description: Option<String>,
    pub status: i32,
    #[schema(format = "date-time")]
    pub update_time: String,
}

impl From<DishSummary> for DishRecordResponse {
    fn from(value: DishSummary) -> Self {
        Self {
            id: value.id.get(),
            name: value.name,
            category_id: value.category_id.get(),
            category_name: value.category_name,
            price: value.price,
            image: value.image,
            description: value.description,
            status: value.status.code(),
            update_time: value.update_time.to_rfc3339(),
        }
    }
}

/// Page of dish rows returned by `GET /admin/dish/page`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DishPageResponse {
    pub total: u64,
    pub records: Vec<DishRecordResponse>,
}

impl From<Page<DishSummary>> for DishPageResponse {
    fn from(value: Page<DishSummary>) -> Self {
        let total = value.total();
        let records = value
            .into_records()
            .into_iter()
            .map(DishRecordResponse::from)
            .collect();
        Self { total, records }
    }
}

/// Create a dish with its flavours.
///
/// A duplicate name answers `{"ok":false,"message":"<name> already exists"}`.
#[utoipa::path(
    post,
    path = "/admin/dish",
    request_body = DishRequest,
    responses(
        (status = 200, description = "Dish created, or a failed envelope", body = EmptyEnvelopeSchema),
        (status = 400, description = "Malformed JSON body"),
        (status = 500, description = "Unexpected failure")
    ),
    tags = ["dishes"],
    operation_id = "createDish"
)]
#[post("/admin/dish")]
pub async fn create_dish(
    state: web::Data<HttpState>,
    payload: web::Json<DishRequest>,
) -> ApiResult<web::Json<ResultEnvelope<()>>> {
    let request = payload.into_inner();
    info!(
        name = %request.name,
        category_id = request.category_id,
        flavors = request.flavors.len(),
        "creating dish"
    );
    let dish = NewDish::try_from(request)?;
    state.dishes.create(dish).await?;
    Ok(web::Json(ResultEnvelope::empty()))
}

/// Page through dishes, newest first.
#[utoipa::path(
    get,
    path = "/admin/dish/page",
    params(DishPageParams),
    responses(
        (status = 200, description = "One page of dishes, or a failed envelope", body = DishPageEnvelopeSchema),
        (status = 400, description = "Malformed query string"),
        (status = 500, description = "Unexpected failure")
    ),
    tags = ["dishes"],
    operation_id = "pageDishes"
)]
#[get("/admin/dish/page")]
pub async fn page_dishes(
    state: web::Data<HttpState>,
    params: web::Query<DishPageParams>,
) -> ApiResult<web::Json<ResultEnvelope<DishPageResponse>>> {
    let params = params.into_inner();
    info!(
        page = ?params.page,
        page_size = ?params.page_size,
        name = ?params.name,
        category_id = ?params.category_id,
        status = ?params.status,
        "paging dishes"
    );
    let query = DishPageQuery::try_from(params)?;
    let page = state.dishes_query.page(query).await?;
    Ok(web::Json(ResultEnvelope::success(DishPageResponse::from(
        page,
    ))))
}

/// Delete a batch of dishes.
///
/// The whole batch is refused when any dish is on sale or belongs to a set
/// meal.
#[utoipa::path(
    delete,
    path = "/admin/dish",
    params(DeleteDishesParams),
    responses(
        (status = 200, description = "Dishes deleted, or a failed envelope", body = EmptyEnvelopeSchema),
        (status = 400, description = "Malformed id list"),
        (status = 500, description = "Unexpected failure")
    ),
    tags = ["dishes"],
    operation_id = "deleteDishes"
)]
#[delete("/admin/dish")]
pub async fn delete_dishes(
    state: web::Data<HttpState>,
    params: web::Query<DeleteDishesParams>,
) -> ApiResult<web::Json<ResultEnvelope<()>>> {
    let DeleteDishesParams { ids } = params.into_inner();
    info!(ids = ?ids, "deleting dishes");
    let ids = ids.into_iter().map(DishId::new).collect();
    state.dishes.delete_batch(ids).await?;
    Ok(web::Json(ResultEnvelope::empty()))
}

#[cfg(test)]
#[path = "dishes_tests.rs"]
mod tests;
