//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the dish administration and health paths together
//! with the request, page, and envelope schemas. The document is served by
//! Swagger UI in debug builds and exported by `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::dishes::{
    DishFlavorBody, DishPageResponse, DishRecordResponse, DishRequest,
};
use crate::inbound::http::schemas::{DishPageEnvelopeSchema, EmptyEnvelopeSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sky take-out admin API",
        description = "Dish administration endpoints and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::dishes::create_dish,
        crate::inbound::http::dishes::page_dishes,
        crate::inbound::http::dishes::delete_dishes,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        DishRequest,
        DishFlavorBody,
        DishRecordResponse,
        DishPageResponse,
        EmptyEnvelopeSchema,
        DishPageEnvelopeSchema
    )),
    tags(
        (name = "dishes", description = "Dish administration"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/admin/dish")]
    #[case("/admin/dish/page")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn document_lists_every_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }

    #[rstest]
    fn dish_path_documents_create_and_delete() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/admin/dish").expect("dish path");
        assert!(item.post.is_some());
        assert!(item.delete.is_some());
    }

    #[rstest]
    #[case("DishRequest", "categoryId")]
    #[case("DishRecordResponse", "categoryName")]
    #[case("DishRecordResponse", "updateTime")]
    #[case("DishPageResponse", "records")]
    #[case("EmptyEnvelope", "ok")]
    #[case("DishPageEnvelope", "data")]
    fn schemas_use_wire_field_names(#[case] schema: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(schema).expect("registered schema");
        assert_object_schema_has_field(schema, field);
    }
}
