//! Dish administration backend.
//!
//! Layout follows a ports-and-adapters split: [`domain`] holds the dish
//! rules and error taxonomy, [`inbound`] exposes them over HTTP, and
//! [`outbound`] persists them in PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
