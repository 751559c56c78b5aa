//! OpenAPI schema definitions for response envelopes.
//!
//! [`ResultEnvelope`](crate::inbound::http::ResultEnvelope) is generic and
//! enforces its invariants through private fields, so the documentation uses
//! concrete stand-ins that mirror its wire shape for each payload type.

use utoipa::ToSchema;

use crate::inbound::http::dishes::DishPageResponse;

/// Envelope without a payload, as returned by create and delete.
///
/// Successful calls answer `{"ok":true}`; rejected ones answer
/// `{"ok":false,"message":"..."}`.
#[derive(ToSchema)]
#[schema(as = EmptyEnvelope)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EmptyEnvelopeSchema {
    /// Whether the request succeeded.
    #[schema(example = false)]
    ok: bool,
    /// Client-facing failure message. Absent on success.
    #[schema(example = "Mapo Tofu already exists")]
    message: Option<String>,
}

/// Envelope carrying one page of dishes.
#[derive(ToSchema)]
#[schema(as = DishPageEnvelope)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DishPageEnvelopeSchema {
    /// Whether the request succeeded.
    #[schema(example = true)]
    ok: bool,
    /// Page of dishes. Absent on failure.
    data: Option<DishPageResponse>,
    /// Client-facing failure message. Absent on success.
    message: Option<String>,
}
