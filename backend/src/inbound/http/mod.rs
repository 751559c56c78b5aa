//! HTTP inbound adapter exposing the dish administration endpoints.

pub mod dishes;
pub mod envelope;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;

pub use envelope::{ResultEnvelope, ResultEnvelopeValidationError};
pub use error::{ApiResult, ErrorNormalizer};
