//! Uniform response body returned by every dish endpoint.
//!
//! ```text
//! {"ok":true,"data":{...}}
//! {"ok":false,"message":"Mapo Tofu already exists"}
//! ```

use serde::{Deserialize, Serialize};

/// Success/error wrapper serialised as the response body.
///
/// ## Invariants
/// - `ok == true` implies `message` is absent.
/// - `ok == false` implies `data` is absent and `message` is present.
///
/// Both hold by construction and are re-checked when deserialising.
///
/// # Examples
/// ```
/// use sky_backend::inbound::http::ResultEnvelope;
///
/// let success = ResultEnvelope::success(3_u32);
/// assert!(success.is_ok());
/// assert_eq!(success.data(), Some(&3));
///
/// let failure = ResultEnvelope::<u32>::error("Mapo Tofu already exists");
/// assert_eq!(failure.message(), Some("Mapo Tofu already exists"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "ResultEnvelopeDto<T>",
    bound(deserialize = "T: Deserialize<'de>")
)]
pub struct ResultEnvelope<T> {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Raised when a deserialised envelope breaks its invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ResultEnvelopeValidationError {
    /// `ok` is true but a message is present.
    #[error("successful envelopes must not carry a message")]
    MessageOnSuccess,
    /// `ok` is false but data is present.
    #[error("failed envelopes must not carry data")]
    DataOnFailure,
    /// `ok` is false and the message is missing.
    #[error("failed envelopes must carry a message")]
    MissingMessage,
}

impl<T> ResultEnvelope<T> {
    /// Successful outcome with a payload.
    pub fn success(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            message: None,
        }
    }

    /// Failed outcome with a client-facing message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Whether the request succeeded.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Payload of a successful outcome, if any.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Client-facing message of a failed outcome.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl ResultEnvelope<()> {
    /// Successful outcome without a payload.
    pub fn empty() -> Self {
        Self {
            ok: true,
            data: None,
            message: None,
        }
    }
}

#[derive(Deserialize)]
struct ResultEnvelopeDto<T> {
    ok: bool,
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

impl<T> TryFrom<ResultEnvelopeDto<T>> for ResultEnvelope<T> {
    type Error = ResultEnvelopeValidationError;

    fn try_from(value: ResultEnvelopeDto<T>) -> Result<Self, Self::Error> {
        let ResultEnvelopeDto { ok, data, message } = value;
        match (ok, data, message) {
            (true, _, Some(_)) => Err(ResultEnvelopeValidationError::MessageOnSuccess),
            (true, data, None) => Ok(Self {
                ok: true,
                data,
                message: None,
            }),
            (false, Some(_), _) => Err(ResultEnvelopeValidationError::DataOnFailure),
            (false, None, None) => Err(ResultEnvelopeValidationError::MissingMessage),
            (false, None, Some(message)) => Ok(Self::error(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    fn success_omits_message() {
        let value = serde_json::to_value(ResultEnvelope::success(json!({"total": 0})))
            .expect("serialise envelope");
        assert_eq!(value, json!({"ok": true, "data": {"total": 0}}));
    }

    #[rstest]
    fn empty_success_is_just_the_flag() {
        let value = serde_json::to_value(ResultEnvelope::empty()).expect("serialise envelope");
        assert_eq!(value, json!({"ok": true}));
    }

    #[rstest]
    fn error_omits_data() {
        let value = serde_json::to_value(ResultEnvelope::<Value>::error("nope"))
            .expect("serialise envelope");
        assert_eq!(value, json!({"ok": false, "message": "nope"}));
    }

    #[rstest]
    #[case(json!({"ok": true, "message": "hi"}), ResultEnvelopeValidationError::MessageOnSuccess)]
    #[case(json!({"ok": false, "data": 1, "message": "x"}), ResultEnvelopeValidationError::DataOnFailure)]
    #[case(json!({"ok": false}), ResultEnvelopeValidationError::MissingMessage)]
    fn deserialising_rejects_broken_invariants(
        #[case] body: Value,
        #[case] expected: ResultEnvelopeValidationError,
    ) {
        let err = serde_json::from_value::<ResultEnvelope<Value>>(body)
            .expect_err("invariant violation is rejected");
        assert_eq!(err.to_string(), expected.to_string());
    }

    #[rstest]
    fn deserialising_accepts_well_formed_bodies() {
        let envelope: ResultEnvelope<u32> =
            serde_json::from_value(json!({"ok": false, "message": "gone"})).expect("valid body");
        assert_eq!(envelope, ResultEnvelope::error("gone"));
    }
}
