//! Tests for the error normaliser.

use std::io;
use std::sync::{Arc, Mutex};

use super::*;
use crate::domain::{BusinessError, SqlState};
use actix_web::body::to_bytes;
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use tracing_subscriber::fmt::MakeWriter;

fn unique_violation(detail: Option<&str>) -> Error {
    let error = PersistenceError::new(
        SqlState::UNIQUE_VIOLATION,
        "duplicate key value violates unique constraint",
    );
    match detail {
        Some(detail) => error.with_detail(detail).into(),
        None => error.into(),
    }
}

#[fixture]
fn foreign_key_violation() -> Error {
    PersistenceError::new(
        SqlState::FOREIGN_KEY_VIOLATION,
        "insert or update on table \"dish\" violates foreign key constraint",
    )
    .with_detail("Key (category_id)=(99) is not present in table \"category\".")
    .into()
}

fn handled_message(classification: Classification) -> String {
    match classification {
        Classification::Handled(envelope) => {
            assert!(!envelope.is_ok());
            assert!(envelope.data().is_none());
            envelope.message().expect("failed envelope has a message").to_owned()
        }
        Classification::Reraise(error) => panic!("expected a handled error, got {error:?}"),
    }
}

#[rstest]
#[case("dish is on sale and cannot be deleted")]
#[case("no dishes selected")]
#[case("page must be at least 1")]
fn business_errors_pass_their_message_through(#[case] message: &str) {
    let error = Error::Business(BusinessError::new(message));
    assert_eq!(handled_message(ErrorNormalizer.classify(error)), message);
}

#[rstest]
fn unique_violation_reports_the_value_not_the_column() {
    let error = unique_violation(Some("Key (username)=(zhangsan) already exists."));

    let message = handled_message(ErrorNormalizer.classify(error));

    assert_eq!(message, "zhangsan already exists");
    assert!(!message.contains("username"));
}

#[rstest]
#[case(None)]
#[case(Some(""))]
#[case(Some("duplicate key"))]
#[case(Some("Key username=zhangsan already exists."))]
#[case(Some("Key (username)"))]
#[case(Some("Key (name)=(line one\nline two) already exists."))]
fn unique_violation_without_usable_detail_falls_back(#[case] detail: Option<&str>) {
    let message = handled_message(ErrorNormalizer.classify(unique_violation(detail)));
    assert_eq!(message, GENERIC_ALREADY_EXISTS);
    assert_eq!(message, "record already exists");
}

#[rstest]
fn other_persistence_errors_are_reraised_unchanged(foreign_key_violation: Error) {
    let original = foreign_key_violation.clone();

    let outcome = ErrorNormalizer.classify(foreign_key_violation);

    assert_eq!(outcome, Classification::Reraise(original));
}

#[rstest]
#[case(SqlState::CONNECTION_REFUSED)]
#[case(SqlState::CONNECTION_FAILURE)]
#[case(SqlState::INTERNAL_ERROR)]
#[case(SqlState::new("42P01"))]
fn unknown_codes_are_never_translated(#[case] state: SqlState) {
    let error: Error = PersistenceError::new(state, "boom")
        .with_detail("Key (name)=(x) already exists.")
        .into();

    assert!(matches!(
        ErrorNormalizer.classify(error),
        Classification::Reraise(Error::Persistence(_))
    ));
}

#[rstest]
fn unrecognised_errors_fall_through() {
    let error = Error::unrecognized("socket closed");
    assert_eq!(
        ErrorNormalizer.classify(error.clone()),
        Classification::Reraise(error)
    );
}

#[rstest]
#[case(Error::business("nope"))]
#[case(unique_violation(Some("Key (name)=(Mapo Tofu) already exists.")))]
#[case(unique_violation(None))]
#[case(Error::unrecognized("x"))]
fn classification_is_idempotent(#[case] error: Error) {
    let first = ErrorNormalizer.classify(error.clone());
    let second = ErrorNormalizer.classify(error);
    assert_eq!(first, second);
}

#[rstest]
fn extraction_takes_the_first_well_formed_pair() {
    let conflict = extract_conflict("Key (email)=(a@b.com)=(dup) already exists.")
        .expect("detail matches");
    assert_eq!(conflict.column, "email");
    assert_eq!(conflict.value, "a@b.com");
}

#[rstest]
fn extraction_keeps_multi_column_values_together() {
    let conflict = extract_conflict("Key (category_id, name)=(11, Mapo Tofu) already exists.")
        .expect("detail matches");
    assert_eq!(conflict.column, "category_id, name");
    assert_eq!(conflict.value, "11, Mapo Tofu");
}

#[rstest]
#[case("")]
#[case("(")]
#[case(")=(")]
#[case("Key (a)=(b")]
fn extraction_never_panics_on_odd_input(#[case] detail: &str) {
    assert!(extract_conflict(detail).is_none());
}

#[rstest]
fn empty_value_still_produces_a_message() {
    let message = handled_message(ErrorNormalizer.classify(unique_violation(Some(
        "Key (name)=() already exists.",
    ))));
    assert_eq!(message, " already exists");
}

async fn response_parts(error: Error) -> (StatusCode, Vec<u8>) {
    let response = ResponseError::error_response(&error);
    let status = response.status();
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    (status, bytes.to_vec())
}

#[rstest]
#[actix_web::test]
async fn handled_errors_answer_with_an_envelope() {
    let error = unique_violation(Some("Key (name)=(Mapo Tofu) already exists."));
    assert_eq!(ResponseError::status_code(&error), StatusCode::OK);

    let (status, body) = response_parts(error).await;

    assert_eq!(status, StatusCode::OK);
    let value: Value = serde_json::from_slice(&body).expect("envelope JSON");
    assert_eq!(
        value,
        json!({"ok": false, "message": "Mapo Tofu already exists"})
    );
}

#[rstest]
#[actix_web::test]
async fn reraised_errors_answer_500_without_leaking_detail(foreign_key_violation: Error) {
    assert_eq!(
        ResponseError::status_code(&foreign_key_violation),
        StatusCode::INTERNAL_SERVER_ERROR
    );

    let (status, body) = response_parts(foreign_key_violation).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.is_empty());
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        let bytes = self.0.lock().expect("log buffer lock").clone();
        String::from_utf8(bytes).expect("log output is UTF-8")
    }
}

struct CapturedWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CapturedWriter(Arc::clone(&self.0))
    }
}

fn normalize_with_captured_logs(error: Error) -> (Classification, String) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .finish();
    let outcome = tracing::subscriber::with_default(subscriber, || {
        ErrorNormalizer.normalize(error)
    });
    (outcome, logs.contents())
}

#[rstest]
fn reraised_errors_are_logged_with_their_code(foreign_key_violation: Error) {
    let (outcome, logs) = normalize_with_captured_logs(foreign_key_violation.clone());

    assert_eq!(outcome, Classification::Reraise(foreign_key_violation));
    assert!(logs.contains("ERROR"), "logs: {logs}");
    assert!(logs.contains("unhandled persistence error"), "logs: {logs}");
    assert!(logs.contains("23503"), "logs: {logs}");
}

#[rstest]
fn business_errors_are_logged_at_error_level() {
    let (outcome, logs) = normalize_with_captured_logs(Error::business("no dishes selected"));

    assert_eq!(handled_message(outcome), "no dishes selected");
    assert!(logs.contains("ERROR"), "logs: {logs}");
    assert!(logs.contains("no dishes selected"), "logs: {logs}");
}
