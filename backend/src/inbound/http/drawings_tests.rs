//! Tests for drawing save handlers.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::{DateTime, TimeZone, Utc};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::Error;
use crate::domain::ports::MockSaveDrawingCommand;
use crate::inbound::http::error::json_config;

#[fixture]
fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

fn stored(id: &str, payload: Value, created_at: DateTime<Utc>) -> Drawing {
    Drawing::create(DrawingId::new(id).expect("valid id"), payload, created_at)
}

async fn post_save(
    command: MockSaveDrawingCommand,
    uri: &str,
    body: Value,
) -> (StatusCode, actix_web::web::Bytes) {
    let state = web::Data::new(HttpState::new(Arc::new(command)));
    let app = actix_test::init_service(
        App::new().app_data(state).app_data(json_config()).service(
            web::scope("/api")
                .service(save_drawing)
                .service(save_drawing_with_id),
        ),
    )
    .await;
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(&body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    let status = response.status();
    (status, actix_test::read_body(response).await)
}

fn parse_body(bytes: &[u8]) -> SaveDrawingResponseBody {
    serde_json::from_slice(bytes).expect("response body is a save envelope")
}

#[rstest]
#[actix_web::test]
async fn save_without_id_creates(created_at: DateTime<Utc>) {
    let mut command = MockSaveDrawingCommand::new();
    command
        .expect_save()
        .times(1)
        .withf(|request| request.id.is_none() && request.payload == json!({"lines": []}))
        .returning(move |request| {
            Ok(SaveDrawingResponse {
                outcome: SaveOutcome::Created,
                drawing: stored("generated", request.payload, created_at),
            })
        });

    let (status, bytes) = post_save(
        command,
        "/api/save-drawing",
        json!({"drawing": {"lines": []}}),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let body = parse_body(&bytes);
    assert_eq!(body.message, CREATED_MESSAGE);
    assert_eq!(body.drawing.id, "generated");
    assert_eq!(body.drawing.drawing, json!({"lines": []}));
    assert_eq!(body.drawing.created_at, created_at.to_rfc3339());
    assert_eq!(body.drawing.created_at, body.drawing.updated_at);
}

#[rstest]
#[case::id(json!({"id": "65f1", "drawing": [1, 2]}))]
#[case::legacy_id(json!({"_id": "65f1", "drawing": [1, 2]}))]
#[case::payload_alias(json!({"id": "65f1", "payload": [1, 2]}))]
#[actix_web::test]
async fn save_with_known_id_updates(#[case] request_body: Value, created_at: DateTime<Utc>) {
    let mut command = MockSaveDrawingCommand::new();
    command
        .expect_save()
        .times(1)
        .withf(|request| {
            request.id.as_ref().map(DrawingId::as_str) == Some("65f1")
                && request.payload == json!([1, 2])
        })
        .returning(move |request| {
            Ok(SaveDrawingResponse {
                outcome: SaveOutcome::Updated,
                drawing: stored("65f1", request.payload, created_at),
            })
        });

    let (status, bytes) = post_save(command, "/api/save-drawing", request_body).await;

    assert_eq!(status, StatusCode::OK);
    let body = parse_body(&bytes);
    assert_eq!(body.message, UPDATED_MESSAGE);
    assert_eq!(body.drawing.id, "65f1");
}

#[rstest]
#[case::blank_id(json!({"id": "   ", "drawing": 1}), json!(1))]
#[case::missing_drawing(json!({}), Value::Null)]
#[case::null_id(json!({"id": null, "drawing": "x"}), json!("x"))]
#[case::object_id(json!({"_id": {"$oid": "65f1"}, "drawing": 2}), json!(2))]
#[case::array_id(json!({"id": ["65f1"], "payload": 3}), json!(3))]
#[actix_web::test]
async fn lenient_bodies_create(
    #[case] request_body: Value,
    #[case] expected_payload: Value,
    created_at: DateTime<Utc>,
) {
    let mut command = MockSaveDrawingCommand::new();
    let expected = expected_payload.clone();
    command
        .expect_save()
        .times(1)
        .withf(move |request| request.id.is_none() && request.payload == expected)
        .returning(move |request| {
            Ok(SaveDrawingResponse {
                outcome: SaveOutcome::Created,
                drawing: stored("generated", request.payload, created_at),
            })
        });

    let (status, bytes) = post_save(command, "/api/save-drawing", request_body).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(parse_body(&bytes).drawing.drawing, expected_payload);
}

#[rstest]
#[case::body_id(json!({"id": "from-body", "drawing": 1}), Some("from-body"))]
#[case::no_body_id(json!({"drawing": 1}), None)]
#[actix_web::test]
async fn path_id_is_ignored(
    #[case] request_body: Value,
    #[case] expected_id: Option<&'static str>,
    created_at: DateTime<Utc>,
) {
    let mut command = MockSaveDrawingCommand::new();
    command
        .expect_save()
        .times(1)
        .withf(move |request| request.id.as_ref().map(DrawingId::as_str) == expected_id)
        .returning(move |request| {
            Ok(SaveDrawingResponse {
                outcome: SaveOutcome::Created,
                drawing: stored(
                    request.id.as_ref().map_or("generated", DrawingId::as_str),
                    request.payload,
                    created_at,
                ),
            })
        });

    let (status, _) = post_save(command, "/api/save-drawing/from-path", request_body).await;

    assert_eq!(status, StatusCode::CREATED);
}

#[rstest]
#[actix_web::test]
async fn store_failures_are_plain_text_500s() {
    let mut command = MockSaveDrawingCommand::new();
    command.expect_save().times(1).returning(|_| {
        Err(Error::internal(
            "Error connecting to database: Connection refused (os error 111)",
        ))
    });

    let (status, bytes) = post_save(command, "/api/save-drawing", json!({"drawing": 1})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        bytes.as_ref(),
        b"Error connecting to database: Connection refused (os error 111)"
    );
}

#[rstest]
#[case::both_ids(json!({"id": "a", "_id": "b", "drawing": 1}), "a", json!(1))]
#[case::null_id_falls_back(json!({"id": null, "_id": "b", "drawing": 1}), "b", json!(1))]
#[case::blank_id_falls_back(json!({"id": " ", "_id": "b", "drawing": 1}), "b", json!(1))]
#[case::both_payloads(json!({"id": "a", "drawing": 1, "payload": 2}), "a", json!(1))]
#[case::numeric_legacy_id(json!({"_id": 42, "drawing": 1}), "42", json!(1))]
#[case::numeric_id(json!({"id": 7.5, "payload": 1}), "7.5", json!(1))]
#[case::boolean_id(json!({"id": true, "drawing": 1}), "true", json!(1))]
#[actix_web::test]
async fn duplicate_and_scalar_fields_are_accepted(
    #[case] request_body: Value,
    #[case] expected_id: &'static str,
    #[case] expected_payload: Value,
    created_at: DateTime<Utc>,
) {
    let mut command = MockSaveDrawingCommand::new();
    let expected = expected_payload.clone();
    command
        .expect_save()
        .times(1)
        .withf(move |request| {
            request.id.as_ref().map(DrawingId::as_str) == Some(expected_id)
                && request.payload == expected
        })
        .returning(move |request| {
            Ok(SaveDrawingResponse {
                outcome: SaveOutcome::Updated,
                drawing: stored(expected_id, request.payload, created_at),
            })
        });

    let (status, bytes) = post_save(command, "/api/save-drawing", request_body).await;

    assert_eq!(status, StatusCode::OK);
    let body = parse_body(&bytes);
    assert_eq!(body.drawing.id, expected_id);
    assert_eq!(body.drawing.drawing, expected_payload);
}

#[rstest]
fn drawing_response_uses_rfc3339_timestamps(created_at: DateTime<Utc>) {
    let response = DrawingResponse::from(stored("abc", json!({"k": "v"}), created_at));

    assert_eq!(response.created_at, "2026-03-01T09:30:00+00:00");
    assert_eq!(response.updated_at, response.created_at);
    let rendered = serde_json::to_value(&response).expect("serialises");
    assert!(rendered.get("createdAt").is_some());
    assert!(rendered.get("updatedAt").is_some());
}
