//! Drawing save HTTP handlers.
//!
//! ```text
//! POST /api/save-drawing
//! POST /api/save-drawing/{id}
//! ```
//!
//! Both routes share one handler body. The identifier in the path is
//! accepted for compatibility only; the body's `id` (or legacy `_id`) decides
//! which record is written.

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::ports::{SaveDrawingRequest, SaveDrawingResponse, SaveOutcome};
use crate::domain::{Drawing, DrawingId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Message sent with `201 Created`.
pub const CREATED_MESSAGE: &str = "Drawing saved successfully!";
/// Message sent with `200 OK`.
pub const UPDATED_MESSAGE: &str = "Drawing updated successfully!";

/// Request payload for saving a drawing.
///
/// Clients send either `drawing` or `payload` for the content and either `id`
/// or the legacy `_id` for the key. The first spelling wins when both carry a
/// value.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct SaveDrawingBody {
    /// Drawing content; stored as `null` when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub drawing: Option<Value>,
    /// Alternative spelling of `drawing`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub payload: Option<Value>,
    /// Identifier of the record to update; blank or absent creates one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = String)]
    pub id: Option<Value>,
    /// Legacy spelling of `id`.
    #[serde(default, rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = String)]
    pub legacy_id: Option<Value>,
}

impl SaveDrawingBody {
    /// Identifier named by the body, if any usable one was sent.
    ///
    /// Strings are taken as-is, numbers and booleans in their JSON text form.
    /// `null`, blank strings, objects and arrays count as absent.
    #[must_use]
    pub fn drawing_id(&self) -> Option<DrawingId> {
        [self.id.as_ref(), self.legacy_id.as_ref()]
            .into_iter()
            .flatten()
            .find_map(scalar_id)
    }

    fn into_request(self) -> SaveDrawingRequest {
        let id = self.drawing_id();
        SaveDrawingRequest {
            id,
            payload: self.drawing.or(self.payload).unwrap_or(Value::Null),
        }
    }
}

fn scalar_id(value: &Value) -> Option<DrawingId> {
    let raw = match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    DrawingId::new(raw).ok()
}

/// Stored drawing as rendered to clients.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DrawingResponse {
    /// Record key.
    pub id: String,
    /// Stored drawing content.
    #[schema(value_type = Object)]
    pub drawing: Value,
    /// RFC 3339 creation time.
    pub created_at: String,
    /// RFC 3339 time of the latest save.
    pub updated_at: String,
}

impl From<Drawing> for DrawingResponse {
    fn from(value: Drawing) -> Self {
        Self {
            id: value.id.to_string(),
            drawing: value.payload,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// Envelope returned by both save routes.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SaveDrawingResponseBody {
    /// Human-readable outcome.
    pub message: String,
    /// The record as stored.
    pub drawing: DrawingResponse,
}

fn render(response: SaveDrawingResponse) -> HttpResponse {
    let (mut builder, message) = match response.outcome {
        SaveOutcome::Created => (HttpResponse::Created(), CREATED_MESSAGE),
        SaveOutcome::Updated => (HttpResponse::Ok(), UPDATED_MESSAGE),
    };
    builder.json(SaveDrawingResponseBody {
        message: message.to_owned(),
        drawing: DrawingResponse::from(response.drawing),
    })
}

async fn save(state: &HttpState, body: SaveDrawingBody) -> ApiResult<HttpResponse> {
    let response = state.drawings.save(body.into_request()).await?;
    Ok(render(response))
}

/// Create or update a drawing.
#[utoipa::path(
    post,
    path = "/api/save-drawing",
    description = "Create a drawing, or update the one named by `id`. An unknown `id` creates a record under that key.",
    request_body = SaveDrawingBody,
    responses(
        (status = 201, description = "Drawing created", body = SaveDrawingResponseBody),
        (status = 200, description = "Drawing updated", body = SaveDrawingResponseBody),
        (status = 400, description = "Malformed JSON body", body = String, content_type = "text/plain"),
        (status = 500, description = "Store unreachable or write failed", body = String, content_type = "text/plain")
    ),
    tags = ["drawings"],
    operation_id = "saveDrawing"
)]
#[post("/save-drawing")]
pub async fn save_drawing(
    state: web::Data<HttpState>,
    payload: web::Json<SaveDrawingBody>,
) -> ApiResult<HttpResponse> {
    save(&state, payload.into_inner()).await
}

/// Create or update a drawing; the path identifier is ignored.
#[utoipa::path(
    post,
    path = "/api/save-drawing/{id}",
    description = "Same as `POST /api/save-drawing`. The path identifier is not used; the body `id` decides the record.",
    params(("id" = String, Path, description = "Ignored identifier")),
    request_body = SaveDrawingBody,
    responses(
        (status = 201, description = "Drawing created", body = SaveDrawingResponseBody),
        (status = 200, description = "Drawing updated", body = SaveDrawingResponseBody),
        (status = 400, description = "Malformed JSON body", body = String, content_type = "text/plain"),
        (status = 500, description = "Store unreachable or write failed", body = String, content_type = "text/plain")
    ),
    tags = ["drawings"],
    operation_id = "saveDrawingWithPathId"
)]
#[post("/save-drawing/{id}")]
pub async fn save_drawing_with_id(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<SaveDrawingBody>,
) -> ApiResult<HttpResponse> {
    let path_id = path.into_inner();
    let body = payload.into_inner();
    let body_id = body.drawing_id();
    if body_id.as_ref().map(DrawingId::as_str) != Some(path_id.as_str()) {
        debug!(
            path_id = %path_id,
            body_id = ?body_id,
            "path id differs from body id; using body id"
        );
    }
    save(&state, body).await
}

#[cfg(test)]
#[path = "drawings_tests.rs"]
mod tests;
