//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the drawing save routes, the root greeting and the
//! health probes. Swagger UI serves it in debug builds and the
//! `openapi-dump` binary prints it for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::drawings::{DrawingResponse, SaveDrawingBody, SaveDrawingResponseBody};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Drawing backend API",
        description = "Stores and updates drawings sent by the drawing client."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::drawings::save_drawing,
        crate::inbound::http::drawings::save_drawing_with_id,
        crate::inbound::http::root::hello,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(SaveDrawingBody, SaveDrawingResponseBody, DrawingResponse)),
    tags(
        (name = "drawings", description = "Saving drawings"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
