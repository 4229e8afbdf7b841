//! HTTP state construction helpers.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use drawing_backend::domain::DrawingUpsertService;
use drawing_backend::domain::ports::SaveDrawingCommand;
use drawing_backend::inbound::http::state::HttpState;
use drawing_backend::outbound::memory::InMemoryDrawingRepository;
use drawing_backend::outbound::persistence::DieselDrawingRepository;

use super::ServerConfig;

/// Build the save use-case over whichever store the configuration names.
pub(crate) fn build_save_command(config: &ServerConfig) -> Arc<dyn SaveDrawingCommand> {
    match &config.db_pool {
        Some(pool) => {
            info!("storing drawings in PostgreSQL");
            Arc::new(DrawingUpsertService::new(
                Arc::new(DieselDrawingRepository::new(pool.clone())),
                Arc::new(DefaultClock),
            ))
        }
        None => {
            info!("in-memory store requested; drawings are not persisted");
            Arc::new(DrawingUpsertService::new(
                Arc::new(InMemoryDrawingRepository::new()),
                Arc::new(DefaultClock),
            ))
        }
    }
}

/// Build the shared HTTP state.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(build_save_command(config)))
}
