//! Save-or-update orchestration for drawings.
//!
//! The service owns the only decision in the system: given an optional key,
//! create a new record or revise the stored one. It performs one lookup (when
//! a key is supplied) followed by one upsert, with no locking; the store
//! arbitrates concurrent writes to the same key.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, info};

use crate::domain::ports::{
    DrawingRepository, DrawingRepositoryError, SaveDrawingCommand, SaveDrawingRequest,
    SaveDrawingResponse, SaveOutcome,
};
use crate::domain::{Drawing, DrawingId, Error};

/// Domain service implementing [`SaveDrawingCommand`].
#[derive(Clone)]
pub struct DrawingUpsertService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> DrawingUpsertService<R> {
    /// Create a service writing through `repository` and stamping records
    /// with `clock`.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

impl<R> DrawingUpsertService<R>
where
    R: DrawingRepository,
{
    async fn plan(&self, request: SaveDrawingRequest) -> Result<(SaveOutcome, Drawing), Error> {
        let SaveDrawingRequest { id, payload } = request;
        let now = self.clock.utc();

        let Some(id) = id else {
            return Ok((
                SaveOutcome::Created,
                Drawing::create(DrawingId::generate(), payload, now),
            ));
        };

        let existing = self
            .repository
            .find_by_id(&id)
            .await
            .map_err(map_repository_error)?;

        Ok(match existing {
            Some(stored) => (SaveOutcome::Updated, stored.revise(payload, now)),
            None => {
                debug!(drawing_id = %id, "no stored drawing under supplied id; creating");
                (SaveOutcome::Created, Drawing::create(id, payload, now))
            }
        })
    }
}

#[async_trait]
impl<R> SaveDrawingCommand for DrawingUpsertService<R>
where
    R: DrawingRepository,
{
    async fn save(&self, request: SaveDrawingRequest) -> Result<SaveDrawingResponse, Error> {
        let (outcome, candidate) = self.plan(request).await?;
        let drawing = self
            .repository
            .upsert(&candidate)
            .await
            .map_err(map_repository_error)?;

        info!(drawing_id = %drawing.id, ?outcome, "drawing saved");
        Ok(SaveDrawingResponse { outcome, drawing })
    }
}

fn map_repository_error(error: DrawingRepositoryError) -> Error {
    let message = match &error {
        DrawingRepositoryError::Connection { .. } => {
            format!("Error connecting to database: {}", error.reason())
        }
        DrawingRepositoryError::Query { .. } => {
            format!("Error saving drawing: {}", error.reason())
        }
    };
    tracing::error!(%error, "drawing store failure");
    Error::internal(message)
}

#[cfg(test)]
#[path = "drawing_service_tests.rs"]
mod tests;
