//! Process-local drawing store.
//!
//! Used when no database URL is configured. Contents are lost on restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{DrawingRepository, DrawingRepositoryError};
use crate::domain::{Drawing, DrawingId};

/// In-memory implementation of the `DrawingRepository` port.
#[derive(Debug, Default)]
pub struct InMemoryDrawingRepository {
    drawings: RwLock<HashMap<String, Drawing>>,
}

impl InMemoryDrawingRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored drawings.
    pub async fn len(&self) -> usize {
        self.drawings.read().await.len()
    }

    /// Whether the store holds no drawings.
    pub async fn is_empty(&self) -> bool {
        self.drawings.read().await.is_empty()
    }
}

#[async_trait]
impl DrawingRepository for InMemoryDrawingRepository {
    async fn find_by_id(&self, id: &DrawingId) -> Result<Option<Drawing>, DrawingRepositoryError> {
        Ok(self.drawings.read().await.get(id.as_str()).cloned())
    }

    async fn upsert(&self, drawing: &Drawing) -> Result<Drawing, DrawingRepositoryError> {
        let mut drawings = self.drawings.write().await;
        let stored = match drawings.get(drawing.id.as_str()) {
            // Mirror ON CONFLICT: the first insert's created_at wins.
            Some(existing) => Drawing {
                created_at: existing.created_at,
                ..drawing.clone()
            },
            None => drawing.clone(),
        };
        drawings.insert(stored.id.as_str().to_owned(), stored.clone());
        Ok(stored)
    }
}
