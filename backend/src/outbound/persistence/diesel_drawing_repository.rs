//! PostgreSQL-backed [`DrawingRepository`] using Diesel.
//!
//! The upsert is a single `INSERT .. ON CONFLICT (id) DO UPDATE` statement:
//! on conflict only `drawing` and `updated_at` are overwritten, so the stored
//! `created_at` survives concurrent writers and the last committed write
//! wins.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DrawingRepository, DrawingRepositoryError};
use crate::domain::{Drawing, DrawingId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{DrawingRow, NewDrawingRow};
use super::pool::{DbPool, PoolError};
use super::schema::drawings;

/// Diesel-backed implementation of the `DrawingRepository` port.
#[derive(Clone)]
pub struct DieselDrawingRepository {
    pool: DbPool,
}

impl DieselDrawingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DrawingRepositoryError {
    map_basic_pool_error(error, |message: String| {
        DrawingRepositoryError::connection(message)
    })
}

fn map_diesel_error(error: diesel::result::Error) -> DrawingRepositoryError {
    map_basic_diesel_error(
        error,
        |message: String| DrawingRepositoryError::query(message),
        |message: String| DrawingRepositoryError::connection(message),
    )
}

fn row_to_drawing(row: DrawingRow) -> Result<Drawing, DrawingRepositoryError> {
    let id = DrawingId::new(row.id)
        .map_err(|err| DrawingRepositoryError::query(format!("stored drawing id: {err}")))?;
    Ok(Drawing {
        id,
        payload: row.drawing,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl DrawingRepository for DieselDrawingRepository {
    async fn find_by_id(&self, id: &DrawingId) -> Result<Option<Drawing>, DrawingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<DrawingRow> = drawings::table
            .find(id.as_str())
            .select(DrawingRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_drawing).transpose()
    }

    async fn upsert(&self, drawing: &Drawing) -> Result<Drawing, DrawingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewDrawingRow {
            id: drawing.id.as_str(),
            drawing: &drawing.payload,
            created_at: drawing.created_at,
            updated_at: drawing.updated_at,
        };

        let stored: DrawingRow = diesel::insert_into(drawings::table)
            .values(&new_row)
            .on_conflict(drawings::id)
            .do_update()
            .set((
                drawings::drawing.eq(excluded(drawings::drawing)),
                drawings::updated_at.eq(excluded(drawings::updated_at)),
            ))
            .returning(DrawingRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_drawing(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn rows_convert_to_domain_drawings() {
        let now = Utc::now();
        let row = DrawingRow {
            id: "65f1c0ffee00000000000001".to_owned(),
            drawing: json!({"lines": [[1, 2]]}),
            created_at: now,
            updated_at: now,
        };

        let drawing = row_to_drawing(row).expect("row converts");

        assert_eq!(drawing.id.as_str(), "65f1c0ffee00000000000001");
        assert_eq!(drawing.payload, json!({"lines": [[1, 2]]}));
        assert_eq!(drawing.created_at, now);
    }

    #[rstest]
    fn blank_stored_ids_are_query_errors() {
        let now = Utc::now();
        let row = DrawingRow {
            id: String::new(),
            drawing: json!(null),
            created_at: now,
            updated_at: now,
        };

        let err = row_to_drawing(row).expect_err("blank id rejected");

        assert!(matches!(err, DrawingRepositoryError::Query { .. }));
    }

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let err = map_pool_error(PoolError::checkout("Connection refused (os error 111)"));
        assert_eq!(
            err,
            DrawingRepositoryError::connection("Connection refused (os error 111)")
        );
    }
}
