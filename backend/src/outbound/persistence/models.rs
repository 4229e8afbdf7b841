//! Internal Diesel row structs.
//!
//! Persistence-layer details only; repositories convert them to domain
//! [`Drawing`](crate::domain::Drawing) values before returning.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::drawings;

/// Row read back from the `drawings` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = drawings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DrawingRow {
    pub id: String,
    pub drawing: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable form of a drawing; also the source of `excluded.*` values on
/// conflict.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = drawings)]
pub(crate) struct NewDrawingRow<'a> {
    pub id: &'a str,
    pub drawing: &'a serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
