//! Diesel table definitions.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Stored drawings, one row per identifier.
    drawings (id) {
        /// Store-assigned UUID text or caller-supplied key.
        id -> Text,
        /// Opaque drawing payload.
        drawing -> Jsonb,
        /// Set on insert, never updated.
        created_at -> Timestamptz,
        /// Set on every write.
        updated_at -> Timestamptz,
    }
}
