//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! small helpers live here instead of being copied between files.

pub mod database;
