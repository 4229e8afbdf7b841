//! Helpers for tests that need a live PostgreSQL server.
//!
//! The server is taken from `DATABASE_URL`. When it is unset the test is
//! skipped, unless `REQUIRE_TEST_DATABASE` is truthy, in which case the test
//! fails so CI breakage is not masked.

/// Returns true when `REQUIRE_TEST_DATABASE` is set to a truthy value.
///
/// Truthy values: "1", "true", "yes" (case-insensitive).
pub fn test_database_required() -> bool {
    std::env::var("REQUIRE_TEST_DATABASE")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Return the configured database URL, or print a skip marker and return
/// `None` when there is none.
pub fn database_url_or_skip() -> Option<String> {
    match std::env::var("DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => Some(url),
        _ if test_database_required() => {
            panic!("DATABASE_URL is not set but REQUIRE_TEST_DATABASE is enabled.")
        }
        _ => {
            eprintln!("SKIP-TEST-DATABASE: DATABASE_URL is not set");
            None
        }
    }
}
