//! Recorded API payloads for tests.
//!
//! Files live next to this module under `models/`, `content/` and `errors/`.

use std::path::PathBuf;

use serde::de::DeserializeOwned;

/// Path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("src")
        .join("fixtures")
        .join(relative_path)
}

/// Fixture contents as a string. Panics if the file is missing.
pub fn load_fixture(relative_path: &str) -> String {
    std::fs::read_to_string(fixture_path(relative_path))
        .unwrap_or_else(|e| panic!("Failed to load fixture {relative_path}: {e}"))
}

/// Fixture parsed as `T`. Panics if it is missing or does not parse.
pub fn load_json_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let content = load_fixture(relative_path);
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse JSON fixture {relative_path}: {e}"))
}
