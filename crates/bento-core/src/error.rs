// File: crates/bento-core/src/error.rs
// Summary: Error types for the fallible edges of the core (fixture I/O and parsing).
//
// Widgets themselves never fail; these only surface from loading data.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("fixture not found: {0}")]
    MissingFixture(PathBuf),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type DashResult<T> = Result<T, DashError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DashError::MissingFixture(PathBuf::from("data/fleet/vehicles.json"));
        assert_eq!(err.to_string(), "fixture not found: data/fleet/vehicles.json");

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        assert!(matches!(DashError::from(io), DashError::Io(_)));
    }
}
