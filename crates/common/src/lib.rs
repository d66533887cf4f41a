//! Gestor de Cine Common Library
//!
//! Shared catalog types, the JSON-file record store and the series query
//! core used by the web server and the browser test harness.

pub mod error;
pub mod query;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};
pub use query::{filter_series, SeriesFilter};
pub use store::{JsonStore, UpsertOutcome};
pub use types::*;

/// Gestor de Cine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default directory holding the JSON collection documents.
pub fn default_data_dir() -> std::path::PathBuf {
    std::path::PathBuf::from("data")
}

/// Document path for the genre collection under a data directory.
pub fn genre_store_path(data_dir: &std::path::Path) -> std::path::PathBuf {
    data_dir.join("genre.json")
}

/// Document path for the series collection under a data directory.
pub fn series_store_path(data_dir: &std::path::Path) -> std::path::PathBuf {
    data_dir.join("series.json")
}
