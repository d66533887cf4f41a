//! Catalog record types
//!
//! Two record kinds live in the catalog: genres and series. A series points
//! at its genre through a soft `genre_id` reference that is never validated
//! at write time; display code resolves dangling references to a fixed
//! fallback label instead.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Sentinel id carried by a record that has not been persisted yet.
/// `JsonStore::upsert` treats it as "assign a fresh id and insert".
pub const NEW_RECORD_ID: u32 = 0;

/// Label shown when a series references a genre that does not exist.
pub const UNKNOWN_GENRE: &str = "Unknown";

/// A record that can live in a [`crate::store::JsonStore`] collection.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Kind name used in log lines and errors ("genre", "series").
    const KIND: &'static str;

    fn id(&self) -> u32;
    fn set_id(&mut self, id: u32);
}

/// A named category referenced by series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

impl Genre {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

impl Record for Genre {
    const KIND: &'static str = "genre";

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }
}

/// A catalog entry with display metadata and a soft genre reference.
///
/// Field renames keep the persisted JSON compatible with the documents the
/// application has always written (`frontPage`, `youtubeLink`, `genreId`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub id: u32,
    pub name: String,
    #[serde(rename = "frontPage")]
    pub front_page: String,
    #[serde(rename = "youtubeLink")]
    pub youtube_link: String,
    #[serde(rename = "genreId")]
    pub genre_id: u32,
}

impl Series {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        front_page: impl Into<String>,
        youtube_link: impl Into<String>,
        genre_id: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            front_page: front_page.into(),
            youtube_link: youtube_link.into(),
            genre_id,
        }
    }
}

impl Record for Series {
    const KIND: &'static str = "series";

    fn id(&self) -> u32 {
        self.id
    }

    fn set_id(&mut self, id: u32) {
        self.id = id;
    }
}

/// Resolve a series' genre reference to a human-readable name.
///
/// Returns [`UNKNOWN_GENRE`] when the reference is absent (0) or no genre
/// carries that id.
pub fn genre_name(genres: &[Genre], genre_id: u32) -> &str {
    if genre_id == 0 {
        return UNKNOWN_GENRE;
    }
    genres
        .iter()
        .find(|g| g.id == genre_id)
        .map(|g| g.name.as_str())
        .unwrap_or(UNKNOWN_GENRE)
}
