//! Home page and series filter handlers

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{Html, Redirect};
use axum::Form;
use serde::Deserialize;
use tracing::debug;

use gestor_common::{filter_series, SeriesFilter};

use crate::pages;
use crate::server::{parse_optional_u32, AppError, WebServerState};

#[derive(Debug, Deserialize, Default)]
pub struct HomeQuery {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "genreId", default)]
    pub genre_id: Option<String>,
}

/// Filter form body. Values pass through to the redirect untouched; the
/// listing handler owns parsing and normalization.
#[derive(Debug, Deserialize)]
pub struct FilterForm {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "GenreId", default)]
    pub genre_id: String,
}

/// GET `/` and `/home`: the series listing filtered by the query string.
pub async fn get_index(
    State(state): State<Arc<WebServerState>>,
    Query(query): Query<HomeQuery>,
) -> Result<Html<String>, AppError> {
    let name = query.name.unwrap_or_default();
    let genre_id = parse_optional_u32("genreId", query.genre_id.as_deref().unwrap_or(""))?;

    let filter = SeriesFilter::from_raw(&name, genre_id.unwrap_or(0));
    let series = filter_series(state.series.load_all()?, &filter);
    let genres = state.genres.load_all()?;

    debug!(
        name = %name,
        genre_id = genre_id.unwrap_or(0),
        matches = series.len(),
        "rendered home listing"
    );
    Ok(Html(pages::home(
        &series,
        &genres,
        &name,
        genre_id.unwrap_or(0),
    )))
}

/// POST `/home/filter`: bridge the form submission into a linkable GET.
pub async fn post_filter(Form(form): Form<FilterForm>) -> Redirect {
    let target = format!(
        "/home?name={}&genreId={}",
        urlencoding::encode(&form.name),
        urlencoding::encode(&form.genre_id),
    );
    Redirect::to(&target)
}
