//! Series CRUD handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use tracing::debug;

use gestor_common::{Series, UpsertOutcome, NEW_RECORD_ID};

use crate::pages;
use crate::server::{parse_u32, AppError, WebServerState};

pub fn routes() -> Router<Arc<WebServerState>> {
    Router::new()
        .route("/index", get(get_index))
        .route("/create", get(get_create).post(post_create))
        .route("/edit/:series_id", get(get_edit))
        .route("/edit", post(post_edit))
        .route("/delete", post(post_delete))
}

#[derive(Debug, Deserialize)]
pub struct CreateForm {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "FrontPage")]
    pub front_page: String,
    #[serde(rename = "YoutubeLink")]
    pub youtube_link: String,
    #[serde(rename = "GenreId")]
    pub genre_id: String,
}

#[derive(Debug, Deserialize)]
pub struct EditForm {
    #[serde(rename = "serieId")]
    pub serie_id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "FrontPage")]
    pub front_page: String,
    #[serde(rename = "YoutubeLink")]
    pub youtube_link: String,
    #[serde(rename = "GenreId")]
    pub genre_id: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    #[serde(rename = "serieId")]
    pub serie_id: String,
}

async fn get_index(State(state): State<Arc<WebServerState>>) -> Result<Html<String>, AppError> {
    let series = state.series.load_all()?;
    let genres = state.genres.load_all()?;
    Ok(Html(pages::series_index(&series, &genres)))
}

async fn get_create(State(state): State<Arc<WebServerState>>) -> Result<Html<String>, AppError> {
    let genres = state.genres.load_all()?;
    Ok(Html(pages::series_form(None, &genres)))
}

async fn post_create(
    State(state): State<Arc<WebServerState>>,
    Form(form): Form<CreateForm>,
) -> Result<Redirect, AppError> {
    let genre_id = parse_u32("GenreId", &form.genre_id)?;
    state.series.upsert(Series::new(
        NEW_RECORD_ID,
        form.name,
        form.front_page,
        form.youtube_link,
        genre_id,
    ))?;
    Ok(Redirect::to("/series/index"))
}

/// An unknown id sends the browser back to the listing instead of
/// rendering an error page.
async fn get_edit(
    State(state): State<Arc<WebServerState>>,
    Path(series_id): Path<u32>,
) -> Result<Response, AppError> {
    match state.series.find_by_id(series_id)? {
        Some(serie) => {
            let genres = state.genres.load_all()?;
            Ok(Html(pages::series_form(Some(&serie), &genres)).into_response())
        }
        None => Ok(Redirect::to("/series/index").into_response()),
    }
}

async fn post_edit(
    State(state): State<Arc<WebServerState>>,
    Form(form): Form<EditForm>,
) -> Result<Redirect, AppError> {
    let id = parse_u32("serieId", &form.serie_id)?;
    let genre_id = parse_u32("GenreId", &form.genre_id)?;
    let outcome = state.series.upsert(Series::new(
        id,
        form.name,
        form.front_page,
        form.youtube_link,
        genre_id,
    ))?;
    if outcome == UpsertOutcome::NotFound {
        debug!(id, "series edit targeted a missing record");
    }
    Ok(Redirect::to("/series/index"))
}

async fn post_delete(
    State(state): State<Arc<WebServerState>>,
    Form(form): Form<DeleteForm>,
) -> Result<Redirect, AppError> {
    let id = parse_u32("serieId", &form.serie_id)?;
    state.series.delete_by_id(id)?;
    Ok(Redirect::to("/series/index"))
}
