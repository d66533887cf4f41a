//! Genre CRUD handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use tracing::debug;

use gestor_common::{Genre, UpsertOutcome, NEW_RECORD_ID};

use crate::pages;
use crate::server::{parse_u32, AppError, WebServerState};

pub fn routes() -> Router<Arc<WebServerState>> {
    Router::new()
        .route("/index", get(get_index))
        .route("/create", get(get_create).post(post_create))
        .route("/edit/:genre_id", get(get_edit))
        .route("/edit", post(post_edit))
        .route("/delete", post(post_delete))
}

#[derive(Debug, Deserialize)]
pub struct CreateForm {
    #[serde(rename = "Name")]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct EditForm {
    #[serde(rename = "genreId")]
    pub genre_id: String,
    #[serde(rename = "Name")]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    #[serde(rename = "GenreId")]
    pub genre_id: String,
}

async fn get_index(State(state): State<Arc<WebServerState>>) -> Result<Html<String>, AppError> {
    let genres = state.genres.load_all()?;
    Ok(Html(pages::genre_index(&genres)))
}

async fn get_create() -> Html<String> {
    Html(pages::genre_form(None))
}

async fn post_create(
    State(state): State<Arc<WebServerState>>,
    Form(form): Form<CreateForm>,
) -> Result<Redirect, AppError> {
    state.genres.upsert(Genre::new(NEW_RECORD_ID, form.name))?;
    Ok(Redirect::to("/genre/index"))
}

/// An unknown id sends the browser back to the listing instead of
/// rendering an error page.
async fn get_edit(
    State(state): State<Arc<WebServerState>>,
    Path(genre_id): Path<u32>,
) -> Result<Response, AppError> {
    match state.genres.find_by_id(genre_id)? {
        Some(genre) => Ok(Html(pages::genre_form(Some(&genre))).into_response()),
        None => Ok(Redirect::to("/genre/index").into_response()),
    }
}

async fn post_edit(
    State(state): State<Arc<WebServerState>>,
    Form(form): Form<EditForm>,
) -> Result<Redirect, AppError> {
    let id = parse_u32("genreId", &form.genre_id)?;
    let outcome = state.genres.upsert(Genre::new(id, form.name))?;
    if outcome == UpsertOutcome::NotFound {
        debug!(id, "genre edit targeted a missing record");
    }
    Ok(Redirect::to("/genre/index"))
}

async fn post_delete(
    State(state): State<Arc<WebServerState>>,
    Form(form): Form<DeleteForm>,
) -> Result<Redirect, AppError> {
    let id = parse_u32("GenreId", &form.genre_id)?;
    state.genres.delete_by_id(id)?;
    Ok(Redirect::to("/genre/index"))
}
