//! HTTP server wiring
//!
//! Builds the axum router over the two JSON-backed collections and owns the
//! request-level error mapping. Every page handler does a whole-document
//! read against the store; mutations rewrite the document and answer with a
//! redirect back to the listing the original navigation flow expects.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use gestor_common::{genre_store_path, series_store_path, Genre, JsonStore, Series};

use crate::pages;
use crate::{genres, home, series};

/// Web server configuration
#[derive(Debug, Clone)]
pub struct WebServerConfig {
    /// Directory holding `genre.json` and `series.json`.
    pub data_dir: PathBuf,
}

/// Shared server state
pub struct WebServerState {
    pub genres: JsonStore<Genre>,
    pub series: JsonStore<Series>,
}

/// The web server
pub struct WebServer {
    state: Arc<WebServerState>,
}

/// Convenience entry point used by the binary.
pub async fn serve(addr: SocketAddr, cfg: WebServerConfig) -> anyhow::Result<()> {
    let server = WebServer::new(cfg);
    server.serve(addr).await
}

impl WebServer {
    /// Create a new web server over the given data directory.
    pub fn new(cfg: WebServerConfig) -> Self {
        Self {
            state: Arc::new(WebServerState {
                genres: JsonStore::new(genre_store_path(&cfg.data_dir)),
                series: JsonStore::new(series_store_path(&cfg.data_dir)),
            }),
        }
    }

    /// Create router
    pub fn router(&self) -> Router {
        Router::new()
            // Home page doubles as the filtered series listing. The filter
            // form posts and is answered with a redirect carrying the
            // criteria as query parameters, so filtered views are linkable.
            .route("/", get(home::get_index))
            .route("/home", get(home::get_index))
            .route("/filter", post(home::post_filter))
            .route("/home/filter", post(home::post_filter))
            // Catalog management areas
            .nest("/genre", genres::routes())
            .nest("/series", series::routes())
            // Embedded static assets
            .route("/assets/styles.css", get(styles_handler))
            // Health check used by the test harness startup wait
            .route("/api/health", get(health_handler))
            // Fallback
            .fallback(not_found_handler)
            .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Start the web server
    pub async fn serve(self, addr: SocketAddr) -> anyhow::Result<()> {
        info!("Gestor de Cine starting on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await?;

        Ok(())
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "gestor-web"
    }))
}

async fn styles_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        pages::STYLES,
    )
}

async fn not_found_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, axum::response::Html(pages::not_found()))
}

// ============================================================================
// Error mapping
// ============================================================================

/// Request-level error wrapper around the catalog error type.
///
/// A malformed form field answers 400. A document that exists on disk but
/// does not parse answers 500 for the request that touched it; the store
/// itself is left untouched.
pub struct AppError(pub gestor_common::Error);

impl From<gestor_common::Error> for AppError {
    fn from(err: gestor_common::Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            gestor_common::Error::InvalidField { .. } => StatusCode::BAD_REQUEST,
            gestor_common::Error::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("request failed: {}", self.0);
        } else {
            warn!("request rejected: {}", self.0);
        }
        (status, self.0.to_string()).into_response()
    }
}

/// Parse a numeric form field, naming the field in the failure.
pub fn parse_u32(field: &'static str, raw: &str) -> Result<u32, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError(gestor_common::Error::InvalidField {
            field,
            value: raw.to_string(),
        }))
}

/// Parse an optional numeric field where an empty or zero value means
/// "not provided".
pub fn parse_optional_u32(field: &'static str, raw: &str) -> Result<Option<u32>, AppError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let id = parse_u32(field, raw)?;
    Ok(if id == 0 { None } else { Some(id) })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use gestor_common::NEW_RECORD_ID;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_server(dir: &TempDir) -> WebServer {
        WebServer::new(WebServerConfig {
            data_dir: dir.path().to_path_buf(),
        })
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn form_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let dir = TempDir::new().unwrap();
        let server = test_server(&dir);

        let response = server.router().oneshot(get("/api/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("\"status\":\"ok\""));
    }

    #[tokio::test]
    async fn genre_index_shows_empty_message_before_any_write() {
        let dir = TempDir::new().unwrap();
        let server = test_server(&dir);

        let response = server.router().oneshot(get("/genre/index")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("No hay géneros cinematográficos registrados"));
    }

    #[tokio::test]
    async fn genre_create_persists_and_redirects_to_index() {
        let dir = TempDir::new().unwrap();
        let server = test_server(&dir);

        let response = server
            .router()
            .oneshot(form_post("/genre/create", "Name=Drama"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/genre/index");

        let response = server.router().oneshot(get("/genre/index")).await.unwrap();
        let body = body_string(response).await;
        assert!(body.contains("Drama"));
        assert!(!body.contains("No hay géneros cinematográficos registrados"));
    }

    #[tokio::test]
    async fn genre_edit_prefills_the_form() {
        let dir = TempDir::new().unwrap();
        let server = test_server(&dir);
        server
            .state
            .genres
            .upsert(Genre::new(NEW_RECORD_ID, "Drama"))
            .unwrap();

        let response = server.router().oneshot(get("/genre/edit/1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("value=\"Drama\""));
        assert!(body.contains("name=\"genreId\""));
    }

    #[tokio::test]
    async fn genre_edit_of_unknown_id_redirects_to_index() {
        let dir = TempDir::new().unwrap();
        let server = test_server(&dir);

        let response = server
            .router()
            .oneshot(get("/genre/edit/42"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/genre/index");
    }

    #[tokio::test]
    async fn genre_edit_with_malformed_id_is_bad_request() {
        let dir = TempDir::new().unwrap();
        let server = test_server(&dir);

        let response = server
            .router()
            .oneshot(form_post("/genre/edit", "genreId=abc&Name=Drama"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn genre_delete_removes_the_record() {
        let dir = TempDir::new().unwrap();
        let server = test_server(&dir);
        server
            .state
            .genres
            .upsert(Genre::new(NEW_RECORD_ID, "Drama"))
            .unwrap();

        let response = server
            .router()
            .oneshot(form_post("/genre/delete", "GenreId=1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(server.state.genres.load_all().unwrap().is_empty());
    }

    #[tokio::test]
    async fn series_create_persists_all_fields() {
        let dir = TempDir::new().unwrap();
        let server = test_server(&dir);

        let response = server
            .router()
            .oneshot(form_post(
                "/series/create",
                "Name=Star+Trek&FrontPage=https%3A%2F%2Fexample.com%2Fst.jpg\
                 &YoutubeLink=https%3A%2F%2Fyoutu.be%2Fx&GenreId=1",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/series/index");

        let all = server.state.series.load_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Star Trek");
        assert_eq!(all[0].front_page, "https://example.com/st.jpg");
        assert_eq!(all[0].youtube_link, "https://youtu.be/x");
        assert_eq!(all[0].genre_id, 1);
    }

    #[tokio::test]
    async fn series_index_resolves_genre_names() {
        let dir = TempDir::new().unwrap();
        let server = test_server(&dir);
        server
            .state
            .genres
            .upsert(Genre::new(NEW_RECORD_ID, "Drama"))
            .unwrap();
        server
            .state
            .series
            .upsert(Series::new(NEW_RECORD_ID, "Star Trek", "img", "yt", 1))
            .unwrap();
        server
            .state
            .series
            .upsert(Series::new(NEW_RECORD_ID, "Lost Tape", "img", "yt", 99))
            .unwrap();

        let response = server.router().oneshot(get("/series/index")).await.unwrap();
        let body = body_string(response).await;
        assert!(body.contains("Drama"));
        assert!(body.contains("Unknown"));
    }

    #[tokio::test]
    async fn home_filters_by_name_and_genre() {
        let dir = TempDir::new().unwrap();
        let server = test_server(&dir);
        let store = &server.state.series;
        store
            .upsert(Series::new(NEW_RECORD_ID, "Star Trek", "img", "yt", 1))
            .unwrap();
        store
            .upsert(Series::new(NEW_RECORD_ID, "Stranger Things", "img", "yt", 1))
            .unwrap();
        store
            .upsert(Series::new(NEW_RECORD_ID, "Comedy Show", "img", "yt", 2))
            .unwrap();

        let response = server
            .router()
            .oneshot(get("/?name=Star&genreId=1"))
            .await
            .unwrap();
        let body = body_string(response).await;
        assert!(body.contains("Star Trek"));
        assert!(!body.contains("Comedy Show"));

        let response = server
            .router()
            .oneshot(get("/?name=Star&genreId=2"))
            .await
            .unwrap();
        let body = body_string(response).await;
        assert!(body.contains("No hay ninguna serie registrada"));
    }

    #[tokio::test]
    async fn home_with_malformed_genre_query_is_bad_request() {
        let dir = TempDir::new().unwrap();
        let server = test_server(&dir);

        let response = server
            .router()
            .oneshot(get("/?genreId=abc"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn filter_form_redirects_with_query_string() {
        let dir = TempDir::new().unwrap();
        let server = test_server(&dir);

        let response = server
            .router()
            .oneshot(form_post("/home/filter", "Name=Star&GenreId=1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/home?name=Star&genreId=1");
    }

    #[tokio::test]
    async fn unknown_route_renders_the_404_page() {
        let dir = TempDir::new().unwrap();
        let server = test_server(&dir);

        let response = server.router().oneshot(get("/no-such-page")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_string(response).await;
        assert!(body.contains("Error 404"));
    }

    #[tokio::test]
    async fn corrupt_document_answers_internal_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("genre.json"), b"{not json").unwrap();
        let server = test_server(&dir);

        let response = server.router().oneshot(get("/genre/index")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
