//! Documentation Handlers
//!
//! Request handlers for the viewer page and the files it loads.

use crate::{AppState, StaticAssets, WebError};
use apidoc_common::Error;
use apidoc_storage::is_definition_file;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

/// Health check handler
pub async fn health() -> impl IntoResponse {
    "OK"
}

/// Viewer page, rendered or served as is from the documentation directory
pub async fn index(State(state): State<AppState>) -> Result<Response, WebError> {
    if state.config.disable_index_template {
        let content = state.storage.read("index.html").await?;
        return Ok(Html(content).into_response());
    }

    let html = state.renderer.render_index(&state.config)?;
    Ok(Html(html).into_response())
}

/// Script constructing the viewer
pub async fn initializer(State(state): State<AppState>) -> Result<Response, WebError> {
    let script = state.renderer.render_initializer(&state.config)?;

    Ok((
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        script,
    )
        .into_response())
}

/// Page stylesheet
pub async fn stylesheet(State(state): State<AppState>) -> Result<Response, WebError> {
    let css = state.renderer.render_stylesheet(&state.config)?;

    Ok(([(header::CONTENT_TYPE, "text/css; charset=utf-8")], css).into_response())
}

/// OAuth2 redirect target of the viewer's authorization popup
pub async fn oauth2_redirect() -> Response {
    static_file("oauth2-redirect.html").unwrap_or_else(|| StatusCode::NOT_FOUND.into_response())
}

/// Definition files from the documentation directory, other embedded files otherwise
pub async fn document(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response, WebError> {
    if is_definition_file(std::path::Path::new(&path)) {
        let content = state.storage.read(&path).await?;
        let mime = mime_guess::from_path(&path).first_or_octet_stream();

        return Ok(([(header::CONTENT_TYPE, mime.as_ref())], content).into_response());
    }

    static_file(&path).ok_or_else(|| WebError(Error::NotFound(path)))
}

/// Serve an embedded static file
fn static_file(path: &str) -> Option<Response> {
    let content = StaticAssets::get(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    Some(
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, mime.as_ref())],
            content.data.into_owned(),
        )
            .into_response(),
    )
}
