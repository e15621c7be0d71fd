//! Documentation Routes
//!
//! Defines routes for the viewer, mounted under the configured prefix.

use crate::handlers;
use crate::AppState;
use axum::{response::Redirect, routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the documentation router
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let prefix = state.config.mount_prefix();
    let base = prefix.clone().unwrap_or_default();
    let path = |suffix: &str| format!("{}{}", base, suffix);

    let mut router = Router::new()
        // Page routes
        .route(&path("/"), get(handlers::index))
        .route(&path("/index"), get(handlers::index))
        .route(&path("/index.html"), get(handlers::index))
        .route(&path("/swagger-initializer.js"), get(handlers::initializer))
        .route(&path("/index.css"), get(handlers::stylesheet))
        .route(&path("/oauth2-redirect.html"), get(handlers::oauth2_redirect))
        // Health check
        .route(&path("/health"), get(handlers::health))
        // Definition files and embedded assets
        .route(&path("/*path"), get(handlers::document));

    // Relative URLs in the page only resolve below the trailing slash
    if let Some(prefix) = prefix {
        let target = format!("{}/", prefix);
        router = router.route(
            &prefix,
            get(move || {
                let target = target.clone();
                async move { Redirect::to(&target) }
            }),
        );
    }

    router
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use apidoc_common::types::{DefinitionUrl, OAuthConfig};
    use apidoc_common::SwaggerUiConfig;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn docs_dir() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let docs = temp_dir.path().join("docs");
        std::fs::create_dir_all(docs.join("v1")).unwrap();
        std::fs::write(docs.join("v1/openapi.json"), br#"{"openapi":"3.0.3"}"#).unwrap();
        std::fs::write(docs.join("index.html"), "<html>custom page</html>").unwrap();
        std::fs::write(temp_dir.path().join("secret.json"), b"{}").unwrap();
        temp_dir
    }

    async fn app(config: SwaggerUiConfig) -> Router {
        let state = AppState::new(config).await.unwrap();
        create_router(state)
    }

    async fn send_get(app: Router, uri: &str) -> Response {
        let req = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        app.oneshot(req).await.unwrap()
    }

    async fn body_string(res: Response) -> String {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn content_type(res: &Response) -> String {
        res.headers()
            .get(header::CONTENT_TYPE)
            .expect("content-type must be present")
            .to_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_index_is_rendered() {
        let temp_dir = docs_dir();
        let config = SwaggerUiConfig::default()
            .with_doc_dir(temp_dir.path().join("docs"))
            .with_title("Pets");

        for uri in ["/", "/index", "/index.html"] {
            let res = send_get(app(config.clone()).await, uri).await;
            assert_eq!(res.status(), StatusCode::OK, "{}", uri);
            assert!(content_type(&res).starts_with("text/html"));

            let html = body_string(res).await;
            assert!(html.contains("<title>Pets</title>"));
            assert!(html.contains(r#"<div id="swagger-ui"></div>"#));
        }
    }

    #[tokio::test]
    async fn test_initializer_lists_discovered_definitions() {
        let temp_dir = docs_dir();
        let config = SwaggerUiConfig::default().with_doc_dir(temp_dir.path().join("docs"));

        let res = send_get(app(config).await, "/swagger-initializer.js").await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(content_type(&res).starts_with("application/javascript"));

        let script = body_string(res).await;
        assert!(script.contains(r#"name: "openapi.json","#));
        assert!(script.contains(r#"url: "v1/openapi.json","#));
    }

    #[tokio::test]
    async fn test_configured_definitions_skip_discovery() {
        let temp_dir = docs_dir();
        let config = SwaggerUiConfig::default()
            .with_doc_dir(temp_dir.path().join("docs"))
            .with_definition_url(DefinitionUrl::new("", "https://example.com/pets.json"))
            .with_oauth(OAuthConfig::new("abc", "r", "Docs"));

        let res = send_get(app(config).await, "/swagger-initializer.js").await;
        let script = body_string(res).await;

        assert!(script.contains(r#"name: "https://example.com/pets.json","#));
        assert!(!script.contains("v1/openapi.json"));
        assert_eq!(script.matches("ui.initOAuth(").count(), 1);
    }

    #[tokio::test]
    async fn test_stylesheet_is_served() {
        let temp_dir = docs_dir();
        let config = SwaggerUiConfig::default().with_doc_dir(temp_dir.path().join("docs"));

        let res = send_get(app(config).await, "/index.css").await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(content_type(&res).starts_with("text/css"));
    }

    #[tokio::test]
    async fn test_definition_file_is_served() {
        let temp_dir = docs_dir();
        let config = SwaggerUiConfig::default().with_doc_dir(temp_dir.path().join("docs"));

        let res = send_get(app(config).await, "/v1/openapi.json").await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(content_type(&res), "application/json");
        assert_eq!(body_string(res).await, r#"{"openapi":"3.0.3"}"#);
    }

    #[tokio::test]
    async fn test_missing_files_are_not_found() {
        let temp_dir = docs_dir();
        let config = SwaggerUiConfig::default().with_doc_dir(temp_dir.path().join("docs"));
        let app = app(config).await;

        let res = send_get(app.clone(), "/v1/missing.json").await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let res = send_get(app, "/logo.png").await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_traversal_is_rejected() {
        let temp_dir = docs_dir();
        let config = SwaggerUiConfig::default().with_doc_dir(temp_dir.path().join("docs"));

        let res = send_get(app(config).await, "/..%2Fsecret.json").await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_oauth2_redirect_page() {
        let temp_dir = docs_dir();
        let config = SwaggerUiConfig::default().with_doc_dir(temp_dir.path().join("docs"));

        let res = send_get(app(config).await, "/oauth2-redirect.html").await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(content_type(&res).starts_with("text/html"));
        assert!(body_string(res).await.contains("swaggerUIRedirectOauth2"));
    }

    #[tokio::test]
    async fn test_only_get_is_allowed() {
        let temp_dir = docs_dir();
        let config = SwaggerUiConfig::default().with_doc_dir(temp_dir.path().join("docs"));

        let req = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::empty())
            .unwrap();
        let res = app(config).await.oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_head_is_answered_like_get() {
        let temp_dir = docs_dir();
        let config = SwaggerUiConfig::default().with_doc_dir(temp_dir.path().join("docs"));
        let app = app(config).await;

        for uri in ["/", "/swagger-initializer.js", "/v1/openapi.json"] {
            let req = Request::builder()
                .method("HEAD")
                .uri(uri)
                .body(Body::empty())
                .unwrap();
            let res = app.clone().oneshot(req).await.unwrap();

            assert_eq!(res.status(), StatusCode::OK, "{}", uri);
            assert!(body_string(res).await.is_empty(), "{}", uri);
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_discovered_symlinked_definitions_are_fetchable() {
        let temp_dir = docs_dir();
        let docs = temp_dir.path().join("docs");
        let external = temp_dir.path().join("external");
        std::fs::create_dir_all(docs.join("shared")).unwrap();
        std::fs::write(docs.join("shared/d.json"), br#"{"openapi":"3.1.0"}"#).unwrap();
        std::fs::create_dir_all(&external).unwrap();
        std::fs::write(external.join("e.json"), b"{}").unwrap();
        std::os::unix::fs::symlink(docs.join("shared"), docs.join("linked")).unwrap();
        std::os::unix::fs::symlink(&external, docs.join("outside")).unwrap();

        let config = SwaggerUiConfig::default().with_doc_dir(&docs);
        let app = app(config).await;

        let script = body_string(send_get(app.clone(), "/swagger-initializer.js").await).await;
        assert!(script.contains(r#"url: "linked/d.json","#));
        assert!(!script.contains("outside/"));

        let res = send_get(app.clone(), "/linked/d.json").await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_string(res).await, r#"{"openapi":"3.1.0"}"#);

        let res = send_get(app, "/outside/e.json").await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_path_prefix() {
        let temp_dir = docs_dir();
        let config = SwaggerUiConfig::default()
            .with_doc_dir(temp_dir.path().join("docs"))
            .with_path_prefix("/api/docs/");
        let app = app(config).await;

        let res = send_get(app.clone(), "/api/docs/").await;
        assert_eq!(res.status(), StatusCode::OK);

        let res = send_get(app.clone(), "/api/docs/v1/openapi.json").await;
        assert_eq!(res.status(), StatusCode::OK);

        let res = send_get(app.clone(), "/api/docs").await;
        assert!(res.status().is_redirection());
        assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/api/docs/");

        let res = send_get(app, "/").await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_disabled_index_template_serves_file() {
        let temp_dir = docs_dir();
        let config = SwaggerUiConfig::default()
            .with_doc_dir(temp_dir.path().join("docs"))
            .with_disable_index_template(true);

        let res = send_get(app(config).await, "/").await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_string(res).await, "<html>custom page</html>");
    }

    #[tokio::test]
    async fn test_health() {
        let temp_dir = docs_dir();
        let config = SwaggerUiConfig::default().with_doc_dir(temp_dir.path().join("docs"));

        let res = send_get(app(config).await, "/health").await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_string(res).await, "OK");
    }
}
