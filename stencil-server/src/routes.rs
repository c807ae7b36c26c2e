use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use http::{StatusCode, Uri};
use serde::Serialize;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{debug, Level};

use stencil::{to_params, ResponseFactory, Response};
use stencil_slo::errors::WithBacktrace;

use crate::AppState;

type HandlerResult = Result<Response, WithBacktrace>;

#[derive(Serialize)]
struct Home {
    title: &'static str,
    version: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct AppRouter;

impl AppRouter {
    pub fn build(state: AppState) -> Router {
        Router::new()
            .route("/", get(Self::home))
            .route("/status/:code", get(Self::status))
            .fallback(Self::not_found)
            .layer(
                TraceLayer::new_for_http().on_response(
                    DefaultOnResponse::new().level(Level::INFO),
                ),
            )
            .with_state(state)
    }

    async fn home(State(state): State<AppState>) -> HandlerResult {
        let params = to_params(&Home {
            title: "stencil",
            version: env!("CARGO_PKG_VERSION"),
        })?;
        state.factory.success("pages::home", &params)
    }

    async fn status(
        State(state): State<AppState>,
        Path(code): Path<u16>,
    ) -> HandlerResult {
        match StatusCode::from_u16(code) {
            Ok(code) => state.factory.create_response(code, ""),
            Err(_) => state
                .factory
                .error(StatusCode::BAD_REQUEST, "Invalid Status Code"),
        }
    }

    async fn not_found(
        State(state): State<AppState>,
        uri: Uri,
    ) -> HandlerResult {
        debug!("no route for {}", uri);
        state.factory.error(StatusCode::NOT_FOUND, "")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use clap::Parser;
    use http::{header::CONTENT_TYPE, Request};
    use stencil::{errors, renderer::{TeraRenderer, TemplateRegistry}};
    use tower::ServiceExt;

    use super::*;
    use crate::{App, AppConfig, SharedRenderer};

    fn router(renderer: SharedRenderer) -> Router {
        let config = AppConfig::parse_from(["server"]);
        let app = App::with_renderer(config, renderer).unwrap();
        AppRouter::build(AppState(Arc::new(app)))
    }

    fn tera_renderer() -> SharedRenderer {
        let mut tera = tera::Tera::default();
        tera.add_raw_templates(vec![
            ("errors/common.html", "error {{ statusCode }}"),
            ("pages/home.html", "<h1>{{ title }} {{ version }}</h1>"),
        ])
        .unwrap();
        Arc::new(TeraRenderer::from_tera(tera))
    }

    async fn call(router: Router, uri: &str) -> (StatusCode, String, String) {
        let resp = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_owned();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, content_type, String::from_utf8(body.to_vec()).unwrap())
    }

    async fn fetch(uri: &str) -> (StatusCode, String, String) {
        call(router(tera_renderer()), uri).await
    }

    #[tokio::test]
    async fn home_page() {
        let (status, content_type, body) = fetch("/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type, "text/html;charset=utf-8");
        assert_eq!(
            body,
            format!("<h1>stencil {}</h1>", env!("CARGO_PKG_VERSION"))
        );
    }

    #[tokio::test]
    async fn unknown_route() {
        let (status, content_type, body) = fetch("/does/not/exist").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(content_type, "text/html;charset=utf-8");
        assert_eq!(body, "error 404");
    }

    #[tokio::test]
    async fn status_route() {
        let (status, _, body) = fetch("/status/204").await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());

        let (status, _, body) = fetch("/status/304").await;
        assert_eq!(status, StatusCode::NOT_MODIFIED);
        assert!(body.is_empty());

        let (status, _, body) = fetch("/status/305").await;
        assert_eq!(status, StatusCode::USE_PROXY);
        assert_eq!(body, "error 305");

        let (status, _, body) = fetch("/status/1000").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "error 400");
    }

    #[tokio::test]
    async fn render_failure_is_json_error() {
        let mut registry = TemplateRegistry::new();
        registry.register_fn("errors::common", |_| {
            Err(errors::render("boom"))
        });

        let (status, content_type, body) =
            call(router(Arc::new(registry)), "/missing").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(content_type, "application/json");
        let payload: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(payload["code"], "1020003");
        assert_eq!(payload["message"], "Could not render template. boom");

        let (status, _, body) =
            call(router(Arc::new(TemplateRegistry::new())), "/").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("Template not found. pages::home"));
    }
}
