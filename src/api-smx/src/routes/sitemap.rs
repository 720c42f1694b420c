use std::sync::{Arc, LazyLock};

use axum::{
    Json,
    extract::{Request, State},
    http::{Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use core_smx::{SitemapError, SitemapService};
use regex::Regex;
use tracing::debug;

/// `/sitemap.xml`, `/sitemap-0.xml`, `/sitemap-1.xml`, ...
static SITEMAP_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/sitemap(-\d+)?\.xml$").expect("sitemap path pattern is a valid regex"));

/// True if `path` has the shape of a sitemap document path.
pub fn is_sitemap_path(path: &str) -> bool {
    SITEMAP_PATH.is_match(path)
}

/// Middleware that answers sitemap requests from the service's current documents.
///
/// Requests that don't look like a sitemap pass straight through without touching
/// the cache. Sitemap-shaped paths with no matching document (e.g. a chunk that no
/// longer exists) also pass through, so the next handler decides what "not found" means.
///
/// Only `GET` and `HEAD` are answered; any other method reaches the wrapped router untouched.
pub async fn serve_sitemaps(
    State(service): State<Arc<SitemapService>>,
    request: Request,
    next: Next,
) -> Result<Response, SitemapFailure> {
    let path = request.uri().path().to_string();

    if !matches!(*request.method(), Method::GET | Method::HEAD) || !is_sitemap_path(&path) {
        return Ok(next.run(request).await);
    }

    match service.lookup(&path).await? {
        Some(xml) => {
            debug!(path = %path, bytes = xml.len(), "Serving sitemap");
            Ok((StatusCode::OK, [(header::CONTENT_TYPE, "application/xml")], xml).into_response())
        }
        None => {
            debug!(path = %path, "No such sitemap document, passing request through");
            Ok(next.run(request).await)
        }
    }
}

/// A sitemap request that failed because the documents could not be built.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct SitemapFailure(#[from] SitemapError);

impl IntoResponse for SitemapFailure {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "Failed to build sitemaps");
        let body = Json(serde_json::json!({
            "error": self.0.to_string()
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
