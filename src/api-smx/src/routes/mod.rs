use axum::{
    Router,
    http::{StatusCode, Uri},
    middleware,
    routing::get,
};
use core_smx::SitemapService;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod logging_middleware;
pub mod sitemap;

pub use sitemap::{SitemapFailure, is_sitemap_path, serve_sitemaps};

//
// Router
//

/// The sitemap server: sitemap documents, a health check, and 404 for everything else.
pub fn router(service: Arc<SitemapService>) -> Router {
    let routes = Router::new()
        .route("/health", get(health_check))
        .fallback(not_found);

    with_sitemaps(routes, service)
        // Custom route access logging
        .layer(middleware::from_fn(logging_middleware::log_route_access))
        // Tracing middleware
        .layer(TraceLayer::new_for_http())
}

/// Puts the sitemap middleware in front of every route of an existing router.
pub fn with_sitemaps<S>(router: Router<S>, service: Arc<SitemapService>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(service, serve_sitemaps))
}

pub async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "healthy")
}

async fn not_found(uri: Uri) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("No route for {}", uri.path()))
}
