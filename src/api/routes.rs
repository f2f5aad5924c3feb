use axum::{
    routing::{get, post},
    Router,
    extract::{Json, State},
};
use tower_http::cors::{CorsLayer, Any};
use url::Url;

use crate::error::{Result, AppError};
use crate::api::models::{AnalysisRequest, AnalysisResult, ServiceInfo};
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze_handler))
        .route("/", get(root_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

/// Rejects anything that does not parse as an absolute URL with a host.
/// Fails closed before any network activity.
fn validate_url(raw: &str) -> Result<()> {
    match Url::parse(raw) {
        Ok(url) if url.has_host() => Ok(()),
        _ => Err(AppError::InvalidUrl),
    }
}

/// Validate -> fetch -> analyze -> assemble. Each stage either succeeds or
/// fails the whole request; there is no partial result.
async fn analyze_handler(
    State(state): State<AppState>,
    Json(req): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResult>> {
    tracing::info!("Processing request for URL: {}", req.url);

    validate_url(&req.url)?;

    let page = state.scraper.fetch(&req.url).await?;

    let (match_score, analysis) = state
        .analyzer
        .analyze(&page.text, &req.expected_description)
        .await?;

    Ok(Json(AnalysisResult {
        url: req.url,
        title: page.title,
        match_score,
        analysis,
    }))
}

async fn root_handler() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "TrustChecker",
        version: env!("CARGO_PKG_VERSION"),
        description: "AI-powered website content verification system",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_urls() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("http://example.com/path?q=1").is_ok());
    }

    #[test]
    fn rejects_missing_scheme() {
        assert!(matches!(
            validate_url("example.com").unwrap_err(),
            AppError::InvalidUrl
        ));
    }

    #[test]
    fn rejects_empty_string() {
        assert!(matches!(validate_url("").unwrap_err(), AppError::InvalidUrl));
    }

    #[test]
    fn rejects_scheme_without_host() {
        assert!(matches!(
            validate_url("http://").unwrap_err(),
            AppError::InvalidUrl
        ));
        assert!(matches!(
            validate_url("mailto:user@example.com").unwrap_err(),
            AppError::InvalidUrl
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            validate_url("ht!tp://bad host").unwrap_err(),
            AppError::InvalidUrl
        ));
    }
}
