pub mod analyzer;
pub mod api;
pub mod config;
pub mod error;
pub mod scraper;

use std::sync::Arc;
use analyzer::ContentAnalyzer;
use config::Config;
use scraper::WebScraper;

/// Application state shared across handlers. The components hold only
/// configuration and are constructed once at process start.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub scraper: Arc<WebScraper>,
    pub analyzer: Arc<ContentAnalyzer>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let analyzer = ContentAnalyzer::new(config.groq_api_key.clone());
        AppState {
            config: Arc::new(config),
            scraper: Arc::new(WebScraper::new()),
            analyzer: Arc::new(analyzer),
        }
    }
}
