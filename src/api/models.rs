use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct AnalysisRequest {
    pub url: String,
    pub expected_description: String,
}

#[derive(Serialize)]
pub struct AnalysisResult {
    pub url: String,
    pub title: String,
    pub match_score: i64,
    pub analysis: String,
}

/// Static descriptor returned by the root endpoint.
#[derive(Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
}
