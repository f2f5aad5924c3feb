use reqwest::{Client, ClientBuilder, StatusCode};
use serde::Serialize;
use std::time::Duration;
use crate::error::{AppError, Result};

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const MODEL: &str = "mixtral-8x7b-32768";

/// Low temperature biases the model toward deterministic, literal output.
const TEMPERATURE: f32 = 0.1;

/// Content sent to the model is capped to keep the prompt within the
/// context window. Hard cutoff, may split mid-word.
const MAX_CONTENT_CHARS: usize = 4000;

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    temperature: f32,
    messages: Vec<Message>,
}

/// Scores how well page content matches an expected description by asking a
/// remote model. Holds only credentials and a preconfigured client.
pub struct ContentAnalyzer {
    api_key: String,
    api_url: String,
    client: Client,
}

impl ContentAnalyzer {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_api_url(api_key, GROQ_API_URL)
    }

    /// Points the analyzer at a non-default completion endpoint. Used by
    /// tests to substitute a local stub for the Groq API.
    pub fn with_api_url(api_key: impl Into<String>, api_url: impl Into<String>) -> Self {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("Failed to build HTTP client");

        ContentAnalyzer {
            api_key: api_key.into(),
            api_url: api_url.into(),
            client,
        }
    }

    /// Returns the match score and the model's analysis text. Single call,
    /// no retry, no fallback model.
    pub async fn analyze(&self, content: &str, expected_description: &str) -> Result<(i64, String)> {
        tracing::info!("Analyzing content with length: {}", content.len());

        let prompt = build_prompt(
            truncate_chars(content, MAX_CONTENT_CHARS),
            expected_description,
        );

        let reply = self.complete(&prompt).await?;
        tracing::info!("Received response: {}", reply);

        parse_verdict(&reply)
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: MODEL.into(),
            temperature: TEMPERATURE,
            messages: vec![Message {
                role: "user".into(),
                content: prompt.into(),
            }],
        };

        let res = self.client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::AnalysisError(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let detail = res.text().await.unwrap_or_default();
            return Err(classify_api_failure(status, &detail));
        }

        let json: serde_json::Value = res
            .json()
            .await
            .map_err(|e| AppError::AnalysisError(e.to_string()))?;

        let reply = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| AppError::AnalysisError("Invalid response format from LLM".to_string()))?
            .to_string();

        Ok(reply)
    }
}

fn classify_api_failure(status: StatusCode, detail: &str) -> AppError {
    if status == StatusCode::UNAUTHORIZED || detail.contains("invalid_api_key") {
        AppError::AuthError
    } else if status == StatusCode::NOT_FOUND || detail.contains("model_not_found") {
        AppError::ModelUnavailable
    } else {
        AppError::AnalysisError(format!("model endpoint returned {}: {}", status, detail))
    }
}

fn build_prompt(content: &str, description: &str) -> String {
    format!(
        "You are a website content analyzer. Compare the following website content \
         with the expected description and:\n\
         1. Determine how well the content matches the description (score 0-100)\n\
         2. Provide a brief analysis explaining the match or mismatch\n\n\
         Website Content: {content}\n\n\
         Expected Description: {description}\n\n\
         Respond in the following format exactly:\n\
         SCORE: [number]\n\
         ANALYSIS: [your analysis]"
    )
}

/// First `max_chars` characters of `text`, whole string if shorter.
fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Parses the model's two-line verdict into `(score, analysis)`.
///
/// The contract is strict and line-positional: line 0 must read
/// `SCORE: <integer>` and line 1 `ANALYSIS: <text>`, each split on the first
/// colon. Any deviation is a `ParseError`.
pub fn parse_verdict(raw: &str) -> Result<(i64, String)> {
    let mut lines = raw.lines();

    let score_line = lines
        .next()
        .ok_or_else(|| AppError::ParseError("empty model response".to_string()))?;
    let analysis_line = lines
        .next()
        .ok_or_else(|| AppError::ParseError("missing analysis line".to_string()))?;

    let (_, score_token) = score_line
        .split_once(':')
        .ok_or_else(|| AppError::ParseError(format!("malformed score line: {:?}", score_line)))?;
    let score = score_token
        .trim()
        .parse::<i64>()
        .map_err(|_| AppError::ParseError(format!("non-numeric score: {:?}", score_token.trim())))?;

    let (_, analysis) = analysis_line
        .split_once(':')
        .ok_or_else(|| AppError::ParseError(format!("malformed analysis line: {:?}", analysis_line)))?;

    Ok((score, analysis.trim().to_string()))
}
