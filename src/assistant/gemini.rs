use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::TextGenerator;

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Clone, Debug)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            temperature: 0.1,
            timeout: Duration::from_secs(120),
        }
    }
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Blocking client for the `generateContent` REST call.
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            bail!("missing API key (set GOOGLE_API_KEY or pass --api-key)");
        }
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { http, config })
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

fn request_body<'a>(instructions: &'a str, input: &'a str, temperature: f32) -> GenerateRequest<'a> {
    GenerateRequest {
        system_instruction: Content {
            parts: [Part { text: instructions }],
        },
        contents: [Content {
            parts: [Part { text: input }],
        }],
        generation_config: GenerationConfig { temperature },
    }
}

/// Concatenate the text parts of the first candidate.
fn response_text(response: GenerateResponse) -> Result<String> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("model returned no candidates"))?;
    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    if text.is_empty() {
        bail!("model returned an empty candidate");
    }
    Ok(text)
}

impl TextGenerator for GeminiClient {
    fn generate(&self, instructions: &str, input: &str) -> Result<String> {
        let body = request_body(instructions, input, self.config.temperature);
        let response = self
            .http
            .post(self.url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .with_context(|| format!("request to {} failed", self.config.model))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            bail!("{} returned {}: {}", self.config.model, status, detail.trim());
        }
        let parsed: GenerateResponse = response.json().context("malformed model response")?;
        response_text(parsed)
    }
}
