//! Client for the Gemini generateContent REST API.
//!
//! One logical request walks a fixed priority list of models. Transient
//! failures retry the same model with exponential backoff; quota failures
//! jump straight to the next model; the first success wins.

use reqwest;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{env, fmt, time::Duration};

use crate::models::plan::TripPlanResponse;

use super::retry::{FailureKind, FallbackSequencer, NextStep, RetryPolicy};
use super::schema::response_schema;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Priority order, best candidate first. Mirrors the fallback order probed
/// against the live API.
pub const MODEL_PRIORITY: [&str; 5] = [
    "gemini-3-flash-preview",
    "gemini-2.0-flash-001",
    "gemini-2.0-flash-lite-001",
    "gemini-1.5-flash",
    "gemini-1.5-pro",
];

#[derive(Debug)]
pub enum PlanError {
    /// Missing or blank API key. Carries a remediation hint for the UI.
    Configuration(String),
    /// Every model in the priority list failed; holds the last failure.
    Exhausted {
        models_tried: usize,
        last_error: String,
    },
    HttpError(reqwest::Error),
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            PlanError::Exhausted {
                models_tried,
                last_error,
            } => write!(
                f,
                "All {} models exhausted. Last error: {}",
                models_tried, last_error
            ),
            PlanError::HttpError(err) => write!(f, "HTTP error: {}", err),
        }
    }
}

impl std::error::Error for PlanError {}

impl From<reqwest::Error> for PlanError {
    fn from(err: reqwest::Error) -> Self {
        PlanError::HttpError(err)
    }
}

/// One failed attempt, classified for the sequencer.
#[derive(Debug)]
struct AttemptFailure {
    kind: FailureKind,
    detail: String,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    status: Option<String>,
}

pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
    models: Vec<String>,
    policy: RetryPolicy,
}

impl GeminiClient {
    pub fn new() -> Result<Self, PlanError> {
        let api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                PlanError::Configuration(
                    "GEMINI_API_KEY is not set. Add it to the environment or a .env file to \
                     enable trip planning."
                        .to_string(),
                )
            })?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            http_client,
            api_key,
            base_url: GEMINI_API_BASE.to_string(),
            models: MODEL_PRIORITY.iter().map(|m| m.to_string()).collect(),
            policy: RetryPolicy::default(),
        })
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_models(mut self, models: Vec<String>) -> Self {
        self.models = models;
        self
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Submit the prompt, walking the model priority list until one model
    /// returns a plan that matches the schema.
    pub async fn generate_trip_plan(&self, prompt: &str) -> Result<TripPlanResponse, PlanError> {
        if self.models.is_empty() {
            return Err(PlanError::Configuration(
                "Model priority list is empty".to_string(),
            ));
        }

        let mut sequencer = FallbackSequencer::new(self.models.len(), self.policy.clone());
        let mut last_failure: Option<AttemptFailure> = None;

        loop {
            let model = &self.models[sequencer.current_model()];
            sequencer.begin_attempt();
            println!(
                "Requesting trip plan from {} (attempt {})",
                model,
                sequencer.attempt_number()
            );

            let failure = match self.attempt_generate(model, prompt).await {
                Ok(plan) => return Ok(plan),
                Err(failure) => failure,
            };

            eprintln!(
                "Model {} attempt {} failed: {}",
                model,
                sequencer.attempt_number(),
                failure.detail
            );

            let step = sequencer.after_failure(failure.kind);
            last_failure = Some(failure);

            match step {
                NextStep::RetryAfter(delay) => tokio::time::sleep(delay).await,
                NextStep::AdvanceModel(_) => {}
                NextStep::GiveUp => {
                    return Err(PlanError::Exhausted {
                        models_tried: self.models.len(),
                        last_error: last_failure
                            .map(|f| f.detail)
                            .unwrap_or_else(|| "unknown error".to_string()),
                    });
                }
            }
        }
    }

    /// A single outbound call: POST the prompt with the structured-output
    /// contract, then parse the candidate text as a trip plan.
    async fn attempt_generate(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<TripPlanResponse, AttemptFailure> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: response_schema(),
            },
        };

        let response = self
            .http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AttemptFailure {
                kind: FailureKind::Other,
                detail: format!("request failed: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AttemptFailure {
                kind: classify_failure(status.as_u16(), &body),
                detail: format!("{} from {}: {}", status.as_u16(), model, body),
            });
        }

        let envelope: GenerateContentResponse =
            response.json().await.map_err(|e| AttemptFailure {
                kind: FailureKind::Other,
                detail: format!("failed to parse response envelope: {}", e),
            })?;

        let text = envelope
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| AttemptFailure {
                kind: FailureKind::Other,
                detail: "no candidates in response".to_string(),
            })?;

        serde_json::from_str::<TripPlanResponse>(&text).map_err(|e| AttemptFailure {
            kind: FailureKind::Other,
            detail: format!("response did not match the trip plan schema: {}", e),
        })
    }
}

/// 503-class failures retry; 429-class and quota messages jump models;
/// everything else advances to the next model. Quota problems normally
/// arrive as a 429, but can also surface only in the error message.
pub fn classify_failure(status: u16, body: &str) -> FailureKind {
    if status == 503 {
        return FailureKind::Transient;
    }
    if status == 429 {
        return FailureKind::Quota;
    }

    let message = serde_json::from_str::<ApiErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .map(|error| {
            let mut parts = Vec::new();
            if let Some(status) = error.status {
                parts.push(status);
            }
            if let Some(message) = error.message {
                parts.push(message);
            }
            parts.join(" ")
        })
        .unwrap_or_else(|| body.to_string());
    let lowered = message.to_lowercase();

    if lowered.contains("quota") || lowered.contains("resource_exhausted") {
        FailureKind::Quota
    } else if lowered.contains("unavailable") || lowered.contains("overloaded") {
        FailureKind::Transient
    } else {
        FailureKind::Other
    }
}
