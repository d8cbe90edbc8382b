//! OpenAI-compatible classifier implementation
//!
//! Talks to any endpoint exposing the `/chat/completions` API (OpenAI,
//! Azure OpenAI, local gateways). The request carries only masked sample
//! fingerprints, and the model is asked for a JSON object mapping PII paths
//! to uppercase labels.

use super::PathClassifier;
use crate::config::{ClassifierConfig, RetryConfig};
use crate::core::{PiiConfig, SchemaReport};
use crate::domain::{ClassifierError, Result, ShroudError};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// System prompt describing the masking scheme and the expected output shape.
const SYSTEM_PROMPT: &str = r#"You are a Data Privacy and PII (Personally Identifiable Information) detection expert.
Your goal is to analyze a list of JSON paths and their sample values to identify which ones contain PII.

The sample values have been masked:
- Letters are replaced with 'L'
- Digits are replaced with 'D'
- Punctuation and other characters are preserved.

Input Format:
A JSON list of objects, each containing "path" and "samples".

Output Format:
Return ONLY a valid JSON object (no markdown formatting, no explanations).
The keys must be the exact paths from the input that contain PII.
The values must be the specific PII type (uppercase string).

Common PII Types to detect:
- FULL_NAME (e.g., "LLLLL LLL L.")
- EMAIL
- PHONE
- PASSPORT_NUMBER, PASSPORT_SERIES
- INN (Tax ID), KPP, OGRN (Company IDs)
- DATE_OF_BIRTH, DATE_OF_ISSUE, DOCUMENT_DATE
- ADDRESS
- CREDIT_CARD
- IP_ADDRESS

You may invent new PII types if none of the above fit (e.g. DRIVER_LICENSE, SOCIAL_MEDIA_HANDLE), but prefer standard ones if possible.

If a path does not contain PII (e.g., boolean flags, internal IDs, timestamps, types), DO NOT include it in the output.
"#;

/// OpenAI-compatible classifier
///
/// # Example
///
/// ```no_run
/// use shroud::classifier::{OpenAiClassifier, PathClassifier};
/// use shroud::config::ClassifierConfig;
///
/// # async fn example(report: &shroud::core::SchemaReport) -> shroud::domain::Result<()> {
/// let config = ClassifierConfig::default();
/// let classifier = OpenAiClassifier::new(config)?;
/// let pii_config = classifier.classify(report).await?;
/// # Ok(())
/// # }
/// ```
pub struct OpenAiClassifier {
    /// Base URL of the API, including the version segment (e.g. `.../v1`)
    base_url: String,

    /// HTTP client for making requests
    client: Client,

    /// Classifier configuration
    config: ClassifierConfig,
}

impl OpenAiClassifier {
    /// Create a new classifier instance from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                ShroudError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            base_url,
            client,
            config,
        })
    }

    /// Get the base URL of the classifier endpoint
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the chat completion request body for a schema report
    fn build_request(&self, report: &SchemaReport) -> Result<ChatCompletionRequest> {
        let report_json = serde_json::to_string_pretty(report)
            .map_err(|e| ShroudError::Serialization(e.to_string()))?;

        let user_prompt = format!(
            "Analyze these paths and samples and generate the PII configuration JSON:\n\n{report_json}\n"
        );

        Ok(ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt,
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object".to_string(),
            },
            temperature: self.config.temperature,
        })
    }

    /// Send the request once, mapping HTTP failures to classifier errors
    async fn send_request(&self, request: &ChatCompletionRequest) -> Result<ChatCompletionResponse> {
        let url = format!("{}/chat/completions", self.base_url);

        let mut http_request = self.client.post(&url).json(request);

        if let Some(ref api_key) = self.config.api_key {
            let key: &str = api_key.expose_secret().as_ref();
            http_request = http_request.bearer_auth(key);
        }

        let resp = http_request.send().await.map_err(|e| {
            if e.is_timeout() {
                ShroudError::Classifier(ClassifierError::Timeout(e.to_string()))
            } else {
                ShroudError::Classifier(ClassifierError::ConnectionFailed(e.to_string()))
            }
        })?;

        match resp.status() {
            StatusCode::OK => resp.json::<ChatCompletionResponse>().await.map_err(|e| {
                ShroudError::Classifier(ClassifierError::InvalidResponse(e.to_string()))
            }),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let body = resp.text().await.unwrap_or_default();
                Err(ShroudError::Classifier(
                    ClassifierError::AuthenticationFailed(body),
                ))
            }
            status if status.is_server_error() => {
                let body = resp.text().await.unwrap_or_default();
                Err(ShroudError::Classifier(ClassifierError::ServerError {
                    status: status.as_u16(),
                    message: body,
                }))
            }
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(ShroudError::Classifier(ClassifierError::ClientError {
                    status: status.as_u16(),
                    message: body,
                }))
            }
        }
    }

    /// Retry a request with exponential backoff
    ///
    /// Authentication and other 4xx failures are returned immediately.
    async fn retry_request<F, T, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let max_retries = self.config.retry.max_retries;
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    attempt += 1;
                    if attempt >= max_retries || !is_retryable(&e) {
                        return Err(e);
                    }

                    let delay_ms = backoff_delay_ms(&self.config.retry, attempt);

                    tracing::warn!(
                        attempt = attempt,
                        max_retries = max_retries,
                        delay_ms = delay_ms,
                        error = %e,
                        "Retrying classifier request after error"
                    );

                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }
}

/// Exponential backoff delay for a retry attempt, capped at `max_delay_ms`.
/// Computed in floating point so fractional multipliers grow the delay.
fn backoff_delay_ms(retry: &RetryConfig, attempt: usize) -> u64 {
    let exponent = attempt.saturating_sub(1) as f64;
    let delay = retry.initial_delay_ms as f64 * retry.backoff_multiplier.powf(exponent);
    (delay as u64).min(retry.max_delay_ms)
}

/// Whether a failed request is worth retrying
fn is_retryable(error: &ShroudError) -> bool {
    matches!(
        error,
        ShroudError::Classifier(
            ClassifierError::ConnectionFailed(_)
                | ClassifierError::ServerError { .. }
                | ClassifierError::Timeout(_)
        )
    )
}

#[async_trait]
impl PathClassifier for OpenAiClassifier {
    async fn classify(&self, report: &SchemaReport) -> Result<PiiConfig> {
        let request = self.build_request(report)?;

        tracing::info!(
            model = %self.config.model,
            path_count = report.len(),
            "Requesting PII classification"
        );

        let response = self.retry_request(|| self.send_request(&request)).await?;

        let content = response
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or_else(|| {
                ShroudError::Classifier(ClassifierError::InvalidResponse(
                    "Response contained no choices".to_string(),
                ))
            })?;

        let value: serde_json::Value = serde_json::from_str(content).map_err(|e| {
            ShroudError::Classifier(ClassifierError::InvalidResponse(format!(
                "Model output is not valid JSON: {e}"
            )))
        })?;

        let pii_config = PiiConfig::from_value(value)?;

        tracing::info!(
            labeled_paths = pii_config.len(),
            "Classification complete"
        );

        Ok(pii_config)
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

/// Chat completion request body
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
    temperature: f64,
}

/// A single chat message
#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Response format constraint (`json_object` forces parseable output)
#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

/// Chat completion response body
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use crate::core::SchemaAnalyzer;

    fn test_config(base_url: String) -> ClassifierConfig {
        ClassifierConfig {
            base_url,
            api_key: Some(secret_string("test-key")),
            ..Default::default()
        }
    }

    fn sample_report() -> SchemaReport {
        let document = serde_json::json!({
            "user": {"email": "anna@example.com", "active": true}
        });
        SchemaAnalyzer::new().analyze(&document).unwrap()
    }

    #[test]
    fn test_backoff_delay_grows_with_fractional_multiplier() {
        let retry = RetryConfig {
            max_retries: 5,
            initial_delay_ms: 1000,
            max_delay_ms: 60_000,
            backoff_multiplier: 1.5,
        };

        assert_eq!(backoff_delay_ms(&retry, 1), 1000);
        assert_eq!(backoff_delay_ms(&retry, 2), 1500);
        assert_eq!(backoff_delay_ms(&retry, 3), 2250);
    }

    #[test]
    fn test_backoff_delay_capped_at_max() {
        let retry = RetryConfig {
            max_retries: 5,
            initial_delay_ms: 1000,
            max_delay_ms: 1800,
            backoff_multiplier: 2.0,
        };

        assert_eq!(backoff_delay_ms(&retry, 2), 1800);
    }

    #[test]
    fn test_classifier_creation() {
        let config = test_config("https://api.openai.com/v1/".to_string());
        let classifier = OpenAiClassifier::new(config).unwrap();

        // Trailing slash is normalized away
        assert_eq!(classifier.base_url(), "https://api.openai.com/v1");
        assert_eq!(classifier.model(), "gpt-4o");
    }

    #[test]
    fn test_build_request_includes_masked_samples() {
        let config = test_config("https://api.openai.com/v1".to_string());
        let classifier = OpenAiClassifier::new(config).unwrap();

        let request = classifier.build_request(&sample_report()).unwrap();

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert_eq!(request.messages[1].role, "user");
        assert_eq!(request.response_format.format_type, "json_object");

        // Fingerprints, not raw values, go to the model
        let user_content = &request.messages[1].content;
        assert!(user_content.contains("user.email"));
        assert!(user_content.contains("LLLL@LLLLLLL.LLL"));
        assert!(!user_content.contains("anna@example.com"));
    }

    #[tokio::test]
    async fn test_classify_success() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "choices": [{
                        "message": {
                            "role": "assistant",
                            "content": "{\"user.email\": \"EMAIL\"}"
                        }
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let classifier = OpenAiClassifier::new(test_config(server.url())).unwrap();
        let pii_config = classifier.classify(&sample_report()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(pii_config.label_for("user.email"), Some("EMAIL"));
        assert_eq!(pii_config.label_for("user.active"), None);
    }

    #[tokio::test]
    async fn test_classify_authentication_failure_is_not_retried() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body("invalid api key")
            .expect(1)
            .create_async()
            .await;

        let classifier = OpenAiClassifier::new(test_config(server.url())).unwrap();
        let result = classifier.classify(&sample_report()).await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(ShroudError::Classifier(
                ClassifierError::AuthenticationFailed(_)
            ))
        ));
    }

    #[tokio::test]
    async fn test_classify_retries_server_errors() {
        let mut server = mockito::Server::new_async().await;

        let failing = server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .with_body("upstream unavailable")
            .expect(3)
            .create_async()
            .await;

        let mut config = test_config(server.url());
        config.retry.initial_delay_ms = 1;
        config.retry.max_delay_ms = 2;

        let classifier = OpenAiClassifier::new(config).unwrap();
        let result = classifier.classify(&sample_report()).await;

        failing.assert_async().await;
        assert!(matches!(
            result,
            Err(ShroudError::Classifier(ClassifierError::ServerError {
                status: 500,
                ..
            }))
        ));
    }

    #[tokio::test]
    async fn test_classify_rejects_non_json_content() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!({
                    "choices": [{
                        "message": {"role": "assistant", "content": "not json"}
                    }]
                })
                .to_string(),
            )
            .create_async()
            .await;

        let classifier = OpenAiClassifier::new(test_config(server.url())).unwrap();
        let result = classifier.classify(&sample_report()).await;

        assert!(matches!(
            result,
            Err(ShroudError::Classifier(ClassifierError::InvalidResponse(_)))
        ));
    }
}
