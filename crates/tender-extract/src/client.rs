//! The extraction seam and its HTTP implementation.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tender_config::ExtractionConfig;

use crate::error::ExtractionError;
use crate::http::check_response;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    /// Ask the service for a JSON object reply.
    pub expect_json: bool,
}

/// What came back from the collaborator.
///
/// Failures are values: `ok == false` with `errors` filled in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResponse {
    pub ok: bool,
    /// Parsed reply, when the service returned a JSON object directly.
    #[serde(default)]
    pub json: Option<serde_json::Value>,
    #[serde(default)]
    pub raw_text: String,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl ExtractionResponse {
    #[must_use]
    pub fn success(raw_text: impl Into<String>) -> Self {
        Self {
            ok: true,
            raw_text: raw_text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            errors: vec![error.into()],
            ..Self::default()
        }
    }
}

/// Anything that can answer an extraction request.
pub trait Extractor {
    fn extract(
        &self,
        request: &ExtractionRequest,
    ) -> impl Future<Output = ExtractionResponse> + Send;
}

/// Chat-completions client for OpenAI-compatible APIs.
#[derive(Debug, Clone)]
pub struct HttpExtractor {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl HttpExtractor {
    /// Build a client from the `extraction` config section.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::NotConfigured`] without a base URL and
    /// model, or [`ExtractionError::Http`] if the client cannot be built.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self, ExtractionError> {
        if !config.is_configured() {
            return Err(ExtractionError::NotConfigured);
        }
        let http = reqwest::Client::builder()
            .user_agent("tender/0.1")
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim().to_string(),
            model: config.model.trim().to_string(),
            api_key: config
                .has_api_key()
                .then(|| config.api_key.trim().to_string()),
        })
    }

    /// Chat completions endpoint for the configured base URL.
    #[must_use]
    pub fn endpoint(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.ends_with("/chat/completions") {
            base.to_string()
        } else if base.ends_with("/v1") {
            format!("{base}/chat/completions")
        } else {
            format!("{base}/v1/chat/completions")
        }
    }

    fn body(&self, request: &ExtractionRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system_prompt },
                { "role": "user", "content": request.user_prompt },
            ],
            "temperature": 0.0,
        });
        if request.expect_json {
            body["response_format"] = serde_json::json!({ "type": "json_object" });
        }
        body
    }

    async fn call(&self, request: &ExtractionRequest) -> Result<String, ExtractionError> {
        let mut req = self.http.post(self.endpoint()).json(&self.body(request));
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }
        let resp = check_response(req.send().await?).await?;
        let json: serde_json::Value = resp.json().await?;
        Ok(json["choices"]
            .get(0)
            .and_then(|choice| choice["message"]["content"].as_str())
            .unwrap_or_default()
            .to_string())
    }
}

impl Extractor for HttpExtractor {
    async fn extract(&self, request: &ExtractionRequest) -> ExtractionResponse {
        match self.call(request).await {
            Ok(content) if content.trim().is_empty() => {
                tracing::warn!(model = %self.model, "extraction reply was empty");
                ExtractionResponse::failure("empty reply")
            }
            Ok(content) => {
                let json = serde_json::from_str::<serde_json::Value>(&content)
                    .ok()
                    .filter(serde_json::Value::is_object);
                ExtractionResponse {
                    ok: true,
                    json,
                    raw_text: content,
                    errors: Vec::new(),
                }
            }
            Err(e) => {
                tracing::warn!(model = %self.model, error = %e, "extraction call failed");
                ExtractionResponse::failure(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn config(base_url: &str) -> ExtractionConfig {
        ExtractionConfig {
            base_url: base_url.into(),
            model: "gpt-test".into(),
            ..ExtractionConfig::default()
        }
    }

    #[rstest]
    #[case("http://localhost:1234", "http://localhost:1234/v1/chat/completions")]
    #[case("http://localhost:1234/v1/", "http://localhost:1234/v1/chat/completions")]
    #[case(
        "https://gw.example/v1/chat/completions",
        "https://gw.example/v1/chat/completions"
    )]
    fn endpoint_follows_base_url(#[case] base: &str, #[case] expected: &str) {
        let client = HttpExtractor::from_config(&config(base)).unwrap();
        assert_eq!(client.endpoint(), expected);
    }

    #[test]
    fn unconfigured_is_rejected() {
        let err = HttpExtractor::from_config(&ExtractionConfig::default()).unwrap_err();
        assert!(matches!(err, ExtractionError::NotConfigured));
    }

    #[test]
    fn json_mode_is_requested_only_when_asked() {
        let client = HttpExtractor::from_config(&config("http://localhost")).unwrap();
        let mut request = ExtractionRequest {
            system_prompt: "sys".into(),
            user_prompt: "user".into(),
            expect_json: true,
        };
        let body = client.body(&request);
        assert_eq!(body["response_format"]["type"], "json_object");
        assert_eq!(body["messages"][1]["content"], "user");

        request.expect_json = false;
        assert!(client.body(&request).get("response_format").is_none());
    }

    #[tokio::test]
    async fn unreachable_service_is_a_failed_response() {
        let mut cfg = config("http://127.0.0.1:9");
        cfg.timeout_secs = 2;
        let client = HttpExtractor::from_config(&cfg).unwrap();
        let response = client
            .extract(&ExtractionRequest {
                system_prompt: String::new(),
                user_prompt: "notice".into(),
                expect_json: true,
            })
            .await;
        assert!(!response.ok);
        assert_eq!(response.errors.len(), 1);
    }
}
