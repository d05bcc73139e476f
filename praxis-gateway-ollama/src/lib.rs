#![deny(missing_docs)]
//! Blocking gateway to Ollama's generate API.
//!
//! The kernel calls its gateway from a single-threaded blocking loop, so
//! this client uses reqwest's blocking mode; the HTTP machinery stays
//! internal and no future ever surfaces to the caller.

use praxis_types::{GatewayError, ModelGateway};
use tracing::debug;

/// Default model used when a request does not specify one.
const DEFAULT_MODEL: &str = "llama3.2";

/// Default Ollama API base URL.
const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Client for the Ollama generate API.
///
/// Implements [`ModelGateway`] for use anywhere the kernel accepts a
/// gateway.
///
/// # Example
///
/// ```no_run
/// use praxis_gateway_ollama::OllamaGateway;
///
/// let gateway = OllamaGateway::new()
///     .model("llama3.2")
///     .base_url("http://localhost:11434");
/// ```
pub struct OllamaGateway {
    /// Default model identifier used when the request passes an empty one.
    model: String,
    /// API base URL (override for testing or remote instances).
    base_url: String,
    /// Shared HTTP client.
    client: reqwest::blocking::Client,
}

impl OllamaGateway {
    /// Create a client with sensible defaults.
    ///
    /// Default model: `llama3.2`. Default base URL:
    /// `http://localhost:11434`. No authentication (Ollama is local).
    #[must_use]
    pub fn new() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Override the default model.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API base URL.
    ///
    /// Useful for testing with a local mock server or a remote instance.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Build the generate endpoint URL.
    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }
}

impl Default for OllamaGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelGateway for OllamaGateway {
    /// Send one non-streaming generate request and return the response
    /// text.
    fn generate(&self, model: &str, prompt: &str) -> Result<String, GatewayError> {
        let model = if model.is_empty() {
            self.model.as_str()
        } else {
            model
        };
        let body = request_body(model, prompt);
        let url = self.generate_url();

        debug!(url = %url, model, "sending generate request to Ollama");

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        parse_response(&text)
    }
}

/// Request body for a non-streaming generate call.
fn request_body(model: &str, prompt: &str) -> serde_json::Value {
    serde_json::json!({
        "model": model,
        "prompt": prompt,
        "stream": false,
    })
}

/// Pull the generated text out of a generate API response.
fn parse_response(text: &str) -> Result<String, GatewayError> {
    let json: serde_json::Value =
        serde_json::from_str(text).map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
    json.get("response")
        .and_then(|value| value.as_str())
        .map(str::to_string)
        .ok_or_else(|| GatewayError::InvalidResponse("missing 'response' field".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_is_non_streaming() {
        let body = request_body("llama3.2", "hello");
        assert_eq!(body["model"], "llama3.2");
        assert_eq!(body["prompt"], "hello");
        assert_eq!(body["stream"], false);
    }

    #[test]
    fn generate_url_appends_api_path() {
        let gateway = OllamaGateway::new().base_url("http://example:9999");
        assert_eq!(gateway.generate_url(), "http://example:9999/api/generate");
    }

    #[test]
    fn parse_response_extracts_text() {
        let text = r#"{"model":"llama3.2","response":"hi there","done":true}"#;
        assert_eq!(parse_response(text).unwrap(), "hi there");
    }

    #[test]
    fn parse_response_rejects_missing_field() {
        let err = parse_response(r#"{"done":true}"#).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }

    #[test]
    fn parse_response_rejects_invalid_json() {
        assert!(matches!(
            parse_response("not json"),
            Err(GatewayError::InvalidResponse(_))
        ));
    }

    #[test]
    fn unreachable_endpoint_is_a_network_error() {
        // Port 1 on localhost refuses connections immediately.
        let gateway = OllamaGateway::new().base_url("http://127.0.0.1:1");
        let err = gateway.generate("", "hello").unwrap_err();
        assert!(matches!(err, GatewayError::Network(_)));
    }
}
