use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tracing::debug;

use crate::config::Config;
use crate::error::PipelineError;
use crate::utils::http::get_http_client;

use super::{summarize_error_body, truncate_for_log};

// The service always requests a single 1024x1024 image.
const IMAGE_COUNT: u32 = 1;
const IMAGE_SIZE: &str = "1024x1024";
const RESPONSE_LOG_LIMIT: usize = 2000;

#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub revised_prompt: String,
    pub image_url: String,
}

#[derive(Debug, Clone)]
pub struct GenerationClient {
    config: Arc<Config>,
}

impl GenerationClient {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Submits the prompt to the configured deployment and returns the
    /// hosted image URL plus the prompt as the service rewrote it. Single
    /// attempt; generation is slow, so the shared client timeout is widened
    /// for this request only.
    pub async fn generate(&self, prompt: &str) -> Result<GenerationResult, PipelineError> {
        let url = format!(
            "{}openai/deployments/{}/images/generations",
            self.config.generation_endpoint, self.config.generation_deployment
        );
        let body = json!({
            "prompt": prompt,
            "n": IMAGE_COUNT,
            "size": IMAGE_SIZE,
        });

        let response = get_http_client()
            .post(&url)
            .query(&[("api-version", self.config.generation_api_version.as_str())])
            .header("api-key", &self.config.generation_key)
            .timeout(Duration::from_secs(self.config.generation_timeout_secs))
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                PipelineError::Transport(format!("Generation request failed: {err}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::Transport(format!(
                "Generation request failed with status {}: {}",
                status,
                summarize_error_body(&body)
            )));
        }

        let payload = response.json::<Value>().await.map_err(|err| {
            PipelineError::UnexpectedFormat(format!(
                "Generation response could not be parsed: {err}"
            ))
        })?;

        if tracing::enabled!(tracing::Level::DEBUG) {
            debug!(
                "Generation response: {}",
                truncate_for_log(&payload.to_string(), RESPONSE_LOG_LIMIT)
            );
        }

        extract_generation(&payload)
    }
}

fn extract_generation(payload: &Value) -> Result<GenerationResult, PipelineError> {
    let data = payload.get("data").ok_or_else(|| {
        PipelineError::UnexpectedFormat(
            "Unexpected response format: 'data' key not found".to_string(),
        )
    })?;

    let first = data
        .as_array()
        .and_then(|items| items.first())
        .ok_or_else(|| {
            PipelineError::UnexpectedFormat(
                "Unexpected response format: 'data' contains no images".to_string(),
            )
        })?;

    let revised_prompt = first
        .get("revised_prompt")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            PipelineError::UnexpectedFormat(
                "Unexpected response format: 'revised_prompt' missing from image data".to_string(),
            )
        })?;

    let image_url = first.get("url").and_then(Value::as_str).ok_or_else(|| {
        PipelineError::UnexpectedFormat(
            "Unexpected response format: 'url' missing from image data".to_string(),
        )
    })?;

    Ok(GenerationResult {
        revised_prompt: revised_prompt.to_string(),
        image_url: image_url.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_image_entry() {
        let payload = json!({
            "data": [
                {"revised_prompt": "P2", "url": "http://img/1.png"},
                {"revised_prompt": "P3", "url": "http://img/2.png"}
            ]
        });
        let result = extract_generation(&payload).unwrap();
        assert_eq!(result.revised_prompt, "P2");
        assert_eq!(result.image_url, "http://img/1.png");
    }

    #[test]
    fn fails_when_data_key_is_absent() {
        let payload = json!({"created": 1700000000});
        let err = extract_generation(&payload).unwrap_err();
        assert!(err.to_string().contains("'data' key not found"));
    }

    #[test]
    fn fails_when_data_is_empty() {
        let payload = json!({"data": []});
        let err = extract_generation(&payload).unwrap_err();
        assert!(err.to_string().contains("contains no images"));
    }

    #[test]
    fn fails_when_url_is_missing() {
        let payload = json!({"data": [{"revised_prompt": "P2"}]});
        let err = extract_generation(&payload).unwrap_err();
        assert!(err.to_string().contains("'url' missing"));
    }

    #[test]
    fn fails_when_revised_prompt_is_missing() {
        let payload = json!({"data": [{"url": "http://img/1.png"}]});
        let err = extract_generation(&payload).unwrap_err();
        assert!(err.to_string().contains("'revised_prompt' missing"));
    }
}
