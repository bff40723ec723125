use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::error::PipelineError;
use crate::utils::http::get_http_client;

use super::summarize_error_body;

/// Used when the vision service returns no caption at all.
pub const FALLBACK_DESCRIPTION: &str = "a cityscape";

const ANALYZE_PATH: &str = "vision/v3.2/analyze";
const VISUAL_FEATURES: &str = "Tags,Description";

#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub tags: Vec<String>,
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    #[serde(default)]
    tags: Vec<AnalyzedTag>,
    description: Option<DescriptionBlock>,
}

#[derive(Debug, Deserialize)]
struct AnalyzedTag {
    name: String,
}

#[derive(Debug, Deserialize)]
struct DescriptionBlock {
    #[serde(default)]
    captions: Vec<Caption>,
}

#[derive(Debug, Deserialize)]
struct Caption {
    text: String,
}

#[derive(Debug, Clone)]
pub struct VisionClient {
    config: Arc<Config>,
}

impl VisionClient {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Sends the uploaded bytes to the vision service's analyze endpoint and
    /// extracts tags plus a caption. Tags keep the service's own order with
    /// no deduplication or confidence filtering.
    pub async fn analyze(&self, image: Vec<u8>) -> Result<AnalysisResult, PipelineError> {
        let mime_type = detect_mime_type(&image).unwrap_or_else(|| "unknown".to_string());
        debug!("Analyzing image ({} bytes, {})", image.len(), mime_type);

        let url = format!("{}{}", self.config.vision_endpoint, ANALYZE_PATH);
        let response = get_http_client()
            .post(&url)
            .query(&[("visualFeatures", VISUAL_FEATURES)])
            .header("Ocp-Apim-Subscription-Key", &self.config.vision_key)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(image)
            .send()
            .await
            .map_err(|err| PipelineError::Transport(format!("Vision request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::Transport(format!(
                "Vision request failed with status {}: {}",
                status,
                summarize_error_body(&body)
            )));
        }

        let payload = response.json::<AnalyzeResponse>().await.map_err(|err| {
            PipelineError::UnexpectedFormat(format!("Vision response could not be parsed: {err}"))
        })?;

        Ok(extract_analysis(payload))
    }
}

/// Diagnostic only; uploads are never rejected by content type.
fn detect_mime_type(data: &[u8]) -> Option<String> {
    if data.len() > 12 {
        let ftyp = &data[4..12];
        if ftyp.starts_with(b"ftyp") {
            let brand = &ftyp[4..8];
            if brand == b"heic" || brand == b"heif" || brand == b"hevc" {
                return Some("image/heic".to_string());
            }
        }
    }

    infer::get(data).map(|kind| kind.mime_type().to_string())
}

fn extract_analysis(payload: AnalyzeResponse) -> AnalysisResult {
    let tags = payload.tags.into_iter().map(|tag| tag.name).collect();
    let description = payload
        .description
        .and_then(|block| block.captions.into_iter().next())
        .map(|caption| caption.text)
        .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string());

    AnalysisResult { tags, description }
}
