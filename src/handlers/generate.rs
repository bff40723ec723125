use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::error::PipelineError;
use crate::prompt::build_future_city_prompt;
use crate::state::AppState;
use crate::utils::timing::log_stage_timing;

const IMAGE_FIELD: &str = "image";

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub description: String,
    pub tags: Vec<String>,
    /// The prompt as rewritten by the generation service.
    pub prompt: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

/// POST /generate - reimagine an uploaded city photo as a futuristic city.
///
/// Runs the full pipeline sequentially: analyze the upload, build the
/// future-city prompt, generate the new image. Any client failure surfaces
/// through `PipelineError`'s response mapping.
pub async fn generate_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<GenerateResponse>, PipelineError> {
    let image = read_image_field(multipart).await?;

    let analysis = log_stage_timing("vision", "analyze", || state.vision.analyze(image)).await?;
    let prompt = build_future_city_prompt(&analysis.description, &analysis.tags);
    let generation = log_stage_timing("generation", "images_generations", || {
        state.generation.generate(&prompt)
    })
    .await?;

    info!(
        "Generated future city image from {} tag(s), description: {}",
        analysis.tags.len(),
        analysis.description
    );

    Ok(Json(GenerateResponse {
        description: analysis.description,
        tags: analysis.tags,
        prompt: generation.revised_prompt,
        image_url: generation.image_url,
    }))
}

/// Finds the `image` form field and reads it fully. A request without one,
/// or with a form body that cannot be read, is a client error.
async fn read_image_field(mut multipart: Multipart) -> Result<Vec<u8>, PipelineError> {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some(IMAGE_FIELD) {
            return match field.bytes().await {
                Ok(bytes) => Ok(bytes.to_vec()),
                Err(_) => Err(PipelineError::MissingImage),
            };
        }
    }

    Err(PipelineError::MissingImage)
}
