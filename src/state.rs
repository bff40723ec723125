use std::sync::Arc;

use crate::config::Config;
use crate::services::{GenerationClient, VisionClient};

/// Shared by every request. Everything inside is immutable; requests are
/// fully independent of each other.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub vision: VisionClient,
    pub generation: GenerationClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);
        AppState {
            vision: VisionClient::new(Arc::clone(&config)),
            generation: GenerationClient::new(Arc::clone(&config)),
            config,
        }
    }
}
