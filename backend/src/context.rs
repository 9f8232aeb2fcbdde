use log::{error, info};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::history::{HistoryError, HistoryStore};
use crate::inference::{InferenceError, Model};
use crate::knowledge::KnowledgeBase;

pub const ASSETS_URL: &str = "/assets";
pub const HISTORY_IMAGES_URL: &str = "/history-images";

/// Everything the handlers share, built once at startup and never mutated.
pub struct AppContext {
    model: Result<Model, String>,
    pub knowledge: KnowledgeBase,
    pub history: HistoryStore,
    pub max_upload_bytes: usize,
}

impl AppContext {
    pub fn new(
        model: Result<Model, InferenceError>,
        knowledge: KnowledgeBase,
        history: HistoryStore,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            model: model.map_err(|e| e.to_string()),
            knowledge,
            history,
            max_upload_bytes,
        }
    }

    /// Open the history store and load the model. A model that fails to
    /// load leaves the Detect endpoint answering `ModelUnavailable`.
    pub fn from_config(config: &AppConfig) -> Result<Self, HistoryError> {
        let history = HistoryStore::open(&config.history_dir, config.history_collision)?;

        let model = Model::load(&config.model_path);
        match &model {
            Ok(_) => info!("Model loaded from {}", config.model_path.display()),
            Err(e) => error!(
                "Failed to load model at startup, detection is disabled: {}",
                e
            ),
        }

        Ok(Self::new(
            model,
            KnowledgeBase::builtin(),
            history,
            config.max_upload_bytes,
        ))
    }

    pub fn model(&self) -> Result<&Model, ApiError> {
        self.model
            .as_ref()
            .map_err(|e| ApiError::ModelUnavailable(e.clone()))
    }

    pub fn model_error(&self) -> Option<&str> {
        self.model.as_ref().err().map(String::as_str)
    }
}
