use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};
use uuid::Uuid;

use super::error::QuizError;
use crate::openrouter::OpenRouterClient;
use crate::prompt::{select_prompt, QuizParams};
use crate::storage::entities::generated_quizzes;
use crate::storage::{ConfigStorage, QuizStorage};

/// Model invoked when no default row exists in the models table.
pub const FALLBACK_MODEL: &str = "gpt-3.5-turbo";

/// Coordinates one quiz generation: prompt selection, config lookup,
/// completion call, persistence.
pub struct QuizService {
    config: Arc<dyn ConfigStorage>,
    quizzes: Arc<dyn QuizStorage>,
    openrouter: Arc<OpenRouterClient>,
}

impl QuizService {
    pub fn new(
        config: Arc<dyn ConfigStorage>,
        quizzes: Arc<dyn QuizStorage>,
        openrouter: Arc<OpenRouterClient>,
    ) -> Self {
        Self {
            config,
            quizzes,
            openrouter,
        }
    }

    /// Generate a quiz for an already-authenticated caller and return the
    /// raw completion text. The stored payload is the decoded JSON, or
    /// `{"content": <raw text>}` when the model response does not decode.
    /// A failed store write is logged and does not fail the request.
    pub async fn generate(
        &self,
        user_api_key: &str,
        params: &QuizParams,
    ) -> Result<String, QuizError> {
        let prompt = select_prompt(params).map_err(QuizError::Selection)?;

        let model = self
            .config
            .default_model()
            .await
            .map_err(|e| QuizError::Config(e.to_string()))?
            .map(|m| m.model_name)
            .unwrap_or_else(|| FALLBACK_MODEL.to_string());

        let openrouter_key = self
            .config
            .default_openrouter_key()
            .await
            .map_err(|e| QuizError::Config(e.to_string()))?
            .ok_or(QuizError::NoCompletionKey)?;

        let response = self
            .openrouter
            .chat_completion(&openrouter_key.api_key, &model, &prompt)
            .await
            .map_err(|e| QuizError::Upstream(e.to_string()))?;

        let quiz_content = response
            .first_content()
            .ok_or_else(|| QuizError::Upstream("empty completion response".to_string()))?
            .to_string();

        let payload = match serde_json::from_str::<serde_json::Value>(&quiz_content) {
            Ok(value) => value,
            Err(_) => serde_json::json!({ "content": quiz_content }),
        };

        let record = generated_quizzes::Model {
            id: Uuid::new_v4().to_string(),
            user_api_key: user_api_key.to_string(),
            generated_at: Utc::now(),
            quiz_content: payload.to_string(),
        };
        if let Err(e) = self.quizzes.insert_quiz(&record).await {
            error!("Failed to save quiz for key {}: {}", user_api_key, e);
        } else {
            info!("Quiz saved for key {} using model {}", user_api_key, model);
        }

        Ok(quiz_content)
    }
}
