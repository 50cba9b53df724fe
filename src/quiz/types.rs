use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::storage::entities::generated_quizzes;

/// Admin-facing view of a stored quiz with the payload decoded back to
/// JSON. Rows written before the JSON convention hardened are surfaced as
/// plain strings.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedQuiz {
    pub id: String,
    pub user_api_key: String,
    pub generated_at: DateTime<Utc>,
    pub quiz_content: serde_json::Value,
}

impl From<generated_quizzes::Model> for GeneratedQuiz {
    fn from(model: generated_quizzes::Model) -> Self {
        let quiz_content = serde_json::from_str(&model.quiz_content)
            .unwrap_or_else(|_| serde_json::Value::String(model.quiz_content.clone()));

        GeneratedQuiz {
            id: model.id,
            user_api_key: model.user_api_key,
            generated_at: model.generated_at,
            quiz_content,
        }
    }
}
