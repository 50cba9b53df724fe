use async_trait::async_trait;
use anyhow::Result;

use crate::web::Pagination;

pub mod entities;
pub mod memory;
pub mod sqlite;

use entities::{api_keys, api_models, generated_quizzes, openrouter_keys, usage_limits, usage_logs, users};

/// Known tables, in the order the health probe reports them.
pub const TABLES: [&str; 7] = [
    "users",
    "user_api_keys",
    "openrouter_api_keys",
    "models",
    "generated_quizzes",
    "usage_limits",
    "usage_logs",
];

/// Key lookups performed during request authentication.
#[async_trait]
pub trait ApiKeyStorage: Send + Sync + 'static {
    async fn get_key(&self, api_key: &str) -> Result<Option<api_keys::Model>>;
}

/// Default-record selection consulted by the quiz orchestrator. The first
/// row flagged default wins; ties are arbitrary.
#[async_trait]
pub trait ConfigStorage: Send + Sync + 'static {
    async fn default_model(&self) -> Result<Option<api_models::Model>>;
    async fn default_openrouter_key(&self) -> Result<Option<openrouter_keys::Model>>;
}

/// Quiz persistence, one insert per successful generation.
#[async_trait]
pub trait QuizStorage: Send + Sync + 'static {
    async fn insert_quiz(&self, quiz: &generated_quizzes::Model) -> Result<()>;
}

/// Everything the administrative surface reads and writes.
#[async_trait]
pub trait AdminStorage: Send + Sync + 'static {
    async fn list_users(&self) -> Result<Vec<users::Model>>;
    async fn list_api_keys(&self) -> Result<Vec<api_keys::Model>>;
    async fn list_openrouter_keys(&self) -> Result<Vec<openrouter_keys::Model>>;
    async fn list_models(&self) -> Result<Vec<api_models::Model>>;
    async fn list_quizzes(&self) -> Result<Vec<generated_quizzes::Model>>;
    async fn list_usage_limits(&self) -> Result<Vec<usage_limits::Model>>;
    async fn list_usage_logs(&self, pagination: &Pagination) -> Result<Vec<usage_logs::Model>>;

    async fn count_users(&self) -> Result<u64>;
    async fn count_active_keys(&self) -> Result<u64>;
    async fn count_quizzes(&self) -> Result<u64>;
    async fn count_openrouter_keys(&self) -> Result<u64>;

    async fn create_model(&self, model: &api_models::Model) -> Result<()>;
    async fn update_model(
        &self,
        id: &str,
        model_name: &str,
        description: &str,
        is_default: bool,
    ) -> Result<()>;
    async fn delete_model(&self, id: &str) -> Result<()>;

    async fn create_openrouter_key(&self, key: &openrouter_keys::Model) -> Result<()>;
    async fn update_openrouter_key(
        &self,
        id: &str,
        api_key: &str,
        description: &str,
        is_default: bool,
    ) -> Result<()>;
    async fn delete_openrouter_key(&self, id: &str) -> Result<()>;

    async fn create_usage_limit(&self, limit: &usage_limits::Model) -> Result<()>;
    async fn update_usage_limit(
        &self,
        id: &str,
        tier_name: &str,
        max_daily_limit: i64,
        max_monthly_limit: i64,
        price: f64,
    ) -> Result<()>;
    async fn delete_usage_limit(&self, id: &str) -> Result<()>;

    async fn ping_table(&self, table: &str) -> Result<()>;
}

#[cfg(test)]
mod tests;
