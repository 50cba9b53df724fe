pub mod api_keys;
pub mod api_models;
pub mod generated_quizzes;
pub mod openrouter_keys;
pub mod usage_limits;
pub mod usage_logs;
pub mod users;
