pub mod auth;
pub mod openrouter;
pub mod prompt;
pub mod quiz;
pub mod storage;
pub mod utils;
pub mod web;

use std::{env, sync::Arc};
use auth::Auth;
use openrouter::OpenRouterClient;
use quiz::QuizService;
use storage::sqlite::SqliteStorage;
use once_cell::sync::Lazy;

pub struct AppContext {
    pub auth: Arc<Auth>,
    pub quiz: Arc<QuizService>,
    pub store: Arc<SqliteStorage>,
    pub openrouter: Arc<OpenRouterClient>,
}

const QUIZGEN_SQLITE_PATH: &str = "sqlite://./quizgen_data/database/storage.db?mode=rwc";

pub static SQLITE_PATH: Lazy<String> = Lazy::new(|| {
    match env::var("QUIZGEN_SQLITE_PATH") {
        Ok(path) => path,
        Err(_) => {
            dotenv::var("QUIZGEN_SQLITE_PATH").unwrap_or_else(|_| QUIZGEN_SQLITE_PATH.to_string())
        }
    }
});

pub fn init_env() {
    dotenv::dotenv().ok();

    // make sure the database directory exists before the pool connects
    if let Some(db_path) = SQLITE_PATH.strip_prefix("sqlite://") {
        let db_path = db_path.split('?').next().unwrap_or(db_path);
        if let Some(dir) = std::path::Path::new(db_path).parent() {
            std::fs::create_dir_all(dir).unwrap_or_else(|e| {
                eprintln!("Failed to create database directory: {}", e);
            });
        }
    }
}
