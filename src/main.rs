#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use tracing::info;
use std::sync::Arc;
use std::net::SocketAddr;
use quizgen_rs::{
    auth::Auth, openrouter::OpenRouterClient, quiz::QuizService, utils::logger, AppContext,
    SQLITE_PATH,
};
use quizgen_rs::storage::sqlite::SqliteStorage;

#[tokio::main]
async fn main() -> Result<()> {
    let _guard = logger::init("./logs".to_string())?;
    quizgen_rs::init_env();

    info!("Starting quiz generation service...");

    info!("Initializing Storage...");
    let store = Arc::new(SqliteStorage::new(&SQLITE_PATH).await?);

    info!("Initializing Auth Manager...");
    let auth = Auth::new(store.clone());

    info!("Initializing OpenRouter client...");
    let openrouter = Arc::new(OpenRouterClient::from_env()?);

    let quiz = QuizService::new(store.clone(), store.clone(), openrouter.clone());

    let ctx = Arc::new(AppContext {
        auth: Arc::new(auth),
        quiz: Arc::new(quiz),
        store,
        openrouter,
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], 8000));
    info!("Starting HTTP server at http://{}", addr);

    match quizgen_rs::web::start_server(ctx, addr).await {
        Ok(_) => info!("Server stopped gracefully"),
        Err(e) => {
            tracing::error!("Server error: {}", e);
            return Err(e);
        }
    }

    Ok(())
}
