use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::error;

use super::admin::AdminResponse;
use crate::openrouter::HEALTH_PROBE_MODEL;
use crate::storage::{AdminStorage, ConfigStorage, TABLES};
use crate::AppContext;

const HEALTH_PROBE_PROMPTS: [(&str, &str); 4] = [
    ("easy", "What is 2+2?"),
    (
        "medium",
        "Explain the process of photosynthesis in a paragraph.",
    ),
    (
        "hard",
        "Write a Python function to compute the nth Fibonacci number recursively and explain its time complexity.",
    ),
    (
        "extreme",
        "Generate a detailed, step-by-step solution to a complex calculus problem involving integration by parts, and provide a LaTeX-formatted answer.",
    ),
];

#[derive(Debug, Serialize)]
pub struct TargetHealth {
    pub status: &'static str,
    pub latency_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TargetHealth {
    fn ok(start: Instant) -> Self {
        Self {
            status: "ok",
            latency_ms: latency_ms(start),
            error: None,
        }
    }

    fn error(start: Instant, error: impl ToString) -> Self {
        Self {
            status: "error",
            latency_ms: latency_ms(start),
            error: Some(error.to_string()),
        }
    }
}

fn latency_ms(start: Instant) -> f64 {
    (start.elapsed().as_secs_f64() * 1000.0 * 100.0).round() / 100.0
}

#[derive(Debug, Serialize)]
pub struct SystemHealth {
    pub database: TargetHealth,
    pub openrouter: TargetHealth,
}

pub async fn system_health(State(ctx): State<Arc<AppContext>>) -> impl IntoResponse {
    let db_start = Instant::now();
    let database = match ctx.store.ping_table("users").await {
        Ok(()) => TargetHealth::ok(db_start),
        Err(e) => TargetHealth::error(db_start, e),
    };

    let or_start = Instant::now();
    let openrouter = match ctx.openrouter.probe_models().await {
        Ok(()) => TargetHealth::ok(or_start),
        Err(e) => TargetHealth::error(or_start, e),
    };

    AdminResponse::success(SystemHealth {
        database,
        openrouter,
    })
}

#[derive(Debug, Serialize)]
pub struct TableHealth {
    pub table: &'static str,
    pub status: &'static str,
    pub latency_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn db_tables_health(State(ctx): State<Arc<AppContext>>) -> impl IntoResponse {
    let mut health = Vec::with_capacity(TABLES.len());
    for table in TABLES {
        let start = Instant::now();
        match ctx.store.ping_table(table).await {
            Ok(()) => health.push(TableHealth {
                table,
                status: "ok",
                latency_ms: latency_ms(start),
                error: None,
            }),
            Err(e) => health.push(TableHealth {
                table,
                status: "error",
                latency_ms: latency_ms(start),
                error: Some(e.to_string()),
            }),
        }
    }

    AdminResponse::success(health)
}

#[derive(Debug, Serialize)]
pub struct PromptHealth {
    pub level: &'static str,
    pub status: &'static str,
    pub latency_ms: f64,
    pub prompt: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn openrouter_prompts_health(
    State(ctx): State<Arc<AppContext>>,
) -> axum::response::Response {
    let key = match ctx.store.default_openrouter_key().await {
        Ok(Some(key)) => key,
        Ok(None) => {
            return Json(serde_json::json!({
                "status": "error",
                "error": "No OpenRouter API key found in database.",
            }))
            .into_response();
        }
        Err(e) => {
            error!("Failed to fetch OpenRouter API key: {}", e);
            return Json(serde_json::json!({
                "status": "error",
                "error": format!("Failed to fetch OpenRouter API key: {}", e),
            }))
            .into_response();
        }
    };

    let mut results = Vec::with_capacity(HEALTH_PROBE_PROMPTS.len());
    for (level, prompt) in HEALTH_PROBE_PROMPTS {
        let start = Instant::now();
        match ctx
            .openrouter
            .probe_prompt(&key.api_key, HEALTH_PROBE_MODEL, prompt)
            .await
        {
            Ok(()) => results.push(PromptHealth {
                level,
                status: "ok",
                latency_ms: latency_ms(start),
                prompt,
                error: None,
            }),
            Err(e) => results.push(PromptHealth {
                level,
                status: "error",
                latency_ms: latency_ms(start),
                prompt,
                error: Some(e.to_string()),
            }),
        }
    }

    AdminResponse::success(results).into_response()
}
