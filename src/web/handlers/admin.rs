use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use super::{health, ErrorBody};
use crate::quiz::GeneratedQuiz;
use crate::storage::entities::{api_keys, api_models, openrouter_keys, usage_limits, usage_logs, users};
use crate::storage::AdminStorage;
use crate::web::Pagination;
use crate::AppContext;

pub fn admin_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/users", get(get_users))
        .route("/api-keys", get(get_api_keys))
        .route(
            "/openrouter-keys",
            get(get_openrouter_keys).post(create_openrouter_key),
        )
        .route(
            "/openrouter-keys/:id",
            axum::routing::put(update_openrouter_key).delete(delete_openrouter_key),
        )
        .route("/api-models", get(get_api_models).post(create_api_model))
        .route(
            "/api-models/:id",
            axum::routing::put(update_api_model).delete(delete_api_model),
        )
        .route("/generated-quizzes", get(get_generated_quizzes))
        .route(
            "/usage-limits",
            get(get_usage_limits).post(create_usage_limit),
        )
        .route(
            "/usage-limits/:id",
            axum::routing::put(update_usage_limit).delete(delete_usage_limit),
        )
        .route("/usage-logs", get(get_usage_logs))
        .route("/dashboard-stats", get(get_dashboard_stats))
        .route("/system-health", get(health::system_health))
        .route("/db-tables-health", get(health::db_tables_health))
        .route(
            "/openrouter-prompts-health",
            get(health::openrouter_prompts_health),
        )
        .with_state(ctx)
}

#[derive(Debug, Serialize)]
pub struct AdminResponse<T> {
    pub data: T,
    pub status: &'static str,
}

impl<T: Serialize> AdminResponse<T> {
    pub fn success(data: T) -> Json<Self> {
        Json(Self {
            data,
            status: "success",
        })
    }
}

type AdminResult<T> = Result<Json<AdminResponse<T>>, (StatusCode, Json<ErrorBody>)>;

fn internal_error(context: &str, e: impl Display) -> (StatusCode, Json<ErrorBody>) {
    error!("{}: {}", context, e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::new(format!("{}: {}", context, e))),
    )
}

async fn get_users(State(ctx): State<Arc<AppContext>>) -> AdminResult<Vec<users::Model>> {
    info!("Fetching users from database");
    let users = ctx
        .store
        .list_users()
        .await
        .map_err(|e| internal_error("Failed to fetch users", e))?;
    info!("Found {} users", users.len());
    Ok(AdminResponse::success(users))
}

async fn get_api_keys(State(ctx): State<Arc<AppContext>>) -> AdminResult<Vec<api_keys::Model>> {
    info!("Fetching API keys from database");
    let keys = ctx
        .store
        .list_api_keys()
        .await
        .map_err(|e| internal_error("Failed to fetch API keys", e))?;
    info!("Found {} API keys", keys.len());
    Ok(AdminResponse::success(keys))
}

async fn get_openrouter_keys(
    State(ctx): State<Arc<AppContext>>,
) -> AdminResult<Vec<openrouter_keys::Model>> {
    info!("Fetching OpenRouter API keys from database");
    let keys = ctx
        .store
        .list_openrouter_keys()
        .await
        .map_err(|e| internal_error("Failed to fetch OpenRouter API keys", e))?;
    info!("Found {} OpenRouter API keys", keys.len());
    Ok(AdminResponse::success(keys))
}

async fn get_api_models(
    State(ctx): State<Arc<AppContext>>,
) -> AdminResult<Vec<api_models::Model>> {
    info!("Fetching API models from database");
    let models = ctx
        .store
        .list_models()
        .await
        .map_err(|e| internal_error("Failed to fetch API models", e))?;
    info!("Found {} API models", models.len());
    Ok(AdminResponse::success(models))
}

async fn get_generated_quizzes(
    State(ctx): State<Arc<AppContext>>,
) -> AdminResult<Vec<GeneratedQuiz>> {
    info!("Fetching generated quizzes from database");
    let quizzes = ctx
        .store
        .list_quizzes()
        .await
        .map_err(|e| internal_error("Failed to fetch generated quizzes", e))?;
    info!("Found {} generated quizzes", quizzes.len());
    Ok(AdminResponse::success(
        quizzes.into_iter().map(GeneratedQuiz::from).collect(),
    ))
}

async fn get_usage_limits(
    State(ctx): State<Arc<AppContext>>,
) -> AdminResult<Vec<usage_limits::Model>> {
    info!("Fetching usage limits from database");
    let limits = ctx
        .store
        .list_usage_limits()
        .await
        .map_err(|e| internal_error("Failed to fetch usage limits", e))?;
    info!("Found {} usage limits", limits.len());
    Ok(AdminResponse::success(limits))
}

async fn get_usage_logs(
    State(ctx): State<Arc<AppContext>>,
    Query(pagination): Query<Pagination>,
) -> AdminResult<Vec<usage_logs::Model>> {
    info!(
        "Fetching usage logs (limit: {}, offset: {})",
        pagination.limit(),
        pagination.offset()
    );
    let logs = ctx
        .store
        .list_usage_logs(&pagination)
        .await
        .map_err(|e| internal_error("Failed to fetch usage logs", e))?;
    info!("Found {} usage logs", logs.len());
    Ok(AdminResponse::success(logs))
}

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_users: u64,
    pub active_api_keys: u64,
    pub total_quizzes: u64,
    pub total_openrouter_keys: u64,
}

async fn get_dashboard_stats(State(ctx): State<Arc<AppContext>>) -> AdminResult<DashboardStats> {
    info!("Fetching dashboard statistics");
    let stats = DashboardStats {
        total_users: ctx
            .store
            .count_users()
            .await
            .map_err(|e| internal_error("Failed to fetch dashboard statistics", e))?,
        active_api_keys: ctx
            .store
            .count_active_keys()
            .await
            .map_err(|e| internal_error("Failed to fetch dashboard statistics", e))?,
        total_quizzes: ctx
            .store
            .count_quizzes()
            .await
            .map_err(|e| internal_error("Failed to fetch dashboard statistics", e))?,
        total_openrouter_keys: ctx
            .store
            .count_openrouter_keys()
            .await
            .map_err(|e| internal_error("Failed to fetch dashboard statistics", e))?,
    };
    Ok(AdminResponse::success(stats))
}

#[derive(Debug, Deserialize)]
pub struct UsageLimitBody {
    pub tier_name: String,
    pub max_daily_limit: i64,
    pub max_monthly_limit: i64,
    pub price: f64,
}

async fn create_usage_limit(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<UsageLimitBody>,
) -> AdminResult<usage_limits::Model> {
    info!("Creating usage limit: {}", body.tier_name);
    let now = Utc::now();
    let limit = usage_limits::Model {
        id: Uuid::new_v4().to_string(),
        tier_name: body.tier_name,
        max_daily_limit: body.max_daily_limit,
        max_monthly_limit: body.max_monthly_limit,
        price: body.price,
        created_at: now,
        updated_at: now,
    };
    ctx.store
        .create_usage_limit(&limit)
        .await
        .map_err(|e| internal_error("Failed to create usage limit", e))?;
    Ok(AdminResponse::success(limit))
}

async fn update_usage_limit(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    Json(body): Json<UsageLimitBody>,
) -> AdminResult<()> {
    info!("Updating usage limit {}", id);
    ctx.store
        .update_usage_limit(
            &id,
            &body.tier_name,
            body.max_daily_limit,
            body.max_monthly_limit,
            body.price,
        )
        .await
        .map_err(|e| internal_error("Failed to update usage limit", e))?;
    Ok(AdminResponse::success(()))
}

async fn delete_usage_limit(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> AdminResult<()> {
    info!("Deleting usage limit {}", id);
    ctx.store
        .delete_usage_limit(&id)
        .await
        .map_err(|e| internal_error("Failed to delete usage limit", e))?;
    Ok(AdminResponse::success(()))
}

#[derive(Debug, Deserialize)]
pub struct ApiModelBody {
    pub model_name: String,
    pub description: String,
    #[serde(default)]
    pub is_default: bool,
}

async fn create_api_model(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<ApiModelBody>,
) -> AdminResult<api_models::Model> {
    info!("Creating API model: {}", body.model_name);
    let model = api_models::Model {
        id: Uuid::new_v4().to_string(),
        model_name: body.model_name,
        description: body.description,
        is_default: body.is_default,
    };
    ctx.store
        .create_model(&model)
        .await
        .map_err(|e| internal_error("Failed to create API model", e))?;
    Ok(AdminResponse::success(model))
}

async fn update_api_model(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    Json(body): Json<ApiModelBody>,
) -> AdminResult<()> {
    info!("Updating API model {}", id);
    ctx.store
        .update_model(&id, &body.model_name, &body.description, body.is_default)
        .await
        .map_err(|e| internal_error("Failed to update API model", e))?;
    Ok(AdminResponse::success(()))
}

async fn delete_api_model(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> AdminResult<()> {
    info!("Deleting API model {}", id);
    ctx.store
        .delete_model(&id)
        .await
        .map_err(|e| internal_error("Failed to delete API model", e))?;
    Ok(AdminResponse::success(()))
}

#[derive(Debug, Deserialize)]
pub struct OpenRouterKeyBody {
    pub api_key: String,
    pub description: String,
    #[serde(default)]
    pub is_default: bool,
}

async fn create_openrouter_key(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<OpenRouterKeyBody>,
) -> AdminResult<openrouter_keys::Model> {
    info!("Creating OpenRouter API key: {}", body.description);
    let key = openrouter_keys::Model {
        id: Uuid::new_v4().to_string(),
        api_key: body.api_key,
        description: body.description,
        is_default: body.is_default,
    };
    ctx.store
        .create_openrouter_key(&key)
        .await
        .map_err(|e| internal_error("Failed to create OpenRouter API key", e))?;
    Ok(AdminResponse::success(key))
}

async fn update_openrouter_key(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    Json(body): Json<OpenRouterKeyBody>,
) -> AdminResult<()> {
    info!("Updating OpenRouter API key {}", id);
    ctx.store
        .update_openrouter_key(&id, &body.api_key, &body.description, body.is_default)
        .await
        .map_err(|e| internal_error("Failed to update OpenRouter API key", e))?;
    Ok(AdminResponse::success(()))
}

async fn delete_openrouter_key(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> AdminResult<()> {
    info!("Deleting OpenRouter API key {}", id);
    ctx.store
        .delete_openrouter_key(&id)
        .await
        .map_err(|e| internal_error("Failed to delete OpenRouter API key", e))?;
    Ok(AdminResponse::success(()))
}
