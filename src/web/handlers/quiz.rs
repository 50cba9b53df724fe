use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

use super::ErrorBody;
use crate::auth::AuthError;
use crate::prompt::QuizParams;
use crate::quiz::QuizError;
use crate::AppContext;

pub const USER_API_KEY_HEADER: &str = "X-User-API-Key";

pub fn quiz_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/generate-quiz", post(generate_quiz))
        .with_state(ctx)
}

#[derive(Debug, Serialize)]
struct QuizContentResponse {
    quiz_content: String,
}

pub async fn generate_quiz(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> impl IntoResponse {
    // validate api key before anything else runs
    let header_key = headers
        .get(USER_API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    if let Err(e) = ctx.auth.verify_api_key(header_key.as_deref()).await {
        let (status, message) = match e {
            AuthError::MissingApiKey => (StatusCode::UNAUTHORIZED, "User API key missing"),
            AuthError::InvalidApiKey => (StatusCode::UNAUTHORIZED, "Invalid API key"),
            AuthError::KeyInactive => (StatusCode::FORBIDDEN, "API key is inactive"),
            AuthError::StorageError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };
        return (status, Json(ErrorBody::new(message))).into_response();
    }
    let user_api_key = header_key.unwrap_or_default();

    let params: QuizParams = match serde_json::from_slice(&body) {
        Ok(params) => params,
        Err(e) => {
            error!("Invalid quiz request body: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody::new("Invalid JSON body")),
            )
                .into_response();
        }
    };

    match ctx.quiz.generate(&user_api_key, &params).await {
        Ok(quiz_content) => {
            info!("Quiz generated successfully");
            (StatusCode::OK, Json(QuizContentResponse { quiz_content })).into_response()
        }
        Err(QuizError::Selection(e)) => {
            (StatusCode::BAD_REQUEST, Json(ErrorBody::new(e.to_string()))).into_response()
        }
        Err(e) => {
            error!("Quiz generation failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new("Failed to generate quiz from API")),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Auth;
    use crate::openrouter::OpenRouterClient;
    use crate::quiz::QuizService;
    use crate::storage::entities::{api_keys, api_models, openrouter_keys};
    use crate::storage::memory::{
        InMemoryApiKeyStorage, InMemoryConfigStorage, InMemoryQuizStorage,
    };
    use crate::storage::sqlite::SqliteStorage;
    use axum::body::Body;
    use axum::http::Request;
    use tempfile::NamedTempFile;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct TestApp {
        ctx: Arc<AppContext>,
        quizzes: Arc<InMemoryQuizStorage>,
        _db_file: NamedTempFile,
    }

    async fn setup_app(completion_base_url: &str) -> TestApp {
        let keys = Arc::new(InMemoryApiKeyStorage::new());
        keys.set_key(api_keys::Model {
            user_api_key: "active-key".to_string(),
            user_type: "free".to_string(),
            status: "active".to_string(),
            user_id: "user-1".to_string(),
        });
        keys.set_key(api_keys::Model {
            user_api_key: "inactive-key".to_string(),
            user_type: "gold".to_string(),
            status: "inactive".to_string(),
            user_id: "user-2".to_string(),
        });

        let config = Arc::new(InMemoryConfigStorage::new());
        config.set_default_model(api_models::Model {
            id: "m-1".to_string(),
            model_name: "openai/gpt-4o-mini".to_string(),
            description: "default".to_string(),
            is_default: true,
        });
        config.set_default_openrouter_key(openrouter_keys::Model {
            id: "k-1".to_string(),
            api_key: "or-test-key".to_string(),
            description: "default".to_string(),
            is_default: true,
        });

        let quizzes = Arc::new(InMemoryQuizStorage::new());
        let openrouter = Arc::new(OpenRouterClient::new(completion_base_url).unwrap());
        let quiz = QuizService::new(config, quizzes.clone(), openrouter.clone());

        let db_file = NamedTempFile::new().unwrap();
        let url = format!("sqlite://{}?mode=rwc", db_file.path().display());
        let store = Arc::new(SqliteStorage::new(&url).await.unwrap());

        let ctx = Arc::new(AppContext {
            auth: Arc::new(Auth::new(keys)),
            quiz: Arc::new(quiz),
            store,
            openrouter,
        });

        TestApp {
            ctx,
            quizzes,
            _db_file: db_file,
        }
    }

    fn quiz_request(api_key: Option<&str>) -> Request<Body> {
        let body = serde_json::json!({
            "content_type": "topic",
            "question_type": "multiple_choice_quiz",
            "level": "medium",
            "content": "Photosynthesis",
            "num_of_question": 5,
        });

        let mut builder = Request::builder()
            .method("POST")
            .uri("/generate-quiz")
            .header("content-type", "application/json");
        if let Some(key) = api_key {
            builder = builder.header(USER_API_KEY_HEADER, key);
        }
        builder
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn missing_api_key_header_is_unauthorized() {
        let app = setup_app("http://127.0.0.1:9").await;
        let response = quiz_router(app.ctx.clone())
            .oneshot(quiz_request(None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(app.quizzes.saved().is_empty());
    }

    #[tokio::test]
    async fn unknown_api_key_is_unauthorized() {
        let app = setup_app("http://127.0.0.1:9").await;
        let response = quiz_router(app.ctx.clone())
            .oneshot(quiz_request(Some("no-such-key")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(app.quizzes.saved().is_empty());
    }

    #[tokio::test]
    async fn inactive_api_key_is_forbidden() {
        let app = setup_app("http://127.0.0.1:9").await;
        let response = quiz_router(app.ctx.clone())
            .oneshot(quiz_request(Some("inactive-key")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert!(app.quizzes.saved().is_empty());
    }

    #[tokio::test]
    async fn valid_request_returns_quiz_content_and_persists_once() {
        let server = MockServer::start().await;
        let quiz_json = r#"{"questions":[{"stem":"Q1"}]}"#;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{ "message": { "role": "assistant", "content": quiz_json } }]
            })))
            .mount(&server)
            .await;

        let app = setup_app(&server.uri()).await;
        let response = quiz_router(app.ctx.clone())
            .oneshot(quiz_request(Some("active-key")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["quiz_content"], quiz_json);

        let saved = app.quizzes.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].user_api_key, "active-key");
    }

    #[tokio::test]
    async fn auth_runs_before_body_parsing() {
        let app = setup_app("http://127.0.0.1:9").await;
        let request = Request::builder()
            .method("POST")
            .uri("/generate-quiz")
            .header("content-type", "application/json")
            .body(Body::from("not json"))
            .unwrap();

        let response = quiz_router(app.ctx.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_body_with_valid_key_is_a_bad_request() {
        let app = setup_app("http://127.0.0.1:9").await;
        let request = Request::builder()
            .method("POST")
            .uri("/generate-quiz")
            .header("content-type", "application/json")
            .header(USER_API_KEY_HEADER, "active-key")
            .body(Body::from("not json"))
            .unwrap();

        let response = quiz_router(app.ctx.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(app.quizzes.saved().is_empty());
    }

    #[tokio::test]
    async fn selection_failure_is_a_bad_request() {
        let app = setup_app("http://127.0.0.1:9").await;
        let body = serde_json::json!({
            "content_type": "topic",
            "question_type": "unknown_type",
            "level": "medium",
            "content": "Photosynthesis",
            "num_of_question": 5,
        });
        let request = Request::builder()
            .method("POST")
            .uri("/generate-quiz")
            .header("content-type", "application/json")
            .header(USER_API_KEY_HEADER, "active-key")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();

        let response = quiz_router(app.ctx.clone()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(app.quizzes.saved().is_empty());
    }
}
