use super::*;
use super::sqlite::SqliteStorage;
use chrono::{Duration, Utc};
use tempfile::NamedTempFile;
use uuid::Uuid;

async fn setup_storage() -> (SqliteStorage, NamedTempFile) {
    let temp_file = NamedTempFile::new().unwrap();
    let url = format!("sqlite://{}?mode=rwc", temp_file.path().display());
    let storage = SqliteStorage::new(&url).await.unwrap();
    (storage, temp_file)
}

fn test_api_key(key: &str, status: &str) -> api_keys::Model {
    api_keys::Model {
        user_api_key: key.to_string(),
        user_type: "free".to_string(),
        status: status.to_string(),
        user_id: Uuid::new_v4().to_string(),
    }
}

fn test_model(name: &str, is_default: bool) -> api_models::Model {
    api_models::Model {
        id: Uuid::new_v4().to_string(),
        model_name: name.to_string(),
        description: "test model".to_string(),
        is_default,
    }
}

fn test_openrouter_key(key: &str, is_default: bool) -> openrouter_keys::Model {
    openrouter_keys::Model {
        id: Uuid::new_v4().to_string(),
        api_key: key.to_string(),
        description: "test key".to_string(),
        is_default,
    }
}

#[tokio::test]
async fn test_get_api_key() {
    let (storage, _temp_file) = setup_storage().await;
    let key = test_api_key("key-1", "active");
    storage.insert_api_key(&key).await.unwrap();

    let found = storage.get_key("key-1").await.unwrap().unwrap();
    assert_eq!(found, key);

    assert!(storage.get_key("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_count_active_keys() {
    let (storage, _temp_file) = setup_storage().await;
    storage.insert_api_key(&test_api_key("key-1", "active")).await.unwrap();
    storage.insert_api_key(&test_api_key("key-2", "inactive")).await.unwrap();
    storage.insert_api_key(&test_api_key("key-3", "active")).await.unwrap();

    assert_eq!(storage.count_active_keys().await.unwrap(), 2);
    assert_eq!(storage.list_api_keys().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_default_model_selection() {
    let (storage, _temp_file) = setup_storage().await;

    // empty table, then a non-default row only
    assert!(storage.default_model().await.unwrap().is_none());
    storage.create_model(&test_model("model-a", false)).await.unwrap();
    assert!(storage.default_model().await.unwrap().is_none());

    let default = test_model("model-b", true);
    storage.create_model(&default).await.unwrap();
    let found = storage.default_model().await.unwrap().unwrap();
    assert_eq!(found.model_name, "model-b");
}

#[tokio::test]
async fn test_default_openrouter_key_selection() {
    let (storage, _temp_file) = setup_storage().await;

    assert!(storage.default_openrouter_key().await.unwrap().is_none());
    storage
        .create_openrouter_key(&test_openrouter_key("or-plain", false))
        .await
        .unwrap();
    assert!(storage.default_openrouter_key().await.unwrap().is_none());

    storage
        .create_openrouter_key(&test_openrouter_key("or-default", true))
        .await
        .unwrap();
    let found = storage.default_openrouter_key().await.unwrap().unwrap();
    assert_eq!(found.api_key, "or-default");
}

#[tokio::test]
async fn test_model_crud() {
    let (storage, _temp_file) = setup_storage().await;
    let model = test_model("model-a", false);
    storage.create_model(&model).await.unwrap();

    storage
        .update_model(&model.id, "model-b", "updated", true)
        .await
        .unwrap();
    let listed = storage.list_models().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].model_name, "model-b");
    assert!(listed[0].is_default);

    storage.delete_model(&model.id).await.unwrap();
    assert!(storage.list_models().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_openrouter_key_crud() {
    let (storage, _temp_file) = setup_storage().await;
    let key = test_openrouter_key("or-1", false);
    storage.create_openrouter_key(&key).await.unwrap();

    storage
        .update_openrouter_key(&key.id, "or-2", "rotated", true)
        .await
        .unwrap();
    let listed = storage.list_openrouter_keys().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].api_key, "or-2");

    storage.delete_openrouter_key(&key.id).await.unwrap();
    assert!(storage.list_openrouter_keys().await.unwrap().is_empty());
    assert_eq!(storage.count_openrouter_keys().await.unwrap(), 0);
}

#[tokio::test]
async fn test_usage_limit_crud() {
    let (storage, _temp_file) = setup_storage().await;
    let now = Utc::now();
    let limit = usage_limits::Model {
        id: Uuid::new_v4().to_string(),
        tier_name: "silver".to_string(),
        max_daily_limit: 100,
        max_monthly_limit: 2000,
        price: 9.99,
        created_at: now,
        updated_at: now,
    };
    storage.create_usage_limit(&limit).await.unwrap();

    storage
        .update_usage_limit(&limit.id, "gold", 500, 10000, 19.99)
        .await
        .unwrap();
    let listed = storage.list_usage_limits().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].tier_name, "gold");
    assert_eq!(listed[0].max_daily_limit, 500);
    assert!(listed[0].updated_at >= listed[0].created_at);

    storage.delete_usage_limit(&limit.id).await.unwrap();
    assert!(storage.list_usage_limits().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_quiz_insert_round_trip() {
    let (storage, _temp_file) = setup_storage().await;
    let quiz = generated_quizzes::Model {
        id: Uuid::new_v4().to_string(),
        user_api_key: "key-1".to_string(),
        generated_at: Utc::now(),
        quiz_content: r#"{"questions":[]}"#.to_string(),
    };
    storage.insert_quiz(&quiz).await.unwrap();

    let listed = storage.list_quizzes().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, quiz.id);
    assert_eq!(listed[0].quiz_content, quiz.quiz_content);
    assert_eq!(storage.count_quizzes().await.unwrap(), 1);
}

#[tokio::test]
async fn test_usage_logs_newest_first_with_pagination() {
    let (storage, _temp_file) = setup_storage().await;
    let base = Utc::now();
    for i in 0..5 {
        storage
            .insert_usage_log(&usage_logs::Model {
                id: Uuid::new_v4().to_string(),
                user_api_key: "key-1".to_string(),
                action: format!("generate-quiz-{}", i),
                created_at: base + Duration::seconds(i),
            })
            .await
            .unwrap();
    }

    let page = storage
        .list_usage_logs(&Pagination { limit: 2, offset: 0 })
        .await
        .unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].action, "generate-quiz-4");
    assert_eq!(page[1].action, "generate-quiz-3");

    let next = storage
        .list_usage_logs(&Pagination { limit: 2, offset: 2 })
        .await
        .unwrap();
    assert_eq!(next[0].action, "generate-quiz-2");
}

#[tokio::test]
async fn test_users_listing_and_count() {
    let (storage, _temp_file) = setup_storage().await;
    let now = Utc::now();
    let user = users::Model {
        id: Uuid::new_v4().to_string(),
        user_id: "u-1".to_string(),
        email: "user@example.com".to_string(),
        username: "user".to_string(),
        tier: "free".to_string(),
        api_key: "key-1".to_string(),
        created_at: now,
        updated_at: now,
        is_active: true,
    };
    storage.insert_user(&user).await.unwrap();

    let listed = storage.list_users().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].email, "user@example.com");
    assert!(listed[0].is_active);
    assert_eq!(storage.count_users().await.unwrap(), 1);
}

#[tokio::test]
async fn test_ping_tables() {
    let (storage, _temp_file) = setup_storage().await;
    for table in TABLES {
        storage.ping_table(table).await.unwrap();
    }

    assert!(storage.ping_table("no_such_table").await.is_err());
}
