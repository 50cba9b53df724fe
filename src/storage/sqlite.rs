use async_trait::async_trait;
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use tracing::info;

use super::{AdminStorage, ApiKeyStorage, ConfigStorage, QuizStorage, TABLES};
use super::entities::{
    api_keys, api_models, generated_quizzes, openrouter_keys, usage_limits, usage_logs, users,
};
use crate::web::Pagination;

pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    pub async fn new(database_url: &str) -> Result<Self> {
        info!("Initializing sqlite storage at {}", database_url);
        let pool = SqlitePool::connect(database_url).await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                email TEXT NOT NULL,
                username TEXT NOT NULL,
                tier TEXT NOT NULL,
                api_key TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                is_active INTEGER NOT NULL DEFAULT 1
            )
            "#,
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS user_api_keys (
                user_api_key TEXT PRIMARY KEY,
                user_type TEXT NOT NULL,
                status TEXT NOT NULL,
                user_id TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS models (
                id TEXT PRIMARY KEY,
                model_name TEXT NOT NULL,
                description TEXT NOT NULL,
                is_default INTEGER NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS openrouter_api_keys (
                id TEXT PRIMARY KEY,
                api_key TEXT NOT NULL,
                description TEXT NOT NULL,
                is_default INTEGER NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS usage_limits (
                id TEXT PRIMARY KEY,
                tier_name TEXT NOT NULL UNIQUE,
                max_daily_limit INTEGER NOT NULL,
                max_monthly_limit INTEGER NOT NULL,
                price REAL NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS generated_quizzes (
                id TEXT PRIMARY KEY,
                user_api_key TEXT NOT NULL,
                generated_at TEXT NOT NULL,
                quiz_content TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS usage_logs (
                id TEXT PRIMARY KEY,
                user_api_key TEXT NOT NULL,
                action TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
        Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
    }

    fn row_to_user(row: sqlx::sqlite::SqliteRow) -> Result<users::Model> {
        Ok(users::Model {
            id: row.get("id"),
            user_id: row.get("user_id"),
            email: row.get("email"),
            username: row.get("username"),
            tier: row.get("tier"),
            api_key: row.get("api_key"),
            created_at: Self::parse_timestamp(row.get("created_at"))?,
            updated_at: Self::parse_timestamp(row.get("updated_at"))?,
            is_active: row.get("is_active"),
        })
    }

    fn row_to_api_key(row: sqlx::sqlite::SqliteRow) -> api_keys::Model {
        api_keys::Model {
            user_api_key: row.get("user_api_key"),
            user_type: row.get("user_type"),
            status: row.get("status"),
            user_id: row.get("user_id"),
        }
    }

    fn row_to_model(row: sqlx::sqlite::SqliteRow) -> api_models::Model {
        api_models::Model {
            id: row.get("id"),
            model_name: row.get("model_name"),
            description: row.get("description"),
            is_default: row.get("is_default"),
        }
    }

    fn row_to_openrouter_key(row: sqlx::sqlite::SqliteRow) -> openrouter_keys::Model {
        openrouter_keys::Model {
            id: row.get("id"),
            api_key: row.get("api_key"),
            description: row.get("description"),
            is_default: row.get("is_default"),
        }
    }

    fn row_to_usage_limit(row: sqlx::sqlite::SqliteRow) -> Result<usage_limits::Model> {
        Ok(usage_limits::Model {
            id: row.get("id"),
            tier_name: row.get("tier_name"),
            max_daily_limit: row.get("max_daily_limit"),
            max_monthly_limit: row.get("max_monthly_limit"),
            price: row.get("price"),
            created_at: Self::parse_timestamp(row.get("created_at"))?,
            updated_at: Self::parse_timestamp(row.get("updated_at"))?,
        })
    }

    fn row_to_quiz(row: sqlx::sqlite::SqliteRow) -> Result<generated_quizzes::Model> {
        Ok(generated_quizzes::Model {
            id: row.get("id"),
            user_api_key: row.get("user_api_key"),
            generated_at: Self::parse_timestamp(row.get("generated_at"))?,
            quiz_content: row.get("quiz_content"),
        })
    }

    fn row_to_usage_log(row: sqlx::sqlite::SqliteRow) -> Result<usage_logs::Model> {
        Ok(usage_logs::Model {
            id: row.get("id"),
            user_api_key: row.get("user_api_key"),
            action: row.get("action"),
            created_at: Self::parse_timestamp(row.get("created_at"))?,
        })
    }

    async fn count(&self, sql: &str) -> Result<u64> {
        let row = sqlx::query(sql).fetch_one(&self.pool).await?;
        Ok(row.get::<i64, _>("count") as u64)
    }

    /// Test/bootstrap helpers; production rows arrive through the admin
    /// surface or are provisioned out of band.
    pub async fn insert_api_key(&self, key: &api_keys::Model) -> Result<()> {
        sqlx::query(
            "INSERT INTO user_api_keys (user_api_key, user_type, status, user_id) VALUES (?, ?, ?, ?)",
        )
        .bind(&key.user_api_key)
        .bind(&key.user_type)
        .bind(&key.status)
        .bind(&key.user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn insert_user(&self, user: &users::Model) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, user_id, email, username, tier, api_key, created_at, updated_at, is_active)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.user_id)
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.tier)
        .bind(&user.api_key)
        .bind(user.created_at.to_rfc3339())
        .bind(user.updated_at.to_rfc3339())
        .bind(user.is_active)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn insert_usage_log(&self, log: &usage_logs::Model) -> Result<()> {
        sqlx::query(
            "INSERT INTO usage_logs (id, user_api_key, action, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&log.id)
        .bind(&log.user_api_key)
        .bind(&log.action)
        .bind(log.created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl ApiKeyStorage for SqliteStorage {
    async fn get_key(&self, api_key: &str) -> Result<Option<api_keys::Model>> {
        let row = sqlx::query("SELECT * FROM user_api_keys WHERE user_api_key = ?")
            .bind(api_key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Self::row_to_api_key))
    }
}

#[async_trait]
impl ConfigStorage for SqliteStorage {
    async fn default_model(&self) -> Result<Option<api_models::Model>> {
        let row = sqlx::query(
            "SELECT * FROM models ORDER BY is_default DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Self::row_to_model).filter(|m| m.is_default))
    }

    async fn default_openrouter_key(&self) -> Result<Option<openrouter_keys::Model>> {
        let row = sqlx::query(
            "SELECT * FROM openrouter_api_keys ORDER BY is_default DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Self::row_to_openrouter_key).filter(|k| k.is_default))
    }
}

#[async_trait]
impl QuizStorage for SqliteStorage {
    async fn insert_quiz(&self, quiz: &generated_quizzes::Model) -> Result<()> {
        sqlx::query(
            "INSERT INTO generated_quizzes (id, user_api_key, generated_at, quiz_content) VALUES (?, ?, ?, ?)",
        )
        .bind(&quiz.id)
        .bind(&quiz.user_api_key)
        .bind(quiz.generated_at.to_rfc3339())
        .bind(&quiz.quiz_content)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl AdminStorage for SqliteStorage {
    async fn list_users(&self) -> Result<Vec<users::Model>> {
        let rows = sqlx::query("SELECT * FROM users")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Self::row_to_user).collect()
    }

    async fn list_api_keys(&self) -> Result<Vec<api_keys::Model>> {
        let rows = sqlx::query("SELECT * FROM user_api_keys")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Self::row_to_api_key).collect())
    }

    async fn list_openrouter_keys(&self) -> Result<Vec<openrouter_keys::Model>> {
        let rows = sqlx::query("SELECT * FROM openrouter_api_keys")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Self::row_to_openrouter_key).collect())
    }

    async fn list_models(&self) -> Result<Vec<api_models::Model>> {
        let rows = sqlx::query("SELECT * FROM models")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Self::row_to_model).collect())
    }

    async fn list_quizzes(&self) -> Result<Vec<generated_quizzes::Model>> {
        let rows = sqlx::query("SELECT * FROM generated_quizzes")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Self::row_to_quiz).collect()
    }

    async fn list_usage_limits(&self) -> Result<Vec<usage_limits::Model>> {
        let rows = sqlx::query("SELECT * FROM usage_limits")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Self::row_to_usage_limit).collect()
    }

    async fn list_usage_logs(&self, pagination: &Pagination) -> Result<Vec<usage_logs::Model>> {
        let pagination = pagination.check();
        let rows = sqlx::query(
            "SELECT * FROM usage_logs ORDER BY created_at DESC LIMIT ? OFFSET ?",
        )
        .bind(pagination.limit() as i64)
        .bind(pagination.offset() as i64)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_usage_log).collect()
    }

    async fn count_users(&self) -> Result<u64> {
        self.count("SELECT COUNT(*) AS count FROM users").await
    }

    async fn count_active_keys(&self) -> Result<u64> {
        self.count("SELECT COUNT(*) AS count FROM user_api_keys WHERE status = 'active'")
            .await
    }

    async fn count_quizzes(&self) -> Result<u64> {
        self.count("SELECT COUNT(*) AS count FROM generated_quizzes")
            .await
    }

    async fn count_openrouter_keys(&self) -> Result<u64> {
        self.count("SELECT COUNT(*) AS count FROM openrouter_api_keys")
            .await
    }

    async fn create_model(&self, model: &api_models::Model) -> Result<()> {
        sqlx::query(
            "INSERT INTO models (id, model_name, description, is_default) VALUES (?, ?, ?, ?)",
        )
        .bind(&model.id)
        .bind(&model.model_name)
        .bind(&model.description)
        .bind(model.is_default)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_model(
        &self,
        id: &str,
        model_name: &str,
        description: &str,
        is_default: bool,
    ) -> Result<()> {
        sqlx::query(
            "UPDATE models SET model_name = ?, description = ?, is_default = ? WHERE id = ?",
        )
        .bind(model_name)
        .bind(description)
        .bind(is_default)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_model(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM models WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn create_openrouter_key(&self, key: &openrouter_keys::Model) -> Result<()> {
        sqlx::query(
            "INSERT INTO openrouter_api_keys (id, api_key, description, is_default) VALUES (?, ?, ?, ?)",
        )
        .bind(&key.id)
        .bind(&key.api_key)
        .bind(&key.description)
        .bind(key.is_default)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_openrouter_key(
        &self,
        id: &str,
        api_key: &str,
        description: &str,
        is_default: bool,
    ) -> Result<()> {
        sqlx::query(
            "UPDATE openrouter_api_keys SET api_key = ?, description = ?, is_default = ? WHERE id = ?",
        )
        .bind(api_key)
        .bind(description)
        .bind(is_default)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_openrouter_key(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM openrouter_api_keys WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn create_usage_limit(&self, limit: &usage_limits::Model) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO usage_limits (id, tier_name, max_daily_limit, max_monthly_limit, price, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&limit.id)
        .bind(&limit.tier_name)
        .bind(limit.max_daily_limit)
        .bind(limit.max_monthly_limit)
        .bind(limit.price)
        .bind(limit.created_at.to_rfc3339())
        .bind(limit.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_usage_limit(
        &self,
        id: &str,
        tier_name: &str,
        max_daily_limit: i64,
        max_monthly_limit: i64,
        price: f64,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE usage_limits
            SET tier_name = ?, max_daily_limit = ?, max_monthly_limit = ?, price = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(tier_name)
        .bind(max_daily_limit)
        .bind(max_monthly_limit)
        .bind(price)
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_usage_limit(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM usage_limits WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn ping_table(&self, table: &str) -> Result<()> {
        if !TABLES.contains(&table) {
            return Err(anyhow::anyhow!("Unknown table: {}", table));
        }

        sqlx::query(&format!("SELECT 1 FROM {} LIMIT 1", table))
            .fetch_optional(&self.pool)
            .await?;
        Ok(())
    }
}
