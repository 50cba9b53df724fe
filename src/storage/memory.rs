//! In-memory storage implementations, used by unit tests and local runs
//! without a database file.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use anyhow::Result;

use super::{ApiKeyStorage, ConfigStorage, QuizStorage};
use super::entities::{api_keys, api_models, generated_quizzes, openrouter_keys};

pub struct InMemoryApiKeyStorage {
    keys: RwLock<HashMap<String, api_keys::Model>>,
}

impl InMemoryApiKeyStorage {
    pub fn new() -> Self {
        Self {
            keys: RwLock::new(HashMap::new()),
        }
    }

    pub fn set_key(&self, key: api_keys::Model) {
        let mut keys = self.keys.write().unwrap_or_else(|e| e.into_inner());
        keys.insert(key.user_api_key.clone(), key);
    }
}

impl Default for InMemoryApiKeyStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApiKeyStorage for InMemoryApiKeyStorage {
    async fn get_key(&self, api_key: &str) -> Result<Option<api_keys::Model>> {
        let keys = self
            .keys
            .read()
            .map_err(|e| anyhow::anyhow!("key store poisoned: {}", e))?;
        Ok(keys.get(api_key).cloned())
    }
}

pub struct InMemoryConfigStorage {
    model: RwLock<Option<api_models::Model>>,
    openrouter_key: RwLock<Option<openrouter_keys::Model>>,
}

impl InMemoryConfigStorage {
    pub fn new() -> Self {
        Self {
            model: RwLock::new(None),
            openrouter_key: RwLock::new(None),
        }
    }

    pub fn set_default_model(&self, model: api_models::Model) {
        *self.model.write().unwrap_or_else(|e| e.into_inner()) = Some(model);
    }

    pub fn set_default_openrouter_key(&self, key: openrouter_keys::Model) {
        *self.openrouter_key.write().unwrap_or_else(|e| e.into_inner()) = Some(key);
    }
}

impl Default for InMemoryConfigStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStorage for InMemoryConfigStorage {
    async fn default_model(&self) -> Result<Option<api_models::Model>> {
        let model = self
            .model
            .read()
            .map_err(|e| anyhow::anyhow!("config store poisoned: {}", e))?;
        Ok(model.clone().filter(|m| m.is_default))
    }

    async fn default_openrouter_key(&self) -> Result<Option<openrouter_keys::Model>> {
        let key = self
            .openrouter_key
            .read()
            .map_err(|e| anyhow::anyhow!("config store poisoned: {}", e))?;
        Ok(key.clone().filter(|k| k.is_default))
    }
}

pub struct InMemoryQuizStorage {
    quizzes: RwLock<Vec<generated_quizzes::Model>>,
    fail_writes: AtomicBool,
}

impl InMemoryQuizStorage {
    pub fn new() -> Self {
        Self {
            quizzes: RwLock::new(Vec::new()),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn saved(&self) -> Vec<generated_quizzes::Model> {
        self.quizzes
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Default for InMemoryQuizStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuizStorage for InMemoryQuizStorage {
    async fn insert_quiz(&self, quiz: &generated_quizzes::Model) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(anyhow::anyhow!("quiz store unavailable"));
        }
        let mut quizzes = self
            .quizzes
            .write()
            .map_err(|e| anyhow::anyhow!("quiz store poisoned: {}", e))?;
        quizzes.push(quiz.clone());
        Ok(())
    }
}
