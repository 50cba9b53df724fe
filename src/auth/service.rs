use std::sync::Arc;
use tracing::info;

use super::error::AuthError;
use crate::storage::ApiKeyStorage;

pub struct Auth {
    key_storage: Arc<dyn ApiKeyStorage>,
}

impl Auth {
    pub fn new(key_storage: Arc<dyn ApiKeyStorage>) -> Self {
        Self { key_storage }
    }

    /// Resolve a caller API key to its subscription tier ("free", "silver",
    /// "gold"). Unknown and inactive keys are rejected separately so the
    /// handler can answer 401 vs 403.
    pub async fn verify_api_key(&self, api_key: Option<&str>) -> Result<String, AuthError> {
        let api_key = api_key.ok_or(AuthError::MissingApiKey)?;

        let key_info = self
            .key_storage
            .get_key(api_key)
            .await
            .map_err(|e| AuthError::StorageError(e.to_string()))?
            .ok_or(AuthError::InvalidApiKey)?;

        if key_info.status == "inactive" {
            return Err(AuthError::KeyInactive);
        }

        info!("API key accepted with tier {}", key_info.user_type);
        Ok(key_info.user_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::entities::api_keys;
    use crate::storage::memory::InMemoryApiKeyStorage;

    fn setup_auth_with_key(status: &str) -> Auth {
        let storage = InMemoryApiKeyStorage::new();
        storage.set_key(api_keys::Model {
            user_api_key: "test-key-123".to_string(),
            user_type: "silver".to_string(),
            status: status.to_string(),
            user_id: "user-1".to_string(),
        });
        Auth::new(Arc::new(storage))
    }

    #[tokio::test]
    async fn active_key_resolves_to_tier() {
        let auth = setup_auth_with_key("active");
        let tier = auth.verify_api_key(Some("test-key-123")).await.unwrap();
        assert_eq!(tier, "silver");
    }

    #[tokio::test]
    async fn missing_key_is_rejected() {
        let auth = setup_auth_with_key("active");
        assert!(matches!(
            auth.verify_api_key(None).await,
            Err(AuthError::MissingApiKey)
        ));
    }

    #[tokio::test]
    async fn unknown_key_is_rejected() {
        let auth = setup_auth_with_key("active");
        assert!(matches!(
            auth.verify_api_key(Some("nope")).await,
            Err(AuthError::InvalidApiKey)
        ));
    }

    #[tokio::test]
    async fn inactive_key_is_rejected() {
        let auth = setup_auth_with_key("inactive");
        assert!(matches!(
            auth.verify_api_key(Some("test-key-123")).await,
            Err(AuthError::KeyInactive)
        ));
    }
}
