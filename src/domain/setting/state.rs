//! Settings state container.

use super::{Setting, SettingCreate, SettingUpdate};
use crate::cache::{CacheEvent, Refresh, RequestOptions, ResourceCache};
use crate::error::{ActionError, SdkError};
use crate::shared::MessageResponse;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

#[async_trait]
pub trait SettingsBackend: Send + Sync + 'static {
    async fn list_settings(&self) -> Result<Vec<Setting>, SdkError>;
    async fn create_setting(&self, body: &SettingCreate) -> Result<Setting, SdkError>;
    async fn update_setting(&self, key: &str, body: &SettingUpdate) -> Result<Setting, SdkError>;
    async fn delete_setting(&self, key: &str) -> Result<MessageResponse, SdkError>;
}

/// Global settings keyed by name. Every [`fetch`](Self::fetch) reloads.
#[derive(Clone)]
pub struct SettingsState {
    backend: Arc<dyn SettingsBackend>,
    cache: ResourceCache<Setting, ()>,
}

impl SettingsState {
    pub fn new(backend: Arc<dyn SettingsBackend>) -> Self {
        let fetcher = {
            let backend = backend.clone();
            move |_: ()| {
                let backend = backend.clone();
                async move { backend.list_settings().await }
            }
        };
        Self {
            backend,
            cache: ResourceCache::new("settings", Duration::ZERO, fetcher),
        }
    }

    pub async fn fetch(&self) -> Refresh {
        self.cache.request(RequestOptions::default()).await
    }

    pub async fn create(&self, body: SettingCreate) -> Result<Setting, ActionError> {
        self.cache
            .mutate(self.backend.create_setting(&body), |setting| {
                Some(CacheEvent::Upserted(setting.clone()))
            })
            .await
    }

    pub async fn update(&self, key: &str, body: SettingUpdate) -> Result<Setting, ActionError> {
        self.cache
            .mutate(self.backend.update_setting(key, &body), |setting| {
                Some(CacheEvent::Upserted(setting.clone()))
            })
            .await
    }

    pub async fn delete(&self, key: &str) -> Result<MessageResponse, ActionError> {
        self.cache
            .mutate(self.backend.delete_setting(key), |_| {
                Some(CacheEvent::Removed(key.to_string()))
            })
            .await
    }

    pub fn cache(&self) -> &ResourceCache<Setting, ()> {
        &self.cache
    }

    pub fn settings(&self) -> Vec<Setting> {
        self.cache.items()
    }

    pub fn by_key(&self, key: &str) -> Option<Setting> {
        self.cache.find(|s| s.key == key)
    }

    pub fn loading(&self) -> bool {
        self.cache.loading()
    }

    pub fn error(&self) -> Option<String> {
        self.cache.error()
    }
}
