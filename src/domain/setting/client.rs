//! Settings sub-client — global settings CRUD.

use crate::client::DashboardClient;
use crate::domain::setting::state::SettingsBackend;
use crate::domain::setting::{Setting, SettingCreate, SettingUpdate};
use crate::error::SdkError;
use crate::shared::MessageResponse;

use async_trait::async_trait;

pub struct Settings<'a> {
    pub(crate) client: &'a DashboardClient,
}

impl<'a> Settings<'a> {
    fn key_url(&self, key: &str) -> String {
        self.client
            .http
            .url(&format!("/settings/{}", urlencoding::encode(key)))
    }

    pub async fn list(&self) -> Result<Vec<Setting>, SdkError> {
        let url = self.client.http.url("/settings");
        Ok(self.client.http.get(&url).await?)
    }

    pub async fn get(&self, key: &str) -> Result<Setting, SdkError> {
        Ok(self.client.http.get(&self.key_url(key)).await?)
    }

    /// Create a setting. Writing the wallet key or browser address also
    /// rewrites the backend's `.env`; those take effect after a restart.
    pub async fn create(&self, body: &SettingCreate) -> Result<Setting, SdkError> {
        let url = self.client.http.url("/settings");
        Ok(self.client.http.post(&url, Some(body)).await?)
    }

    pub async fn update(&self, key: &str, body: &SettingUpdate) -> Result<Setting, SdkError> {
        Ok(self.client.http.put(&self.key_url(key), body).await?)
    }

    pub async fn delete(&self, key: &str) -> Result<MessageResponse, SdkError> {
        Ok(self.client.http.delete(&self.key_url(key)).await?)
    }
}

#[async_trait]
impl SettingsBackend for DashboardClient {
    async fn list_settings(&self) -> Result<Vec<Setting>, SdkError> {
        self.settings().list().await
    }

    async fn create_setting(&self, body: &SettingCreate) -> Result<Setting, SdkError> {
        self.settings().create(body).await
    }

    async fn update_setting(&self, key: &str, body: &SettingUpdate) -> Result<Setting, SdkError> {
        self.settings().update(key, body).await
    }

    async fn delete_setting(&self, key: &str) -> Result<MessageResponse, SdkError> {
        self.settings().delete(key).await
    }
}
