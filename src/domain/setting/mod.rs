//! Setting domain — global key/value bot settings.

#[cfg(feature = "http")]
pub mod client;
pub mod state;

use crate::cache::Resource;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub use state::{SettingsBackend, SettingsState};

/// A global setting. Keys are unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    pub id: i64,
    pub key: String,
    pub value: String,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Settings are addressed by key, so that is their identity.
impl Resource for Setting {
    type Id = String;

    fn id(&self) -> String {
        self.key.clone()
    }
}

/// Body for `POST /settings`. Duplicate keys are rejected with 400.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingCreate {
    pub key: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SettingCreate {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            description: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Body for `PUT /settings/{key}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingUpdate {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SettingUpdate {
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            description: None,
        }
    }
}
