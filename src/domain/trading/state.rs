//! Trading state container.

use super::{Control, TradingStatus};
use crate::cache::Busy;
use crate::error::{ActionError, SdkError};
use crate::shared::MessageResponse;

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;

#[async_trait]
pub trait TradingBackend: Send + Sync + 'static {
    async fn trading_status(&self) -> Result<TradingStatus, SdkError>;
    async fn control_trading(&self, action: Control) -> Result<MessageResponse, SdkError>;
}

#[derive(Debug, Default)]
struct Snapshot {
    status: Option<TradingStatus>,
    error: Option<String>,
}

/// Bot status plus start/stop/restart.
///
/// Control actions refresh the status on success. `loading` spans the whole
/// action including that refresh.
#[derive(Clone)]
pub struct TradingState {
    backend: Arc<dyn TradingBackend>,
    snapshot: Arc<RwLock<Snapshot>>,
    busy: Arc<Busy>,
}

impl TradingState {
    pub fn new(backend: Arc<dyn TradingBackend>) -> Self {
        Self {
            backend,
            snapshot: Arc::new(RwLock::new(Snapshot::default())),
            busy: Busy::new(),
        }
    }

    /// Refresh the run status. Failures are recorded and yield `None`.
    pub async fn fetch_status(&self) -> Option<TradingStatus> {
        let _busy = self.busy.enter();
        match self.backend.trading_status().await {
            Ok(status) => {
                let mut snapshot = self.snapshot.write();
                snapshot.status = Some(status.clone());
                snapshot.error = None;
                Some(status)
            }
            Err(err) => {
                let message = err.display_message();
                tracing::warn!(error = %message, "Failed to fetch trading status");
                self.snapshot.write().error = Some(message);
                None
            }
        }
    }

    pub async fn start(&self) -> Result<MessageResponse, ActionError> {
        self.control(Control::Start).await
    }

    pub async fn stop(&self) -> Result<MessageResponse, ActionError> {
        self.control(Control::Stop).await
    }

    pub async fn restart(&self) -> Result<MessageResponse, ActionError> {
        self.control(Control::Restart).await
    }

    async fn control(&self, action: Control) -> Result<MessageResponse, ActionError> {
        let _busy = self.busy.enter();
        self.snapshot.write().error = None;

        match self.backend.control_trading(action).await {
            Ok(response) => {
                tracing::info!(%action, message = %response.message, "Trading control succeeded");
                self.fetch_status().await;
                Ok(response)
            }
            Err(err) => {
                let err = ActionError::from(err);
                tracing::warn!(%action, error = %err.message, "Trading control failed");
                self.snapshot.write().error = Some(err.message.clone());
                Err(err)
            }
        }
    }

    pub fn status(&self) -> Option<TradingStatus> {
        self.snapshot.read().status.clone()
    }

    /// False until a status has been fetched.
    pub fn is_running(&self) -> bool {
        self.snapshot
            .read()
            .status
            .as_ref()
            .is_some_and(|s| s.is_running)
    }

    pub fn loading(&self) -> bool {
        self.busy.is_busy()
    }

    pub fn error(&self) -> Option<String> {
        self.snapshot.read().error.clone()
    }
}
