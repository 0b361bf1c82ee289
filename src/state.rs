//! `DashboardState` — one instance of every state container.

use crate::client::DashboardClient;
use crate::domain::market::MarketsState;
use crate::domain::order::OrdersState;
use crate::domain::position::PositionsState;
use crate::domain::setting::SettingsState;
use crate::domain::stats::StatsState;
use crate::domain::trading::TradingState;

use std::sync::Arc;

/// All dashboard state, built once by the application and injected where
/// needed. Cloning yields handles to the same containers.
#[derive(Clone)]
pub struct DashboardState {
    pub markets: MarketsState,
    pub positions: PositionsState,
    pub orders: OrdersState,
    pub settings: SettingsState,
    pub stats: StatsState,
    pub trading: TradingState,
}

impl DashboardState {
    pub fn new(client: &DashboardClient) -> Self {
        let backend = Arc::new(client.clone());
        Self {
            markets: MarketsState::new(backend.clone()),
            positions: PositionsState::from_client(client),
            orders: OrdersState::from_client(client),
            settings: SettingsState::new(backend.clone()),
            stats: StatsState::new(backend.clone()),
            trading: TradingState::new(backend),
        }
    }

    /// Forget freshness of every TTL-gated container.
    pub fn invalidate(&self) {
        self.positions.invalidate();
        self.orders.invalidate();
    }
}
