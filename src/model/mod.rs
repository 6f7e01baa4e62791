//! Display-facing response models served by the API.
//!
//! These are the only shapes the frontend consumes: metric-card strings for
//! the pool overview, table rows for the top LPs, and daily series points
//! for the charts.

use serde::{Deserialize, Serialize};

/// One point of the TVL history chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TvlPoint {
    pub timestamp: i64,
    pub tvl: f64,
    pub date: String,
}

/// One point of a user's LP balance history chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BalancePoint {
    pub timestamp: i64,
    pub balance: f64,
    pub date: String,
}

/// Metric-card strings for the pool overview.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PoolOverview {
    pub name: String,
    pub usd0_balance: String,
    pub usd0_plus_balance: String,
    pub total_supply: String,
    pub volume: String,
    pub liquidity_added: String,
    pub liquidity_removed: String,
    pub tvl: String,
    pub updated_at: Option<i64>,
}

/// One row of the top liquidity providers table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopLpEntry {
    pub address: String,
    pub address_short: String,
    pub lp_token_balance: f64,
    pub share_of_pool: f64,
    pub last_activity: i64,
    pub last_activity_date: String,
    pub tx_count: i64,
}

/// A searched user's position summary plus windowed balance history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPosition {
    pub user_address: String,
    pub lp_token_balance: f64,
    pub share_of_pool: f64,
    pub last_activity: i64,
    pub last_activity_date: String,
    pub tx_count: i64,
    pub balance_history: Vec<BalancePoint>,
}

impl UserPosition {
    /// Position for an address the subgraph has never seen: zero balance,
    /// empty history. Distinct from a fetch error, which propagates.
    pub fn empty(address: &str) -> UserPosition {
        UserPosition {
            user_address: address.to_owned(),
            lp_token_balance: 0.0,
            share_of_pool: 0.0,
            last_activity: 0,
            last_activity_date: String::new(),
            tx_count: 0,
            balance_history: Vec::new(),
        }
    }
}
