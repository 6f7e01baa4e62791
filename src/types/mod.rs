//! Wire types for the subgraph GraphQL responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::provider::Timestamped;

// =============================================================================
// GRAPHQL ENVELOPE
// =============================================================================

#[derive(Debug, Serialize)]
pub struct QueryBody<'a> {
    pub query: &'a str,
    pub variables: Value,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

// =============================================================================
// POOL QUERIES
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct PoolData {
    pub pool: Option<Pool>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub name: Option<String>,
    pub usd0_balance: Option<String>,
    pub usd0_plus_balance: Option<String>,
    pub total_supply: Option<String>,
    pub volume: Option<String>,
    pub usd0_liquidity_added: Option<String>,
    pub usd0_liquidity_removed: Option<String>,
    pub usd0_plus_liquidity_added: Option<String>,
    pub usd0_plus_liquidity_removed: Option<String>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolSnapshotsData {
    pub pool_snapshots: Vec<PoolSnapshot>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PoolSnapshot {
    pub timestamp: i64,
    pub usd0_balance: Option<String>,
    pub usd0_plus_balance: Option<String>,
    pub total_supply: Option<String>,
}

impl Timestamped for PoolSnapshot {
    fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

// =============================================================================
// USER QUERIES
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct UsersData {
    pub users: Vec<LpUser>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LpUser {
    pub id: String,
    pub lp_token_balance: Option<String>,
    pub share_of_pool: Option<String>,
    pub last_activity: Option<i64>,
    pub tx_count: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UserData {
    pub user: Option<UserWithSnapshots>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserWithSnapshots {
    pub id: String,
    pub lp_token_balance: Option<String>,
    pub share_of_pool: Option<String>,
    pub last_activity: Option<i64>,
    pub tx_count: Option<i64>,
    #[serde(default)]
    pub user_snapshots: Vec<UserSnapshot>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserSnapshot {
    pub timestamp: i64,
    pub lp_token_balance: Option<String>,
    pub share_of_pool: Option<String>,
}

impl Timestamped for UserSnapshot {
    fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_snapshot_deserializes_camel_case() {
        let json = r#"{
            "timestamp": 1700000000,
            "usd0Balance": "2500000000000000000000000",
            "usd0PlusBalance": "2300000000000000000000000",
            "totalSupply": "4750000000000000000000000"
        }"#;

        let snapshot: PoolSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.timestamp, 1_700_000_000);
        assert_eq!(
            snapshot.usd0_balance.as_deref(),
            Some("2500000000000000000000000")
        );
    }

    #[test]
    fn user_without_snapshots_defaults_to_empty() {
        let json = r#"{
            "id": "0xabc",
            "lpTokenBalance": "0",
            "shareOfPool": null,
            "lastActivity": 1700000000,
            "txCount": 3
        }"#;

        let user: UserWithSnapshots = serde_json::from_str(json).unwrap();
        assert!(user.user_snapshots.is_empty());
        assert_eq!(user.tx_count, Some(3));
    }

    #[test]
    fn graphql_errors_deserialize() {
        let json = r#"{"data": null, "errors": [{"message": "indexing error"}]}"#;

        let body: GraphQlResponse<PoolData> = serde_json::from_str(json).unwrap();
        assert!(body.data.is_none());
        assert_eq!(body.errors.unwrap()[0].message, "indexing error");
    }
}
