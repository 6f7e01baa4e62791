use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::{
    configuration::Config,
    error::Error,
    types::{
        GraphQlResponse, LpUser, Pool, PoolData, PoolSnapshot, PoolSnapshotsData, QueryBody,
        UserData, UserSnapshot, UserWithSnapshots, UsersData,
    },
};

const POOL_OVERVIEW_QUERY: &str = r#"
    query PoolOverview($poolId: ID!) {
        pool(id: $poolId) {
            name
            usd0Balance
            usd0PlusBalance
            totalSupply
            volume
            usd0LiquidityAdded
            usd0LiquidityRemoved
            usd0PlusLiquidityAdded
            usd0PlusLiquidityRemoved
            createdAt
            updatedAt
        }
    }
"#;

const TOP_LPS_QUERY: &str = r#"
    query TopLps($first: Int!) {
        users(first: $first, orderBy: lpTokenBalance, orderDirection: desc) {
            id
            lpTokenBalance
            shareOfPool
            lastActivity
            txCount
        }
    }
"#;

const POOL_SNAPSHOTS_QUERY: &str = r#"
    query PoolSnapshots($first: Int!) {
        poolSnapshots(first: $first, orderBy: timestamp, orderDirection: desc) {
            timestamp
            usd0Balance
            usd0PlusBalance
            totalSupply
        }
    }
"#;

const POOL_SNAPSHOTS_BEFORE_QUERY: &str = r#"
    query PoolSnapshots($first: Int!, $timestampLt: Int!) {
        poolSnapshots(
            first: $first,
            orderBy: timestamp,
            orderDirection: desc,
            where: { timestamp_lt: $timestampLt }
        ) {
            timestamp
            usd0Balance
            usd0PlusBalance
            totalSupply
        }
    }
"#;

const USER_POSITION_QUERY: &str = r#"
    query UserPosition($userId: ID!, $first: Int!) {
        user(id: $userId) {
            id
            lpTokenBalance
            shareOfPool
            lastActivity
            txCount
            userSnapshots(first: $first, orderBy: timestamp, orderDirection: desc) {
                timestamp
                lpTokenBalance
                shareOfPool
            }
        }
    }
"#;

const USER_SNAPSHOTS_BEFORE_QUERY: &str = r#"
    query UserSnapshots($userId: ID!, $first: Int!, $timestampLt: Int!) {
        user(id: $userId) {
            id
            lpTokenBalance
            shareOfPool
            lastActivity
            txCount
            userSnapshots(
                first: $first,
                orderBy: timestamp,
                orderDirection: desc,
                where: { timestamp_lt: $timestampLt }
            ) {
                timestamp
                lpTokenBalance
                shareOfPool
            }
        }
    }
"#;

/// JSON-over-HTTP client for the pool subgraph.
#[derive(Debug)]
pub struct Subgraph {
    config: Config,
    pub http: Client,
}

impl Subgraph {
    pub fn new(config: Config) -> Result<Subgraph, Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Subgraph { config, http })
    }

    /// One GraphQL round trip. A non-2xx status or an errors array in the
    /// payload surfaces as a failure; there is no retry at this layer.
    async fn query<T: DeserializeOwned>(
        &self,
        query: &'static str,
        variables: Value,
    ) -> Result<T, Error> {
        let res = self
            .http
            .post(&self.config.graphql_endpoint)
            .bearer_auth(&self.config.graphql_auth_token)
            .json(&QueryBody { query, variables })
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            return Err(Error::Transport(status.as_u16()));
        }

        let body: GraphQlResponse<T> = res.json().await?;

        if let Some(errors) = body.errors {
            if !errors.is_empty() {
                let message = errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<String>>()
                    .join("; ");
                return Err(Error::Graphql(message));
            }
        }

        body.data
            .ok_or_else(|| Error::Graphql(String::from("response contained no data")))
    }

    pub async fn pool_overview(&self) -> Result<Option<Pool>, Error> {
        let variables = json!({ "poolId": self.config.pool_id });
        let data: PoolData = self.query(POOL_OVERVIEW_QUERY, variables).await?;

        Ok(data.pool)
    }

    pub async fn top_lps(&self, first: usize) -> Result<Vec<LpUser>, Error> {
        let variables = json!({ "first": first });
        let data: UsersData = self.query(TOP_LPS_QUERY, variables).await?;

        Ok(data.users)
    }

    /// One page of pool snapshots, newest first, strictly older than
    /// `before` when a cursor is given.
    pub async fn pool_snapshots_page(
        &self,
        first: usize,
        before: Option<i64>,
    ) -> Result<Vec<PoolSnapshot>, Error> {
        let data: PoolSnapshotsData = match before {
            Some(timestamp_lt) => {
                let variables = json!({ "first": first, "timestampLt": timestamp_lt });
                self.query(POOL_SNAPSHOTS_BEFORE_QUERY, variables).await?
            }
            None => {
                let variables = json!({ "first": first });
                self.query(POOL_SNAPSHOTS_QUERY, variables).await?
            }
        };

        Ok(data.pool_snapshots)
    }

    /// The user's current position with its most recent snapshot.
    pub async fn user_overview(
        &self,
        address: &str,
    ) -> Result<Option<UserWithSnapshots>, Error> {
        let variables = json!({ "userId": address, "first": 1 });
        let data: UserData = self.query(USER_POSITION_QUERY, variables).await?;

        Ok(data.user)
    }

    /// One page of a user's balance snapshots, newest first. An unknown
    /// address yields an empty page.
    pub async fn user_snapshots_page(
        &self,
        address: &str,
        first: usize,
        before: Option<i64>,
    ) -> Result<Vec<UserSnapshot>, Error> {
        let data: UserData = match before {
            Some(timestamp_lt) => {
                let variables =
                    json!({ "userId": address, "first": first, "timestampLt": timestamp_lt });
                self.query(USER_SNAPSHOTS_BEFORE_QUERY, variables).await?
            }
            None => {
                let variables = json!({ "userId": address, "first": first });
                self.query(USER_POSITION_QUERY, variables).await?
            }
        };

        Ok(data
            .user
            .map(|user| user.user_snapshots)
            .unwrap_or_default())
    }
}
