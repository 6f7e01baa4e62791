use crate::{
    configuration::{AppState, State},
    error::Error,
    helpers::{combined_tvl, display_units, format_number_with_commas},
    model::PoolOverview,
    types::Pool,
};

/// Fetches the tracked pool and derives the metric-card strings.
pub async fn fetch(state: &AppState<State>) -> Result<PoolOverview, Error> {
    let pool = state.subgraph.pool_overview().await?;

    let Some(pool) = pool else {
        return Err(Error::PoolNotFound(state.config.pool_id.to_owned()));
    };

    Ok(build_overview(&pool))
}

fn usd(value: f64) -> String {
    format!("${}", format_number_with_commas(value, 2))
}

fn build_overview(pool: &Pool) -> PoolOverview {
    let usd0_balance = display_units(pool.usd0_balance.as_deref());
    let usd0_plus_balance = display_units(pool.usd0_plus_balance.as_deref());
    let total_supply = display_units(pool.total_supply.as_deref());
    let volume = display_units(pool.volume.as_deref());

    let liquidity_added = display_units(pool.usd0_liquidity_added.as_deref())
        + display_units(pool.usd0_plus_liquidity_added.as_deref());
    let liquidity_removed = display_units(pool.usd0_liquidity_removed.as_deref())
        + display_units(pool.usd0_plus_liquidity_removed.as_deref());

    let tvl = combined_tvl(
        pool.usd0_balance.as_deref(),
        pool.usd0_plus_balance.as_deref(),
    );

    PoolOverview {
        name: pool.name.clone().unwrap_or_default(),
        usd0_balance: usd(usd0_balance),
        usd0_plus_balance: usd(usd0_plus_balance),
        total_supply: format_number_with_commas(total_supply, 2),
        volume: usd(volume),
        liquidity_added: usd(liquidity_added),
        liquidity_removed: usd(liquidity_removed),
        tvl: usd(tvl),
        updated_at: pool.updated_at,
    }
}
