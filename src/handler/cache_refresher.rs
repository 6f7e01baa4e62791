//! Background cache refresh task
//!
//! Proactively re-runs the three pool-level pipelines on an interval so API
//! responses are served warm. The pipelines are independent; one failing
//! refresh is logged and does not stop the others or the loop. The
//! per-address user-search pipeline is request-driven and not refreshed here.

use std::time::Duration;

use futures::join;
use tokio::time::interval;
use tracing::{error, info};

use crate::{
    cache_keys,
    configuration::{AppState, State},
    error::Error,
    handler::{pool_overview, top_lps, tvl_history},
};

/// Main background task for cache refresh. Runs indefinitely.
pub async fn cache_refresh_task(app_state: AppState<State>) -> Result<(), Error> {
    info!("Starting cache refresh background task");

    refresh_all(&app_state).await;
    info!("Initial cache population complete");

    let mut check_interval =
        interval(Duration::from_secs(app_state.config.refresh_interval_secs));
    check_interval.tick().await;

    loop {
        check_interval.tick().await;
        refresh_all(&app_state).await;
    }
}

async fn refresh_all(app_state: &AppState<State>) {
    let (pool, lps, tvl) = join!(
        refresh_pool(app_state),
        refresh_top_lps(app_state),
        refresh_tvl_series(app_state),
    );

    for (name, result) in [
        ("pool overview", pool),
        ("top LPs", lps),
        ("TVL series", tvl),
    ] {
        if let Err(e) = result {
            error!("Cache refresh for {} failed: {}", name, e);
        }
    }
}

async fn refresh_pool(app_state: &AppState<State>) -> Result<(), Error> {
    let data = pool_overview::fetch(app_state).await?;
    app_state
        .api_cache
        .pool
        .set(cache_keys::POOL_OVERVIEW, data)
        .await;

    Ok(())
}

async fn refresh_top_lps(app_state: &AppState<State>) -> Result<(), Error> {
    let data = top_lps::fetch(app_state).await?;
    app_state
        .api_cache
        .top_lps
        .set(cache_keys::TOP_LPS, data)
        .await;

    Ok(())
}

async fn refresh_tvl_series(app_state: &AppState<State>) -> Result<(), Error> {
    let data = tvl_history::fetch(app_state).await?;
    app_state
        .api_cache
        .tvl_series
        .set(cache_keys::TVL_SERIES, data)
        .await;

    Ok(())
}
