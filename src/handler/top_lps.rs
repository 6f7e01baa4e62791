use crate::{
    configuration::{AppState, State},
    error::Error,
    helpers::{display_units, format_address, format_date, share_percent},
    model::TopLpEntry,
    types::LpUser,
};

/// How many liquidity providers the leaderboard shows.
const TOP_LPS_COUNT: usize = 5;

/// Fetches the largest LPs by token balance as table-ready rows.
pub async fn fetch(state: &AppState<State>) -> Result<Vec<TopLpEntry>, Error> {
    let users = state.subgraph.top_lps(TOP_LPS_COUNT).await?;

    Ok(users.iter().map(to_entry).collect())
}

fn to_entry(user: &LpUser) -> TopLpEntry {
    let last_activity = user.last_activity.unwrap_or(0);

    TopLpEntry {
        address: user.id.to_owned(),
        address_short: format_address(&user.id),
        lp_token_balance: display_units(user.lp_token_balance.as_deref()),
        share_of_pool: share_percent(user.share_of_pool.as_deref()),
        last_activity,
        last_activity_date: format_date(last_activity),
        tx_count: user.tx_count.unwrap_or(0),
    }
}
