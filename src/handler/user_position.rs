use crate::{
    configuration::{AppState, State},
    error::Error,
    helpers::{display_units, format_date, share_percent},
    model::{BalancePoint, UserPosition},
    provider::fetch_history,
    series::{daily_window, dedupe_by_timestamp, SeriesPoint},
    types::UserSnapshot,
};

/// Looks up a user's position and resamples their balance snapshots onto a
/// fixed trailing daily window for the history chart.
///
/// An address the subgraph has never seen resolves to an empty position;
/// fetch failures propagate.
pub async fn fetch(
    state: &AppState<State>,
    address: &str,
    window_days: usize,
) -> Result<UserPosition, Error> {
    let user = state.subgraph.user_overview(address).await?;

    let Some(user) = user else {
        return Ok(UserPosition::empty(address));
    };

    let config = &state.config;
    let snapshots = fetch_history(
        config.page_size,
        config.coverage_secs(),
        config.max_history_records,
        |cursor| {
            state
                .subgraph
                .user_snapshots_page(address, config.page_size, cursor)
        },
    )
    .await?;

    let points = to_points(&snapshots);
    let points = dedupe_by_timestamp(&points);
    let history = daily_window(&points, window_days);

    let last_activity = user.last_activity.unwrap_or(0);

    Ok(UserPosition {
        user_address: user.id,
        lp_token_balance: display_units(user.lp_token_balance.as_deref()),
        share_of_pool: share_percent(user.share_of_pool.as_deref()),
        last_activity,
        last_activity_date: format_date(last_activity),
        tx_count: user.tx_count.unwrap_or(0),
        balance_history: history
            .into_iter()
            .map(|point| BalancePoint {
                timestamp: point.timestamp,
                balance: point.value,
                date: format_date(point.timestamp),
            })
            .collect(),
    })
}

fn to_points(snapshots: &[UserSnapshot]) -> Vec<SeriesPoint> {
    snapshots
        .iter()
        .map(|snapshot| SeriesPoint {
            timestamp: snapshot.timestamp,
            value: display_units(snapshot.lp_token_balance.as_deref()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::ONE_DAY_SECS;

    #[test]
    fn snapshots_become_balance_points() {
        let snapshots = vec![
            UserSnapshot {
                timestamp: ONE_DAY_SECS,
                lp_token_balance: Some(String::from("45000000000000000000000")),
                share_of_pool: Some(String::from("0.01")),
            },
            UserSnapshot {
                timestamp: 2 * ONE_DAY_SECS,
                lp_token_balance: None,
                share_of_pool: None,
            },
        ];

        let points = to_points(&snapshots);

        assert_eq!(points[0].value, 45_000.0);
        assert_eq!(points[1].value, 0.0);
    }

    #[test]
    fn windowed_history_carries_balances_forward() {
        let snapshots = vec![
            UserSnapshot {
                timestamp: 10,
                lp_token_balance: Some(String::from("1000000000000000000")),
                share_of_pool: None,
            },
            UserSnapshot {
                timestamp: 2 * ONE_DAY_SECS + 10,
                lp_token_balance: Some(String::from("3000000000000000000")),
                share_of_pool: None,
            },
        ];

        let points = dedupe_by_timestamp(&to_points(&snapshots));
        let window = daily_window(&points, 3);

        let balances: Vec<f64> = window.iter().map(|p| p.value).collect();
        assert_eq!(balances, vec![1.0, 1.0, 3.0]);
    }
}
