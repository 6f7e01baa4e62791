use crate::{
    configuration::{AppState, State},
    error::Error,
    helpers::{combined_tvl, format_date},
    model::TvlPoint,
    provider::fetch_history,
    series::{dedupe_by_timestamp, sample_daily, SeriesPoint},
    types::PoolSnapshot,
};

/// Builds the daily TVL series for the chart.
///
/// Pages of pool snapshots are pulled until the coverage target is spanned,
/// converted into display-unit TVL points, deduplicated, and reduced to one
/// point per day.
pub async fn fetch(state: &AppState<State>) -> Result<Vec<TvlPoint>, Error> {
    let config = &state.config;

    let snapshots = fetch_history(
        config.page_size,
        config.coverage_secs(),
        config.max_history_records,
        |cursor| state.subgraph.pool_snapshots_page(config.page_size, cursor),
    )
    .await?;

    let points = to_points(&snapshots);
    let points = dedupe_by_timestamp(&points);
    let sampled = sample_daily(&points);

    Ok(sampled
        .into_iter()
        .map(|point| TvlPoint {
            timestamp: point.timestamp,
            tvl: point.value,
            date: format_date(point.timestamp),
        })
        .collect())
}

fn to_points(snapshots: &[PoolSnapshot]) -> Vec<SeriesPoint> {
    snapshots
        .iter()
        .map(|snapshot| SeriesPoint {
            timestamp: snapshot.timestamp,
            value: combined_tvl(
                snapshot.usd0_balance.as_deref(),
                snapshot.usd0_plus_balance.as_deref(),
            ),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_tvl_sums_both_balances() {
        let snapshots = vec![
            PoolSnapshot {
                timestamp: 100,
                usd0_balance: Some(String::from("2000000000000000000")),
                usd0_plus_balance: Some(String::from("3000000000000000000")),
                total_supply: Some(String::from("5000000000000000000")),
            },
            PoolSnapshot {
                timestamp: 200,
                usd0_balance: None,
                usd0_plus_balance: Some(String::from("1000000000000000000")),
                total_supply: None,
            },
        ];

        let points = to_points(&snapshots);

        assert_eq!(
            points,
            vec![
                SeriesPoint {
                    timestamp: 100,
                    value: 5.0
                },
                SeriesPoint {
                    timestamp: 200,
                    value: 1.0
                },
            ]
        );
    }
}
