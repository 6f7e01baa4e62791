//! Time-series reduction for chart data.
//!
//! Subgraph snapshots arrive at irregular on-chain event timestamps; the
//! functions here reduce them to chart-friendly daily series. All functions
//! sort an internal copy and leave the caller's slice untouched.

use serde::{Deserialize, Serialize};

pub const ONE_DAY_SECS: i64 = 24 * 60 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub timestamp: i64,
    pub value: f64,
}

fn sorted_copy(points: &[SeriesPoint]) -> Vec<SeriesPoint> {
    let mut sorted = points.to_vec();
    sorted.sort_by_key(|p| p.timestamp);
    sorted
}

/// Drops points sharing a timestamp with an earlier point and returns the
/// remainder sorted ascending. Pages fetched across a cursor boundary can
/// repeat the boundary record, so this runs before any sampling.
pub fn dedupe_by_timestamp(points: &[SeriesPoint]) -> Vec<SeriesPoint> {
    let mut sorted = sorted_copy(points);
    sorted.dedup_by_key(|p| p.timestamp);
    sorted
}

/// Reduces a series to at most one point per day.
///
/// Greedy forward scan: the chronologically first point is always kept, a
/// point is kept whenever it is at least one full day after the last kept
/// point, and the chronologically last point is always kept. The tail rule
/// can leave the final two points closer than a day apart. Every output
/// point is a verbatim input point.
pub fn sample_daily(points: &[SeriesPoint]) -> Vec<SeriesPoint> {
    let sorted = sorted_copy(points);
    let Some(first) = sorted.first().copied() else {
        return Vec::new();
    };

    let mut sampled = vec![first];
    let mut last_taken = first.timestamp;

    for point in &sorted {
        if point.timestamp - last_taken >= ONE_DAY_SECS {
            sampled.push(*point);
            last_taken = point.timestamp;
        }
    }

    if let Some(last) = sorted.last() {
        if last.timestamp != last_taken {
            sampled.push(*last);
        }
    }

    sampled
}

/// Projects a series onto a fixed trailing daily grid.
///
/// Returns exactly `window_days` points, one per UTC calendar day, ending on
/// the day of the latest input point. Each day takes the value of the first
/// input point falling inside it; days without a point carry the previous
/// day's value forward, and leading days before the first observation fall
/// back to the earliest input point's value. Output timestamps are the UTC
/// midnights of the grid.
///
/// An empty input yields an empty series.
pub fn daily_window(points: &[SeriesPoint], window_days: usize) -> Vec<SeriesPoint> {
    if window_days == 0 {
        return Vec::new();
    }

    let sorted = sorted_copy(points);
    let Some(latest) = sorted.last() else {
        return Vec::new();
    };

    let last_day_start = latest.timestamp.div_euclid(ONE_DAY_SECS) * ONE_DAY_SECS;
    let first_day_start = last_day_start - (window_days as i64 - 1) * ONE_DAY_SECS;

    let mut resolved: Vec<SeriesPoint> = Vec::with_capacity(window_days);
    let mut idx = 0;

    for day in 0..window_days as i64 {
        let day_start = first_day_start + day * ONE_DAY_SECS;
        let day_end = day_start + ONE_DAY_SECS;

        while idx < sorted.len() && sorted[idx].timestamp < day_start {
            idx += 1;
        }

        let value = if idx < sorted.len() && sorted[idx].timestamp < day_end {
            sorted[idx].value
        } else if let Some(previous) = resolved.last() {
            previous.value
        } else {
            sorted[0].value
        };

        resolved.push(SeriesPoint {
            timestamp: day_start,
            value,
        });
    }

    resolved
}
