//! Cursor-paginated history retrieval.
//!
//! The subgraph serves snapshots newest-first in bounded pages; this loop
//! keeps requesting older pages until the accumulated records span the
//! coverage target, the source is exhausted, or a hard record bound is hit.

use std::future::Future;

use tracing::{debug, warn};

use crate::error::Error;

/// A record carrying a unix timestamp, the pagination and coverage key.
pub trait Timestamped {
    fn timestamp(&self) -> i64;
}

/// Fetches pages of timestamped records until enough history accumulates.
///
/// `fetch_page` receives an exclusive upper bound for the next page's
/// timestamps (`None` for the first page) and returns one page, newest
/// records first by convention, though no ordering is assumed. The minimum
/// timestamp of each page becomes the next cursor.
///
/// After every page the loop stops when, in priority order:
/// 1. the page was shorter than `page_size` (source exhausted),
/// 2. some accumulated record is at least `coverage_secs` older than the
///    newest accumulated record (coverage satisfied),
/// 3. `max_records` have accumulated (soft safety stop).
///
/// An empty page ends the loop immediately. Pagination is strictly
/// sequential and failures propagate to the caller; records are returned in
/// receipt order and may repeat a cursor-boundary timestamp, so callers
/// deduplicate before sampling.
pub async fn fetch_history<R, F, Fut>(
    page_size: usize,
    coverage_secs: i64,
    max_records: usize,
    mut fetch_page: F,
) -> Result<Vec<R>, Error>
where
    R: Timestamped,
    F: FnMut(Option<i64>) -> Fut,
    Fut: Future<Output = Result<Vec<R>, Error>>,
{
    let mut records: Vec<R> = Vec::new();
    let mut cursor: Option<i64> = None;

    loop {
        let page = fetch_page(cursor).await?;
        if page.is_empty() {
            break;
        }

        let short_page = page.len() < page_size;
        let oldest = page.iter().map(Timestamped::timestamp).min();

        records.extend(page);

        if short_page {
            debug!("history source exhausted after {} records", records.len());
            break;
        }

        // The newest timestamp is recomputed over everything accumulated so
        // far, not just the latest page, in case pages arrive out of order.
        let Some(newest) = records.iter().map(Timestamped::timestamp).max() else {
            break;
        };
        if records
            .iter()
            .any(|record| record.timestamp() <= newest - coverage_secs)
        {
            debug!("coverage target reached with {} records", records.len());
            break;
        }

        if records.len() >= max_records {
            warn!("history fetch stopped at the {} record bound", max_records);
            break;
        }

        cursor = oldest;
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::series::ONE_DAY_SECS;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Stamp(i64);

    impl Timestamped for Stamp {
        fn timestamp(&self) -> i64 {
            self.0
        }
    }

    const TWO_WEEKS: i64 = 14 * ONE_DAY_SECS;

    #[tokio::test]
    async fn short_page_ends_the_loop() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let records = fetch_history(10, TWO_WEEKS, 100_000, move |_cursor| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(vec![Stamp(300), Stamp(200), Stamp(100)])
            }
        })
        .await
        .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_page_ends_the_loop() {
        let records: Vec<Stamp> = fetch_history(10, TWO_WEEKS, 100_000, |_cursor| async {
            Ok(Vec::new())
        })
        .await
        .unwrap();

        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn stops_when_coverage_is_reached() {
        // page 0 spans a few seconds; page 1 dips past newest - coverage
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let newest = 30 * ONE_DAY_SECS;

        let records = fetch_history(3, TWO_WEEKS, 100_000, move |_cursor| {
            let counter = counter.clone();
            async move {
                let call = counter.fetch_add(1, Ordering::SeqCst);
                let page = match call {
                    0 => vec![Stamp(newest), Stamp(newest - 1), Stamp(newest - 2)],
                    1 => vec![
                        Stamp(newest - TWO_WEEKS),
                        Stamp(newest - TWO_WEEKS - 1),
                        Stamp(newest - TWO_WEEKS - 2),
                    ],
                    _ => panic!("loop should have stopped after coverage was met"),
                };
                Ok(page)
            }
        })
        .await
        .unwrap();

        assert_eq!(records.len(), 6);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn coverage_uses_newest_across_all_pages() {
        // pages arrive out of order: the second page holds the newest record.
        // Coverage must be measured against that record, not the first page.
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let records = fetch_history(2, TWO_WEEKS, 100_000, move |_cursor| {
            let counter = counter.clone();
            async move {
                let call = counter.fetch_add(1, Ordering::SeqCst);
                let page = match call {
                    0 => vec![Stamp(20 * ONE_DAY_SECS), Stamp(19 * ONE_DAY_SECS)],
                    // newest overall plus a record two weeks older than it
                    1 => vec![Stamp(34 * ONE_DAY_SECS), Stamp(20 * ONE_DAY_SECS - 1)],
                    _ => panic!("coverage should be satisfied after two pages"),
                };
                Ok(page)
            }
        })
        .await
        .unwrap();

        assert_eq!(records.len(), 4);
    }

    #[tokio::test]
    async fn infinite_source_stops_exactly_at_the_record_bound() {
        // identical full pages, coverage never satisfied
        let records = fetch_history(10, TWO_WEEKS, 50, |_cursor| async {
            Ok((0..10).map(|i| Stamp(1_000_000 - i)).collect::<Vec<_>>())
        })
        .await
        .unwrap();

        assert_eq!(records.len(), 50);
    }

    #[tokio::test]
    async fn cursor_is_the_minimum_of_the_previous_page() {
        let cursors = Arc::new(Mutex::new(Vec::new()));
        let seen = cursors.clone();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let _ = fetch_history(3, TWO_WEEKS, 100_000, move |cursor| {
            let seen = seen.clone();
            let counter = counter.clone();
            async move {
                seen.lock().unwrap().push(cursor);
                let call = counter.fetch_add(1, Ordering::SeqCst);
                let page = match call {
                    // deliberately unsorted page; the cursor must still be
                    // its minimum timestamp
                    0 => vec![Stamp(5_000), Stamp(9_000), Stamp(7_000)],
                    _ => vec![Stamp(4_000)],
                };
                Ok(page)
            }
        })
        .await
        .unwrap();

        assert_eq!(*cursors.lock().unwrap(), vec![None, Some(5_000)]);
    }

    #[tokio::test]
    async fn fetch_failure_propagates() {
        let result: Result<Vec<Stamp>, Error> =
            fetch_history(10, TWO_WEEKS, 100_000, |_cursor| async {
                Err(Error::Transport(502))
            })
            .await;

        assert!(matches!(result, Err(Error::Transport(502))));
    }
}
