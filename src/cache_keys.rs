//! Centralized cache key constants
//!
//! All cache keys used by controllers and cache_refresher are defined here
//! to prevent duplication and drift between the two locations.

pub const POOL_OVERVIEW: &str = "pool_overview";
pub const TOP_LPS: &str = "top_lps";
pub const TVL_SERIES: &str = "tvl_series";

/// Cache key for a user-position lookup: the window length is part of the
/// key because it changes the resampled history.
pub fn user_position_key(address: &str, window_days: usize) -> String {
    format!("{}_{}", address, window_days)
}
