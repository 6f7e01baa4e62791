pub mod cache_refresher;
pub mod pool_overview;
pub mod top_lps;
pub mod tvl_history;
pub mod user_position;
