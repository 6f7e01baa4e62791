pub mod pool;
pub mod top_lps;
pub mod tvl_series;
pub mod user_position;
pub mod version;
