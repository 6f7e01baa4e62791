use actix_web::{get, web, Responder, Result};
use serde::Deserialize;

use crate::{
    cache_keys,
    configuration::{AppState, State},
    error::Error,
    handler::user_position,
};

/// Upper bound on the requested history window.
const MAX_WINDOW_DAYS: usize = 90;

#[get("/user-position")]
async fn index(
    state: web::Data<AppState<State>>,
    data: web::Query<Query>,
) -> Result<impl Responder, Error> {
    let address = data.address.trim().to_lowercase();
    if address.is_empty() {
        return Err(Error::InvalidOption(String::from(
            "address must not be empty",
        )));
    }

    let mut days = data.days.unwrap_or(state.config.window_days);
    if days == 0 {
        days = state.config.window_days;
    }
    if days > MAX_WINDOW_DAYS {
        days = MAX_WINDOW_DAYS;
    }

    let key = cache_keys::user_position_key(&address, days);
    if let Some(cached) = state.api_cache.user_positions.get(&key).await {
        return Ok(web::Json(cached));
    }

    // Searches cannot be cancelled once in flight; only the latest issued
    // search may write the cache, so a slow stale response cannot clobber a
    // newer one.
    let token = state.search_generation.issue();
    let position = user_position::fetch(state.get_ref(), &address, days).await?;

    if state.search_generation.current() == token {
        state
            .api_cache
            .user_positions
            .set(&key, position.clone())
            .await;
    }

    Ok(web::Json(position))
}

#[derive(Debug, Deserialize)]
pub struct Query {
    address: String,
    days: Option<usize>,
}
