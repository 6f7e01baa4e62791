use actix_web::{get, web, Responder, Result};

use crate::{
    cache_keys,
    configuration::{AppState, State},
    error::Error,
    handler::tvl_history,
};

#[get("/tvl-series")]
async fn index(state: web::Data<AppState<State>>) -> Result<impl Responder, Error> {
    if let Some(cached) = state.api_cache.tvl_series.get(cache_keys::TVL_SERIES).await {
        return Ok(web::Json(cached));
    }

    let data = tvl_history::fetch(state.get_ref()).await?;
    state
        .api_cache
        .tvl_series
        .set(cache_keys::TVL_SERIES, data.clone())
        .await;

    Ok(web::Json(data))
}
