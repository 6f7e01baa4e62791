use actix_web::{get, web, Responder, Result};

use crate::{
    cache_keys,
    configuration::{AppState, State},
    error::Error,
    handler::pool_overview,
};

#[get("/pool")]
async fn index(state: web::Data<AppState<State>>) -> Result<impl Responder, Error> {
    if let Some(cached) = state.api_cache.pool.get(cache_keys::POOL_OVERVIEW).await {
        return Ok(web::Json(cached));
    }

    let data = pool_overview::fetch(state.get_ref()).await?;
    state
        .api_cache
        .pool
        .set(cache_keys::POOL_OVERVIEW, data.clone())
        .await;

    Ok(web::Json(data))
}
