use actix_web::{get, web, Responder, Result};

use crate::{
    cache_keys,
    configuration::{AppState, State},
    error::Error,
    handler::top_lps,
};

#[get("/top-lps")]
async fn index(state: web::Data<AppState<State>>) -> Result<impl Responder, Error> {
    if let Some(cached) = state.api_cache.top_lps.get(cache_keys::TOP_LPS).await {
        return Ok(web::Json(cached));
    }

    let data = top_lps::fetch(state.get_ref()).await?;
    state
        .api_cache
        .top_lps
        .set(cache_keys::TOP_LPS, data.clone())
        .await;

    Ok(web::Json(data))
}
