use actix_web::{get, web, Responder};
use serde::Serialize;

use crate::error::Error;

#[get("/version")]
async fn index() -> Result<impl Responder, Error> {
    Ok(web::Json(Response {
        version: env!("CARGO_PKG_VERSION"),
    }))
}

#[derive(Debug, Serialize)]
pub struct Response {
    pub version: &'static str,
}
