/// Build info route

use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use crate::app_state::AppState;

#[derive(Serialize)]
struct VersionResponse<'a> {
    service: &'a str,
    version: &'a str,
}

// GET /version
pub async fn version(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(VersionResponse {
        service: &state.service_config.name,
        version: &state.service_config.version,
    })
}
