/// Session (authentication) route

use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use crate::app_state::AppState;
use crate::config::AuthConfig;
use crate::errors::ApiError;
use crate::usecases::authenticate_user::AuthenticateUser;

#[derive(Debug, Deserialize)]
pub struct SessionRequest {
    pub email: String,
    pub password: String,
}

// POST /api/v1/sessions
pub async fn create_session(
    payload: web::Json<SessionRequest>,
    state: web::Data<AppState>,
    auth_config: web::Data<AuthConfig>,
) -> Result<impl Responder, ApiError> {
    let use_case = AuthenticateUser::new(
        state.users.clone(),
        auth_config.jwt_secret.clone(),
        auth_config.token_ttl_secs,
    );

    let session = use_case.execute(&payload.email, &payload.password).await?;

    tracing::info!(user_id = %session.user.id, "Session issued");

    Ok(HttpResponse::Ok().json(session))
}
