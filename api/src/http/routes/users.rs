/// Registration route

use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use validator::Validate;

use crate::app_state::AppState;
use crate::errors::ApiError;
use crate::usecases::create_user::CreateUser;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
}

// POST /api/v1/users
pub async fn create_user(
    payload: web::Json<CreateUserRequest>,
    state: web::Data<AppState>,
) -> Result<impl Responder, ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest {
        reason: e.to_string(),
    })?;

    let use_case = CreateUser::new(state.users.clone());
    let user = use_case
        .execute(&payload.name, &payload.email, &payload.password)
        .await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok(HttpResponse::Created().finish())
}
