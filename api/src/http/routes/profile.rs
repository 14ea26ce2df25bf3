/// Profile route

use actix_web::{web, HttpRequest, HttpResponse, Responder};

use crate::app_state::AppState;
use crate::errors::ApiError;
use crate::http::middleware::authenticated_user;
use crate::usecases::show_user_profile::ShowUserProfile;

// GET /api/v1/profile
pub async fn show_profile(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<impl Responder, ApiError> {
    let user_id = authenticated_user(&req)?;

    let use_case = ShowUserProfile::new(state.users.clone());
    let user = use_case.execute(user_id).await?;

    // `User` skips the password hash on serialization
    Ok(HttpResponse::Ok().json(user))
}
