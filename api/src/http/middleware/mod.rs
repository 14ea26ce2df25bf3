/// HTTP middleware

pub mod bearer_auth;
pub mod logger;
pub mod request_id;

use actix_web::{HttpMessage, HttpRequest};
use uuid::Uuid;

use crate::errors::ApiError;

/// User id placed in request extensions by the bearer-auth middleware
#[derive(Clone, Copy)]
pub struct AuthenticatedUser(pub Uuid);

/// Read the authenticated user id set by `bearer_auth`.
///
/// Handlers behind a protected prefix always find it; a missing value means
/// the route was wired outside the protected scope.
pub fn authenticated_user(req: &HttpRequest) -> Result<Uuid, ApiError> {
    req.extensions()
        .get::<AuthenticatedUser>()
        .map(|u| u.0)
        .ok_or_else(|| ApiError::Unauthorized {
            reason: "Missing bearer token".to_string(),
        })
}
