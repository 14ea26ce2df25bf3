/// Bearer-token authentication middleware
///
/// Verifies the JWT on protected paths and places the subject user id into
/// request extensions for the handlers.
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use serde::Serialize;
use std::{
    future::{ready, Ready},
    rc::Rc,
};

use super::AuthenticatedUser;
use crate::config::AuthConfig;

#[derive(Serialize)]
struct AuthErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

fn unauthorized(details: &str) -> HttpResponse {
    HttpResponse::Unauthorized().json(AuthErrorResponse {
        error: "Unauthorized".to_string(),
        details: Some(details.to_string()),
    })
}

#[derive(Clone)]
pub struct BearerAuth {
    config: AuthConfig,
}

impl BearerAuth {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
            config: self.config.clone(),
        }))
    }
}

pub struct BearerAuthMiddleware<S> {
    service: Rc<S>,
    config: AuthConfig,
}

impl<S> BearerAuthMiddleware<S> {
    fn is_bypassed(&self, path: &str) -> bool {
        self.config.bypass_paths.iter().any(|bp| path == bp)
    }

    fn is_protected(&self, path: &str) -> bool {
        self.config
            .protect_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix))
    }
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let path = req.path().to_string();

        if self.is_bypassed(&path) || !self.is_protected(&path) {
            let service = self.service.clone();
            return Box::pin(async move {
                let res = service.call(req).await?;
                Ok(res.map_into_left_body())
            });
        }

        let token = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::to_string);

        let token = match token {
            Some(t) => t,
            None => {
                let response = unauthorized("Missing bearer token");
                let (req, _) = req.into_parts();
                return Box::pin(async move {
                    Ok(ServiceResponse::new(req, response).map_into_right_body())
                });
            }
        };

        let user_id = match finledger_auth::verify_token(&token, &self.config.jwt_secret) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(error = %e, path = %path, "Token verification failed");
                let response = unauthorized("Invalid or expired token");
                let (req, _) = req.into_parts();
                return Box::pin(async move {
                    Ok(ServiceResponse::new(req, response).map_into_right_body())
                });
            }
        };

        req.extensions_mut().insert(AuthenticatedUser(user_id));

        let service = self.service.clone();
        Box::pin(async move {
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
