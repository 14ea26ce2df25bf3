/// Health check routes

use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;

use crate::app_state::AppState;
use crate::infra::postgres;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

#[derive(Serialize)]
struct ReadyResponse {
    ready: bool,
    checks: HashMap<String, CheckResult>,
}

#[derive(Serialize)]
struct CheckResult {
    enabled: bool,
    ok: bool,
    details: String,
}

pub async fn healthz() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn readyz(state: web::Data<AppState>) -> impl Responder {
    let mut checks = HashMap::new();
    let mut overall_ready = true;

    if let Some(ref pool) = state.postgres {
        match postgres::check_postgres_health(pool).await {
            Ok(_) => {
                checks.insert(
                    "postgres".to_string(),
                    CheckResult {
                        enabled: true,
                        ok: true,
                        details: "healthy".to_string(),
                    },
                );
            }
            Err(e) => {
                overall_ready = false;
                checks.insert(
                    "postgres".to_string(),
                    CheckResult {
                        enabled: true,
                        ok: false,
                        details: e,
                    },
                );
            }
        }
    } else {
        checks.insert(
            "postgres".to_string(),
            CheckResult {
                enabled: false,
                ok: true,
                details: "running on in-memory stores".to_string(),
            },
        );
    }

    let mut builder = if overall_ready {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };

    builder.json(ReadyResponse {
        ready: overall_ready,
        checks,
    })
}
