use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App};
use rust_decimal_macros::dec;
use serde_json::json;

use finledger_api::app_state::AppState;
use finledger_api::config::{AuthConfig, ServiceConfig};
use finledger_api::domain::{AccountBalance, Statement};
use finledger_api::http::middleware::bearer_auth::BearerAuth;
use finledger_api::http::routes;
use finledger_api::repository::memory::{InMemoryStatementsRepository, InMemoryUsersRepository};

fn build_state() -> (web::Data<AppState>, web::Data<AuthConfig>, BearerAuth) {
    let auth_config = AuthConfig::default();
    let state = AppState::new(
        ServiceConfig::default(),
        Arc::new(InMemoryUsersRepository::new()),
        Arc::new(InMemoryStatementsRepository::new()),
        None,
    );
    (
        web::Data::new(state),
        web::Data::new(auth_config.clone()),
        BearerAuth::new(auth_config),
    )
}

macro_rules! init_app {
    ($state:expr, $auth_config:expr, $bearer:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .app_data($auth_config.clone())
                .wrap($bearer.clone())
                .configure(routes::configure),
        )
        .await
    };
}

macro_rules! register_and_login {
    ($app:expr, $email:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({"name": "User Name", "email": $email, "password": "abc123"}))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/api/v1/sessions")
            .set_json(json!({"email": $email, "password": "abc123"}))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        body["token"].as_str().expect("token").to_string()
    }};
}

#[actix_rt::test]
async fn test_register_login_and_profile() {
    let (state, auth_config, bearer) = build_state();
    let app = init_app!(state, auth_config, bearer);

    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({"name": "User Name", "email": "test@test.com", "password": "abc123"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Wrong password: undifferentiated 401
    let req = test::TestRequest::post()
        .uri("/api/v1/sessions")
        .set_json(json!({"email": "test@test.com", "password": "wrong"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Correct credentials: projection without password plus a token
    let req = test::TestRequest::post()
        .uri("/api/v1/sessions")
        .set_json(json!({"email": "test@test.com", "password": "abc123"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["email"], "test@test.com");
    assert!(body["user"].get("password").is_none());
    let token = body["token"].as_str().expect("token");
    assert!(!token.is_empty());

    // Profile requires the token
    let req = test::TestRequest::get().uri("/api/v1/profile").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/v1/profile")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let profile: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(profile["name"], "User Name");
    assert!(profile.get("password").is_none());
}

#[actix_rt::test]
async fn test_duplicate_registration_rejected() {
    let (state, auth_config, bearer) = build_state();
    let app = init_app!(state, auth_config, bearer);

    let payload = json!({"name": "User Name", "email": "a@b.com", "password": "abc123"});

    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_deposit_withdraw_and_balance_flow() {
    let (state, auth_config, bearer) = build_state();
    let app = init_app!(state, auth_config, bearer);
    let token = register_and_login!(app, "ledger@test.com");
    let auth = ("Authorization", format!("Bearer {}", token));

    for (path, amount, desc) in [
        ("/api/v1/statements/deposit", 150, "Deposit statement 01"),
        ("/api/v1/statements/deposit", 70, "Deposit statement 02"),
        ("/api/v1/statements/withdraw", 100, "Withdraw statement"),
    ] {
        let req = test::TestRequest::post()
            .uri(path)
            .insert_header(auth.clone())
            .set_json(json!({"amount": amount, "description": desc}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/statements/balance")
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let account: AccountBalance = test::read_body_json(resp).await;
    assert_eq!(account.balance, dec!(120));
    assert_eq!(account.statement.len(), 3);
    let descriptions: Vec<&str> = account
        .statement
        .iter()
        .map(|s| s.description.as_str())
        .collect();
    assert_eq!(
        descriptions,
        vec![
            "Deposit statement 01",
            "Deposit statement 02",
            "Withdraw statement"
        ]
    );
}

#[actix_rt::test]
async fn test_overdraft_rejected_and_balance_unchanged() {
    let (state, auth_config, bearer) = build_state();
    let app = init_app!(state, auth_config, bearer);
    let token = register_and_login!(app, "empty@test.com");
    let auth = ("Authorization", format!("Bearer {}", token));

    let req = test::TestRequest::post()
        .uri("/api/v1/statements/withdraw")
        .insert_header(auth.clone())
        .set_json(json!({"amount": 1, "description": "Withdraw statement"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/v1/statements/balance")
        .insert_header(auth)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let account: AccountBalance = test::read_body_json(resp).await;
    assert_eq!(account.balance, dec!(0));
    assert!(account.statement.is_empty());
}

#[actix_rt::test]
async fn test_non_positive_amount_rejected() {
    let (state, auth_config, bearer) = build_state();
    let app = init_app!(state, auth_config, bearer);
    let token = register_and_login!(app, "zero@test.com");

    for amount in [0, -5] {
        let req = test::TestRequest::post()
            .uri("/api/v1/statements/deposit")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .set_json(json!({"amount": amount, "description": "Deposit statement"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

#[actix_rt::test]
async fn test_single_statement_lookup() {
    let (state, auth_config, bearer) = build_state();
    let app = init_app!(state, auth_config, bearer);
    let token = register_and_login!(app, "lookup@test.com");
    let auth = ("Authorization", format!("Bearer {}", token));

    let req = test::TestRequest::post()
        .uri("/api/v1/statements/deposit")
        .insert_header(auth.clone())
        .set_json(json!({"amount": 150, "description": "Deposit statement"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Statement = test::read_body_json(resp).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/statements/{}", created.id))
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let found: Statement = test::read_body_json(resp).await;
    assert_eq!(found.id, created.id);
    assert_eq!(found.amount, dec!(150));

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/statements/{}", uuid::Uuid::new_v4()))
        .insert_header(auth)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_health_routes_bypass_auth() {
    let (state, auth_config, bearer) = build_state();
    let app = init_app!(state, auth_config, bearer);

    for path in ["/healthz", "/readyz", "/version"] {
        let req = test::TestRequest::get().uri(path).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "path {}", path);
    }
}
