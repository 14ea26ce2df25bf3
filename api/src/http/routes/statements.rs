/// Statement routes: deposit, withdraw, balance, single lookup
///
/// The owning user always comes from the verified bearer token, never from
/// the payload.
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::app_state::AppState;
use crate::domain::OperationType;
use crate::errors::ApiError;
use crate::http::middleware::authenticated_user;
use crate::usecases::create_statement::CreateStatement;
use crate::usecases::get_balance::GetBalance;
use crate::usecases::get_statement_operation::GetStatementOperation;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateStatementRequest {
    #[validate(custom(function = validate_amount))]
    pub amount: Decimal,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
}

fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount <= Decimal::ZERO {
        return Err(ValidationError::new("amount").with_message("amount must be positive".into()));
    }
    Ok(())
}

async fn create(
    req: HttpRequest,
    payload: web::Json<CreateStatementRequest>,
    state: web::Data<AppState>,
    op_type: OperationType,
) -> Result<HttpResponse, ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest {
        reason: e.to_string(),
    })?;

    let user_id = authenticated_user(&req)?;

    let use_case = CreateStatement::new(state.users.clone(), state.statements.clone());
    let statement = use_case
        .execute(user_id, op_type, payload.amount, &payload.description)
        .await?;

    tracing::info!(
        user_id = %user_id,
        statement_id = %statement.id,
        op_type = %op_type.as_str(),
        "Statement created"
    );

    Ok(HttpResponse::Created().json(statement))
}

// POST /api/v1/statements/deposit
pub async fn deposit(
    req: HttpRequest,
    payload: web::Json<CreateStatementRequest>,
    state: web::Data<AppState>,
) -> Result<impl Responder, ApiError> {
    create(req, payload, state, OperationType::Deposit).await
}

// POST /api/v1/statements/withdraw
pub async fn withdraw(
    req: HttpRequest,
    payload: web::Json<CreateStatementRequest>,
    state: web::Data<AppState>,
) -> Result<impl Responder, ApiError> {
    create(req, payload, state, OperationType::Withdraw).await
}

// GET /api/v1/statements/balance
pub async fn balance(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<impl Responder, ApiError> {
    let user_id = authenticated_user(&req)?;

    let use_case = GetBalance::new(state.users.clone(), state.statements.clone());
    let account = use_case.execute(user_id).await?;

    Ok(HttpResponse::Ok().json(account))
}

// GET /api/v1/statements/{statement_id}
pub async fn get_statement(
    req: HttpRequest,
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<impl Responder, ApiError> {
    let user_id = authenticated_user(&req)?;
    let statement_id = path.into_inner();

    let use_case = GetStatementOperation::new(state.users.clone(), state.statements.clone());
    let statement = use_case.execute(user_id, statement_id).await?;

    Ok(HttpResponse::Ok().json(statement))
}
