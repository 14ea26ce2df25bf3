/// Use-case layer
///
/// Each operation is a single read-validate-write (or read-validate-read)
/// unit over the repository traits. Transport concerns stay in `http`.
pub mod authenticate_user;
pub mod create_statement;
pub mod create_user;
pub mod get_balance;
pub mod get_statement_operation;
pub mod show_user_profile;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::OperationType;
use crate::repository::{RepositoryError, StatementsRepository};

/// Derived balance: deposits minus withdrawals, recomputed from the ledger
/// on every call. Never cached.
pub(crate) async fn balance_for(
    statements: &dyn StatementsRepository,
    user_id: Uuid,
) -> Result<Decimal, RepositoryError> {
    let deposits = statements
        .sum_by_user_and_type(user_id, OperationType::Deposit)
        .await?;
    let withdrawals = statements
        .sum_by_user_and_type(user_id, OperationType::Withdraw)
        .await?;
    Ok(deposits - withdrawals)
}
