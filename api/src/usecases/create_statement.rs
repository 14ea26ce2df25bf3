use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use super::balance_for;
use crate::domain::{OperationType, Statement};
use crate::errors::LedgerError;
use crate::repository::{StatementsRepository, UsersRepository};

pub struct CreateStatement {
    users: Arc<dyn UsersRepository>,
    statements: Arc<dyn StatementsRepository>,
}

impl CreateStatement {
    pub fn new(users: Arc<dyn UsersRepository>, statements: Arc<dyn StatementsRepository>) -> Self {
        Self { users, statements }
    }

    /// Append a deposit or withdrawal for an existing user.
    ///
    /// Checks run in order: the user must exist, then a withdrawal must not
    /// exceed the balance recomputed from the full ledger. Nothing is written
    /// when either check fails. The funds check and the append are not one
    /// atomic unit; see DESIGN.md.
    pub async fn execute(
        &self,
        user_id: Uuid,
        op_type: OperationType,
        amount: Decimal,
        description: &str,
    ) -> Result<Statement, LedgerError> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(LedgerError::UserNotFound);
        }

        if op_type == OperationType::Withdraw {
            let balance = balance_for(self.statements.as_ref(), user_id).await?;
            if balance < amount {
                return Err(LedgerError::InsufficientFunds);
            }
        }

        let statement = self
            .statements
            .create(user_id, op_type, amount, description)
            .await?;
        Ok(statement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::{InMemoryStatementsRepository, InMemoryUsersRepository};
    use crate::usecases::create_user::CreateUser;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    struct Fixture {
        use_case: CreateStatement,
        statements: Arc<dyn StatementsRepository>,
        user_id: Uuid,
    }

    async fn setup() -> Fixture {
        let users: Arc<dyn UsersRepository> = Arc::new(InMemoryUsersRepository::new());
        let statements: Arc<dyn StatementsRepository> =
            Arc::new(InMemoryStatementsRepository::new());

        let user = CreateUser::new(users.clone())
            .execute("User Name", "test@test.com", "abc123")
            .await
            .unwrap();

        Fixture {
            use_case: CreateStatement::new(users, statements.clone()),
            statements,
            user_id: user.id,
        }
    }

    #[actix_rt::test]
    async fn test_deposit_appends_statement() {
        let fx = setup().await;

        let statement = fx
            .use_case
            .execute(
                fx.user_id,
                OperationType::Deposit,
                dec!(150),
                "Deposit statement",
            )
            .await
            .unwrap();

        assert_eq!(statement.user_id, fx.user_id);
        assert_eq!(statement.op_type, OperationType::Deposit);
        assert_eq!(statement.amount, dec!(150));

        let balance = balance_for(fx.statements.as_ref(), fx.user_id)
            .await
            .unwrap();
        assert_eq!(balance, dec!(150));
    }

    #[actix_rt::test]
    async fn test_withdraw_within_funds_succeeds() {
        let fx = setup().await;

        fx.use_case
            .execute(fx.user_id, OperationType::Deposit, dec!(150), "Deposit")
            .await
            .unwrap();

        let statement = fx
            .use_case
            .execute(
                fx.user_id,
                OperationType::Withdraw,
                dec!(100),
                "Withdraw statement",
            )
            .await
            .unwrap();

        assert_eq!(statement.op_type, OperationType::Withdraw);

        let balance = balance_for(fx.statements.as_ref(), fx.user_id)
            .await
            .unwrap();
        assert_eq!(balance, dec!(50));
    }

    #[actix_rt::test]
    async fn test_withdraw_beyond_funds_rejected_and_writes_nothing() {
        let fx = setup().await;

        let result = fx
            .use_case
            .execute(fx.user_id, OperationType::Withdraw, dec!(1), "Withdraw")
            .await;
        assert!(matches!(result, Err(LedgerError::InsufficientFunds)));

        let listed = fx.statements.list_by_user(fx.user_id).await.unwrap();
        assert!(listed.is_empty());

        let balance = balance_for(fx.statements.as_ref(), fx.user_id)
            .await
            .unwrap();
        assert_eq!(balance, Decimal::ZERO);
    }

    #[actix_rt::test]
    async fn test_unknown_user_rejected_for_both_types() {
        let fx = setup().await;
        let unknown = Uuid::new_v4();

        for op_type in [OperationType::Deposit, OperationType::Withdraw] {
            let result = fx
                .use_case
                .execute(unknown, op_type, dec!(10), "Statement")
                .await;
            assert!(matches!(result, Err(LedgerError::UserNotFound)));
        }

        let listed = fx.statements.list_by_user(unknown).await.unwrap();
        assert!(listed.is_empty());
    }

    #[actix_rt::test]
    async fn test_withdraw_exactly_the_balance_succeeds() {
        let fx = setup().await;

        fx.use_case
            .execute(fx.user_id, OperationType::Deposit, dec!(100), "Deposit")
            .await
            .unwrap();

        fx.use_case
            .execute(fx.user_id, OperationType::Withdraw, dec!(100), "Withdraw")
            .await
            .unwrap();

        let balance = balance_for(fx.statements.as_ref(), fx.user_id)
            .await
            .unwrap();
        assert_eq!(balance, Decimal::ZERO);
    }
}
