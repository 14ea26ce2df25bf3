use std::sync::Arc;

use uuid::Uuid;

use super::balance_for;
use crate::domain::AccountBalance;
use crate::errors::LedgerError;
use crate::repository::{StatementsRepository, UsersRepository};

pub struct GetBalance {
    users: Arc<dyn UsersRepository>,
    statements: Arc<dyn StatementsRepository>,
}

impl GetBalance {
    pub fn new(users: Arc<dyn UsersRepository>, statements: Arc<dyn StatementsRepository>) -> Self {
        Self { users, statements }
    }

    /// Full transaction history in creation order plus the derived balance,
    /// unpaginated. No side effects.
    pub async fn execute(&self, user_id: Uuid) -> Result<AccountBalance, LedgerError> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(LedgerError::UserNotFound);
        }

        let statement = self.statements.list_by_user(user_id).await?;
        let balance = balance_for(self.statements.as_ref(), user_id).await?;

        Ok(AccountBalance { statement, balance })
    }
}
