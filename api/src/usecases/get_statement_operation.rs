use std::sync::Arc;

use uuid::Uuid;

use crate::domain::Statement;
use crate::errors::LedgerError;
use crate::repository::{StatementsRepository, UsersRepository};

pub struct GetStatementOperation {
    users: Arc<dyn UsersRepository>,
    statements: Arc<dyn StatementsRepository>,
}

impl GetStatementOperation {
    pub fn new(users: Arc<dyn UsersRepository>, statements: Arc<dyn StatementsRepository>) -> Self {
        Self { users, statements }
    }

    /// Fetch one statement by id for an existing user.
    ///
    /// The statement lookup is global by id; ownership is not re-checked
    /// beyond the user-existence precondition (see DESIGN.md).
    pub async fn execute(
        &self,
        user_id: Uuid,
        statement_id: Uuid,
    ) -> Result<Statement, LedgerError> {
        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(LedgerError::UserNotFound);
        }

        self.statements
            .find_by_id(statement_id)
            .await?
            .ok_or(LedgerError::StatementNotFound)
    }
}
