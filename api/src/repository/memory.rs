/// In-process stores backed by ordered collections
///
/// Used by the use-case tests so the business rules run without a database.
/// Users live in a `BTreeMap` keyed by id; the ledger is an append-only
/// vector, which makes creation order the storage order.
use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{RepositoryError, StatementsRepository, UsersRepository};
use crate::domain::{OperationType, Statement, User};

#[derive(Default)]
pub struct InMemoryUsersRepository {
    users: RwLock<BTreeMap<Uuid, User>>,
}

impl InMemoryUsersRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UsersRepository for InMemoryUsersRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().expect("users lock poisoned");
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().expect("users lock poisoned");
        Ok(users.get(&id).cloned())
    }

    async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let mut users = self.users.write().expect("users lock poisoned");
        if users.values().any(|u| u.email == email) {
            return Err(RepositoryError::DuplicateEmail);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[derive(Default)]
pub struct InMemoryStatementsRepository {
    statements: RwLock<Vec<Statement>>,
}

impl InMemoryStatementsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StatementsRepository for InMemoryStatementsRepository {
    async fn create(
        &self,
        user_id: Uuid,
        op_type: OperationType,
        amount: Decimal,
        description: &str,
    ) -> Result<Statement, RepositoryError> {
        let now = Utc::now();
        let statement = Statement {
            id: Uuid::new_v4(),
            user_id,
            description: description.to_string(),
            amount,
            op_type,
            created_at: now,
            updated_at: now,
        };

        let mut statements = self.statements.write().expect("statements lock poisoned");
        statements.push(statement.clone());
        Ok(statement)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Statement>, RepositoryError> {
        let statements = self.statements.read().expect("statements lock poisoned");
        Ok(statements.iter().find(|s| s.id == id).cloned())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Statement>, RepositoryError> {
        let statements = self.statements.read().expect("statements lock poisoned");
        Ok(statements
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn sum_by_user_and_type(
        &self,
        user_id: Uuid,
        op_type: OperationType,
    ) -> Result<Decimal, RepositoryError> {
        let statements = self.statements.read().expect("statements lock poisoned");
        Ok(statements
            .iter()
            .filter(|s| s.user_id == user_id && s.op_type == op_type)
            .map(|s| s.amount)
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[actix_rt::test]
    async fn test_duplicate_email_rejected() {
        let repo = InMemoryUsersRepository::new();
        repo.create("User Name", "test@test.com", "hash")
            .await
            .unwrap();

        let second = repo.create("Other Name", "test@test.com", "hash").await;
        assert!(matches!(second, Err(RepositoryError::DuplicateEmail)));
    }

    #[actix_rt::test]
    async fn test_statements_keep_creation_order() {
        let repo = InMemoryStatementsRepository::new();
        let user_id = Uuid::new_v4();

        for (amount, desc) in [(dec!(150), "first"), (dec!(70), "second"), (dec!(5), "third")] {
            repo.create(user_id, OperationType::Deposit, amount, desc)
                .await
                .unwrap();
        }

        let listed = repo.list_by_user(user_id).await.unwrap();
        let descriptions: Vec<&str> = listed.iter().map(|s| s.description.as_str()).collect();
        assert_eq!(descriptions, vec!["first", "second", "third"]);
    }

    #[actix_rt::test]
    async fn test_sum_is_zero_for_empty_ledger() {
        let repo = InMemoryStatementsRepository::new();
        let sum = repo
            .sum_by_user_and_type(Uuid::new_v4(), OperationType::Deposit)
            .await
            .unwrap();
        assert_eq!(sum, Decimal::ZERO);
    }
}
