/// Storage contracts
///
/// Each store is a capability trait with two implementations: a Postgres one
/// for the service and an in-memory one used by the use-case tests.
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{OperationType, Statement, User};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Email already registered")]
    DuplicateEmail,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait UsersRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;

    /// Fails with `DuplicateEmail` when the email is already present.
    async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, RepositoryError>;
}

#[async_trait]
pub trait StatementsRepository: Send + Sync {
    async fn create(
        &self,
        user_id: Uuid,
        op_type: OperationType,
        amount: Decimal,
        description: &str,
    ) -> Result<Statement, RepositoryError>;

    /// Global lookup by statement id, not scoped to a user.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Statement>, RepositoryError>;

    /// All statements for a user, in creation order.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Statement>, RepositoryError>;

    /// Sum of amounts for one operation type; zero when the user has none.
    async fn sum_by_user_and_type(
        &self,
        user_id: Uuid,
        op_type: OperationType,
    ) -> Result<Decimal, RepositoryError>;
}
