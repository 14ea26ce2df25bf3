use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use super::{RepositoryError, StatementsRepository, UsersRepository};
use crate::domain::{OperationType, Statement, User};

pub struct PgUsersRepository {
    pool: PgPool,
}

impl PgUsersRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsersRepository for PgUsersRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, RepositoryError> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password, created_at, updated_at)
            VALUES ($1, $2, $3, $4, now(), now())
            RETURNING id, name, email, password, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            // Unique violation on the email index
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(RepositoryError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }
}

pub struct PgStatementsRepository {
    pool: PgPool,
}

impl PgStatementsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatementsRepository for PgStatementsRepository {
    async fn create(
        &self,
        user_id: Uuid,
        op_type: OperationType,
        amount: Decimal,
        description: &str,
    ) -> Result<Statement, RepositoryError> {
        let statement = sqlx::query_as::<_, Statement>(
            r#"
            INSERT INTO statements (id, user_id, description, amount, type, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, now(), now())
            RETURNING id, user_id, description, amount, type, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(description)
        .bind(amount)
        .bind(op_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(statement)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Statement>, RepositoryError> {
        let statement = sqlx::query_as::<_, Statement>(
            r#"
            SELECT id, user_id, description, amount, type, created_at, updated_at
            FROM statements
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(statement)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Statement>, RepositoryError> {
        let statements = sqlx::query_as::<_, Statement>(
            r#"
            SELECT id, user_id, description, amount, type, created_at, updated_at
            FROM statements
            WHERE user_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(statements)
    }

    async fn sum_by_user_and_type(
        &self,
        user_id: Uuid,
        op_type: OperationType,
    ) -> Result<Decimal, RepositoryError> {
        let sum = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM statements
            WHERE user_id = $1 AND type = $2
            "#,
        )
        .bind(user_id)
        .bind(op_type)
        .fetch_one(&self.pool)
        .await?;

        Ok(sum)
    }
}
