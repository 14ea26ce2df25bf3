use std::sync::Arc;

use crate::domain::User;
use crate::errors::LedgerError;
use crate::repository::{RepositoryError, UsersRepository};

pub struct CreateUser {
    users: Arc<dyn UsersRepository>,
}

impl CreateUser {
    pub fn new(users: Arc<dyn UsersRepository>) -> Self {
        Self { users }
    }

    /// Register a new user. The plaintext password is hashed before it
    /// reaches the store; the email must not already be taken.
    pub async fn execute(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, LedgerError> {
        if self.users.find_by_email(email).await?.is_some() {
            return Err(LedgerError::DuplicateEmail);
        }

        let password_hash = finledger_auth::hash_password(password)?;

        // The store enforces uniqueness too; a concurrent registration
        // between the check above and this insert surfaces here.
        match self.users.create(name, email, &password_hash).await {
            Ok(user) => Ok(user),
            Err(RepositoryError::DuplicateEmail) => Err(LedgerError::DuplicateEmail),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::InMemoryUsersRepository;
    use pretty_assertions::assert_eq;

    fn make_use_case() -> CreateUser {
        CreateUser::new(Arc::new(InMemoryUsersRepository::new()))
    }

    #[actix_rt::test]
    async fn test_creates_user_with_hashed_password() {
        let use_case = make_use_case();

        let user = use_case
            .execute("User Name", "test@test.com", "abc123")
            .await
            .unwrap();

        assert_eq!(user.name, "User Name");
        assert_eq!(user.email, "test@test.com");
        assert_ne!(user.password, "abc123");
        assert!(finledger_auth::verify_password("abc123", &user.password).is_ok());
    }

    #[actix_rt::test]
    async fn test_duplicate_email_rejected() {
        let users: Arc<dyn UsersRepository> = Arc::new(InMemoryUsersRepository::new());
        let use_case = CreateUser::new(users.clone());

        use_case
            .execute("User Name", "a@b.com", "abc123")
            .await
            .unwrap();

        let second = use_case.execute("Other Name", "a@b.com", "xyz789").await;
        assert!(matches!(second, Err(LedgerError::DuplicateEmail)));

        // Exactly one user with that email survives
        let existing = users.find_by_email("a@b.com").await.unwrap().unwrap();
        assert_eq!(existing.name, "User Name");
    }
}
