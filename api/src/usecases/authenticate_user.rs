use std::sync::Arc;

use serde::Serialize;

use crate::domain::UserProfile;
use crate::errors::LedgerError;
use crate::repository::UsersRepository;

#[derive(Debug, Serialize)]
pub struct AuthenticatedSession {
    pub user: UserProfile,
    pub token: String,
}

pub struct AuthenticateUser {
    users: Arc<dyn UsersRepository>,
    jwt_secret: String,
    token_ttl_secs: i64,
}

impl AuthenticateUser {
    pub fn new(users: Arc<dyn UsersRepository>, jwt_secret: String, token_ttl_secs: i64) -> Self {
        Self {
            users,
            jwt_secret,
            token_ttl_secs,
        }
    }

    /// Verify credentials and issue a bearer token bound to the user id.
    ///
    /// An unknown email and a wrong password fail identically; the caller
    /// never learns which one was wrong.
    pub async fn execute(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedSession, LedgerError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(LedgerError::IncorrectEmailOrPassword)?;

        finledger_auth::verify_password(password, &user.password)
            .map_err(|_| LedgerError::IncorrectEmailOrPassword)?;

        let token = finledger_auth::issue_token(user.id, &self.jwt_secret, self.token_ttl_secs)?;

        Ok(AuthenticatedSession {
            user: UserProfile::from(&user),
            token,
        })
    }
}
