use std::sync::Arc;

use uuid::Uuid;

use crate::domain::User;
use crate::errors::LedgerError;
use crate::repository::UsersRepository;

pub struct ShowUserProfile {
    users: Arc<dyn UsersRepository>,
}

impl ShowUserProfile {
    pub fn new(users: Arc<dyn UsersRepository>) -> Self {
        Self { users }
    }

    pub async fn execute(&self, user_id: Uuid) -> Result<User, LedgerError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(LedgerError::UserNotFound)
    }
}
