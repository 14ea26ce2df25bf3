/// Application state

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServiceConfig;
use crate::repository::{StatementsRepository, UsersRepository};

#[derive(Clone)]
pub struct AppState {
    pub service_config: ServiceConfig,
    pub users: Arc<dyn UsersRepository>,
    pub statements: Arc<dyn StatementsRepository>,
    /// Kept for readiness checks; `None` when running on in-memory stores.
    pub postgres: Option<PgPool>,
}

impl AppState {
    pub fn new(
        service_config: ServiceConfig,
        users: Arc<dyn UsersRepository>,
        statements: Arc<dyn StatementsRepository>,
        postgres: Option<PgPool>,
    ) -> Self {
        Self {
            service_config,
            users,
            statements,
            postgres,
        }
    }
}
