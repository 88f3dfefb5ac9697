use sea_orm::DatabaseConnection;

use crate::services::auth::AuthService;

/// Shared, cloneable state handed to every worker via `web::Data`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (absent for tests that never touch storage)
    db: Option<DatabaseConnection>,
    pub auth: AuthService,
}

impl AppState {
    pub fn new(db: DatabaseConnection, auth: AuthService) -> Self {
        Self { db: Some(db), auth }
    }

    pub fn new_without_db(auth: AuthService) -> Self {
        Self { db: None, auth }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
