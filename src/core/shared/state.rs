use crate::auth::CredentialStore;
use crate::config::AppConfig;
use crate::core::session::SessionManager;
use crate::core::shared::utils::DbPool;
use crate::security::CredentialHasher;
use crate::tasks::TaskEngine;

/// Everything a request handler can reach. Built once at startup and shared behind an `Arc`.
#[derive(Debug)]
pub struct AppState {
    pub conn: DbPool,
    pub credentials: CredentialStore,
    pub tasks: TaskEngine,
    pub sessions: SessionManager,
}

impl AppState {
    pub fn new(config: &AppConfig, conn: DbPool) -> anyhow::Result<Self> {
        let hasher = CredentialHasher::new(&config.argon2)?;
        Ok(Self {
            credentials: CredentialStore::new(conn.clone(), hasher)?,
            tasks: TaskEngine::new(conn.clone()),
            sessions: SessionManager::new(&config.session),
            conn,
        })
    }
}
