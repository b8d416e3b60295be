use contracts::system::auth::AdminUser;
use serde::{Deserialize, Serialize};

use crate::shared::secure_storage::{BrowserStorage, KeyValueStore, SecureStorage};

const SESSION_KEY: &str = "petcaart_admin_session";

/// What survives a page reload: the bearer token and who it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub user: AdminUser,
}

#[derive(Debug, Clone)]
pub struct SessionStore<S = BrowserStorage> {
    storage: SecureStorage<S>,
}

impl SessionStore<BrowserStorage> {
    pub fn browser(secret: &str) -> Self {
        Self::new(SecureStorage::browser(secret))
    }
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: SecureStorage<S>) -> Self {
        Self { storage }
    }

    /// Stored session, if any. Unreadable entries count as logged out.
    pub fn load(&self) -> Option<SessionData> {
        match self.storage.get_item::<SessionData>(SESSION_KEY) {
            Ok(session) => session.filter(|s| !s.token.is_empty()),
            Err(e) => {
                log::warn!("Stored session ignored: {}", e);
                None
            }
        }
    }

    pub fn save(&self, session: &SessionData) {
        if let Err(e) = self.storage.set_item(SESSION_KEY, session) {
            log::error!("Failed to persist session: {}", e);
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.storage.remove_item(SESSION_KEY) {
            log::error!("Failed to clear session: {}", e);
        }
    }
}
