use contracts::system::auth::AdminUser;
use leptos::prelude::*;

use super::api;
use super::storage::{SessionData, SessionStore};
use crate::config::AppConfig;
use crate::shared::api::{ApiClient, ApiEnvelope, ApiFailure};

/// Operator session, created once in `App` and handed down via context.
#[derive(Clone, Copy)]
pub struct SessionContext {
    session: RwSignal<Option<SessionData>>,
    config: StoredValue<AppConfig>,
}

impl SessionContext {
    /// Picks up a session persisted by a previous visit.
    pub fn restore(config: AppConfig) -> Self {
        let session = SessionStore::browser(&config.storage_secret).load();
        if let Some(s) = &session {
            log::info!("Restored session for {}", s.user.email);
        }
        Self {
            session: RwSignal::new(session),
            config: StoredValue::new(config),
        }
    }

    fn store(&self) -> SessionStore {
        self.config
            .with_value(|c| SessionStore::browser(&c.storage_secret))
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.with(Option::is_some)
    }

    pub fn user(&self) -> Option<AdminUser> {
        self.session.with(|s| s.as_ref().map(|s| s.user.clone()))
    }

    /// API client carrying the current bearer token.
    pub fn client(&self) -> ApiClient {
        let token = self
            .session
            .with_untracked(|s| s.as_ref().map(|s| s.token.clone()));
        self.config
            .with_value(ApiClient::from_config)
            .with_token(token)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AdminUser, String> {
        let request = api::validate_login(email, password)?;
        let client = self.config.with_value(ApiClient::from_config);
        let response = api::login(&client, &request)
            .await
            .into_result()
            .map_err(|f| f.message)?;

        let data = SessionData {
            token: response.token,
            user: response.user.clone(),
        };
        self.store().save(&data);
        self.session.set(Some(data));
        log::info!("Signed in as {}", response.user.email);
        Ok(response.user)
    }

    pub fn logout(&self) {
        self.store().clear();
        self.session.set(None);
    }

    /// Drops the session when the server rejects its token.
    pub fn observe<T>(&self, envelope: &ApiEnvelope<T>) {
        if let Some(failure) = envelope.failure() {
            self.observe_failure(failure);
        }
    }

    pub fn observe_failure(&self, failure: &ApiFailure) {
        if failure.is_unauthorized() && self.session.with_untracked(Option::is_some) {
            log::warn!("Session expired, signing out");
            self.logout();
        }
    }
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext not found in component tree")
}
