//! Authentication state
//!
//! Holds who is signed in and publishes every change on a `watch` channel so
//! UI code can subscribe. Credentials and sessions are handled entirely by the
//! provider behind [`AccountApi`].

use crate::error::{AppError, AppResult};
use crate::provider::permission::UNIQUE_ID;
use crate::provider::{AccountApi, AccountInfo};
use crate::utils::logging::log_auth_event;
use log::{debug, warn};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::watch;
use url::Url;

pub const OAUTH_PROVIDER: &str = "google";

#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub prefs: Value,
}

impl From<AccountInfo> for AuthUser {
    fn from(account: AccountInfo) -> Self {
        let avatar = account.prefs.get("avatar").and_then(Value::as_str).map(str::to_string);
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            avatar,
            prefs: account.prefs,
        }
    }
}

/// Local changes to the signed-in user; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthUserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub prefs: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<AuthUser>,
    pub is_loading: bool,
    pub is_authenticated: bool,
}

impl AuthState {
    fn signed_in(user: AuthUser) -> Self {
        Self {
            user: Some(user),
            is_loading: false,
            is_authenticated: true,
        }
    }

    fn signed_out() -> Self {
        Self {
            user: None,
            is_loading: false,
            is_authenticated: false,
        }
    }
}

impl Default for AuthState {
    /// Loading until [`AuthStore::init`] has checked for a session.
    fn default() -> Self {
        Self {
            user: None,
            is_loading: true,
            is_authenticated: false,
        }
    }
}

pub struct AuthStore {
    account: Arc<dyn AccountApi>,
    state: watch::Sender<AuthState>,
}

impl AuthStore {
    pub fn new(account: Arc<dyn AccountApi>) -> Self {
        let (state, _) = watch::channel(AuthState::default());
        Self { account, state }
    }

    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    fn set_loading(&self, is_loading: bool) {
        self.state.send_modify(|state| state.is_loading = is_loading);
    }

    /// Loads the current session. No session, or any failure, leaves the store signed out.
    pub async fn init(&self) {
        self.set_loading(true);
        match self.account.get().await {
            Ok(account) => {
                log_auth_event("Session restored", &account.email);
                self.state.send_replace(AuthState::signed_in(account.into()));
            }
            Err(e) => {
                debug!("No active session: {}", e);
                self.state.send_replace(AuthState::signed_out());
            }
        }
    }

    async fn load_account(&self) -> AppResult<AuthUser> {
        let user: AuthUser = self.account.get().await?.into();
        self.state.send_replace(AuthState::signed_in(user.clone()));
        Ok(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthUser> {
        self.set_loading(true);
        let result = async {
            self.account.create_email_session(email, password).await?;
            self.load_account().await
        }
        .await;

        match result {
            Ok(user) => {
                log_auth_event("Login", email);
                Ok(user)
            }
            Err(e) => {
                self.set_loading(false);
                Err(e)
            }
        }
    }

    /// Creates the account, opens a session for it and loads it into the store.
    pub async fn register(&self, email: &str, password: &str, name: &str) -> AppResult<AuthUser> {
        self.set_loading(true);
        let result = async {
            self.account.create(UNIQUE_ID, email, password, name).await?;
            self.account.create_email_session(email, password).await?;
            self.load_account().await
        }
        .await;

        match result {
            Ok(user) => {
                log_auth_event("Registered", email);
                Ok(user)
            }
            Err(e) => {
                self.set_loading(false);
                Err(e)
            }
        }
    }

    /// URL to send the browser to for Google sign-in. The provider redirects
    /// back to `{origin}/dashboard`, or `{origin}/auth/failure` on failure.
    pub fn login_with_google(&self, origin: &Url) -> AppResult<Url> {
        let redirect = |path: &str| {
            origin
                .join(path)
                .map_err(|e| AppError::invalid_input(format!("Invalid origin '{}': {}", origin, e)))
        };
        let url = self
            .account
            .oauth2_url(OAUTH_PROVIDER, &redirect("/dashboard")?, &redirect("/auth/failure")?)?;
        log_auth_event("OAuth login started", OAUTH_PROVIDER);
        Ok(url)
    }

    /// Ends the current session. Local state is cleared even when the provider call fails.
    pub async fn logout(&self) {
        if let Err(e) = self.account.delete_session("current").await {
            warn!("Failed to delete session, clearing local state anyway: {}", e);
        }
        let previous = self.state.send_replace(AuthState::signed_out());
        if let Some(user) = previous.user {
            log_auth_event("Logout", &user.email);
        }
    }

    /// Merges `patch` into the signed-in user locally. Nothing is written to the provider.
    pub fn update_user(&self, patch: AuthUserPatch) {
        self.state.send_modify(|state| {
            if let Some(user) = state.user.as_mut() {
                if let Some(name) = patch.name {
                    user.name = name;
                }
                if let Some(email) = patch.email {
                    user.email = email;
                }
                if let Some(avatar) = patch.avatar {
                    user.avatar = Some(avatar);
                }
                if let Some(prefs) = patch.prefs {
                    user.prefs = prefs;
                }
            }
        });
    }
}
