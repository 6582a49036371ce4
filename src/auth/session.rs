use std::sync::Arc;

use log::warn;

use crate::error::AppError;
use crate::models::{AuthPayload, User};
use crate::storage::Storage;

pub const TOKEN_KEY: &str = "authToken";
pub const USER_KEY: &str = "authUser";
pub const LANGUAGE_KEY: &str = "userLanguage";

/// Credentials and preferences persisted on the client.
///
/// Nothing is cached: every read goes to storage, so a token cleared elsewhere
/// (e.g. by the 401 handler) is seen by the next check.
#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn Storage>,
}

impl Session {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// True iff a non-empty token is stored. The token itself is never inspected.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY).filter(|token| !token.is_empty())
    }

    /// The stored profile. A profile that no longer parses is treated as absent.
    pub fn user(&self) -> Option<User> {
        let raw = self.storage.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("Ignoring unreadable stored user: {}", e);
                None
            }
        }
    }

    pub fn store(&self, payload: &AuthPayload) -> Result<(), AppError> {
        self.storage.set(TOKEN_KEY, &payload.token)?;
        self.storage
            .set(USER_KEY, &serde_json::to_string(&payload.user)?)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), AppError> {
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(USER_KEY)?;
        Ok(())
    }

    pub fn preferred_language(&self) -> Option<String> {
        self.storage.get(LANGUAGE_KEY)
    }

    pub fn set_preferred_language(&self, code: &str) -> Result<(), AppError> {
        self.storage.set(LANGUAGE_KEY, code)
    }
}
