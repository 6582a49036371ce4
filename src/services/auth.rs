use std::sync::Arc;

use log::{info, warn};

use super::endpoints;
use crate::auth::{LoginRequest, RegisterRequest};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::AuthPayload;

/// Login, registration and logout against the API.
///
/// A successful login or registration persists the returned token and user.
#[derive(Clone)]
pub struct AuthService {
    client: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthPayload, ApiError> {
        let payload: AuthPayload = self.client.post(endpoints::LOGIN, credentials).await?;
        self.persist(&payload)?;
        info!("Signed in as {}", payload.user.email);
        Ok(payload)
    }

    pub async fn register(&self, user: &RegisterRequest) -> Result<AuthPayload, ApiError> {
        let payload: AuthPayload = self.client.post(endpoints::REGISTER, user).await?;
        self.persist(&payload)?;
        info!("Registered {}", payload.user.email);
        Ok(payload)
    }

    /// Stored credentials are cleared whatever the API answers; the API error, if
    /// any, is still returned.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self.client.post_empty(endpoints::LOGOUT).await;
        if let Err(e) = self.client.session().clear() {
            warn!("Failed to clear stored credentials: {}", e);
        }
        result.map(|_| ())
    }

    fn persist(&self, payload: &AuthPayload) -> Result<(), ApiError> {
        self.client
            .session()
            .store(payload)
            .map_err(|e| ApiError::local(e.to_string()))
    }
}
