// Authentication endpoints
// Login is the one call that touches session state: a successful exchange
// hands the received credential to the session manager. Everything else is
// plain request/response.

use jugueteria_core::UserProfile;
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response: the backend returns a single bearer token.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
struct PasswordRecoveryRequest<'a> {
    email: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

impl ApiClient {
    /// Exchange credentials for a bearer token and establish the session.
    ///
    /// A backend rejection leaves the session untouched and surfaces once to
    /// the caller. A token that cannot be decoded evicts the session instead
    /// (fail closed).
    pub async fn login(&self, request: &LoginRequest) -> Result<UserProfile, ApiError> {
        let response: TokenResponse = self.post("auth/login", request).await?;
        Ok(self.session().establish(&response.token)?)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        self.post_unit("auth/register", request).await
    }

    /// Ask the backend to mail a password-reset token.
    pub async fn request_password_recovery(&self, email: &str) -> Result<(), ApiError> {
        self.post_unit("auth/forgot-password", &PasswordRecoveryRequest { email })
            .await
    }

    /// Redeem the mailed token for a new password.
    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<(), ApiError> {
        self.post_unit("auth/reset-password", request).await
    }
}
