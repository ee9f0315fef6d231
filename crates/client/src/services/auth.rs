//! Account authentication.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use shopfront_core::{Email, IdError, User};
use tracing::{info, instrument};

use super::{call_unit, expose, fetch_data, send_unit};
use crate::endpoints::Endpoint;
use crate::error::{ClientError, Result};
use crate::http::ApiClient;

/// Registration form.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: Email,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
}

/// Login form.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: Email,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
}

/// Password change for the signed-in account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordUpdate {
    #[serde(serialize_with = "expose")]
    pub current_password: SecretString,
    #[serde(serialize_with = "expose")]
    pub new_password: SecretString,
}

#[derive(Serialize)]
struct ForgotPasswordRequest<'a> {
    email: &'a Email,
}

#[derive(Serialize)]
struct ResetPasswordRequest {
    #[serde(serialize_with = "expose")]
    password: SecretString,
}

/// A bearer token issued by the backend, with the account when it was sent.
///
/// The caller decides where to persist the token; the core never writes it.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: SecretString,
    pub user: Option<User>,
}

/// `{ success, token, user? }`
#[derive(Deserialize)]
struct TokenResponse {
    #[serde(default = "super::default_success")]
    success: bool,
    token: Option<String>,
    user: Option<User>,
    message: Option<String>,
}

impl TokenResponse {
    fn into_session(self, endpoint: &Endpoint) -> Result<AuthSession> {
        if !self.success {
            return Err(ClientError::Rejected(
                self.message
                    .unwrap_or_else(|| "Authentication failed".to_string()),
            ));
        }
        match self.token.filter(|token| !token.trim().is_empty()) {
            Some(token) => Ok(AuthSession {
                token: SecretString::from(token),
                user: self.user,
            }),
            None => Err(ClientError::Decode {
                url: endpoint.path(),
                source: serde::de::Error::missing_field("token"),
            }),
        }
    }
}

/// Authentication endpoints.
#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on transport, status, or decode failure, or if
    /// the response carries no token.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthSession> {
        let endpoint = Endpoint::Register;
        let response: TokenResponse = self.api.send(&endpoint, request).await?;
        let session = response.into_session(&endpoint)?;
        info!("Account registered");
        Ok(session)
    }

    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Status` with 401 for bad credentials.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthSession> {
        let endpoint = Endpoint::Login;
        let response: TokenResponse = self.api.send(&endpoint, request).await?;
        let session = response.into_session(&endpoint)?;
        info!("Logged in");
        Ok(session)
    }

    /// End the session server-side.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the backend refuses.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        call_unit(&self.api, &Endpoint::Logout).await
    }

    /// The signed-in account. Unwraps `data`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Status` with 401 when no valid token is stored.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<User> {
        fetch_data(&self.api, &Endpoint::Me).await
    }

    /// Change the signed-in account's password. The backend issues a new token.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on failure, including a wrong current password.
    #[instrument(skip_all)]
    pub async fn update_password(&self, update: &PasswordUpdate) -> Result<AuthSession> {
        let endpoint = Endpoint::UpdatePassword;
        let response: TokenResponse = self.api.send(&endpoint, update).await?;
        response.into_session(&endpoint)
    }

    /// Ask the backend to email a reset link.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` on failure.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn forgot_password(&self, email: &Email) -> Result<()> {
        send_unit(
            &self.api,
            &Endpoint::ForgotPassword,
            &ForgotPasswordRequest { email },
        )
        .await
    }

    /// Set a new password using the token from the reset email.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidIdentifier` for a blank reset token, and
    /// `ClientError` on request failure.
    #[instrument(skip_all)]
    pub async fn reset_password(
        &self,
        reset_token: &str,
        password: &SecretString,
    ) -> Result<AuthSession> {
        if reset_token.trim().is_empty() {
            return Err(IdError::Empty {
                kind: "reset token",
            }
            .into());
        }
        let endpoint = Endpoint::ResetPassword(reset_token.trim().to_string());
        let response: TokenResponse = self
            .api
            .send(
                &endpoint,
                &ResetPasswordRequest {
                    password: password.clone(),
                },
            )
            .await?;
        response.into_session(&endpoint)
    }
}
