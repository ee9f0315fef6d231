//! Session commands.
//!
//! # Usage
//!
//! ```bash
//! sf-cli login -e jane@example.com -p 'hunter2'
//! sf-cli whoami
//! sf-cli logout
//! ```

use std::path::Path;

use secrecy::SecretString;
use shopfront_client::services::LoginRequest;
use shopfront_client::{FileTokenStore, Shopfront};
use shopfront_core::Email;

use super::CommandError;

/// Sign in and persist the token under `token_dir`.
pub async fn login(
    shopfront: &Shopfront,
    token_dir: &Path,
    email: &str,
    password: String,
) -> Result<(), CommandError> {
    let request = LoginRequest {
        email: Email::parse(email)?,
        password: SecretString::from(password),
    };

    let session = shopfront.auth().login(&request).await?;

    let store = FileTokenStore::new(token_dir);
    store.save(&session.token).await?;

    match session.user {
        Some(user) => tracing::info!("Signed in as {} <{}> ({})", user.name, user.email, user.role),
        None => tracing::info!("Signed in as {}", request.email),
    }
    tracing::info!("Token saved to {}", store.path().display());
    Ok(())
}

/// Sign out and delete the stored token.
///
/// The local token is removed even if the backend call fails.
pub async fn logout(shopfront: &Shopfront, token_dir: &Path) -> Result<(), CommandError> {
    let result = shopfront.auth().logout().await;

    FileTokenStore::new(token_dir).remove().await?;
    tracing::info!("Signed out");

    result.map_err(CommandError::from)
}

/// Show the signed-in account.
pub async fn whoami(shopfront: &Shopfront) -> Result<(), CommandError> {
    let user = shopfront.auth().me().await?;
    tracing::info!("{} <{}> role={} id={}", user.name, user.email, user.role, user.id);
    Ok(())
}
