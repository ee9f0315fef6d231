//! Subcommand implementations.
//!
//! Results are reported through `tracing` at `info`; failures bubble up to
//! `main` as [`CommandError`].

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod orders;

use shopfront_client::{ClientError, FetchOutcome, FetchState, TokenStoreError};
use shopfront_core::EmailError;
use thiserror::Error;

/// Errors that can occur while running a subcommand.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Token storage error: {0}")]
    TokenStore(#[from] TokenStoreError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid role: {0}. Valid roles: user, admin")]
    InvalidRole(String),

    /// A hook settled with an error message in its store.
    #[error("Fetch failed: {0}")]
    Fetch(String),
}

/// Turn a hook's outcome into a command result.
fn settle<T>(outcome: FetchOutcome, state: &FetchState<T>) -> Result<(), CommandError> {
    match outcome {
        FetchOutcome::Failed => Err(CommandError::Fetch(
            state
                .error
                .clone()
                .unwrap_or_else(|| "unknown error".to_string()),
        )),
        FetchOutcome::Applied | FetchOutcome::Superseded | FetchOutcome::AlreadyInFlight => Ok(()),
    }
}
