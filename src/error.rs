//! Error types for the copy_drive crate.

use thiserror::Error;

/// Errors that can occur when replicating a Drive folder.
#[derive(Error, Debug)]
pub enum DriveError {
    /// Source or destination root failed validation. Always raised before
    /// any mutating call is issued.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Failed to read credentials file: {0}")]
    CredentialsFile(#[from] std::io::Error),

    #[error("Failed to parse credentials JSON: {0}")]
    CredentialsParse(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote API rejected the call. Quota exhaustion (403/429) lands here
    /// too; the replicator does not treat it specially.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid URL or ID: {0}")]
    InvalidUrlOrId(String),

    #[error("JWT encoding error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Token refresh failed: {0}")]
    TokenRefresh(String),
}

/// Result type alias for DriveError.
pub type Result<T> = std::result::Result<T, DriveError>;
