// src/error.rs

//! Unified error handling for the indexer application.

use std::fmt;

use thiserror::Error;

/// Result type alias for indexer operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// The edition catalog could not be fetched; aborts the whole run
    #[error("Edition catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// Index delete/create failed; aborts the affected edition
    #[error("Index lifecycle error for '{index}': {message}")]
    IndexLifecycle { index: String, message: String },

    /// Search index returned an unexpected response
    #[error("Search index error for {context}: {message}")]
    Search { context: String, message: String },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an index lifecycle error.
    pub fn lifecycle(index: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::IndexLifecycle {
            index: index.into(),
            message: message.to_string(),
        }
    }

    /// Create a search index error with context.
    pub fn search(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Search {
            context: context.into(),
            message: message.to_string(),
        }
    }
}
