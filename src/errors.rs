//! Unified error types for the nursery catalog.
//!
//! Every core operation returns [`Result`], so database failures, validation
//! failures and missing records all flow through the same enum.

use thiserror::Error;

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum Error {
    /// User-facing validation failure; the write that triggered it is rejected
    #[error("{message}")]
    Validation {
        /// Message shown to the user
        message: String,
    },

    /// Plant price is negative or not a finite number
    #[error("Invalid price: {price}")]
    InvalidPrice {
        /// The rejected price
        price: f64,
    },

    #[error("Plant not found: {id}")]
    PlantNotFound {
        /// Plant id that was looked up
        id: i64,
    },

    #[error("Category not found: {id}")]
    CategoryNotFound {
        /// Category id that was looked up
        id: i64,
    },

    #[error("Tag not found: {id}")]
    TagNotFound {
        /// Tag id that was looked up
        id: i64,
    },

    #[error("User not found: {id}")]
    UserNotFound {
        /// User id that was looked up
        id: i64,
    },

    #[error("Mail alias not found: {name}")]
    AliasNotFound {
        /// Alias name that was looked up
        name: String,
    },

    /// The alias exists but creates records of a model this crate does not route
    #[error("Mail alias {alias} targets unsupported model {model}")]
    AliasModelMismatch {
        /// Alias name
        alias: String,
        /// Model the alias is configured for
        model: String,
    },

    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong
        message: String,
    },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_displays_bare_message() {
        let err = Error::validation("Stock cannot be negative.");
        assert_eq!(err.to_string(), "Stock cannot be negative.");
    }

    #[test]
    fn test_not_found_messages() {
        assert_eq!(
            Error::PlantNotFound { id: 3 }.to_string(),
            "Plant not found: 3"
        );
        assert_eq!(
            Error::AliasNotFound {
                name: "ferns".to_string()
            }
            .to_string(),
            "Mail alias not found: ferns"
        );
    }
}
