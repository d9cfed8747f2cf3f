use thiserror::Error;

use crate::field::FieldId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid data-pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Unknown field: {0}")]
    UnknownField(FieldId),

    #[error("Newsletter form has no email field")]
    MissingEmailField,
}

pub type Result<T> = std::result::Result<T, Error>;
