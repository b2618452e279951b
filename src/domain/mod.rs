use thiserror::Error;
use validator::ValidationErrors;

pub mod category;
pub mod todo;
pub mod user;

#[cfg(test)]
pub(crate) mod test_util;

/// Reasons inbound data could not be turned into a record
#[derive(Error, Debug)]
pub enum Error {
    #[error("input was invalid: {0}")]
    Invalid(ValidationErrors),
    #[error("input could not be read: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl From<ValidationErrors> for Error {
    fn from(value: ValidationErrors) -> Self {
        Self::Invalid(value)
    }
}

/// Failures reported by a storage port
#[derive(Error, Debug)]
pub enum DrivenPortError {
    #[error("a communication failure occurred: {0}")]
    CommsFailure(anyhow::Error),
    #[error("the requested data does not exist")]
    DoesNotExist,
    #[error("a record with the same unique key already exists")]
    AlreadyExists,
}

impl From<anyhow::Error> for DrivenPortError {
    fn from(value: anyhow::Error) -> Self {
        Self::CommsFailure(value)
    }
}
