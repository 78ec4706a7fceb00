use thiserror::Error;

use super::guard::Capability;
use crate::db::enums::ModAction;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("the platform refused the action")]
    Forbidden,
    #[error("target not found")]
    NotFound,
    #[error("platform error: {0}")]
    Other(String)
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Backend(String)
}

impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ExecutionError {
    /// The acting member lacks the required capability. Recovered at the
    /// command boundary; nothing is written.
    #[error("you lack the {0} capability")]
    Unauthorized(Capability),

    /// The platform rejected the membership action (bot outranked, target
    /// gone, missing bot privilege). Nothing is written.
    #[error("the bot is not allowed to {0} this user")]
    PlatformForbidden(ModAction),

    /// The audit write failed after the in-guild effect already happened.
    /// The user-facing message must describe a logging failure, not an
    /// action failure.
    #[error("the {action} succeeded but could not be logged: {source}")]
    Persistence {
        action: ModAction,
        #[source]
        source: StoreError
    },

    #[error("platform error during {action}: {detail}")]
    Platform { action: ModAction, detail: String }
}
