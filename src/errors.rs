use thiserror::Error;

use crate::common::{MutationId, ReviewId, UserId};
use crate::storage::StorageError;

/// Rejections raised by the review aggregator. Every variant leaves the
/// aggregator's state exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    #[error("Invalid review: {message}")]
    Validation { message: String },

    #[error("Review not found: {id}")]
    NotFound { id: ReviewId },

    #[error("User {user} is not the author of review {id}")]
    Permission { id: ReviewId, user: UserId },

    #[error("Unknown mutation: {mutation}")]
    UnknownMutation { mutation: MutationId },

    #[error("Mutation {mutation} is already settled")]
    MutationSettled { mutation: MutationId },
}

impl ReviewError {
    pub fn validation(message: impl AsRef<str>) -> Self {
        ReviewError::Validation {
            message: message.as_ref().to_string(),
        }
    }

    pub fn not_found(id: ReviewId) -> Self {
        ReviewError::NotFound { id }
    }

    pub fn permission(id: ReviewId, user: impl AsRef<str>) -> Self {
        ReviewError::Permission {
            id,
            user: user.as_ref().to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Review(#[from] ReviewError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type ReviewResult<T> = Result<T, ReviewError>;
pub type SessionResult<T> = Result<T, SessionError>;
