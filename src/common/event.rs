use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::{ReviewEntry, ReviewId};

pub type MutationId = u64;

/// A local change to a course's review list, kept until the remote store answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewEvent {
    Added {
        entry: ReviewEntry,
    },
    Updated {
        review_id: ReviewId,
        old_body: String,
        old_rating: u8,
        new_body: String,
        new_rating: u8,
    },
    Removed {
        entry: ReviewEntry,
        index: usize,
    },
}

impl ReviewEvent {
    pub fn review_id(&self) -> ReviewId {
        match self {
            ReviewEvent::Added { entry } => entry.id,
            ReviewEvent::Updated { review_id, .. } => *review_id,
            ReviewEvent::Removed { entry, .. } => entry.id,
        }
    }
}

impl fmt::Display for ReviewEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewEvent::Added { entry } => write!(f, "added review {}", entry.id),
            ReviewEvent::Updated { review_id, .. } => write!(f, "updated review {}", review_id),
            ReviewEvent::Removed { entry, .. } => write!(f, "removed review {}", entry.id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationStatus {
    /// Applied locally, remote answer outstanding
    Pending,
    /// Confirmed by the remote store
    Applied,
    /// Refused by the remote store and reverted locally
    Rejected,
}

impl fmt::Display for MutationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationStatus::Pending => write!(f, "pending"),
            MutationStatus::Applied => write!(f, "applied"),
            MutationStatus::Rejected => write!(f, "rejected"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mutation {
    pub id: MutationId,
    pub event: ReviewEvent,
    pub status: MutationStatus,
}

/// The value produced by a mutating operation, with the ledger id to settle it by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt<T> {
    pub mutation: MutationId,
    pub value: T,
}
