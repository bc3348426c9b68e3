use serde::{Deserialize, Serialize};

use crate::common::{Identity, Rating, UserId};

pub type ReviewId = u64;

/// One user's review of a course, as it appears in a course record's `commentList`.
///
/// `rating` is kept as the raw star value so that records seeded from the
/// marketplace are accepted unchanged; entries created or edited locally are
/// always validated into `1..=5`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewEntry {
    pub id: ReviewId,
    pub author_id: UserId,
    pub author_name: String,
    #[serde(default)]
    pub author_avatar_url: Option<String>,
    pub created_at_display: String,
    pub body: String,
    pub rating: u8,
}

impl ReviewEntry {
    pub fn new(
        id: ReviewId,
        author: &Identity,
        created_at_display: String,
        body: String,
        rating: Rating,
    ) -> Self {
        Self {
            id,
            author_id: author.id.clone(),
            author_name: author.display_name.clone(),
            author_avatar_url: author.avatar_url.clone(),
            created_at_display,
            body,
            rating: rating.as_u8(),
        }
    }

    /// The validated rating, `None` for out-of-range seeded values
    pub fn rating(&self) -> Option<Rating> {
        Rating::from_u8(self.rating)
    }

    /// An anonymous viewer authors nothing, even entries with an empty author id
    pub fn is_authored_by(&self, identity: &Identity) -> bool {
        !identity.is_anonymous() && self.author_id == identity.id
    }
}

/// Input for a new review. Fields are unvalidated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewReview {
    pub rating: u8,
    pub body: String,
}

impl NewReview {
    pub fn new(rating: u8, body: impl Into<String>) -> Self {
        Self {
            rating,
            body: body.into(),
        }
    }
}

/// Replacement body and rating for an existing review. Fields are unvalidated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReviewPatch {
    pub rating: u8,
    pub body: String,
}

impl ReviewPatch {
    pub fn new(rating: u8, body: impl Into<String>) -> Self {
        Self {
            rating,
            body: body.into(),
        }
    }
}
