use serde::{Deserialize, Serialize};

pub type UserId = String;

/// The viewer acting on a course's reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: UserId,
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl Identity {
    pub fn new(id: impl Into<UserId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            avatar_url: None,
        }
    }

    /// Viewer for read-only access; authors nothing
    pub fn anonymous() -> Self {
        Self::new("", "Guest")
    }

    /// Whether this is the read-only viewer, which has no user id
    pub fn is_anonymous(&self) -> bool {
        self.id.is_empty()
    }

    pub fn with_avatar(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }
}

impl core::fmt::Display for Identity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} <{}>", self.display_name, self.id)
    }
}
