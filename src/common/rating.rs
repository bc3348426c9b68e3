use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Star rating of a review
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Rating {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
}

impl Rating {
    /// Get the numeric star value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a rating from its star value, `None` outside 1..=5
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Rating::One),
            2 => Some(Rating::Two),
            3 => Some(Rating::Three),
            4 => Some(Rating::Four),
            5 => Some(Rating::Five),
            _ => None,
        }
    }

    /// All ratings, highest first (the order histograms are drawn in)
    pub fn all() -> &'static [Rating] {
        &[
            Rating::Five,
            Rating::Four,
            Rating::Three,
            Rating::Two,
            Rating::One,
        ]
    }

    /// Zero-based bucket index, `One` is 0
    pub(crate) fn index(self) -> usize {
        self as usize - 1
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::from_u8(value)
            .ok_or_else(|| format!("Rating must be between 1 and 5, got {}", value))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.as_u8()
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

impl FromStr for Rating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(Rating::from_u8)
            .ok_or_else(|| format!("Invalid rating '{}'. Valid options: 1, 2, 3, 4, 5", s))
    }
}

/// Which reviews are visible: every entry, or only one star level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RatingFilter {
    #[default]
    All,
    Only(Rating),
}

impl RatingFilter {
    pub fn matches(self, rating: u8) -> bool {
        match self {
            RatingFilter::All => true,
            RatingFilter::Only(r) => r.as_u8() == rating,
        }
    }
}

impl From<Rating> for RatingFilter {
    fn from(rating: Rating) -> Self {
        RatingFilter::Only(rating)
    }
}

impl fmt::Display for RatingFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatingFilter::All => write!(f, "all"),
            RatingFilter::Only(rating) => write!(f, "{}", rating),
        }
    }
}

impl FromStr for RatingFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(RatingFilter::All);
        }
        s.parse::<Rating>()
            .map(RatingFilter::Only)
            .map_err(|_| format!("Invalid filter '{}'. Valid options: all, 1, 2, 3, 4, 5", s))
    }
}
