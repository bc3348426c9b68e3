use serde::Serialize;

use crate::common::{Rating, ReviewEntry};

/// Count and share of reviews at each star level.
///
/// Always derived from a list of entries, never stored alongside it. Entries
/// whose rating falls outside `1..=5` are skipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingDistribution {
    counts: [usize; 5],
    percentages: [f64; 5],
    total: usize,
}

impl RatingDistribution {
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a ReviewEntry>,
    {
        let mut counts = [0usize; 5];
        for rating in entries.into_iter().filter_map(ReviewEntry::rating) {
            counts[rating.index()] += 1;
        }

        let total: usize = counts.iter().sum();
        let mut percentages = [0.0; 5];
        if total > 0 {
            for (pct, count) in percentages.iter_mut().zip(counts) {
                *pct = count as f64 / total as f64 * 100.0;
            }
        }

        Self {
            counts,
            percentages,
            total,
        }
    }

    pub fn count(&self, rating: Rating) -> usize {
        self.counts[rating.index()]
    }

    pub fn percentage(&self, rating: Rating) -> f64 {
        self.percentages[rating.index()]
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Mean star value of the counted entries
    pub fn average(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        let sum: usize = Rating::all()
            .iter()
            .map(|r| r.as_u8() as usize * self.count(*r))
            .sum();
        Some(sum as f64 / self.total as f64)
    }

    /// `(rating, count, percentage)` rows, five stars first
    pub fn rows(&self) -> impl Iterator<Item = (Rating, usize, f64)> + '_ {
        Rating::all()
            .iter()
            .map(|r| (*r, self.count(*r), self.percentage(*r)))
    }
}
