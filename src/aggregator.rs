use std::collections::HashSet;

use log::{debug, warn};

use crate::common::{
    Clock, DateFormatter, DayMonthYear, Identity, Mutation, MutationId, MutationStatus, NewReview,
    Rating, RatingFilter, Receipt, ReviewEntry, ReviewEvent, ReviewId, ReviewPatch, SystemClock,
};
use crate::distribution::RatingDistribution;
use crate::errors::{ReviewError, ReviewResult};

/// The review list of one course, as seen by one viewer.
///
/// `CommentAggregator` owns the full working list in display order (newest
/// additions first) together with the active star filter. Filtering never
/// touches the working list; it only selects which entries are visible.
///
/// Every mutation is applied locally right away and recorded as a pending
/// [`Mutation`]. The caller forwards the change to the remote store and then
/// settles it with [`confirm`](Self::confirm) or
/// [`apply_remote_failure`](Self::apply_remote_failure), the latter undoing the
/// local change.
///
/// ```rust
/// use edumart_reviews::aggregator::CommentAggregator;
/// use edumart_reviews::common::{Identity, NewReview, Rating, RatingFilter};
///
/// let viewer = Identity::new("u-1", "Lan");
/// let mut reviews = CommentAggregator::new(viewer);
/// reviews.initialize(Vec::new());
///
/// let receipt = reviews.add(NewReview::new(5, "Clear and practical"))?;
/// reviews.confirm(receipt.mutation)?;
///
/// assert_eq!(reviews.set_filter(RatingFilter::Only(Rating::Five)).len(), 1);
/// assert_eq!(reviews.distribution().total(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct CommentAggregator<C = SystemClock, F = DayMonthYear> {
    viewer: Identity,
    clock: C,
    formatter: F,
    entries: Vec<ReviewEntry>,
    filter: RatingFilter,
    ledger: Vec<Mutation>,
    next_mutation: MutationId,
}

impl CommentAggregator {
    pub fn new(viewer: Identity) -> Self {
        Self::with_clock(viewer, SystemClock, DayMonthYear)
    }
}

impl<C: Clock, F: DateFormatter> CommentAggregator<C, F> {
    pub fn with_clock(viewer: Identity, clock: C, formatter: F) -> Self {
        Self {
            viewer,
            clock,
            formatter,
            entries: Vec::new(),
            filter: RatingFilter::All,
            ledger: Vec::new(),
            next_mutation: 1,
        }
    }

    /// Replace the working list with a course's full review list.
    ///
    /// Resets the filter to "all" and forgets every recorded mutation. When the
    /// seed repeats an id, the first entry wins.
    pub fn initialize(&mut self, full_list: Vec<ReviewEntry>) {
        let mut seen = HashSet::with_capacity(full_list.len());
        let mut entries = Vec::with_capacity(full_list.len());
        for entry in full_list {
            if seen.insert(entry.id) {
                entries.push(entry);
            } else {
                warn!("Dropping duplicate review id {} from seed list", entry.id);
            }
        }

        debug!("Initialized review list with {} entries", entries.len());
        self.entries = entries;
        self.filter = RatingFilter::All;
        self.ledger.clear();
    }

    /// Create a review by the viewer and put it at the top of the list.
    pub fn add(&mut self, input: NewReview) -> ReviewResult<Receipt<ReviewEntry>> {
        let (rating, body) = validate(input.rating, &input.body)?;

        let now = self.clock.now();
        let id = self.fresh_id(now.timestamp_millis())?;
        let entry = ReviewEntry::new(id, &self.viewer, self.formatter.format(now), body, rating);

        self.entries.insert(0, entry.clone());
        let mutation = self.record(ReviewEvent::Added {
            entry: entry.clone(),
        });

        debug!("Added review {} ({} stars)", id, rating);
        Ok(Receipt {
            mutation,
            value: entry,
        })
    }

    /// Replace the body and rating of one of the viewer's reviews, in place.
    pub fn update(
        &mut self,
        id: ReviewId,
        patch: ReviewPatch,
    ) -> ReviewResult<Receipt<ReviewEntry>> {
        let index = self.position(id).ok_or_else(|| ReviewError::not_found(id))?;
        self.check_author(&self.entries[index])?;
        let (rating, body) = validate(patch.rating, &patch.body)?;

        let entry = &mut self.entries[index];
        let old_body = std::mem::replace(&mut entry.body, body);
        let old_rating = std::mem::replace(&mut entry.rating, rating.as_u8());
        let updated = entry.clone();

        let mutation = self.record(ReviewEvent::Updated {
            review_id: id,
            old_body,
            old_rating,
            new_body: updated.body.clone(),
            new_rating: updated.rating,
        });

        debug!("Updated review {} ({} stars)", id, rating);
        Ok(Receipt {
            mutation,
            value: updated,
        })
    }

    /// Delete one of the viewer's reviews. An unknown id is a no-op.
    ///
    /// Confirming the deletion with the user is up to the caller.
    pub fn remove(&mut self, id: ReviewId) -> ReviewResult<Option<Receipt<ReviewEntry>>> {
        let Some(index) = self.position(id) else {
            debug!("Ignoring removal of unknown review {}", id);
            return Ok(None);
        };
        self.check_author(&self.entries[index])?;

        let entry = self.entries.remove(index);
        let mutation = self.record(ReviewEvent::Removed {
            entry: entry.clone(),
            index,
        });

        debug!("Removed review {}", id);
        Ok(Some(Receipt {
            mutation,
            value: entry,
        }))
    }

    /// Switch the active filter and return the entries it selects.
    pub fn set_filter(&mut self, filter: RatingFilter) -> Vec<&ReviewEntry> {
        self.filter = filter;
        self.visible()
    }

    /// Entries matching the active filter, in list order
    pub fn visible(&self) -> Vec<&ReviewEntry> {
        self.entries
            .iter()
            .filter(|entry| self.filter.matches(entry.rating))
            .collect()
    }

    /// Histogram of the currently visible entries.
    ///
    /// With a star filter active this only counts that star level, so the
    /// chart tracks what the list shows. Use
    /// [`full_distribution`](Self::full_distribution) for the whole course.
    pub fn distribution(&self) -> RatingDistribution {
        RatingDistribution::from_entries(self.visible())
    }

    /// Histogram of every entry regardless of the active filter
    pub fn full_distribution(&self) -> RatingDistribution {
        RatingDistribution::from_entries(&self.entries)
    }

    pub fn entries(&self) -> &[ReviewEntry] {
        &self.entries
    }

    pub fn get(&self, id: ReviewId) -> Option<&ReviewEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn filter(&self) -> RatingFilter {
        self.filter
    }

    pub fn viewer(&self) -> &Identity {
        &self.viewer
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn mutation_status(&self, mutation: MutationId) -> Option<MutationStatus> {
        self.find_mutation(mutation).map(|m| m.status)
    }

    /// Mutations still waiting for the remote store, oldest first
    pub fn pending(&self) -> impl Iterator<Item = &Mutation> {
        self.ledger
            .iter()
            .filter(|m| m.status == MutationStatus::Pending)
    }

    /// Drop settled mutations from the ledger, keeping pending ones.
    ///
    /// Applied and rejected records stay queryable through
    /// [`mutation_status`](Self::mutation_status) until this is called or the
    /// list is re-initialized. Returns how many records were dropped.
    pub fn prune_settled(&mut self) -> usize {
        let before = self.ledger.len();
        self.ledger.retain(|m| m.status == MutationStatus::Pending);
        before - self.ledger.len()
    }

    /// Mark a pending mutation as accepted by the remote store.
    pub fn confirm(&mut self, mutation: MutationId) -> ReviewResult<()> {
        let record = self.pending_mutation(mutation)?;
        record.status = MutationStatus::Applied;
        debug!("Mutation {} applied", mutation);
        Ok(())
    }

    /// Mark a pending mutation as refused by the remote store and undo it locally.
    ///
    /// Returns the entry as it stands after the revert, or the removed entry
    /// when an addition is undone. `None` when a later change already made the
    /// revert moot: the updated entry has since been deleted or edited again.
    pub fn apply_remote_failure(
        &mut self,
        mutation: MutationId,
    ) -> ReviewResult<Option<ReviewEntry>> {
        let record = self.pending_mutation(mutation)?;
        record.status = MutationStatus::Rejected;
        let event = record.event.clone();

        warn!("Rolling back mutation {}: {}", mutation, event);
        let reverted = match event {
            ReviewEvent::Added { entry } => self
                .position(entry.id)
                .map(|index| self.entries.remove(index)),
            ReviewEvent::Updated {
                review_id,
                old_body,
                old_rating,
                new_body,
                new_rating,
            } => match self.position(review_id) {
                Some(index)
                    if self.entries[index].body == new_body
                        && self.entries[index].rating == new_rating =>
                {
                    let entry = &mut self.entries[index];
                    entry.body = old_body;
                    entry.rating = old_rating;
                    Some(entry.clone())
                }
                _ => None,
            },
            ReviewEvent::Removed { entry, index } => {
                if self.position(entry.id).is_some() {
                    None
                } else {
                    let index = index.min(self.entries.len());
                    self.entries.insert(index, entry.clone());
                    Some(entry)
                }
            }
        };
        Ok(reverted)
    }

    fn record(&mut self, event: ReviewEvent) -> MutationId {
        let id = self.next_mutation;
        self.next_mutation += 1;
        self.ledger.push(Mutation {
            id,
            event,
            status: MutationStatus::Pending,
        });
        id
    }

    fn find_mutation(&self, mutation: MutationId) -> Option<&Mutation> {
        self.ledger.iter().find(|m| m.id == mutation)
    }

    fn pending_mutation(&mut self, mutation: MutationId) -> ReviewResult<&mut Mutation> {
        let record = self
            .ledger
            .iter_mut()
            .find(|m| m.id == mutation)
            .ok_or(ReviewError::UnknownMutation { mutation })?;
        if record.status != MutationStatus::Pending {
            return Err(ReviewError::MutationSettled { mutation });
        }
        Ok(record)
    }

    fn position(&self, id: ReviewId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    fn check_author(&self, entry: &ReviewEntry) -> ReviewResult<()> {
        if entry.is_authored_by(&self.viewer) {
            Ok(())
        } else {
            Err(ReviewError::permission(entry.id, &self.viewer.id))
        }
    }

    /// Creation timestamp in milliseconds, bumped past any id already in use.
    ///
    /// When the largest id in use is `u64::MAX`, falls back to the first free
    /// id at or after the timestamp, wrapping around to zero.
    fn fresh_id(&self, now_millis: i64) -> ReviewResult<ReviewId> {
        let candidate = u64::try_from(now_millis).unwrap_or(0);
        let max = match self.entries.iter().map(|entry| entry.id).max() {
            Some(max) if max >= candidate => max,
            _ => return Ok(candidate),
        };
        if let Some(next) = max.checked_add(1) {
            return Ok(next);
        }

        let used: HashSet<ReviewId> = self.entries.iter().map(|entry| entry.id).collect();
        (candidate..=u64::MAX)
            .chain(0..candidate)
            .find(|id| !used.contains(id))
            .ok_or_else(|| ReviewError::validation("no free review id left"))
    }
}

fn validate(rating: u8, body: &str) -> ReviewResult<(Rating, String)> {
    if rating == 0 {
        return Err(ReviewError::validation("a star rating is required"));
    }
    let rating = Rating::from_u8(rating)
        .ok_or_else(|| ReviewError::validation(format!("rating must be 1-5, got {}", rating)))?;

    let body = body.trim();
    if body.is_empty() {
        return Err(ReviewError::validation("review text must not be empty"));
    }

    Ok((rating, body.to_string()))
}
