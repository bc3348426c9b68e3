use log::{info, warn};

use crate::aggregator::CommentAggregator;
use crate::common::{
    Clock, CourseId, CourseRecord, DateFormatter, DayMonthYear, Identity, MutationId, NewReview,
    ReviewEntry, ReviewId, ReviewPatch, SystemClock,
};
use crate::errors::SessionResult;
use crate::storage::{CourseStore, PersistenceGateway, StorageError};

/// What became of a mutation once the gateway answered.
#[derive(Debug)]
pub enum MutationOutcome {
    /// Stored remotely; the local change stands
    Applied(ReviewEntry),
    /// The gateway refused it; the local change was undone
    RolledBack {
        entry: ReviewEntry,
        error: StorageError,
    },
}

impl MutationOutcome {
    pub fn entry(&self) -> &ReviewEntry {
        match self {
            MutationOutcome::Applied(entry) => entry,
            MutationOutcome::RolledBack { entry, .. } => entry,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied(_))
    }
}

/// One viewer's review panel for one course: the aggregator plus the gateway
/// its changes are confirmed against.
pub struct ReviewSession<G, C = SystemClock, F = DayMonthYear> {
    course_id: CourseId,
    reviews: CommentAggregator<C, F>,
    gateway: G,
}

impl<G: PersistenceGateway> ReviewSession<G> {
    /// Seed a session from a course record
    pub fn open(course: CourseRecord, viewer: Identity, gateway: G) -> Self {
        let mut reviews = CommentAggregator::new(viewer);
        reviews.initialize(course.comment_list);
        Self {
            course_id: course.id,
            reviews,
            gateway,
        }
    }
}

impl ReviewSession<CourseStore> {
    /// Load the course from the store and use the store as the gateway
    pub fn from_store(
        store: CourseStore,
        course_id: &str,
        viewer: Identity,
    ) -> SessionResult<Self> {
        let course = store.get_course(course_id)?;
        Ok(Self::open(course, viewer, store))
    }
}

impl<G: PersistenceGateway, C: Clock, F: DateFormatter> ReviewSession<G, C, F> {
    /// Wrap an already initialized aggregator
    pub fn with_aggregator(
        course_id: impl Into<CourseId>,
        reviews: CommentAggregator<C, F>,
        gateway: G,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            reviews,
            gateway,
        }
    }

    pub fn add(&mut self, input: NewReview) -> SessionResult<MutationOutcome> {
        let receipt = self.reviews.add(input)?;
        let result = self.gateway.create_review(&self.course_id, &receipt.value);
        self.settle(receipt.mutation, receipt.value, result)
    }

    pub fn update(&mut self, id: ReviewId, patch: ReviewPatch) -> SessionResult<MutationOutcome> {
        let receipt = self.reviews.update(id, patch)?;
        let result = self.gateway.update_review(&self.course_id, &receipt.value);
        self.settle(receipt.mutation, receipt.value, result)
    }

    /// `Ok(None)` when the review does not exist; the gateway is not called then.
    pub fn remove(&mut self, id: ReviewId) -> SessionResult<Option<MutationOutcome>> {
        let Some(receipt) = self.reviews.remove(id)? else {
            return Ok(None);
        };
        let result = self.gateway.delete_review(&self.course_id, id);
        self.settle(receipt.mutation, receipt.value, result).map(Some)
    }

    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    pub fn reviews(&self) -> &CommentAggregator<C, F> {
        &self.reviews
    }

    pub fn reviews_mut(&mut self) -> &mut CommentAggregator<C, F> {
        &mut self.reviews
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    fn settle(
        &mut self,
        mutation: MutationId,
        entry: ReviewEntry,
        result: Result<(), StorageError>,
    ) -> SessionResult<MutationOutcome> {
        match result {
            Ok(()) => {
                self.reviews.confirm(mutation)?;
                info!("Course {}: review {} saved", self.course_id, entry.id);
                Ok(MutationOutcome::Applied(entry))
            }
            Err(error) => {
                warn!(
                    "Course {}: review {} not saved, reverting: {}",
                    self.course_id, entry.id, error
                );
                self.reviews.apply_remote_failure(mutation)?;
                Ok(MutationOutcome::RolledBack { entry, error })
            }
        }
    }
}
