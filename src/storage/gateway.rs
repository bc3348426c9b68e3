use super::errors::StorageResult;
use crate::common::{ReviewEntry, ReviewId};

/// Remote side of review mutations.
///
/// The aggregator never calls this itself. A [`ReviewSession`](crate::session::ReviewSession)
/// applies each change locally first, then reports it here and settles the
/// aggregator's ledger according to the answer.
pub trait PersistenceGateway {
    fn create_review(&mut self, course_id: &str, entry: &ReviewEntry) -> StorageResult<()>;

    fn update_review(&mut self, course_id: &str, entry: &ReviewEntry) -> StorageResult<()>;

    fn delete_review(&mut self, course_id: &str, review_id: ReviewId) -> StorageResult<()>;
}
