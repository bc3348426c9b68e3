//! Course review aggregation for the EduMart marketplace.
//!
//! [`aggregator::CommentAggregator`] holds one course's reviews for one viewer
//! and derives the star histogram; [`session::ReviewSession`] pairs it with a
//! [`storage::PersistenceGateway`] so local changes are confirmed or rolled back.

pub mod aggregator;
pub mod cli;
pub mod common;
pub mod distribution;
pub mod errors;
pub mod session;
pub mod storage;

pub use aggregator::CommentAggregator;
pub use distribution::RatingDistribution;
pub use errors::{ReviewError, ReviewResult, SessionError, SessionResult};
pub use session::{MutationOutcome, ReviewSession};
