use thiserror::Error;

use crate::common::ReviewId;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Course not found: {course_id}")]
    CourseNotFound { course_id: String },

    #[error("Course already exists: {course_id}")]
    CourseExists { course_id: String },

    #[error("Review {review_id} not found in course {course_id}")]
    ReviewNotFound {
        course_id: String,
        review_id: ReviewId,
    },

    #[error("Review {review_id} already exists in course {course_id}")]
    ReviewConflict {
        course_id: String,
        review_id: ReviewId,
    },

    #[error("Invalid course ID '{value}': use letters, digits, '-' or '_'")]
    InvalidCourseId { value: String },

    #[error("Store not initialized at {path}")]
    NotInitialized { path: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    pub fn course_not_found(course_id: impl AsRef<str>) -> Self {
        StorageError::CourseNotFound {
            course_id: course_id.as_ref().to_string(),
        }
    }

    pub fn course_exists(course_id: impl AsRef<str>) -> Self {
        StorageError::CourseExists {
            course_id: course_id.as_ref().to_string(),
        }
    }

    pub fn review_not_found(course_id: impl AsRef<str>, review_id: ReviewId) -> Self {
        StorageError::ReviewNotFound {
            course_id: course_id.as_ref().to_string(),
            review_id,
        }
    }

    pub fn review_conflict(course_id: impl AsRef<str>, review_id: ReviewId) -> Self {
        StorageError::ReviewConflict {
            course_id: course_id.as_ref().to_string(),
            review_id,
        }
    }

    pub fn invalid_course_id(value: impl AsRef<str>) -> Self {
        StorageError::InvalidCourseId {
            value: value.as_ref().to_string(),
        }
    }
}

// Result type alias for convenience
pub type StorageResult<T> = Result<T, StorageError>;
