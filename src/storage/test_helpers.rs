use crate::common::{CourseRecord, Identity, Rating, ReviewEntry, ReviewId};

pub fn create_test_identity() -> Identity {
    Identity::new("u-1", "Test User")
}

/// A review by the test identity with the given id and star value
pub fn create_test_review(id: ReviewId, rating: u8) -> ReviewEntry {
    let mut entry = ReviewEntry::new(
        id,
        &create_test_identity(),
        "1/1/2024".to_string(),
        format!("Review {}", id),
        Rating::One,
    );
    entry.rating = rating;
    entry
}

/// A course whose comment list holds one test review per `(id, rating)` pair
pub fn create_test_course(course_id: &str, reviews: &[(ReviewId, u8)]) -> CourseRecord {
    let mut course = CourseRecord::new(course_id, format!("Course {}", course_id));
    course.comment_list = reviews
        .iter()
        .map(|(id, rating)| create_test_review(*id, *rating))
        .collect();
    course
}
