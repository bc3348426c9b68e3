use serde::{Deserialize, Serialize};

use crate::common::ReviewEntry;

pub type CourseId = String;

/// The part of a marketplace course record the review view reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    pub id: CourseId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub comment_list: Vec<ReviewEntry>,
}

impl CourseRecord {
    pub fn new(id: impl Into<CourseId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            comment_list: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_record_json() {
        let json = r#"{
            "id": "rust-101",
            "title": "Rust for beginners",
            "commentList": [
                {"id": 2, "authorId": "7", "authorName": "Minh", "createdAtDisplay": "2/1/2024", "body": "Good", "rating": 4},
                {"id": 1, "authorId": "8", "authorName": "Lan", "createdAtDisplay": "1/1/2024", "body": "Great", "rating": 5}
            ]
        }"#;

        let record: CourseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "rust-101");
        assert_eq!(record.comment_list.len(), 2);
        assert_eq!(record.comment_list[0].id, 2);

        let minimal: CourseRecord = serde_json::from_str(r#"{"id": "empty"}"#).unwrap();
        assert!(minimal.comment_list.is_empty());
        assert_eq!(minimal.title, "");
    }
}
