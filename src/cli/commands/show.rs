use anyhow::Result;
use clap::Args;

use crate::cli::output::format_review_full;
use crate::common::ReviewId;
use crate::errors::ReviewError;
use crate::storage::CourseStore;

#[derive(Args)]
pub struct ShowArgs {
    /// Course ID
    pub course: String,

    /// Review ID to show
    pub review: ReviewId,
}

pub fn handle_show(data_dir: std::path::PathBuf, args: ShowArgs) -> Result<()> {
    let store = CourseStore::open(&data_dir)?;
    let course = store.get_course(&args.course)?;
    let entry = course
        .comment_list
        .iter()
        .find(|e| e.id == args.review)
        .ok_or_else(|| ReviewError::not_found(args.review))?;

    print!("{}", format_review_full(entry));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn test_show_command() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().to_path_buf();
        let mut store = CourseStore::init(&data_dir).unwrap();
        store
            .create_course(create_test_course("rust-101", &[(1, 5)]))
            .unwrap();

        let found = ShowArgs {
            course: "rust-101".to_string(),
            review: 1,
        };
        assert!(handle_show(data_dir.clone(), found).is_ok());

        let missing = ShowArgs {
            course: "rust-101".to_string(),
            review: 2,
        };
        assert!(handle_show(data_dir, missing).is_err());
    }
}
