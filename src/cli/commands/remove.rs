use anyhow::Result;
use clap::Args;
use console::Term;

use crate::cli::output::{format_review_compact, warning_message};
use crate::common::{EnvProvider, ReviewId, SystemEnvProvider};
use crate::errors::ReviewError;
use crate::session::ReviewSession;
use crate::storage::CourseStore;

use super::{UserArgs, get_acting_identity, report_outcome};

#[derive(Args)]
pub struct RemoveArgs {
    /// Course ID
    pub course: String,

    /// Review ID to delete
    pub review: ReviewId,

    /// Delete without asking for confirmation
    #[arg(short, long)]
    pub yes: bool,

    #[command(flatten)]
    pub user: UserArgs,
}

pub fn handle_remove(data_dir: std::path::PathBuf, args: RemoveArgs) -> Result<()> {
    handle_remove_with_env(data_dir, args, SystemEnvProvider)
}

fn handle_remove_with_env(
    data_dir: std::path::PathBuf,
    args: RemoveArgs,
    env_provider: impl EnvProvider,
) -> Result<()> {
    let store = CourseStore::open(&data_dir)?;
    let viewer = get_acting_identity(args.user, &store, env_provider)?;
    let mut session = ReviewSession::from_store(store, &args.course, viewer)?;

    if let Some(entry) = session.reviews().get(args.review) {
        if !entry.is_authored_by(session.reviews().viewer()) {
            return Err(ReviewError::permission(entry.id, &session.reviews().viewer().id).into());
        }
        if !args.yes && !confirm(&format!("Delete {}?", format_review_compact(entry)))? {
            println!("{}", warning_message("Aborted"));
            return Ok(());
        }
    }

    match session.remove(args.review)? {
        Some(outcome) => report_outcome(outcome, "Deleted"),
        None => {
            println!(
                "{}",
                warning_message(&format!(
                    "Review #{} not found in {}; nothing to delete",
                    args.review, args.course
                ))
            );
            Ok(())
        }
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    let term = Term::stderr();
    term.write_str(&format!("{} [y/N] ", prompt))?;
    let answer = term.read_line()?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::MockEnvProvider;
    use crate::storage::test_helpers::*;
    use tempfile::TempDir;

    fn setup_temp_cli_store() -> (TempDir, std::path::PathBuf) {
        let temp_dir = TempDir::new().expect("Failed to create temporary directory");
        let data_dir = temp_dir.path().to_path_buf();
        let mut store = CourseStore::init(&data_dir).expect("Failed to init store");
        let mut course = create_test_course("rust-101", &[(1, 5), (2, 3)]);
        course.comment_list[1].author_id = "someone-else".to_string();
        store.create_course(course).expect("Failed to create course");
        (temp_dir, data_dir)
    }

    fn remove_args(review: ReviewId) -> RemoveArgs {
        RemoveArgs {
            course: "rust-101".to_string(),
            review,
            yes: true,
            user: UserArgs::default(),
        }
    }

    fn stored_ids(data_dir: &std::path::Path) -> Vec<ReviewId> {
        CourseStore::open(data_dir)
            .unwrap()
            .get_course("rust-101")
            .unwrap()
            .comment_list
            .iter()
            .map(|e| e.id)
            .collect()
    }

    #[test]
    fn test_remove_command() {
        let (_temp_dir, data_dir) = setup_temp_cli_store();

        handle_remove_with_env(
            data_dir.clone(),
            remove_args(1),
            MockEnvProvider::with_user("u-1", "Test User"),
        )
        .expect("Remove should succeed");

        assert_eq!(stored_ids(&data_dir), vec![2]);
    }

    #[test]
    fn test_remove_command_unknown_review_is_noop() {
        let (_temp_dir, data_dir) = setup_temp_cli_store();

        let result = handle_remove_with_env(
            data_dir.clone(),
            remove_args(99),
            MockEnvProvider::with_user("u-1", "Test User"),
        );

        assert!(result.is_ok());
        assert_eq!(stored_ids(&data_dir), vec![1, 2]);
    }

    #[test]
    fn test_remove_command_refuses_non_author() {
        let (_temp_dir, data_dir) = setup_temp_cli_store();

        let result = handle_remove_with_env(
            data_dir.clone(),
            remove_args(2),
            MockEnvProvider::with_user("u-1", "Test User"),
        );

        assert!(result.is_err());
        assert_eq!(stored_ids(&data_dir), vec![1, 2]);
    }
}
