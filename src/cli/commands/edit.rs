use anyhow::Result;
use clap::Args;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;

use crate::cli::output::info_message;
use crate::common::{EnvProvider, ReviewEntry, ReviewId, ReviewPatch, SystemEnvProvider};
use crate::errors::ReviewError;
use crate::session::ReviewSession;
use crate::storage::CourseStore;

use super::{UserArgs, get_acting_identity, report_outcome};

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
struct EditableReview {
    rating: u8,
    body: String,
}

#[derive(Args)]
pub struct EditArgs {
    /// Course ID
    pub course: String,

    /// Review ID to edit
    pub review: ReviewId,

    /// Set the star rating directly (for programmatic access)
    #[arg(short, long)]
    pub rating: Option<u8>,

    /// Set the review text directly (for programmatic access)
    #[arg(short, long)]
    pub body: Option<String>,

    /// Skip interactive editor, use only CLI arguments
    #[arg(long)]
    pub no_editor: bool,

    #[command(flatten)]
    pub user: UserArgs,
}

pub fn handle_edit(data_dir: std::path::PathBuf, args: EditArgs) -> Result<()> {
    handle_edit_with_env(data_dir, args, SystemEnvProvider)
}

fn handle_edit_with_env(
    data_dir: std::path::PathBuf,
    args: EditArgs,
    env_provider: impl EnvProvider,
) -> Result<()> {
    let store = CourseStore::open(&data_dir)?;
    let viewer = get_acting_identity(args.user.clone(), &store, env_provider)?;
    let mut session = ReviewSession::from_store(store, &args.course, viewer)?;

    let current = session
        .reviews()
        .get(args.review)
        .cloned()
        .ok_or_else(|| ReviewError::not_found(args.review))?;

    // Refuse before opening an editor the change could never be saved from
    if !current.is_authored_by(session.reviews().viewer()) {
        return Err(ReviewError::permission(current.id, &session.reviews().viewer().id).into());
    }

    let editable = if args.no_editor {
        apply_cli_edits(&current, &args)
    } else {
        edit_with_editor(&current)?
    };

    if editable.rating == current.rating && editable.body.trim() == current.body {
        println!("{}", info_message("No changes to apply"));
        return Ok(());
    }

    let outcome = session.update(
        args.review,
        ReviewPatch::new(editable.rating, editable.body),
    )?;
    report_outcome(outcome, "Updated")
}

fn apply_cli_edits(current: &ReviewEntry, args: &EditArgs) -> EditableReview {
    EditableReview {
        rating: args.rating.unwrap_or(current.rating),
        body: args.body.clone().unwrap_or_else(|| current.body.clone()),
    }
}

fn edit_with_editor(current: &ReviewEntry) -> Result<EditableReview> {
    let template = create_template(current);

    let mut temp_file = tempfile::Builder::new().suffix(".yaml").tempfile()?;
    writeln!(temp_file, "{}", template)?;
    temp_file.flush()?;

    edit::edit_file(temp_file.path())?;

    let edited_content = fs::read_to_string(temp_file.path())?;
    parse_template(&edited_content)
}

fn create_template(entry: &ReviewEntry) -> String {
    format!(
        r#"# Edit the fields below. Save and close to apply changes.

rating: {}  # 1-5
body: |
{}"#,
        entry.rating,
        entry
            .body
            .lines()
            .map(|line| format!("  {}", line))
            .collect::<Vec<_>>()
            .join("\n")
    )
}

fn parse_template(content: &str) -> Result<EditableReview> {
    serde_yaml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse YAML: {}", e))
}
