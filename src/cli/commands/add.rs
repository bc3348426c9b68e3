use anyhow::Result;
use clap::Args;

use crate::common::{EnvProvider, NewReview, SystemEnvProvider};
use crate::session::ReviewSession;
use crate::storage::CourseStore;

use super::{UserArgs, get_acting_identity, report_outcome, strip_comment_lines};

const BODY_TEMPLATE: &str = "\n# Write your review above. Lines starting with '#' are ignored.\n";

#[derive(Args)]
pub struct AddArgs {
    /// Course ID
    pub course: String,

    /// Star rating (1-5)
    #[arg(short, long)]
    pub rating: u8,

    /// Review text (opens $EDITOR when omitted)
    #[arg(short, long)]
    pub body: Option<String>,

    #[command(flatten)]
    pub user: UserArgs,
}

pub fn handle_add(data_dir: std::path::PathBuf, args: AddArgs) -> Result<()> {
    handle_add_with_env(data_dir, args, SystemEnvProvider)
}

pub fn handle_add_with_env(
    data_dir: std::path::PathBuf,
    args: AddArgs,
    env_provider: impl EnvProvider,
) -> Result<()> {
    let store = CourseStore::open(&data_dir)?;
    let viewer = get_acting_identity(args.user, &store, env_provider)?;

    let body = match args.body {
        Some(body) => body,
        None => strip_comment_lines(&edit::edit(BODY_TEMPLATE)?),
    };

    let mut session = ReviewSession::from_store(store, &args.course, viewer)?;
    let outcome = session.add(NewReview::new(args.rating, body))?;
    report_outcome(outcome, "Added")
}
