use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

mod add;
mod edit;
mod import;
mod list;
mod remove;
mod show;
mod stats;

pub use add::{AddArgs, handle_add};
#[cfg(test)]
pub use add::handle_add_with_env;
pub use edit::{EditArgs, handle_edit};
pub use import::{ImportArgs, handle_import};
pub use list::{ListArgs, handle_list};
pub use remove::{RemoveArgs, handle_remove};
pub use show::{ShowArgs, handle_show};
pub use stats::{StatsArgs, handle_stats};

use crate::common::env::{AVATAR_URL_VAR, DATA_DIR_VAR, USER_ID_VAR, USER_NAME_VAR};
use crate::common::{EnvProvider, Identity, RatingFilter, SystemEnvProvider};
use crate::session::MutationOutcome;
use crate::storage::CourseStore;

use super::output::success_message;

#[derive(Parser)]
#[command(name = "edumart-reviews")]
#[command(about = "Course reviews and rating statistics for EduMart")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory holding the course store
    /// (defaults to $EDUMART_DATA_DIR, then the current directory)
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import a course record (JSON) into the store
    Import(ImportArgs),
    /// List a course's reviews
    List(ListArgs),
    /// Show one review in full
    Show(ShowArgs),
    /// Review a course
    Add(AddArgs),
    /// Edit one of your reviews
    Edit(EditArgs),
    /// Delete one of your reviews
    Remove(RemoveArgs),
    /// Show a course's rating distribution
    Stats(StatsArgs),
}

/// Who is acting; each field falls back to the environment and then config.yaml
#[derive(Args, Clone, Default)]
pub struct UserArgs {
    /// Acting user id
    #[arg(long)]
    pub user_id: Option<String>,

    /// Acting user display name
    #[arg(long)]
    pub user_name: Option<String>,

    /// Acting user avatar URL
    #[arg(long)]
    pub avatar_url: Option<String>,
}

pub fn run_command(cli: Cli) -> Result<()> {
    let data_dir = resolve_data_dir(cli.data_dir, &SystemEnvProvider)?;

    match cli.command {
        Commands::Import(args) => handle_import(data_dir, args),
        Commands::List(args) => handle_list(data_dir, args),
        Commands::Show(args) => handle_show(data_dir, args),
        Commands::Add(args) => handle_add(data_dir, args),
        Commands::Edit(args) => handle_edit(data_dir, args),
        Commands::Remove(args) => handle_remove(data_dir, args),
        Commands::Stats(args) => handle_stats(data_dir, args),
    }
}

pub(crate) fn resolve_data_dir(
    flag: Option<PathBuf>,
    env_provider: &impl EnvProvider,
) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = env_provider.get_var(DATA_DIR_VAR) {
        return Ok(PathBuf::from(dir));
    }
    Ok(std::env::current_dir()?)
}

/// Resolve the acting user from flags, then environment, then the store's config.yaml
pub(crate) fn get_acting_identity(
    user: UserArgs,
    store: &CourseStore,
    env_provider: impl EnvProvider,
) -> Result<Identity> {
    let config = store.config()?.user;

    let id = user
        .user_id
        .or_else(|| env_provider.get_var(USER_ID_VAR))
        .or(config.id)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No acting user. Pass --user-id, set {}, or add user.id to config.yaml",
                USER_ID_VAR
            )
        })?;

    let name = user
        .user_name
        .or_else(|| env_provider.get_var(USER_NAME_VAR))
        .or(config.name)
        .or_else(|| env_provider.get_var("USER"))
        .unwrap_or_else(|| id.clone());

    let avatar_url = user
        .avatar_url
        .or_else(|| env_provider.get_var(AVATAR_URL_VAR))
        .or(config.avatar_url);

    let identity = Identity::new(id, name);
    Ok(match avatar_url {
        Some(url) => identity.with_avatar(url),
        None => identity,
    })
}

/// Print an applied mutation; a rolled-back one becomes the command's error
pub(crate) fn report_outcome(outcome: MutationOutcome, verb: &str) -> Result<()> {
    match outcome {
        MutationOutcome::Applied(entry) => {
            println!(
                "{}",
                success_message(&format!("{} review #{}", verb, entry.id))
            );
            Ok(())
        }
        MutationOutcome::RolledBack { entry, error } => {
            anyhow::bail!("Review #{} was not saved and has been reverted: {}", entry.id, error)
        }
    }
}

/// Parse a star filter argument ("all" or 1-5)
pub(crate) fn parse_filter(filter: Option<&str>) -> Result<RatingFilter> {
    match filter {
        None => Ok(RatingFilter::All),
        Some(value) => value.parse::<RatingFilter>().map_err(|e: String| anyhow::anyhow!(e)),
    }
}

/// Strip editor comment lines (`#` prefix) and surrounding whitespace
pub(crate) fn strip_comment_lines(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
