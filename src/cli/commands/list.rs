use anyhow::Result;
use clap::Args;

use crate::aggregator::CommentAggregator;
use crate::cli::output::{format_review_compact, format_review_detailed, info_message};
use crate::common::{CourseRecord, Identity, RatingFilter};
use crate::storage::CourseStore;

use super::parse_filter;

#[derive(Args)]
pub struct ListArgs {
    /// Course ID
    pub course: String,

    /// Only show reviews with this many stars (all, 1-5)
    #[arg(short, long)]
    pub rating: Option<String>,

    /// Show only review IDs, stars and first lines
    #[arg(short, long)]
    pub compact: bool,
}

pub fn handle_list(data_dir: std::path::PathBuf, args: ListArgs) -> Result<()> {
    let store = CourseStore::open(&data_dir)?;
    let course = store.get_course(&args.course)?;
    let filter = parse_filter(args.rating.as_deref())?;

    print!("{}", render_list(course, filter, args.compact));
    Ok(())
}

fn render_list(course: CourseRecord, filter: RatingFilter, compact: bool) -> String {
    let mut reviews = CommentAggregator::new(Identity::anonymous());
    reviews.initialize(course.comment_list);
    let visible = reviews.set_filter(filter);

    if visible.is_empty() {
        return format!(
            "{}\n",
            info_message(&format!("No reviews for {} (filter: {})", course.id, filter))
        );
    }

    let mut output = String::new();
    for entry in visible {
        if compact {
            output.push_str(&format_review_compact(entry));
            output.push('\n');
        } else {
            output.push_str(&format_review_detailed(entry, &course.id));
        }
    }
    output
}
