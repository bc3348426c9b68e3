use anyhow::Result;
use clap::Args;

use crate::aggregator::CommentAggregator;
use crate::cli::output::format_distribution;
use crate::common::{CourseRecord, Identity, RatingFilter};
use crate::storage::CourseStore;

use super::parse_filter;

#[derive(Args)]
pub struct StatsArgs {
    /// Course ID
    pub course: String,

    /// Star filter applied before counting (all, 1-5)
    #[arg(short, long)]
    pub rating: Option<String>,

    /// Count every review, ignoring --rating
    #[arg(long)]
    pub all_reviews: bool,
}

pub fn handle_stats(data_dir: std::path::PathBuf, args: StatsArgs) -> Result<()> {
    let store = CourseStore::open(&data_dir)?;
    let course = store.get_course(&args.course)?;
    let filter = parse_filter(args.rating.as_deref())?;

    print!("{}", render_stats(course, filter, args.all_reviews));
    Ok(())
}

fn render_stats(course: CourseRecord, filter: RatingFilter, all_reviews: bool) -> String {
    let mut reviews = CommentAggregator::new(Identity::anonymous());
    reviews.initialize(course.comment_list);
    reviews.set_filter(filter);

    // The default histogram follows the filter, like the course page does
    let (dist, shown_filter) = if all_reviews {
        (reviews.full_distribution(), RatingFilter::All)
    } else {
        (reviews.distribution(), filter)
    };

    format!("{}\n{}", course.title, format_distribution(&dist, shown_filter))
}
