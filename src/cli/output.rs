use console::{Color, style};

use crate::common::{Rating, RatingFilter, ReviewEntry};
use crate::distribution::RatingDistribution;

const BAR_WIDTH: usize = 30;

fn truncate_to_first_paragraph(text: &str) -> (String, Option<usize>) {
    if text.is_empty() {
        return (String::new(), None);
    }

    let paragraphs: Vec<&str> = text.split("\n\n").collect();

    if paragraphs.len() <= 1 {
        return (text.to_string(), None);
    }

    let first_paragraph = paragraphs[0].trim();
    let remaining_text = paragraphs[1..].join("\n\n");
    let remaining_words = remaining_text.split_whitespace().count();

    if remaining_words > 0 {
        (first_paragraph.to_string(), Some(remaining_words))
    } else {
        (first_paragraph.to_string(), None)
    }
}

/// Five-character star strip, e.g. `★★★☆☆`. Out-of-range seeds render as `?????`.
pub fn format_stars(rating: u8) -> console::StyledObject<String> {
    match Rating::from_u8(rating) {
        Some(r) => {
            let filled = r.as_u8() as usize;
            let stars = format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled));
            let color = match r {
                Rating::Five | Rating::Four => Color::Green,
                Rating::Three => Color::Yellow,
                Rating::Two | Rating::One => Color::Red,
            };
            style(stars).fg(color)
        }
        None => style("?????".to_string()).dim(),
    }
}

pub fn format_review_compact(entry: &ReviewEntry) -> String {
    let first_line = entry.body.lines().next().unwrap_or_default();
    format!(
        "{} {} {} {}",
        style(format!("#{}", entry.id)).bold(),
        format_stars(entry.rating),
        style(&entry.author_name).green(),
        first_line
    )
}

pub fn format_review_detailed(entry: &ReviewEntry, course_id: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Review {} {}\n",
        style(format!("#{}", entry.id)).bold().cyan(),
        format_stars(entry.rating)
    ));
    output.push_str(&format!(
        "By: {} ({}), {}\n",
        style(&entry.author_name).green(),
        entry.author_id,
        entry.created_at_display
    ));

    let (truncated_body, remaining_words) = truncate_to_first_paragraph(&entry.body);
    output.push_str(&format!("{}\n", truncated_body));
    if let Some(word_count) = remaining_words {
        output.push_str(&format!(
            "{}\n",
            style(format!(
                "[{} more words; run `edumart-reviews show {} {}`]",
                word_count, course_id, entry.id
            ))
            .dim()
        ));
    }

    output.push('\n');
    output
}

pub fn format_review_full(entry: &ReviewEntry) -> String {
    let mut output = format!(
        "Review {} {}\nBy: {} ({}), {}\n",
        style(format!("#{}", entry.id)).bold().cyan(),
        format_stars(entry.rating),
        style(&entry.author_name).green(),
        entry.author_id,
        entry.created_at_display
    );
    if let Some(ref avatar) = entry.author_avatar_url {
        output.push_str(&format!("Avatar: {}\n", style(avatar).dim()));
    }
    output.push_str(&format!("\n{}\n", entry.body));
    output
}

/// Histogram, five stars on top, with a bar per level
pub fn format_distribution(dist: &RatingDistribution, filter: RatingFilter) -> String {
    let mut output = String::new();

    let heading = match dist.average() {
        Some(avg) => format!("{:.1} out of 5", avg),
        None => "No ratings yet".to_string(),
    };
    output.push_str(&format!(
        "{} ({} review{}, filter: {})\n",
        style(heading).bold(),
        dist.total(),
        if dist.total() == 1 { "" } else { "s" },
        filter
    ));

    for (rating, count, pct) in dist.rows() {
        let filled = ((pct / 100.0) * BAR_WIDTH as f64).round() as usize;
        output.push_str(&format!(
            "{} {}{} {:>5.1}% ({})\n",
            format_stars(rating.as_u8()),
            style("█".repeat(filled)).yellow(),
            style("░".repeat(BAR_WIDTH - filled)).dim(),
            pct,
            count
        ));
    }

    output
}

pub fn success_message(message: &str) -> String {
    format!("{} {}", style("✓").green().bold(), message)
}

pub fn error_message(message: &str) -> String {
    format!("{} {}", style("✗").red().bold(), message)
}

pub fn warning_message(message: &str) -> String {
    format!("{} {}", style("⚠").yellow().bold(), message)
}

pub fn info_message(message: &str) -> String {
    format!("{} {}", style("ℹ").blue().bold(), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_helpers::create_test_review;

    #[test]
    fn test_format_stars() {
        assert_eq!(format_stars(3).to_string(), "★★★☆☆");
        assert_eq!(format_stars(5).to_string(), "★★★★★");
        assert_eq!(format_stars(0).to_string(), "?????");
    }

    #[test]
    fn test_format_review_compact() {
        let mut entry = create_test_review(42, 4);
        entry.body = "First line\nSecond line".to_string();
        let formatted = format_review_compact(&entry);

        assert!(formatted.contains("#42"));
        assert!(formatted.contains("★★★★☆"));
        assert!(formatted.contains("Test User"));
        assert!(formatted.contains("First line"));
        assert!(!formatted.contains("Second line"));
    }

    #[test]
    fn test_truncate_to_first_paragraph() {
        assert_eq!(
            truncate_to_first_paragraph("Just one paragraph."),
            ("Just one paragraph.".to_string(), None)
        );
        assert_eq!(truncate_to_first_paragraph(""), (String::new(), None));

        let (first, remaining) =
            truncate_to_first_paragraph("Intro here.\n\nMore detail follows.\n\nAnd more.");
        assert_eq!(first, "Intro here.");
        assert_eq!(remaining, Some(5));
    }

    #[test]
    fn test_format_review_detailed_multi_paragraph() {
        let mut entry = create_test_review(7, 5);
        entry.body = "Loved it.\n\nThe exercises were excellent.".to_string();
        let formatted = format_review_detailed(&entry, "rust-101");

        assert!(formatted.contains("Loved it."));
        assert!(!formatted.contains("exercises"));
        assert!(formatted.contains("edumart-reviews show rust-101 7"));
        assert!(formatted.contains("1/1/2024"));
    }

    #[test]
    fn test_format_review_full_shows_whole_body() {
        let mut entry = create_test_review(7, 5);
        entry.body = "Loved it.\n\nThe exercises were excellent.".to_string();
        entry.author_avatar_url = Some("https://cdn.example/a.png".to_string());
        let formatted = format_review_full(&entry);

        assert!(formatted.contains("The exercises were excellent."));
        assert!(formatted.contains("https://cdn.example/a.png"));
    }

    #[test]
    fn test_format_distribution() {
        let entries = vec![create_test_review(1, 5), create_test_review(2, 3)];
        let dist = RatingDistribution::from_entries(&entries);
        let formatted = format_distribution(&dist, RatingFilter::All);

        assert!(formatted.contains("4.0 out of 5"));
        assert!(formatted.contains("2 reviews"));
        assert!(formatted.contains("filter: all"));
        assert!(formatted.contains("50.0% (1)"));
        assert_eq!(formatted.lines().count(), 6);
    }

    #[test]
    fn test_format_distribution_empty() {
        let dist = RatingDistribution::from_entries(&Vec::<ReviewEntry>::new());
        let formatted = format_distribution(&dist, RatingFilter::Only(Rating::Two));

        assert!(formatted.contains("No ratings yet"));
        assert!(formatted.contains("filter: 2"));
        assert!(formatted.contains("0.0% (0)"));
    }

    #[test]
    fn test_status_messages() {
        assert!(success_message("done").ends_with("done"));
        assert!(error_message("failed").ends_with("failed"));
        assert!(warning_message("careful").ends_with("careful"));
        assert!(info_message("note").ends_with("note"));
    }
}
