use crate::domain::{content_summary, is_placeholder, classify, Timeline, TimelineConfig};
use crate::persistence::{data_file, load_markers, report_file};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::PathBuf;

/// Format a minute total as "Xh Ym" or "Xm" for display
fn format_duration(minutes: f64) -> String {
    let total_mins = minutes.round() as i64;
    if total_mins < 60 {
        format!("{}m", total_mins)
    } else {
        let hours = total_mins / 60;
        let mins = total_mins % 60;
        if mins == 0 {
            format!("{}h", hours)
        } else {
            format!("{}h {}m", hours, mins)
        }
    }
}

/// Format percentage with 1 decimal place
fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Generate the daily report for a date from its saved markers
pub fn generate_report(
    date: Option<NaiveDate>,
    output_path: Option<PathBuf>,
    config: TimelineConfig,
) -> Result<PathBuf> {
    let report_date = date.unwrap_or_else(|| Local::now().date_naive());

    let records = load_markers(data_file(report_date)?)?;
    let mut timeline = Timeline::new(config);
    timeline.restore(records.iter().map(|r| (r.position, r.content.as_str())));

    let report = render_report(report_date, &timeline);

    let output = if let Some(path) = output_path {
        path
    } else {
        report_file(report_date)?
    };
    fs::write(&output, report)?;

    Ok(output)
}

/// Render the report markdown from an already-loaded timeline
pub fn render_report(date: NaiveDate, timeline: &Timeline) -> String {
    let config = *timeline.config();
    let mut report = String::new();

    report.push_str(&format!("# Day Report - {}\n\n", date));

    // Summary Section
    let sorted = timeline.sorted_markers();
    let tracked_minutes: f64 = timeline.segments().iter().map(|s| s.minutes).sum();

    report.push_str("## Summary\n\n");
    report.push_str(&format!("- **Markers:** {}\n", timeline.marker_count()));
    if let (Some(first), Some(last)) = (sorted.first(), sorted.last()) {
        report.push_str(&format!(
            "- **Tracked Span:** {} – {}\n",
            config.position_to_time(first.position),
            config.position_to_time(last.position)
        ));
    }
    report.push_str(&format!(
        "- **Tracked Time:** {}\n\n",
        format_duration(tracked_minutes)
    ));

    // Blocks Section
    if !timeline.segments().is_empty() {
        report.push_str("## Blocks\n\n");
        for segment in timeline.segments() {
            let label = if is_placeholder(&segment.content) {
                "(unlabeled)".to_string()
            } else {
                content_summary(&segment.content)
            };
            let category = classify(&segment.content)
                .map(|c| format!(" [{}]", c.name()))
                .unwrap_or_default();

            report.push_str(&format!(
                "- {} – {} ({}) {}{}\n",
                config.position_to_time(segment.start_position),
                config.position_to_time(segment.end_position),
                format_duration(segment.minutes),
                label,
                category
            ));
        }
        report.push_str("\n");
    }

    // Category Totals Section
    let categories = timeline.category_totals();
    if !categories.is_empty() {
        report.push_str("## Category Totals\n\n");
        for (category, minutes) in categories {
            let percentage = if tracked_minutes > 0.0 {
                minutes / tracked_minutes * 100.0
            } else {
                0.0
            };
            report.push_str(&format!(
                "- **{}:** {} ({})\n",
                category.name(),
                format_duration(*minutes),
                format_percent(percentage)
            ));
        }
        report.push_str("\n");
    }

    // Tag Distribution Section
    let tags = timeline.tag_totals();
    if !tags.is_empty() {
        report.push_str("## Tag Distribution\n\n");

        let mut entries: Vec<_> = tags.iter().collect();
        entries.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(std::cmp::Ordering::Equal));

        let tagged_total: f64 = entries.iter().map(|(_, m)| **m).sum();
        for (tag, minutes) in entries {
            let percentage = if tagged_total > 0.0 {
                minutes / tagged_total * 100.0
            } else {
                0.0
            };
            report.push_str(&format!(
                "- **#{}:** {} ({})\n",
                tag,
                format_duration(*minutes),
                format_percent(percentage)
            ));
        }
        report.push_str("\n");
    }

    report
}
