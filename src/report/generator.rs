//! Markdown report generation.
//!
//! This module renders the directory report — listing page, analytics
//! views, and bookmarks — as Markdown or JSON.

use crate::models::{AnalyticsSnapshot, DirectoryReport, EmployeeRecord, ReportMetadata};
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &DirectoryReport) -> String {
    let mut output = String::new();

    output.push_str("# StaffScope Report\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_listing_section(&report.listing));
    output.push_str(&generate_analytics_section(&report.analytics));
    output.push_str(&generate_bookmarks_section(&report.bookmarks));
    output.push_str(&generate_footer());

    output
}

/// Generate a JSON report.
pub fn generate_json_report(report: &DirectoryReport) -> Result<String> {
    let json = serde_json::to_string_pretty(report)?;
    Ok(json)
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Source:** {}\n", metadata.source));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!(
        "- **Total Records:** {}\n",
        metadata.total_records
    ));
    if metadata.filtered_records != metadata.total_records {
        section.push_str(&format!(
            "- **After Filters:** {}\n",
            metadata.filtered_records
        ));
    }
    section.push_str(&format!(
        "- **Duration:** {:.1}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

/// Generate the directory listing section.
fn generate_listing_section(listing: &[EmployeeRecord]) -> String {
    let mut section = String::new();

    section.push_str("## Directory\n\n");

    if listing.is_empty() {
        section.push_str("No employees matched the current filters.\n\n");
        return section;
    }

    section.push_str("| ID | Name | Department | Title | Age | Rating | City |\n");
    section.push_str("|:---:|:---|:---|:---|:---:|:---:|:---|\n");

    for rec in listing {
        section.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} | {} |\n",
            rec.id,
            rec.full_name(),
            rec.department_label(),
            rec.title,
            rec.age.map_or("-".to_string(), |a| a.to_string()),
            rec.rating.map_or("-".to_string(), |r| format!("{:.1}", r)),
            rec.address.city,
        ));
    }
    section.push('\n');

    section
}

/// Generate the analytics section.
fn generate_analytics_section(analytics: &AnalyticsSnapshot) -> String {
    let mut section = String::new();

    section.push_str("## Analytics\n\n");

    // Department statistics
    section.push_str("### Department Statistics\n\n");
    if analytics.department_stats.is_empty() {
        section.push_str("No departments in the directory.\n\n");
    } else {
        section.push_str("| Department | Avg Rating | Rated | Variance |\n");
        section.push_str("|:---|:---:|:---:|:---:|\n");
        for stat in &analytics.department_stats {
            section.push_str(&format!(
                "| {} | {:.2} | {} | {:.2} |\n",
                stat.department, stat.average_rating, stat.count, stat.variance
            ));
        }
        section.push('\n');
    }

    // Top departments
    if !analytics.top_departments.is_empty() {
        section.push_str("### Top Departments by Average Rating\n\n");
        for (rank, stat) in analytics.top_departments.iter().enumerate() {
            section.push_str(&format!(
                "{}. **{}** — {:.2}\n",
                rank + 1,
                stat.department,
                stat.average_rating
            ));
        }
        section.push('\n');
    }

    // Age distribution
    section.push_str("### Age Distribution\n\n");
    if analytics.age_buckets.is_empty() {
        section.push_str("No records carry an age.\n\n");
    } else {
        section.push_str("| Age Group | Count | Avg Rating |\n");
        section.push_str("|:---|:---:|:---:|\n");
        for bucket in &analytics.age_buckets {
            section.push_str(&format!(
                "| {} | {} | {:.2} |\n",
                bucket.label, bucket.count, bucket.average_rating
            ));
        }
        section.push('\n');
    }

    // Rating histogram
    section.push_str("### Rating Distribution\n\n");
    section.push_str("| Rating | Count |\n");
    section.push_str("|:---|:---:|\n");
    for (label, count) in analytics.rating_histogram.labeled() {
        section.push_str(&format!("| {} | {} |\n", label, count));
    }
    section.push_str(&format!(
        "\n*{} rated employees*\n\n",
        analytics.rating_histogram.total()
    ));

    // Correlation
    section.push_str(&format!(
        "**Age-Rating Correlation (Pearson):** {:.4}\n\n",
        analytics.age_rating_correlation
    ));

    section
}

/// Generate the bookmarks section.
fn generate_bookmarks_section(bookmarks: &[EmployeeRecord]) -> String {
    let mut section = String::new();

    section.push_str("## Bookmarks\n\n");

    if bookmarks.is_empty() {
        section.push_str("No bookmarked employees.\n\n");
        return section;
    }

    for rec in bookmarks {
        section.push_str(&format!(
            "- ⭐ **{}** ({}) — {}\n",
            rec.full_name(),
            rec.department_label(),
            rec.email
        ));
    }
    section.push('\n');

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    format!(
        "---\n\n*Generated by StaffScope v{}*\n",
        env!("CARGO_PKG_VERSION")
    )
}
