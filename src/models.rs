//! Data models for the employee directory.
//!
//! This module contains all the core data structures used throughout
//! the application for representing employees, derived analytics, and
//! reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Department label substituted when a record carries none.
pub const DEFAULT_DEPARTMENT: &str = "General";

/// Labels for the five rating histogram buckets, in bucket order.
pub const HISTOGRAM_LABELS: [&str; 5] = ["0-1", "1-2", "2-3", "3-4", "4-5"];

/// A single employee record as held by the directory.
///
/// Records come from the demo API (normalized by the source module) or
/// from an intake draft. Numeric fields the source may omit are optional;
/// every computation states which optional fields it requires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Unique identifier.
    pub id: u64,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Login-style handle; the source derives one when absent.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Self-reported gender, free-form.
    #[serde(default)]
    pub gender: String,
    /// Age in years, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Department label; `None` normalizes to [`DEFAULT_DEPARTMENT`]
    /// wherever a label is needed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Job title.
    #[serde(default)]
    pub title: String,
    /// Postal address subset used by the directory listing.
    #[serde(default)]
    pub address: Address,
    /// Avatar URL.
    #[serde(default)]
    pub image: String,
    /// Performance rating in [0, 5], if assigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl EmployeeRecord {
    /// Full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Department label with the default substituted for absent values.
    pub fn department_label(&self) -> &str {
        self.department.as_deref().unwrap_or(DEFAULT_DEPARTMENT)
    }
}

/// Postal address subset carried on each record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    /// City name.
    #[serde(default)]
    pub city: String,
    /// State or region.
    #[serde(default)]
    pub state: String,
    /// Country name.
    #[serde(default)]
    pub country: String,
}

/// Per-department rating statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentStat {
    /// Department label (absent labels already normalized).
    pub department: String,
    /// Mean of the defined ratings; 0 when no record in the department
    /// carries a rating.
    pub average_rating: f64,
    /// Number of records with a defined rating.
    pub count: usize,
    /// Unbiased sample variance of the ratings; 0 when `count <= 1`.
    pub variance: f64,
}

/// One populated age group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeBucket {
    /// Bucket label (`<20`, `20-29`, ...).
    pub label: String,
    /// Number of records in the bucket.
    pub count: usize,
    /// Mean rating of bucket members, counting missing ratings as 0.
    pub average_rating: f64,
}

/// Fixed five-bucket count of ratings.
///
/// Bucket index is `min(floor(rating), 4)`, so a rating of exactly 5
/// lands in the last bucket. Ratings are assumed non-negative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingHistogram {
    /// Counts per bucket, in [`HISTOGRAM_LABELS`] order.
    pub counts: [u64; 5],
}

impl RatingHistogram {
    /// Total number of counted ratings.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Iterate `(label, count)` pairs in bucket order.
    pub fn labeled(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        HISTOGRAM_LABELS
            .iter()
            .copied()
            .zip(self.counts.iter().copied())
    }
}

/// All derived analytics views, computed fresh from one input snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    /// Per-department statistics, in first-occurrence order.
    pub department_stats: Vec<DepartmentStat>,
    /// Populated age groups, in bucket order.
    pub age_buckets: Vec<AgeBucket>,
    /// Pearson correlation between age and rating; 0 when undefined.
    pub age_rating_correlation: f64,
    /// Rating distribution.
    pub rating_histogram: RatingHistogram,
    /// Departments ranked by average rating, truncated.
    pub top_departments: Vec<DepartmentStat>,
}

/// Metadata about a generated report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Where the records came from (URL or local file path).
    pub source: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Total records in the directory.
    pub total_records: usize,
    /// Records remaining after search filters.
    pub filtered_records: usize,
    /// Wall-clock duration of the run in seconds.
    pub duration_seconds: f64,
}

/// The complete directory report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryReport {
    /// Metadata about the run.
    pub metadata: ReportMetadata,
    /// The requested listing page of filtered records.
    pub listing: Vec<EmployeeRecord>,
    /// Derived analytics over the full directory.
    pub analytics: AnalyticsSnapshot,
    /// Bookmarked records, in bookmark order.
    pub bookmarks: Vec<EmployeeRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64) -> EmployeeRecord {
        EmployeeRecord {
            id,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            username: "adalovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+1 555-0100".to_string(),
            gender: "female".to_string(),
            age: Some(36),
            department: Some("Engineering".to_string()),
            title: "Analyst".to_string(),
            address: Address {
                city: "London".to_string(),
                state: String::new(),
                country: "United Kingdom".to_string(),
            },
            image: String::new(),
            rating: Some(4.0),
        }
    }

    #[test]
    fn test_full_name() {
        assert_eq!(record(1).full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_department_label_default() {
        let mut rec = record(1);
        assert_eq!(rec.department_label(), "Engineering");

        rec.department = None;
        assert_eq!(rec.department_label(), DEFAULT_DEPARTMENT);
    }

    #[test]
    fn test_histogram_labeled() {
        let hist = RatingHistogram {
            counts: [1, 0, 2, 0, 3],
        };
        let pairs: Vec<_> = hist.labeled().collect();
        assert_eq!(pairs[0], ("0-1", 1));
        assert_eq!(pairs[4], ("4-5", 3));
        assert_eq!(hist.total(), 6);
    }

    #[test]
    fn test_record_serde_roundtrip() {
        let rec = record(7);
        let json = serde_json::to_string(&rec).unwrap();
        let back: EmployeeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rec);
    }

    #[test]
    fn test_optional_fields_omitted() {
        let mut rec = record(7);
        rec.age = None;
        rec.rating = None;
        let json = serde_json::to_string(&rec).unwrap();
        assert!(!json.contains("\"age\""));
        assert!(!json.contains("\"rating\""));
    }
}
