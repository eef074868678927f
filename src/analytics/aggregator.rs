//! Employee statistics aggregation.
//!
//! Five independent reduction passes over one immutable record snapshot:
//! department statistics, age bucketing, age-rating correlation, rating
//! histogram, and top-N departments. Every pass is total over all inputs,
//! including the empty list, and never mutates its input.

use crate::models::{
    AgeBucket, AnalyticsSnapshot, DepartmentStat, EmployeeRecord, RatingHistogram,
};
use std::collections::HashMap;

/// Default number of departments in the ranked view.
pub const DEFAULT_TOP_N: usize = 3;

/// Age group labels, in bucket order.
pub const AGE_BUCKET_LABELS: [&str; 5] = ["<20", "20-29", "30-39", "40-49", "50+"];

/// Compute all derived views from one snapshot.
pub fn snapshot(records: &[EmployeeRecord], top_n: usize) -> AnalyticsSnapshot {
    let department_stats = department_stats(records);
    let top_departments = top_departments(&department_stats, top_n);

    AnalyticsSnapshot {
        age_buckets: age_buckets(records),
        age_rating_correlation: age_rating_correlation(records),
        rating_histogram: rating_histogram(records),
        department_stats,
        top_departments,
    }
}

/// Per-department rating statistics.
///
/// Groups records by department (absent labels normalize to "General")
/// and computes, over the defined ratings of each group: count, mean
/// (0 when empty), and unbiased sample variance (0 when `count <= 1`).
/// Departments with no rated members still appear with zero stats.
pub fn department_stats(records: &[EmployeeRecord]) -> Vec<DepartmentStat> {
    // First-occurrence order, so ranking ties stay reproducible.
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<f64>)> = Vec::new();

    for rec in records {
        let dept = rec.department_label();
        let slot = *slots.entry(dept).or_insert_with(|| {
            groups.push((dept.to_string(), Vec::new()));
            groups.len() - 1
        });
        if let Some(rating) = rec.rating {
            groups[slot].1.push(rating);
        }
    }

    groups
        .into_iter()
        .map(|(department, ratings)| {
            let count = ratings.len();
            let average_rating = if count > 0 {
                ratings.iter().sum::<f64>() / count as f64
            } else {
                0.0
            };
            let variance = if count > 1 {
                ratings
                    .iter()
                    .map(|r| (r - average_rating).powi(2))
                    .sum::<f64>()
                    / (count - 1) as f64
            } else {
                0.0
            };
            DepartmentStat {
                department,
                average_rating,
                count,
                variance,
            }
        })
        .collect()
}

/// Fixed-boundary age groups with count and average rating.
///
/// Records with no age are skipped; so is age 0, matching the source
/// feed's falsy "no age" handling. Missing ratings contribute 0 to the
/// bucket's rating sum. Empty buckets are omitted from the output.
pub fn age_buckets(records: &[EmployeeRecord]) -> Vec<AgeBucket> {
    let mut counts = [0usize; 5];
    let mut rating_sums = [0.0f64; 5];

    for rec in records {
        let age = match rec.age {
            Some(age) if age > 0 => age,
            _ => continue,
        };
        let idx = age_bucket_index(age);
        counts[idx] += 1;
        rating_sums[idx] += rec.rating.unwrap_or(0.0);
    }

    AGE_BUCKET_LABELS
        .iter()
        .enumerate()
        .filter(|(i, _)| counts[*i] > 0)
        .map(|(i, label)| AgeBucket {
            label: label.to_string(),
            count: counts[i],
            average_rating: rating_sums[i] / counts[i] as f64,
        })
        .collect()
}

/// Assign an age to its bucket; first matching lower bound wins.
fn age_bucket_index(age: u32) -> usize {
    if age < 20 {
        0
    } else if age < 30 {
        1
    } else if age < 40 {
        2
    } else if age < 50 {
        3
    } else {
        4
    }
}

/// Pearson correlation between age and rating.
///
/// Only records with both fields present participate; age 0 is valid
/// here, unlike bucketing. Returns exactly 0 for an empty sample or a
/// zero denominator (no variance in either variable). The result is
/// mathematically bounded to [-1, 1]; no clamping is applied.
pub fn age_rating_correlation(records: &[EmployeeRecord]) -> f64 {
    let pairs: Vec<(f64, f64)> = records
        .iter()
        .filter_map(|rec| match (rec.age, rec.rating) {
            (Some(age), Some(rating)) => Some((f64::from(age), rating)),
            _ => None,
        })
        .collect();

    if pairs.is_empty() {
        return 0.0;
    }
    let n = pairs.len() as f64;

    let sum_x: f64 = pairs.iter().map(|(x, _)| x).sum();
    let sum_y: f64 = pairs.iter().map(|(_, y)| y).sum();
    let sum_xy: f64 = pairs.iter().map(|(x, y)| x * y).sum();
    let sum_x2: f64 = pairs.iter().map(|(x, _)| x * x).sum();
    let sum_y2: f64 = pairs.iter().map(|(_, y)| y * y).sum();

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = ((n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y)).sqrt();

    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Count ratings into the five fixed buckets.
///
/// Bucket index is `min(floor(rating), 4)`; undefined ratings are
/// skipped. Ratings are assumed non-negative by contract.
pub fn rating_histogram(records: &[EmployeeRecord]) -> RatingHistogram {
    let mut counts = [0u64; 5];

    for rec in records {
        if let Some(rating) = rec.rating {
            let idx = (rating.floor() as usize).min(4);
            counts[idx] += 1;
        }
    }

    RatingHistogram { counts }
}

/// Rank departments descending by average rating, truncated to `n`.
///
/// The sort is stable, so departments with equal averages keep their
/// input order.
pub fn top_departments(stats: &[DepartmentStat], n: usize) -> Vec<DepartmentStat> {
    let mut ranked = stats.to_vec();
    ranked.sort_by(|a, b| {
        b.average_rating
            .partial_cmp(&a.average_rating)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Address;

    fn record(
        id: u64,
        department: Option<&str>,
        age: Option<u32>,
        rating: Option<f64>,
    ) -> EmployeeRecord {
        EmployeeRecord {
            id,
            first_name: format!("First{}", id),
            last_name: format!("Last{}", id),
            username: format!("user{}", id),
            email: format!("user{}@example.com", id),
            phone: String::new(),
            gender: String::new(),
            age,
            department: department.map(String::from),
            title: String::new(),
            address: Address::default(),
            image: String::new(),
            rating,
        }
    }

    #[test]
    fn test_department_counts_cover_all_rated_records() {
        let records = vec![
            record(1, Some("Engineering"), Some(30), Some(4.0)),
            record(2, Some("Engineering"), Some(40), None),
            record(3, Some("Support"), Some(25), Some(2.0)),
            record(4, None, Some(50), Some(3.0)),
            record(5, Some("Legal"), None, None),
        ];

        let stats = department_stats(&records);
        let rated = records.iter().filter(|r| r.rating.is_some()).count();
        let total: usize = stats.iter().map(|s| s.count).sum();
        assert_eq!(total, rated);

        // Missing department lands in the default group.
        assert!(stats.iter().any(|s| s.department == "General" && s.count == 1));
    }

    #[test]
    fn test_single_rated_record_has_zero_variance() {
        let records = vec![record(1, Some("Engineering"), Some(30), Some(4.5))];
        let stats = department_stats(&records);

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].count, 1);
        assert_eq!(stats[0].average_rating, 4.5);
        assert_eq!(stats[0].variance, 0.0);
    }

    #[test]
    fn test_unrated_department_still_appears() {
        let records = vec![
            record(1, Some("Legal"), Some(30), None),
            record(2, Some("Legal"), Some(40), None),
        ];
        let stats = department_stats(&records);

        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].department, "Legal");
        assert_eq!(stats[0].count, 0);
        assert_eq!(stats[0].average_rating, 0.0);
        assert_eq!(stats[0].variance, 0.0);
    }

    #[test]
    fn test_sample_variance_uses_bessel_correction() {
        let records = vec![
            record(1, Some("Engineering"), Some(30), Some(2.0)),
            record(2, Some("Engineering"), Some(31), Some(4.0)),
        ];
        let stats = department_stats(&records);

        // mean 3.0, squared deviations 1 + 1, divided by n - 1 = 1
        assert_eq!(stats[0].average_rating, 3.0);
        assert_eq!(stats[0].variance, 2.0);
    }

    #[test]
    fn test_age_bucket_boundaries() {
        let records = vec![
            record(1, None, Some(19), Some(1.0)),
            record(2, None, Some(20), Some(2.0)),
            record(3, None, Some(39), Some(3.0)),
            record(4, None, Some(50), Some(4.0)),
        ];
        let buckets = age_buckets(&records);
        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();

        assert_eq!(labels, vec!["<20", "20-29", "30-39", "50+"]);
    }

    #[test]
    fn test_age_zero_is_excluded() {
        let records = vec![
            record(1, None, Some(0), Some(5.0)),
            record(2, None, None, Some(5.0)),
        ];
        assert!(age_buckets(&records).is_empty());
    }

    #[test]
    fn test_age_bucket_missing_rating_counts_as_zero() {
        let records = vec![
            record(1, None, Some(25), Some(4.0)),
            record(2, None, Some(26), None),
        ];
        let buckets = age_buckets(&records);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[0].average_rating, 2.0);
    }

    #[test]
    fn test_empty_buckets_are_omitted() {
        let records = vec![record(1, None, Some(35), Some(3.0))];
        let buckets = age_buckets(&records);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].label, "30-39");
    }

    #[test]
    fn test_correlation_of_linear_relationship_is_one() {
        let records: Vec<EmployeeRecord> = (1..=10)
            .map(|i| record(i, None, Some(20 + i as u32), Some(0.1 * i as f64)))
            .collect();

        let r = age_rating_correlation(&records);
        assert!((r - 1.0).abs() < 1e-9, "r = {}", r);
    }

    #[test]
    fn test_correlation_degenerate_cases_are_exactly_zero() {
        assert_eq!(age_rating_correlation(&[]), 0.0);

        // No record has both fields.
        let partial = vec![
            record(1, None, Some(30), None),
            record(2, None, None, Some(3.0)),
        ];
        assert_eq!(age_rating_correlation(&partial), 0.0);

        // Constant age: zero denominator.
        let constant = vec![
            record(1, None, Some(30), Some(1.0)),
            record(2, None, Some(30), Some(4.0)),
        ];
        assert_eq!(age_rating_correlation(&constant), 0.0);
    }

    #[test]
    fn test_correlation_accepts_age_zero() {
        // Unlike bucketing, age 0 participates here.
        let records = vec![
            record(1, None, Some(0), Some(1.0)),
            record(2, None, Some(10), Some(2.0)),
            record(3, None, Some(20), Some(3.0)),
        ];
        let r = age_rating_correlation(&records);
        assert!((r - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_histogram_clamps_top_rating() {
        let records = vec![
            record(1, None, None, Some(5.0)),
            record(2, None, None, Some(0.0)),
            record(3, None, None, Some(3.7)),
            record(4, None, None, None),
        ];
        let hist = rating_histogram(&records);

        assert_eq!(hist.counts, [1, 0, 0, 1, 1]);
        assert_eq!(hist.total(), 3);
    }

    #[test]
    fn test_top_departments_ties_keep_input_order() {
        let stats = vec![
            DepartmentStat {
                department: "A".to_string(),
                average_rating: 3.0,
                count: 1,
                variance: 0.0,
            },
            DepartmentStat {
                department: "B".to_string(),
                average_rating: 4.5,
                count: 1,
                variance: 0.0,
            },
            DepartmentStat {
                department: "C".to_string(),
                average_rating: 2.0,
                count: 1,
                variance: 0.0,
            },
            DepartmentStat {
                department: "D".to_string(),
                average_rating: 4.5,
                count: 1,
                variance: 0.0,
            },
        ];

        let top = top_departments(&stats, 3);
        let names: Vec<&str> = top.iter().map(|s| s.department.as_str()).collect();
        assert_eq!(names, vec!["B", "D", "A"]);
    }

    #[test]
    fn test_top_departments_shorter_than_n() {
        let stats = department_stats(&[record(1, Some("Engineering"), None, Some(4.0))]);
        let top = top_departments(&stats, 3);
        assert_eq!(top.len(), 1);
    }

    #[test]
    fn test_snapshot_of_empty_input() {
        let snap = snapshot(&[], DEFAULT_TOP_N);

        assert!(snap.department_stats.is_empty());
        assert!(snap.age_buckets.is_empty());
        assert_eq!(snap.age_rating_correlation, 0.0);
        assert_eq!(snap.rating_histogram.counts, [0, 0, 0, 0, 0]);
        assert!(snap.top_departments.is_empty());
    }

    #[test]
    fn test_snapshot_is_idempotent() {
        let records = vec![
            record(1, Some("Engineering"), Some(28), Some(4.0)),
            record(2, Some("Support"), Some(45), Some(2.5)),
            record(3, None, None, None),
        ];

        let first = snapshot(&records, DEFAULT_TOP_N);
        let second = snapshot(&records, DEFAULT_TOP_N);
        assert_eq!(first, second);
    }
}
