//! Search filters and listing pagination.
//!
//! Filters apply in a fixed order: free-text query, then department
//! membership, then minimum rating. Pagination is plain slicing.

use crate::models::EmployeeRecord;

/// Default number of records per listing page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Search criteria for the directory listing.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    /// Free-text query, matched case-insensitively against first name,
    /// last name, email, and department.
    pub query: String,
    /// Department labels to keep; empty means all departments.
    pub departments: Vec<String>,
    /// Minimum rating; records without a rating count as 0. A zero
    /// minimum is a no-op, like the dashboard's falsy check.
    pub min_rating: Option<f64>,
}

impl SearchFilter {
    /// Whether no criterion is active.
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
            && self.departments.is_empty()
            && !self.min_rating.is_some_and(|m| m > 0.0)
    }

    /// Whether a record passes all active criteria.
    pub fn matches(&self, record: &EmployeeRecord) -> bool {
        if !self.query.trim().is_empty() {
            let q = self.query.to_lowercase();
            let hit = record.first_name.to_lowercase().contains(&q)
                || record.last_name.to_lowercase().contains(&q)
                || record.email.to_lowercase().contains(&q)
                || record.department_label().to_lowercase().contains(&q);
            if !hit {
                return false;
            }
        }

        if !self.departments.is_empty()
            && !self
                .departments
                .iter()
                .any(|d| d == record.department_label())
        {
            return false;
        }

        if let Some(min) = self.min_rating {
            if min > 0.0 && record.rating.unwrap_or(0.0) < min {
                return false;
            }
        }

        true
    }

    /// Keep the records that pass all active criteria.
    pub fn apply(&self, records: &[EmployeeRecord]) -> Vec<EmployeeRecord> {
        records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }
}

/// One listing page, by simple slicing. Pages are 1-based; a page past
/// the end is empty.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page_size == 0 {
        return &items[..0];
    }
    let start = page.max(1).saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &items[..0];
    }
    let end = (start + page_size).min(items.len());
    &items[start..end]
}

/// Number of listing pages for a collection.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        (len + page_size - 1) / page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Address;

    fn record(id: u64, first: &str, department: &str, rating: Option<f64>) -> EmployeeRecord {
        EmployeeRecord {
            id,
            first_name: first.to_string(),
            last_name: "Smith".to_string(),
            username: format!("user{}", id),
            email: format!("{}@example.com", first.to_lowercase()),
            phone: String::new(),
            gender: String::new(),
            age: Some(30),
            department: Some(department.to_string()),
            title: String::new(),
            address: Address::default(),
            image: String::new(),
            rating,
        }
    }

    fn sample() -> Vec<EmployeeRecord> {
        vec![
            record(1, "Alice", "Engineering", Some(4.0)),
            record(2, "Bob", "Support", Some(2.0)),
            record(3, "Carol", "Engineering", None),
        ]
    }

    #[test]
    fn test_query_matches_name_case_insensitive() {
        let filter = SearchFilter {
            query: "ALICE".to_string(),
            ..Default::default()
        };
        let kept = filter.apply(&sample());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 1);
    }

    #[test]
    fn test_query_matches_department() {
        let filter = SearchFilter {
            query: "engineer".to_string(),
            ..Default::default()
        };
        let kept = filter.apply(&sample());
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_department_filter() {
        let filter = SearchFilter {
            departments: vec!["Support".to_string()],
            ..Default::default()
        };
        let kept = filter.apply(&sample());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 2);
    }

    #[test]
    fn test_min_rating_treats_missing_as_zero() {
        let filter = SearchFilter {
            min_rating: Some(3.0),
            ..Default::default()
        };
        let kept = filter.apply(&sample());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 1);
    }

    #[test]
    fn test_zero_min_rating_is_noop() {
        let filter = SearchFilter {
            min_rating: Some(0.0),
            ..Default::default()
        };
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&sample()).len(), 3);
    }

    #[test]
    fn test_filters_combine() {
        let filter = SearchFilter {
            query: "nobody".to_string(),
            departments: vec!["Engineering".to_string()],
            min_rating: Some(3.0),
            ..Default::default()
        };
        let kept = filter.apply(&sample());
        assert!(kept.is_empty());

        let filter = SearchFilter {
            departments: vec!["Engineering".to_string()],
            min_rating: Some(3.0),
            ..Default::default()
        };
        let kept = filter.apply(&sample());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 1);
    }

    #[test]
    fn test_paginate_slices() {
        let items: Vec<u32> = (1..=45).collect();

        assert_eq!(paginate(&items, 1, 20).len(), 20);
        assert_eq!(paginate(&items, 3, 20), &items[40..45]);
        assert!(paginate(&items, 4, 20).is_empty());
        assert_eq!(paginate(&items, 0, 20), paginate(&items, 1, 20));
        assert!(paginate(&items, 1, 0).is_empty());
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(45, 20), 3);
        assert_eq!(total_pages(40, 20), 2);
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(10, 0), 0);
    }
}
