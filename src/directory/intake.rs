//! Employee intake drafts.
//!
//! The dashboard's multi-step add-employee form, expressed as staged
//! validation over a draft loaded from a TOML file: identity, then
//! contact, then job details. A draft that passes all three steps
//! becomes a directory record.

use crate::models::{Address, EmployeeRecord, DEFAULT_DEPARTMENT};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A prospective employee record, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeDraft {
    /// First name (required).
    #[serde(default)]
    pub first_name: String,
    /// Last name (required).
    #[serde(default)]
    pub last_name: String,
    /// Handle; derived from the name pair when absent.
    #[serde(default)]
    pub username: Option<String>,
    /// Contact email (required).
    #[serde(default)]
    pub email: String,
    /// Contact phone.
    #[serde(default)]
    pub phone: String,
    /// Self-reported gender.
    #[serde(default)]
    pub gender: String,
    /// Age in years.
    #[serde(default)]
    pub age: Option<u32>,
    /// Department label; defaults to "General".
    #[serde(default)]
    pub department: Option<String>,
    /// Job title.
    #[serde(default)]
    pub title: String,
    /// City.
    #[serde(default)]
    pub city: String,
    /// State or region.
    #[serde(default)]
    pub state: String,
    /// Country.
    #[serde(default)]
    pub country: String,
    /// Initial rating in [0, 5].
    #[serde(default)]
    pub rating: Option<f64>,
}

impl EmployeeDraft {
    /// Load a draft from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read employee draft: {}", path.display()))?;

        let draft: EmployeeDraft = toml::from_str(&content)
            .with_context(|| format!("Failed to parse employee draft: {}", path.display()))?;

        Ok(draft)
    }

    /// Run all form steps in order; the first failing step reports.
    pub fn validate(&self) -> Result<(), String> {
        self.validate_identity()?;
        self.validate_contact()?;
        self.validate_job()
    }

    /// Step 1: identity.
    fn validate_identity(&self) -> Result<(), String> {
        if self.first_name.trim().is_empty() {
            return Err("First name is required".to_string());
        }
        if self.last_name.trim().is_empty() {
            return Err("Last name is required".to_string());
        }
        if let Some(age) = self.age {
            if age > 120 {
                return Err(format!("Age {} is not plausible", age));
            }
        }
        Ok(())
    }

    /// Step 2: contact details.
    fn validate_contact(&self) -> Result<(), String> {
        if self.email.trim().is_empty() {
            return Err("Email is required".to_string());
        }
        if !self.email.contains('@') {
            return Err(format!("Email '{}' is not valid", self.email));
        }
        Ok(())
    }

    /// Step 3: job details.
    fn validate_job(&self) -> Result<(), String> {
        if let Some(rating) = self.rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(format!("Rating {} is outside [0, 5]", rating));
            }
        }
        Ok(())
    }

    /// Turn a validated draft into a directory record with the given id.
    pub fn into_record(self, id: u64) -> EmployeeRecord {
        let username = self
            .username
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| {
                format!(
                    "{}{}",
                    self.first_name.to_lowercase(),
                    self.last_name.to_lowercase()
                )
            });

        let department = self
            .department
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_DEPARTMENT.to_string());

        EmployeeRecord {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            username,
            email: self.email,
            phone: self.phone,
            gender: self.gender,
            age: self.age,
            department: Some(department),
            title: self.title,
            address: Address {
                city: self.city,
                state: self.state,
                country: self.country,
            },
            image: String::new(),
            rating: self.rating,
        }
    }
}
