//! Demo API client and record normalization.
//!
//! Fetches raw users from the dummyjson demo endpoint, fills the fields
//! the feed leaves blank, and produces [`EmployeeRecord`]s for the
//! directory. A local JSON file with the same payload shape can stand in
//! for the network.

use crate::models::{Address, EmployeeRecord, DEFAULT_DEPARTMENT};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Default demo API base URL.
pub const DEFAULT_SOURCE_URL: &str = "https://dummyjson.com";

/// Default number of records requested from the source.
pub const DEFAULT_FETCH_LIMIT: usize = 40;

/// Errors produced while acquiring the employee feed.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The HTTP request itself failed (connect, timeout, decode body).
    #[error("request to employee source failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The source answered with a non-success status.
    #[error("employee source returned status {0}")]
    Status(reqwest::StatusCode),

    /// A local employee file could not be read.
    #[error("failed to read employee file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The payload did not match the expected shape.
    #[error("failed to decode employee payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Options for acquiring the employee feed.
#[derive(Debug, Clone)]
pub struct SourceOptions {
    /// Base URL of the demo API.
    pub base_url: String,
    /// Number of records to request.
    pub limit: usize,
    /// Request timeout.
    pub timeout: Duration,
    /// Seed for the rating fill; `None` draws from entropy.
    pub rating_seed: Option<u64>,
    /// Whether to show a progress spinner during the fetch.
    pub show_progress: bool,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SOURCE_URL.to_string(),
            limit: DEFAULT_FETCH_LIMIT,
            timeout: Duration::from_secs(30),
            rating_seed: None,
            show_progress: true,
        }
    }
}

/// Raw response envelope from the demo API.
#[derive(Debug, Deserialize)]
struct UsersPayload {
    #[serde(default)]
    users: Vec<RawUser>,
}

/// Raw user as shipped by the demo API. Everything beyond the id and
/// names is optional; normalization fills the gaps.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUser {
    id: u64,
    first_name: String,
    last_name: String,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    age: Option<u32>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    company: Option<RawCompany>,
    #[serde(default)]
    address: Option<RawAddress>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCompany {
    #[serde(default)]
    department: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawAddress {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

/// HTTP client for the employee source.
pub struct SourceClient {
    http: reqwest::Client,
    options: SourceOptions,
}

impl SourceClient {
    /// Create a client with the given options.
    pub fn new(options: SourceOptions) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()?;
        Ok(Self { http, options })
    }

    /// Fetch and normalize the employee list.
    pub async fn fetch_employees(&self) -> Result<Vec<EmployeeRecord>, SourceError> {
        let url = format!(
            "{}/users?limit={}",
            self.options.base_url.trim_end_matches('/'),
            self.options.limit
        );
        info!("Fetching employees from {}", url);

        let spinner = if self.options.show_progress {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message(format!("Fetching {}", url));
            pb.enable_steady_tick(Duration::from_millis(100));
            Some(pb)
        } else {
            None
        };

        let result = self.fetch_inner(&url).await;

        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }

        result
    }

    async fn fetch_inner(&self, url: &str) -> Result<Vec<EmployeeRecord>, SourceError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status));
        }

        let payload: UsersPayload = response.json().await?;
        debug!("Received {} raw users", payload.users.len());

        let mut rng = rating_rng(self.options.rating_seed);
        Ok(normalize_users(payload.users, &mut rng))
    }
}

/// Load employees from a local JSON file with the demo payload shape.
pub fn load_from_file(
    path: &Path,
    rating_seed: Option<u64>,
) -> Result<Vec<EmployeeRecord>, SourceError> {
    let content = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let payload: UsersPayload = serde_json::from_str(&content)?;
    debug!(
        "Loaded {} raw users from {}",
        payload.users.len(),
        path.display()
    );

    let mut rng = rating_rng(rating_seed);
    Ok(normalize_users(payload.users, &mut rng))
}

fn rating_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn normalize_users(raw: Vec<RawUser>, rng: &mut StdRng) -> Vec<EmployeeRecord> {
    raw.into_iter().map(|user| normalize_user(user, rng)).collect()
}

/// Turn a raw feed user into a directory record.
///
/// Username falls back to the lowercased name pair, the department
/// defaults to "General", and records the feed left unrated get a
/// uniform integer rating in 1..=5 so every record can participate in
/// the rating views.
fn normalize_user(user: RawUser, rng: &mut StdRng) -> EmployeeRecord {
    let username = user
        .username
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| {
            format!(
                "{}{}",
                user.first_name.to_lowercase(),
                user.last_name.to_lowercase()
            )
        });

    let company = user.company.unwrap_or_default();
    let department = company
        .department
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| DEFAULT_DEPARTMENT.to_string());

    let address = user.address.unwrap_or_default();
    let rating = user
        .rating
        .or_else(|| Some(f64::from(rng.gen_range(1..=5))));

    EmployeeRecord {
        id: user.id,
        first_name: user.first_name,
        last_name: user.last_name,
        username,
        email: user.email.unwrap_or_default(),
        phone: user.phone.unwrap_or_default(),
        gender: user.gender.unwrap_or_default(),
        age: user.age,
        department: Some(department),
        title: company.title.unwrap_or_default(),
        address: Address {
            city: address.city.unwrap_or_default(),
            state: address.state.unwrap_or_default(),
            country: address.country.unwrap_or_default(),
        },
        image: user.image.unwrap_or_default(),
        rating,
    }
}
