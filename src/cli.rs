//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// StaffScope - employee directory analytics for the dummyjson demo API
///
/// Fetch employee records, browse and filter them, and generate a
/// Markdown or JSON report with department statistics, age distribution,
/// rating histogram, and age-rating correlation.
///
/// Examples:
///   staffscope
///   staffscope --query emily --departments Engineering,Support
///   staffscope --input fixtures/users.json --format json --seed 42
///   staffscope --add new_hire.toml --bookmark 3,7
///   staffscope --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Base URL of the employee source API
    #[arg(
        short,
        long,
        default_value = "https://dummyjson.com",
        env = "STAFFSCOPE_SOURCE_URL",
        value_name = "URL"
    )]
    pub source: String,

    /// Number of records to request from the source
    #[arg(short, long, default_value = "40", value_name = "COUNT")]
    pub limit: usize,

    /// Load employees from a local JSON file instead of the network
    ///
    /// The file must carry the same payload shape as the demo API.
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output file path for the report
    #[arg(
        short,
        long,
        default_value = "staffscope_report.md",
        value_name = "FILE"
    )]
    pub output: PathBuf,

    /// Output format (markdown, json)
    #[arg(long, default_value = "markdown", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Free-text search over name, email, and department
    #[arg(short, long, value_name = "TEXT")]
    pub query: Option<String>,

    /// Departments to keep (comma-separated)
    ///
    /// Example: --departments Engineering,Support
    #[arg(long, value_name = "DEPTS", value_delimiter = ',')]
    pub departments: Option<Vec<String>>,

    /// Minimum rating to keep (0-5); records without a rating count as 0
    #[arg(long, value_name = "RATING")]
    pub min_rating: Option<f64>,

    /// Number of departments in the ranked view
    #[arg(long, default_value = "3", value_name = "N")]
    pub top_n: usize,

    /// Listing page to include in the report (1-based)
    #[arg(long, default_value = "1", value_name = "PAGE")]
    pub page: usize,

    /// Records per listing page
    #[arg(long, default_value = "20", value_name = "COUNT")]
    pub page_size: usize,

    /// Employee draft TOML file(s) to add to the directory
    ///
    /// Drafts are validated (identity, contact, job steps) before they
    /// are appended. May be given multiple times.
    #[arg(long, value_name = "FILE")]
    pub add: Vec<PathBuf>,

    /// Employee id(s) to bookmark (comma-separated)
    #[arg(long, value_name = "IDS", value_delimiter = ',')]
    pub bookmark: Vec<u64>,

    /// Seed for the rating fill, for reproducible runs
    #[arg(long, value_name = "SEED", env = "STAFFSCOPE_SEED")]
    pub seed: Option<u64>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .staffscope.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(long)]
    pub quiet: bool,

    /// Dry run: fetch and print the filtered listing, write no report
    #[arg(long)]
    pub dry_run: bool,

    /// Generate a default .staffscope.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.input.is_none()
            && !self.source.starts_with("http://")
            && !self.source.starts_with("https://")
        {
            return Err("Source URL must start with 'http://' or 'https://'".to_string());
        }

        if self.limit == 0 {
            return Err("Limit must be at least 1".to_string());
        }

        if let Some(min) = self.min_rating {
            if !(0.0..=5.0).contains(&min) {
                return Err("Minimum rating must be between 0 and 5".to_string());
            }
        }

        if self.top_n == 0 {
            return Err("Top-N must be at least 1".to_string());
        }

        if self.page == 0 {
            return Err("Page numbers start at 1".to_string());
        }

        if self.page_size == 0 {
            return Err("Page size must be at least 1".to_string());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        if let Some(ref input) = self.input {
            if !input.exists() {
                return Err(format!("Input file does not exist: {}", input.display()));
            }
            if !input.is_file() {
                return Err(format!("Input path is not a file: {}", input.display()));
            }
        }

        for draft in &self.add {
            if !draft.exists() {
                return Err(format!("Draft file does not exist: {}", draft.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            source: "https://dummyjson.com".to_string(),
            limit: 40,
            input: None,
            output: PathBuf::from("staffscope_report.md"),
            format: OutputFormat::Markdown,
            query: None,
            departments: None,
            min_rating: None,
            top_n: 3,
            page: 1,
            page_size: 20,
            add: Vec::new(),
            bookmark: Vec::new(),
            seed: None,
            timeout: None,
            config: None,
            verbose: false,
            quiet: false,
            dry_run: false,
            init_config: false,
        }
    }

    #[test]
    fn test_default_args_are_valid() {
        assert!(make_args().validate().is_ok());
    }

    #[test]
    fn test_validation_invalid_source_url() {
        let mut args = make_args();
        args.source = "dummyjson.com".to_string();
        assert!(args.validate().is_err());

        // A local input file makes the URL irrelevant.
        args.input = Some(PathBuf::from("Cargo.toml"));
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_min_rating_domain() {
        let mut args = make_args();
        args.min_rating = Some(5.5);
        assert!(args.validate().is_err());

        args.min_rating = Some(0.0);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_paging() {
        let mut args = make_args();
        args.page = 0;
        assert!(args.validate().is_err());

        args.page = 1;
        args.page_size = 0;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
