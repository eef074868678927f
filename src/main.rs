//! StaffScope - Employee Directory Analytics
//!
//! A CLI tool that fetches employee records from the dummyjson demo
//! API, applies search filters and bookmarks, computes department and
//! rating analytics, and generates a Markdown or JSON report.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (fetch, config, draft, or write failure)

mod analytics;
mod cli;
mod config;
mod directory;
mod models;
mod report;
mod source;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::Config;
use directory::{paginate, total_pages, BookmarkList, EmployeeDirectory, EmployeeDraft, SearchFilter};
use models::{DirectoryReport, EmployeeRecord, ReportMetadata};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("StaffScope v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the workflow
    match run(args).await {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Run failed: {}", e);
            eprintln!("\n❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .staffscope.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".staffscope.toml");

    if path.exists() {
        eprintln!("⚠️  .staffscope.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .staffscope.toml")?;

    println!("✅ Created .staffscope.toml with default settings.");
    println!("   Edit it to customize the source, paging, and report layout.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete workflow. Returns exit code (always 0 on success).
async fn run(args: Args) -> Result<i32> {
    let start_time = Instant::now();

    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    // Step 1: acquire the employee feed
    let (records, source_label) = fetch_records(&args, &config).await?;
    let mut employees = EmployeeDirectory::from_records(records);
    println!("📥 Loaded {} employees from {}", employees.len(), source_label);

    if employees.is_empty() {
        warn!("Employee feed is empty; analytics degrade to zero defaults");
    }

    // Step 2: apply intake drafts
    for path in &args.add {
        let draft = EmployeeDraft::load(path)?;
        if let Err(e) = draft.validate() {
            anyhow::bail!("Draft {} rejected: {}", path.display(), e);
        }
        let id = employees.next_id();
        let record = draft.into_record(id);
        println!("➕ Added {} (id {})", record.full_name(), id);
        employees.add(record);
    }

    // Step 3: bookmarks
    let mut bookmarks = BookmarkList::new();
    for id in &args.bookmark {
        match employees.get(*id) {
            Some(record) => {
                bookmarks.toggle(record);
            }
            None => warn!("No employee with id {} to bookmark", id),
        }
    }

    // Step 4: search filters and listing page
    let filter = SearchFilter {
        query: args.query.clone().unwrap_or_default(),
        departments: args.departments.clone().unwrap_or_default(),
        min_rating: args.min_rating,
    };
    let filtered = filter.apply(employees.records());
    if !filter.is_empty() {
        info!(
            "{} of {} employees match the filters",
            filtered.len(),
            employees.len()
        );
    }

    // Handle --dry-run: print the listing and exit
    if args.dry_run {
        return handle_dry_run(&filtered, args.page, config.general.page_size);
    }

    let listing = paginate(&filtered, args.page, config.general.page_size);

    // Step 5: analytics over the full directory
    println!("📊 Computing analytics...");
    let snapshot = analytics::snapshot(employees.records(), config.report.top_n);

    // Step 6: build and write the report
    let duration = start_time.elapsed().as_secs_f64();

    let metadata = ReportMetadata {
        source: source_label,
        generated_at: Utc::now(),
        total_records: employees.len(),
        filtered_records: filtered.len(),
        duration_seconds: duration,
    };

    let bookmark_records = if config.report.include_bookmarks {
        bookmarks.records().to_vec()
    } else {
        Vec::new()
    };

    let report = DirectoryReport {
        metadata,
        listing: listing.to_vec(),
        analytics: snapshot,
        bookmarks: bookmark_records,
    };

    let output = match args.format {
        OutputFormat::Json => report::generate_json_report(&report)?,
        OutputFormat::Markdown => report::generate_markdown_report(&report),
    };

    std::fs::write(&args.output, &output)
        .with_context(|| format!("Failed to write report to {}", args.output.display()))?;

    // Print summary
    println!("\n📊 Directory Summary:");
    println!(
        "   Employees: {} ({} after filters)",
        employees.len(),
        filtered.len()
    );
    println!(
        "   Departments: {}",
        report.analytics.department_stats.len()
    );
    if let Some(best) = report.analytics.top_departments.first() {
        println!(
            "   Best rated: {} ({:.2} avg)",
            best.department, best.average_rating
        );
    }
    println!(
        "   Age-rating correlation: {:.4}",
        report.analytics.age_rating_correlation
    );
    println!("   Bookmarks: {}", bookmarks.len());
    println!("   Duration: {:.1}s", duration);
    println!("\n✅ Report saved to: {}", args.output.display());

    Ok(0)
}

/// Handle --dry-run: print the filtered listing page, write nothing.
fn handle_dry_run(filtered: &[EmployeeRecord], page: usize, page_size: usize) -> Result<i32> {
    println!("\n🔍 Dry run: listing only (no report written)...\n");

    if filtered.is_empty() {
        println!("   No employees matched the current filters.");
    } else {
        let listing = paginate(filtered, page, page_size);
        for rec in listing {
            let rating = rec
                .rating
                .map_or("-".to_string(), |r| format!("{:.1}", r));
            println!(
                "     👤 {} — {} ({}★)",
                rec.full_name(),
                rec.department_label(),
                rating
            );
        }
        println!(
            "\n   Page {} of {} ({} employees total)",
            page.max(1),
            total_pages(filtered.len(), page_size),
            filtered.len()
        );
    }

    println!("\n✅ Dry run complete.");
    Ok(0)
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .staffscope.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

/// Acquire the employee records (network or local file).
async fn fetch_records(args: &Args, config: &Config) -> Result<(Vec<EmployeeRecord>, String)> {
    if let Some(ref input) = args.input {
        info!("Loading employees from file: {}", input.display());
        let records = source::load_from_file(input, config.source.rating_seed)?;
        return Ok((records, input.display().to_string()));
    }

    let options = source::SourceOptions {
        base_url: config.source.url.clone(),
        limit: config.source.limit,
        timeout: Duration::from_secs(config.source.timeout_seconds),
        rating_seed: config.source.rating_seed,
        show_progress: !args.quiet,
    };

    let client = source::SourceClient::new(options)?;
    let records = client.fetch_employees().await?;
    Ok((records, config.source.url.clone()))
}
