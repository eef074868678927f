//! Employee source modules.
//!
//! This module acquires the raw employee feed (demo API or local file)
//! and normalizes it into directory records.

pub mod client;

pub use client::{
    load_from_file, SourceClient, SourceError, SourceOptions, DEFAULT_FETCH_LIMIT,
    DEFAULT_SOURCE_URL,
};
