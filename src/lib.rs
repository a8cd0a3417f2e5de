//! Content Cache Library
//!
//! HTTP caching for published content: works out how long a page may be
//! served from shared caches and turns that into response headers.
//!
//! # Features
//!
//! - **Freshness windows**: a default period, tightened to the earliest
//!   upcoming expiry of any content on the page
//! - **Page overrides**: editors can pick a shorter period by keyword
//! - **Preview bypass**: editing sessions never receive cacheable output
//! - **Kill switch**: caching can be disabled from configuration
//!
//! The pure computation lives in [`freshness_core`] and is re-exported here.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod service;

pub use error::{Error, Result};
pub use freshness_core::{
    CacheDirective, CacheFreshness, compute_freshness, map_to_directive, parse_period_keyword,
    resolve_cache_period,
};
pub use service::{CacheableContent, HttpCachingService};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Setup tracing/logging
///
/// `RUST_LOG` takes precedence over `level`. Pass `Some("json")` as `format`
/// for structured output.
pub fn setup_tracing(level: &str, format: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry().with(filter);

    let installed = match format {
        Some("json") => subscriber.with(fmt::layer().json()).try_init(),
        _ => subscriber.with(fmt::layer()).try_init(),
    };

    installed.map_err(|e| Error::Tracing(e.to_string()))
}
