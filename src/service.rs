//! HTTP caching for published content
//!
//! Binds the freshness computation to content: reads the page's period
//! override and expiry properties, honours the configured kill switch and
//! preview mode, and produces the directive for the response.

use std::time::Duration;

use chrono::{DateTime, FixedOffset, TimeZone};
use freshness_core::{CacheDirective, compute_freshness, map_to_directive, resolve_cache_period};
use tracing::debug;

use crate::Result;
use crate::config::{CachingConfig, UNPUBLISH_AT_FIELD};

/// Content property holding the page-level cache period keyword
pub const CACHE_PERIOD_FIELD: &str = "cache";

/// Read access to the properties of a published content item
///
/// Implemented by the content platform integration. Missing and unset
/// properties both return `None`.
pub trait CacheableContent {
    /// Text value of a property
    fn property_text(&self, alias: &str) -> Option<String>;

    /// Date value of a property
    fn property_date(&self, alias: &str) -> Option<DateTime<FixedOffset>>;
}

/// Works out HTTP caching for content
///
/// Holds only its configuration, so one instance can be shared by every
/// request handler.
#[derive(Debug, Clone, Default)]
pub struct HttpCachingService {
    config: CachingConfig,
}

impl HttpCachingService {
    /// Create a service from caching configuration
    #[must_use]
    pub fn new(config: CachingConfig) -> Self {
        Self { config }
    }

    /// The configuration this service applies
    #[must_use]
    pub fn config(&self) -> &CachingConfig {
        &self.config
    }

    /// Directive for a response, given the freshness inputs directly.
    ///
    /// Returns `Ok(None)` when caching is disabled, in which case the response
    /// should be left untouched. Preview requests get no-cache without any
    /// freshness being computed.
    pub fn directive<Tz, C>(
        &self,
        now: &DateTime<Tz>,
        period: Duration,
        expiry_dates: Option<&[Option<DateTime<C>>]>,
        is_preview: bool,
    ) -> Result<Option<CacheDirective>>
    where
        Tz: TimeZone,
        C: TimeZone,
    {
        if !self.config.enabled {
            debug!("HTTP caching disabled, leaving response headers alone");
            return Ok(None);
        }

        if is_preview {
            debug!("Preview request, sending no-cache");
            return Ok(Some(CacheDirective::NoCache));
        }

        let freshness = compute_freshness(now, period, expiry_dates)?;
        Ok(Some(map_to_directive(false, &freshness)))
    }

    /// Directive for a response serving `content`.
    ///
    /// The page's `cache` keyword overrides the configured default period.
    /// Expiry dates are read from `unpublishAt`, the configured expiry fields
    /// and `extra_fields`.
    pub fn directive_for_content<Tz, P>(
        &self,
        content: &P,
        now: &DateTime<Tz>,
        is_preview: bool,
        extra_fields: &[&str],
    ) -> Result<Option<CacheDirective>>
    where
        Tz: TimeZone,
        P: CacheableContent + ?Sized,
    {
        let keyword = content.property_text(CACHE_PERIOD_FIELD);
        let period = resolve_cache_period(self.config.default_period(), keyword.as_deref());
        if period != self.config.default_period() {
            debug!(
                period_secs = period.as_secs(),
                "Page overrides default cache period"
            );
        }

        let expiry_dates: Vec<_> = self
            .expiry_fields(extra_fields)
            .into_iter()
            .map(|alias| content.property_date(alias))
            .collect();

        self.directive(now, period, Some(expiry_dates.as_slice()), is_preview)
    }

    /// Every field to read expiry dates from, without duplicates
    fn expiry_fields<'a>(&'a self, extra_fields: &[&'a str]) -> Vec<&'a str> {
        let mut fields = vec![UNPUBLISH_AT_FIELD];
        let configured = self.config.expiry_fields.iter().map(String::as_str);
        for field in configured.chain(extra_fields.iter().copied()) {
            if !fields.contains(&field) {
                fields.push(field);
            }
        }
        fields
    }
}
