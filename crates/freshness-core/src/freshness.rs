//! Freshness window computation
//!
//! Works out how long content may be served from an HTTP cache, starting from
//! a default period and tightening it to the earliest upcoming expiry of any
//! piece of content on the page.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use tracing::{debug, trace};

use crate::{Error, Result};

/// How long content is fresh for, and the instant it stops being fresh.
///
/// Always satisfies `fresh_until == reference + fresh_for` for the reference
/// time it was computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheFreshness {
    fresh_for: Duration,
    fresh_until: DateTime<Utc>,
}

impl CacheFreshness {
    /// How long the content is fresh for, relative to the reference time
    #[must_use]
    pub fn fresh_for(&self) -> Duration {
        self.fresh_for
    }

    /// The instant the content stops being fresh, in UTC
    #[must_use]
    pub fn fresh_until(&self) -> DateTime<Utc> {
        self.fresh_until
    }
}

/// Work out how long to cache content, relative to `reference`.
///
/// Starts from `default_period` and adopts any candidate expiry that is both
/// after `reference` and earlier than the current window. Unset candidates
/// carry no constraint. Candidates at or before `reference` are ignored: a
/// past expiry usually belongs to partial content that is not being served,
/// so it must not collapse the window to zero.
///
/// All instants are normalized to UTC before comparison, so the reference time
/// and the candidates may arrive in different time zones. Nothing the caller
/// passes in is modified.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `candidates` is `None` rather than an
/// explicit (possibly empty) collection, or if `default_period` cannot be added
/// to `reference` without leaving the representable date range.
pub fn compute_freshness<Tz, C>(
    reference: &DateTime<Tz>,
    default_period: Duration,
    candidates: Option<&[Option<DateTime<C>>]>,
) -> Result<CacheFreshness>
where
    Tz: TimeZone,
    C: TimeZone,
{
    let candidates = candidates.ok_or_else(|| {
        Error::invalid_argument("expiry candidates must be an explicit collection, possibly empty")
    })?;

    let reference = reference.with_timezone(&Utc);
    let default_until = TimeDelta::from_std(default_period)
        .ok()
        .and_then(|offset| reference.checked_add_signed(offset))
        .ok_or_else(|| {
            Error::invalid_argument(format!(
                "default period of {}s is out of range from {reference}",
                default_period.as_secs()
            ))
        })?;

    let mut freshness = CacheFreshness {
        fresh_for: default_period,
        fresh_until: default_until,
    };

    for candidate in candidates.iter().flatten() {
        let candidate = candidate.with_timezone(&Utc);

        // A negative offset does not convert, so this rejects past expiries
        let fresh_for = match (candidate - reference).to_std() {
            Ok(offset) if !offset.is_zero() => offset,
            _ => {
                trace!(%candidate, %reference, "Ignoring expiry at or before reference time");
                continue;
            }
        };
        if candidate >= freshness.fresh_until {
            trace!(%candidate, fresh_until = %freshness.fresh_until, "Expiry does not tighten window");
            continue;
        }

        debug!(
            %candidate,
            fresh_for_secs = fresh_for.as_secs(),
            "Content expiry shortens freshness window"
        );
        freshness = CacheFreshness {
            fresh_for,
            fresh_until: candidate,
        };
    }

    Ok(freshness)
}
