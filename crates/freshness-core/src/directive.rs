//! Cache directives for outgoing responses
//!
//! Maps a computed [`CacheFreshness`] onto the caching decision for a response:
//! cache publicly until an instant, or never cache.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::CacheFreshness;

/// Revalidation extension sent with no-cache responses
pub const NO_CACHE_REVALIDATION: &str = "must-revalidate, proxy-revalidate";

/// IMF-fixdate format used by the `Expires` header
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Caching decision handed to the response layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheDirective {
    /// Shared and private caches may store the response until `expires`
    Public {
        /// Absolute expiration instant
        expires: DateTime<Utc>,
        /// Freshness lifetime sent as `max-age`
        max_age: Duration,
    },
    /// No cache may serve the response without revalidating it
    NoCache,
}

impl CacheDirective {
    /// Public directive carrying the window described by `freshness`
    #[must_use]
    pub fn public(freshness: &CacheFreshness) -> Self {
        Self::Public {
            expires: freshness.fresh_until(),
            max_age: freshness.fresh_for(),
        }
    }

    /// Whether intermediaries may cache the response
    #[must_use]
    pub fn is_cacheable(&self) -> bool {
        matches!(self, Self::Public { .. })
    }

    /// Freshness lifetime; zero for no-cache
    #[must_use]
    pub fn max_age(&self) -> Duration {
        match self {
            Self::Public { max_age, .. } => *max_age,
            Self::NoCache => Duration::ZERO,
        }
    }

    /// Absolute expiration instant, if the response is cacheable
    #[must_use]
    pub fn expires(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Public { expires, .. } => Some(*expires),
            Self::NoCache => None,
        }
    }

    /// Revalidation extension, if the response must not be cached
    #[must_use]
    pub fn revalidation(&self) -> Option<&'static str> {
        match self {
            Self::Public { .. } => None,
            Self::NoCache => Some(NO_CACHE_REVALIDATION),
        }
    }

    /// Value for the `Cache-Control` header
    #[must_use]
    pub fn cache_control(&self) -> String {
        match self {
            Self::Public { max_age, .. } => format!("public, max-age={}", max_age.as_secs()),
            Self::NoCache => format!("no-cache, max-age=0, {NO_CACHE_REVALIDATION}"),
        }
    }

    /// Response header pairs expressing this directive
    #[must_use]
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = vec![("Cache-Control", self.cache_control())];
        match self {
            Self::Public { expires, .. } => {
                headers.push(("Expires", expires.format(HTTP_DATE_FORMAT).to_string()));
            }
            Self::NoCache => headers.push(("Pragma", "no-cache".to_string())),
        }
        headers
    }
}

/// Map freshness onto a directive.
///
/// Preview or bypass requests (such as an editor viewing draft content) always
/// get [`CacheDirective::NoCache`], whatever the freshness says.
#[must_use]
pub fn map_to_directive(is_preview_or_bypass: bool, freshness: &CacheFreshness) -> CacheDirective {
    if is_preview_or_bypass {
        CacheDirective::NoCache
    } else {
        CacheDirective::public(freshness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute_freshness;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn freshness() -> CacheFreshness {
        let reference = Utc.with_ymd_and_hms(2014, 10, 1, 13, 0, 0).unwrap();
        let expiry = Utc.with_ymd_and_hms(2014, 10, 1, 20, 0, 0).unwrap();
        compute_freshness(&reference, Duration::from_secs(86_400), Some(&[Some(expiry)][..])).unwrap()
    }

    #[test]
    fn test_public_directive_carries_window() {
        let directive = map_to_directive(false, &freshness());

        assert!(directive.is_cacheable());
        assert_eq!(directive.max_age(), Duration::from_secs(7 * 3600));
        assert_eq!(
            directive.expires(),
            Some(Utc.with_ymd_and_hms(2014, 10, 1, 20, 0, 0).unwrap())
        );
        assert_eq!(directive.revalidation(), None);
    }

    #[test]
    fn test_preview_is_never_cacheable() {
        let directive = map_to_directive(true, &freshness());

        assert_eq!(directive, CacheDirective::NoCache);
        assert!(!directive.is_cacheable());
        assert_eq!(directive.max_age(), Duration::ZERO);
        assert_eq!(directive.expires(), None);
        assert_eq!(directive.revalidation(), Some("must-revalidate, proxy-revalidate"));
    }

    #[test]
    fn test_public_headers() {
        let headers = map_to_directive(false, &freshness()).headers();

        assert_eq!(
            headers,
            vec![
                ("Cache-Control", "public, max-age=25200".to_string()),
                ("Expires", "Wed, 01 Oct 2014 20:00:00 GMT".to_string()),
            ]
        );
    }

    #[test]
    fn test_no_cache_headers() {
        let headers = CacheDirective::NoCache.headers();

        assert_eq!(
            headers,
            vec![
                (
                    "Cache-Control",
                    "no-cache, max-age=0, must-revalidate, proxy-revalidate".to_string()
                ),
                ("Pragma", "no-cache".to_string()),
            ]
        );
    }

    #[test]
    fn test_max_age_truncates_sub_second() {
        let directive = CacheDirective::Public {
            expires: Utc.with_ymd_and_hms(2014, 10, 1, 13, 0, 1).unwrap(),
            max_age: Duration::from_millis(1500),
        };

        assert_eq!(directive.cache_control(), "public, max-age=1");
    }
}
