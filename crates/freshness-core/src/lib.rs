//! Freshness Core
//!
//! Pure primitives for HTTP cache freshness: work out how long served content
//! stays fresh, and turn that into a cache directive for the response.
//!
//! Everything here is synchronous and stateless. Inputs are borrowed, never
//! mutated, and every call allocates only its own result, so the functions
//! can be called from any number of request handlers without coordination.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod directive;
pub mod error;
pub mod freshness;
pub mod period;

pub use directive::{CacheDirective, NO_CACHE_REVALIDATION, map_to_directive};
pub use error::{Error, Result};
pub use freshness::{CacheFreshness, compute_freshness};
pub use period::{PERIOD_KEYWORDS, parse_period_keyword, resolve_cache_period};
