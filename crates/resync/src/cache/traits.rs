//! Cache invalidation trait definitions

use serde::{Deserialize, Serialize};

/// Category of cached data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheTag {
    /// Function listings for an app
    Functions,
    /// App listings and details
    Apps,
}

/// Trait for invalidating cached entries by tag
///
/// Implementations must not block for long: the controller calls this on
/// the same event loop that drives the UI.
pub trait CacheInvalidator: Send + Sync {
    /// Drop every entry carrying any of `tags`
    fn invalidate(&self, tags: &[CacheTag]);
}

/// Invalidator for hosts without a cache
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopInvalidator;

impl CacheInvalidator for NoopInvalidator {
    fn invalidate(&self, _tags: &[CacheTag]) {}
}
