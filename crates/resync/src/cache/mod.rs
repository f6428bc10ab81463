//! Cache invalidation seam
//!
//! The resync never reads or locks a cache. It only asks the host to drop
//! entries tagged with a category whose contents the resync may have changed.

mod memory;
mod traits;

pub use memory::InMemoryTagCache;
pub use traits::{CacheInvalidator, CacheTag, NoopInvalidator};
