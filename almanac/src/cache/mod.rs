//! Two-tier caching for upstream responses.
//!
//! The disk tier persists tile imagery between sessions with TTL-on-read
//! freshness; the memory tier holds small structured responses (geocoding
//! results, conditions, pollution readings) in a bounded TTL map. Both
//! follow the same cache-or-fetch contract: a fresh hit short-circuits the
//! network call, a miss fetches, stores and returns.
//!
//! Neither tier de-duplicates concurrent fetches for the same key. Racing
//! requests may duplicate the remote call; the entry is replaced wholesale
//! so the race costs bandwidth, never correctness.

mod disk;
mod memory;
mod path;
mod types;

pub use disk::DiskCache;
pub use memory::ExpiringCache;
pub use path::tile_path;
pub use types::CacheError;
