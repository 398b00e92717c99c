//! Caching: the generic LRU store and the compiled-program cache on top of it.

pub mod lru;
pub mod program;

pub use lru::LruStore;
pub use program::{CacheStats, ProgramCache, ProgramEntry};
