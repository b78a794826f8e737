//! External reference-data plumbing: synchronous HTTP and the on-disk
//! fetch-once cache with a multi-week freshness window.

pub mod cache;
pub mod http;

pub use cache::SourceCache;
