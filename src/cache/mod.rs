//! Cache module for storing API responses to disk
//!
//! This module provides a cache manager that persists API responses to the filesystem
//! with a time-to-live. Entries past their expiry are reported as expired so the
//! caller can issue a fresh request.

mod manager;

pub use manager::{CacheManager, CachedData};
