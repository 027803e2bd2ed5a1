//! Profile data access
//!
//! This module provides:
//! - The synchronous profile lookup capability consumed by the generator
//! - Injected profile caches (in-memory and directory backed)
//! - A caching source that fetches each key at most once at a time

pub mod profile_library;
