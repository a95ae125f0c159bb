//! Version index layer
//!
//! Turns the entries a storage backend holds for an artifact into semantic
//! versions and resolves the latest one.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Lister    │────▶│   Service   │────▶│   Semver    │
//! │  (entries)  │     │ (aggregate) │     │  (ordering) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   │
//!        ▼                   ▼
//! ┌─────────────┐     ┌─────────────┐
//! │   Listers   │     │   Extract   │
//! │ (local, s3) │     │ (filenames) │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`extract`]: Version extraction from entry names
//! - [`lister`]: Lister trait for enumerating artifact entries
//! - [`listers`]: Concrete listers (local filesystem, object storage)
//! - [`semver`]: Strict semver parsing and latest version resolution
//! - [`service`]: Per-repository version lookups
//! - [`error`]: Error types for listing and version resolution

pub mod error;
pub mod extract;
pub mod lister;
pub mod listers;
pub mod semver;
pub mod service;
