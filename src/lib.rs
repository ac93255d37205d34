//! Static AI-model metadata store.
//!
//! The store is a directory of JSON documents (`providers/*.json`, `aliases/*.json`,
//! `index.json`) consumed over plain HTTP. Two batch tools operate on it:
//!
//! - [`sync`] fetches the models.dev catalog, converts it to the local schema, keeps
//!   curated annotations and rewrites provider documents plus the index.
//! - [`validate`] checks every document against minimal structural rules.

pub mod catalog;
pub mod config;
#[cfg(feature = "cli")]
pub mod observability;
pub mod store;
pub mod sync;
pub mod validate;

#[cfg(test)]
mod tests;
