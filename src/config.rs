//! Configuration loader and schema types.
//!
//! This module exposes the settings that drive scanning, filename cleanup,
//! auditing and logging, plus helpers to load them from disk.

mod load;
mod schema;

pub use schema::*;
