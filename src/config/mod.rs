//! Configuration model for pit.
//!
//! This module defines the Config struct that represents `pit.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! sensible defaults for optional fields, and validation of config values.

mod model;
mod operations;
pub mod types;


pub use model::Config;
pub use operations::DEFAULT_CONFIG_FILE;
pub use types::{GeneratorTemplates, ValidationStep};
