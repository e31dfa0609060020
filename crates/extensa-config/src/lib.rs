//! # Extensa Config
//!
//! Settings for building an extension kernel: where configuration resources
//! are searched for and how they are parsed.

mod error;
mod loader;
mod schema;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
