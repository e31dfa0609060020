//! Error types for the Extensa protocol layer.

mod extension;

pub use extension::*;
