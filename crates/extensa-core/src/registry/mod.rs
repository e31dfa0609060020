//! Per-capability extension registries.

mod extension;
mod table;

pub use extension::ExtensionRegistry;
