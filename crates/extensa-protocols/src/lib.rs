//! # Extensa Protocols
//!
//! Shared definitions for the Extensa extension registry.
//! Contains only types and traits - the registry itself lives in `extensa-core`.
//!
//! ## Core Items
//!
//! - [`Capability`] - Marks a trait as extensible and supplies its descriptor
//! - [`CapabilityDescriptor`] - Capability name plus optional default extension
//! - [`ResourceLocator`] - Finds the configuration resources for a capability
//! - [`ExtensionError`] - Error type shared by every registry operation

pub mod capability;
pub mod error;
pub mod resource;

pub use capability::{Capability, CapabilityDescriptor, DEFAULT_EXTENSION};
pub use error::{BoxError, ErrorKind, ExtensionError};
pub use resource::{ConfigResource, ResourceLocator, EXTENSION_DIRECTORY};
