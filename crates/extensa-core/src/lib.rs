//! # Extensa Core
//!
//! Lazily loaded, cached extension registries.
//!
//! ## Components
//!
//! - [`Kernel`] - Process-scoped context owning one registry per capability
//!   and the instance cache shared by all of them
//! - [`ExtensionRegistry`] - Per-capability name lookup and singleton cache
//! - [`ImplementationCatalog`] - Typed constructors addressed by implementation identifier
//! - Resource locators for directories on disk and embedded text
//!
//! ## Flow
//!
//! A caller asks the kernel for the registry of a capability. On first use the
//! registry reads every configuration resource for that capability into a
//! name table, and each named extension is constructed once and reused.

pub mod catalog;
pub mod kernel;
pub mod parse;
pub mod registry;
pub mod source;

pub use catalog::{Implementation, ImplementationBuilder, ImplementationCatalog, SharedInstance};
pub use kernel::{Kernel, KernelBuilder};
pub use parse::{parse_source, BlankLinePolicy, ExtensionLine};
pub use registry::ExtensionRegistry;
pub use source::{ChainLocator, DirectoryLocator, EmbeddedLocator};
