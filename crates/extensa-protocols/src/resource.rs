//! Configuration resource discovery.

use std::fmt;
use std::sync::Arc;

/// Resource prefix under which capability configuration files live.
///
/// The file for a capability is this prefix joined with the capability's
/// fully-qualified name.
pub const EXTENSION_DIRECTORY: &str = "META-INF/extensa/";

/// A single configuration resource.
pub trait ConfigResource: Send + Sync + fmt::Debug {
    /// Human-readable location, used in logs and error messages.
    fn origin(&self) -> &str;

    /// Read the whole resource as UTF-8 text.
    fn read(&self) -> std::io::Result<String>;
}

/// Finds every resource published under a logical path.
///
/// Several resources may share one path; the registry merges them in the
/// order returned.
pub trait ResourceLocator: Send + Sync {
    fn locate(&self, path: &str) -> Vec<Arc<dyn ConfigResource>>;
}

impl<T: ResourceLocator + ?Sized> ResourceLocator for Arc<T> {
    fn locate(&self, path: &str) -> Vec<Arc<dyn ConfigResource>> {
        (**self).locate(path)
    }
}
