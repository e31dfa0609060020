//! Capability descriptors.
//!
//! A capability is an abstract contract (a trait) that named extensions
//! implement. The [`Capability`] trait is attached to a zero-sized marker type
//! and carries the trait-object type handed to callers plus the descriptor
//! that marks the contract as extensible.

use crate::error::ExtensionError;

/// Extension name that resolves to the capability's declared default.
pub const DEFAULT_EXTENSION: &str = "default";

/// Static metadata for an extensible capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityDescriptor {
    name: String,
    default_name: Option<String>,
}

impl CapabilityDescriptor {
    /// Create a descriptor for the capability with the given fully-qualified name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default_name: None,
        }
    }

    /// Declare the default extension name.
    pub fn with_default(mut self, default_name: impl Into<String>) -> Self {
        self.default_name = Some(default_name.into());
        self
    }

    /// Fully-qualified capability name, used to locate configuration resources.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The default name exactly as declared.
    pub fn declared_default(&self) -> Option<&str> {
        self.default_name.as_deref()
    }

    /// Resolve the declared default into a single extension name.
    ///
    /// A blank declaration means "no default". Tokens are separated by commas;
    /// declaring more than one is a configuration error.
    pub fn resolve_default(&self) -> Result<Option<String>, ExtensionError> {
        let Some(declared) = self.default_name.as_deref() else {
            return Ok(None);
        };

        let names: Vec<String> = declared
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(String::from)
            .collect();

        match names.len() {
            0 => Ok(None),
            1 => Ok(names.into_iter().next()),
            _ => Err(ExtensionError::MultipleDefaults {
                capability: self.name.clone(),
                names,
            }),
        }
    }
}

/// An extensible capability.
///
/// Implemented on a marker type, usually through [`capability!`](crate::capability).
pub trait Capability: 'static {
    /// The trait-object type extensions are handed out as, e.g. `dyn UserService`.
    type Object: ?Sized + Send + Sync + 'static;

    /// Descriptor marking this capability extensible, or `None` if it is not.
    fn descriptor() -> Option<CapabilityDescriptor>;
}

/// Declare an extensible capability for a trait.
///
/// ```
/// use extensa_protocols::capability;
///
/// pub trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// capability! {
///     pub struct GreeterCapability: dyn Greeter;
///     name = "demo.Greeter",
///     default = "english",
/// }
/// ```
///
/// Only trait objects are accepted, so concrete types cannot be declared as
/// capabilities.
#[macro_export]
macro_rules! capability {
    (
        $(#[$meta:meta])*
        $vis:vis struct $marker:ident : dyn $object:path ;
        name = $name:expr
        $(, default = $default:expr)?
        $(,)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        $vis struct $marker;

        impl $crate::Capability for $marker {
            type Object = dyn $object;

            fn descriptor() -> ::core::option::Option<$crate::CapabilityDescriptor> {
                ::core::option::Option::Some(
                    $crate::CapabilityDescriptor::new($name)
                        $(.with_default($default))?
                )
            }
        }
    };
}

#[cfg(test)]
#[path = "capability_tests.rs"]
mod tests;
