//! Typed constructors addressed by implementation identifier.
//!
//! Configuration resources name implementations by string identifier. The
//! catalog maps each identifier to a zero-argument constructor and records
//! which capabilities the constructed value satisfies, so a configuration
//! line can be checked against its capability before anything is built.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::debug;

use extensa_protocols::{BoxError, Capability};

/// A constructed extension, shared across every capability it provides.
pub type SharedInstance = Arc<dyn Any + Send + Sync>;

type Constructor = Arc<dyn Fn() -> Result<SharedInstance, BoxError> + Send + Sync>;
type Caster<O> = Arc<dyn Fn(SharedInstance) -> Option<Arc<O>> + Send + Sync>;

/// Why an identifier cannot serve a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveFailure {
    /// No implementation is registered under the identifier.
    Unknown,
    /// The implementation exists but does not provide the capability.
    Incompatible,
}

/// A registered implementation.
pub struct Implementation {
    identifier: String,
    type_name: &'static str,
    constructor: Constructor,
    casts: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Implementation {
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Rust type name of the constructed value.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether this implementation satisfies capability `C`.
    pub fn provides<C: Capability>(&self) -> bool {
        self.casts.contains_key(&TypeId::of::<C>())
    }

    pub(crate) fn construct(&self) -> Result<SharedInstance, BoxError> {
        (self.constructor)()
    }

    /// View a shared instance as capability `C`.
    pub(crate) fn cast<C: Capability>(&self, instance: SharedInstance) -> Option<Arc<C::Object>> {
        let caster = self
            .casts
            .get(&TypeId::of::<C>())?
            .downcast_ref::<Caster<C::Object>>()?;
        (**caster)(instance)
    }
}

impl std::fmt::Debug for Implementation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Implementation")
            .field("identifier", &self.identifier)
            .field("type_name", &self.type_name)
            .field("capabilities", &self.casts.len())
            .finish()
    }
}

/// Declares the capabilities of a freshly registered implementation.
pub struct ImplementationBuilder<'a, T> {
    entry: &'a mut Implementation,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> ImplementationBuilder<'_, T> {
    /// Declare that `T` satisfies capability `C`.
    ///
    /// `cast` performs the unsizing conversion, e.g. `|it| it as Arc<dyn Shape>`.
    pub fn provides<C: Capability>(self, cast: fn(Arc<T>) -> Arc<C::Object>) -> Self {
        let caster: Caster<C::Object> =
            Arc::new(move |instance: SharedInstance| instance.downcast::<T>().ok().map(cast));
        self.entry.casts.insert(TypeId::of::<C>(), Box::new(caster));
        self
    }
}

/// Registry of implementation constructors.
#[derive(Default)]
pub struct ImplementationCatalog {
    entries: HashMap<String, Implementation>,
}

impl ImplementationCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fallible constructor under `identifier`.
    ///
    /// Registering the same identifier again replaces the earlier entry.
    pub fn register<T, F>(
        &mut self,
        identifier: impl Into<String>,
        constructor: F,
    ) -> ImplementationBuilder<'_, T>
    where
        T: Send + Sync + 'static,
        F: Fn() -> Result<T, BoxError> + Send + Sync + 'static,
    {
        let identifier = identifier.into();
        let implementation = Implementation {
            identifier: identifier.clone(),
            type_name: std::any::type_name::<T>(),
            constructor: Arc::new(move || {
                constructor().map(|value| Arc::new(value) as SharedInstance)
            }),
            casts: HashMap::new(),
        };

        let entry = match self.entries.entry(identifier) {
            Entry::Occupied(mut occupied) => {
                debug!("Replacing implementation: {}", occupied.key());
                occupied.insert(implementation);
                occupied.into_mut()
            }
            Entry::Vacant(vacant) => vacant.insert(implementation),
        };

        ImplementationBuilder {
            entry,
            _marker: PhantomData,
        }
    }

    /// Register `T::default` as the constructor for `identifier`.
    pub fn register_default<T>(&mut self, identifier: impl Into<String>) -> ImplementationBuilder<'_, T>
    where
        T: Default + Send + Sync + 'static,
    {
        self.register(identifier, || Ok(T::default()))
    }

    /// Get an implementation by identifier.
    pub fn get(&self, identifier: &str) -> Option<&Implementation> {
        self.entries.get(identifier)
    }

    /// Look up `identifier` and check that it provides capability `C`.
    pub fn resolve<C: Capability>(&self, identifier: &str) -> Result<&Implementation, ResolveFailure> {
        let implementation = self.get(identifier).ok_or(ResolveFailure::Unknown)?;
        if implementation.provides::<C>() {
            Ok(implementation)
        } else {
            Err(ResolveFailure::Incompatible)
        }
    }

    /// List all registered identifiers.
    pub fn identifiers(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Shape: Send + Sync {
        fn sides(&self) -> u32;
    }

    trait Named: Send + Sync {
        fn name(&self) -> &str;
    }

    extensa_protocols::capability! {
        struct ShapeCapability: dyn Shape;
        name = "test.Shape"
    }

    extensa_protocols::capability! {
        struct NamedCapability: dyn Named;
        name = "test.Named"
    }

    #[derive(Default)]
    struct Square;

    impl Shape for Square {
        fn sides(&self) -> u32 {
            4
        }
    }

    impl Named for Square {
        fn name(&self) -> &str {
            "square"
        }
    }

    #[test]
    fn test_catalog_new() {
        let catalog = ImplementationCatalog::new();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }

    #[test]
    fn test_register_and_resolve() {
        let mut catalog = ImplementationCatalog::new();
        catalog
            .register_default::<Square>("test.Square")
            .provides::<ShapeCapability>(|it| it as Arc<dyn Shape>);

        let implementation = catalog.resolve::<ShapeCapability>("test.Square").unwrap();
        assert_eq!(implementation.identifier(), "test.Square");
        assert!(implementation.type_name().ends_with("Square"));
        assert!(implementation.provides::<ShapeCapability>());
        assert!(!implementation.provides::<NamedCapability>());
    }

    #[test]
    fn test_resolve_unknown() {
        let catalog = ImplementationCatalog::new();
        let failure = catalog.resolve::<ShapeCapability>("test.Missing").unwrap_err();
        assert_eq!(failure, ResolveFailure::Unknown);
    }

    #[test]
    fn test_resolve_incompatible() {
        let mut catalog = ImplementationCatalog::new();
        catalog
            .register_default::<Square>("test.Square")
            .provides::<NamedCapability>(|it| it as Arc<dyn Named>);

        let failure = catalog.resolve::<ShapeCapability>("test.Square").unwrap_err();
        assert_eq!(failure, ResolveFailure::Incompatible);
    }

    #[test]
    fn test_one_instance_serves_many_capabilities() {
        let mut catalog = ImplementationCatalog::new();
        catalog
            .register_default::<Square>("test.Square")
            .provides::<ShapeCapability>(|it| it as Arc<dyn Shape>)
            .provides::<NamedCapability>(|it| it as Arc<dyn Named>);

        let implementation = catalog.get("test.Square").unwrap();
        let instance = implementation.construct().unwrap();

        let shape = implementation.cast::<ShapeCapability>(instance.clone()).unwrap();
        let named = implementation.cast::<NamedCapability>(instance).unwrap();
        assert_eq!(shape.sides(), 4);
        assert_eq!(named.name(), "square");
    }

    #[test]
    fn test_constructor_failure() {
        let mut catalog = ImplementationCatalog::new();
        catalog
            .register::<Square, _>("test.Broken", || Err("no square today".into()))
            .provides::<ShapeCapability>(|it| it as Arc<dyn Shape>);

        let err = catalog.get("test.Broken").unwrap().construct().err().unwrap();
        assert_eq!(err.to_string(), "no square today");
    }

    #[test]
    fn test_register_replaces() {
        let mut catalog = ImplementationCatalog::new();
        catalog
            .register_default::<Square>("test.Square")
            .provides::<ShapeCapability>(|it| it as Arc<dyn Shape>);
        catalog.register_default::<Square>("test.Square");

        assert_eq!(catalog.len(), 1);
        assert!(!catalog.get("test.Square").unwrap().provides::<ShapeCapability>());
    }

    #[test]
    fn test_identifiers() {
        let mut catalog = ImplementationCatalog::new();
        catalog.register_default::<Square>("a");
        catalog.register_default::<Square>("b");

        let mut ids = catalog.identifiers();
        ids.sort();
        assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
    }
}
