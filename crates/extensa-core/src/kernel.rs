//! Process-scoped context owning every extension registry.

use std::any::{Any, TypeId};
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::OnceCell;
use tracing::{debug, info};

use extensa_config::KernelConfig;
use extensa_protocols::{BoxError, Capability, ExtensionError, ResourceLocator, EXTENSION_DIRECTORY};

use crate::catalog::{ImplementationCatalog, SharedInstance};
use crate::parse::BlankLinePolicy;
use crate::registry::ExtensionRegistry;
use crate::source::{ChainLocator, DirectoryLocator};

static GLOBAL: OnceCell<Kernel> = OnceCell::new();

/// State shared by the kernel and all of its registries.
pub(crate) struct KernelShared {
    pub(crate) catalog: ImplementationCatalog,
    pub(crate) locator: Arc<dyn ResourceLocator>,
    pub(crate) directory: String,
    pub(crate) blank_lines: BlankLinePolicy,
    /// Instances keyed by implementation identifier, shared across capabilities.
    instances: DashMap<String, SharedInstance>,
}

impl KernelShared {
    /// Get or construct the instance for `implementation` and view it as `C`.
    pub(crate) fn instantiate<C: Capability>(
        &self,
        capability: &str,
        name: &str,
        implementation: &str,
    ) -> Result<Arc<C::Object>, ExtensionError> {
        let failed = |source: BoxError| ExtensionError::Instantiation {
            capability: capability.to_string(),
            name: name.to_string(),
            implementation: implementation.to_string(),
            source: Arc::from(source),
        };

        let entry = self.catalog.get(implementation).ok_or_else(|| {
            failed(format!("implementation {} is not registered", implementation).into())
        })?;

        let cached = self
            .instances
            .get(implementation)
            .map(|instance| instance.value().clone());
        let instance = match cached {
            Some(instance) => {
                debug!("Reusing instance of {}", implementation);
                instance
            }
            None => {
                let fresh = entry.construct().map_err(failed)?;
                self.instances
                    .entry(implementation.to_string())
                    .or_insert(fresh)
                    .value()
                    .clone()
            }
        };

        entry.cast::<C>(instance).ok_or_else(|| {
            failed(format!("{} does not provide {}", entry.type_name(), capability).into())
        })
    }
}

/// The extension kernel.
///
/// Owns one [`ExtensionRegistry`] per capability and the instance cache they
/// share. Clones are cheap and refer to the same state.
#[derive(Clone)]
pub struct Kernel {
    shared: Arc<KernelShared>,
    registries: Arc<DashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl Kernel {
    /// Start building a kernel.
    pub fn builder() -> KernelBuilder {
        KernelBuilder::new()
    }

    /// Get the registry for capability `C`, creating it on first request.
    pub fn registry<C: Capability>(&self) -> Result<Arc<ExtensionRegistry<C>>, ExtensionError> {
        let descriptor = C::descriptor().ok_or_else(|| ExtensionError::NotExtensible {
            capability: std::any::type_name::<C>().to_string(),
        })?;
        if descriptor.name().trim().is_empty() {
            return Err(ExtensionError::InvalidArgument(format!(
                "capability {} has a blank name",
                std::any::type_name::<C>()
            )));
        }

        let key = TypeId::of::<C>();
        let existing = self
            .registries
            .get(&key)
            .map(|registry| registry.value().clone());
        let registry = match existing {
            Some(registry) => registry,
            None => {
                let name = descriptor.name().to_string();
                let candidate: Arc<dyn Any + Send + Sync> =
                    Arc::new(ExtensionRegistry::<C>::new(descriptor, self.shared.clone()));
                let registry = self.registries.entry(key).or_insert(candidate).value().clone();
                info!("Registry ready for {}", name);
                registry
            }
        };

        registry.downcast::<ExtensionRegistry<C>>().map_err(|_| {
            ExtensionError::InvalidArgument(format!(
                "registry slot for {} holds a different capability",
                std::any::type_name::<C>()
            ))
        })
    }

    /// Shorthand for `registry::<C>()?.instance(name)`.
    pub fn instance<C: Capability>(&self, name: &str) -> Result<Option<Arc<C::Object>>, ExtensionError> {
        self.registry::<C>()?.instance(name)
    }

    /// Shorthand for `registry::<C>()?.default_instance()`.
    pub fn default_instance<C: Capability>(&self) -> Result<Option<Arc<C::Object>>, ExtensionError> {
        self.registry::<C>()?.default_instance()
    }

    /// The implementation catalog.
    pub fn catalog(&self) -> &ImplementationCatalog {
        &self.shared.catalog
    }

    /// Resource prefix configuration files are looked up under.
    pub fn directory(&self) -> &str {
        &self.shared.directory
    }

    /// Number of registries created so far.
    pub fn registry_count(&self) -> usize {
        self.registries.len()
    }

    /// Number of implementations constructed so far.
    pub fn instance_count(&self) -> usize {
        self.shared.instances.len()
    }

    /// Install `kernel` as the process-wide kernel.
    ///
    /// Returns the kernel back if one is already installed.
    pub fn install_global(kernel: Kernel) -> Result<&'static Kernel, Kernel> {
        GLOBAL.try_insert(kernel).map_err(|(_, rejected)| rejected)
    }

    /// The process-wide kernel, if installed.
    pub fn global() -> Option<&'static Kernel> {
        GLOBAL.get()
    }
}

impl Default for Kernel {
    fn default() -> Self {
        KernelBuilder::new().build()
    }
}

impl std::fmt::Debug for Kernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kernel")
            .field("directory", &self.shared.directory)
            .field("implementations", &self.shared.catalog.len())
            .field("registries", &self.registries.len())
            .field("instances", &self.shared.instances.len())
            .finish()
    }
}

/// Builder for [`Kernel`].
pub struct KernelBuilder {
    catalog: ImplementationCatalog,
    locator: ChainLocator,
    directory: String,
    blank_lines: BlankLinePolicy,
}

impl KernelBuilder {
    pub fn new() -> Self {
        Self {
            catalog: ImplementationCatalog::new(),
            locator: ChainLocator::new(),
            directory: EXTENSION_DIRECTORY.to_string(),
            blank_lines: BlankLinePolicy::default(),
        }
    }

    /// Builder preset from a loaded [`KernelConfig`].
    ///
    /// Search paths become a [`DirectoryLocator`], in the configured order.
    pub fn from_config(config: &KernelConfig) -> Self {
        Self::new().configure(config)
    }

    /// Apply a [`KernelConfig`] on top of the locators added so far.
    pub fn configure(mut self, config: &KernelConfig) -> Self {
        self = self
            .directory(&config.loader.directory)
            .blank_lines(BlankLinePolicy::from_legacy(config.loader.legacy_blank_lines));

        let roots = config.loader.resolved_search_paths();
        if !roots.is_empty() {
            self = self.locator(DirectoryLocator::new(roots));
        }
        self
    }

    /// Use `catalog` as the implementation catalog.
    pub fn catalog(mut self, catalog: ImplementationCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Register implementations on the builder's catalog.
    pub fn implementations(mut self, register: impl FnOnce(&mut ImplementationCatalog)) -> Self {
        register(&mut self.catalog);
        self
    }

    /// Add a resource locator. Locators are consulted in the order added.
    pub fn locator(mut self, locator: impl ResourceLocator + 'static) -> Self {
        self.locator.push(Arc::new(locator));
        self
    }

    /// Set the resource prefix. A trailing `/` is added when missing.
    pub fn directory(mut self, directory: impl Into<String>) -> Self {
        let mut directory = directory.into();
        if !directory.is_empty() && !directory.ends_with('/') {
            directory.push('/');
        }
        self.directory = directory;
        self
    }

    pub fn blank_lines(mut self, policy: BlankLinePolicy) -> Self {
        self.blank_lines = policy;
        self
    }

    pub fn build(self) -> Kernel {
        debug!(
            "Building kernel: {} implementations, {} locators, directory {}",
            self.catalog.len(),
            self.locator.len(),
            self.directory
        );

        Kernel {
            shared: Arc::new(KernelShared {
                catalog: self.catalog,
                locator: Arc::new(self.locator),
                directory: self.directory,
                blank_lines: self.blank_lines,
                instances: DashMap::new(),
            }),
            registries: Arc::new(DashMap::new()),
        }
    }
}

impl Default for KernelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "kernel_tests.rs"]
mod tests;
