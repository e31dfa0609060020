//! Per-capability extension registry.

use std::marker::PhantomData;
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::OnceCell;
use parking_lot::ReentrantMutex;
use tracing::debug;

use extensa_protocols::{Capability, CapabilityDescriptor, ExtensionError, DEFAULT_EXTENSION};

use super::table::{Binding, ExtensionTable};
use crate::kernel::KernelShared;

/// Write-once slot for a named extension instance.
type Holder<O> = Arc<OnceCell<Arc<O>>>;

/// Registry of the named extensions of one capability.
///
/// Obtained from [`Kernel::registry`](crate::Kernel::registry). Configuration
/// is read on first use and cached for the life of the registry; each name is
/// constructed at most once.
pub struct ExtensionRegistry<C: Capability> {
    descriptor: CapabilityDescriptor,
    shared: Arc<KernelShared>,
    table: OnceCell<Result<ExtensionTable, ExtensionError>>,
    instances: DashMap<String, Holder<C::Object>>,
    /// Serializes construction across all names of this registry. Reentrant so a
    /// constructor may look up other names of the same capability.
    construction: ReentrantMutex<()>,
    _capability: PhantomData<fn() -> C>,
}

impl<C: Capability> ExtensionRegistry<C> {
    pub(crate) fn new(descriptor: CapabilityDescriptor, shared: Arc<KernelShared>) -> Self {
        Self {
            descriptor,
            shared,
            table: OnceCell::new(),
            instances: DashMap::new(),
            construction: ReentrantMutex::new(()),
            _capability: PhantomData,
        }
    }

    /// The capability this registry serves.
    pub fn capability(&self) -> &CapabilityDescriptor {
        &self.descriptor
    }

    /// Get the extension registered under `name`.
    ///
    /// [`DEFAULT_EXTENSION`] resolves to the capability's default and may
    /// yield `None`; any other name yields `Some` or an error.
    pub fn instance(&self, name: &str) -> Result<Option<Arc<C::Object>>, ExtensionError> {
        if name.trim().is_empty() {
            return Err(ExtensionError::InvalidArgument(format!(
                "extension name for {} must not be blank",
                self.descriptor.name()
            )));
        }
        if name == DEFAULT_EXTENSION {
            return self.default_instance();
        }

        if let Some(instance) = self.cached(name) {
            return Ok(Some(instance));
        }

        let _guard = self.construction.lock();
        if let Some(instance) = self.cached(name) {
            return Ok(Some(instance));
        }

        let created = self.create(name)?;
        let holder = self.instances.entry(name.to_string()).or_default().clone();
        Ok(Some(holder.get_or_init(|| created).clone()))
    }

    /// Get the capability's default extension, if one is declared.
    pub fn default_instance(&self) -> Result<Option<Arc<C::Object>>, ExtensionError> {
        let default_name = self.table()?.default_name().map(str::to_owned);
        match default_name {
            Some(name) if !name.is_empty() && name != DEFAULT_EXTENSION => self.instance(&name),
            _ => Ok(None),
        }
    }

    /// The resolved default extension name.
    pub fn default_name(&self) -> Result<Option<String>, ExtensionError> {
        Ok(self.table()?.default_name().map(str::to_owned))
    }

    /// All configured names, sorted. Includes names whose line was rejected.
    pub fn names(&self) -> Result<Vec<String>, ExtensionError> {
        let mut names: Vec<String> = self.table()?.names().map(String::from).collect();
        names.sort();
        Ok(names)
    }

    /// Implementations listed without a name. They are validated but not addressable.
    pub fn unnamed_implementations(&self) -> Result<Vec<String>, ExtensionError> {
        Ok(self.table()?.unnamed().to_vec())
    }

    /// Whether `name` is configured and resolves to a usable implementation.
    pub fn contains(&self, name: &str) -> Result<bool, ExtensionError> {
        Ok(matches!(self.table()?.binding(name), Some(Binding::Resolved(_))))
    }

    /// Whether configuration has been read.
    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }

    fn cached(&self, name: &str) -> Option<Arc<C::Object>> {
        self.instances
            .get(name)
            .and_then(|holder| holder.value().get().cloned())
    }

    fn table(&self) -> Result<&ExtensionTable, ExtensionError> {
        self.table
            .get_or_init(|| ExtensionTable::load::<C>(&self.descriptor, &self.shared))
            .as_ref()
            .map_err(Clone::clone)
    }

    fn create(&self, name: &str) -> Result<Arc<C::Object>, ExtensionError> {
        let implementation = match self.table()?.binding(name) {
            Some(Binding::Resolved(implementation)) => implementation.clone(),
            Some(Binding::Rejected(err)) => return Err(err.clone()),
            None => {
                return Err(ExtensionError::UnknownExtension {
                    capability: self.descriptor.name().to_string(),
                    name: name.to_string(),
                })
            }
        };

        debug!("Creating extension {} ({}) for {}", name, implementation, self.descriptor.name());
        self.shared
            .instantiate::<C>(self.descriptor.name(), name, &implementation)
    }
}

impl<C: Capability> std::fmt::Debug for ExtensionRegistry<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("capability", &self.descriptor.name())
            .field("loaded", &self.is_loaded())
            .field("instances", &self.instances.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "extension_tests.rs"]
mod tests;
