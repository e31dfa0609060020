//! Name table built from a capability's configuration resources.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use extensa_protocols::{Capability, CapabilityDescriptor, ExtensionError};

use crate::catalog::{ImplementationCatalog, ResolveFailure};
use crate::kernel::KernelShared;
use crate::parse::{parse_source, ExtensionLine};

/// What a configured name points at.
#[derive(Debug, Clone)]
pub(crate) enum Binding {
    /// An implementation identifier that provides the capability.
    Resolved(String),
    /// A line rejected at load time; the error is reported when the name is requested.
    Rejected(ExtensionError),
}

/// Merged name -> implementation mapping for one capability.
#[derive(Debug, Default)]
pub(crate) struct ExtensionTable {
    default_name: Option<String>,
    bindings: HashMap<String, Binding>,
    unnamed: Vec<String>,
}

impl ExtensionTable {
    /// Read every resource for `C` and resolve each line against the catalog.
    ///
    /// Unreadable resources are logged and skipped.
    pub(crate) fn load<C: Capability>(
        descriptor: &CapabilityDescriptor,
        shared: &KernelShared,
    ) -> Result<Self, ExtensionError> {
        let mut table = ExtensionTable {
            default_name: descriptor.resolve_default()?,
            ..Default::default()
        };

        let path = format!("{}{}", shared.directory, descriptor.name());
        let resources = shared.locator.locate(&path);
        if resources.is_empty() {
            debug!("No extension resources found at {}", path);
        }

        for resource in resources {
            let text = match resource.read() {
                Ok(text) => text,
                Err(e) => {
                    warn!("Skipping {}", ExtensionError::io(resource.origin(), e));
                    continue;
                }
            };

            for line in parse_source(&text, shared.blank_lines) {
                table.bind::<C>(descriptor.name(), resource.origin(), line, &shared.catalog);
            }
        }

        info!(
            "Loaded {} extensions for {} (default: {})",
            table.bindings.len(),
            descriptor.name(),
            table.default_name.as_deref().unwrap_or("none")
        );
        Ok(table)
    }

    fn bind<C: Capability>(
        &mut self,
        capability: &str,
        origin: &str,
        line: ExtensionLine,
        catalog: &ImplementationCatalog,
    ) {
        let binding = match catalog.resolve::<C>(&line.implementation) {
            Ok(_) => Binding::Resolved(line.implementation.clone()),
            Err(failure) => {
                let err = rejection(capability, origin, &line, failure);
                warn!("{}", err);
                Binding::Rejected(err)
            }
        };

        match line.name {
            Some(name) => {
                debug!("Binding {} -> {} ({}:{})", name, line.implementation, origin, line.number);
                if self.bindings.insert(name.clone(), binding).is_some() {
                    debug!("Extension {} redefined by {}", name, origin);
                }
            }
            None => {
                if let Binding::Resolved(implementation) = binding {
                    self.unnamed.push(implementation);
                }
            }
        }
    }

    pub(crate) fn default_name(&self) -> Option<&str> {
        self.default_name.as_deref()
    }

    pub(crate) fn binding(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    pub(crate) fn unnamed(&self) -> &[String] {
        &self.unnamed
    }
}

fn rejection(
    capability: &str,
    origin: &str,
    line: &ExtensionLine,
    failure: ResolveFailure,
) -> ExtensionError {
    let capability = capability.to_string();
    let implementation = line.implementation.clone();
    let origin = origin.to_string();
    let text = line.text.clone();

    match failure {
        ResolveFailure::Unknown => ExtensionError::UnresolvedImplementation {
            capability,
            implementation,
            origin,
            line: line.number,
            text,
        },
        ResolveFailure::Incompatible => ExtensionError::IncompatibleImplementation {
            capability,
            implementation,
            origin,
            line: line.number,
            text,
        },
    }
}
