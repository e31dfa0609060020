//! In-memory configuration resources.

use std::borrow::Cow;
use std::sync::Arc;

use extensa_protocols::{ConfigResource, ResourceLocator};

/// A resource whose text is held in memory, e.g. from `include_str!`.
#[derive(Debug, Clone)]
pub struct EmbeddedResource {
    origin: String,
    content: Cow<'static, str>,
}

impl ConfigResource for EmbeddedResource {
    fn origin(&self) -> &str {
        &self.origin
    }

    fn read(&self) -> std::io::Result<String> {
        Ok(self.content.to_string())
    }
}

/// Locator serving resources registered in memory.
#[derive(Debug, Default, Clone)]
pub struct EmbeddedLocator {
    resources: Vec<(String, Arc<EmbeddedResource>)>,
}

impl EmbeddedLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource under `path`. Several resources may share a path.
    pub fn with_resource(
        mut self,
        path: impl Into<String>,
        content: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<Cow<'static, str>>) {
        let path = path.into();
        let ordinal = self.resources.iter().filter(|(p, _)| *p == path).count();
        let resource = EmbeddedResource {
            origin: format!("embedded:{}#{}", path, ordinal),
            content: content.into(),
        };
        self.resources.push((path, Arc::new(resource)));
    }
}

impl ResourceLocator for EmbeddedLocator {
    fn locate(&self, path: &str) -> Vec<Arc<dyn ConfigResource>> {
        self.resources
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, resource)| resource.clone() as Arc<dyn ConfigResource>)
            .collect()
    }
}
