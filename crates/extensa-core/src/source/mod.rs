//! Resource locators for extension configuration.

mod directory;
mod embedded;

pub use directory::{DirectoryLocator, FileResource};
pub use embedded::{EmbeddedLocator, EmbeddedResource};

use std::sync::Arc;

use extensa_protocols::{ConfigResource, ResourceLocator};

/// Concatenates the resources of several locators, in order.
#[derive(Default)]
pub struct ChainLocator {
    locators: Vec<Arc<dyn ResourceLocator>>,
}

impl ChainLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a locator; its resources come after those already chained.
    pub fn with(mut self, locator: Arc<dyn ResourceLocator>) -> Self {
        self.locators.push(locator);
        self
    }

    pub fn push(&mut self, locator: Arc<dyn ResourceLocator>) {
        self.locators.push(locator);
    }

    pub fn len(&self) -> usize {
        self.locators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locators.is_empty()
    }
}

impl ResourceLocator for ChainLocator {
    fn locate(&self, path: &str) -> Vec<Arc<dyn ConfigResource>> {
        self.locators
            .iter()
            .flat_map(|locator| locator.locate(path))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_preserves_order() {
        let first = EmbeddedLocator::new().with_resource("p", "a = x.A");
        let second = EmbeddedLocator::new().with_resource("p", "a = x.B");
        let chain = ChainLocator::new()
            .with(Arc::new(first))
            .with(Arc::new(second));

        let resources = chain.locate("p");
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].read().unwrap(), "a = x.A");
        assert_eq!(resources[1].read().unwrap(), "a = x.B");
    }

    #[test]
    fn test_empty_chain() {
        let chain = ChainLocator::new();
        assert!(chain.is_empty());
        assert!(chain.locate("anything").is_empty());
    }
}
