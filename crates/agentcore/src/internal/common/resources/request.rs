use crate::internal::common::Map;
use crate::internal::common::resources::ResourceSet;

/// Resource demand of one placement decision.
#[derive(Debug, Clone, Default)]
pub struct ResourceRequest {
    resources: ResourceSet,
    // Every entry has to be present with the same value in node labels
    label_selector: Map<String, String>,
}

impl ResourceRequest {
    pub fn new(resources: ResourceSet) -> Self {
        ResourceRequest {
            resources,
            label_selector: Map::default(),
        }
    }

    pub fn with_label(mut self, key: &str, value: &str) -> Self {
        self.label_selector
            .insert(key.to_string(), value.to_string());
        self
    }

    #[inline]
    pub fn resource_set(&self) -> &ResourceSet {
        &self.resources
    }

    pub fn matches_labels(&self, labels: &Map<String, String>) -> bool {
        self.label_selector
            .iter()
            .all(|(key, value)| labels.get(key) == Some(value))
    }
}

impl From<ResourceSet> for ResourceRequest {
    fn from(resources: ResourceSet) -> Self {
        ResourceRequest::new(resources)
    }
}
