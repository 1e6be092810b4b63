use crate::Map;
use crate::internal::cluster::node::NodeResources;
use crate::internal::cluster::sync::ResourceViewSyncMessage;
use crate::internal::common::resources::{ResourceAmount, ResourceId, ResourceRequest, ResourceSet};

pub fn amount(value: f64) -> ResourceAmount {
    ResourceAmount::from_f64(value)
}

pub fn resource_set(items: &[(ResourceId, f64)]) -> ResourceSet {
    ResourceSet::new(items.iter().map(|(id, value)| (*id, amount(*value))))
}

pub fn request(items: &[(ResourceId, f64)]) -> ResourceRequest {
    ResourceRequest::new(resource_set(items))
}

pub fn node_resources(
    total: &[(ResourceId, f64)],
    available: &[(ResourceId, f64)],
) -> NodeResources {
    NodeResources::new(resource_set(total), resource_set(available))
}

pub fn name_map(items: &[(&str, f64)]) -> Map<String, f64> {
    items
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect()
}

pub fn labels(items: &[(&str, &str)]) -> Map<String, String> {
    items
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

pub struct SyncMessageBuilder {
    message: ResourceViewSyncMessage,
}

impl SyncMessageBuilder {
    pub fn new(total: &[(&str, f64)], available: &[(&str, f64)]) -> Self {
        SyncMessageBuilder {
            message: ResourceViewSyncMessage {
                resources_total: name_map(total),
                resources_available: name_map(available),
                ..Default::default()
            },
        }
    }

    pub fn object_pulls_queued(mut self, value: bool) -> Self {
        self.message.object_pulls_queued = value;
        self
    }

    pub fn idle_duration_ms(mut self, value: i64) -> Self {
        self.message.idle_duration_ms = value;
        self
    }

    pub fn draining(mut self, deadline_ms: i64) -> Self {
        self.message.is_draining = true;
        self.message.draining_deadline_timestamp_ms = deadline_ms;
        self
    }

    pub fn build(self) -> ResourceViewSyncMessage {
        self.message
    }
}
