use agentcore::cluster::{ClusterResourceManager, NodeResources, ResourceViewSyncMessage};
use agentcore::push::ChunkSendFn;
use agentcore::resources::{CPU_RESOURCE_ID, GPU_RESOURCE_ID, ResourceAmount, ResourceSet};
use agentcore::NodeId;
use std::time::Duration;

pub fn create_cluster(node_count: u64) -> ClusterResourceManager {
    let mut manager = ClusterResourceManager::new(Duration::from_secs(3));
    for id in 0..node_count {
        let total = ResourceSet::new([
            (CPU_RESOURCE_ID, ResourceAmount::new_units(64)),
            (GPU_RESOURCE_ID, ResourceAmount::new_units(4)),
        ]);
        manager.add_or_update_node(NodeId::new(id), NodeResources::from_total(total));
    }
    manager
}

pub fn sync_message(cpus: f64) -> ResourceViewSyncMessage {
    ResourceViewSyncMessage {
        resources_total: [("CPU".to_string(), 64.0), ("GPU".to_string(), 4.0)]
            .into_iter()
            .collect(),
        resources_available: [("CPU".to_string(), cpus), ("GPU".to_string(), 4.0)]
            .into_iter()
            .collect(),
        ..Default::default()
    }
}

pub fn noop_send_fn() -> ChunkSendFn {
    Box::new(|_| {})
}
