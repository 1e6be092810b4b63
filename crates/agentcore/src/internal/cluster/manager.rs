use crate::NodeId;
use crate::internal::cluster::bundle::BundleLocationIndex;
use crate::internal::cluster::node::{Node, NodeResources};
use crate::internal::cluster::sync::{NormalTaskResourcesData, ResourceViewSyncMessage};
use crate::internal::common::resources::{
    ResourceAmount, ResourceId, ResourceNameMap, ResourceRequest, ResourceSet,
};
use crate::internal::common::{Map, WrappedRcRefCell};
use crate::internal::configuration::AgentConfiguration;
use std::fmt::Write;
use std::time::{Duration, Instant};

/// Cluster-wide view of node resources used for placement decisions.
///
/// `nodes` is the authoritative local view. It is mutated speculatively by the
/// placement subsystem between synchronization messages. `received_node_resources`
/// keeps the last snapshot delivered by each node; it is replayed over the local view
/// once the view has not been touched for `refresh_interval`.
///
/// Every key of `received_node_resources` is also a key of `nodes`.
pub struct ClusterResourceManager {
    nodes: Map<NodeId, Node>,
    received_node_resources: Map<NodeId, NodeResources>,
    resource_names: ResourceNameMap,
    bundle_location_index: BundleLocationIndex,
    refresh_interval: Duration,
}

pub type ClusterResourceManagerRef = WrappedRcRefCell<ClusterResourceManager>;

impl ClusterResourceManagerRef {
    pub fn new(refresh_interval: Duration) -> Self {
        WrappedRcRefCell::wrap(ClusterResourceManager::new(refresh_interval))
    }
}

impl ClusterResourceManager {
    pub fn new(refresh_interval: Duration) -> Self {
        assert!(
            !refresh_interval.is_zero(),
            "Resource view refresh interval has to be positive"
        );
        ClusterResourceManager {
            nodes: Map::default(),
            received_node_resources: Map::default(),
            resource_names: ResourceNameMap::default(),
            bundle_location_index: BundleLocationIndex::default(),
            refresh_interval,
        }
    }

    pub fn from_configuration(configuration: &AgentConfiguration) -> Self {
        Self::new(configuration.resource_view_refresh_interval)
    }

    #[inline]
    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    pub fn get_or_create_resource_id(&mut self, name: &str) -> ResourceId {
        self.resource_names.get_or_allocate_resource_id(name)
    }

    #[inline]
    pub fn resource_names(&self) -> &ResourceNameMap {
        &self.resource_names
    }

    /// Inserts a new node or replaces the whole view of an existing one.
    pub fn add_or_update_node(&mut self, node_id: NodeId, node_resources: NodeResources) {
        match self.nodes.get_mut(&node_id) {
            Some(node) => *node = Node::new(node_resources),
            None => {
                log::debug!("New node {node_id} added into resource view");
                self.nodes.insert(node_id, Node::new(node_resources));
            }
        }
    }

    /// Same as [`ClusterResourceManager::add_or_update_node`] but with name-keyed maps.
    pub fn add_or_update_node_from_maps(
        &mut self,
        node_id: NodeId,
        resources_total: &Map<String, f64>,
        resources_available: &Map<String, f64>,
    ) {
        let total = self.resource_names.resource_set_from_map(resources_total);
        let available = self
            .resource_names
            .resource_set_from_map(resources_available);
        self.add_or_update_node(node_id, NodeResources::new(total, available));
    }

    /// Merges a synchronization message into the local view of a known node.
    /// Returns false (and changes nothing) if the node is unknown.
    pub fn update_node(&mut self, node_id: NodeId, message: &ResourceViewSyncMessage) -> bool {
        if !self.nodes.contains_key(&node_id) {
            return false;
        }
        let total = self
            .resource_names
            .resource_set_from_map(&message.resources_total);
        let available = self
            .resource_names
            .resource_set_from_map(&message.resources_available);

        let mut local_view = self.get_node_resources_or_panic(node_id).clone();
        local_view.total = total;
        local_view.available = available;
        local_view.object_pulls_queued = message.object_pulls_queued;
        local_view.idle_resource_duration_ms = message.idle_duration_ms;
        local_view.is_draining = message.is_draining;
        local_view.draining_deadline_timestamp_ms = message.draining_deadline_timestamp_ms;
        local_view.last_resource_update_time = Some(Instant::now());

        self.add_or_update_node(node_id, local_view.clone());
        self.received_node_resources.insert(node_id, local_view);
        true
    }

    pub fn remove_node(&mut self, node_id: NodeId) -> bool {
        self.received_node_resources.remove(&node_id);
        let removed = self.nodes.remove(&node_id).is_some();
        if removed {
            log::debug!("Node {node_id} removed from resource view");
        }
        removed
    }

    #[inline]
    pub fn contains_node(&self, node_id: NodeId) -> bool {
        self.nodes.contains_key(&node_id)
    }

    pub fn get_node_resources(&self, node_id: NodeId) -> Option<&NodeResources> {
        self.nodes.get(&node_id).map(|node| node.local_view())
    }

    /// The caller has to know that the node exists.
    pub fn get_node_resources_or_panic(&self, node_id: NodeId) -> &NodeResources {
        match self.nodes.get(&node_id) {
            Some(node) => node.local_view(),
            None => panic!("Node {node_id} not found in resource view"),
        }
    }

    pub fn get_node_resource_modified_ts(&self, node_id: NodeId) -> Option<Instant> {
        self.nodes.get(&node_id).map(|node| node.view_modified_ts())
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn get_resource_view(&self) -> &Map<NodeId, Node> {
        &self.nodes
    }

    /// Sets a new capacity of one resource on a node (creating the node when unknown).
    /// The same delta is applied to `available`, so the amount in use is preserved.
    pub fn update_resource_capacity(
        &mut self,
        node_id: NodeId,
        resource_id: ResourceId,
        resource_total: ResourceAmount,
    ) {
        let node = self
            .nodes
            .entry(node_id)
            .or_insert_with(|| Node::new(NodeResources::default()));
        let local_view = node.local_view_mut();
        let local_total = local_view.total.get(resource_id);
        let local_available = local_view.available.get(resource_id);
        let diff_capacity = resource_total - local_total;
        local_view
            .total
            .set(resource_id, (local_total + diff_capacity).max_zero());
        local_view
            .available
            .set(resource_id, (local_available + diff_capacity).max_zero());
    }

    pub fn delete_resources(&mut self, node_id: NodeId, resource_ids: &[ResourceId]) -> bool {
        let Some(node) = self.nodes.get_mut(&node_id) else {
            return false;
        };
        let local_view = node.local_view_mut();
        for resource_id in resource_ids {
            local_view.total.set(*resource_id, ResourceAmount::ZERO);
            local_view.available.set(*resource_id, ResourceAmount::ZERO);
        }
        true
    }

    /// Over-subtraction is expected when placement decisions race; negative results are
    /// clamped to zero.
    pub fn subtract_node_available_resources(
        &mut self,
        node_id: NodeId,
        request: &ResourceRequest,
    ) -> bool {
        let Some(node) = self.nodes.get_mut(&node_id) else {
            return false;
        };
        let local_view = node.local_view_mut();
        local_view.available -= request.resource_set();
        local_view.available.remove_negative();
        true
    }

    /// Returns resources back to a node. Only dimensions the node has in `total` are
    /// considered and `available` never exceeds `total`.
    pub fn add_node_available_resources(
        &mut self,
        node_id: NodeId,
        resource_set: &ResourceSet,
    ) -> bool {
        let Some(node) = self.nodes.get_mut(&node_id) else {
            return false;
        };
        let local_view = node.local_view_mut();
        for (resource_id, amount) in resource_set.iter() {
            if local_view.total.has(resource_id) {
                let total = local_view.total.get(resource_id);
                let available = local_view.available.get(resource_id) + amount;
                local_view.available.set(resource_id, available.min(total));
            }
        }
        true
    }

    pub fn has_feasible_resources(&self, node_id: NodeId, request: &ResourceRequest) -> bool {
        self.nodes
            .get(&node_id)
            .is_some_and(|node| node.local_view().is_feasible(request))
    }

    pub fn has_available_resources(
        &self,
        node_id: NodeId,
        request: &ResourceRequest,
        ignore_object_store_memory_requirement: bool,
    ) -> bool {
        self.nodes.get(&node_id).is_some_and(|node| {
            node.local_view()
                .is_available(request, ignore_object_store_memory_requirement)
        })
    }

    /// Applies the reported normal task usage if it is newer than the stored one and differs
    /// from it. Returns true iff the stored usage was changed.
    pub fn update_node_normal_task_resources(
        &mut self,
        node_id: NodeId,
        data: &NormalTaskResourcesData,
    ) -> bool {
        let Some(node) = self.nodes.get_mut(&node_id) else {
            return false;
        };
        let local_view = node.local_view_mut();
        if data.resources_normal_task_timestamp <= local_view.latest_resources_normal_task_timestamp
        {
            return false;
        }
        let normal_task_resources = self
            .resource_names
            .resource_set_from_map(&data.resources_normal_task);
        if normal_task_resources == local_view.normal_task_resources {
            return false;
        }
        log::debug!(
            "Normal task resources of node {node_id} updated (timestamp {})",
            data.resources_normal_task_timestamp
        );
        local_view.normal_task_resources = normal_task_resources;
        local_view.latest_resources_normal_task_timestamp = data.resources_normal_task_timestamp;
        true
    }

    pub fn set_node_labels(&mut self, node_id: NodeId, labels: Map<String, String>) {
        let node = self
            .nodes
            .entry(node_id)
            .or_insert_with(|| Node::new(NodeResources::default()));
        node.local_view_mut().labels = labels;
    }

    /// Replays the last received snapshot of every node whose local view was not modified
    /// for at least `refresh_interval`. Returns the number of replayed snapshots.
    pub fn refresh_stale_views(&mut self, now: Instant) -> usize {
        let mut replayed = 0;
        for (node_id, snapshot) in &self.received_node_resources {
            let Some(node) = self.nodes.get_mut(node_id) else {
                continue;
            };
            if now.saturating_duration_since(node.view_modified_ts()) >= self.refresh_interval {
                log::debug!("Resetting local view of node {node_id} to last received snapshot");
                *node = Node::new(snapshot.clone());
                replayed += 1;
            }
        }
        replayed
    }

    #[inline]
    pub fn bundle_location_index(&self) -> &BundleLocationIndex {
        &self.bundle_location_index
    }

    #[inline]
    pub fn bundle_location_index_mut(&mut self) -> &mut BundleLocationIndex {
        &mut self.bundle_location_index
    }

    pub fn node_resource_view_string(&self, node_id: NodeId) -> String {
        self.get_node_resources_or_panic(node_id)
            .format_with(&self.resource_names)
    }

    pub fn debug_string(&self, max_num_nodes_to_include: Option<usize>) -> String {
        let mut node_ids: Vec<NodeId> = self.nodes.keys().copied().collect();
        node_ids.sort_unstable();
        let limit = max_num_nodes_to_include.unwrap_or(node_ids.len());

        let mut out = String::new();
        for node_id in node_ids.into_iter().take(limit) {
            writeln!(
                out,
                "node id: {node_id} {}",
                self.node_resource_view_string(node_id)
            )
            .unwrap();
        }
        write!(out, "{}", self.bundle_location_index).unwrap();
        out
    }
}
