use crate::internal::common::Map;
use crate::internal::common::resources::{
    OBJECT_STORE_MEM_RESOURCE_ID, ResourceNameMap, ResourceRequest, ResourceSet,
};
use std::fmt::Write;
use std::time::Instant;

/// Resource state of one cluster member.
///
/// Invariant: for every dimension `0 <= available <= total`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeResources {
    pub total: ResourceSet,
    pub available: ResourceSet,
    pub labels: Map<String, String>,
    pub object_pulls_queued: bool,
    pub is_draining: bool,
    pub draining_deadline_timestamp_ms: i64,
    pub idle_resource_duration_ms: i64,

    // Resources used by tasks that were not scheduled by this node (reported by the node itself)
    pub normal_task_resources: ResourceSet,
    pub latest_resources_normal_task_timestamp: i64,

    // When the view was last refreshed from a synchronization message
    pub last_resource_update_time: Option<Instant>,
}

impl NodeResources {
    pub fn new(total: ResourceSet, available: ResourceSet) -> Self {
        NodeResources {
            total,
            available,
            ..Default::default()
        }
    }

    /// Fully idle node: everything is available.
    pub fn from_total(total: ResourceSet) -> Self {
        Self::new(total.clone(), total)
    }

    /// The request could be satisfied by this node if it was empty.
    pub fn is_feasible(&self, request: &ResourceRequest) -> bool {
        request.matches_labels(&self.labels) && request.resource_set().is_subset_of(&self.total)
    }

    /// The request can be satisfied right now.
    pub fn is_available(
        &self,
        request: &ResourceRequest,
        ignore_object_store_memory_requirement: bool,
    ) -> bool {
        request.matches_labels(&self.labels)
            && request.resource_set().iter().all(|(id, demand)| {
                (ignore_object_store_memory_requirement && id == OBJECT_STORE_MEM_RESOURCE_ID)
                    || demand <= self.available.get(id)
            })
    }

    pub fn format_with(&self, names: &ResourceNameMap) -> String {
        let mut labels: Vec<_> = self.labels.iter().collect();
        labels.sort_unstable();
        let mut out = String::new();
        write!(
            out,
            "{{total: {}, available: {}, labels: {{",
            self.total.format_with(names),
            self.available.format_with(names)
        )
        .unwrap();
        for (i, (key, value)) in labels.into_iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            write!(out, "{key}: {value}").unwrap();
        }
        write!(
            out,
            "}}, is_draining: {}, draining_deadline_timestamp_ms: {}, \
             object_pulls_queued: {}, idle_resource_duration_ms: {}}}",
            self.is_draining,
            self.draining_deadline_timestamp_ms,
            self.object_pulls_queued,
            self.idle_resource_duration_ms
        )
        .unwrap();
        out
    }
}

/// Local view of one cluster member as seen by the scheduler.
#[derive(Debug, Clone)]
pub struct Node {
    local_view: NodeResources,
    local_view_modified_ts: Instant,
}

impl Node {
    pub fn new(resources: NodeResources) -> Self {
        Node {
            local_view: resources,
            local_view_modified_ts: Instant::now(),
        }
    }

    #[inline]
    pub fn local_view(&self) -> &NodeResources {
        &self.local_view
    }

    /// Access for mutation. It marks the view as modified even if the caller ends up
    /// not changing anything.
    pub fn local_view_mut(&mut self) -> &mut NodeResources {
        self.local_view_modified_ts = Instant::now();
        &mut self.local_view
    }

    #[inline]
    pub fn view_modified_ts(&self) -> Instant {
        self.local_view_modified_ts
    }
}
