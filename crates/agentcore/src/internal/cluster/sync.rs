use crate::internal::common::Map;
use serde::{Deserialize, Serialize};

/// Resource view of one node as periodically reported through the state synchronizer.
/// Resource maps are keyed by resource names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceViewSyncMessage {
    pub resources_total: Map<String, f64>,
    pub resources_available: Map<String, f64>,
    pub object_pulls_queued: bool,
    pub idle_duration_ms: i64,
    pub is_draining: bool,
    pub draining_deadline_timestamp_ms: i64,
}

/// Usage of resources by tasks that this node did not schedule, stamped by the reporting node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalTaskResourcesData {
    pub resources_normal_task: Map<String, f64>,
    pub resources_normal_task_timestamp: i64,
}
