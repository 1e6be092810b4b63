use crate::NodeId;
use crate::define_id_type;
use crate::internal::common::Map;
use std::fmt;

define_id_type!(PlacementGroupId, u64);

pub type BundleIndex = u32;
pub type BundleId = (PlacementGroupId, BundleIndex);

/// Where the bundles of placement groups were placed.
///
/// Maintained by the placement-group subsystem; the cluster resource manager only owns it
/// and prints it into its debug output.
#[derive(Debug, Default)]
pub struct BundleLocationIndex {
    locations: Map<BundleId, NodeId>,
}

impl BundleLocationIndex {
    pub fn add_bundle_location(&mut self, bundle_id: BundleId, node_id: NodeId) {
        self.locations.insert(bundle_id, node_id);
    }

    pub fn get_bundle_location(&self, bundle_id: BundleId) -> Option<NodeId> {
        self.locations.get(&bundle_id).copied()
    }

    /// Returns the number of erased bundles.
    pub fn erase_bundle_locations_on_node(&mut self, node_id: NodeId) -> usize {
        let before = self.locations.len();
        self.locations.retain(|_, n| *n != node_id);
        before - self.locations.len()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl fmt::Display for BundleLocationIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut locations: Vec<_> = self.locations.iter().collect();
        locations.sort_unstable();
        write!(f, "Bundle locations: [")?;
        for (i, ((group_id, index), node_id)) in locations.into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{group_id}/{index} -> {node_id}")?;
        }
        write!(f, "]")
    }
}
