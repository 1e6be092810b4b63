pub mod internal;

pub use crate::internal::common::ids::{NodeId, ObjectId};
pub use crate::internal::common::{Map, WrappedRcRefCell};

pub type Error = internal::common::error::AgentError;
pub type Result<T> = std::result::Result<T, Error>;

pub mod resources {
    pub use crate::internal::common::resources::{
        CPU_RESOURCE_ID, CPU_RESOURCE_NAME, GPU_RESOURCE_ID, GPU_RESOURCE_NAME, MEM_RESOURCE_ID,
        MEM_RESOURCE_NAME, OBJECT_STORE_MEM_RESOURCE_ID, OBJECT_STORE_MEM_RESOURCE_NAME,
        ResourceAmount, ResourceFractions, ResourceId, ResourceNameMap, ResourceRequest,
        ResourceSet, ResourceUnits,
    };

    pub use crate::internal::common::resources::amount::{
        FRACTIONS_MAX_DIGITS, FRACTIONS_PER_UNIT,
    };
}

pub mod cluster {
    pub use crate::internal::cluster::bundle::{
        BundleId, BundleIndex, BundleLocationIndex, PlacementGroupId,
    };
    pub use crate::internal::cluster::manager::{
        ClusterResourceManager, ClusterResourceManagerRef,
    };
    pub use crate::internal::cluster::node::{Node, NodeResources};
    pub use crate::internal::cluster::refresh::resource_view_refresh_process;
    pub use crate::internal::cluster::sync::{NormalTaskResourcesData, ResourceViewSyncMessage};
}

pub mod push {
    pub use crate::internal::push::manager::{
        PushId, PushManager, PushManagerRef, PushManagerStats,
    };
    pub use crate::internal::push::state::{ChunkCount, ChunkIndex, ChunkSendFn};
}

pub mod config {
    pub use crate::internal::configuration::{
        AgentConfiguration, DEFAULT_MAX_BYTES_IN_FLIGHT, DEFAULT_OBJECT_CHUNK_SIZE,
        DEFAULT_RESOURCE_VIEW_REFRESH_INTERVAL,
    };
}
