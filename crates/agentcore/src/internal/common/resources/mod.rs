pub mod amount;
pub mod map;
pub mod request;
pub mod set;

use crate::define_id_type;

pub use amount::{ResourceAmount, ResourceFractions, ResourceUnits};
pub use map::{
    CPU_RESOURCE_ID, CPU_RESOURCE_NAME, GPU_RESOURCE_ID, GPU_RESOURCE_NAME, MEM_RESOURCE_ID,
    MEM_RESOURCE_NAME, OBJECT_STORE_MEM_RESOURCE_ID, OBJECT_STORE_MEM_RESOURCE_NAME,
    ResourceNameMap,
};
pub use request::ResourceRequest;
pub use set::ResourceSet;

// Identifies one resource dimension (cpus, memory, gpus or a custom named resource).
define_id_type!(ResourceId, u32);
