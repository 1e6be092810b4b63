use crate::internal::common::Map;
use crate::internal::common::resources::{ResourceAmount, ResourceId, ResourceSet};

pub const CPU_RESOURCE_ID: ResourceId = ResourceId::new(0);
pub const MEM_RESOURCE_ID: ResourceId = ResourceId::new(1);
pub const GPU_RESOURCE_ID: ResourceId = ResourceId::new(2);
pub const OBJECT_STORE_MEM_RESOURCE_ID: ResourceId = ResourceId::new(3);

pub const CPU_RESOURCE_NAME: &str = "CPU";
pub const MEM_RESOURCE_NAME: &str = "memory";
pub const GPU_RESOURCE_NAME: &str = "GPU";
pub const OBJECT_STORE_MEM_RESOURCE_NAME: &str = "object_store_memory";

const PREDEFINED_RESOURCES: [&str; 4] = [
    CPU_RESOURCE_NAME,
    MEM_RESOURCE_NAME,
    GPU_RESOURCE_NAME,
    OBJECT_STORE_MEM_RESOURCE_NAME,
];

/// Registry of resource names.
///
/// Predefined resources always occupy the first ids; custom resources get the next free id
/// the first time their name is seen.
#[derive(Debug)]
pub struct ResourceNameMap {
    resource_names: Vec<String>,
    resource_ids: Map<String, ResourceId>,
}

impl Default for ResourceNameMap {
    fn default() -> Self {
        let mut map = ResourceNameMap {
            resource_names: Vec::new(),
            resource_ids: Map::default(),
        };
        for name in PREDEFINED_RESOURCES {
            map.get_or_allocate_resource_id(name);
        }
        map
    }
}

impl ResourceNameMap {
    pub fn get_or_allocate_resource_id(&mut self, name: &str) -> ResourceId {
        match self.resource_ids.get(name) {
            Some(&id) => id,
            None => {
                let id = ResourceId::new(self.resource_names.len() as u32);
                log::debug!("New resource registered '{name}' as {id}");
                self.resource_ids.insert(name.to_string(), id);
                self.resource_names.push(name.to_string());
                id
            }
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.resource_names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.resource_names.is_empty()
    }

    #[inline]
    pub fn get_index(&self, name: &str) -> Option<ResourceId> {
        self.resource_ids.get(name).copied()
    }

    #[inline]
    pub fn get_name(&self, id: ResourceId) -> Option<&str> {
        self.resource_names
            .get(id.as_num() as usize)
            .map(|s| s.as_str())
    }

    /// Converts a name-keyed map (as carried by synchronization records) into a [`ResourceSet`].
    /// Unknown names are registered; zero quantities are dropped.
    ///
    /// The map comes from a peer, so NaN is dropped, negative quantities are clamped to zero
    /// and huge ones to [`ResourceAmount::MAX`].
    pub fn resource_set_from_map(&mut self, map: &Map<String, f64>) -> ResourceSet {
        let mut set = ResourceSet::default();
        for (name, value) in map {
            let Some(amount) = ResourceAmount::try_from_f64(*value) else {
                log::warn!("Invalid amount of resource '{name}' ignored: {value}");
                continue;
            };
            if amount.is_negative() {
                log::warn!("Negative amount of resource '{name}' clamped to zero: {value}");
            }
            let id = self.get_or_allocate_resource_id(name);
            set.set(id, amount.max_zero());
        }
        set
    }
}
