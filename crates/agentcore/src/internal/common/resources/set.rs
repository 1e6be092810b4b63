use crate::internal::common::resources::map::ResourceNameMap;
use crate::internal::common::resources::{ResourceAmount, ResourceId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;
use std::ops::{AddAssign, SubAssign};

/// Ordered mapping from resource dimension to quantity.
///
/// A dimension with zero quantity is never stored, so two sets are equal iff they
/// have the same nonzero quantities. Negative quantities can appear after `-=` and are
/// kept until [`ResourceSet::remove_negative`] is called.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ResourceSet {
    resources: BTreeMap<ResourceId, ResourceAmount>,
}

impl ResourceSet {
    pub fn new(resources: impl IntoIterator<Item = (ResourceId, ResourceAmount)>) -> Self {
        let mut set = ResourceSet::default();
        for (id, amount) in resources {
            set.set(id, amount);
        }
        set
    }

    #[inline]
    pub fn get(&self, id: ResourceId) -> ResourceAmount {
        self.resources
            .get(&id)
            .copied()
            .unwrap_or(ResourceAmount::ZERO)
    }

    pub fn set(&mut self, id: ResourceId, amount: ResourceAmount) {
        if amount.is_zero() {
            self.resources.remove(&id);
        } else {
            self.resources.insert(id, amount);
        }
    }

    #[inline]
    pub fn has(&self, id: ResourceId) -> bool {
        self.resources.contains_key(&id)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceId, ResourceAmount)> + '_ {
        self.resources.iter().map(|(id, amount)| (*id, *amount))
    }

    /// Drops every dimension whose quantity went below zero.
    pub fn remove_negative(&mut self) {
        self.resources.retain(|_, amount| !amount.is_negative());
    }

    /// Returns true if every dimension of `self` fits into `other`.
    pub fn is_subset_of(&self, other: &ResourceSet) -> bool {
        self.iter().all(|(id, amount)| amount <= other.get(id))
    }

    pub fn format_with(&self, names: &ResourceNameMap) -> String {
        let mut out = String::from("{");
        for (i, (id, amount)) in self.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            match names.get_name(id) {
                Some(name) => write!(out, "{name}: {amount}"),
                None => write!(out, "#{id}: {amount}"),
            }
            .unwrap();
        }
        out.push('}');
        out
    }
}

impl AddAssign<&ResourceSet> for ResourceSet {
    fn add_assign(&mut self, rhs: &ResourceSet) {
        for (id, amount) in rhs.iter() {
            let value = self.get(id) + amount;
            self.set(id, value);
        }
    }
}

impl SubAssign<&ResourceSet> for ResourceSet {
    fn sub_assign(&mut self, rhs: &ResourceSet) {
        for (id, amount) in rhs.iter() {
            let value = self.get(id) - amount;
            self.set(id, value);
        }
    }
}
