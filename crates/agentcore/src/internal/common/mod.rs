pub(crate) mod error;
pub(crate) mod ids;
pub(crate) mod index;
pub mod resources;
pub(crate) mod wrapped;

pub use wrapped::WrappedRcRefCell;

pub type Map<K, V> = hashbrown::HashMap<K, V, fxhash::FxBuildHasher>;
