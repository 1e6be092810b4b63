pub mod bundle;
pub mod manager;
pub mod node;
pub mod refresh;
pub mod sync;
