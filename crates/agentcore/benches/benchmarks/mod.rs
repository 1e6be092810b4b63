pub mod cluster;
pub mod push;
