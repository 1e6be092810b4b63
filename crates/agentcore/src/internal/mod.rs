#[macro_use]
pub(crate) mod common;
pub mod cluster;
pub mod configuration;
pub mod push;

#[cfg(test)]
pub mod tests;
