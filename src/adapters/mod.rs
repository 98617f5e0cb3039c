//! Adapters - Concrete implementations of the ports.

pub mod ai;
pub mod store;
