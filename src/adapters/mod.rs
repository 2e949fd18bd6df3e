// Adapters layer: concrete implementations for the store port and the HTTP surface.

pub mod client;
pub mod http;
pub mod memory_store;
