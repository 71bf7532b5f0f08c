// Adapters layer: concrete implementations for external systems (file system, HTTP).

pub mod generator;
pub mod storage;
