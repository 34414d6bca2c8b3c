//! Shared wire types for the shoal CLI and registry client.
//!
//! Everything here mirrors what the registry's HTTP API puts on the wire,
//! plus the snapshot document format produced by `shoal backup`.

pub mod types;
pub mod value;

pub use types::{ClusterMember, ClusterSnapshot, KvEntry, ServiceInstance};
