//! Cluster snapshot capture and replay.

use shoal_client::{ClientError, Registry};
use shoal_common::ClusterSnapshot;

use crate::catalog;

/// One capture section that could not be read.
#[derive(Debug)]
pub struct SectionFailure {
    pub section: &'static str,
    pub error: ClientError,
}

/// Result of a capture: the snapshot plus any sections left empty.
#[derive(Debug)]
pub struct Capture {
    pub snapshot: ClusterSnapshot,
    pub skipped: Vec<SectionFailure>,
}

/// Capture cluster state through the facade.
///
/// The four reads are independent: a failed read leaves its field at the
/// empty default and is recorded in `skipped`; the capture itself never
/// aborts. The flattener stays fail-fast internally, so a single fetch
/// error surfaces here as the whole services section being skipped.
pub fn capture<R: Registry + ?Sized>(registry: &R) -> Capture {
    let mut snapshot = ClusterSnapshot::default();
    let mut skipped = Vec::new();
    let mut skip = |section: &'static str, error: ClientError| {
        skipped.push(SectionFailure { section, error });
    };

    match registry.local_node_name() {
        Ok(name) => snapshot.node_name = name,
        Err(error) => skip("node_name", error),
    }

    match registry.list_members() {
        Ok(members) => snapshot.cluster_members = members,
        Err(error) => skip("cluster_members", error),
    }

    match registry.list_keys("") {
        Ok(entries) => snapshot.kv = entries,
        Err(error) => skip("kv", error),
    }

    match catalog::flatten(registry) {
        Ok(instances) => snapshot.services = instances,
        Err(error) => skip("services", error),
    }

    Capture { snapshot, skipped }
}

/// Outcome of a restore replay.
#[derive(Debug, Default, PartialEq)]
pub struct RestoreReport {
    pub keys_restored: usize,
    pub services_restored: usize,
    pub failed_keys: Vec<String>,
    pub failed_services: Vec<String>,
}

impl RestoreReport {
    pub fn failures(&self) -> usize {
        self.failed_keys.len() + self.failed_services.len()
    }
}

/// Replay a snapshot against the cluster, entry by entry.
///
/// Keys are replayed in snapshot order, then service registrations. Each
/// entry gets exactly one attempt; a failed write is logged with the
/// offending identifier, counted in the report, and never stops the
/// replay. No read-back verification happens here.
pub fn restore<R: Registry + ?Sized>(registry: &R, snapshot: &ClusterSnapshot) -> RestoreReport {
    let mut report = RestoreReport::default();

    for entry in &snapshot.kv {
        tracing::debug!(key = %entry.key, "restoring key");
        match registry.put_key(entry) {
            Ok(()) => report.keys_restored += 1,
            Err(error) => {
                tracing::warn!(key = %entry.key, %error, "could not restore key");
                report.failed_keys.push(entry.key.clone());
            }
        }
    }

    for instance in &snapshot.services {
        tracing::debug!(service = %instance.service_id, "restoring service");
        match registry.register_service_instance(instance) {
            Ok(()) => report.services_restored += 1,
            Err(error) => {
                tracing::warn!(service = %instance.service_id, %error, "could not restore service");
                report.failed_services.push(instance.service_id.clone());
            }
        }
    }

    report
}
