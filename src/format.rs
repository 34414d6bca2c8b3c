//! Human-readable CLI output formatting.
//!
//! Presentation only — `--json` output bypasses this module and goes
//! straight through serde.

use shoal_common::{KvEntry, ServiceInstance};

/// Print flattened catalog instances as aligned rows.
pub fn service_table(instances: &[ServiceInstance]) {
    println!(
        "{:<20} {:<20} {:<16} {:<18} {:>5}  {}",
        "ID", "NAME", "NODE", "ADDRESS", "PORT", "TAGS"
    );
    for instance in instances {
        println!(
            "{:<20} {:<20} {:<16} {:<18} {:>5}  {}",
            instance.service_id,
            instance.service_name,
            instance.node,
            instance.display_address(),
            instance.service_port,
            instance.service_tags.join(","),
        );
    }
}

/// Readable JSON rendering of one KV entry, value shown as text.
pub fn entry_detail(entry: &KvEntry) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&serde_json::json!({
        "Key": entry.key,
        "CreateIndex": entry.create_index,
        "ModifyIndex": entry.modify_index,
        "LockIndex": entry.lock_index,
        "Flags": entry.flags,
        "Value": String::from_utf8_lossy(&entry.value),
        "Session": entry.session.clone().unwrap_or_default(),
    }))
}
