//! CLI subcommand handlers — the application service layer.
//!
//! Each function drives one verb end to end: call the facade, run the
//! core, render output. Client construction and CLI parsing live in
//! `main.rs`/`config.rs`; presentation helpers in `format.rs`.

use std::io::Write;
use std::path::Path;

use anyhow::Context;

use shoal_client::{Registry, RegistryClient};
use shoal_common::{ClusterSnapshot, KvEntry};

use crate::{catalog, format, keyspace, snapshot};

// ── Backup ──────────────────────────────────────────────────────────

pub fn backup<R: Registry + ?Sized>(
    registry: &R,
    outfile: Option<&Path>,
    indent: bool,
) -> anyhow::Result<()> {
    let capture = snapshot::capture(registry);
    for failure in &capture.skipped {
        tracing::warn!(section = failure.section, error = %failure.error, "section not captured");
    }

    let doc = if indent {
        serde_json::to_vec_pretty(&capture.snapshot)
    } else {
        serde_json::to_vec(&capture.snapshot)
    }
    .context("could not serialize snapshot")?;

    match outfile {
        Some(path) => {
            std::fs::write(path, &doc)
                .with_context(|| format!("could not write {}", path.display()))?;
            tracing::info!(path = %path.display(), "backup written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&doc)?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

// ── Restore ─────────────────────────────────────────────────────────

pub fn restore<R: Registry + ?Sized>(registry: &R, file: &Path) -> anyhow::Result<()> {
    // Setup failures are fatal before the cluster is touched at all.
    let bytes =
        std::fs::read(file).with_context(|| format!("could not load {}", file.display()))?;
    let snapshot: ClusterSnapshot =
        serde_json::from_slice(&bytes).context("could not parse snapshot document")?;

    let report = snapshot::restore(registry, &snapshot);
    println!(
        "Restore complete: {} keys, {} services restored ({} failed)",
        report.keys_restored,
        report.services_restored,
        report.failures(),
    );
    Ok(())
}

// ── Key-value store ─────────────────────────────────────────────────

pub fn kv_list<R: Registry + ?Sized>(
    registry: &R,
    prefix: Option<&str>,
    recurse: bool,
    json: bool,
) -> anyhow::Result<()> {
    let prefix = prefix.unwrap_or("").trim_matches('/');
    let is_root = prefix.is_empty();
    let entries = registry.list_keys(prefix).context("could not list keys")?;

    if json {
        let listed: Vec<&KvEntry> = entries
            .iter()
            .filter(|e| keyspace::within_depth(&e.key, prefix, recurse))
            .collect();
        println!("{}", serde_json::to_string_pretty(&listed)?);
        return Ok(());
    }

    for line in keyspace::summarize(&entries, prefix, recurse, is_root) {
        println!("{line}");
    }
    Ok(())
}

pub fn kv_get(
    client: &RegistryClient,
    keys: &[String],
    recurse: bool,
    json: bool,
) -> anyhow::Result<()> {
    let mut results: Vec<KvEntry> = Vec::new();
    for key in keys {
        let key = key.trim_start_matches('/');
        if recurse {
            match client.list_keys(key) {
                Ok(entries) => results.extend(entries),
                Err(error) => tracing::debug!(key, %error, "could not list keys"),
            }
        } else {
            match client.get_key(key) {
                Ok(Some(entry)) => results.push(entry),
                Ok(None) => {}
                Err(error) => tracing::debug!(key, %error, "could not retrieve key"),
            }
        }
    }

    if results.is_empty() {
        anyhow::bail!("key not found");
    }

    if json {
        for entry in &results {
            println!("{}", format::entry_detail(entry)?);
        }
        return Ok(());
    }

    let mut stdout = std::io::stdout().lock();
    for entry in &results {
        stdout.write_all(&entry.value)?;
        stdout.write_all(b"\n")?;
    }
    Ok(())
}

pub fn kv_set<R: Registry + ?Sized>(
    registry: &R,
    key: &str,
    value: &str,
    flags: u64,
    quiet: bool,
) -> anyhow::Result<()> {
    let key = key.trim_start_matches('/');
    if key.is_empty() || value.is_empty() {
        anyhow::bail!("key or value is empty");
    }

    let entry = KvEntry {
        key: key.to_string(),
        value: value.as_bytes().to_vec(),
        flags,
        ..Default::default()
    };
    registry.put_key(&entry).context("could not set key")?;

    if !quiet {
        println!("Success");
    }
    Ok(())
}

// ── Service catalog ─────────────────────────────────────────────────

pub fn service_list<R: Registry + ?Sized>(registry: &R, json: bool) -> anyhow::Result<()> {
    let instances = catalog::flatten(registry).context("could not list services")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&instances)?);
    } else {
        format::service_table(&instances);
    }
    Ok(())
}
