//! Flattening of the tag-indexed service catalog.

use std::collections::HashMap;

use shoal_client::{ClientError, Registry};
use shoal_common::ServiceInstance;

/// Flatten the catalog into one canonical list of service instances.
///
/// The registry indexes instances by tag, so an instance carrying N tags
/// is returned once per tag. Results are deduplicated by
/// `(node, service id)`: the first-seen copy is kept and tags observed on
/// later copies are folded into its tag list, so the kept entry ends up
/// with the union of observed tags. Services with no tags at all get a
/// single unfiltered fetch.
///
/// Any single fetch failure aborts the whole enumeration, unlike snapshot
/// capture and replay, which tolerate per-item failure: a partial flatten
/// would under-report the catalog without any sign something is missing.
pub fn flatten<R: Registry + ?Sized>(registry: &R) -> Result<Vec<ServiceInstance>, ClientError> {
    let names = registry.list_service_names()?;

    let mut instances: Vec<ServiceInstance> = Vec::new();
    let mut seen: HashMap<(String, String), usize> = HashMap::new();

    for (name, tags) in &names {
        if tags.is_empty() {
            absorb(
                registry.list_service_instances(name, None)?,
                &mut instances,
                &mut seen,
            );
            continue;
        }
        for tag in tags {
            absorb(
                registry.list_service_instances(name, Some(tag.as_str()))?,
                &mut instances,
                &mut seen,
            );
        }
    }

    Ok(instances)
}

fn absorb(
    batch: Vec<ServiceInstance>,
    instances: &mut Vec<ServiceInstance>,
    seen: &mut HashMap<(String, String), usize>,
) {
    for instance in batch {
        let identity = (instance.node.clone(), instance.service_id.clone());
        match seen.get(&identity) {
            Some(&at) => {
                let kept = &mut instances[at];
                for tag in &instance.service_tags {
                    if !kept.service_tags.contains(tag) {
                        kept.service_tags.push(tag.clone());
                    }
                }
            }
            None => {
                seen.insert(identity, instances.len());
                instances.push(instance);
            }
        }
    }
}
