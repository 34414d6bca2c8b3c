//! Shared in-memory `Registry` for the core tests.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};

use shoal_client::{ClientError, Registry, Result};
use shoal_common::{ClusterMember, KvEntry, ServiceInstance};

/// In-memory registry with scriptable failures and recorded writes.
#[derive(Default)]
pub struct MockRegistry {
    pub node_name: String,
    pub members: Vec<ClusterMember>,
    pub keys: Vec<KvEntry>,
    /// Service name → tags, as the catalog would report them.
    pub services: BTreeMap<String, Vec<String>>,
    /// (name, tag filter) → instances returned for that fetch.
    pub instances: HashMap<(String, Option<String>), Vec<ServiceInstance>>,

    pub fail_node_name: bool,
    pub fail_members: bool,
    pub fail_keys: bool,
    pub fail_names: bool,
    /// Fail the instance fetch for exactly this (name, tag) pair.
    pub fail_fetch: Option<(String, Option<String>)>,
    pub fail_put_keys: HashSet<String>,
    pub fail_register_ids: HashSet<String>,

    pub fetches: RefCell<Vec<(String, Option<String>)>>,
    pub puts: RefCell<Vec<KvEntry>>,
    pub registered: RefCell<Vec<ServiceInstance>>,
}

pub fn entry(key: &str, value: &[u8]) -> KvEntry {
    KvEntry {
        key: key.to_string(),
        value: value.to_vec(),
        ..Default::default()
    }
}

pub fn instance(node: &str, id: &str, name: &str, tags: &[&str]) -> ServiceInstance {
    ServiceInstance {
        node: node.to_string(),
        address: "10.0.0.1".to_string(),
        service_id: id.to_string(),
        service_name: name.to_string(),
        service_port: 80,
        service_tags: tags.iter().map(|t| t.to_string()).collect(),
        ..Default::default()
    }
}

pub fn member(name: &str, address: &str) -> ClusterMember {
    ClusterMember {
        name: name.to_string(),
        address: address.to_string(),
        port: 8301,
        status: 1,
        ..Default::default()
    }
}

fn refused(what: &str) -> ClientError {
    ClientError::Api {
        status: 500,
        message: format!("{what} unavailable"),
    }
}

impl Registry for MockRegistry {
    fn list_keys(&self, _prefix: &str) -> Result<Vec<KvEntry>> {
        if self.fail_keys {
            return Err(refused("kv"));
        }
        Ok(self.keys.clone())
    }

    fn put_key(&self, entry: &KvEntry) -> Result<()> {
        if self.fail_put_keys.contains(&entry.key) {
            return Err(refused("put"));
        }
        self.puts.borrow_mut().push(entry.clone());
        Ok(())
    }

    fn list_service_names(&self) -> Result<BTreeMap<String, Vec<String>>> {
        if self.fail_names {
            return Err(refused("catalog"));
        }
        Ok(self.services.clone())
    }

    fn list_service_instances(
        &self,
        name: &str,
        tag: Option<&str>,
    ) -> Result<Vec<ServiceInstance>> {
        let fetch = (name.to_string(), tag.map(String::from));
        self.fetches.borrow_mut().push(fetch.clone());
        if self.fail_fetch.as_ref() == Some(&fetch) {
            return Err(refused("fetch"));
        }
        Ok(self.instances.get(&fetch).cloned().unwrap_or_default())
    }

    fn register_service_instance(&self, instance: &ServiceInstance) -> Result<()> {
        if self.fail_register_ids.contains(&instance.service_id) {
            return Err(refused("register"));
        }
        self.registered.borrow_mut().push(instance.clone());
        Ok(())
    }

    fn list_members(&self) -> Result<Vec<ClusterMember>> {
        if self.fail_members {
            return Err(refused("members"));
        }
        Ok(self.members.clone())
    }

    fn local_node_name(&self) -> Result<String> {
        if self.fail_node_name {
            return Err(refused("agent"));
        }
        Ok(self.node_name.clone())
    }
}
