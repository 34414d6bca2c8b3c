use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single key/value entry as stored in the registry.
///
/// Field names on the wire are the registry API's PascalCase ones. The
/// index counters are registry-assigned and opaque to this tool; `flags`
/// is a client-defined integer stored verbatim with the key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KvEntry {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "CreateIndex", default)]
    pub create_index: u64,
    #[serde(rename = "ModifyIndex", default)]
    pub modify_index: u64,
    #[serde(rename = "LockIndex", default)]
    pub lock_index: u64,
    #[serde(rename = "Flags", default)]
    pub flags: u64,
    #[serde(rename = "Value", default, with = "crate::value::base64_bytes")]
    pub value: Vec<u8>,
    #[serde(rename = "Session", default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
}

/// One registered service instance on one node.
///
/// Identity within a flattened enumeration is `(node, service_id)`;
/// `service_tags` order is irrelevant for identity but preserved for
/// display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceInstance {
    #[serde(rename = "Node")]
    pub node: String,
    #[serde(rename = "Address", default)]
    pub address: String,
    #[serde(rename = "ServiceID")]
    pub service_id: String,
    #[serde(rename = "ServiceName")]
    pub service_name: String,
    #[serde(rename = "ServiceAddress", default)]
    pub service_address: String,
    #[serde(rename = "ServicePort", default)]
    pub service_port: u16,
    #[serde(rename = "ServiceTags", default)]
    pub service_tags: Vec<String>,
}

impl ServiceInstance {
    /// The address to show for this instance: the service-specific one
    /// when set, the node address otherwise.
    pub fn display_address(&self) -> &str {
        if self.service_address.is_empty() {
            &self.address
        } else {
            &self.service_address
        }
    }
}

/// A cluster member as reported by the membership protocol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterMember {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Addr")]
    pub address: String,
    #[serde(rename = "Port", default)]
    pub port: u16,
    #[serde(rename = "Status", default)]
    pub status: u8,
    #[serde(rename = "ProtocolMin", default)]
    pub protocol_min: u8,
    #[serde(rename = "ProtocolMax", default)]
    pub protocol_max: u8,
    #[serde(rename = "ProtocolCur", default)]
    pub protocol_cur: u8,
    #[serde(rename = "Tags", default)]
    pub tags: BTreeMap<String, String>,
}

/// An immutable point-in-time capture of cluster state.
///
/// Once built, the document is a standalone artifact: it owns copies of
/// every entry and has no relationship to the originating cluster. The
/// `kv` and `services` arrays are omitted entirely when empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterSnapshot {
    #[serde(default)]
    pub node_name: String,
    #[serde(default)]
    pub cluster_members: Vec<ClusterMember>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kv: Vec<KvEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<ServiceInstance>,
}
