//! HTTP client for a service-registry cluster.
//!
//! Uses blocking `ureq` — no async runtime dependency on the client path.
//! Every call is an atomic blocking operation that returns a value or a
//! `ClientError`; timeout policy lives here, not in the callers.

use std::collections::BTreeMap;
use std::time::Duration;

use shoal_common::{ClusterMember, KvEntry, ServiceInstance};

/// TCP connection timeout for API requests.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Read timeout for API requests.
const READ_TIMEOUT: Duration = Duration::from_secs(10);

/// Header carrying the access token, when one is configured.
const TOKEN_HEADER: &str = "X-Registry-Token";

// ── Error types ───────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Registry not reachable: {0}")]
    Unreachable(String),

    #[error("Registry returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;

// ── Facade ────────────────────────────────────────────────────────

/// The registry operations the rest of the tool is programmed against.
///
/// One blocking request per call; implementations own their timeout and
/// retry policy.
pub trait Registry {
    /// Recursive key listing under `prefix` (empty prefix lists the whole
    /// namespace), in lexicographic key order.
    fn list_keys(&self, prefix: &str) -> Result<Vec<KvEntry>>;

    /// Write one key's value and flags.
    fn put_key(&self, entry: &KvEntry) -> Result<()>;

    /// Service name → tags, in deterministic name order.
    fn list_service_names(&self) -> Result<BTreeMap<String, Vec<String>>>;

    /// Instances of `name` matching `tag`, or all instances when `tag`
    /// is `None`.
    fn list_service_instances(&self, name: &str, tag: Option<&str>)
        -> Result<Vec<ServiceInstance>>;

    /// Register one instance in the catalog under its own node.
    fn register_service_instance(&self, instance: &ServiceInstance) -> Result<()>;

    fn list_members(&self) -> Result<Vec<ClusterMember>>;

    /// Name of the node the connected agent runs on.
    fn local_node_name(&self) -> Result<String>;
}

// ── Client ────────────────────────────────────────────────────────

pub struct RegistryClient {
    endpoint: String,
    datacenter: Option<String>,
    token: Option<String>,
    agent: ureq::Agent,
}

impl RegistryClient {
    pub fn new(endpoint: &str) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout_read(READ_TIMEOUT)
            .build();
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            datacenter: None,
            token: None,
            agent,
        }
    }

    /// Scope all queries and writes to a datacenter.
    pub fn with_datacenter(mut self, datacenter: Option<String>) -> Self {
        self.datacenter = datacenter;
        self
    }

    /// Send an access token with every request.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Exact single-key read. `None` when the key does not exist.
    pub fn get_key(&self, key: &str) -> Result<Option<KvEntry>> {
        match self.request("GET", &kv_path(key)).call() {
            Ok(resp) => {
                let mut entries: Vec<KvEntry> = resp
                    .into_json()
                    .map_err(|e| ClientError::Decode(e.to_string()))?;
                if entries.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(entries.remove(0)))
                }
            }
            Err(ureq::Error::Status(404, _)) => Ok(None),
            Err(e) => Err(map_error(e)),
        }
    }

    // ── Private helpers ───────────────────────────────────────────

    fn request(&self, method: &str, path: &str) -> ureq::Request {
        let url = format!("{}{path}", self.endpoint);
        let mut req = self.agent.request(method, &url);
        if let Some(dc) = &self.datacenter {
            req = req.query("dc", dc);
        }
        if let Some(token) = &self.token {
            req = req.set(TOKEN_HEADER, token);
        }
        req
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.request("GET", path).call().map_err(map_error)?;
        resp.into_json()
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

impl Registry for RegistryClient {
    fn list_keys(&self, prefix: &str) -> Result<Vec<KvEntry>> {
        let req = self.request("GET", &kv_path(prefix)).query("recurse", "true");
        match req.call() {
            Ok(resp) => resp
                .into_json()
                .map_err(|e| ClientError::Decode(e.to_string())),
            // The registry answers 404 for a prefix with no entries.
            Err(ureq::Error::Status(404, _)) => Ok(Vec::new()),
            Err(e) => Err(map_error(e)),
        }
    }

    fn put_key(&self, entry: &KvEntry) -> Result<()> {
        let mut req = self.request("PUT", &kv_path(&entry.key));
        if entry.flags != 0 {
            req = req.query("flags", &entry.flags.to_string());
        }
        let resp = req.send_bytes(&entry.value).map_err(map_error)?;
        resp.into_string()
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(())
    }

    fn list_service_names(&self) -> Result<BTreeMap<String, Vec<String>>> {
        self.get_json("/v1/catalog/services")
    }

    fn list_service_instances(
        &self,
        name: &str,
        tag: Option<&str>,
    ) -> Result<Vec<ServiceInstance>> {
        let mut req = self.request("GET", &format!("/v1/catalog/service/{name}"));
        if let Some(tag) = tag {
            req = req.query("tag", tag);
        }
        let resp = req.call().map_err(map_error)?;
        resp.into_json()
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    fn register_service_instance(&self, instance: &ServiceInstance) -> Result<()> {
        let mut body = serde_json::json!({
            "Node": instance.node,
            "Address": instance.address,
            "Service": {
                "ID": instance.service_id,
                "Service": instance.service_name,
                "Tags": instance.service_tags,
                "Port": instance.service_port,
                "Address": instance.service_address,
            },
        });
        if let Some(dc) = &self.datacenter {
            body["Datacenter"] = serde_json::Value::String(dc.clone());
        }
        self.request("PUT", "/v1/catalog/register")
            .send_json(body)
            .map_err(map_error)?;
        Ok(())
    }

    fn list_members(&self) -> Result<Vec<ClusterMember>> {
        self.get_json("/v1/agent/members")
    }

    fn local_node_name(&self) -> Result<String> {
        let json: serde_json::Value = self.get_json("/v1/agent/self")?;
        json.get("Config")
            .and_then(|c| c.get("NodeName"))
            .and_then(|v| v.as_str())
            .map(String::from)
            .ok_or_else(|| ClientError::Decode("missing Config.NodeName in agent response".into()))
    }
}

// ── Error helpers ─────────────────────────────────────────────────

fn kv_path(key: &str) -> String {
    format!("/v1/kv/{}", key.trim_start_matches('/'))
}

fn map_error(e: ureq::Error) -> ClientError {
    match e {
        ureq::Error::Status(status, resp) => {
            let message = resp.into_string().unwrap_or_default();
            ClientError::Api { status, message }
        }
        ureq::Error::Transport(t) => ClientError::Unreachable(t.to_string()),
    }
}
