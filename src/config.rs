use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use shoal_client::RegistryClient;

/// Default registry HTTP API endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8500";

#[derive(Parser, Debug)]
#[command(
    name = "shoal",
    version,
    about = "Operator CLI for a service-registry cluster"
)]
pub struct Cli {
    /// Registry HTTP API endpoint
    #[arg(
        long,
        short = 'a',
        env = "SHOAL_ENDPOINT",
        default_value = DEFAULT_ENDPOINT,
        global = true
    )]
    pub endpoint: String,

    /// Datacenter to scope queries and writes to
    #[arg(long, short = 'd', env = "SHOAL_DATACENTER", global = true)]
    pub datacenter: Option<String>,

    /// Access token sent with every request
    #[arg(long, short = 't', env = "SHOAL_TOKEN", global = true)]
    pub token: Option<String>,

    /// Output JSON instead of human-readable text
    #[arg(long, global = true)]
    pub json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "SHOAL_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Increase verbosity (-v = debug, -vv = trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Build the registry client from the global flags.
    pub fn client(&self) -> RegistryClient {
        RegistryClient::new(&self.endpoint)
            .with_datacenter(self.datacenter.clone())
            .with_token(self.token.clone())
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Capture cluster state (KV, services, members) to a JSON document
    Backup {
        /// Write the document to a file instead of stdout
        #[arg(long, short = 'o')]
        outfile: Option<PathBuf>,
        /// Pretty-print the document
        #[arg(long, short = 'i')]
        indent: bool,
    },
    /// Replay a previously captured snapshot against the cluster
    Restore {
        /// Snapshot document produced by `shoal backup`
        file: PathBuf,
    },
    /// Key-value store operations
    Kv {
        #[command(subcommand)]
        command: KvCommand,
    },
    /// Service catalog operations
    Service {
        #[command(subcommand)]
        command: ServiceCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum KvCommand {
    /// List keys under a prefix
    #[command(name = "ls", alias = "list")]
    List {
        /// Path prefix (defaults to the namespace root)
        prefix: Option<String>,
        /// Show deep keys instead of collapsing them
        #[arg(long, short = 'r')]
        recurse: bool,
    },
    /// Print the value of one or more keys
    Get {
        /// Keys to fetch
        #[arg(required = true)]
        keys: Vec<String>,
        /// Treat each key as a prefix and fetch everything under it
        #[arg(long, short = 'r')]
        recurse: bool,
    },
    /// Write a key's value
    Set {
        key: String,
        value: String,
        /// Client-defined flags stored with the key
        #[arg(long, default_value_t = 0)]
        flags: u64,
        /// Suppress the confirmation message
        #[arg(long, short = 'q')]
        quiet: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ServiceCommand {
    /// List the flattened service catalog
    #[command(name = "ls", alias = "list")]
    List,
}
