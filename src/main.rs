mod catalog;
mod commands;
mod config;
mod format;
mod keyspace;
mod snapshot;
#[cfg(test)]
mod testutil;

use clap::Parser;

use config::{Cli, Command, KvCommand, ServiceCommand};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let client = cli.client();
    match &cli.command {
        Command::Backup { outfile, indent } => {
            commands::backup(&client, outfile.as_deref(), *indent)
        }
        Command::Restore { file } => commands::restore(&client, file),
        Command::Kv { command } => match command {
            KvCommand::List { prefix, recurse } => {
                commands::kv_list(&client, prefix.as_deref(), *recurse, cli.json)
            }
            KvCommand::Get { keys, recurse } => {
                commands::kv_get(&client, keys, *recurse, cli.json)
            }
            KvCommand::Set {
                key,
                value,
                flags,
                quiet,
            } => commands::kv_set(&client, key, value, *flags, *quiet),
        },
        Command::Service { command } => match command {
            ServiceCommand::List => commands::service_list(&client, cli.json),
        },
    }
}

/// Initialize logging on stderr so command output owns stdout.
fn init_logging(cli: &Cli) {
    let level = match cli.verbose {
        0 => cli.log_level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_new(level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
