use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, Command};
use std::net::IpAddr;
use std::path::PathBuf;
use tables_server::{ServerConfig, TableServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = Command::new("tables-server")
        .version(tables_server::VERSION)
        .about("Pushes random row mutations to every ready WebSocket client")
        .after_help(
            "Environment (all required):\n  \
             WS_PORT              listener port\n  \
             MESSAGES_PER_SECOND  events per second per connection\n  \
             NUM_ITEMS            ids and values are drawn from 0..NUM_ITEMS\n\n\
             Unset variables are read from the --env-file if it exists.",
        )
        .arg(
            Arg::new("host")
                .long("host")
                .default_value("0.0.0.0")
                .value_parser(value_parser!(IpAddr))
                .help("Address to bind"),
        )
        .arg(
            Arg::new("env-file")
                .long("env-file")
                .default_value(".env")
                .value_parser(value_parser!(PathBuf))
                .help("Dotenv file consulted for unset variables"),
        )
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .get_matches();

    tables_core::logging::init(matches.get_flag("json-logs"));

    let env_file = matches
        .get_one::<PathBuf>("env-file")
        .context("missing --env-file")?;
    let config =
        ServerConfig::from_env_with_file(env_file).context("reading server configuration")?;
    let host = matches
        .get_one::<IpAddr>("host")
        .copied()
        .context("missing --host")?;

    let server = TableServer::bind(config.clone(), host).await?;
    tracing::info!(
        "Listening on {} ({} msg/s, ids in 0..{})",
        server.local_addr()?,
        config.messages_per_second,
        config.num_items
    );

    server.run_until(shutdown_signal()).await?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
