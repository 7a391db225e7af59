use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;
use tables_client::{app, seed, ClientOptions, TerminalPainter};

fn cli() -> Command {
    Command::new("tables-client")
        .version(tables_client::VERSION)
        .about("Seeds a table, handshakes with the push server and renders live updates")
        .arg(
            Arg::new("url")
                .long("url")
                .default_value("ws://localhost:7770")
                .help("Push server WebSocket URL"),
        )
        .arg(
            Arg::new("query")
                .long("query")
                .help("Options as a query string, e.g. '?data=100&sort=yes'"),
        )
        .arg(
            Arg::new("data")
                .long("data")
                .help("Rows to seed (1-5000); 100 and 1000 use bundled files"),
        )
        .arg(
            Arg::new("refresh")
                .long("refresh")
                .help("Batched repaint period in ms (0-60000)"),
        )
        .arg(
            Arg::new("sort")
                .long("sort")
                .help("'yes' re-sorts and repaints on a timer instead of per event"),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .value_parser(value_parser!(PathBuf))
                .help("Read data100.json / data1k.json from here instead of the bundled copies"),
        )
        .arg(
            Arg::new("rows")
                .long("rows")
                .default_value("20")
                .value_parser(value_parser!(usize))
                .help("Rows drawn per repaint"),
        )
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
}

/// Query string first, then individual flags on top
fn options(matches: &ArgMatches) -> ClientOptions {
    let mut options = matches
        .get_one::<String>("query")
        .map(|query| ClientOptions::from_query(query))
        .unwrap_or_default();

    for key in ["data", "refresh", "sort"] {
        if let Some(value) = matches.get_one::<String>(key) {
            options.apply(key, value);
        }
    }
    options
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    tables_core::logging::init(matches.get_flag("json-logs"));

    let options = options(&matches);
    let url = matches
        .get_one::<String>("url")
        .context("missing --url")?;
    let data_dir = matches.get_one::<PathBuf>("data-dir");
    let visible = matches.get_one::<usize>("rows").copied().unwrap_or(20);

    let source = seed::source_for(options.data_size, data_dir.map(PathBuf::as_path))?;
    let painter = TerminalPainter::new(std::io::stdout(), visible);

    let reconciler = app::run(url, &options, source, painter, tokio::signal::ctrl_c())
        .await
        .context("client session failed")?;

    let stats = reconciler.stats();
    tracing::info!(
        "Final table: {} rows, {} frames drawn",
        reconciler.store().len(),
        reconciler.painter().frames()
    );
    tracing::debug!("Stats: {:?}", stats);
    Ok(())
}
