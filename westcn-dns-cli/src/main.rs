//! `westcn-dns`: manage west.cn DNS records from the command line.
//!
//! Credentials come from `--username` / `--api-password` or the
//! `WESTCN_USERNAME` / `WESTCN_API_PASSWORD` environment variables.
//! Logs go to stderr and are filtered with `RUST_LOG`.

mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use westcn_dns_provider::WestcnProvider;

use commands::RecordArgs;

#[derive(Parser)]
#[command(
    name = "westcn-dns",
    version,
    about = "Manage DNS records hosted at west.cn (西部数码)"
)]
struct Cli {
    /// West.cn account username
    #[arg(long, env = "WESTCN_USERNAME")]
    username: String,

    /// API password configured in the west.cn console
    #[arg(long, env = "WESTCN_API_PASSWORD", hide_env_values = true)]
    api_password: String,

    /// Override the API endpoint
    #[arg(long, env = "WESTCN_ENDPOINT")]
    endpoint: Option<String>,

    /// Transport-level retries for network errors
    #[arg(long, default_value_t = 0)]
    retries: u32,

    /// Print records as JSON instead of tab-separated text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all records in a zone
    Get {
        /// Zone, e.g. `example.com`
        zone: String,
    },
    /// Add a record without checking for existing ones
    Append(RecordArgs),
    /// Replace the matching record, or add it when none matches
    Set(RecordArgs),
    /// Delete the matching record
    Delete(RecordArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if commands::is_expected(&e) {
                tracing::warn!("{e:#}");
            } else {
                tracing::error!("{e:#}");
            }
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let token = CancellationToken::new();

    let mut builder = WestcnProvider::builder(cli.username, cli.api_password)
        .max_retries(cli.retries)
        .cancellation_token(token.clone());
    if let Some(endpoint) = cli.endpoint {
        builder = builder.endpoint(endpoint);
    }
    let provider = builder.build()?;

    // Ctrl-C 取消进行中的请求
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling in-flight request");
            token.cancel();
        }
    });

    let records = match cli.command {
        Command::Get { zone } => commands::get(&provider, &zone).await?,
        Command::Append(args) => commands::append(&provider, &args).await?,
        Command::Set(args) => commands::set(&provider, &args).await?,
        Command::Delete(args) => commands::delete(&provider, &args).await?,
    };

    commands::print_records(&records, cli.json)
}
