//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `domain_health` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use domain_health::initialization::{init_crypto_provider, init_logger_with};
use domain_health::{grouping, run_scan, run_scheduled, whois, Config, LogFormat, LogLevel};

#[derive(Parser)]
#[command(name = "domain_health", version, about = "Domain and certificate expiry monitor")]
struct Cli {
    /// Log level
    #[arg(long, value_enum, default_value = "info", global = true)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Query WHOIS for a single domain
    Whois {
        /// Domain or hostname to query
        host: String,
        /// Print the raw server response instead of the parsed record
        #[arg(long)]
        original: bool,
    },
    /// Probe the TLS certificate of a single host
    Ssl {
        /// Hostname, optionally with port (defaults to 443)
        host: String,
    },
    /// Scan every hostname listed in a file and print summary tables
    Scan {
        /// File with one hostname per line
        file: PathBuf,
    },
    /// Scan on a fixed interval and push alerts to a webhook
    Cron {
        /// File with one hostname per line
        #[arg(long, default_value = "domains.txt")]
        file: PathBuf,

        /// Seconds between scans
        #[arg(long, default_value_t = 24 * 60 * 60)]
        interval_secs: u64,

        /// Webhook URL for markdown alert push
        #[arg(long)]
        webhook: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;
    init_crypto_provider();

    if let Err(e) = run(cli).await {
        eprintln!("domain_health error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Whois { host, original } => {
            let domain = grouping::parse_one(&host)?;
            let rows = whois::query(&domain.name).await?;
            if original {
                for row in &rows {
                    println!("{}", row);
                }
            } else {
                whois::parse(&rows)?.print();
            }
            Ok(())
        }
        Command::Ssl { host } => {
            let info = domain_health::tls::probe(&host).await?;
            info.print();
            Ok(())
        }
        Command::Scan { file } => {
            let report = run_scan(&file).await?;
            println!(
                "Scanned {} domain{} in {:.1}s ({} failure{})",
                report.domains.len(),
                if report.domains.len() == 1 { "" } else { "s" },
                report.elapsed_seconds,
                report.stats.total(),
                if report.stats.total() == 1 { "" } else { "s" },
            );
            Ok(())
        }
        Command::Cron {
            file,
            interval_secs,
            webhook,
        } => {
            let config = Config {
                file,
                log_level: cli.log_level,
                log_format: cli.log_format,
                webhook,
                interval_secs,
            };
            run_scheduled(&config).await
        }
    }
}
