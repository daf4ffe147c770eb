use anyhow::Result;
use clap::{Parser, Subcommand};
use std::time::Duration;
use zipaddr_acquire::{AddressConverter, EndpointConfig};
use zipaddr_model::PostalCode;

#[derive(Parser)]
#[command(name = "zipaddr")]
#[command(about = "Japanese postal code to address lookup tool")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_HASH"), ")"))]
struct Cli {
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "warn", value_enum)]
    log_level: LogLevel,

    /// Use UTC timestamps instead of local time
    #[arg(long, global = true)]
    utc: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a postal code into an address
    Lookup {
        /// 7-digit postal code, digits only (e.g., 2510025)
        code: String,

        /// Lookup endpoint to query
        #[arg(short, long, value_enum, default_value = "current")]
        endpoint: Endpoint,

        /// What to print
        #[arg(short, long, value_enum, default_value = "address")]
        output: OutputMode,

        /// Request timeout in seconds (transport default when omitted)
        #[arg(short, long)]
        timeout_secs: Option<u64>,
    },
}

#[derive(Clone, clap::ValueEnum)]
enum Endpoint {
    /// Current lookup page (UTF-8, one table row per candidate area)
    Current,
    /// Legacy lookup page (Shift_JIS, one free-text address line)
    Legacy,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputMode {
    /// Concatenated address of the first record
    Address,
    /// Concatenated address of every record, one per line
    Addresses,
    /// First record split into fields, tab-separated
    Split,
    /// All records with provenance, as JSON
    Records,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Map log level, suppressing noisy transport crates at debug/trace
    let level = match cli.log_level {
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug,hyper_util=warn,reqwest=warn",
        LogLevel::Trace => "trace,hyper_util=warn,reqwest=warn",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Timestamp format: 2026-02-14 19:44:09.123 -08:00
    let time_format = "%Y-%m-%d %H:%M:%S%.3f %:z";

    if cli.utc {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoUtc::new(time_format.to_string()))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_timer(tracing_subscriber::fmt::time::ChronoLocal::new(time_format.to_string()))
            .init();
    }

    match cli.command {
        Commands::Lookup {
            code,
            endpoint,
            output,
            timeout_secs,
        } => {
            anyhow::ensure!(
                code.len() == 7 && code.chars().all(|c| c.is_ascii_digit()),
                "postal code must be exactly 7 digits, got '{code}'"
            );

            let mut config = match endpoint {
                Endpoint::Current => EndpointConfig::multi_result(),
                Endpoint::Legacy => EndpointConfig::single_result(),
            };
            if let Some(secs) = timeout_secs {
                config.timeout = Some(Duration::from_secs(secs));
            }

            let converter = AddressConverter::over_http(config)?;
            let code = PostalCode::new(code);

            match output {
                OutputMode::Address => {
                    match converter.convert_address(&code).await? {
                        Some(address) => println!("{address}"),
                        None => tracing::warn!(code = %code, "No address published for this code"),
                    }
                }
                OutputMode::Addresses => {
                    let addresses = converter.convert_addresses(&code).await?;
                    if addresses.is_empty() {
                        tracing::warn!(code = %code, "No address published for this code");
                    }
                    for address in addresses {
                        println!("{address}");
                    }
                }
                OutputMode::Split => {
                    match converter.convert_split_address(&code).await? {
                        Some(parts) => println!("{}", parts.join("\t")),
                        None => tracing::warn!(code = %code, "No address published for this code"),
                    }
                }
                OutputMode::Records => {
                    let lookup = converter.lookup(&code).await?;
                    println!("{}", serde_json::to_string_pretty(&lookup)?);
                }
            }
        }
    }

    Ok(())
}
