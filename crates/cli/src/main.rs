mod commands;
mod serve;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::hash_password::cmd_hash_password;
use crate::commands::types::cmd_types;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Docket record-tracking toolchain.
#[derive(Parser)]
#[command(name = "docket", version, about = "Docket record-tracking toolchain")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP JSON API server
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8080")]
        port: u16,
        /// JSON file of designations and users to pre-load
        #[arg(long)]
        seed: Option<PathBuf>,
        /// TLS certificate path (requires --tls-key; `tls` feature)
        #[arg(long)]
        tls_cert: Option<PathBuf>,
        /// TLS private key path (requires --tls-cert; `tls` feature)
        #[arg(long)]
        tls_key: Option<PathBuf>,
    },

    /// List the registered record types
    Types,

    /// Hash a password for seeding the users collection
    HashPassword {
        /// The plaintext password to hash
        password: String,
    },
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{{\"error\": \"{}\"}}", msg.replace('"', "\\\""));
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            seed,
            tls_cert,
            tls_key,
        } => {
            // Validate TLS flags: both must be provided or neither
            if tls_cert.is_some() != tls_key.is_some() {
                eprintln!("error: --tls-cert and --tls-key must both be provided");
                process::exit(1);
            }
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                )
                .init();
            let rt = tokio::runtime::Runtime::new().expect("failed to create tokio runtime");
            if let Err(e) = rt.block_on(serve::start_server(port, seed, tls_cert, tls_key)) {
                eprintln!("Server error: {}", e);
                process::exit(1);
            }
        }
        Commands::Types => {
            cmd_types(cli.output, cli.quiet);
        }
        Commands::HashPassword { password } => {
            cmd_hash_password(&password, cli.output, cli.quiet);
        }
    }
}
