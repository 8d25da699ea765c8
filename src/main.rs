//! Profile API server binary
//!
//! # Usage
//! ```bash
//! profile-api --port 8080 --host 0.0.0.0
//! profile-api --config /etc/profile-api/config.toml --verbose
//! ```

use clap::Parser;

use profile_api::cli::{ServerArgs, run_server_mode};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "profile-api")]
struct Cli {
    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Configuration file path
    #[arg(long)]
    config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let args = ServerArgs {
        port: cli.port,
        host: cli.host,
        config: cli.config,
        verbose: cli.verbose,
    };

    if let Err(e) = run_server_mode(args).await {
        tracing::error!("Failed to run server: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    tracing::info!("All systems offline");
}
