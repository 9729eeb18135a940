mod cli;
mod server;
mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use reap::config::{ReapConfig, ServerConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reap", version, about = "Food diary assistant driven by LLM tool calling")]
struct Cli {
    /// Config file to load instead of ~/.reap/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the MCP server (transport from config)
    Serve,
    /// Write the tool parameter schemas as JSON files
    Schemas {
        /// Output directory
        #[arg(long, default_value = "schemas")]
        out: PathBuf,
    },
    /// Send one diary entry or question to the assistant
    Ask {
        /// UUID of the user
        #[arg(long)]
        user: String,
        /// Free-text input
        input: String,
    },
    /// List stored food records for a user
    Records {
        /// UUID of the user
        #[arg(long)]
        user: String,
        /// Only records whose name contains this text
        #[arg(long)]
        name: Option<String>,
    },
}

fn init_tracing(server: &ServerConfig) {
    // Log to stderr so stdout stays clean for MCP JSON-RPC.
    let filter =
        EnvFilter::try_new(&server.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if server.log_structured {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ReapConfig::load_from(path)?,
        None => ReapConfig::load()?,
    };

    init_tracing(&config.server);

    match cli.command {
        Command::Serve => {
            server::serve(config).await?;
        }
        Command::Schemas { out } => {
            cli::schemas::schemas(&out)?;
        }
        Command::Ask { user, input } => {
            cli::ask::ask(&config, &user, &input).await?;
        }
        Command::Records { user, name } => {
            cli::records::records(&config, &user, name).await?;
        }
    }

    Ok(())
}
