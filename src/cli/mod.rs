use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::infra::config::{mask_token, Config};
use crate::infra::mcp::RaindropSvc;

#[derive(Parser)]
#[command(name = "raindrop-mcp")]
#[command(about = "Raindrop.io bookmarks as MCP tools")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the MCP server (default; transport chosen by MODE)
    Serve,
    /// Load and validate configuration without starting the server
    Config,
    /// Health check a server-mode instance
    Health {
        /// Service URL to check
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// Call list-collections once and print the result
    Collections,
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    run_commands(cli.command.unwrap_or(Commands::Serve)).await
}

pub async fn run_commands(command: Commands) -> ExitCode {
    match command {
        Commands::Serve => match crate::infra::boot::run_server(Config::from_env()).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!(error = %e, "Fatal error in main()");
                ExitCode::FAILURE
            }
        },
        Commands::Config => {
            let cfg = Config::from_env();
            print_config(&cfg);
            match cfg.validate() {
                Ok(()) => {
                    println!("✅ Configuration is valid");
                    ExitCode::SUCCESS
                }
                Err(problems) => {
                    for p in problems {
                        eprintln!("❌ {p}");
                    }
                    ExitCode::FAILURE
                }
            }
        }
        Commands::Health { url } => match health_check(&url).await {
            Ok(()) => {
                println!("✅ Service is healthy");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Health check failed: {e}");
                ExitCode::FAILURE
            }
        },
        Commands::Collections => match list_collections(&Config::from_env()).await {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ list-collections failed: {e}");
                ExitCode::FAILURE
            }
        },
    }
}

fn print_config(cfg: &Config) {
    println!("📋 Configuration:");
    println!("  Mode: {}", cfg.mode);
    println!("  Port: {}", cfg.port);
    println!("  API base: {}", cfg.raindrop.base_url);
    println!(
        "  Token: {}",
        cfg.raindrop
            .token
            .as_deref()
            .map(mask_token)
            .unwrap_or_else(|| "Not configured".into())
    );
    println!("  Timeout: {} ms (connect {} ms)", cfg.raindrop.timeout_ms, cfg.raindrop.connect_timeout_ms);
    println!(
        "  Log Level: {}",
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into())
    );
}

async fn health_check(url: &str) -> anyhow::Result<()> {
    let response = reqwest::Client::new()
        .get(format!("{}/healthz", url.trim_end_matches('/')))
        .timeout(std::time::Duration::from_secs(2))
        .send()
        .await?;
    if response.status().is_success() {
        Ok(())
    } else {
        anyhow::bail!("HTTP {}", response.status())
    }
}

async fn list_collections(cfg: &Config) -> anyhow::Result<String> {
    let svc = RaindropSvc::from_config(&cfg.raindrop)?;
    let text = svc.registry().call("list-collections", &Default::default()).await?;
    Ok(text)
}
