//! Candy Mint CLI - sale state, confirmations and the mint page server
//!
//! # Commands
//!
//! ```bash
//! candy-mint serve --dist ../frontend/dist   # Start HTTP server (port 3000)
//! candy-mint state                           # Print the candy machine sale state
//! candy-mint confirm <signature>             # Wait for a mint transaction
//! ```

use candy_mint::{load_config, ConsoleSink, RpcClient};
use candy_mint_core::classify::{classify_error, classify_status};
use candy_mint_core::{MintConfig, NotificationSink, PublicKey, SaleState, Severity, TxId};
use chrono::{TimeZone, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "candy-mint")]
#[command(about = "Sale state, confirmations and mint page server for a Candy Machine", long_about = None)]
struct Cli {
    /// Read configuration from this file instead of .env
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Override SOLANA_RPC_HOST
    #[arg(long, global = true)]
    rpc: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Built front-end to serve
        #[arg(short, long)]
        dist: Option<PathBuf>,
    },

    /// Print the sale state of a candy machine
    State {
        /// Candy machine id (default: CANDY_MACHINE_ID)
        #[arg(short, long)]
        id: Option<String>,

        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// Wait for a mint transaction and print the outcome
    Confirm {
        /// Transaction signature
        signature: String,

        /// Give up after this many milliseconds (default: TX_TIMEOUT_MS)
        #[arg(short, long)]
        timeout_ms: Option<u64>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = candy_mint::api::logs::init() {
        eprintln!("⚠️  Logger already installed: {}", e);
    }

    let cli = Cli::parse();

    let result = match load(&cli) {
        Ok(config) => match cli.command {
            Commands::Serve { port, dist } => cmd_serve(config, port, dist).await,
            Commands::State { id, json } => cmd_state(&config, id, json).await,
            Commands::Confirm {
                signature,
                timeout_ms,
            } => cmd_confirm(&config, &signature, timeout_ms).await,
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn load(cli: &Cli) -> Result<MintConfig, Box<dyn std::error::Error>> {
    let config = load_config(cli.env_file.as_deref())?;
    Ok(match cli.rpc {
        Some(ref rpc) => config.with_rpc_host(rpc.clone()),
        None => config,
    })
}

async fn cmd_serve(
    config: MintConfig,
    port: u16,
    dist: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    candy_mint::server::start_server(config, port, dist).await
}

async fn cmd_state(
    config: &MintConfig,
    id: Option<String>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let id = id.map(PublicKey::new).unwrap_or_else(|| config.candy_machine_id.clone());
    eprintln!("🍬 Reading candy machine: {}", id);

    let client = RpcClient::from_config(config);
    let state = client.fetch_sale_state(&id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        print_state(&state);
    }
    Ok(())
}

fn print_state(state: &SaleState) {
    let status = if state.is_sold_out {
        "SOLD OUT"
    } else if state.is_active {
        "LIVE"
    } else {
        "NOT LIVE"
    };

    println!("📄 {} ({})", state.candy_machine_id, status);
    println!("   Remaining: {} / {}", state.items_remaining, state.items_available);
    println!("   Redeemed:  {}", state.items_redeemed);
    match state.token_mint {
        Some(ref mint) => println!("   Price:     {} (token {})", state.price, mint.short()),
        None => println!("   Price:     {} SOL", state.price_sol()),
    }
    if let Some(date) = state.go_live_date.and_then(|ts| Utc.timestamp_opt(ts, 0).single()) {
        println!("   Go live:   {}", date.to_rfc2822());
    }
    if state.is_presale {
        println!("   Presale:   whitelist holders only");
    }
    if let Some(network) = state.gatekeeper_network() {
        println!("   Gatekeeper: {}", network.short());
    }
    println!("   Treasury:  {}", state.treasury);
}

async fn cmd_confirm(
    config: &MintConfig,
    signature: &str,
    timeout_ms: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let timeout = timeout_ms.map(Duration::from_millis).unwrap_or_else(|| config.tx_timeout());
    let tx_id = TxId::new(signature);
    eprintln!("⏳ Waiting up to {}ms for {}", timeout.as_millis(), tx_id);

    let client = RpcClient::from_config(config);
    let verdict = match client.await_confirmation(&tx_id, timeout, true).await {
        Ok(status) => classify_status(&status),
        Err(e) => classify_error(&e),
    };

    let sink = ConsoleSink::new();
    sink.show(verdict.notification.clone());
    if verdict.reload {
        eprintln!("↻ Sale state changed, reload the mint page");
    }

    if verdict.notification.severity == Severity::Error {
        std::process::exit(1);
    }
    Ok(())
}
