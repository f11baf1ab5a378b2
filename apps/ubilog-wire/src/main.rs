mod commands;
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::error;
use ubilog_core::{Bits, Hash, U256};

use crate::commands::{
    build_message, decode_input, describe, parse_u256, render_encoded, MessageRequest,
};
use crate::config::WireConfig;

#[derive(Parser)]
#[command(author, version, about = "Encode and decode ubilog peer messages", long_about = None)]
struct Cli {
    /// Path to configuration file (.toml, .json, .yaml or .env)
    #[arg(long, short)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a message as a hex frame
    Encode {
        /// Print raw bit text instead of a hex frame
        #[arg(long)]
        bits: bool,
        #[command(subcommand)]
        message: EncodeCommands,
    },
    /// Decode a hex frame and print the message
    Decode {
        /// Treat the input as raw bit text
        #[arg(long)]
        bits: bool,
        input: String,
    },
    /// Print the resolved configuration
    Config,
}

#[derive(Subcommand)]
enum EncodeCommands {
    /// PutPeers; without arguments the configured peers are sent
    Peers { peers: Vec<String> },
    /// AskBlock for a block hash
    AskBlock { hash: Hash },
    /// PutBlock from a previous hash, timestamp and payload slices
    PutBlock {
        #[arg(long)]
        prev: Hash,
        #[arg(long, value_parser = parse_u256)]
        time: U256,
        /// Payload slice as bit text; repeatable
        #[arg(long = "slice")]
        slices: Vec<Bits>,
    },
    /// PutSlice from a work value and payload bits
    PutSlice {
        #[arg(long)]
        work: u64,
        #[arg(long)]
        data: Bits,
    },
}

impl From<EncodeCommands> for MessageRequest {
    fn from(cmd: EncodeCommands) -> Self {
        match cmd {
            EncodeCommands::Peers { peers } => MessageRequest::Peers(peers),
            EncodeCommands::AskBlock { hash } => MessageRequest::AskBlock(hash),
            EncodeCommands::PutBlock { prev, time, slices } => {
                MessageRequest::PutBlock { prev, time, slices }
            }
            EncodeCommands::PutSlice { work, data } => MessageRequest::PutSlice { work, data },
        }
    }
}

fn run(command: Commands, cfg: &WireConfig) -> Result<()> {
    match command {
        Commands::Encode { bits, message } => {
            let message = build_message(&MessageRequest::from(message), cfg)?;
            println!("{}", render_encoded(&message, bits)?);
        }
        Commands::Decode { bits, input } => {
            let message = decode_input(&input, bits)?;
            print!("{}", describe(&message));
        }
        Commands::Config => {
            let text = toml::to_string_pretty(cfg).context("failed to render config")?;
            print!("{text}");
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let cfg = match WireConfig::new(cli.config.clone()) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("config load failed: {err}");
            std::process::exit(2);
        }
    };

    let filter = std::env::var("UBILOG_LOG").unwrap_or_else(|_| cfg.log_level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(cli.command, &cfg) {
        error!("{err:#}");
        std::process::exit(1);
    }
}
