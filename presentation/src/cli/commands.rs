//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for sma-assistant
#[derive(Parser, Debug)]
#[command(name = "sma-assistant")]
#[command(author, version, about = "Question answering about Spinal Muscular Atrophy")]
#[command(long_about = r#"
SMA Assistant answers questions about Spinal Muscular Atrophy using a hosted
language model. Off-topic questions are redirected without calling the model,
and every answer carries a confidence score.

Configuration is loaded from (in priority order):
1. SMA_<SECTION>__<KEY>   Environment variables
2. --config <path>        Explicit config file
3. ./sma.toml             Project-level config
4. ~/.config/sma-assistant/config.toml   Global config

Example:
  sma-assistant ask "What are the types of SMA?"
  sma-assistant serve --port 8080
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP API
    Serve {
        /// Address to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides server.port)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Answer one question and exit
    Ask {
        /// The question about SMA (answered without conversation history)
        question: String,

        /// Print the answer as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration and its sources
    Config,
}
