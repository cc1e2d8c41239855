//! CLI entrypoint for SMA Assistant
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use sma_application::AnswerPipeline;
use sma_domain::Question;
use sma_infrastructure::{
    ConfigLoader, FileConfig, GeminiGateway, GeminiSettings, JsonlAnswerLogger,
    SystemPromptLoader,
};
use sma_presentation::{AnswerSpinner, ApiState, Cli, Command, ConsoleFormatter, api_router, serve};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.clone();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(config_path.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {e}"))?
    };

    let _log_guard = init_logging(cli.verbose, &config);

    let issues = config.validate();
    if !issues.is_empty() {
        let list: Vec<String> = issues.iter().map(|issue| format!("  - {issue}")).collect();
        bail!("Invalid configuration:\n{}", list.join("\n"));
    }

    match cli.command {
        Command::Serve { host, port } => {
            let mut config = config;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            run_serve(&config).await
        }
        Command::Ask { question, json } => run_ask(&config, &question, json).await,
        Command::Config => show_config(&config, cli.no_config, config_path.as_deref()),
    }
}

/// Initialize logging.
///
/// Filter priority: `RUST_LOG`, then `logging.level`, then `-v` count.
/// When `logging.dir` is set, a daily rolling file receives the same events.
fn init_logging(verbose: u8, config: &FileConfig) -> Option<WorkerGuard> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let directive = config.logging.level.as_deref().unwrap_or(default_level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    let (file_layer, guard) = match &config.logging.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "sma-assistant.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    guard
}

/// Assemble the answer pipeline from configuration.
fn build_pipeline(config: &FileConfig) -> Result<AnswerPipeline> {
    let pipeline_config = config.to_pipeline_config()?;

    let settings = GeminiSettings::from_config(&config.provider)?;
    info!("Using model {}", settings.model);
    let gateway = Arc::new(GeminiGateway::new(settings)?);

    let prompt = SystemPromptLoader::new().load(&config.prompt.system_prompt_file)?;

    let mut pipeline = AnswerPipeline::from_config(gateway, prompt, &pipeline_config);
    if let Some(path) = &config.logging.transcript
        && let Some(logger) = JsonlAnswerLogger::new(path)
    {
        info!("Writing answer transcript to {}", logger.path().display());
        pipeline = pipeline.with_answer_logger(Arc::new(logger));
    }

    Ok(pipeline)
}

async fn run_serve(config: &FileConfig) -> Result<()> {
    let pipeline = Arc::new(build_pipeline(config)?);
    let router = api_router(ApiState::new(pipeline), &config.server.cors_origins);

    info!("Starting SMA Assistant API");
    serve(&config.server.bind_address(), router)
        .await
        .with_context(|| format!("Server failed on {}", config.server.bind_address()))
}

async fn run_ask(config: &FileConfig, question: &str, json: bool) -> Result<()> {
    let question = Question::parse(question, None)?;
    let pipeline = build_pipeline(config)?;

    let spinner = AnswerSpinner::start("Thinking...", !json);
    let answer = pipeline.answer(&question).await;
    spinner.finish();

    let output = if json {
        ConsoleFormatter::format_json(&answer)
    } else {
        ConsoleFormatter::format(&answer)
    };
    println!("{}", output);

    Ok(())
}

fn show_config(config: &FileConfig, no_config: bool, config_path: Option<&Path>) -> Result<()> {
    if no_config {
        println!("Configuration files disabled (--no-config); using built-in defaults.");
    } else {
        println!("Configuration sources (in priority order):");
        for line in ConfigLoader::describe_sources(config_path) {
            println!("{}", line);
        }
    }
    println!();

    let mut shown = config.clone();
    if shown.provider.api_key.is_some() {
        shown.provider.api_key = Some("********".to_string());
    }
    print!("{}", toml::to_string_pretty(&shown)?);

    Ok(())
}
