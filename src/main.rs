use clap::Parser;
use shroud::cli::{Cli, Commands};
use shroud::config::load_config_or_default;
use shroud::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // The logging section lives in the app config, so load it before
    // the subscriber goes up
    let config = match load_config_or_default(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            process::exit(2);
        }
    };

    // The guard keeps the non-blocking file appender flushing until exit
    let log_level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.application.log_level);
    let logging_guard = match init_logging(log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        "Shroud - JSON PII analysis and redaction tool"
    );

    // Execute command and get exit code
    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5 // Fatal error exit code
        }
    };

    // process::exit skips destructors, so flush buffered file records first
    drop(logging_guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Analyze(args) => args.execute(&cli.config).await,
        Commands::Classify(args) => args.execute(&cli.config).await,
        Commands::Redact(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
