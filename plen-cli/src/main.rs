mod cli;
mod commands;
mod config;
mod error;
mod output;

use crate::{
    cli::{Args, Commands},
    commands::CommandExecutor,
    config::AppConfig,
    error::Result,
    output::OutputManager,
};
use clap::Parser;
#[cfg(feature = "colored-output")]
use colored::*;
use playlist_length::extractor::error::RunFailure;
use std::process;
use tracing::{Level, error, info};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        error!("Application error: {}", e);
        #[cfg(feature = "colored-output")]
        {
            eprintln!("{} {}", "Error:".red().bold(), e);
        }
        #[cfg(not(feature = "colored-output"))]
        {
            eprintln!("Error: {}", e);
        }
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet)?;

    if !args.quiet {
        eprintln!("plen {} - playlist watch-time calculator", env!("CARGO_PKG_VERSION"));
    }

    // Load configuration
    let config = AppConfig::load(args.config.as_deref())?;

    info!("Starting plen with config file: {:?}", args.config);

    match args.command {
        Commands::Calc {
            url,
            start,
            end,
            output,
            output_file,
            api_key,
        } => {
            let executor = if args.proxy.is_some()
                || args.proxy_username.is_some()
                || args.proxy_password.is_some()
            {
                CommandExecutor::new_with_proxy(
                    config,
                    args.proxy,
                    args.proxy_username,
                    args.proxy_password,
                )
            } else {
                CommandExecutor::new(config)
            }
            .with_timeout(args.timeout)
            .with_concurrency(args.concurrency)
            .with_progress(!args.quiet);

            let format = executor.output_format(output);
            let result = executor
                .calculate(url, start, end, api_key, output_file.as_deref(), format)
                .await;

            if let Err(e) = result {
                if format.is_json() {
                    error!("Application error: {}", e);
                    let failure = RunFailure {
                        kind: e.kind(),
                        message: e.to_string(),
                    };
                    let output = OutputManager::new(false).format_failure(&failure, &format)?;
                    print!("{output}");
                    process::exit(1);
                }
                return Err(e);
            }
        }

        Commands::Completions { shell } => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Args::command();
            let bin_name = cmd.get_name().to_string();
            generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
        }

        Commands::Config { show, reset } => {
            if reset {
                AppConfig::reset(args.config.as_deref())?;
                println!("✓ Configuration reset to defaults");
            } else if show {
                println!("{}", config.show()?);
            } else {
                println!(
                    "Use --show to display current configuration or --reset to reset to defaults"
                );
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) -> Result<()> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(verbose),
        )
        .with(filter)
        .init();

    Ok(())
}
