//! DevOps CLI - token and configuration tools for the gateway

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use devops_core::{SecurityConfig, TokenIssuer, TokenValidator};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "devops")]
#[command(about = "DevOps gateway - mint and inspect gateway credentials")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Issue or verify signed tokens
    Token {
        #[command(subcommand)]
        command: TokenCommands,
    },

    /// Inspect the security configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum TokenCommands {
    /// Issue a short-lived demo token
    Issue {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Token lifetime in seconds
        #[arg(long, default_value = "300")]
        ttl_secs: u64,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Verify a token and print its claims
    Verify {
        /// Token to verify
        token: String,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Validate the configuration without printing secrets
    Check {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("devops=debug")
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::Token { command } => match command {
            TokenCommands::Issue {
                config,
                ttl_secs,
                format,
            } => issue_command(config, ttl_secs, format),
            TokenCommands::Verify { token, config } => verify_command(token, config),
        },
        Commands::Config { command } => match command {
            ConfigCommands::Check { config } => check_command(config),
        },
    }
}

/// Load from file, else environment, else local development values
fn resolve_config(path: Option<PathBuf>) -> Result<(SecurityConfig, String)> {
    if let Some(path) = path {
        let config = SecurityConfig::load(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
        return Ok((config, path.display().to_string()));
    }

    match SecurityConfig::from_env() {
        Ok(config) => Ok((config, "environment".to_string())),
        Err(e) => {
            tracing::debug!("Environment configuration unavailable: {}", e);
            eprintln!(
                "{} No configuration found, using local development secrets",
                "!".yellow()
            );
            Ok((SecurityConfig::local_dev(), "local development defaults".to_string()))
        }
    }
}

fn issue_command(config: Option<PathBuf>, ttl_secs: u64, format: OutputFormat) -> Result<()> {
    let (config, _) = resolve_config(config)?;
    let issuer = TokenIssuer::new(&config).with_ttl(Duration::from_secs(ttl_secs));
    let token = issuer.issue()?;

    match format {
        OutputFormat::Text => println!("{}", token),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "token": token,
                "algorithm": config.jwt_algorithm.as_str(),
                "expiresIn": ttl_secs,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn verify_command(token: String, config: Option<PathBuf>) -> Result<()> {
    let (config, _) = resolve_config(config)?;
    let claims = TokenValidator::new(&config).validate(Some(token.trim()))?;

    println!("{} Token valid", "✓".green());
    println!("{}", serde_json::to_string_pretty(&claims)?);

    Ok(())
}

fn check_command(config: Option<PathBuf>) -> Result<()> {
    let (config, source) = resolve_config(config)?;
    config.validate()?;

    println!("{} Configuration valid", "✓".green());
    println!("{} Source: {}", "▸".blue(), source);
    println!("{} Algorithm: {}", "▸".blue(), config.jwt_algorithm);

    Ok(())
}
