//! DevOps Gateway HTTP Server binary

use anyhow::Context;
use devops_core::SecurityConfig;
use devops_server::logging::{self, LogFormat};
use devops_server::{router, AppState};
use std::net::SocketAddr;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_format = match std::env::var("LOG_FORMAT") {
        Ok(value) => value.parse()?,
        Err(_) => LogFormat::default(),
    };
    logging::init_logging(log_format)?;

    info!("Starting DevOps gateway v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;
    info!(algorithm = %config.jwt_algorithm, "Security configuration loaded");

    let app = router(AppState::new(&config));

    // Get bind address from environment or use default
    let addr: SocketAddr = std::env::var("BIND_ADDRESS")
        .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
        .parse()
        .context("Invalid BIND_ADDRESS")?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Server shutdown complete");
    Ok(())
}

/// `DEVOPS_CONFIG` file, then dev defaults if `DEVOPS_DEV_MODE` is set, then env secrets
fn load_config() -> anyhow::Result<SecurityConfig> {
    if let Ok(path) = std::env::var("DEVOPS_CONFIG") {
        info!("Loading configuration from {}", path);
        return SecurityConfig::load(&path)
            .with_context(|| format!("Failed to load configuration from {}", path));
    }

    let dev_mode = match std::env::var("DEVOPS_DEV_MODE") {
        Ok(value) => parse_flag(&value).context("Invalid DEVOPS_DEV_MODE")?,
        Err(_) => false,
    };
    if dev_mode {
        warn!("DEVOPS_DEV_MODE enabled: using local development secrets");
        return Ok(SecurityConfig::local_dev());
    }

    SecurityConfig::from_env().context("Failed to read security configuration from environment")
}

/// Boolean env flag; an unrecognized value is an error rather than `false`
fn parse_flag(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        other => Err(anyhow::anyhow!("expected true/false, got '{}'", other)),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received shutdown signal, shutting down gracefully...");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_true_values() {
        for value in ["true", "TRUE", "True", "1", "yes", "on", " true "] {
            assert!(parse_flag(value).unwrap(), "{}", value);
        }
    }

    #[test]
    fn test_parse_flag_false_values() {
        for value in ["false", "FALSE", "0", "no", "off", ""] {
            assert!(!parse_flag(value).unwrap(), "{}", value);
        }
    }

    #[test]
    fn test_parse_flag_rejects_unknown() {
        for value in ["treu", "enabled", "2", "y"] {
            assert!(parse_flag(value).is_err(), "{}", value);
        }
    }
}
