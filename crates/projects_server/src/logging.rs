use anyhow::Result;
use colored::Colorize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::{Config, LogFormat};

/// Initialize logging and tracing subsystem
pub fn init(config: &Config) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = Registry::default().with(env_filter);

    match config.log_format {
        LogFormat::Json => {
            // JSON formatting for structured logs
            let json_layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_thread_ids(true)
                .with_target(true)
                .with_file(true)
                .with_line_number(true);

            registry.with(json_layer).try_init()?;
        }
        LogFormat::Pretty => {
            registry.with(fmt::layer().with_target(false)).try_init()?;
        }
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Projects Server starting"
    );

    Ok(())
}

/// Print the startup banner
pub fn print_banner(config: &Config) {
    println!("{}", "━".repeat(60).bright_black());
    println!(
        "{} {}",
        "📁 Projects Server".bright_cyan().bold(),
        format!("v{}", env!("CARGO_PKG_VERSION")).bright_black()
    );
    println!(
        "   {} {}",
        "listening on".bright_black(),
        config.http_bind.to_string().bright_white()
    );
    println!("{}", "━".repeat(60).bright_black());
}

/// Print a one-line component status
pub fn log_status(icon: &str, component: &str, status: &str, ok: bool) {
    let status = if ok {
        status.bright_green().bold()
    } else {
        status.bright_red().bold()
    };
    println!("{} {:<20} {}", icon, component, status);
}

/// Log configuration
pub fn log_config(config: &Config) {
    tracing::info!(
        http_bind = %config.http_bind,
        log_level = %config.log_level,
        log_format = ?config.log_format,
        shutdown_timeout_secs = config.shutdown_timeout.as_secs(),
        "Service configuration loaded"
    );
}
