//! Live logging of game datagrams.

use std::time::Duration;

use anyhow::Result;
use f1_telemetry_recorder::{RecorderConfig, run_logger};
use tracing::{info, warn};

use crate::commands::RecordArgs;
use crate::error::CliError;
use crate::output;

/// Environment config with command-line overrides on top.
pub fn resolve_config(args: &RecordArgs, base: RecorderConfig) -> Result<RecorderConfig> {
    let mut config = base;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(port) = args.port {
        if port == 0 {
            return Err(CliError::InvalidConfiguration("--port must be > 0".to_string()).into());
        }
        config = config.with_port(port);
    }
    if let Some(dir) = &args.log_dir {
        config.log_dir = dir.clone();
    }
    if config.bind_addr.port() == 0 {
        return Err(CliError::InvalidConfiguration(format!(
            "bind address {} has no port",
            config.bind_addr
        ))
        .into());
    }
    Ok(config)
}

pub async fn execute(args: &RecordArgs, json: bool) -> Result<()> {
    let config = resolve_config(args, RecorderConfig::from_env())?;
    let duration = args.duration.map(Duration::from_secs);

    let shutdown = async move {
        match duration {
            Some(limit) => tokio::time::sleep(limit).await,
            None => {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    warn!(error = %e, "failed to listen for Ctrl-C, stopping");
                }
            }
        }
        info!("stopping logger");
    };

    if !json {
        println!(
            "Listening for telemetry on {} (logs in {}), Ctrl-C to stop",
            config.bind_addr,
            config.log_dir.display()
        );
    }
    let summary = run_logger(&config, shutdown).await?;
    output::print_logger_summary(&summary, json);
    Ok(())
}
