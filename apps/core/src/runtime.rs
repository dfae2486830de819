use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use thiserror::Error;

use crate::app_state::{AppState, ServiceError};
use crate::config::{self, ConfigError};
use crate::host::SystemHost;
use crate::logging::{self, LoggingError};
use crate::transport::handle_json;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
    #[error("service error: {0}")]
    Service(#[from] ServiceError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeOptions {
    pub config_path: Option<PathBuf>,
    pub log_level: Option<String>,
}

pub fn parse_cli_args(args: &[String]) -> Result<RuntimeOptions, String> {
    let mut options = RuntimeOptions::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let value = iter.next().ok_or("--config requires a path")?;
                options.config_path = Some(PathBuf::from(value));
            }
            "--log-level" => {
                let value = iter.next().ok_or("--log-level requires a value")?;
                options.log_level = Some(value.clone());
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(options)
}

/// Loads config, then serves one JSON request per stdin line until EOF,
/// writing one JSON response per stdout line.
pub fn run_with_options(options: RuntimeOptions) -> Result<(), RuntimeError> {
    let config = config::load(options.config_path.as_deref())?;
    if !config.config_path.exists() {
        config::save(&config)?;
    }

    let level = options
        .log_level
        .clone()
        .unwrap_or_else(|| config.log_level.clone());
    let _log_guard = logging::init(&level)?;
    tracing::info!(
        hotkey = %config.hotkey,
        config_path = %config.config_path.display(),
        api_base_url = %config.api_base(),
        "startup"
    );

    let mut host = SystemHost::new(config.max_window_height);
    let mut state = AppState::open(config)?;
    state.start(&mut host);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    serve(stdin.lock(), &mut stdout, &mut state, &mut host)?;

    tracing::info!("stdin closed; shutting down");
    Ok(())
}

pub fn serve<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    state: &mut AppState,
    host: &mut SystemHost,
) -> Result<(), RuntimeError> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_json(state, host, &line);
        writeln!(output, "{response}")?;
        output.flush()?;
    }
    Ok(())
}
