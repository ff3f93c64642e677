use std::path::PathBuf;

use thiserror::Error;
use tilewalk_engine::{
    default_level_path, load_level_file, resolve_app_paths, LevelError, LoopConfig, Session,
    SessionConfig, StartupError,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::cli::{parse_args, CliCommand, CliError, CliOptions};
use super::config::{ConfigError, DemoConfig};

#[derive(Debug, Error)]
pub(crate) enum BootstrapError {
    #[error(transparent)]
    Cli(#[from] CliError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Paths(#[from] StartupError),
    #[error(transparent)]
    Level(#[from] LevelError),
}

pub(crate) struct AppWiring {
    pub(crate) loop_config: LoopConfig,
    pub(crate) session: Session,
    pub(crate) script: Option<PathBuf>,
}

pub(crate) enum Startup {
    Help,
    Run(AppWiring),
}

pub(crate) fn build_app<I>(args: I) -> Result<Startup, BootstrapError>
where
    I: IntoIterator<Item = String>,
{
    init_tracing();
    info!("=== Tilewalk Startup ===");

    match parse_args(args)? {
        CliCommand::Help => Ok(Startup::Help),
        CliCommand::Run(options) => wire(options).map(Startup::Run),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// CLI flags override the config file; the config file overrides defaults.
fn wire(options: CliOptions) -> Result<AppWiring, BootstrapError> {
    let config = match &options.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };
    let variant = options.variant.unwrap_or(config.variant);
    let level_path = resolve_level_path(&options, &config)?;
    let level = load_level_file(&level_path)?;

    let session_config = SessionConfig {
        layout: config.tile_layout(),
        viewport: config.viewport,
        ..variant.session_config()
    };
    let session = Session::start(session_config, level)?;
    let loop_config = LoopConfig {
        window_title: config
            .window_title
            .clone()
            .unwrap_or_else(|| variant.window_title().to_string()),
        echo_frames: config.echo_frames && !options.quiet,
    };
    info!(
        variant = variant.label(),
        level = %level_path.display(),
        "app_wired"
    );

    Ok(AppWiring {
        loop_config,
        session,
        script: options.script,
    })
}

fn resolve_level_path(options: &CliOptions, config: &DemoConfig) -> Result<PathBuf, StartupError> {
    if let Some(path) = &options.level {
        return Ok(path.clone());
    }
    match &config.level {
        Some(path) if path.is_absolute() => Ok(path.clone()),
        Some(path) => Ok(resolve_app_paths()?.root.join(path)),
        None => Ok(default_level_path(&resolve_app_paths()?)),
    }
}
