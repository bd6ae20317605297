//! Team member directory - Entry Point

use clap::Parser;
use roster::config::{
    apply_cli_overrides, apply_env_overrides, load_config_with_precedence, merge_config,
    validate_config, CliOverrides, ConfigError, KeyBindings, ResolvedConfig,
};
use roster::model::AppError;
use roster::source::HttpMemberSource;
use roster::state::{AppState, DirectoryConfig, PaginationSettings};
use roster::view::{ColorConfig, Palette};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// How long shutdown waits for an in-flight page fetch before abandoning it.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(200);

/// Team member directory with incremental loading
#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(version)]
#[command(about = "Browse a team member directory that loads more members as you scroll")]
pub struct Args {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Base URL of the member endpoint (serves /users)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Members requested per page
    #[arg(long, value_name = "N")]
    pub page_size: Option<usize>,

    /// Rows from the bottom at which the next page is requested
    #[arg(long, value_name = "ROWS")]
    pub threshold: Option<usize>,

    /// Artificial delay before each page fetch, in milliseconds
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    /// Flags that override the config file and environment.
    fn cli_overrides(&self) -> CliOverrides {
        CliOverrides {
            base_url: self.base_url.clone(),
            page_size: self.page_size,
            scroll_threshold: self.threshold,
            fetch_delay_ms: self.delay_ms,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    run(args)?;
    Ok(())
}

/// Resolve configuration with full precedence chain:
/// Defaults → Config File → Env Vars → CLI Args
fn resolve_config(args: &Args) -> Result<ResolvedConfig, ConfigError> {
    let config_file = load_config_with_precedence(args.config.clone())?;
    let merged = merge_config(config_file);
    let with_env = apply_env_overrides(merged);
    validate_config(apply_cli_overrides(with_env, args.cli_overrides()))
}

fn run(args: Args) -> Result<(), AppError> {
    let config = resolve_config(&args)?;

    roster::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("roster-fetch")
        .enable_all()
        .build()
        .map_err(AppError::Runtime)?;

    let source = HttpMemberSource::new(&config.base_url).map_err(|e| ConfigError::InvalidValue {
        key: "base_url".to_string(),
        reason: e.to_string(),
    })?;
    info!(url = %source.users_url(), "Member source ready");

    let directory = DirectoryConfig {
        source: Arc::new(source),
        settings: PaginationSettings {
            page_size: config.page_size,
            fetch_delay: config.fetch_delay,
        },
        scroll_threshold: config.scroll_threshold,
        runtime: runtime.handle().clone(),
    };

    let palette = Palette::with_color_config(ColorConfig::from_env_and_args(args.no_color));
    let result = roster::view::run_app(AppState::new(directory), KeyBindings::default(), palette);

    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    info!("Exiting");

    result.map_err(AppError::from)
}
