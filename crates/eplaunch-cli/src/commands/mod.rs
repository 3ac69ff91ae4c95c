use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::path::PathBuf;

use eplaunch_config::{ConfigLoader, LaunchConfig, WarningSeverity, list_tasks};
use eplaunch_core::{LaunchError, Result};

mod doctor;
mod record;
mod setup;

/// Launch an episode recording: choose an operator, confirm, record.
#[derive(Parser)]
#[command(name = "eplaunch", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to eplaunch.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (e.g. debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Select an operator, confirm, write episode metadata, and run the recorder
    Record,
    /// List the tasks in the catalog
    Tasks,
    /// List the configured operators
    Operators,
    /// Show current configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Initialize a new eplaunch.toml in the current or home directory
    Init {
        /// Create in current directory instead of ~/.eplaunch/
        #[arg(long)]
        local: bool,
    },
    /// Check configuration, catalog, save folder, and recorder program
    Doctor,
    /// Generate shell completions for bash, zsh, or fish
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Run the selected command and return the process exit code.
    pub async fn run(self) -> Result<i32> {
        // Commands that must work without a usable config
        match self.command {
            Some(Commands::Init { local }) => {
                self.init_tracing(&LaunchConfig::default());
                return setup::cmd_init(local).map(|_| 0);
            }
            Some(Commands::Completions { shell }) => return Self::cmd_completions(shell).map(|_| 0),
            _ => {}
        }

        let config_loader = ConfigLoader::load(self.config.as_deref())?;
        let config = config_loader.get();
        self.init_tracing(&config);

        match self.command {
            None | Some(Commands::Record) => record::cmd_record(config).await,
            Some(Commands::Tasks) => Self::cmd_tasks(&config).map(|_| 0),
            Some(Commands::Operators) => Self::cmd_operators(&config).map(|_| 0),
            Some(Commands::Config { json }) => Self::cmd_config(&config, json).map(|_| 0),
            Some(Commands::Doctor) => doctor::cmd_doctor(&config, config_loader.path()),
            Some(Commands::Init { .. }) | Some(Commands::Completions { .. }) => Ok(0),
        }
    }

    /// Resolve log level: RUST_LOG > --verbose > --quiet > --log-level > config
    fn init_tracing(&self, config: &LaunchConfig) {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            self.log_level.as_deref().unwrap_or(&config.logging.level)
        };
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

        // Logs go to stderr so menus on stdout stay readable.
        match config.logging.format.as_str() {
            "json" => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .json()
                .with_target(true)
                .init(),
            "compact" => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .compact()
                .with_target(false)
                .init(),
            _ => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init(),
        }
    }

    fn cmd_tasks(config: &LaunchConfig) -> Result<()> {
        let path = config.catalog.resolved_path();
        let catalog = list_tasks(&path)?;
        if catalog.is_empty() {
            println!("No tasks in {}", path.display());
            return Ok(());
        }
        for (i, task) in catalog.tasks().iter().enumerate() {
            println!("{:>3}) {}", i + 1, task);
        }
        Ok(())
    }

    fn cmd_operators(config: &LaunchConfig) -> Result<()> {
        for (i, name) in config.operators.names.iter().enumerate() {
            println!("{:>3}) {}", i + 1, name);
        }
        Ok(())
    }

    fn cmd_config(config: &LaunchConfig, json: bool) -> Result<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(config)?);
        } else {
            let rendered = toml::to_string_pretty(config)
                .map_err(|e| eplaunch_core::LaunchError::Config(e.to_string()))?;
            println!("{rendered}");
        }
        for w in config.validate().unwrap_or_default() {
            if w.severity != WarningSeverity::Info {
                eprintln!("{w}");
            }
        }
        Ok(())
    }

    /// Follow-up advice printed under a fatal error, if any.
    pub fn error_hint(err: &LaunchError) -> Option<&'static str> {
        if err.is_config() {
            Some("Run `eplaunch doctor` to check the config, catalog, and recorder.")
        } else if matches!(err, LaunchError::Recorder { .. }) {
            Some("Check `recording.program` in eplaunch.toml or set EPLAUNCH_RECORDER.")
        } else {
            None
        }
    }

    fn cmd_completions(shell: Shell) -> Result<()> {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "eplaunch", &mut std::io::stdout());
        Ok(())
    }
}
