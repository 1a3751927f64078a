mod check;
mod config;
mod merge;

pub use check::CheckCommand;
pub use config::*;
pub use merge::MergeCommand;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// sqlmerge CLI library for building custom command-line tools
#[derive(Debug, Default)]
pub struct SqlMergeCli {
    config: Config,
}

impl SqlMergeCli {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new SqlMergeCli instance with a custom configuration
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse and execute CLI commands from command-line arguments
    pub fn parse_and_run(&self) -> Result<()> {
        let cli = Cli::parse();
        self.run(cli)
    }

    /// Parse and execute CLI commands from an iterator of arguments
    pub fn parse_from<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;
        self.run(cli)
    }

    fn run(&self, cli: Cli) -> Result<()> {
        let config = self.config.clone().verbose(self.config.verbose || cli.verbose);
        init_tracing(config.verbose);

        match cli.command {
            Command::Merge(cmd) => cmd.run(&config),
            Command::Check(cmd) => cmd.run(&config),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "sqlmerge")]
#[command(about = "Merge a secondary SQLite database into a target database")]
#[command(version)]
struct Cli {
    /// Log every statement and comparison
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Reconcile a secondary database into a copy of the target
    Merge(MergeCommand),

    /// Parse a merge configuration and describe every table
    Check(CheckCommand),
}

/// `RUST_LOG` wins when set; otherwise `info`, or `debug` when verbose.
/// Installing a second subscriber in the same process is a no-op.
fn init_tracing(verbose: bool) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) if !verbose => filter,
        _ if verbose => EnvFilter::new("debug"),
        _ => EnvFilter::new("info"),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
