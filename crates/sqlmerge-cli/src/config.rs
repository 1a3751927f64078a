use std::path::PathBuf;

/// Output file used when neither the command line nor the configuration
/// names one.
pub const DEFAULT_OUTPUT: &str = "merged.db";

/// Configuration for sqlmerge CLI operations
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the merged copy of the target database is written
    pub output: PathBuf,

    /// Replace an existing output file
    pub force: bool,

    /// Log at debug level
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            force: false,
            verbose: false,
        }
    }
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output path
    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
