use crate::Config;

use anyhow::{bail, Context, Result};
use clap::Parser;
use sqlmerge::{Engine, SchemaSet};
use sqlmerge_driver_sqlite::Connection;
use std::{fs, path::PathBuf};

#[derive(Parser, Debug)]
pub struct MergeCommand {
    /// Database records are merged into. It is never modified; the merge is
    /// written to a copy.
    target: PathBuf,

    /// Database records are read from
    secondary: PathBuf,

    /// Merge configuration file
    config: PathBuf,

    /// Where to write the merged database
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Replace the output file if it already exists
    #[arg(short, long)]
    force: bool,
}

impl MergeCommand {
    pub(crate) fn run(self, config: &Config) -> Result<()> {
        let output = self.output.clone().unwrap_or_else(|| config.output.clone());
        let force = self.force || config.force;

        let text = fs::read_to_string(&self.config)
            .with_context(|| format!("reading {}", self.config.display()))?;
        let schema = SchemaSet::parse(&text);

        for issue in schema.issues() {
            eprintln!("{issue}");
        }

        if schema.is_empty() {
            bail!("{} has no usable tables", self.config.display());
        }

        if !self.target.is_file() {
            bail!("target database {} does not exist", self.target.display());
        }

        let secondary = Connection::open_read_only(&self.secondary)
            .with_context(|| format!("opening {}", self.secondary.display()))?;

        if output.exists() {
            let existing = fs::canonicalize(&output)
                .with_context(|| format!("resolving {}", output.display()))?;

            for (role, input) in [("target", &self.target), ("secondary", &self.secondary)] {
                if fs::canonicalize(input).is_ok_and(|input| input == existing) {
                    bail!(
                        "output {} is the {role} database; choose another path",
                        output.display()
                    );
                }
            }

            if !force {
                bail!(
                    "{} already exists; pass --force to replace it",
                    output.display()
                );
            }
            fs::remove_file(&output)
                .with_context(|| format!("removing {}", output.display()))?;
        }

        fs::copy(&self.target, &output).with_context(|| {
            format!(
                "copying {} to {}",
                self.target.display(),
                output.display()
            )
        })?;
        tracing::info!(from = %self.target.display(), to = %output.display(), "copied target database");

        let target = Connection::open(&output)
            .with_context(|| format!("opening {}", output.display()))?;

        let mut engine = Engine::new(schema, target, secondary);
        let report = engine.run()?;

        println!("{report}");
        println!(
            "{} key mapping(s) recorded; merged database written to {}",
            engine.key_map().len(),
            output.display()
        );

        Ok(())
    }
}
