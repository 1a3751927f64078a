use crate::Config;

use anyhow::{bail, Context, Result};
use clap::Parser;
use sqlmerge::SchemaSet;
use std::{fs, path::PathBuf};

#[derive(Parser, Debug)]
pub struct CheckCommand {
    /// Merge configuration file
    config: PathBuf,
}

impl CheckCommand {
    pub(crate) fn run(self, _config: &Config) -> Result<()> {
        let text = fs::read_to_string(&self.config)
            .with_context(|| format!("reading {}", self.config.display()))?;
        let schema = SchemaSet::parse(&text);

        for table in schema.tables() {
            println!("{}", table.describe());
        }

        for issue in schema.issues() {
            eprintln!("{issue}");
        }

        let rejected = schema.rejected().count();
        if rejected > 0 {
            bail!(
                "{rejected} table(s) rejected in {}",
                self.config.display()
            );
        }

        println!("{} table(s) OK", schema.len());
        Ok(())
    }
}
