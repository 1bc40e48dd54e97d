use std::{fs, path::PathBuf};

use clap::Parser;

use crate::{model::ModelFile, prelude::*};

#[derive(Parser)]
pub struct ForageArgs {
    /// Model parameter file URL.
    url: String,

    /// Where to save the downloaded model.
    #[clap(long, default_value = "model.toml")]
    output: PathBuf,
}

impl ForageArgs {
    #[instrument(skip_all, fields(url = %self.url))]
    pub fn run(self) -> Result {
        let contents = ModelFile::fetch(&self.url)?;
        fs::write(&self.output, contents)
            .with_context(|| format!("failed to write the model `{}`", self.output.display()))?;
        info!(path = %self.output.display(), "saved");
        Ok(())
    }
}
