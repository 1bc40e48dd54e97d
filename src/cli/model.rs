use std::path::PathBuf;

use clap::Parser;

use crate::{
    model::{FeatureEncoder, LinearModel, ModelFile},
    prelude::*,
};

#[derive(Parser)]
pub struct ModelArgs {
    /// Path to the fitted model parameters.
    #[clap(long = "model", env = "MODEL_PATH", default_value = "model.toml")]
    path: PathBuf,
}

impl ModelArgs {
    pub fn load(&self) -> Result<(FeatureEncoder, LinearModel)> {
        ModelFile::load(&self.path)?.into_parts()
    }
}
