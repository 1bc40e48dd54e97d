use std::path::PathBuf;

use clap::Parser;

use crate::{core::Appliance, inventory, prelude::*};

#[derive(Parser)]
pub struct InventoryArgs {
    /// Path to the appliance inventory.
    #[clap(long = "appliances", env = "APPLIANCES_PATH", default_value = "appliances.json")]
    path: PathBuf,
}

impl InventoryArgs {
    pub fn load(&self) -> Result<Vec<Appliance>> {
        inventory::load(&self.path)
    }

    pub fn save(&self, appliances: &[Appliance]) -> Result {
        inventory::save(&self.path, appliances)
    }
}
