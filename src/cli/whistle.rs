use clap::Parser;

use crate::{
    bill,
    cli::{inventory::InventoryArgs, model::ModelArgs},
    prelude::*,
    quantity::cost::Cost,
};

#[derive(Parser)]
pub struct WhistleArgs {
    #[clap(flatten)]
    model: ModelArgs,

    #[clap(flatten)]
    inventory: InventoryArgs,

    /// Maximum monthly bill before the whistle blows.
    #[clap(long, env = "MAX_MONTHLY_BILL")]
    max_monthly_bill: Cost,
}

impl WhistleArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let (encoder, model) = self.model.load()?;
        let appliances = self.inventory.load()?;
        let daily_costs = bill::predict_daily_costs(&model, &encoder, &appliances)?;
        let monthly_bill = bill::total_monthly(&daily_costs);
        ensure!(
            monthly_bill <= self.max_monthly_bill,
            "the predicted bill {monthly_bill} exceeds the budget {}",
            self.max_monthly_bill,
        );
        info!(%monthly_bill, "under the budget");
        Ok(())
    }
}
