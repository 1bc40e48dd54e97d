use clap::Parser;

use crate::{
    bill,
    cli::{inventory::InventoryArgs, model::ModelArgs},
    prelude::*,
    tables::build_cost_table,
};

#[derive(Parser)]
pub struct PredictArgs {
    #[clap(flatten)]
    model: ModelArgs,

    #[clap(flatten)]
    inventory: InventoryArgs,
}

impl PredictArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let (encoder, model) = self.model.load()?;
        let appliances = self.inventory.load()?;
        let daily_costs = bill::predict_daily_costs(&model, &encoder, &appliances)?;
        println!("{}", build_cost_table(&appliances, &daily_costs));
        info!(monthly_bill = %bill::total_monthly(&daily_costs), "predicted");
        Ok(())
    }
}
