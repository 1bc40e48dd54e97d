use std::str::FromStr;

use clap::Parser;

use crate::{
    bill,
    cli::{inventory::InventoryArgs, model::ModelArgs},
    core::DeviceCategory,
    prelude::*,
    tables::build_cost_table,
};

#[derive(Parser)]
pub struct SimulateArgs {
    #[clap(flatten)]
    model: ModelArgs,

    #[clap(flatten)]
    inventory: InventoryArgs,

    /// Usage reductions, for example `Heater=25` for a 25% cut.
    #[clap(required = true, value_name = "CATEGORY=PERCENT")]
    cuts: Vec<UsageCut>,
}

/// One `CATEGORY=PERCENT` pair from the command line.
#[derive(Clone)]
pub struct UsageCut {
    category: DeviceCategory,
    share: f64,
}

impl FromStr for UsageCut {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (category, percent) = s
            .split_once('=')
            .with_context(|| format!("expected `CATEGORY=PERCENT`, got `{s}`"))?;
        let percent: f64 =
            percent.trim().parse().with_context(|| format!("`{percent}` is not a percentage"))?;
        ensure!((0.0..=100.0).contains(&percent), "the percentage must be within 0..=100");
        Ok(Self { category: category.trim().parse()?, share: percent / 100.0 })
    }
}

impl SimulateArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let (encoder, model) = self.model.load()?;
        let appliances = self.inventory.load()?;
        let daily_costs = bill::predict_daily_costs(&model, &encoder, &appliances)?;
        let initial_bill = bill::total_monthly(&daily_costs);

        let mut adjusted = appliances;
        for cut in &self.cuts {
            for appliance in
                adjusted.iter_mut().filter(|appliance| appliance.category == cut.category)
            {
                appliance.usage = appliance.usage * (1.0 - cut.share);
            }
        }
        let adjusted_costs = bill::predict_daily_costs(&model, &encoder, &adjusted)?;
        let adjusted_bill = bill::total_monthly(&adjusted_costs);

        println!("{}", build_cost_table(&adjusted, &adjusted_costs));
        info!(
            affected = adjusted.iter().filter(|appliance| appliance.is_adjusted()).count(),
            %initial_bill,
            %adjusted_bill,
            savings = %(initial_bill - adjusted_bill),
            "simulated"
        );
        Ok(())
    }
}
