use std::{fs, path::PathBuf, sync::atomic::AtomicBool};

use chrono::Local;
use clap::Parser;

use crate::{
    bill,
    cli::{inventory::InventoryArgs, model::ModelArgs},
    core::{Balancer, DEFAULT_MAX_ITERATIONS},
    prelude::*,
    quantity::cost::Cost,
    report::SavingsReport,
    tables::build_adjustment_table,
};

#[derive(Parser)]
pub struct TrimArgs {
    #[clap(flatten)]
    model: ModelArgs,

    #[clap(flatten)]
    inventory: InventoryArgs,

    /// Maximum monthly bill to fit into.
    #[clap(long, env = "MAX_MONTHLY_BILL")]
    max_monthly_bill: Cost,

    /// Maximum reduction iterations per phase.
    #[clap(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Print the adjustments without writing the inventory back (dry run).
    #[clap(long)]
    dry_run: bool,

    /// Write a plain-text savings report to the given path.
    #[clap(long)]
    report: Option<PathBuf>,
}

impl TrimArgs {
    #[instrument(skip_all)]
    pub fn run(self, cancellation_flag: &AtomicBool) -> Result {
        let (encoder, model) = self.model.load()?;
        let appliances = self.inventory.load()?;
        let daily_costs = bill::predict_daily_costs(&model, &encoder, &appliances)?;

        let report = Balancer::builder()
            .model(&model)
            .encoder(&encoder)
            .threshold(self.max_monthly_bill)
            .max_iterations(self.max_iterations)
            .cancellation_flag(cancellation_flag)
            .balance(&appliances, &daily_costs)?;
        info!(
            status = ?report.status,
            adjustments = report.ledger.len(),
            initial_bill = %report.initial_monthly_bill,
            final_bill = %report.final_monthly_bill,
            "balanced"
        );
        if report.ledger.is_empty() {
            info!("no adjustments were needed");
        } else {
            println!("{}", build_adjustment_table(&report));
        }

        if let Some(path) = &self.report {
            let rendered = SavingsReport {
                report: &report,
                threshold: self.max_monthly_bill,
                generated_at: Local::now(),
            };
            fs::write(path, rendered.to_string())
                .with_context(|| format!("failed to write the report `{}`", path.display()))?;
            info!(path = %path.display(), "saved the report");
        }

        if self.dry_run {
            info!("dry run, the inventory is left untouched");
        } else if !report.ledger.is_empty() {
            self.inventory.save(&report.appliances)?;
        }
        Ok(())
    }
}
