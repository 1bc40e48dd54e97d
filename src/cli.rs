mod forage;
mod inventory;
mod model;
mod predict;
mod simulate;
mod trim;
mod whistle;

use clap::{Parser, Subcommand};

use crate::cli::{
    forage::ForageArgs,
    predict::PredictArgs,
    simulate::SimulateArgs,
    trim::TrimArgs,
    whistle::WhistleArgs,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Predict per-appliance costs and the monthly bill.
    #[clap(name = "predict")]
    Predict(Box<PredictArgs>),

    /// Main command: trim usage and power until the bill fits the budget.
    #[clap(name = "trim")]
    Trim(Box<TrimArgs>),

    /// Exit with an error when the predicted bill exceeds the budget.
    #[clap(name = "whistle")]
    Whistle(Box<WhistleArgs>),

    /// Preview what-if usage cuts without touching the inventory.
    #[clap(name = "simulate")]
    Simulate(Box<SimulateArgs>),

    /// Download a model parameter file.
    #[clap(name = "forage")]
    Forage(Box<ForageArgs>),
}
