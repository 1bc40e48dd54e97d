#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

mod bill;
mod cli;
mod core;
mod fmt;
mod inventory;
mod model;
mod prelude;
mod quantity;
mod report;
mod tables;

use std::sync::{Arc, atomic::AtomicBool};

use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command},
    prelude::*,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    let cancellation_flag = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&cancellation_flag))?;
    signal_hook::flag::register(signal_hook::consts::SIGTERM, Arc::clone(&cancellation_flag))?;

    match Args::parse().command {
        Command::Predict(args) => args.run()?,
        Command::Trim(args) => args.run(&cancellation_flag)?,
        Command::Whistle(args) => args.run()?,
        Command::Simulate(args) => args.run()?,
        Command::Forage(args) => args.run()?,
    }

    info!("done!");
    Ok(())
}
