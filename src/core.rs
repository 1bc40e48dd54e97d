mod appliance;
mod balancer;
mod budget;
mod classifier;
mod ledger;

pub use self::{
    appliance::{
        Appliance, DEFAULT_HUMIDITY_PERCENT, DEFAULT_TEMPERATURE_CELSIUS, DeviceCategory, OnOff,
        Room,
    },
    balancer::{BalanceReport, BalanceStatus, Balancer, DEFAULT_MAX_ITERATIONS},
    budget::BudgetSplit,
    classifier::PolicyClass,
    ledger::AdjustmentLedger,
};
