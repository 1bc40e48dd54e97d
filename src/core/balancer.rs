use std::{
    collections::BTreeSet,
    sync::atomic::{AtomicBool, Ordering},
};

use bon::Builder;
use itertools::Itertools;

use crate::{
    bill,
    core::{
        appliance::Appliance, budget::BudgetSplit, classifier::PolicyClass,
        ledger::AdjustmentLedger,
    },
    fmt::{FormattedHours, FormattedPercentage},
    model::{CostModel, FeatureEncoder},
    prelude::*,
    quantity::{
        cost::Cost,
        power::Watts,
        rate::{MinuteRate, WattRate},
        time::Minutes,
    },
};

pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Balanceable usage may not drop below this share of the original.
const USAGE_FLOOR_SHARE: f64 = 0.5;

/// Balanceable power may not drop below this share of the original.
const POWER_FLOOR_SHARE: f64 = 0.8;

/// A remaining monthly excess within this is considered closed.
const EXCESS_EPSILON: Cost = Cost::ONE_CENT;

/// Terminal state of one balancing pass.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BalanceStatus {
    /// The threshold is not positive: balancing was not requested.
    NotRequested,

    /// The predicted bill already fits the threshold.
    UnderThreshold,

    /// Excluded appliances alone consume the whole threshold.
    Infeasible,

    /// The adjusted bill fits the threshold.
    Converged,

    /// Every floor is reached and the bill still exceeds the threshold,
    /// the best achievable result.
    FloorLimited,
}

/// Outcome of a balancing pass: the adjusted working copy, published
/// atomically on success.
#[derive(Debug)]
pub struct BalanceReport {
    pub appliances: Vec<Appliance>,
    pub daily_costs: Vec<Option<Cost>>,
    pub ledger: AdjustmentLedger,
    pub status: BalanceStatus,
    pub initial_monthly_bill: Cost,
    pub final_monthly_bill: Cost,
}

impl BalanceReport {
    #[must_use]
    pub fn savings(&self) -> Cost {
        self.initial_monthly_bill - self.final_monthly_bill
    }
}

/// The budget-constrained balancing pass.
///
/// Pure with respect to its inputs: the caller's appliances are cloned into
/// a working copy and nothing is committed on the error path.
#[derive(Builder)]
#[builder(finish_fn(vis = ""))]
pub struct Balancer<'a> {
    model: &'a dyn CostModel,
    encoder: &'a FeatureEncoder,

    /// Maximum monthly bill.
    threshold: Cost,

    #[builder(default = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    cancellation_flag: Option<&'a AtomicBool>,
}

impl<S: balancer_builder::IsComplete> BalancerBuilder<'_, S> {
    pub fn balance(
        self,
        appliances: &[Appliance],
        daily_costs: &[Option<Cost>],
    ) -> Result<BalanceReport> {
        self.build().balance(appliances, daily_costs)
    }
}

impl Balancer<'_> {
    #[instrument(skip_all, name = "Balancing…", fields(threshold = %self.threshold))]
    fn balance(
        &self,
        appliances: &[Appliance],
        daily_costs: &[Option<Cost>],
    ) -> Result<BalanceReport> {
        ensure!(
            appliances.len() == daily_costs.len(),
            "appliance and cost counts differ: {} vs {}",
            appliances.len(),
            daily_costs.len(),
        );

        let initial_monthly_bill = bill::total_monthly(daily_costs);
        let mut report = BalanceReport {
            appliances: appliances.to_vec(),
            daily_costs: daily_costs.to_vec(),
            ledger: AdjustmentLedger::default(),
            status: BalanceStatus::NotRequested,
            initial_monthly_bill,
            final_monthly_bill: initial_monthly_bill,
        };

        if self.threshold <= Cost::ZERO {
            debug!("the threshold is not positive, nothing to do");
            return Ok(report);
        }
        if initial_monthly_bill <= self.threshold {
            debug!(%initial_monthly_bill, "the bill already fits the threshold");
            report.status = BalanceStatus::UnderThreshold;
            return Ok(report);
        }

        let mut excluded = Vec::new();
        let mut balanceable = Vec::new();
        let mut capped = Vec::new();
        for (index, appliance) in appliances.iter().enumerate() {
            if report.daily_costs[index].is_none() {
                continue;
            }
            match appliance.category.policy_class() {
                PolicyClass::Excluded => excluded.push(index),
                PolicyClass::Balanceable => balanceable.push(index),
                PolicyClass::Capped => capped.push(index),
            }
        }

        let excluded_monthly_cost = excluded
            .iter()
            .filter_map(|index| report.daily_costs[*index])
            .sum::<Cost>()
            * bill::DAYS_PER_MONTH;
        let split = BudgetSplit::allocate(self.threshold, excluded_monthly_cost);
        if !split.is_feasible() {
            warn!(%excluded_monthly_cost, "excluded appliances alone consume the whole threshold");
            report.status = BalanceStatus::Infeasible;
            return Ok(report);
        }

        self.cap_phase(&mut report, &capped, split.capped).context("the cap phase failed")?;
        if self.remaining_excess(&mut report) <= EXCESS_EPSILON {
            report.status = BalanceStatus::Converged;
            return Ok(report);
        }

        self.usage_phase(&mut report, &balanceable)
            .context("the usage-reduction phase failed")?;
        if self.remaining_excess(&mut report) <= EXCESS_EPSILON {
            report.status = BalanceStatus::Converged;
            return Ok(report);
        }

        self.power_phase(&mut report, &balanceable)
            .context("the power-reduction phase failed")?;
        report.status = if self.remaining_excess(&mut report) <= EXCESS_EPSILON {
            BalanceStatus::Converged
        } else {
            info!(
                final_monthly_bill = %report.final_monthly_bill,
                "floors reached, the bill still exceeds the threshold"
            );
            BalanceStatus::FloorLimited
        };
        Ok(report)
    }

    /// Refreshes the final bill and returns what is still above the threshold.
    fn remaining_excess(&self, report: &mut BalanceReport) -> Cost {
        report.final_monthly_bill = bill::total_monthly(&report.daily_costs);
        report.final_monthly_bill - self.threshold
    }

    /// Single pass: each capped appliance gets a usage ceiling from its share
    /// of the reserved budget.
    #[instrument(skip_all, fields(budget = %budget))]
    fn cap_phase(&self, report: &mut BalanceReport, capped: &[usize], budget: Cost) -> Result {
        let total_rate: MinuteRate =
            capped.iter().filter_map(|index| cost_per_minute(report, *index)).sum();
        if total_rate <= MinuteRate::ZERO {
            return Ok(());
        }
        let daily_budget = budget / bill::DAYS_PER_MONTH;
        let mut adjusted = Vec::new();
        for &index in capped {
            let Some(rate) = cost_per_minute(report, index) else { continue };
            let allocated_daily_cost = daily_budget * (rate / total_rate).0;
            let max_usage = allocated_daily_cost / rate;
            let new_usage = report.appliances[index].usage.min(max_usage);
            if new_usage < report.appliances[index].usage {
                apply_usage(report, index, new_usage, "Capped");
                adjusted.push(index);
            }
        }
        self.correct_costs(report, adjusted)
    }

    /// Iteratively trims balanceable usage towards the threshold,
    /// proportionally to each appliance's cost per minute.
    #[instrument(skip_all)]
    fn usage_phase(&self, report: &mut BalanceReport, balanceable: &[usize]) -> Result {
        let mut adjusted = BTreeSet::new();
        for iteration in 0..self.max_iterations {
            self.check_cancellation()?;
            let excess = bill::total_monthly(&report.daily_costs) - self.threshold;
            if excess <= EXCESS_EPSILON {
                break;
            }
            let eligible = balanceable
                .iter()
                .copied()
                .filter(|index| {
                    let appliance = &report.appliances[*index];
                    appliance.usage > usage_floor(appliance)
                })
                .filter_map(|index| cost_per_minute(report, index).map(|rate| (index, rate)))
                .collect_vec();
            let total_rate: MinuteRate = eligible.iter().map(|(_, rate)| *rate).sum();
            if total_rate <= MinuteRate::ZERO {
                debug!(iteration, "every usage floor is reached");
                break;
            }
            let daily_excess = excess / bill::DAYS_PER_MONTH;
            for (index, rate) in eligible {
                let cost_to_reduce = daily_excess * (rate / total_rate).0;
                let minutes_to_reduce = cost_to_reduce / rate;
                let appliance = &report.appliances[index];
                let new_usage =
                    (appliance.usage - minutes_to_reduce).max(usage_floor(appliance));
                if new_usage < appliance.usage {
                    apply_usage(report, index, new_usage, "Reduced");
                    adjusted.insert(index);
                }
            }
        }
        self.correct_costs(report, adjusted)
    }

    /// Same proportional shape as the usage phase, substituting power, with
    /// the higher floor.
    #[instrument(skip_all)]
    fn power_phase(&self, report: &mut BalanceReport, balanceable: &[usize]) -> Result {
        let mut adjusted = BTreeSet::new();
        for iteration in 0..self.max_iterations {
            self.check_cancellation()?;
            let excess = bill::total_monthly(&report.daily_costs) - self.threshold;
            if excess <= EXCESS_EPSILON {
                break;
            }
            let eligible = balanceable
                .iter()
                .copied()
                .filter(|index| {
                    let appliance = &report.appliances[*index];
                    appliance.power > power_floor(appliance)
                })
                .filter_map(|index| cost_per_watt(report, index).map(|rate| (index, rate)))
                .collect_vec();
            let total_rate: WattRate = eligible.iter().map(|(_, rate)| *rate).sum();
            if total_rate <= WattRate::ZERO {
                debug!(iteration, "every power floor is reached");
                break;
            }
            let daily_excess = excess / bill::DAYS_PER_MONTH;
            for (index, rate) in eligible {
                let cost_to_reduce = daily_excess * (rate / total_rate).0;
                let watts_to_reduce = cost_to_reduce / rate;
                let appliance = &report.appliances[index];
                let new_power =
                    (appliance.power - watts_to_reduce).max(power_floor(appliance));
                if new_power < appliance.power {
                    apply_power(report, index, new_power);
                    adjusted.insert(index);
                }
            }
        }
        self.correct_costs(report, adjusted)
    }

    /// Replaces the linear in-loop approximations with real model outputs.
    fn correct_costs(
        &self,
        report: &mut BalanceReport,
        indices: impl IntoIterator<Item = usize>,
    ) -> Result {
        for index in indices {
            let features = self
                .encoder
                .encode(&report.appliances[index])
                .with_context(|| format!("failed to re-encode appliance #{index}"))?;
            let corrected = self
                .model
                .daily_cost(&features)
                .with_context(|| format!("failed to re-predict the cost of appliance #{index}"))?;
            report.daily_costs[index] = Some(corrected);
        }
        Ok(())
    }

    fn check_cancellation(&self) -> Result {
        if let Some(flag) = self.cancellation_flag {
            ensure!(!flag.load(Ordering::Relaxed), "the balancing pass was cancelled");
        }
        Ok(())
    }
}

fn usage_floor(appliance: &Appliance) -> Minutes {
    appliance.original_usage() * USAGE_FLOOR_SHARE
}

fn power_floor(appliance: &Appliance) -> Watts {
    appliance.original_power() * POWER_FLOOR_SHARE
}

/// Only appliances that currently cost something can give anything back.
fn cost_per_minute(report: &BalanceReport, index: usize) -> Option<MinuteRate> {
    let cost = report.daily_costs[index]?;
    let usage = report.appliances[index].usage;
    (usage > Minutes::ZERO && cost > Cost::ZERO).then(|| cost / usage)
}

fn cost_per_watt(report: &BalanceReport, index: usize) -> Option<WattRate> {
    let cost = report.daily_costs[index]?;
    let power = report.appliances[index].power;
    (power > Watts::ZERO && cost > Cost::ZERO).then(|| cost / power)
}

fn apply_usage(report: &mut BalanceReport, index: usize, new_usage: Minutes, verb: &str) {
    let scale = (new_usage / report.appliances[index].usage).0;
    report.appliances[index].usage = new_usage;
    report.daily_costs[index] = report.daily_costs[index].map(|cost| cost * scale);
    let appliance = &report.appliances[index];
    report.ledger.record_usage(
        index,
        format!(
            "{verb} usage to {} (down {} from {})",
            FormattedHours(new_usage),
            FormattedPercentage(appliance.usage_reduction()),
            FormattedHours(appliance.original_usage()),
        ),
    );
}

fn apply_power(report: &mut BalanceReport, index: usize, new_power: Watts) {
    let scale = (new_power / report.appliances[index].power).0;
    report.appliances[index].power = new_power;
    report.daily_costs[index] = report.daily_costs[index].map(|cost| cost * scale);
    let appliance = &report.appliances[index];
    report.ledger.record_power(
        index,
        format!(
            "reduced power to {} (down {} from {})",
            appliance.power,
            FormattedPercentage(appliance.power_reduction()),
            appliance.original_power(),
        ),
    );
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{
        core::appliance::{DeviceCategory, Room},
        model::{FeatureVector, Scaler},
    };

    /// Cost is proportional to usage alone, power has no effect.
    struct UsageLinearModel {
        rate: MinuteRate,
    }

    impl CostModel for UsageLinearModel {
        fn daily_cost(&self, features: &FeatureVector) -> Result<Cost> {
            Ok(self.rate * Minutes::from(features.0[5]))
        }
    }

    /// Cost is proportional to power times usage.
    struct BilinearModel {
        dollars_per_watt_minute: f64,
    }

    impl CostModel for BilinearModel {
        fn daily_cost(&self, features: &FeatureVector) -> Result<Cost> {
            Ok(Cost::from(self.dollars_per_watt_minute * features.0[1] * features.0[5]))
        }
    }

    struct FailingModel;

    impl CostModel for FailingModel {
        fn daily_cost(&self, _features: &FeatureVector) -> Result<Cost> {
            bail!("the model is on fire")
        }
    }

    fn encoder() -> FeatureEncoder {
        FeatureEncoder::new(
            vec![
                DeviceCategory::Heater,
                DeviceCategory::AirConditioner,
                DeviceCategory::Microwave,
                DeviceCategory::WashingMachine,
                DeviceCategory::SmartPlug,
                DeviceCategory::SmartBulb,
                DeviceCategory::LaptopCharger,
                DeviceCategory::Tv,
                DeviceCategory::CeilingFan,
                DeviceCategory::Refrigerator,
            ],
            vec![Room::LivingRoom, Room::Bedroom, Room::Kitchen],
            Scaler::identity(),
        )
    }

    fn appliance(category: DeviceCategory, power: f64, usage: f64) -> Appliance {
        Appliance::builder()
            .category(category)
            .power(Watts::from(power))
            .usage(Minutes::from(usage))
            .build()
    }

    fn heater() -> Appliance {
        appliance(DeviceCategory::Heater, 1000.0, 120.0)
    }

    /// $4 per day for the 1000 W, 120 min heater.
    fn heater_model() -> BilinearModel {
        BilinearModel { dollars_per_watt_minute: 4.0 / (1000.0 * 120.0) }
    }

    #[test]
    fn test_zero_threshold_is_a_skip() {
        let appliances = [heater()];
        let encoder = encoder();
        let report = Balancer::builder()
            .model(&heater_model())
            .encoder(&encoder)
            .threshold(Cost::ZERO)
            .balance(&appliances, &[Some(Cost::from(4))])
            .unwrap();
        assert_eq!(report.status, BalanceStatus::NotRequested);
        assert_eq!(report.appliances, appliances.to_vec());
        assert!(report.ledger.is_empty());
    }

    #[test]
    fn test_already_under_threshold_is_a_noop() {
        let appliances = [heater()];
        let encoder = encoder();
        let report = Balancer::builder()
            .model(&heater_model())
            .encoder(&encoder)
            .threshold(Cost::from(150))
            .balance(&appliances, &[Some(Cost::from(4))])
            .unwrap();
        assert_eq!(report.status, BalanceStatus::UnderThreshold);
        assert_eq!(report.appliances, appliances.to_vec());
        assert_eq!(report.final_monthly_bill, Cost::from(120));
    }

    #[test]
    fn test_empty_set_is_a_noop() {
        let encoder = encoder();
        let report = Balancer::builder()
            .model(&heater_model())
            .encoder(&encoder)
            .threshold(Cost::from(10))
            .balance(&[], &[])
            .unwrap();
        assert_eq!(report.status, BalanceStatus::UnderThreshold);
        assert!(report.appliances.is_empty());
    }

    #[test]
    fn test_usage_converges_proportionally() {
        let appliances = [heater()];
        let encoder = encoder();
        let report = Balancer::builder()
            .model(&heater_model())
            .encoder(&encoder)
            .threshold(Cost::from(90))
            .balance(&appliances, &[Some(Cost::from(4))])
            .unwrap();
        assert_eq!(report.status, BalanceStatus::Converged);
        assert_relative_eq!(report.appliances[0].usage.0.0, 90.0, epsilon = 1e-6);
        assert_relative_eq!(report.final_monthly_bill.0.0, 90.0, epsilon = 0.01);
        assert_eq!(report.ledger.len(), 1);
    }

    #[test]
    fn test_power_rescues_a_floored_usage_phase() {
        let appliances = [heater()];
        let encoder = encoder();
        let report = Balancer::builder()
            .model(&heater_model())
            .encoder(&encoder)
            .threshold(Cost::from(50))
            .balance(&appliances, &[Some(Cost::from(4))])
            .unwrap();
        assert_eq!(report.status, BalanceStatus::Converged);
        assert_eq!(report.appliances[0].usage, Minutes::from(60));
        assert_relative_eq!(report.appliances[0].power.0.0, 2500.0 / 3.0, epsilon = 1e-6);
        assert_relative_eq!(report.final_monthly_bill.0.0, 50.0, epsilon = 0.01);
        let description = report.ledger.describe(0).unwrap();
        assert!(description.contains("usage"));
        assert!(description.contains("power"));
    }

    #[test]
    fn test_floor_limited_when_power_cannot_help() {
        let appliances = [heater()];
        let encoder = encoder();
        let report = Balancer::builder()
            .model(&heater_model())
            .encoder(&encoder)
            .threshold(Cost::from(35))
            .balance(&appliances, &[Some(Cost::from(4))])
            .unwrap();
        assert_eq!(report.status, BalanceStatus::FloorLimited);
        assert_eq!(report.appliances[0].usage, Minutes::from(60));
        assert_relative_eq!(report.appliances[0].power.0.0, 800.0, epsilon = 1e-9);
        assert_relative_eq!(report.final_monthly_bill.0.0, 48.0, epsilon = 0.01);
    }

    #[test]
    fn test_correction_undoes_fictional_power_savings() {
        // Power reduction cannot actually save anything under this model, so
        // the end-of-phase correction must bring the real costs back.
        let appliances = [heater()];
        let encoder = encoder();
        let model = UsageLinearModel { rate: Cost::from(4) / Minutes::from(120) };
        let report = Balancer::builder()
            .model(&model)
            .encoder(&encoder)
            .threshold(Cost::from(50))
            .balance(&appliances, &[Some(Cost::from(4))])
            .unwrap();
        assert_eq!(report.status, BalanceStatus::FloorLimited);
        assert_relative_eq!(report.final_monthly_bill.0.0, 60.0, epsilon = 0.01);
    }

    #[test]
    fn test_infeasible_leaves_everything_unchanged() {
        let appliances =
            [appliance(DeviceCategory::Refrigerator, 150.0, 1440.0), heater()];
        let daily_costs = [Some(Cost::from(2)), Some(Cost::from(4))];
        let encoder = encoder();
        let report = Balancer::builder()
            .model(&heater_model())
            .encoder(&encoder)
            .threshold(Cost::from(50))
            .balance(&appliances, &daily_costs)
            .unwrap();
        assert_eq!(report.status, BalanceStatus::Infeasible);
        assert_eq!(report.appliances, appliances.to_vec());
        assert_eq!(report.daily_costs, daily_costs.to_vec());
        assert!(report.ledger.is_empty());
        assert_eq!(report.final_monthly_bill, report.initial_monthly_bill);
    }

    #[test]
    fn test_excluded_appliances_are_untouched() {
        let refrigerator = appliance(DeviceCategory::Refrigerator, 150.0, 1440.0);
        let appliances = [refrigerator.clone(), heater()];
        let encoder = encoder();
        let report = Balancer::builder()
            .model(&heater_model())
            .encoder(&encoder)
            .threshold(Cost::from(100))
            .balance(&appliances, &[Some(Cost::from(1)), Some(Cost::from(4))])
            .unwrap();
        assert_eq!(report.status, BalanceStatus::Converged);
        assert_eq!(report.appliances[0], refrigerator);
        assert_eq!(report.daily_costs[0], Some(Cost::from(1)));
        assert_relative_eq!(report.appliances[1].usage.0.0, 70.0, epsilon = 1e-6);
        assert_relative_eq!(report.final_monthly_bill.0.0, 100.0, epsilon = 0.01);
    }

    #[test]
    fn test_capped_share_of_the_threshold() {
        // The bulb gets 20% of the threshold no matter what else is present,
        // and the cap may push it below the balanceable 50% floor.
        let appliances = [appliance(DeviceCategory::SmartBulb, 60.0, 300.0)];
        let encoder = encoder();
        let model = BilinearModel { dollars_per_watt_minute: 2.0 / (60.0 * 300.0) };
        let report = Balancer::builder()
            .model(&model)
            .encoder(&encoder)
            .threshold(Cost::from(30))
            .balance(&appliances, &[Some(Cost::from(2))])
            .unwrap();
        assert_eq!(report.status, BalanceStatus::Converged);
        assert_relative_eq!(report.appliances[0].usage.0.0, 30.0, epsilon = 1e-6);
        assert_relative_eq!(report.final_monthly_bill.0.0, 6.0, epsilon = 0.01);
        assert!(report.ledger.describe(0).unwrap().starts_with("Capped"));
    }

    #[test]
    fn test_floors_and_monotonicity_across_a_mixed_set() {
        let appliances = [
            appliance(DeviceCategory::Heater, 2000.0, 240.0),
            appliance(DeviceCategory::AirConditioner, 1500.0, 180.0),
            appliance(DeviceCategory::Tv, 150.0, 300.0),
        ];
        let rate = 1.25e-5;
        let model = BilinearModel { dollars_per_watt_minute: rate };
        let daily_costs: Vec<Option<Cost>> = appliances
            .iter()
            .map(|appliance| {
                Some(Cost::from(rate * appliance.power.0.0 * appliance.usage.0.0))
            })
            .collect();
        let encoder = encoder();
        let report = Balancer::builder()
            .model(&model)
            .encoder(&encoder)
            .threshold(Cost::from(100))
            .balance(&appliances, &daily_costs)
            .unwrap();
        assert_eq!(report.status, BalanceStatus::FloorLimited);
        assert!(report.final_monthly_bill <= report.initial_monthly_bill);
        for (adjusted, original) in report.appliances.iter().zip(&appliances) {
            assert!(adjusted.usage <= original.usage);
            assert!(adjusted.usage >= original.usage * USAGE_FLOOR_SHARE);
            assert!(adjusted.power >= original.power * (POWER_FLOOR_SHARE - 1e-12));
        }
        // Everything bottoms out: 0.5 × 0.8 of the original bill.
        assert_relative_eq!(
            report.final_monthly_bill.0.0,
            report.initial_monthly_bill.0.0 * 0.4,
            epsilon = 0.01,
        );
        assert_eq!(report.ledger.len(), 3);
    }

    #[test]
    fn test_second_pass_is_idempotent() {
        let appliances = [heater()];
        let encoder = encoder();
        let model = heater_model();
        let first = Balancer::builder()
            .model(&model)
            .encoder(&encoder)
            .threshold(Cost::from(35))
            .balance(&appliances, &[Some(Cost::from(4))])
            .unwrap();
        assert_eq!(first.status, BalanceStatus::FloorLimited);

        let second = Balancer::builder()
            .model(&model)
            .encoder(&encoder)
            .threshold(Cost::from(35))
            .balance(&first.appliances, &first.daily_costs)
            .unwrap();
        assert_eq!(second.status, BalanceStatus::FloorLimited);
        assert_eq!(second.appliances, first.appliances);
        assert!(second.ledger.is_empty());
    }

    #[test]
    fn test_cancellation() {
        let appliances = [heater()];
        let encoder = encoder();
        let flag = AtomicBool::new(true);
        let error = Balancer::builder()
            .model(&heater_model())
            .encoder(&encoder)
            .threshold(Cost::from(90))
            .cancellation_flag(&flag)
            .balance(&appliances, &[Some(Cost::from(4))])
            .unwrap_err();
        assert!(format!("{error:#}").contains("cancelled"));
    }

    #[test]
    fn test_model_failure_aborts_the_pass() {
        let appliances = [heater()];
        let encoder = encoder();
        let error = Balancer::builder()
            .model(&FailingModel)
            .encoder(&encoder)
            .threshold(Cost::from(90))
            .balance(&appliances, &[Some(Cost::from(4))])
            .unwrap_err();
        assert!(format!("{error:#}").contains("re-predict"));
    }

    #[test]
    fn test_mismatched_inputs_are_rejected() {
        let encoder = encoder();
        let result = Balancer::builder()
            .model(&heater_model())
            .encoder(&encoder)
            .threshold(Cost::from(90))
            .balance(&[heater()], &[]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_appliances_pass_through() {
        let projector = Appliance::builder()
            .category(DeviceCategory::Other("Projector".to_string()))
            .power(Watts::from(200))
            .usage(Minutes::from(90))
            .build();
        let appliances = [projector.clone(), heater()];
        let encoder = encoder();
        let report = Balancer::builder()
            .model(&heater_model())
            .encoder(&encoder)
            .threshold(Cost::from(90))
            .balance(&appliances, &[None, Some(Cost::from(4))])
            .unwrap();
        assert_eq!(report.status, BalanceStatus::Converged);
        assert_eq!(report.appliances[0], projector);
        assert_eq!(report.daily_costs[0], None);
    }
}
