use crate::{
    core::Appliance,
    model::{CostModel, FeatureEncoder},
    prelude::*,
    quantity::cost::Cost,
};

pub const DAYS_PER_MONTH: f64 = 30.0;

/// Runs the model over the whole inventory.
///
/// Appliances whose categorical features the model was not fitted with are
/// skipped with a warning and carry no predicted cost. A model failure is a
/// hard error.
#[instrument(skip_all, fields(appliances = appliances.len()))]
pub fn predict_daily_costs(
    model: &dyn CostModel,
    encoder: &FeatureEncoder,
    appliances: &[Appliance],
) -> Result<Vec<Option<Cost>>> {
    appliances
        .iter()
        .enumerate()
        .map(|(index, appliance)| match encoder.encode(appliance) {
            Ok(features) => model
                .daily_cost(&features)
                .with_context(|| format!("failed to predict the cost of appliance #{index}"))
                .map(Some),
            Err(error) => {
                warn!(index, category = %appliance.category, "skipping: {error:#}");
                Ok(None)
            }
        })
        .collect()
}

/// Projects daily costs onto a month: the total and the per-appliance shares.
#[must_use]
pub fn monthly_bill(daily_costs: &[Option<Cost>]) -> (Cost, Vec<Option<Cost>>) {
    let per_appliance: Vec<Option<Cost>> =
        daily_costs.iter().map(|cost| cost.map(|cost| cost * DAYS_PER_MONTH)).collect();
    let total = per_appliance.iter().flatten().copied().sum();
    (total, per_appliance)
}

/// Monthly projection of the valid appliances' total.
#[must_use]
pub fn total_monthly(daily_costs: &[Option<Cost>]) -> Cost {
    daily_costs.iter().flatten().copied().sum::<Cost>() * DAYS_PER_MONTH
}
