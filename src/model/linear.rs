use crate::{
    model::features::{FEATURE_COUNT, FeatureVector},
    prelude::*,
    quantity::cost::Cost,
};

/// Deterministic oracle mapping a feature vector to a predicted daily cost.
pub trait CostModel {
    fn daily_cost(&self, features: &FeatureVector) -> Result<Cost>;
}

/// Standard-scaled linear regression, read back from a parameter file.
#[derive(Clone, Debug)]
pub struct LinearModel {
    intercept: f64,
    weights: [f64; FEATURE_COUNT],
}

impl LinearModel {
    pub fn new(intercept: f64, weights: [f64; FEATURE_COUNT]) -> Result<Self> {
        ensure!(intercept.is_finite(), "the model intercept must be finite");
        ensure!(weights.iter().all(|weight| weight.is_finite()), "model weights must be finite");
        Ok(Self { intercept, weights })
    }
}

impl CostModel for LinearModel {
    fn daily_cost(&self, features: &FeatureVector) -> Result<Cost> {
        let prediction = self
            .weights
            .iter()
            .zip(&features.0)
            .map(|(weight, feature)| weight * feature)
            .sum::<f64>()
            + self.intercept;
        ensure!(prediction.is_finite(), "the model produced a non-finite cost");
        Ok(Cost::from(prediction))
    }
}
