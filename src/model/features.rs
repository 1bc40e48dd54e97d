use std::fmt::Display;

use crate::{
    core::{Appliance, DeviceCategory, Room},
    prelude::*,
};

/// Model input width: device category, power, room, temperature, humidity,
/// usage, on/off.
pub const FEATURE_COUNT: usize = 7;

/// Scaled feature vector in the model's input order.
#[derive(Clone, Copy, Debug)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

/// Standard scaler fitted together with the regression.
#[derive(Clone, Debug)]
pub struct Scaler {
    means: [f64; FEATURE_COUNT],
    standard_deviations: [f64; FEATURE_COUNT],
}

impl Scaler {
    pub fn new(
        means: [f64; FEATURE_COUNT],
        standard_deviations: [f64; FEATURE_COUNT],
    ) -> Result<Self> {
        ensure!(means.iter().all(|mean| mean.is_finite()), "scaler means must be finite");
        ensure!(
            standard_deviations.iter().all(|deviation| deviation.is_finite() && *deviation > 0.0),
            "scaler standard deviations must be finite and positive",
        );
        Ok(Self { means, standard_deviations })
    }

    #[cfg(test)]
    pub fn identity() -> Self {
        Self { means: [0.0; FEATURE_COUNT], standard_deviations: [1.0; FEATURE_COUNT] }
    }

    fn transform(&self, raw: [f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        std::array::from_fn(|i| (raw[i] - self.means[i]) / self.standard_deviations[i])
    }
}

/// Converts an appliance's fields into the numeric vector the model expects:
/// label-encoded categoricals, then standard scaling.
#[derive(Clone, Debug)]
pub struct FeatureEncoder {
    device_categories: Vec<DeviceCategory>,
    rooms: Vec<Room>,
    scaler: Scaler,
}

impl FeatureEncoder {
    #[must_use]
    pub const fn new(
        device_categories: Vec<DeviceCategory>,
        rooms: Vec<Room>,
        scaler: Scaler,
    ) -> Self {
        Self { device_categories, rooms, scaler }
    }

    /// Fails when a categorical value was not in the model's training data.
    pub fn encode(&self, appliance: &Appliance) -> Result<FeatureVector> {
        let raw = [
            encode_label(&self.device_categories, &appliance.category, "device category")?,
            appliance.power.0.0,
            encode_label(&self.rooms, &appliance.room, "room")?,
            appliance.temperature,
            appliance.humidity,
            appliance.usage.0.0,
            if appliance.on_off.is_on() { 1.0 } else { 0.0 },
        ];
        Ok(FeatureVector(self.scaler.transform(raw)))
    }
}

/// The encoded value of a categorical feature is its position in the fitted
/// label table.
#[expect(clippy::cast_precision_loss)]
fn encode_label<T: Display + PartialEq>(table: &[T], value: &T, what: &str) -> Result<f64> {
    table
        .iter()
        .position(|candidate| candidate == value)
        .map(|index| index as f64)
        .with_context(|| format!("the model was not fitted with {what} `{value}`"))
}
