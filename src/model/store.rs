use std::{fs, path::Path, time::Duration};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use ureq::Agent;

use crate::{
    core::{DeviceCategory, Room},
    model::{
        features::{FEATURE_COUNT, FeatureEncoder, Scaler},
        linear::LinearModel,
    },
    prelude::*,
};

/// The fitted model as data: label tables, scaler, and regression
/// coefficients in one TOML file.
#[derive(Debug, Deserialize, Serialize)]
pub struct ModelFile {
    pub metadata: Metadata,
    pub encoders: Encoders,
    pub scaler: ScalerParameters,
    pub regression: RegressionParameters,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Metadata {
    pub fitted_at: DateTime<Local>,
    pub algorithm: String,
}

/// Fitted label tables: the encoded value of a categorical is its position
/// in the table.
#[derive(Debug, Deserialize, Serialize)]
pub struct Encoders {
    pub device_categories: Vec<DeviceCategory>,
    pub rooms: Vec<Room>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ScalerParameters {
    pub means: Vec<f64>,
    pub standard_deviations: Vec<f64>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RegressionParameters {
    pub intercept: f64,
    pub weights: Vec<f64>,
}

impl ModelFile {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read the model file `{}`", path.display()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse the model file")
    }

    /// Downloads a model file and returns the raw contents, validated.
    #[instrument(skip_all, fields(url = url))]
    pub fn fetch(url: &str) -> Result<String> {
        info!("Fetching…");
        let agent: Agent =
            Agent::config_builder().timeout_global(Some(Duration::from_secs(10))).build().into();
        let contents = agent.get(url).call()?.body_mut().read_to_string()?;
        Self::from_toml(&contents)?.into_parts()?;
        Ok(contents)
    }

    /// Splits the file into the two collaborators the prediction pipeline
    /// needs, validating every parameter on the way.
    pub fn into_parts(self) -> Result<(FeatureEncoder, LinearModel)> {
        ensure!(
            !self.encoders.device_categories.is_empty(),
            "the model has no fitted device categories",
        );
        ensure!(!self.encoders.rooms.is_empty(), "the model has no fitted rooms");
        let scaler = Scaler::new(
            into_feature_array(self.scaler.means, "scaler means")?,
            into_feature_array(self.scaler.standard_deviations, "scaler standard deviations")?,
        )?;
        let model = LinearModel::new(
            self.regression.intercept,
            into_feature_array(self.regression.weights, "regression weights")?,
        )?;
        let encoder =
            FeatureEncoder::new(self.encoders.device_categories, self.encoders.rooms, scaler);
        Ok((encoder, model))
    }
}

fn into_feature_array(values: Vec<f64>, what: &str) -> Result<[f64; FEATURE_COUNT]> {
    <[f64; FEATURE_COUNT]>::try_from(values).map_err(|values| {
        Error::msg(format!("expected {FEATURE_COUNT} {what}, found {}", values.len()))
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{
        core::Appliance,
        model::linear::CostModel,
        quantity::{power::Watts, time::Minutes},
    };

    const MODEL_TOML: &str = r#"
        [metadata]
        fitted_at = "2026-07-14T09:30:00+02:00"
        algorithm = "ridge"

        [encoders]
        device_categories = ["Ceiling Fan", "Heater", "TV"]
        rooms = ["Bedroom", "Living Room"]

        [scaler]
        means = [1.0, 800.0, 0.5, 21.0, 50.0, 180.0, 0.5]
        standard_deviations = [1.0, 400.0, 0.5, 3.0, 10.0, 90.0, 0.5]

        [regression]
        intercept = 1.25
        weights = [0.1, 0.8, 0.05, 0.02, 0.01, 1.1, 0.3]
    "#;

    #[test]
    fn test_load_and_predict() {
        let (encoder, model) = ModelFile::from_toml(MODEL_TOML).unwrap().into_parts().unwrap();
        let appliance = Appliance::builder()
            .category(DeviceCategory::Heater)
            .room(Room::LivingRoom)
            .temperature(21.0)
            .humidity(50.0)
            .power(Watts::from(1200))
            .usage(Minutes::from(180))
            .build();
        let features = encoder.encode(&appliance).unwrap();
        // Scaled vector is [0, 1, 1, 0, 0, 0, 1]: 1.25 + 0.8 + 0.05 + 0.3.
        assert_relative_eq!(model.daily_cost(&features).unwrap().0.0, 2.4, epsilon = 1e-12);
    }

    #[test]
    fn test_wrong_vector_length_is_rejected() {
        let broken = MODEL_TOML.replace(
            "weights = [0.1, 0.8, 0.05, 0.02, 0.01, 1.1, 0.3]",
            "weights = [0.1, 0.8]",
        );
        let error = ModelFile::from_toml(&broken).unwrap().into_parts().unwrap_err();
        assert!(error.to_string().contains("regression weights"));
    }

    #[test]
    fn test_unknown_category_in_tables_round_trips() {
        let with_unknown = MODEL_TOML.replace(
            r#"device_categories = ["Ceiling Fan", "Heater", "TV"]"#,
            r#"device_categories = ["Sauna", "Heater"]"#,
        );
        let file = ModelFile::from_toml(&with_unknown).unwrap();
        assert_eq!(file.encoders.device_categories[0], DeviceCategory::Other("Sauna".to_string()));
    }
}
