use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    core::{
        Appliance, DEFAULT_HUMIDITY_PERCENT, DEFAULT_TEMPERATURE_CELSIUS, DeviceCategory, OnOff,
        Room,
    },
    prelude::*,
    quantity::{power::Watts, time::Minutes},
};

/// One appliance as stored in the inventory file, using the upstream key
/// names so existing data files keep working.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ApplianceRecord {
    #[serde(rename = "Device Type")]
    pub category: DeviceCategory,

    #[serde(rename = "Power Consumption (W)")]
    pub power: Watts,

    #[serde(rename = "Room Location", default = "default_room")]
    pub room: Room,

    #[serde(rename = "Temperature (°C)", default = "default_temperature")]
    pub temperature: f64,

    #[serde(rename = "Humidity (%)", default = "default_humidity")]
    pub humidity: f64,

    #[serde(rename = "Usage Duration (minutes)")]
    pub usage: Minutes,

    #[serde(rename = "On/Off Status", default = "default_status")]
    pub status: OnOff,
}

fn default_room() -> Room {
    Room::LivingRoom
}

const fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE_CELSIUS
}

const fn default_humidity() -> f64 {
    DEFAULT_HUMIDITY_PERCENT
}

const fn default_status() -> OnOff {
    OnOff::On
}

impl From<ApplianceRecord> for Appliance {
    fn from(record: ApplianceRecord) -> Self {
        Self::builder()
            .category(record.category)
            .room(record.room)
            .temperature(record.temperature)
            .humidity(record.humidity)
            .on_off(record.status)
            .power(record.power)
            .usage(record.usage)
            .build()
    }
}

impl From<&Appliance> for ApplianceRecord {
    fn from(appliance: &Appliance) -> Self {
        Self {
            category: appliance.category.clone(),
            power: appliance.power,
            room: appliance.room.clone(),
            temperature: appliance.temperature,
            humidity: appliance.humidity,
            usage: appliance.usage,
            status: appliance.on_off,
        }
    }
}

#[instrument(skip_all, fields(path = %path.display()))]
pub fn load(path: &Path) -> Result<Vec<Appliance>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read the inventory `{}`", path.display()))?;
    let records: Vec<ApplianceRecord> =
        serde_json::from_str(&contents).context("failed to parse the inventory")?;
    info!(appliances = records.len(), "loaded");
    Ok(records.into_iter().map(Into::into).collect())
}

#[instrument(skip_all, fields(path = %path.display()))]
pub fn save(path: &Path, appliances: &[Appliance]) -> Result {
    let records: Vec<ApplianceRecord> = appliances.iter().map(Into::into).collect();
    let contents = serde_json::to_string_pretty(&records)?;
    fs::write(path, contents)
        .with_context(|| format!("failed to write the inventory `{}`", path.display()))
}
