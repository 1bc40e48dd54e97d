use std::{convert::Infallible, fmt::Display, str::FromStr};

use bon::bon;
use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::quantity::{power::Watts, time::Minutes};

pub const DEFAULT_TEMPERATURE_CELSIUS: f64 = 22.0;
pub const DEFAULT_HUMIDITY_PERCENT: f64 = 55.0;

/// Device category as it appears in the inventory file.
///
/// Names that are not recognised survive round trips verbatim in
/// [`DeviceCategory::Other`].
#[derive(Clone, Debug, DeserializeFromStr, Eq, PartialEq, SerializeDisplay)]
pub enum DeviceCategory {
    Heater,
    AirConditioner,
    Microwave,
    WashingMachine,
    SmartPlug,
    SmartBulb,
    LaptopCharger,
    Tv,
    CeilingFan,
    Refrigerator,
    Other(String),
}

impl Display for DeviceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Heater => "Heater",
            Self::AirConditioner => "Air Conditioner",
            Self::Microwave => "Microwave",
            Self::WashingMachine => "Washing Machine",
            Self::SmartPlug => "Smart Plug",
            Self::SmartBulb => "Smart Bulb",
            Self::LaptopCharger => "Laptop Charger",
            Self::Tv => "TV",
            Self::CeilingFan => "Ceiling Fan",
            Self::Refrigerator => "Refrigerator",
            Self::Other(name) => name,
        };
        f.write_str(name)
    }
}

impl FromStr for DeviceCategory {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Heater" => Self::Heater,
            "Air Conditioner" => Self::AirConditioner,
            "Microwave" => Self::Microwave,
            "Washing Machine" => Self::WashingMachine,
            "Smart Plug" => Self::SmartPlug,
            "Smart Bulb" => Self::SmartBulb,
            "Laptop Charger" => Self::LaptopCharger,
            "TV" => Self::Tv,
            "Ceiling Fan" => Self::CeilingFan,
            "Refrigerator" => Self::Refrigerator,
            _ => Self::Other(s.to_string()),
        })
    }
}

#[derive(Clone, Debug, DeserializeFromStr, Eq, PartialEq, SerializeDisplay)]
pub enum Room {
    LivingRoom,
    Bedroom,
    Kitchen,
    Bathroom,
    Garage,
    Office,
    Other(String),
}

impl Display for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::LivingRoom => "Living Room",
            Self::Bedroom => "Bedroom",
            Self::Kitchen => "Kitchen",
            Self::Bathroom => "Bathroom",
            Self::Garage => "Garage",
            Self::Office => "Office",
            Self::Other(name) => name,
        };
        f.write_str(name)
    }
}

impl FromStr for Room {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Living Room" => Self::LivingRoom,
            "Bedroom" => Self::Bedroom,
            "Kitchen" => Self::Kitchen,
            "Bathroom" => Self::Bathroom,
            "Garage" => Self::Garage,
            "Office" => Self::Office,
            _ => Self::Other(s.to_string()),
        })
    }
}

/// Anything but a literal `on` (any case) counts as off, matching the
/// upstream data files.
#[derive(Copy, Clone, Debug, DeserializeFromStr, Eq, PartialEq, SerializeDisplay)]
pub enum OnOff {
    On,
    Off,
}

impl OnOff {
    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl Display for OnOff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::On => "On",
            Self::Off => "Off",
        })
    }
}

impl FromStr for OnOff {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s.eq_ignore_ascii_case("on") { Self::On } else { Self::Off })
    }
}

/// One physical device's configuration for a billing period.
///
/// `power` and `usage` are the only fields balancing mutates. The original
/// values are snapshotted at construction and are what floors and percentage
/// deltas are computed against.
#[derive(Clone, Debug, PartialEq)]
pub struct Appliance {
    pub category: DeviceCategory,
    pub room: Room,
    pub temperature: f64,
    pub humidity: f64,
    pub on_off: OnOff,
    pub power: Watts,
    pub usage: Minutes,
    original_power: Watts,
    original_usage: Minutes,
}

#[bon]
impl Appliance {
    #[builder]
    pub fn new(
        category: DeviceCategory,
        #[builder(default = Room::LivingRoom)] room: Room,
        #[builder(default = DEFAULT_TEMPERATURE_CELSIUS)] temperature: f64,
        #[builder(default = DEFAULT_HUMIDITY_PERCENT)] humidity: f64,
        #[builder(default = OnOff::On)] on_off: OnOff,
        power: Watts,
        usage: Minutes,
    ) -> Self {
        Self {
            category,
            room,
            temperature,
            humidity,
            on_off,
            power,
            usage,
            original_power: power,
            original_usage: usage,
        }
    }
}

impl Appliance {
    #[must_use]
    pub const fn original_power(&self) -> Watts {
        self.original_power
    }

    #[must_use]
    pub const fn original_usage(&self) -> Minutes {
        self.original_usage
    }

    /// Proportion of the original usage that has been trimmed away.
    #[must_use]
    pub fn usage_reduction(&self) -> f64 {
        if self.original_usage <= Minutes::ZERO {
            return 0.0;
        }
        1.0 - (self.usage / self.original_usage).0
    }

    /// Proportion of the original power that has been trimmed away.
    #[must_use]
    pub fn power_reduction(&self) -> f64 {
        if self.original_power <= Watts::ZERO {
            return 0.0;
        }
        1.0 - (self.power / self.original_power).0
    }

    #[must_use]
    pub fn is_adjusted(&self) -> bool {
        self.usage != self.original_usage || self.power != self.original_power
    }
}
