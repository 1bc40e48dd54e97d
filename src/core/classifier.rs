use crate::core::appliance::DeviceCategory;

/// Balancing policy attached to a device category.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PolicyClass {
    /// Never adjusted: always-on or cycle-bound devices.
    Excluded,

    /// Usage reduced first, power second, both floored.
    Balanceable,

    /// Usage capped by the reserved budget share, never power-reduced.
    Capped,
}

impl DeviceCategory {
    /// Total over every category: unknown devices fall into the capped class.
    #[must_use]
    pub const fn policy_class(&self) -> PolicyClass {
        match self {
            Self::Refrigerator | Self::WashingMachine | Self::SmartPlug => PolicyClass::Excluded,
            Self::Heater | Self::AirConditioner | Self::Microwave | Self::Tv | Self::CeilingFan => {
                PolicyClass::Balanceable
            }
            Self::SmartBulb | Self::LaptopCharger | Self::Other(_) => PolicyClass::Capped,
        }
    }
}
