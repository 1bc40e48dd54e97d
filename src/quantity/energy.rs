use std::fmt::{Debug, Display, Formatter};

use crate::quantity::Quantity;

/// Watt-minutes, the natural product of nominal power and daily usage.
/// Rendered as kilowatt-hours where human-facing.
pub type WattMinutes = Quantity<1, 1, 0>;

impl WattMinutes {
    const WATT_MINUTES_PER_KILOWATT_HOUR: f64 = 60_000.0;

    #[must_use]
    pub fn into_kilowatt_hours(self) -> f64 {
        self.0.0 / Self::WATT_MINUTES_PER_KILOWATT_HOUR
    }
}

impl Display for WattMinutes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} kWh", self.into_kilowatt_hours())
    }
}

impl Debug for WattMinutes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}kWh", self.into_kilowatt_hours())
    }
}
