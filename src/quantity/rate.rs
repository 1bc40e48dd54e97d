use std::{
    fmt::{Debug, Display, Formatter},
    ops::Mul,
};

use crate::quantity::{Quantity, cost::Cost, power::Watts, time::Minutes};

/// Dollars per minute of daily usage.
pub type MinuteRate = Quantity<0, -1, 1>;

/// Dollars per watt of power draw.
pub type WattRate = Quantity<-1, 0, 1>;

impl Display for MinuteRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4} $/min", self.0)
    }
}

impl Debug for MinuteRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}$/min", self.0)
    }
}

impl Display for WattRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4} $/W", self.0)
    }
}

impl Debug for WattRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}$/W", self.0)
    }
}

impl Mul<Minutes> for MinuteRate {
    type Output = Cost;

    fn mul(self, rhs: Minutes) -> Self::Output {
        Cost::from(self.0 * rhs.0)
    }
}

impl Mul<Watts> for WattRate {
    type Output = Cost;

    fn mul(self, rhs: Watts) -> Self::Output {
        Cost::from(self.0 * rhs.0)
    }
}
