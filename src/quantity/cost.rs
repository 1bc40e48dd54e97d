use std::{
    fmt::{Debug, Display, Formatter},
    ops::Div,
};

use ordered_float::OrderedFloat;

use crate::quantity::{
    Quantity,
    power::Watts,
    rate::{MinuteRate, WattRate},
    time::Minutes,
};

/// Dollars.
pub type Cost = Quantity<0, 0, 1>;

impl Cost {
    pub const ONE_CENT: Self = Self(OrderedFloat(0.01));
}

impl Display for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl Debug for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl Div<Minutes> for Cost {
    type Output = MinuteRate;

    fn div(self, rhs: Minutes) -> Self::Output {
        MinuteRate::from(self.0 / rhs.0)
    }
}

impl Div<MinuteRate> for Cost {
    type Output = Minutes;

    fn div(self, rhs: MinuteRate) -> Self::Output {
        Minutes::from(self.0 / rhs.0)
    }
}

impl Div<Watts> for Cost {
    type Output = WattRate;

    fn div(self, rhs: Watts) -> Self::Output {
        WattRate::from(self.0 / rhs.0)
    }
}

impl Div<WattRate> for Cost {
    type Output = Watts;

    fn div(self, rhs: WattRate) -> Self::Output {
        Watts::from(self.0 / rhs.0)
    }
}
