use std::fmt::{Debug, Display, Formatter};

use crate::quantity::Quantity;

/// Daily active duration.
pub type Minutes = Quantity<0, 1, 0>;

impl Display for Minutes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0} min", self.0)
    }
}

impl Debug for Minutes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}min", self.0)
    }
}
