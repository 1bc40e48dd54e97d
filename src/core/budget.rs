use crate::quantity::cost::Cost;

/// Share of the threshold reserved for capped appliances.
pub const CAPPED_SHARE: f64 = 0.2;

/// Monthly budget split between the two adjustable policy classes.
///
/// Excluded appliances are paid for first: their projected cost comes off the
/// top before anything is left for balanceable ones.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BudgetSplit {
    pub capped: Cost,
    pub balanceable: Cost,
}

impl BudgetSplit {
    #[must_use]
    pub fn allocate(threshold: Cost, excluded_monthly_cost: Cost) -> Self {
        let capped = threshold * CAPPED_SHARE;
        Self { capped, balanceable: threshold - capped - excluded_monthly_cost }
    }

    /// A non-positive balanceable budget means the fixed load alone consumes
    /// the whole threshold.
    #[must_use]
    pub fn is_feasible(&self) -> bool {
        self.balanceable > Cost::ZERO
    }
}
