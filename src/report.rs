use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, Local};

use crate::{
    bill::DAYS_PER_MONTH,
    core::BalanceReport,
    fmt::FormattedPercentage,
    quantity::cost::Cost,
};

/// Plain-text rendition of a balancing pass, suitable for saving next to the
/// inventory.
pub struct SavingsReport<'a> {
    pub report: &'a BalanceReport,
    pub threshold: Cost,
    pub generated_at: DateTime<Local>,
}

impl Display for SavingsReport<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Appliance balancing report")?;
        writeln!(f, "Generated on {}", self.generated_at.format("%Y-%m-%d %H:%M"))?;
        writeln!(f)?;
        writeln!(f, "Monthly budget: {}", self.threshold)?;
        writeln!(f, "Original monthly bill: {}", self.report.initial_monthly_bill)?;
        writeln!(f, "Adjusted monthly bill: {}", self.report.final_monthly_bill)?;
        if self.report.initial_monthly_bill > Cost::ZERO {
            let share = self.report.savings() / self.report.initial_monthly_bill;
            writeln!(f, "Savings: {} ({})", self.report.savings(), FormattedPercentage(share.0))?;
        } else {
            writeln!(f, "Savings: {}", self.report.savings())?;
        }
        writeln!(f, "Status: {:?}", self.report.status)?;
        writeln!(f)?;
        if self.report.ledger.is_empty() {
            writeln!(f, "No adjustments were needed.")?;
            return Ok(());
        }
        writeln!(f, "Adjustments:")?;
        for (index, description) in self.report.ledger.iter() {
            let appliance = &self.report.appliances[index];
            writeln!(f)?;
            writeln!(f, "#{} {} ({})", index + 1, appliance.category, appliance.room)?;
            writeln!(f, "  {description}")?;
            if let Some(daily_cost) = self.report.daily_costs.get(index).copied().flatten() {
                writeln!(
                    f,
                    "  Daily cost: {daily_cost}, monthly cost: {}",
                    daily_cost * DAYS_PER_MONTH,
                )?;
            }
        }
        Ok(())
    }
}
