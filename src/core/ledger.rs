use std::collections::BTreeMap;

use itertools::Itertools;

/// Per-appliance adjustment descriptions, keyed by the appliance's index in
/// the load order.
///
/// An appliance gets at most one entry per pass: a usage part, a power part,
/// or both merged into one description. Later records for the same slot
/// replace earlier ones, so the ledger always describes the final state.
#[derive(Clone, Debug, Default)]
pub struct AdjustmentLedger {
    entries: BTreeMap<usize, Adjustment>,
}

#[derive(Clone, Debug, Default)]
struct Adjustment {
    usage: Option<String>,
    power: Option<String>,
}

impl Adjustment {
    fn describe(&self) -> String {
        self.usage.iter().chain(self.power.iter()).join("; ")
    }
}

impl AdjustmentLedger {
    pub fn record_usage(&mut self, index: usize, message: impl Into<String>) {
        self.entries.entry(index).or_default().usage = Some(message.into());
    }

    pub fn record_power(&mut self, index: usize, message: impl Into<String>) {
        self.entries.entry(index).or_default().power = Some(message.into());
    }

    #[must_use]
    pub fn describe(&self, index: usize) -> Option<String> {
        self.entries.get(&index).map(Adjustment::describe)
    }

    /// Descriptions in appliance-index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, String)> + '_ {
        self.entries.iter().map(|(index, adjustment)| (*index, adjustment.describe()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn test_index_order() {
        let mut ledger = AdjustmentLedger::default();
        ledger.record_usage(2, "b");
        ledger.record_usage(0, "a");
        assert_eq!(ledger.iter().map(|(index, _)| index).collect_vec(), vec![0, 2]);
    }

    #[test]
    fn test_one_entry_per_appliance() {
        let mut ledger = AdjustmentLedger::default();
        ledger.record_usage(1, "first");
        ledger.record_usage(1, "second");
        ledger.record_power(1, "power");
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.describe(1).unwrap(), "second; power");
    }

    #[test]
    fn test_power_only() {
        let mut ledger = AdjustmentLedger::default();
        ledger.record_power(0, "power");
        assert_eq!(ledger.describe(0).unwrap(), "power");
    }
}
