use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::izip;

use crate::{
    bill,
    core::{Appliance, BalanceReport},
    quantity::cost::Cost,
};

#[must_use]
pub fn build_cost_table(appliances: &[Appliance], daily_costs: &[Option<Cost>]) -> Table {
    let (total_monthly, monthly_costs) = bill::monthly_bill(daily_costs);
    #[expect(clippy::cast_precision_loss)]
    let mean_monthly_cost = {
        let count = monthly_costs.iter().flatten().count();
        if count == 0 { Cost::ZERO } else { total_monthly / count as f64 }
    };

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec![
        "#",
        "Device",
        "Room",
        "Status",
        "Power",
        "Usage",
        "Energy",
        "Daily cost",
        "Monthly cost",
    ]);
    for (index, (appliance, daily_cost, monthly_cost)) in
        izip!(appliances, daily_costs.iter().copied(), monthly_costs).enumerate()
    {
        table.add_row(vec![
            Cell::new(index + 1).set_alignment(CellAlignment::Right),
            Cell::new(&appliance.category),
            Cell::new(&appliance.room).add_attribute(Attribute::Dim),
            Cell::new(appliance.on_off)
                .fg(if appliance.on_off.is_on() { Color::Green } else { Color::Reset }),
            Cell::new(appliance.power).set_alignment(CellAlignment::Right),
            Cell::new(appliance.usage).set_alignment(CellAlignment::Right),
            Cell::new(appliance.power * appliance.usage).set_alignment(CellAlignment::Right),
            daily_cost.map_or_else(
                || Cell::new("n/a").add_attribute(Attribute::Dim),
                |daily_cost| Cell::new(daily_cost).set_alignment(CellAlignment::Right),
            ),
            monthly_cost.map_or_else(
                || Cell::new("n/a").add_attribute(Attribute::Dim),
                |monthly_cost| {
                    Cell::new(monthly_cost).set_alignment(CellAlignment::Right).fg(
                        if monthly_cost >= mean_monthly_cost { Color::Red } else { Color::Green },
                    )
                },
            ),
        ]);
    }
    table
}

#[must_use]
pub fn build_adjustment_table(report: &BalanceReport) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec![
        "#",
        "Device",
        "Usage before",
        "Usage after",
        "Power before",
        "Power after",
        "Daily cost",
        "Adjustment",
    ]);
    for (index, description) in report.ledger.iter() {
        let appliance = &report.appliances[index];
        table.add_row(vec![
            Cell::new(index + 1).set_alignment(CellAlignment::Right),
            Cell::new(&appliance.category),
            Cell::new(appliance.original_usage())
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new(appliance.usage).set_alignment(CellAlignment::Right).fg(
                if appliance.usage < appliance.original_usage() {
                    Color::Green
                } else {
                    Color::Reset
                },
            ),
            Cell::new(appliance.original_power())
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new(appliance.power).set_alignment(CellAlignment::Right).fg(
                if appliance.power < appliance.original_power() {
                    Color::Green
                } else {
                    Color::Reset
                },
            ),
            report.daily_costs.get(index).copied().flatten().map_or_else(
                || Cell::new("n/a").add_attribute(Attribute::Dim),
                |daily_cost| Cell::new(daily_cost).set_alignment(CellAlignment::Right),
            ),
            Cell::new(description),
        ]);
    }
    table
}
