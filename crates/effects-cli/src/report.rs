//! Human-readable tables for command output.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use effects_core::GroupMaxN;
use effects_model::{Candidate, DetailLayout, OverviewLayout};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_layout_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .add_attribute(Attribute::Bold)
        .fg(Color::Cyan)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn optional_cell(value: Option<f64>) -> Cell {
    match value {
        Some(value) => Cell::new(format_number(value)),
        None => dim_cell("-"),
    }
}

/// Whole numbers without a fraction, everything else to three decimals.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value:.3}")
    }
}

/// Candidate listing: key, label and the group's maximum total sample size.
pub fn candidates_table(candidates: &[Candidate], group_max_n: &GroupMaxN) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Key"),
        header_cell("Label"),
        header_cell("Max N"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for candidate in candidates {
        table.add_row(vec![
            Cell::new(candidate.key.to_string()),
            Cell::new(&candidate.label),
            optional_cell(group_max_n.get(&candidate.key)),
        ]);
    }
    table
}

/// One line per placed overview item, row by row.
pub fn overview_table(layout: &OverviewLayout) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Key"),
        header_cell("Item"),
        header_cell("Coef"),
        header_cell("N"),
        header_cell("X"),
        header_cell("Y"),
    ]);
    apply_layout_table_style(&mut table);
    for index in [0, 3, 4, 5, 6] {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for row in &layout.rows {
        if row.items.is_empty() {
            table.add_row(vec![
                Cell::new(row.index),
                Cell::new(row.key.to_string()),
                dim_cell("(no items)"),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
            ]);
            continue;
        }
        for item in &row.items {
            table.add_row(vec![
                Cell::new(row.index),
                Cell::new(row.key.to_string()),
                Cell::new(&item.feature),
                Cell::new(format!("{:.2}", item.coef)),
                optional_cell(item.n_support),
                Cell::new(item.x),
                Cell::new(item.y),
            ]);
        }
    }
    table
}

/// One line per forest row, in plotted order.
pub fn detail_table(layout: &DetailLayout) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Item"),
        header_cell("Coef"),
        header_cell("CI"),
        header_cell("Sample"),
        header_cell("Bar"),
        header_cell("Point"),
        header_cell("Y"),
    ]);
    apply_layout_table_style(&mut table);
    for index in [0, 2, 4, 6, 7] {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for row in &layout.rows {
        table.add_row(vec![
            Cell::new(row.rank),
            Cell::new(&row.feature),
            Cell::new(format!("{:.3}", row.coef)),
            Cell::new(format!("[{:.3}, {:.3}]", row.ci_low, row.ci_high)),
            Cell::new(&row.sample_label),
            Cell::new(format!("{}..{}", row.x_low, row.x_high)),
            Cell::new(row.x_point),
            Cell::new(row.y_mid),
        ]);
    }
    table
}
