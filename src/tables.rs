use comfy_table::{Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{reading::EnergyReading, source::EnergySource, statistics::Summary};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

pub fn build_sources_table(sources: &[EnergySource]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["#", "Source", "Output", "Threshold", "Status"]);
    for (index, source) in sources.iter().enumerate() {
        let issue = source.check_for_issues();
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(source.source_name()),
            Cell::new(source.generate_energy()).set_alignment(CellAlignment::Right),
            Cell::new(source.kind().threshold()).set_alignment(CellAlignment::Right),
            match issue {
                Some(issue) => Cell::new(issue).fg(Color::Red),
                None => Cell::new("OK").fg(Color::Green),
            },
        ]);
    }
    table
}

pub fn build_history_table(readings: &[EnergyReading]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Timestamp", "Source", "Energy"]);
    for reading in readings {
        table.add_row(vec![
            Cell::new(reading.timestamp.format(crate::reading::TIMESTAMP_FORMAT)),
            Cell::new(&reading.source_name),
            Cell::new(reading.energy).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

pub fn build_summary_table(summary: &Summary) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Statistic", "Value"]);
    for (name, value) in [
        ("Mean", summary.mean),
        ("Median", summary.median),
        ("Mode", summary.mode),
        ("Range", summary.range),
        ("Midrange", summary.midrange),
    ] {
        table.add_row(vec![Cell::new(name), Cell::new(value).set_alignment(CellAlignment::Right)]);
    }
    table
}
