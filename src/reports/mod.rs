use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use powerforge::api::SearchReport;
use powerforge::grid::{CellKind, Grid, Rate, COLS};
use powerforge::optimizer::SolutionItem;

pub fn print_grid(name: &str, grid: &Grid) {
    println!("\nLayout: {}", name);
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let cells: Vec<(CellKind, char)> = grid.iter().map(|(_, k)| (k, k.symbol())).collect();
    for chunk in cells.chunks(COLS) {
        let row: Vec<Cell> = chunk
            .iter()
            .map(|&(kind, sym)| {
                let cell = Cell::new(sym).set_alignment(CellAlignment::Center);
                match kind {
                    CellKind::Crystal => cell.fg(Color::Cyan),
                    CellKind::Tiberium => cell.fg(Color::Green),
                    CellKind::Accumulator => cell.fg(Color::Yellow).add_attribute(Attribute::Bold),
                    CellKind::PowerPlant => cell.fg(Color::Red),
                    _ => cell,
                }
            })
            .collect();
        table.add_row(row);
    }
    println!("{}", table);
}

pub fn print_ranking(reports: &[SearchReport]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Grid").add_attribute(Attribute::Bold),
        Cell::new("Best/h").fg(Color::Cyan),
        Cell::new("Baseline/h"),
        Cell::new("Accus"),
        Cell::new("Top-N"),
        Cell::new("Phase"),
        Cell::new("Solutions"),
        Cell::new("Iterations"),
        Cell::new("ms"),
    ]);

    for i in 2..=9 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for r in reports {
        table.add_row(vec![
            Cell::new(r.grid_index),
            Cell::new(&r.grid_name).add_attribute(Attribute::Bold),
            Cell::new(group_digits(r.best_rate)).fg(Color::Cyan),
            Cell::new(group_digits(r.baseline_rate)),
            Cell::new(r.accumulators.len()),
            Cell::new(r.top_n),
            Cell::new(r.phase),
            Cell::new(r.num_solutions),
            Cell::new(r.iterations),
            Cell::new(format!("{:.1}", r.elapsed_ms)),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_path(solution: &SolutionItem, baseline: Rate) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.add_row(vec![
        Cell::new("Step").add_attribute(Attribute::Bold),
        Cell::new("Cell"),
        Cell::new("Rate/h").fg(Color::Cyan),
        Cell::new("Gain/h").fg(Color::Green),
    ]);

    let gains = solution.gains(baseline);
    for (i, (node, gain)) in solution.path.iter().zip(gains).enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(node.coord),
            Cell::new(group_digits(node.power_rate)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:+}", gain)).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{}", table);
}

pub fn print_baselines(rows: &[(String, Rate)]) {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.add_row(vec![
        Cell::new("Grid").add_attribute(Attribute::Bold),
        Cell::new("Baseline/h").fg(Color::Cyan),
    ]);
    for (name, rate) in rows {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(group_digits(*rate)).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("\n{}", table);
}

fn group_digits(value: Rate) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
