//! Terminal summary of a finished run

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::EdaReport;

/// Print the overview, the top correlations and the engineered features
pub fn display_summary(report: &EdaReport) {
    print_section("📋", "DATASET OVERVIEW");

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("📁 Rows"), Cell::new(report.overview.n_rows)]);
    table.add_row(vec![Cell::new("📐 Columns"), Cell::new(report.overview.n_cols)]);

    let missing_cells: usize = report.missing.iter().map(|(_, count)| *count).sum();
    table.add_row(vec![
        Cell::new("🕳️  Missing cells (before imputation)"),
        Cell::new(missing_cells).fg(if missing_cells == 0 {
            Color::White
        } else {
            Color::Yellow
        }),
    ]);
    table.add_row(vec![
        Cell::new("✨ Engineered features"),
        Cell::new(report.engineered.len()).fg(Color::Green),
    ]);
    print_indented(&table);

    print_section("🔗", &format!("TOP CORRELATIONS WITH {}", report.target.to_uppercase()));
    if report.top_correlations.is_empty() {
        println!("      {}", style("No correlations available").dim());
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Feature").add_attribute(Attribute::Bold),
            Cell::new("Correlation").add_attribute(Attribute::Bold),
        ]);
        for item in &report.top_correlations {
            let color = if item.correlation > 0.0 {
                Color::Green
            } else {
                Color::Red
            };
            table.add_row(vec![
                Cell::new(&item.feature),
                Cell::new(format!("{:+.3}", item.correlation)).fg(color),
            ]);
        }
        print_indented(&table);
    }

    print_section("✨", "ENGINEERED FEATURES");
    if report.engineered.is_empty() {
        println!("      {}", style("None (prerequisite columns absent)").dim());
    } else {
        for feature in &report.engineered {
            println!("        {} {}", style("•").dim(), feature);
        }
    }

    if !report.conclusions.is_empty() {
        print_section("📝", "CONCLUSIONS");
        for bullet in &report.conclusions {
            println!("        {} {}", style("•").dim(), bullet);
        }
    }

    print_section("⏱️ ", "TIMINGS");
    let t = &report.timings;
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Stage").add_attribute(Attribute::Bold),
        Cell::new("Time").add_attribute(Attribute::Bold),
    ]);
    for (stage, elapsed) in [
        ("Load", t.load),
        ("Impute", t.impute),
        ("Features", t.features),
        ("Analyze", t.analyze),
        ("Publish", t.publish),
    ] {
        table.add_row(vec![Cell::new(stage), Cell::new(format_duration(elapsed))]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(format_duration(t.total()))
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
    ]);
    print_indented(&table);
}

/// Plain, unstyled lines for non-interactive consumers
pub fn plain_summary(report: &EdaReport) -> Vec<String> {
    let mut lines = vec![format!(
        "overview: {} rows x {} columns",
        report.overview.n_rows, report.overview.n_cols
    )];
    lines.push(format!("columns: {}", report.overview.columns.join(", ")));
    for item in &report.top_correlations {
        lines.push(format!("corr {}: {:.4}", item.feature, item.correlation));
    }
    lines.push(format!("engineered: {}", report.engineered.join(", ")));
    lines
}

fn print_section(icon: &str, title: &str) {
    println!();
    println!("    {} {}", style(icon).cyan(), style(title).white().bold());
    println!("    {}", style("─".repeat(50)).dim());
    println!();
}

fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs < 1.0 {
        format!("{:.0} ms", secs * 1000.0)
    } else {
        format!("{:.2} s", secs)
    }
}
