use crate::events::Category;
use crate::simulation::TrafficStats;
use crate::views::projection::{category_counts, recent};
use crate::views::{header, paint_category, ViewContext};
use colored::Colorize;
use std::fmt::Write;

const BAR_WIDTH: u64 = 30;

pub fn render(ctx: &ViewContext) -> String {
    let mut out = header(
        "Security Dashboard",
        "Real-time network traffic analysis and anomaly detection",
    );
    let stats = &ctx.stats;

    // Percent normal is all-time while the table below only covers the window.
    let _ = writeln!(out, "{}", kpi_line(stats));

    let _ = writeln!(out, "\n{}", "Traffic Classification".bold());
    let counts = category_counts(stats);
    let max = counts.iter().map(|c| c.value).max().unwrap_or(0).max(1);
    for count in &counts {
        let width = (count.value * BAR_WIDTH / max) as usize;
        let _ = writeln!(
            out,
            "  {:<10} {} {}",
            count.category.label(),
            paint_category(count.category, &"█".repeat(width)),
            count.value
        );
    }

    let _ = writeln!(out, "\n{}", "Recent Traffic Analysis".bold());
    let rows = recent(&ctx.history, ctx.limits.dashboard_recent);
    if rows.is_empty() {
        let _ = writeln!(
            out,
            "  {}",
            "No packets analyzed yet. Start capture to begin.".bright_black()
        );
        return out;
    }

    let _ = writeln!(
        out,
        "  {:<10} {:<16} {:<16} {:<6} {:<10} {:>5}",
        "Time", "Source", "Destination", "Proto", "Status", "Conf."
    );
    for event in rows {
        let status = format!("{:<10}", event.category.label());
        let _ = writeln!(
            out,
            "  {:<10} {:<16} {:<16} {:<6} {} {:>4.0}%",
            event.timestamp,
            event.source_address,
            event.destination_address,
            event.transport_protocol.to_string(),
            badge(event.category, &status),
            event.confidence * 100.0
        );
    }
    out
}

/// Single-line KPI summary, also printed as the per-tick refresh.
pub fn kpi_line(stats: &TrafficStats) -> String {
    format!(
        "{} {}   {} {}   {} {}%   {} {}",
        "Total Packets:".bright_blue(),
        stats.total_events.to_string().bright_white().bold(),
        "Threats Detected:".bright_blue(),
        stats.total_alerts.to_string().red().bold(),
        "Normal Traffic:".bright_blue(),
        format!("{:.1}", stats.percent_normal()).green().bold(),
        "System Load:".bright_blue(),
        "Active".bright_white()
    )
}

fn badge(category: Category, text: &str) -> String {
    paint_category(category, text).bold().to_string()
}
