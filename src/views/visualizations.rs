use crate::views::projection::{distribution, suspicious_sources, time_series};
use crate::views::{header, paint_category, ViewContext};
use colored::Colorize;
use std::fmt::Write;

const SLICE_WIDTH: f64 = 40.0;
const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub fn render(ctx: &ViewContext) -> String {
    let mut out = header(
        "Visual Analytics",
        "Deep dive into traffic patterns and attack vectors",
    );

    let _ = writeln!(out, "{}", "Attack Distribution".bold());
    let slices = distribution(&ctx.stats);
    if slices.is_empty() {
        let _ = writeln!(out, "  {}", "No data available yet".bright_black());
    }
    for slice in &slices {
        let width = (slice.share / 100.0 * SLICE_WIDTH).round() as usize;
        let _ = writeln!(
            out,
            "  {:<10} {:>5.1}% {} ({})",
            slice.category.label(),
            slice.share,
            paint_category(slice.category, &"■".repeat(width.max(1))),
            slice.value
        );
    }

    let _ = writeln!(out, "\n{}", "Traffic Volume vs. Alerts".bold());
    let series = time_series(&ctx.history, ctx.limits.series_buckets);
    if series.is_empty() {
        let _ = writeln!(out, "  {}", "Waiting for traffic...".bright_black());
    } else {
        let peak = series.iter().map(|b| b.packets).max().unwrap_or(1).max(1);
        let packets: Vec<u64> = series.iter().map(|b| b.packets).collect();
        let alerts: Vec<u64> = series.iter().map(|b| b.alerts).collect();
        let _ = writeln!(out, "  {:<14} {}", "Total Packets", sparkline(&packets, peak).blue());
        let _ = writeln!(out, "  {:<14} {}", "Attacks", sparkline(&alerts, peak).red());
        let _ = writeln!(
            out,
            "  {}",
            format!(
                "{} .. {} ({} buckets)",
                series[0].label,
                series[series.len() - 1].label,
                series.len()
            )
            .bright_black()
        );
    }

    let _ = writeln!(out, "\n{}", "Top Suspicious Sources".bold());
    let sources = suspicious_sources(&ctx.history, ctx.limits.suspicious_sources);
    if sources.is_empty() {
        let _ = writeln!(out, "  {}", "No suspicious sources detected yet.".bright_black());
        return out;
    }
    let _ = writeln!(
        out,
        "  {:<16} {:>8}  {:<18} {}",
        "Source IP", "Activity", "Primary Detection", "Last Seen"
    );
    for source in sources {
        let _ = writeln!(
            out,
            "  {} {:>8}  {} {}",
            format!("{:<16}", source.address).red().bold(),
            source.activity_count,
            paint_category(
                source.primary_category,
                &format!("{:<18}", source.primary_category.label())
            ),
            source.last_seen.bright_black()
        );
    }
    out
}

fn sparkline(values: &[u64], peak: u64) -> String {
    values
        .iter()
        .map(|&v| {
            if v == 0 {
                ' '
            } else {
                let level = (v * (SPARK_LEVELS.len() as u64 - 1)) / peak;
                SPARK_LEVELS[level as usize]
            }
        })
        .collect()
}
