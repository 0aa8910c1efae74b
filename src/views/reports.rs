use crate::error::Result;
use crate::events::PacketEvent;
use crate::views::{header, paint_category, ViewContext};
use colored::Colorize;
use std::fmt::Write as _;
use std::io::Write;

pub fn render(ctx: &ViewContext) -> String {
    let mut out = header(
        "Logs & Reports",
        "History window report (type 'export' for JSON lines)",
    );

    let _ = writeln!(
        out,
        "{} {} of {} ingested ({} alerts all-time)",
        "Window:".bright_blue(),
        ctx.history.len(),
        ctx.stats.total_events,
        ctx.stats.total_alerts
    );

    if ctx.history.is_empty() {
        let _ = writeln!(out, "  {}", "Nothing captured yet.".bright_black());
        return out;
    }

    let _ = writeln!(
        out,
        "  {:>6} {:<10} {:<16} {:<16} {:<6} {:>6} {:<10} {:>6}",
        "Id", "Time", "Source", "Destination", "Proto", "Length", "Label", "Conf."
    );
    for event in &ctx.history {
        let _ = writeln!(
            out,
            "  {:>6} {:<10} {:<16} {:<16} {:<6} {:>6} {} {:>5.1}%",
            event.id,
            event.timestamp,
            event.source_address,
            event.destination_address,
            event.transport_protocol.to_string(),
            event.payload_length,
            paint_category(event.category, &format!("{:<10}", event.category.label())),
            event.confidence * 100.0
        );
    }
    out
}

/// Writes the window as JSON lines, oldest first. Returns the record count.
pub fn export_jsonl<W: Write>(history: &[PacketEvent], writer: &mut W) -> Result<usize> {
    for event in history {
        let json = serde_json::to_string(event)?;
        writeln!(writer, "{}", json)?;
    }
    writer.flush()?;
    Ok(history.len())
}
