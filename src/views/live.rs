use crate::events::{Category, PacketEvent};
use crate::monitoring::CaptureState;
use crate::views::projection::recent;
use crate::views::{header, paint_category, ViewContext};
use colored::Colorize;
use std::fmt::Write;

pub fn render(ctx: &ViewContext) -> String {
    let mut out = header(
        "Traffic Analysis",
        "Capture live traffic or upload PCAP files for ML inspection",
    );

    let status = match ctx.capture {
        CaptureState::Capturing => "● CAPTURING".green().bold(),
        CaptureState::Idle => "○ IDLE".bright_black().bold(),
    };
    let _ = writeln!(
        out,
        "{}   {} {}",
        status,
        "Simulation Scenario:".bright_blue(),
        ctx.scenario.description()
    );
    if ctx.capture == CaptureState::Capturing {
        let _ = writeln!(
            out,
            "{}",
            "Capturing network packets... Analysis Model (Random Forest) Active".green()
        );
    }

    let _ = writeln!(
        out,
        "\n{} {}",
        "Terminal Output / Log".bold(),
        format!("(showing last {} packets)", ctx.limits.live_feed_len).bright_black()
    );

    let rows = recent(&ctx.history, ctx.limits.live_feed_len);
    if rows.is_empty() {
        let _ = writeln!(out, "{}", "Waiting for capture to start...".bright_black().italic());
    }
    for event in rows {
        let _ = writeln!(out, "{}", feed_line(event));
    }
    out
}

/// `[ts] PROTO src → dst len:N VERDICT`
pub fn feed_line(event: &PacketEvent) -> String {
    format!(
        "{} {} {} {} {}",
        format!("[{}]", event.timestamp).bright_black(),
        format!("{:<5}", event.transport_protocol.to_string()).blue(),
        format!("{} → {}", event.source_address, event.destination_address),
        format!("len:{}", event.payload_length).bright_black(),
        paint_category(event.category, &verdict(event.category)).bold()
    )
}

pub fn verdict(category: Category) -> String {
    match category {
        Category::Normal => "✓ NORMAL".to_string(),
        other => format!("⚠ {}", other.label().to_uppercase()),
    }
}
