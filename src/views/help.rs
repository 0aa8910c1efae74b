use crate::views::header;
use colored::Colorize;
use std::fmt::Write;

const WALKTHROUGH: [&str; 6] = [
    "Start on the Dashboard to show the clean state.",
    "Navigate to Live Analysis ('live').",
    "Run 'start', then 'scenario dos' or 'scenario scan' to simulate attacks.",
    "Watch the feed turn red (DoS) or magenta (Port Scan).",
    "Open Visualizations to see the distribution update in real time.",
    "Come back here to explain the detection logic.",
];

pub fn render() -> String {
    let mut out = header("Help & Documentation", "How the simulated IDS works");

    let _ = writeln!(out, "{}", "About".bold());
    let _ = writeln!(
        out,
        "  This is an educational IDS demo. Packets are synthesized every tick and\n  \
         labeled by a biased random generator standing in for a Random Forest\n  \
         classifier. Nothing is captured from the network."
    );

    let _ = writeln!(out, "\n{}", "Detected classes".bold());
    let _ = writeln!(out, "  {}  ordinary LAN and Internet traffic", "Normal   ".green());
    let _ = writeln!(out, "  {}  flood of 64-byte TCP packets at one host", "DoS      ".red());
    let _ = writeln!(out, "  {}  ARP replies claiming the gateway", "ARP Spoof".yellow());
    let _ = writeln!(out, "  {}  one source probing many ports", "Port Scan".magenta());

    let _ = writeln!(out, "\n{}", "Commands".bold());
    let _ = writeln!(
        out,
        "  start | stop | scenario <mixed|dos|scan> | page <name> | <page name>\n  \
         show | status | export | upload <file> | help | q"
    );

    let _ = writeln!(out, "\n{}", "Demo walkthrough".bold());
    for (i, step) in WALKTHROUGH.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, step);
    }
    out
}
