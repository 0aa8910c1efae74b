pub mod dashboard;
pub mod help;
pub mod live;
pub mod projection;
pub mod reports;
pub mod visualizations;

use crate::config::settings::ViewLimits;
use crate::error::SimError;
use crate::events::{Category, PacketEvent};
use crate::monitoring::CaptureState;
use crate::simulation::{Scenario, Session, TrafficStats};
use colored::{ColoredString, Colorize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Dashboard,
    Live,
    Visualizations,
    Reports,
    Help,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Dashboard,
        Page::Live,
        Page::Visualizations,
        Page::Reports,
        Page::Help,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::Live => "live",
            Page::Visualizations => "visualizations",
            Page::Reports => "reports",
            Page::Help => "help",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Live => "Live Analysis",
            Page::Visualizations => "Visualizations",
            Page::Reports => "Logs & Reports",
            Page::Help => "Help & Docs",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Page {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .iter()
            .copied()
            .find(|p| p.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| SimError::InvalidPage(s.to_string()))
    }
}

/// Everything a page needs for one render, copied out of the session so the
/// lock is not held while formatting.
#[derive(Debug, Clone)]
pub struct ViewContext {
    pub stats: TrafficStats,
    pub history: Vec<PacketEvent>,
    pub scenario: Scenario,
    pub capture: CaptureState,
    pub limits: ViewLimits,
}

impl ViewContext {
    pub fn from_session(session: &Session, capture: CaptureState, limits: &ViewLimits) -> Self {
        Self {
            stats: session.stats(),
            history: session.history().snapshot(),
            scenario: session.scenario(),
            capture,
            limits: limits.clone(),
        }
    }
}

pub fn render(page: Page, ctx: &ViewContext) -> String {
    let body = match page {
        Page::Dashboard => dashboard::render(ctx),
        Page::Live => live::render(ctx),
        Page::Visualizations => visualizations::render(ctx),
        Page::Reports => reports::render(ctx),
        Page::Help => help::render(),
    };
    format!("{}\n{}", render_sidebar(page), body)
}

pub fn render_sidebar(current: Page) -> String {
    let items: Vec<String> = Page::ALL
        .iter()
        .map(|page| {
            if *page == current {
                format!("[{}]", page.title()).on_green().white().bold().to_string()
            } else {
                format!(" {} ", page.title()).bright_black().to_string()
            }
        })
        .collect();
    format!("{} {}", "NetGuard IDS │".bright_cyan().bold(), items.join(" "))
}

pub(crate) fn header(title: &str, subtitle: &str) -> String {
    format!(
        "\n{}\n{}\n{}\n{}\n",
        "═══════════════════════════════════════════════════════".cyan(),
        title.bright_cyan().bold(),
        subtitle.bright_black(),
        "═══════════════════════════════════════════════════════".cyan()
    )
}

pub(crate) fn paint_category(category: Category, text: &str) -> ColoredString {
    match category {
        Category::Normal => text.green(),
        Category::DoS => text.red(),
        Category::ArpSpoof => text.yellow(),
        Category::PortScan => text.magenta(),
    }
}

#[cfg(test)]
pub(crate) fn plain_context(events: &[PacketEvent]) -> ViewContext {
    colored::control::set_override(false);
    let mut stats = TrafficStats::default();
    for event in events {
        stats.ingest(event);
    }
    ViewContext {
        stats,
        history: events.to_vec(),
        scenario: Scenario::Mixed,
        capture: CaptureState::Idle,
        limits: ViewLimits::default(),
    }
}
