pub mod command;

pub use command::Command;

use crate::config::settings::{Settings, ViewLimits};
use crate::error::Result;
use crate::monitoring::{CaptureScheduler, CaptureState, CaptureUpdate};
use crate::simulation::{EventGenerator, Session};
use crate::views::{self, dashboard, live, reports, Page, ViewContext};
use crossbeam_channel::Receiver;
use parking_lot::Mutex;
use std::sync::Arc;

/// What the front end should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Render(String),
    Message(String),
    Quit,
}

/// Top-level owner of the session and the UI selections (page, capture
/// toggle, scenario). Also owns the receiving end of the tick channel so
/// every applied tick can be turned into a view refresh.
pub struct Controller {
    session: Arc<Mutex<Session>>,
    scheduler: CaptureScheduler,
    updates: Receiver<CaptureUpdate>,
    page: Page,
    limits: ViewLimits,
}

impl Controller {
    pub fn new(settings: &Settings) -> Self {
        let generator = match settings.seed {
            Some(seed) => {
                log::info!("Seeding generator with {}", seed);
                EventGenerator::seeded(seed)
            }
            None => EventGenerator::from_entropy(),
        };
        let session = Arc::new(Mutex::new(Session::new(
            generator,
            settings.history_capacity,
            settings.default_scenario,
        )));
        let (update_tx, update_rx) = crossbeam_channel::unbounded();
        let scheduler =
            CaptureScheduler::new(Arc::clone(&session), settings.tick_interval(), update_tx);

        Self {
            session,
            scheduler,
            updates: update_rx,
            page: Page::default(),
            limits: settings.views.clone(),
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn capture_state(&self) -> CaptureState {
        self.scheduler.state()
    }

    pub fn session(&self) -> Arc<Mutex<Session>> {
        Arc::clone(&self.session)
    }

    /// Tick notifications, one per applied tick in order.
    pub fn updates(&self) -> Receiver<CaptureUpdate> {
        self.updates.clone()
    }

    /// Incremental output for one tick on the current page. Pages without a
    /// per-tick view (reports, help) return `None`.
    pub fn refresh(&self, update: &CaptureUpdate) -> Option<String> {
        match self.page {
            Page::Live => Some(live::feed_line(&update.event)),
            Page::Dashboard | Page::Visualizations => Some(dashboard::kpi_line(&update.stats)),
            Page::Reports | Page::Help => None,
        }
    }

    pub fn render_current(&self) -> String {
        let ctx = {
            let session = self.session.lock();
            ViewContext::from_session(&session, self.scheduler.state(), &self.limits)
        };
        views::render(self.page, &ctx)
    }

    pub fn handle(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::Start => {
                if self.scheduler.start() {
                    log::info!("▶ Live capture started");
                    self.page = Page::Live;
                    Ok(Outcome::Render(self.render_current()))
                } else {
                    Ok(Outcome::Message("Capture is already running".to_string()))
                }
            }
            Command::Stop => {
                if self.scheduler.stop()? {
                    log::info!("■ Live capture stopped");
                    Ok(Outcome::Render(self.render_current()))
                } else {
                    Ok(Outcome::Message("Capture is not running".to_string()))
                }
            }
            Command::SetScenario(scenario) => {
                self.session.lock().set_scenario(scenario);
                Ok(Outcome::Message(format!(
                    "Simulation scenario: {}",
                    scenario.description()
                )))
            }
            Command::Navigate(page) => {
                self.page = page;
                Ok(Outcome::Render(self.render_current()))
            }
            Command::Show => Ok(Outcome::Render(self.render_current())),
            Command::Status => Ok(Outcome::Message(self.status_line())),
            Command::Export => {
                let history = self.session.lock().history().snapshot();
                let mut buffer = Vec::new();
                let count = reports::export_jsonl(&history, &mut buffer)?;
                log::info!("Exported {} records", count);
                Ok(Outcome::Message(String::from_utf8_lossy(&buffer).into_owned()))
            }
            Command::Upload(name) => Ok(Outcome::Message(format!(
                "File {} ready for analysis. (Uploads are not processed by the simulator)",
                name
            ))),
            Command::Quit => Ok(Outcome::Quit),
        }
    }

    fn status_line(&self) -> String {
        let session = self.session.lock();
        let stats = session.stats();
        format!(
            "Capture: {} | Tick: {} ms | Scenario: {} | Page: {} | Packets: {} | Alerts: {} | Window: {}/{}",
            self.scheduler.state(),
            self.scheduler.interval().as_millis(),
            session.scenario(),
            self.page,
            stats.total_events,
            stats.total_alerts,
            session.history().len(),
            session.history().capacity()
        )
    }

    /// Stops capture if it is running and hands back the ticks that were
    /// applied but not yet consumed. Safe to call more than once.
    pub fn shutdown(&mut self) -> Result<Vec<CaptureUpdate>> {
        if self.scheduler.stop()? {
            log::info!("Capture stopped for shutdown");
        }
        // The capture thread has been joined, so nothing more can arrive.
        let pending: Vec<CaptureUpdate> = self.updates.try_iter().collect();
        if !pending.is_empty() {
            log::debug!("Draining {} pending updates", pending.len());
        }
        Ok(pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::Scenario;
    use std::thread::sleep;
    use std::time::Duration;

    fn controller() -> Controller {
        colored::control::set_override(false);
        let settings = Settings {
            tick_interval_ms: 5,
            seed: Some(17),
            ..Settings::default()
        };
        Controller::new(&settings)
    }

    #[test]
    fn test_start_stop_cycle() {
        let mut controller = controller();
        let updates = controller.updates();
        assert_eq!(controller.page(), Page::Dashboard);

        assert!(matches!(controller.handle(Command::Start).unwrap(), Outcome::Render(_)));
        assert_eq!(controller.page(), Page::Live);
        assert_eq!(controller.capture_state(), CaptureState::Capturing);
        assert!(matches!(controller.handle(Command::Start).unwrap(), Outcome::Message(_)));

        sleep(Duration::from_millis(50));
        controller.handle(Command::Stop).unwrap();
        assert_eq!(controller.capture_state(), CaptureState::Idle);

        let total = controller.session().lock().stats().total_events;
        assert!(total > 0);
        assert_eq!(updates.try_iter().count() as u64, total);
    }

    #[test]
    fn test_scenario_and_navigation() {
        let mut controller = controller();
        controller.handle(Command::SetScenario(Scenario::Scan)).unwrap();
        assert_eq!(controller.session().lock().scenario(), Scenario::Scan);

        match controller.handle(Command::Navigate(Page::Help)).unwrap() {
            Outcome::Render(text) => assert!(text.contains("Demo walkthrough")),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_no_command_lowers_totals() {
        let mut controller = controller();
        let mut last_total = 0;
        let lines = [
            "start", "scenario dos", "page reports", "show", "status", "export",
            "upload a.pcap", "stop", "scenario scan", "dashboard", "start", "stop",
        ];
        for line in lines {
            controller.session().lock().tick();
            let command: Command = line.parse().unwrap();
            controller.handle(command).unwrap();
            let stats = controller.session().lock().stats();
            assert!(stats.total_events > last_total, "'{}' lowered the totals", line);
            assert!(stats.is_consistent());
            last_total = stats.total_events;
        }
        assert!(matches!("reset".parse::<Command>(), Err(crate::error::SimError::UnknownCommand(_))));
        controller.shutdown().unwrap();
    }

    #[test]
    fn test_refresh_per_page() {
        let mut controller = controller();
        let event = controller.session().lock().tick();
        let update = CaptureUpdate {
            stats: controller.session().lock().stats(),
            event,
        };

        let on_dashboard = controller.refresh(&update).unwrap();
        assert!(on_dashboard.contains("Total Packets: 1"));

        controller.handle(Command::Navigate(Page::Live)).unwrap();
        assert_eq!(controller.refresh(&update), Some(live::feed_line(&update.event)));

        controller.handle(Command::Navigate(Page::Visualizations)).unwrap();
        assert!(controller.refresh(&update).is_some());

        controller.handle(Command::Navigate(Page::Reports)).unwrap();
        assert_eq!(controller.refresh(&update), None);
        controller.handle(Command::Navigate(Page::Help)).unwrap();
        assert_eq!(controller.refresh(&update), None);
    }

    #[test]
    fn test_scheduled_tick_reaches_live_view() {
        let mut controller = controller();
        let updates = controller.updates();
        controller.handle(Command::Start).unwrap();

        let update = updates.recv_timeout(Duration::from_secs(2)).unwrap();
        let line = controller.refresh(&update).unwrap();
        assert!(line.contains(&update.event.source_address));
        assert!(line.contains(&live::verdict(update.event.category)));
        assert_eq!(update.stats.total_events, update.event.id);

        controller.shutdown().unwrap();
    }

    #[test]
    fn test_shutdown_drains_pending_updates() {
        let mut controller = controller();
        let updates = controller.updates();
        controller.handle(Command::Start).unwrap();
        sleep(Duration::from_millis(20));
        let seen = updates.try_iter().count() as u64;
        sleep(Duration::from_millis(30));

        let pending = controller.shutdown().unwrap();
        let total = controller.session().lock().stats().total_events;
        assert_eq!(seen + pending.len() as u64, total);
        if let Some(last) = pending.last() {
            assert_eq!(last.stats.total_events, total);
        }
        assert!(controller.shutdown().unwrap().is_empty());
    }

    #[test]
    fn test_status_and_export() {
        let mut controller = controller();
        for _ in 0..3 {
            controller.session().lock().tick();
        }
        match controller.handle(Command::Status).unwrap() {
            Outcome::Message(text) => {
                assert!(text.contains("Capture: idle"));
                assert!(text.contains("Tick: 5 ms"));
                assert!(text.contains("Packets: 3"));
                assert!(text.contains("Window: 3/100"));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        match controller.handle(Command::Export).unwrap() {
            Outcome::Message(text) => assert_eq!(text.lines().count(), 3),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_quit_and_repeated_shutdown() {
        let mut controller = controller();
        assert_eq!(controller.handle(Command::Quit).unwrap(), Outcome::Quit);
        controller.handle(Command::Start).unwrap();
        controller.shutdown().unwrap();
        controller.shutdown().unwrap();
        assert_eq!(controller.capture_state(), CaptureState::Idle);
    }
}
