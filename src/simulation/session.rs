use crate::events::PacketEvent;
use crate::simulation::generator::{EventGenerator, Scenario};
use crate::simulation::history::HistoryStore;
use crate::simulation::stats::TrafficStats;

/// Session-level state: the single owner of the history window and the
/// all-time counters. Everything else reads projections of it.
pub struct Session {
    generator: EventGenerator,
    history: HistoryStore,
    stats: TrafficStats,
    scenario: Scenario,
}

impl Session {
    pub fn new(generator: EventGenerator, history_capacity: usize, scenario: Scenario) -> Self {
        Self {
            generator,
            history: HistoryStore::new(history_capacity),
            stats: TrafficStats::default(),
            scenario,
        }
    }

    pub fn scenario(&self) -> Scenario {
        self.scenario
    }

    /// Applies from the next tick on. Records already in the window keep
    /// their labels.
    pub fn set_scenario(&mut self, scenario: Scenario) {
        if scenario != self.scenario {
            log::info!("Scenario changed: {} -> {}", self.scenario, scenario);
        }
        self.scenario = scenario;
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn stats(&self) -> TrafficStats {
        self.stats
    }

    /// Generates one record for the current scenario and ingests it.
    pub fn tick(&mut self) -> PacketEvent {
        let event = self.generator.generate(self.scenario);
        self.ingest(event.clone());
        event
    }

    pub fn ingest(&mut self, event: PacketEvent) {
        self.stats.ingest(&event);
        self.history.append(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{sample_event, Category};

    fn session() -> Session {
        Session::new(EventGenerator::seeded(3), 100, Scenario::Mixed)
    }

    #[test]
    fn test_concrete_ingest_sequence() {
        let mut session = session();
        let events: Vec<PacketEvent> = [
            Category::Normal,
            Category::DoS,
            Category::DoS,
            Category::PortScan,
        ]
        .iter()
        .enumerate()
        .map(|(i, c)| sample_event(i as u64 + 1, "12:00:00", *c))
        .collect();

        for event in &events {
            session.ingest(event.clone());
        }

        let stats = session.stats();
        assert_eq!(stats.total_events, 4);
        assert_eq!(stats.total_alerts, 3);
        assert_eq!(stats.normal_count, 1);
        assert_eq!(stats.dos_count, 2);
        assert_eq!(stats.scan_count, 1);
        assert_eq!(stats.arp_count, 0);
        assert_eq!(session.history().snapshot(), events);
    }

    #[test]
    fn test_eviction_does_not_decrement_stats() {
        let mut session = session();
        for _ in 0..150 {
            session.tick();
        }
        assert_eq!(session.history().len(), 100);
        assert_eq!(session.stats().total_events, 150);
        assert!(session.stats().is_consistent());

        let ids: Vec<u64> = session.history().iter().map(|e| e.id).collect();
        assert_eq!(ids, (51..=150).collect::<Vec<u64>>());
    }

    #[test]
    fn test_scenario_change_is_not_retroactive() {
        let mut session = session();
        session.set_scenario(Scenario::Scan);
        for _ in 0..50 {
            session.tick();
        }
        session.set_scenario(Scenario::Dos);
        for _ in 0..50 {
            session.tick();
        }
        let snapshot = session.history().snapshot();
        assert!(snapshot[..50].iter().all(|e| e.category != Category::DoS));
        assert!(snapshot[50..].iter().all(|e| e.category != Category::PortScan));
    }
}
