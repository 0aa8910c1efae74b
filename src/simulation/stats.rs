use crate::events::{Category, PacketEvent};
use serde::{Deserialize, Serialize};

/// All-time counters over every ingested record. Eviction from the history
/// window never touches these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficStats {
    pub total_events: u64,
    pub total_alerts: u64,
    pub normal_count: u64,
    pub dos_count: u64,
    pub arp_count: u64,
    pub scan_count: u64,
}

impl TrafficStats {
    pub fn ingest(&mut self, event: &PacketEvent) {
        self.total_events += 1;
        if event.is_alert() {
            self.total_alerts += 1;
        }
        match event.category {
            Category::Normal => self.normal_count += 1,
            Category::DoS => self.dos_count += 1,
            Category::ArpSpoof => self.arp_count += 1,
            Category::PortScan => self.scan_count += 1,
        }
    }

    pub fn count(&self, category: Category) -> u64 {
        match category {
            Category::Normal => self.normal_count,
            Category::DoS => self.dos_count,
            Category::ArpSpoof => self.arp_count,
            Category::PortScan => self.scan_count,
        }
    }

    /// Share of normal traffic in percent; zero before the first record.
    pub fn percent_normal(&self) -> f64 {
        if self.total_events == 0 {
            return 0.0;
        }
        self.normal_count as f64 / self.total_events as f64 * 100.0
    }

    pub fn is_consistent(&self) -> bool {
        self.total_events == self.normal_count + self.dos_count + self.arp_count + self.scan_count
            && self.total_alerts == self.dos_count + self.arp_count + self.scan_count
    }
}
