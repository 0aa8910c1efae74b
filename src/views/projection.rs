//! Read-only projections the views derive from the session on each render.
//!
//! All functions take the aggregate counters and/or the history window
//! (oldest first) and never keep state between calls.

use crate::events::{Category, PacketEvent};
use crate::simulation::TrafficStats;
use std::cmp::Reverse;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryCount {
    pub category: Category,
    pub value: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionSlice {
    pub category: Category,
    pub value: u64,
    /// Percent of all-time events
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeBucket {
    pub label: String,
    pub packets: u64,
    pub alerts: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuspiciousSource {
    pub address: String,
    pub activity_count: u64,
    pub primary_category: Category,
    pub last_seen: String,
    last_id: u64,
}

/// One entry per category, zeros included, in fixed order.
pub fn category_counts(stats: &TrafficStats) -> Vec<CategoryCount> {
    Category::ALL
        .iter()
        .map(|&category| CategoryCount {
            category,
            value: stats.count(category),
        })
        .collect()
}

/// Pie projection: categories that have been seen at least once.
pub fn distribution(stats: &TrafficStats) -> Vec<DistributionSlice> {
    category_counts(stats)
        .into_iter()
        .filter(|c| c.value > 0)
        .map(|c| DistributionSlice {
            category: c.category,
            value: c.value,
            share: c.value as f64 / stats.total_events as f64 * 100.0,
        })
        .collect()
}

/// The last `k` records, newest first.
pub fn recent(history: &[PacketEvent], k: usize) -> Vec<&PacketEvent> {
    history.iter().rev().take(k).collect()
}

/// Groups records by timestamp label in first-seen order and keeps the last
/// `max_buckets` groups.
pub fn time_series(history: &[PacketEvent], max_buckets: usize) -> Vec<TimeBucket> {
    let mut buckets: Vec<TimeBucket> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for event in history {
        let slot = *index.entry(event.timestamp.as_str()).or_insert_with(|| {
            buckets.push(TimeBucket {
                label: event.timestamp.clone(),
                packets: 0,
                alerts: 0,
            });
            buckets.len() - 1
        });
        let bucket = &mut buckets[slot];
        bucket.packets += 1;
        if event.is_alert() {
            bucket.alerts += 1;
        }
    }

    let skip = buckets.len().saturating_sub(max_buckets);
    buckets.split_off(skip)
}

/// Alerting sources in the window, most recently seen first.
pub fn suspicious_sources(history: &[PacketEvent], limit: usize) -> Vec<SuspiciousSource> {
    let mut by_source: HashMap<&str, (SuspiciousSource, HashMap<Category, u64>)> = HashMap::new();

    for event in history.iter().filter(|e| e.is_alert()) {
        let (source, categories) = by_source
            .entry(event.source_address.as_str())
            .or_insert_with(|| {
                (
                    SuspiciousSource {
                        address: event.source_address.clone(),
                        activity_count: 0,
                        primary_category: event.category,
                        last_seen: String::new(),
                        last_id: 0,
                    },
                    HashMap::new(),
                )
            });
        source.activity_count += 1;
        source.last_seen = event.timestamp.clone();
        source.last_id = event.id;
        *categories.entry(event.category).or_insert(0) += 1;
    }

    let mut sources: Vec<SuspiciousSource> = by_source
        .into_values()
        .map(|(mut source, categories)| {
            // Ties resolve to the category listed first in Category::ALL.
            if let Some((_, primary)) = Category::ALL
                .iter()
                .enumerate()
                .filter(|(_, c)| categories.contains_key(*c))
                .max_by_key(|(i, c)| (categories[*c], Reverse(*i)))
            {
                source.primary_category = *primary;
            }
            source
        })
        .collect();

    sources.sort_by(|a, b| b.last_id.cmp(&a.last_id));
    sources.truncate(limit);
    sources
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::sample_event;

    fn window() -> Vec<PacketEvent> {
        vec![
            sample_event(1, "10:00:00", Category::Normal),
            sample_event(2, "10:00:00", Category::DoS),
            sample_event(3, "10:00:01", Category::DoS),
            sample_event(4, "10:00:02", Category::PortScan),
        ]
    }

    #[test]
    fn test_category_counts_include_zeros() {
        let mut stats = TrafficStats::default();
        for event in window() {
            stats.ingest(&event);
        }
        let counts: Vec<(Category, u64)> = category_counts(&stats)
            .iter()
            .map(|c| (c.category, c.value))
            .collect();
        assert_eq!(
            counts,
            vec![
                (Category::Normal, 1),
                (Category::DoS, 2),
                (Category::ArpSpoof, 0),
                (Category::PortScan, 1),
            ]
        );

        let pie = distribution(&stats);
        assert_eq!(pie.len(), 3);
        assert!(pie.iter().all(|s| s.category != Category::ArpSpoof));
        assert!((pie[1].share - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_distribution_empty_before_first_record() {
        assert!(distribution(&TrafficStats::default()).is_empty());
    }

    #[test]
    fn test_recent_is_newest_first() {
        let history = window();
        let ids: Vec<u64> = recent(&history, 3).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![4, 3, 2]);
        assert_eq!(recent(&history, 10).len(), 4);
        assert!(recent(&[], 5).is_empty());
    }

    #[test]
    fn test_time_series_groups_by_label() {
        let series = time_series(&window(), 20);
        assert_eq!(
            series,
            vec![
                TimeBucket { label: "10:00:00".into(), packets: 2, alerts: 1 },
                TimeBucket { label: "10:00:01".into(), packets: 1, alerts: 1 },
                TimeBucket { label: "10:00:02".into(), packets: 1, alerts: 1 },
            ]
        );
    }

    #[test]
    fn test_time_series_keeps_last_buckets() {
        let history: Vec<PacketEvent> = (0..30)
            .map(|i| sample_event(i + 1, &format!("10:00:{:02}", i), Category::Normal))
            .collect();
        let series = time_series(&history, 20);
        assert_eq!(series.len(), 20);
        assert_eq!(series[0].label, "10:00:10");
        assert_eq!(series[19].label, "10:00:29");
    }

    #[test]
    fn test_suspicious_sources() {
        let mut history = window();
        let mut arp = sample_event(5, "10:00:03", Category::ArpSpoof);
        arp.source_address = "192.168.1.105".into();
        history.push(arp);
        let mut repeat = sample_event(6, "10:00:04", Category::PortScan);
        repeat.source_address = history[1].source_address.clone();
        history.push(repeat);

        let sources = suspicious_sources(&history, 5);
        assert_eq!(sources.len(), 4);
        assert_eq!(sources[0].address, "10.1.1.2");
        assert_eq!(sources[0].activity_count, 2);
        assert_eq!(sources[0].primary_category, Category::DoS);
        assert_eq!(sources[0].last_seen, "10:00:04");
        assert_eq!(sources[1].address, "192.168.1.105");

        assert_eq!(suspicious_sources(&history, 2).len(), 2);
        assert!(suspicious_sources(&history[..1], 5).is_empty());
    }
}
