use crate::events::{Category, PacketEvent};
use std::fmt;

#[derive(Debug, Clone)]
pub struct Alert {
    pub severity: AlertSeverity,
    pub rule_name: String,
    pub description: String,
    pub source_address: String,
    pub event_id: u64,
    pub evidence: Vec<String>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSeverity {
    Medium,
    High,
    Critical,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} - {} - {} - Evidence: {:?}",
            self.severity_str(),
            self.rule_name,
            self.source_address,
            self.description,
            self.evidence
        )
    }
}

impl Alert {
    /// Builds the alert for a flagged record. Normal traffic yields `None`.
    pub fn from_event(event: &PacketEvent) -> Option<Self> {
        let (severity, rule_name, description) = match event.category {
            Category::Normal => return None,
            Category::DoS => (
                AlertSeverity::Critical,
                "DenialOfService",
                "Flood of small packets against a single host",
            ),
            Category::ArpSpoof => (
                AlertSeverity::High,
                "ArpSpoofing",
                "Gratuitous ARP claiming the gateway address",
            ),
            Category::PortScan => (
                AlertSeverity::Medium,
                "PortScan",
                "Sequential probing of destination ports",
            ),
        };

        Some(Self {
            severity,
            rule_name: rule_name.to_string(),
            description: description.to_string(),
            source_address: event.source_address.clone(),
            event_id: event.id,
            evidence: vec![
                format!("Destination: {}", event.destination_address),
                format!("Protocol: {}", event.transport_protocol),
                format!("Length: {}", event.payload_length),
                format!("Confidence: {:.0}%", event.confidence * 100.0),
            ],
            timestamp: chrono::Utc::now(),
        })
    }

    fn severity_str(&self) -> &str {
        match self.severity {
            AlertSeverity::Medium => "MEDIUM",
            AlertSeverity::High => "HIGH",
            AlertSeverity::Critical => "CRITICAL",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::sample_event;

    #[test]
    fn test_normal_traffic_raises_no_alert() {
        let event = sample_event(1, "12:00:00", Category::Normal);
        assert!(Alert::from_event(&event).is_none());
    }

    #[test]
    fn test_severity_per_category() {
        let dos = Alert::from_event(&sample_event(1, "12:00:00", Category::DoS)).unwrap();
        let arp = Alert::from_event(&sample_event(2, "12:00:00", Category::ArpSpoof)).unwrap();
        let scan = Alert::from_event(&sample_event(3, "12:00:00", Category::PortScan)).unwrap();

        assert_eq!(dos.severity, AlertSeverity::Critical);
        assert_eq!(arp.severity, AlertSeverity::High);
        assert_eq!(scan.severity, AlertSeverity::Medium);
        assert_eq!(scan.event_id, 3);
    }

    #[test]
    fn test_display_format() {
        let event = sample_event(7, "12:00:00", Category::DoS);
        let alert = Alert::from_event(&event).unwrap();
        let rendered = alert.to_string();
        assert!(rendered.starts_with("[CRITICAL] DenialOfService - 10.1.1.7 - "));
        assert!(rendered.contains("Destination: 192.168.1.10"));
    }
}
