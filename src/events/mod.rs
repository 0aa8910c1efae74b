pub mod alert;

pub use alert::Alert;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification assigned to every generated record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Normal,
    DoS,
    ArpSpoof,
    PortScan,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Normal,
        Category::DoS,
        Category::ArpSpoof,
        Category::PortScan,
    ];

    pub fn is_alert(&self) -> bool {
        !matches!(self, Category::Normal)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Normal => "Normal",
            Category::DoS => "DoS",
            Category::ArpSpoof => "ARP Spoof",
            Category::PortScan => "Port Scan",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportProtocol {
    TCP,
    UDP,
    ICMP,
    ARP,
}

impl fmt::Display for TransportProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransportProtocol::TCP => "TCP",
            TransportProtocol::UDP => "UDP",
            TransportProtocol::ICMP => "ICMP",
            TransportProtocol::ARP => "ARP",
        };
        f.write_str(name)
    }
}

/// One synthetic traffic observation. Never mutated after the generator
/// hands it out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacketEvent {
    pub id: u64,
    pub timestamp: String,
    pub source_address: String,
    pub destination_address: String,
    pub transport_protocol: TransportProtocol,
    pub payload_length: u32,
    pub category: Category,
    pub confidence: f64,
}

impl PacketEvent {
    pub fn is_alert(&self) -> bool {
        self.category.is_alert()
    }
}

impl fmt::Display for PacketEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} [{}] {} {} -> {} len:{} {} ({:.0}%)",
            self.id,
            self.timestamp,
            self.transport_protocol,
            self.source_address,
            self.destination_address,
            self.payload_length,
            self.category,
            self.confidence * 100.0
        )
    }
}

#[cfg(test)]
pub(crate) fn sample_event(id: u64, timestamp: &str, category: Category) -> PacketEvent {
    PacketEvent {
        id,
        timestamp: timestamp.to_string(),
        source_address: format!("10.1.1.{}", id % 250),
        destination_address: "192.168.1.10".to_string(),
        transport_protocol: TransportProtocol::TCP,
        payload_length: 128,
        category,
        confidence: 0.97,
    }
}
