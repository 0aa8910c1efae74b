//! Synthetic traffic generator.
//!
//! Each call draws one uniform number to pick a category from the active
//! scenario's thresholds, then fills the category's fixed attribute profile.
//! Randomness comes from an injected [`Rng`], so a seeded generator replays
//! the exact same feed.

use crate::error::SimError;
use crate::events::{Category, PacketEvent, TransportProtocol};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const LAN_PREFIX: &str = "192.168.1.";

const DOS_SOURCE: &str = "10.0.0.55";
const DOS_TARGET: &str = "192.168.1.100";
const DOS_LENGTH: u32 = 64;

const ARP_SOURCE: &str = "192.168.1.105";
const ARP_GATEWAY: &str = "192.168.1.1";
const ARP_LENGTH: u32 = 42;

const SCAN_SOURCE: &str = "45.33.22.11";
const SCAN_TARGET: &str = "192.168.1.50";

const MIN_LENGTH: u32 = 64;
const LENGTH_SPAN: u32 = 1000;

/// Bias profile for category selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    #[default]
    Mixed,
    #[serde(alias = "dos-biased")]
    Dos,
    #[serde(alias = "scan-biased")]
    Scan,
}

impl Scenario {
    pub fn name(&self) -> &'static str {
        match self {
            Scenario::Mixed => "mixed",
            Scenario::Dos => "dos",
            Scenario::Scan => "scan",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Scenario::Mixed => "Mixed Traffic",
            Scenario::Dos => "DoS Attack",
            Scenario::Scan => "Port Scan",
        }
    }

    /// Maps a uniform draw `r` in `[0, 1)` to a category. Thresholds are
    /// strict, so a draw sitting exactly on a boundary takes the lower branch.
    pub fn classify(&self, r: f64) -> Category {
        match self {
            Scenario::Dos if r > 0.30 => Category::DoS,
            Scenario::Scan if r > 0.30 => Category::PortScan,
            Scenario::Dos | Scenario::Scan => Category::Normal,
            Scenario::Mixed => {
                if r > 0.90 {
                    Category::DoS
                } else if r > 0.85 {
                    Category::ArpSpoof
                } else if r > 0.80 {
                    Category::PortScan
                } else {
                    Category::Normal
                }
            }
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mixed" => Ok(Scenario::Mixed),
            "dos" | "dos-biased" => Ok(Scenario::Dos),
            "scan" | "scan-biased" => Ok(Scenario::Scan),
            _ => Err(SimError::InvalidScenario(s.to_string())),
        }
    }
}

pub struct EventGenerator<R: Rng = ChaCha8Rng> {
    rng: R,
    next_id: u64,
}

impl EventGenerator<ChaCha8Rng> {
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> EventGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng, next_id: 1 }
    }

    pub fn generate(&mut self, scenario: Scenario) -> PacketEvent {
        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
        self.generate_at(scenario, timestamp)
    }

    /// Same as [`generate`](Self::generate) with a caller-supplied timestamp label.
    pub fn generate_at(&mut self, scenario: Scenario, timestamp: String) -> PacketEvent {
        let r = self.rng.gen_range(0.0..1.0);
        let category = scenario.classify(r);

        let (source_address, destination_address, transport_protocol, payload_length, confidence) =
            match category {
                Category::DoS => (
                    DOS_SOURCE.to_string(),
                    DOS_TARGET.to_string(),
                    TransportProtocol::TCP,
                    DOS_LENGTH,
                    self.attack_confidence(),
                ),
                Category::ArpSpoof => (
                    ARP_SOURCE.to_string(),
                    ARP_GATEWAY.to_string(),
                    TransportProtocol::ARP,
                    ARP_LENGTH,
                    self.attack_confidence(),
                ),
                Category::PortScan => (
                    SCAN_SOURCE.to_string(),
                    SCAN_TARGET.to_string(),
                    TransportProtocol::TCP,
                    self.random_length(),
                    self.attack_confidence(),
                ),
                Category::Normal => {
                    let (src, dst) = if self.rng.gen_bool(0.5) {
                        (self.lan_address(), self.external_address())
                    } else {
                        (self.external_address(), self.lan_address())
                    };
                    let protocol = if self.rng.gen_bool(0.2) {
                        TransportProtocol::UDP
                    } else {
                        TransportProtocol::TCP
                    };
                    let length = self.random_length();
                    let confidence = 0.95 + self.rng.gen_range(0.0..0.04);
                    (src, dst, protocol, length, confidence)
                }
            };

        let id = self.next_id;
        self.next_id += 1;

        log::trace!("Generated packet #{} ({}) under scenario {}", id, category, scenario);

        PacketEvent {
            id,
            timestamp,
            source_address,
            destination_address,
            transport_protocol,
            payload_length,
            category,
            confidence,
        }
    }

    fn attack_confidence(&mut self) -> f64 {
        0.90 + self.rng.gen_range(0.0..0.09)
    }

    fn random_length(&mut self) -> u32 {
        MIN_LENGTH + self.rng.gen_range(0..LENGTH_SPAN)
    }

    fn lan_address(&mut self) -> String {
        format!("{}{}", LAN_PREFIX, self.rng.gen_range(2..202))
    }

    fn external_address(&mut self) -> String {
        let octets: [u8; 4] = [
            self.rng.gen_range(0..255),
            self.rng.gen_range(0..255),
            self.rng.gen_range(0..255),
            self.rng.gen_range(0..255),
        ];
        format!("{}.{}.{}.{}", octets[0], octets[1], octets[2], octets[3])
    }
}
