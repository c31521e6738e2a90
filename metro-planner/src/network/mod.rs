//! Static description of the metro network.
//!
//! A [`Network`] is built once from a [`NetworkConfig`] (usually loaded from
//! JSON) and never mutated afterwards. Construction validates the input:
//! degenerate lines, duplicate lines and fast-transfer rules that point at
//! nothing are dropped with a warning, while unusable travel times are
//! rejected outright.

mod error;
mod line;
mod load;
mod rules;

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use error::NetworkError;
pub use line::{Direction, Line, Position, Stop};
pub use rules::FastTransferRule;

/// Raw network description, as read from configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub lines: Vec<Line>,

    #[serde(default)]
    pub fast_transfers: Vec<FastTransferRule>,
}

/// A validated, read-only metro network.
#[derive(Debug, Clone, Default)]
pub struct Network {
    lines: Vec<Line>,
    /// Station name to fare zone. First occurrence wins.
    zones: BTreeMap<String, String>,
    fast_transfers: Vec<FastTransferRule>,
}

impl Network {
    /// Validates `config` into a network.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::InvalidTravelTime`] if a stop other than the
    /// last on a usable line lacks a finite, non-negative travel time.
    pub fn new(config: NetworkConfig) -> Result<Self, NetworkError> {
        let mut lines: Vec<Line> = Vec::with_capacity(config.lines.len());
        let mut seen = HashSet::new();

        for line in config.lines {
            if line.is_degenerate() {
                warn!(line = %line.name, stops = line.stops.len(), "Ignoring degenerate line");
                continue;
            }
            if !seen.insert(line.name.clone()) {
                warn!(line = %line.name, "Ignoring duplicate line");
                continue;
            }
            validate_travel_times(&line)?;
            lines.push(line);
        }

        let mut zones = BTreeMap::new();
        for line in &lines {
            for stop in &line.stops {
                match zones.get(&stop.name) {
                    None => {
                        zones.insert(stop.name.clone(), stop.zone.clone());
                    }
                    Some(zone) if *zone != stop.zone => {
                        warn!(
                            station = %stop.name,
                            line = %line.name,
                            zone = %stop.zone,
                            kept = %zone,
                            "Conflicting fare zone, keeping first"
                        );
                    }
                    Some(_) => {}
                }
            }
        }

        let mut network = Self {
            lines,
            zones,
            fast_transfers: Vec::new(),
        };

        let rule_count = config.fast_transfers.len();
        network.fast_transfers = config
            .fast_transfers
            .into_iter()
            .filter(|rule| network.accepts_rule(rule))
            .collect();

        debug!(
            lines = network.lines.len(),
            stations = network.zones.len(),
            fast_transfers = network.fast_transfers.len(),
            dropped_rules = rule_count - network.fast_transfers.len(),
            "Network loaded"
        );

        Ok(network)
    }

    /// Builds a network from lines alone, with no fast-transfer rules.
    pub fn from_lines(lines: Vec<Line>) -> Result<Self, NetworkError> {
        Self::new(NetworkConfig {
            lines,
            fast_transfers: Vec::new(),
        })
    }

    /// All usable lines, in configuration order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Looks up a line by name.
    pub fn line(&self, name: &str) -> Option<&Line> {
        self.lines.iter().find(|l| l.name == name)
    }

    /// Names of the premium lines.
    pub fn premium_lines(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .filter(|l| l.premium)
            .map(|l| l.name.as_str())
    }

    /// Returns true if `line` names a premium line.
    pub fn is_premium(&self, line: &str) -> bool {
        self.line(line).is_some_and(|l| l.premium)
    }

    /// Fare zone of a station.
    pub fn zone_of(&self, station: &str) -> Option<&str> {
        self.zones.get(station).map(String::as_str)
    }

    /// Returns true if any line serves `station`.
    pub fn contains_station(&self, station: &str) -> bool {
        self.zones.contains_key(station)
    }

    /// All station names, sorted.
    pub fn station_names(&self) -> impl Iterator<Item = &str> {
        self.zones.keys().map(String::as_str)
    }

    /// Number of distinct stations.
    pub fn station_count(&self) -> usize {
        self.zones.len()
    }

    /// Names of the lines serving `station`, in configuration order.
    pub fn lines_through(&self, station: &str) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|l| l.serves(station))
            .map(|l| l.name.as_str())
            .collect()
    }

    /// The stop record for `station` on `line`.
    pub fn stop(&self, line: &str, station: &str) -> Option<&Stop> {
        self.line(line).and_then(|l| l.stop(station))
    }

    /// Accepted fast-transfer rules.
    pub fn fast_transfers(&self) -> &[FastTransferRule] {
        &self.fast_transfers
    }

    fn accepts_rule(&self, rule: &FastTransferRule) -> bool {
        let reject = |reason: &str| {
            warn!(
                station = %rule.station,
                line_a = %rule.line_a,
                line_b = %rule.line_b,
                reason,
                "Ignoring fast-transfer rule"
            );
            false
        };

        if rule.line_a == rule.line_b {
            return reject("lines must differ");
        }
        let (Some(a), Some(b)) = (self.line(&rule.line_a), self.line(&rule.line_b)) else {
            return reject("unknown line");
        };
        if !a.serves(&rule.station) || !b.serves(&rule.station) {
            return reject("station not served by both lines");
        }
        if rule.direction_pairs(a, b).is_empty() {
            return reject("terminals do not match line ends");
        }
        if rule.wait_minutes.is_some_and(|w| !w.is_finite() || w < 0.0) {
            return reject("invalid wait");
        }
        true
    }
}

fn validate_travel_times(line: &Line) -> Result<(), NetworkError> {
    let departing = &line.stops[..line.stops.len() - 1];
    for stop in departing {
        let valid = stop.travel_time.is_some_and(|t| t.is_finite() && t >= 0.0);
        if !valid {
            return Err(NetworkError::InvalidTravelTime {
                line: line.name.clone(),
                station: stop.name.clone(),
            });
        }
    }
    Ok(())
}
