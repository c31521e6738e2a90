//! Fast-transfer rules.
//!
//! Some interchanges put two lines on opposite faces of the same island
//! platform, but only for particular travel directions. A rule names the
//! station, the two lines and the terminal each train is heading toward;
//! only transfers between those two platforms get the reduced wait.

use serde::{Deserialize, Serialize};

use super::line::{Direction, Line};

/// A reduced-wait transfer between two directional platforms at a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FastTransferRule {
    pub station: String,
    pub line_a: String,
    pub line_b: String,
    /// Terminal the `line_a` train is heading toward.
    pub terminal_a: String,
    /// Terminal the `line_b` train is heading toward.
    pub terminal_b: String,
    /// Wait in minutes. Falls back to the planner's fast-transfer default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_minutes: Option<f64>,
}

impl FastTransferRule {
    /// Creates a rule using the default fast-transfer wait.
    pub fn new(
        station: impl Into<String>,
        line_a: impl Into<String>,
        line_b: impl Into<String>,
        terminal_a: impl Into<String>,
        terminal_b: impl Into<String>,
    ) -> Self {
        Self {
            station: station.into(),
            line_a: line_a.into(),
            line_b: line_b.into(),
            terminal_a: terminal_a.into(),
            terminal_b: terminal_b.into(),
            wait_minutes: None,
        }
    }

    /// Overrides the wait for this rule.
    pub fn with_wait(mut self, minutes: f64) -> Self {
        self.wait_minutes = Some(minutes);
        self
    }

    /// Returns true if the rule covers a transfer between `from` and `to`
    /// (in either order) at `station`.
    pub fn covers(&self, station: &str, from: &str, to: &str) -> bool {
        self.station == station
            && ((self.line_a == from && self.line_b == to)
                || (self.line_a == to && self.line_b == from))
    }

    /// Direction pairs `(arrive on from, depart on to)` this rule speeds up.
    ///
    /// The terminal pair may be written in either order: if the terminals do
    /// not resolve against `line_a`/`line_b` as given, the swapped pairing is
    /// tried. Returns an empty list when neither pairing resolves.
    pub fn direction_pairs(&self, from: &Line, to: &Line) -> Vec<(Direction, Direction)> {
        let (from_terminal, to_terminal) = if self.line_a == from.name {
            (&self.terminal_a, &self.terminal_b)
        } else {
            (&self.terminal_b, &self.terminal_a)
        };

        let pairs = resolve(from, from_terminal, to, to_terminal);
        if !pairs.is_empty() {
            return pairs;
        }
        resolve(from, to_terminal, to, from_terminal)
    }
}

fn resolve(from: &Line, from_terminal: &str, to: &Line, to_terminal: &str) -> Vec<(Direction, Direction)> {
    let arrivals = from.directions_toward(from_terminal);
    let departures = to.directions_toward(to_terminal);

    arrivals
        .iter()
        .flat_map(|a| departures.iter().map(move |d| (*a, *d)))
        .collect()
}
