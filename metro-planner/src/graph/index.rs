//! Station to line occurrence index.

use std::collections::BTreeMap;

use crate::network::{Direction, Line};

/// The two ends of a line, named by the direction that heads toward them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTerminals {
    /// Last stop in the sequence.
    pub forward: String,
    /// First stop in the sequence.
    pub backward: String,
}

impl LineTerminals {
    /// Reads the terminals of a non-degenerate line.
    pub fn of(line: &Line) -> Option<Self> {
        Some(Self {
            forward: line.terminal(Direction::Forward)?.to_string(),
            backward: line.terminal(Direction::Backward)?.to_string(),
        })
    }

    /// The terminal a train in `direction` is heading toward.
    pub fn toward(&self, direction: Direction) -> &str {
        match direction {
            Direction::Forward => &self.forward,
            Direction::Backward => &self.backward,
        }
    }
}

/// One appearance of a station in a line's stop sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub line: String,
    /// Index of the stop within the line. Routing does not read it; it is
    /// kept for callers that show where a station sits on each line.
    pub position: usize,
    /// Ends of the line, used to name the direction of travel on route edges.
    pub terminals: LineTerminals,
}

/// Index from station name to every line occurrence serving it.
///
/// Built directly from the network's lines. A station served twice by the
/// same line (a loop or branch) has one occurrence per position.
#[derive(Debug, Clone, Default)]
pub struct StationIndex {
    by_station: BTreeMap<String, Vec<Occurrence>>,
}

impl StationIndex {
    /// Indexes the given lines. Degenerate lines contribute nothing.
    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a Line>) -> Self {
        let mut by_station: BTreeMap<String, Vec<Occurrence>> = BTreeMap::new();

        for line in lines {
            let Some(terminals) = LineTerminals::of(line).filter(|_| !line.is_degenerate()) else {
                continue;
            };
            for (position, stop) in line.stops.iter().enumerate() {
                by_station
                    .entry(stop.name.clone())
                    .or_default()
                    .push(Occurrence {
                        line: line.name.clone(),
                        position,
                        terminals: terminals.clone(),
                    });
            }
        }

        Self { by_station }
    }

    /// All occurrences of `station`, in line order then position order.
    pub fn occurrences(&self, station: &str) -> &[Occurrence] {
        self.by_station
            .get(station)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Distinct lines serving `station`, in first-occurrence order.
    pub fn lines_at(&self, station: &str) -> Vec<&str> {
        let mut lines: Vec<&str> = Vec::new();
        for occurrence in self.occurrences(station) {
            if !lines.contains(&occurrence.line.as_str()) {
                lines.push(&occurrence.line);
            }
        }
        lines
    }

    /// Stations served by two or more distinct lines, with those lines.
    pub fn interchanges(&self) -> impl Iterator<Item = (&str, Vec<&str>)> {
        self.by_station.keys().filter_map(|station| {
            let lines = self.lines_at(station);
            (lines.len() > 1).then_some((station.as_str(), lines))
        })
    }

    /// Returns true if any indexed line serves `station`.
    pub fn contains(&self, station: &str) -> bool {
        self.by_station.contains_key(station)
    }

    /// Number of indexed stations.
    pub fn len(&self) -> usize {
        self.by_station.len()
    }

    /// Returns true if no station is indexed.
    pub fn is_empty(&self) -> bool {
        self.by_station.is_empty()
    }
}
