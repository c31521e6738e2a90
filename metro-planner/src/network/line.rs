//! Line and stop types.

use serde::{Deserialize, Serialize};

/// Map coordinates of a stop. Only the map viewer uses these.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Travel direction along a line's stop sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Toward the last stop in the sequence.
    Forward,
    /// Toward the first stop in the sequence.
    Backward,
}

impl Direction {
    /// Both directions, forward first.
    pub const BOTH: [Direction; 2] = [Direction::Forward, Direction::Backward];
}

/// A station as it appears on one line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Station name, shared by every line serving the station.
    pub name: String,

    /// Fare zone label.
    pub zone: String,

    /// Minutes to the next stop on this line. `None` on the last stop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_time: Option<f64>,

    #[serde(default)]
    pub position: Position,
}

impl Stop {
    /// Creates a stop with no position.
    pub fn new(name: impl Into<String>, zone: impl Into<String>, travel_time: Option<f64>) -> Self {
        Self {
            name: name.into(),
            zone: zone.into(),
            travel_time,
            position: Position::default(),
        }
    }
}

/// A named metro line: an ordered stop sequence with a display color.
///
/// # Examples
///
/// ```
/// use metro_planner::network::{Direction, Line, Stop};
///
/// let line = Line::new(
///     "A",
///     vec![
///         Stop::new("P", "1", Some(3.0)),
///         Stop::new("Q", "1", Some(4.0)),
///         Stop::new("R", "2", None),
///     ],
/// );
///
/// assert_eq!(line.terminal(Direction::Forward), Some("R"));
/// assert_eq!(line.terminal(Direction::Backward), Some("P"));
/// assert_eq!(line.segments().count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub name: String,

    #[serde(default)]
    pub color: String,

    /// Premium lines (express, airport) carry a fare surcharge.
    #[serde(default)]
    pub premium: bool,

    pub stops: Vec<Stop>,
}

impl Line {
    /// Creates a regular (non-premium) line with no color.
    pub fn new(name: impl Into<String>, stops: Vec<Stop>) -> Self {
        Self {
            name: name.into(),
            color: String::new(),
            premium: false,
            stops,
        }
    }

    /// Marks the line as premium.
    pub fn premium(mut self) -> Self {
        self.premium = true;
        self
    }

    /// Sets the display color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// A line with fewer than two stops has no segments.
    pub fn is_degenerate(&self) -> bool {
        self.stops.len() < 2
    }

    /// Name of the stop a train in `direction` is heading toward.
    pub fn terminal(&self, direction: Direction) -> Option<&str> {
        let stop = match direction {
            Direction::Forward => self.stops.last(),
            Direction::Backward => self.stops.first(),
        };
        stop.map(|s| s.name.as_str())
    }

    /// Directions whose terminal is `station`. A loop line whose first and
    /// last stops coincide yields both.
    pub fn directions_toward(&self, station: &str) -> Vec<Direction> {
        Direction::BOTH
            .into_iter()
            .filter(|d| self.terminal(*d) == Some(station))
            .collect()
    }

    /// Consecutive stop pairs with the departure stop's travel time.
    ///
    /// Segments whose departure stop has no travel time are skipped; a
    /// validated [`Network`](super::Network) never contains those.
    pub fn segments(&self) -> impl Iterator<Item = (&Stop, &Stop, f64)> + '_ {
        self.stops
            .windows(2)
            .filter_map(|pair| pair[0].travel_time.map(|t| (&pair[0], &pair[1], t)))
    }

    /// Returns true if the line serves `station`.
    pub fn serves(&self, station: &str) -> bool {
        self.stops.iter().any(|s| s.name == station)
    }

    /// First stop on this line named `station`.
    pub fn stop(&self, station: &str) -> Option<&Stop> {
        self.stops.iter().find(|s| s.name == station)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loop_line() -> Line {
        Line::new(
            "Circle",
            vec![
                Stop::new("A", "1", Some(2.0)),
                Stop::new("B", "1", Some(2.0)),
                Stop::new("C", "1", Some(2.0)),
                Stop::new("A", "1", None),
            ],
        )
    }

    #[test]
    fn terminals_follow_sequence() {
        let line = Line::new(
            "A",
            vec![Stop::new("P", "1", Some(3.0)), Stop::new("Q", "1", None)],
        );
        assert_eq!(line.terminal(Direction::Forward), Some("Q"));
        assert_eq!(line.terminal(Direction::Backward), Some("P"));
        assert_eq!(line.directions_toward("Q"), vec![Direction::Forward]);
        assert!(line.directions_toward("X").is_empty());
    }

    #[test]
    fn loop_terminal_matches_both_directions() {
        let line = loop_line();
        assert_eq!(
            line.directions_toward("A"),
            vec![Direction::Forward, Direction::Backward]
        );
    }

    #[test]
    fn segments_use_departure_travel_time() {
        let line = loop_line();
        let segments: Vec<_> = line
            .segments()
            .map(|(a, b, t)| (a.name.as_str(), b.name.as_str(), t))
            .collect();
        assert_eq!(
            segments,
            vec![("A", "B", 2.0), ("B", "C", 2.0), ("C", "A", 2.0)]
        );
    }

    #[test]
    fn degenerate_lines() {
        assert!(Line::new("Empty", vec![]).is_degenerate());
        assert!(Line::new("One", vec![Stop::new("A", "1", None)]).is_degenerate());
        assert!(!loop_line().is_degenerate());
    }

    #[test]
    fn deserialize_defaults() {
        let line: Line = serde_json::from_str(
            r#"{"name": "A", "stops": [{"name": "P", "zone": "1", "travel_time": 3}, {"name": "Q", "zone": "2"}]}"#,
        )
        .unwrap();
        assert!(!line.premium);
        assert_eq!(line.color, "");
        assert_eq!(line.stops[0].travel_time, Some(3.0));
        assert_eq!(line.stops[1].travel_time, None);
        assert_eq!(line.stops[1].position, Position::default());
    }
}
