//! Routing graph over (station, line) nodes.
//!
//! Each station gets one node per line serving it. Ride edges join
//! neighbouring stops on a line; transfer edges join the nodes of one station
//! across lines. Transfer edges carry the default wait plus any fast-transfer
//! overrides, which the solver resolves once it knows the directions of
//! travel on both sides of the interchange.

mod build;
mod index;

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::Serialize;

use crate::network::Direction;

pub use build::{TransferWaits, build_graph};
pub use index::{LineTerminals, Occurrence, StationIndex};

/// Identity of a graph node: a station as served by one line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeKey {
    pub station: String,
    pub line: String,
}

impl NodeKey {
    pub fn new(station: impl Into<String>, line: impl Into<String>) -> Self {
        Self {
            station: station.into(),
            line: line.into(),
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.station, self.line)
    }
}

/// Dense index of a node within one [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub usize);

/// A reduced transfer wait for one (arrival, departure) direction pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FastWait {
    /// Direction of the train being left, on the edge's origin line.
    pub arrive: Direction,
    /// Direction of the train being boarded, on the edge's target line.
    pub depart: Direction,
    pub minutes: f64,
}

/// What an edge represents.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeKind {
    /// Riding a train between adjacent stops.
    Ride { direction: Direction },
    /// Walking between platforms of two lines at one station.
    Transfer { fast: Vec<FastWait> },
}

/// A directed edge.
///
/// `line` is the line the traveller is on after traversing the edge: the
/// ridden line for ride edges, the target line for transfer edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub to: NodeIndex,
    /// Weight in minutes: travel time, or the default transfer wait.
    pub time: f64,
    pub line: String,
    pub kind: EdgeKind,
}

impl Edge {
    /// Returns true for transfer edges.
    pub fn is_transfer(&self) -> bool {
        matches!(self.kind, EdgeKind::Transfer { .. })
    }

    /// Travel direction of a ride edge.
    pub fn direction(&self) -> Option<Direction> {
        match self.kind {
            EdgeKind::Ride { direction } => Some(direction),
            EdgeKind::Transfer { .. } => None,
        }
    }

    /// Wait charged for this edge when arriving in `arrive` and departing in
    /// `depart`.
    ///
    /// Ride edges always cost their travel time. A transfer gets a matching
    /// fast wait only when the arrival direction is known.
    pub fn wait(&self, arrive: Option<Direction>, depart: Direction) -> f64 {
        let EdgeKind::Transfer { fast } = &self.kind else {
            return self.time;
        };
        let Some(arrive) = arrive else {
            return self.time;
        };
        fast.iter()
            .filter(|f| f.arrive == arrive && f.depart == depart)
            .map(|f| f.minutes)
            .reduce(f64::min)
            .unwrap_or(self.time)
    }
}

/// Sorted set of line names left out of a graph build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExclusionSet(BTreeSet<String>);

impl ExclusionSet {
    /// The empty set: every line included.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn contains(&self, line: &str) -> bool {
        self.0.contains(line)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Directed weighted graph over (station, line) nodes.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<NodeKey>,
    lookup: HashMap<NodeKey, NodeIndex>,
    adjacency: Vec<Vec<Edge>>,
    /// Ride directions leaving each node, sorted.
    departures: Vec<Vec<Direction>>,
    index: StationIndex,
    excluded: ExclusionSet,
}

impl Graph {
    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Key of a node. Panics on an index from another graph.
    pub fn node(&self, index: NodeIndex) -> &NodeKey {
        &self.nodes[index.0]
    }

    /// Looks up the node for `station` on `line`.
    pub fn find(&self, station: &str, line: &str) -> Option<NodeIndex> {
        self.lookup.get(&NodeKey::new(station, line)).copied()
    }

    /// Outgoing edges of a node.
    pub fn edges(&self, index: NodeIndex) -> &[Edge] {
        self.adjacency
            .get(index.0)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every directed edge with its origin.
    pub fn all_edges(&self) -> impl Iterator<Item = (NodeIndex, &Edge)> {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(i, edges)| edges.iter().map(move |e| (NodeIndex(i), e)))
    }

    /// Nodes of `station`, one per line, in index order.
    pub fn nodes_at(&self, station: &str) -> Vec<NodeIndex> {
        self.index
            .lines_at(station)
            .into_iter()
            .filter_map(|line| self.find(station, line))
            .collect()
    }

    /// Directions a train can leave `index` in, forward first.
    pub fn departure_directions(&self, index: NodeIndex) -> &[Direction] {
        self.departures
            .get(index.0)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Terminal a train on `line` in `direction` is heading toward.
    pub fn terminal(&self, station: &str, line: &str, direction: Direction) -> Option<&str> {
        self.index
            .occurrences(station)
            .iter()
            .find(|o| o.line == line)
            .map(|o| o.terminals.toward(direction))
    }

    /// Lines left out of this graph.
    pub fn excluded(&self) -> &ExclusionSet {
        &self.excluded
    }

    fn add_node(&mut self, key: NodeKey) -> NodeIndex {
        if let Some(index) = self.lookup.get(&key) {
            return *index;
        }
        let index = NodeIndex(self.nodes.len());
        self.nodes.push(key.clone());
        self.lookup.insert(key, index);
        self.adjacency.push(Vec::new());
        self.departures.push(Vec::new());
        index
    }

    /// Adds an edge.
    ///
    /// Ride edges are never merged: a line that covers the same segment twice
    /// keeps one edge per traversal. A second transfer between the same two
    /// nodes keeps the cheaper of the two.
    fn add_edge(&mut self, from: NodeIndex, edge: Edge) {
        if let Some(direction) = edge.direction() {
            let departures = &mut self.departures[from.0];
            if !departures.contains(&direction) {
                departures.push(direction);
                departures.sort();
            }
            self.adjacency[from.0].push(edge);
            return;
        }

        let edges = &mut self.adjacency[from.0];
        match edges.iter_mut().find(|e| e.is_transfer() && e.to == edge.to) {
            Some(existing) if edge.time < existing.time => *existing = edge,
            Some(_) => {}
            None => edges.push(edge),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer(fast: Vec<FastWait>) -> Edge {
        Edge {
            to: NodeIndex(1),
            time: 3.0,
            line: "B".into(),
            kind: EdgeKind::Transfer { fast },
        }
    }

    #[test]
    fn transfer_wait_uses_matching_fast_rule() {
        let edge = transfer(vec![FastWait {
            arrive: Direction::Forward,
            depart: Direction::Backward,
            minutes: 1.5,
        }]);

        assert_eq!(edge.wait(Some(Direction::Forward), Direction::Backward), 1.5);
        assert_eq!(edge.wait(Some(Direction::Forward), Direction::Forward), 3.0);
        assert_eq!(edge.wait(Some(Direction::Backward), Direction::Backward), 3.0);
        assert_eq!(edge.wait(None, Direction::Backward), 3.0);
    }

    #[test]
    fn ride_wait_is_travel_time() {
        let edge = Edge {
            to: NodeIndex(0),
            time: 4.0,
            line: "A".into(),
            kind: EdgeKind::Ride {
                direction: Direction::Forward,
            },
        };
        assert_eq!(edge.wait(Some(Direction::Backward), Direction::Forward), 4.0);
        assert!(!edge.is_transfer());
        assert_eq!(edge.direction(), Some(Direction::Forward));
    }

    #[test]
    fn add_edge_keeps_parallel_rides() {
        let mut graph = Graph::default();
        let a = graph.add_node(NodeKey::new("A", "L"));
        let b = graph.add_node(NodeKey::new("B", "L"));
        let ride = |time| Edge {
            to: b,
            time,
            line: "L".into(),
            kind: EdgeKind::Ride {
                direction: Direction::Forward,
            },
        };

        graph.add_edge(a, ride(5.0));
        graph.add_edge(a, ride(2.0));

        assert_eq!(graph.edges(a).len(), 2);
        assert_eq!(graph.departure_directions(a), vec![Direction::Forward]);
        assert!(graph.departure_directions(b).is_empty());
    }

    #[test]
    fn add_edge_keeps_cheaper_transfer() {
        let mut graph = Graph::default();
        let a = graph.add_node(NodeKey::new("Q", "A"));
        graph.add_node(NodeKey::new("Q", "B"));

        graph.add_edge(a, transfer(Vec::new()));
        graph.add_edge(
            a,
            Edge {
                time: 2.0,
                ..transfer(Vec::new())
            },
        );

        assert_eq!(graph.edges(a).len(), 1);
        assert_eq!(graph.edges(a)[0].time, 2.0);
    }

    #[test]
    fn add_node_is_idempotent() {
        let mut graph = Graph::default();
        let first = graph.add_node(NodeKey::new("A", "L"));
        let second = graph.add_node(NodeKey::new("A", "L"));
        assert_eq!(first, second);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn exclusion_set_is_normalized() {
        let a: ExclusionSet = ["B", "A", "B"].into_iter().collect();
        let b: ExclusionSet = ["A", "B"].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(a.iter().collect::<Vec<_>>(), vec!["A", "B"]);
        assert!(ExclusionSet::none().is_empty());
    }

    #[test]
    fn node_key_display() {
        assert_eq!(NodeKey::new("Central", "Line 1").to_string(), "Central (Line 1)");
    }
}
