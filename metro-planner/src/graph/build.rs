//! Graph construction from a network.

use tracing::debug;

use super::{Edge, EdgeKind, ExclusionSet, FastWait, Graph, NodeKey, StationIndex};
use crate::network::{Direction, Line, Network};

/// Transfer waits applied by the graph builder, in minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferWaits {
    /// Wait for an ordinary transfer.
    pub default_mins: f64,
    /// Wait for a fast-transfer rule that does not set its own.
    pub fast_mins: f64,
}

impl Default for TransferWaits {
    fn default() -> Self {
        Self {
            default_mins: 3.0,
            fast_mins: 1.5,
        }
    }
}

/// Builds the routing graph for `network`, leaving out the lines in `exclude`.
///
/// Excluding a line that does not exist is a no-op.
pub fn build_graph(network: &Network, exclude: &ExclusionSet, waits: TransferWaits) -> Graph {
    for name in exclude.iter() {
        if network.line(name).is_none() {
            debug!(line = name, "Excluded line is not in the network");
        }
    }

    let included: Vec<&Line> = network
        .lines()
        .iter()
        .filter(|l| !exclude.contains(&l.name) && !l.is_degenerate())
        .collect();

    let mut graph = Graph {
        index: StationIndex::from_lines(included.iter().copied()),
        excluded: exclude.clone(),
        ..Graph::default()
    };

    for line in &included {
        add_line(&mut graph, line);
    }

    // Collected up front: adding edges borrows the graph mutably.
    let interchanges: Vec<(String, Vec<String>)> = graph
        .index
        .interchanges()
        .map(|(station, lines)| {
            let lines = lines.into_iter().map(str::to_string).collect();
            (station.to_string(), lines)
        })
        .collect();

    for (station, lines) in &interchanges {
        for from_line in lines {
            for to_line in lines {
                if from_line == to_line {
                    continue;
                }
                let (Some(from), Some(to)) =
                    (graph.find(station, from_line), graph.find(station, to_line))
                else {
                    continue;
                };
                let fast = fast_waits(network, station, from_line, to_line, waits.fast_mins);
                graph.add_edge(
                    from,
                    Edge {
                        to,
                        time: waits.default_mins,
                        line: to_line.clone(),
                        kind: EdgeKind::Transfer { fast },
                    },
                );
            }
        }
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        transfer_edges = graph.all_edges().filter(|(_, e)| e.is_transfer()).count(),
        excluded = graph.excluded().iter().count(),
        "Built routing graph"
    );

    graph
}

fn add_line(graph: &mut Graph, line: &Line) {
    for stop in &line.stops {
        graph.add_node(NodeKey::new(&stop.name, &line.name));
    }

    for (from, to, minutes) in line.segments() {
        let a = graph.add_node(NodeKey::new(&from.name, &line.name));
        let b = graph.add_node(NodeKey::new(&to.name, &line.name));
        let ride = |to, direction| Edge {
            to,
            time: minutes,
            line: line.name.clone(),
            kind: EdgeKind::Ride { direction },
        };
        graph.add_edge(a, ride(b, Direction::Forward));
        graph.add_edge(b, ride(a, Direction::Backward));
    }
}

/// Fast waits for the transfer `from` → `to` at `station`.
fn fast_waits(network: &Network, station: &str, from: &str, to: &str, default_fast: f64) -> Vec<FastWait> {
    let (Some(from_line), Some(to_line)) = (network.line(from), network.line(to)) else {
        return Vec::new();
    };

    network
        .fast_transfers()
        .iter()
        .filter(|rule| rule.covers(station, from, to))
        .flat_map(|rule| {
            let minutes = rule.wait_minutes.unwrap_or(default_fast);
            rule.direction_pairs(from_line, to_line)
                .into_iter()
                .map(move |(arrive, depart)| FastWait {
                    arrive,
                    depart,
                    minutes,
                })
        })
        .collect()
}
