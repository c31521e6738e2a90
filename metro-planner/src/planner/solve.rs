//! Shortest-path search over the routing graph.
//!
//! A Dijkstra variant with a composite cost of (transfers, time). Labels are
//! kept per node *and platform state*: whether the traveller is at the
//! origin, riding in a direction, or standing on a platform waiting to board
//! in a direction. The platform state is what lets a transfer be priced by
//! the directions on both sides of it, so fast-transfer rules only apply to
//! the platform pair they describe.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::graph::{Edge, EdgeKind, Graph, NodeIndex, NodeKey};
use crate::network::Direction;

/// What a search minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    /// Smallest total time.
    #[default]
    MinimizeTime,
    /// Fewest line changes, then smallest total time.
    MinimizeTransfers,
}

impl Objective {
    /// Primary rank of a cost under this objective; time breaks ties.
    fn rank(self, cost: &Cost) -> u32 {
        match self {
            Objective::MinimizeTime => 0,
            Objective::MinimizeTransfers => cost.transfers,
        }
    }

    /// Orders two costs, best first.
    pub fn compare(self, a: &Cost, b: &Cost) -> Ordering {
        self.rank(a)
            .cmp(&self.rank(b))
            .then_with(|| a.time.total_cmp(&b.time))
    }

    /// Returns true if `candidate` is strictly better than `current`.
    pub fn improves(self, candidate: &Cost, current: &Cost) -> bool {
        self.compare(candidate, current) == Ordering::Less
    }
}

/// Accumulated cost of a (partial) path.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Cost {
    /// Minutes, ride time plus transfer waits.
    pub time: f64,
    /// Line changes.
    pub transfers: u32,
}

/// One traversed edge of a path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathEdge {
    pub from: NodeKey,
    pub to: NodeKey,
    /// Minutes charged for this edge. For transfers, the wait actually applied.
    pub minutes: f64,
    pub line: String,
    pub is_transfer: bool,
    /// Terminal the train is heading toward after this edge.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toward: Option<String>,
}

/// Result of a path search. Empty when no path exists.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PathResult {
    pub nodes: Vec<NodeKey>,
    /// `nodes.len() - 1` edges for a non-empty path.
    pub edges: Vec<PathEdge>,
    pub total_time: f64,
    pub transfers: u32,
}

impl PathResult {
    /// The "no path" result.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if no path was found.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn cost(&self) -> Cost {
        Cost {
            time: self.total_time,
            transfers: self.transfers,
        }
    }

    /// Station names along the path, in order. Interchanges appear once per
    /// node, so a transfer repeats the station.
    pub fn stations(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.station.as_str())
    }

    /// Returns true if any ride edge is on a line matching `pred`.
    pub fn rides_on(&self, pred: impl Fn(&str) -> bool) -> bool {
        self.edges.iter().any(|e| !e.is_transfer && pred(&e.line))
    }

    /// Returns true if both paths visit the same nodes in the same order.
    pub fn same_route(&self, other: &PathResult) -> bool {
        self.nodes == other.nodes
    }
}

/// Where the traveller is standing at a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Platform {
    /// The start node; nothing ridden yet.
    Origin,
    /// Arrived on a train travelling in this direction.
    Riding(Direction),
    /// Walked in from another line; may only board in this direction.
    Boarding(Direction),
}

const PLATFORMS: usize = 5;

impl Platform {
    fn slot(self) -> usize {
        match self {
            Platform::Origin => 0,
            Platform::Riding(Direction::Forward) => 1,
            Platform::Riding(Direction::Backward) => 2,
            Platform::Boarding(Direction::Forward) => 3,
            Platform::Boarding(Direction::Backward) => 4,
        }
    }

    fn direction(self) -> Option<Direction> {
        match self {
            Platform::Origin => None,
            Platform::Riding(d) | Platform::Boarding(d) => Some(d),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct State {
    node: NodeIndex,
    platform: Platform,
}

impl State {
    fn id(self) -> usize {
        self.node.0 * PLATFORMS + self.platform.slot()
    }
}

#[derive(Debug, Clone, Copy)]
struct Step<'g> {
    prev: State,
    edge: &'g Edge,
    minutes: f64,
}

#[derive(Debug, Clone, Copy)]
struct Label<'g> {
    cost: Cost,
    /// Line the traveller arrived on; `None` at the origin.
    line: Option<&'g str>,
    via: Option<Step<'g>>,
}

/// Heap entry. Reversed ordering turns `BinaryHeap` into a min-heap; `seq`
/// pops equal costs in insertion order.
struct Entry {
    rank: u32,
    time: f64,
    seq: u64,
    state: State,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .rank
            .cmp(&self.rank)
            .then_with(|| other.time.total_cmp(&self.time))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

struct Search<'g> {
    graph: &'g Graph,
    objective: Objective,
    labels: Vec<Option<Label<'g>>>,
    settled: Vec<bool>,
    heap: BinaryHeap<Entry>,
    seq: u64,
}

impl<'g> Search<'g> {
    fn new(graph: &'g Graph, objective: Objective) -> Self {
        let states = graph.node_count() * PLATFORMS;
        Self {
            graph,
            objective,
            labels: vec![None; states],
            settled: vec![false; states],
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    fn run(mut self, start: NodeIndex, end: NodeIndex) -> PathResult {
        let origin = State {
            node: start,
            platform: Platform::Origin,
        };
        self.labels[origin.id()] = Some(Label {
            cost: Cost::default(),
            line: None,
            via: None,
        });
        self.push(origin, Cost::default());

        let mut settled_count = 0usize;
        while let Some(entry) = self.heap.pop() {
            let state = entry.state;
            if std::mem::replace(&mut self.settled[state.id()], true) {
                continue;
            }
            settled_count += 1;

            let Some(label) = self.labels[state.id()] else {
                continue;
            };
            if state.node == end {
                trace!(settled = settled_count, "Reached destination");
                return self.reconstruct(state);
            }
            self.expand(state, label);
        }

        trace!(
            settled = settled_count,
            from = %self.graph.node(start),
            to = %self.graph.node(end),
            "No path"
        );
        PathResult::empty()
    }

    fn push(&mut self, state: State, cost: Cost) {
        self.heap.push(Entry {
            rank: self.objective.rank(&cost),
            time: cost.time,
            seq: self.seq,
            state,
        });
        self.seq += 1;
    }

    fn expand(&mut self, state: State, label: Label<'g>) {
        let graph = self.graph;
        let arriving = label
            .line
            .unwrap_or(graph.node(state.node).line.as_str());

        for edge in graph.edges(state.node) {
            let transfers = if edge.line != arriving {
                label.cost.transfers + 1
            } else {
                label.cost.transfers
            };

            match &edge.kind {
                EdgeKind::Ride { direction } => {
                    if let Platform::Boarding(boarding) = state.platform {
                        if boarding != *direction {
                            continue;
                        }
                    }
                    let platform = Platform::Riding(*direction);
                    self.relax(state, label, edge, platform, edge.time, transfers);
                }
                EdgeKind::Transfer { .. } => {
                    let arrive = match state.platform {
                        Platform::Boarding(_) => continue,
                        Platform::Origin => None,
                        Platform::Riding(d) => Some(d),
                    };
                    for &depart in graph.departure_directions(edge.to) {
                        let minutes = edge.wait(arrive, depart);
                        let platform = Platform::Boarding(depart);
                        self.relax(state, label, edge, platform, minutes, transfers);
                    }
                }
            }
        }
    }

    fn relax(
        &mut self,
        from: State,
        label: Label<'g>,
        edge: &'g Edge,
        platform: Platform,
        minutes: f64,
        transfers: u32,
    ) {
        let target = State {
            node: edge.to,
            platform,
        };
        if self.settled[target.id()] {
            return;
        }

        let cost = Cost {
            time: label.cost.time + minutes,
            transfers,
        };
        // Ties keep the first label found.
        let improves = match &self.labels[target.id()] {
            None => true,
            Some(current) => self.objective.improves(&cost, &current.cost),
        };
        if !improves {
            return;
        }

        self.labels[target.id()] = Some(Label {
            cost,
            line: Some(edge.line.as_str()),
            via: Some(Step {
                prev: from,
                edge,
                minutes,
            }),
        });
        self.push(target, cost);
    }

    fn reconstruct(&self, end: State) -> PathResult {
        let mut steps = Vec::new();
        let mut current = end;
        while let Some(step) = self.labels[current.id()].and_then(|l| l.via) {
            steps.push((current, step));
            current = step.prev;
        }
        steps.reverse();

        let graph = self.graph;
        let mut nodes = vec![graph.node(current.node).clone()];
        let mut edges = Vec::with_capacity(steps.len());

        for (state, step) in steps {
            let to = graph.node(state.node).clone();
            let toward = state
                .platform
                .direction()
                .and_then(|d| graph.terminal(&to.station, &step.edge.line, d))
                .map(str::to_string);
            edges.push(PathEdge {
                from: graph.node(step.prev.node).clone(),
                to: to.clone(),
                minutes: step.minutes,
                line: step.edge.line.clone(),
                is_transfer: step.edge.is_transfer(),
                toward,
            });
            nodes.push(to);
        }

        let cost = self.labels[end.id()].map(|l| l.cost).unwrap_or_default();
        PathResult {
            nodes,
            edges,
            total_time: cost.time,
            transfers: cost.transfers,
        }
    }
}

/// Finds the best path from `start` to `end` under `objective`.
///
/// Returns a single-node path when `start == end`, and the empty result when
/// `end` is unreachable or either index lies outside the graph.
///
/// The traveller starts on `start`'s own line, so leaving it through a
/// transfer edge counts as a transfer.
pub fn solve(graph: &Graph, start: NodeIndex, end: NodeIndex, objective: Objective) -> PathResult {
    let count = graph.node_count();
    if start.0 >= count || end.0 >= count {
        warn!(start = start.0, end = end.0, nodes = count, "Node index outside graph");
        return PathResult::empty();
    }
    if start == end {
        return PathResult {
            nodes: vec![graph.node(start).clone()],
            ..PathResult::empty()
        };
    }

    Search::new(graph, objective).run(start, end)
}

/// Solves every (start, end) node combination and keeps the best result.
///
/// Combinations run in order; on equal cost the earlier one wins. At most
/// `max_combinations` pairs are solved.
pub fn find_path(
    graph: &Graph,
    starts: &[NodeIndex],
    ends: &[NodeIndex],
    objective: Objective,
    max_combinations: usize,
) -> PathResult {
    let total = starts.len() * ends.len();
    if total > max_combinations {
        warn!(
            combinations = total,
            limit = max_combinations,
            "Too many line combinations, truncating search"
        );
    }

    let pairs = starts
        .iter()
        .flat_map(|s| ends.iter().map(move |e| (*s, *e)))
        .take(max_combinations);

    let mut best: Option<PathResult> = None;
    for (start, end) in pairs {
        let result = solve(graph, start, end, objective);
        if result.is_empty() {
            continue;
        }
        let better = best
            .as_ref()
            .is_none_or(|b| objective.improves(&result.cost(), &b.cost()));
        if better {
            best = Some(result);
        }
    }

    let best = best.unwrap_or_default();
    debug!(
        ?objective,
        combinations = total.min(max_combinations),
        found = !best.is_empty(),
        time = best.total_time,
        transfers = best.transfers,
        "Path search complete"
    );
    best
}

/// [`find_path`] between every line serving `from` and every line serving `to`.
pub fn find_station_path(
    graph: &Graph,
    from: &str,
    to: &str,
    objective: Objective,
    max_combinations: usize,
) -> PathResult {
    let starts = graph.nodes_at(from);
    let ends = graph.nodes_at(to);
    find_path(graph, &starts, &ends, objective, max_combinations)
}

#[cfg(test)]
#[path = "solve_tests.rs"]
mod tests;
