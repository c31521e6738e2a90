//! Route option selection.
//!
//! Runs the solver under each objective/exclusion variant and collapses
//! results that describe the same physical route, so a map viewer never
//! offers two buttons for one route.

use serde::Serialize;
use tracing::debug;

use crate::graph::{ExclusionSet, Graph};
use crate::network::{Network, Position};

use super::config::PlannerConfig;
use super::fare::{Fare, calculate_fare};
use super::solve::{Objective, PathEdge, PathResult, find_station_path};

/// Label shown for a route option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteLabel {
    /// The fastest route, which is also the best by another criterion.
    Recommended,
    Fastest,
    FewestTransfers,
    AvoidsPremium,
}

impl RouteLabel {
    /// Human-readable label.
    pub fn title(self) -> &'static str {
        match self {
            RouteLabel::Recommended => "Recommended route",
            RouteLabel::Fastest => "Fastest",
            RouteLabel::FewestTransfers => "Fewest transfers",
            RouteLabel::AvoidsPremium => "Avoids premium lines",
        }
    }
}

/// A stop along a route option, with what the map viewer needs to draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationOccurrence {
    pub station: String,
    pub line: String,
    pub zone: Option<String>,
    pub position: Option<Position>,
}

/// One candidate route returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteOption {
    pub label: RouteLabel,
    /// Display title for `label`.
    pub title: &'static str,
    pub path: Vec<StationOccurrence>,
    pub edges: Vec<PathEdge>,
    pub total_time_minutes: f64,
    pub transfer_count: u32,
    pub fare: Fare,
}

/// A solved candidate before fares are attached.
#[derive(Debug)]
struct Candidate {
    label: RouteLabel,
    path: PathResult,
}

/// Plans routes with graphs supplied by `graph_for`, one per exclusion set.
///
/// Candidates, in priority order: fastest, fewest transfers, and fastest
/// without premium lines (only when the fastest route rides one). Identical
/// node sequences keep the higher-priority candidate; the fastest route is
/// relabelled [`RouteLabel::Recommended`] when it absorbs another.
pub(crate) fn select_routes<G>(
    network: &Network,
    config: &PlannerConfig,
    from: &str,
    to: &str,
    graph_for: impl Fn(&ExclusionSet) -> G,
) -> Vec<RouteOption>
where
    G: AsRef<Graph>,
{
    if !network.contains_station(from) || !network.contains_station(to) {
        debug!(from, to, "Unknown station");
        return Vec::new();
    }

    let full = graph_for(&ExclusionSet::none());
    let full = full.as_ref();
    let limit = config.max_combinations;

    let fastest = find_station_path(full, from, to, Objective::MinimizeTime, limit);
    if fastest.is_empty() {
        debug!(from, to, "No route");
        return Vec::new();
    }

    let mut candidates = vec![Candidate {
        label: RouteLabel::Fastest,
        path: fastest,
    }];

    let fewest = find_station_path(full, from, to, Objective::MinimizeTransfers, limit);
    if !fewest.is_empty() {
        candidates.push(Candidate {
            label: RouteLabel::FewestTransfers,
            path: fewest,
        });
    }

    let premium: ExclusionSet = network.premium_lines().collect();
    if !premium.is_empty() && candidates[0].path.rides_on(|line| premium.contains(line)) {
        let avoiding = graph_for(&premium);
        let avoids = find_station_path(avoiding.as_ref(), from, to, Objective::MinimizeTime, limit);
        if avoids.is_empty() {
            debug!(from, to, "No route avoiding premium lines");
        } else {
            candidates.push(Candidate {
                label: RouteLabel::AvoidsPremium,
                path: avoids,
            });
        }
    }

    let fares = config.fare_table();
    deduplicate(candidates)
        .into_iter()
        .map(|c| RouteOption {
            label: c.label,
            title: c.label.title(),
            path: occurrences(network, &c.path),
            fare: calculate_fare(network, &c.path, &fares),
            total_time_minutes: c.path.total_time,
            transfer_count: c.path.transfers,
            edges: c.path.edges,
        })
        .collect()
}

/// Drops candidates whose route repeats an earlier one.
fn deduplicate(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut kept: Vec<Candidate> = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        match kept.iter_mut().find(|k| k.path.same_route(&candidate.path)) {
            Some(existing) => {
                debug!(
                    kept = ?existing.label,
                    dropped = ?candidate.label,
                    "Duplicate route"
                );
                if existing.label == RouteLabel::Fastest {
                    existing.label = RouteLabel::Recommended;
                }
            }
            None => kept.push(candidate),
        }
    }

    kept
}

fn occurrences(network: &Network, path: &PathResult) -> Vec<StationOccurrence> {
    path.nodes
        .iter()
        .map(|node| StationOccurrence {
            station: node.station.clone(),
            line: node.line.clone(),
            zone: network.zone_of(&node.station).map(str::to_string),
            position: network.stop(&node.line, &node.station).map(|s| s.position),
        })
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::graph::NodeKey;
    use proptest::prelude::*;

    fn candidate_strategy() -> impl Strategy<Value = Candidate> {
        let label = prop_oneof![
            Just(RouteLabel::Fastest),
            Just(RouteLabel::FewestTransfers),
            Just(RouteLabel::AvoidsPremium),
        ];
        // Few stations so that duplicates are common.
        (label, prop::collection::vec(0u8..3, 1..4)).prop_map(|(label, stations)| Candidate {
            label,
            path: PathResult {
                nodes: stations
                    .iter()
                    .map(|s| NodeKey::new(s.to_string(), "L"))
                    .collect(),
                ..PathResult::empty()
            },
        })
    }

    fn candidates_strategy() -> impl Strategy<Value = Vec<Candidate>> {
        prop::collection::vec(candidate_strategy(), 0..6)
    }

    proptest! {
        /// No two kept candidates describe the same route
        #[test]
        fn deduplicate_no_duplicate_routes(candidates in candidates_strategy()) {
            let kept = deduplicate(candidates);
            for (i, a) in kept.iter().enumerate() {
                for b in &kept[i + 1..] {
                    prop_assert!(!a.path.same_route(&b.path));
                }
            }
        }

        /// Every input route survives under some label
        #[test]
        fn deduplicate_keeps_every_route(candidates in candidates_strategy()) {
            let routes: Vec<PathResult> = candidates.iter().map(|c| c.path.clone()).collect();
            let kept = deduplicate(candidates);
            for route in &routes {
                prop_assert!(kept.iter().any(|k| k.path.same_route(route)));
            }
        }

        /// Only a fastest candidate is ever promoted
        #[test]
        fn recommended_replaces_fastest(candidates in candidates_strategy()) {
            let fastest = candidates.iter().filter(|c| c.label == RouteLabel::Fastest).count();
            let kept = deduplicate(candidates);
            let promoted = kept.iter().filter(|c| c.label == RouteLabel::Recommended).count();
            let still_fastest = kept.iter().filter(|c| c.label == RouteLabel::Fastest).count();
            prop_assert!(promoted + still_fastest <= fastest);
        }
    }
}
