//! Route planning over the metro network.
//!
//! Given two station names, the planner builds (or reuses) the routing
//! graph, runs a direction-aware Dijkstra search under each objective, and
//! returns a short list of distinct route options with fares attached.

mod cache;
mod config;
mod fare;
mod select;
mod solve;

use std::sync::Arc;

use crate::graph::{ExclusionSet, build_graph};
use crate::network::Network;

pub use cache::GraphCache;
pub use config::PlannerConfig;
pub use fare::{Fare, FareTable, calculate_fare, zones_touched};
pub use select::{RouteLabel, RouteOption, StationOccurrence};
pub use solve::{Cost, Objective, PathEdge, PathResult, find_path, find_station_path, solve};

/// Plans route options between two stations, building graphs on demand.
///
/// Returns an empty list when either station is unknown or no route exists.
pub fn plan_routes(
    network: &Network,
    config: &PlannerConfig,
    from: &str,
    to: &str,
) -> Vec<RouteOption> {
    select::select_routes(network, config, from, to, |exclude| {
        Arc::new(build_graph(network, exclude, config.transfer_waits()))
    })
}

/// Route planner holding a network, its configuration and a graph cache.
///
/// Cheap to share behind an `Arc`; every method takes `&self`.
pub struct Planner {
    network: Arc<Network>,
    config: PlannerConfig,
    graphs: GraphCache,
}

impl Planner {
    /// Create a new planner.
    pub fn new(network: Arc<Network>, config: PlannerConfig) -> Self {
        let graphs = GraphCache::new(config.graph_cache_capacity, config.transfer_waits());
        Self {
            network,
            config,
            graphs,
        }
    }

    /// The planner's network.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// The planner's configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plans route options between two stations. See [`plan_routes`].
    pub fn plan(&self, from: &str, to: &str) -> Vec<RouteOption> {
        select::select_routes(&self.network, &self.config, from, to, |exclude| {
            self.graphs.get_or_build(&self.network, exclude)
        })
    }

    /// Best single path between two stations under `objective`, on the full
    /// network.
    pub fn find_path(&self, from: &str, to: &str, objective: Objective) -> PathResult {
        let graph = self.graphs.get_or_build(&self.network, &ExclusionSet::none());
        find_station_path(&graph, from, to, objective, self.config.max_combinations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{FastTransferRule, Line, NetworkConfig, Stop};

    fn stops(data: &[(&str, &str, Option<f64>)]) -> Vec<Stop> {
        data.iter()
            .map(|(name, zone, t)| Stop::new(*name, *zone, *t))
            .collect()
    }

    fn worked_example() -> Network {
        Network::from_lines(vec![
            Line::new(
                "A",
                stops(&[("P", "1", Some(3.0)), ("Q", "1", Some(4.0)), ("R", "1", None)]),
            ),
            Line::new("B", stops(&[("Q", "1", Some(5.0)), ("S", "2", None)])),
        ])
        .unwrap()
    }

    /// City line A-B-C-D-E with 2 min hops, and a premium express A-E.
    fn express_network() -> Network {
        Network::from_lines(vec![
            Line::new(
                "City",
                stops(&[
                    ("A", "1", Some(2.0)),
                    ("B", "1", Some(2.0)),
                    ("C", "2", Some(2.0)),
                    ("D", "2", Some(2.0)),
                    ("E", "3", None),
                ]),
            ),
            Line::new("Express", stops(&[("A", "1", Some(3.0)), ("E", "3", None)])).premium(),
        ])
        .unwrap()
    }

    #[test]
    fn worked_example_single_route() {
        let network = worked_example();
        let routes = plan_routes(&network, &PlannerConfig::default(), "P", "S");

        assert_eq!(routes.len(), 1);
        let route = &routes[0];
        assert_eq!(route.label, RouteLabel::Recommended);
        assert_eq!(route.title, "Recommended route");
        assert_eq!(route.total_time_minutes, 11.0);
        assert_eq!(route.transfer_count, 1);
        assert_eq!(
            route
                .path
                .iter()
                .map(|o| (o.station.as_str(), o.line.as_str()))
                .collect::<Vec<_>>(),
            vec![("P", "A"), ("Q", "A"), ("Q", "B"), ("S", "B")]
        );
        assert_eq!(route.edges.len(), 3);
        assert_eq!(route.fare.total, 3);
    }

    #[test]
    fn unknown_station_gives_no_routes() {
        let network = worked_example();
        let config = PlannerConfig::default();

        assert!(plan_routes(&network, &config, "Nowhere", "S").is_empty());
        assert!(plan_routes(&network, &config, "P", "Nowhere").is_empty());
    }

    #[test]
    fn unreachable_station_gives_no_routes() {
        let network = Network::from_lines(vec![
            Line::new("A", stops(&[("P", "1", Some(1.0)), ("Q", "1", None)])),
            Line::new("B", stops(&[("R", "1", Some(1.0)), ("S", "1", None)])),
        ])
        .unwrap();

        assert!(plan_routes(&network, &PlannerConfig::default(), "P", "S").is_empty());
    }

    #[test]
    fn premium_route_offers_alternative() {
        let network = express_network();
        let routes = plan_routes(&network, &PlannerConfig::default(), "A", "E");

        // Express is fastest and also direct, so it is recommended; the city
        // line is the premium-free alternative.
        assert_eq!(
            routes.iter().map(|r| r.label).collect::<Vec<_>>(),
            vec![RouteLabel::Recommended, RouteLabel::AvoidsPremium]
        );
        assert_eq!(routes[0].total_time_minutes, 3.0);
        assert_eq!(routes[0].fare.premium, 5);
        assert_eq!(routes[1].total_time_minutes, 8.0);
        assert_eq!(routes[1].fare.premium, 0);
        assert!(routes[1].path.iter().all(|o| o.line == "City"));
    }

    #[test]
    fn no_premium_variant_when_fastest_avoids_premium() {
        let network = express_network();
        let routes = plan_routes(&network, &PlannerConfig::default(), "B", "D");

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].label, RouteLabel::Recommended);
        assert!(routes[0].path.iter().all(|o| o.line == "City"));
    }

    #[test]
    fn fastest_and_fewest_transfers_differ() {
        // A: S-X-Y slow; B: X-Y quick; C: Y-D.
        let network = Network::from_lines(vec![
            Line::new(
                "A",
                stops(&[("S", "1", Some(2.0)), ("X", "1", Some(12.0)), ("Y", "1", None)]),
            ),
            Line::new("B", stops(&[("X", "1", Some(2.0)), ("Y", "1", None)])),
            Line::new("C", stops(&[("Y", "1", Some(2.0)), ("D", "1", None)])),
        ])
        .unwrap();
        let routes = plan_routes(&network, &PlannerConfig::default(), "S", "D");

        assert_eq!(
            routes.iter().map(|r| r.label).collect::<Vec<_>>(),
            vec![RouteLabel::Fastest, RouteLabel::FewestTransfers]
        );
        assert_eq!(routes[0].transfer_count, 2);
        assert_eq!(routes[0].total_time_minutes, 12.0);
        assert_eq!(routes[1].transfer_count, 1);
        assert_eq!(routes[1].total_time_minutes, 19.0);
    }

    #[test]
    fn occurrences_carry_zone_and_position() {
        let network = worked_example();
        let routes = plan_routes(&network, &PlannerConfig::default(), "P", "S");
        let last = routes[0].path.last().unwrap();

        assert_eq!(last.zone.as_deref(), Some("2"));
        assert!(last.position.is_some());
    }

    #[test]
    fn cached_planner_matches_uncached() {
        let network = Arc::new(express_network());
        let config = PlannerConfig::default();
        let planner = Planner::new(network.clone(), config.clone());

        for (from, to) in [("A", "E"), ("B", "D"), ("E", "A"), ("C", "C")] {
            assert_eq!(planner.plan(from, to), plan_routes(&network, &config, from, to));
        }
    }

    #[test]
    fn planner_reuses_graphs() {
        let planner = Planner::new(Arc::new(express_network()), PlannerConfig::default());
        planner.plan("A", "E");

        assert!(planner.graphs.get(&ExclusionSet::none()).is_some());
        let premium: ExclusionSet = ["Express"].into_iter().collect();
        assert!(planner.graphs.get(&premium).is_some());
    }

    #[test]
    fn planner_find_path_uses_objective() {
        let planner = Planner::new(Arc::new(worked_example()), PlannerConfig::default());
        let result = planner.find_path("P", "S", Objective::MinimizeTransfers);

        assert_eq!(result.total_time, 11.0);
        assert_eq!(result.transfers, 1);
        assert_eq!(planner.network().station_count(), 4);
        assert_eq!(planner.config().max_combinations, 64);
    }

    #[test]
    fn fast_transfer_shortens_planned_route() {
        let network = Network::new(NetworkConfig {
            lines: vec![
                Line::new(
                    "A",
                    stops(&[("X1", "1", Some(2.0)), ("Q", "1", Some(2.0)), ("X2", "1", None)]),
                ),
                Line::new(
                    "B",
                    stops(&[("Y1", "1", Some(2.0)), ("Q", "1", Some(2.0)), ("Y2", "1", None)]),
                ),
            ],
            fast_transfers: vec![FastTransferRule::new("Q", "A", "B", "X2", "Y2")],
        })
        .unwrap();
        let config = PlannerConfig::default();

        let fast = plan_routes(&network, &config, "X1", "Y2");
        assert_eq!(fast[0].total_time_minutes, 5.5);

        let slow = plan_routes(&network, &config, "X1", "Y1");
        assert_eq!(slow[0].total_time_minutes, 7.0);
    }

    #[test]
    fn same_station_is_trivial_route() {
        let network = worked_example();
        let routes = plan_routes(&network, &PlannerConfig::default(), "Q", "Q");

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].total_time_minutes, 0.0);
        assert_eq!(routes[0].transfer_count, 0);
        assert!(routes[0].edges.is_empty());
        assert_eq!(routes[0].fare.total, 3);
    }
}
