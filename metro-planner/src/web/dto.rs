//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::network::{Line, Network};
use crate::planner::RouteOption;

/// Query for route planning.
#[derive(Debug, Default, Deserialize)]
pub struct RoutesQuery {
    /// Origin station name
    pub from: Option<String>,

    /// Destination station name
    pub to: Option<String>,
}

/// Response for route planning.
#[derive(Debug, Serialize)]
pub struct RoutesResponse {
    pub from: String,
    pub to: String,

    /// Distinct route options, recommended or fastest first
    pub routes: Vec<RouteOption>,
}

/// A line in the network listing.
#[derive(Debug, Serialize, PartialEq)]
pub struct LineSummary {
    pub name: String,
    pub color: String,
    pub premium: bool,

    /// Station names in travel order
    pub stations: Vec<String>,
}

/// Response listing every line.
#[derive(Debug, Serialize)]
pub struct LinesResponse {
    pub lines: Vec<LineSummary>,
}

/// A station in the network listing.
#[derive(Debug, Serialize, PartialEq)]
pub struct StationSummary {
    pub name: String,
    pub zone: Option<String>,
    pub lines: Vec<String>,
}

/// Response listing every station.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationSummary>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl LineSummary {
    pub fn from_line(line: &Line) -> Self {
        Self {
            name: line.name.clone(),
            color: line.color.clone(),
            premium: line.premium,
            stations: line.stops.iter().map(|s| s.name.clone()).collect(),
        }
    }
}

impl LinesResponse {
    pub fn from_network(network: &Network) -> Self {
        Self {
            lines: network.lines().iter().map(LineSummary::from_line).collect(),
        }
    }
}

impl StationsResponse {
    /// Stations sorted by name.
    pub fn from_network(network: &Network) -> Self {
        let stations = network
            .station_names()
            .map(|name| StationSummary {
                name: name.to_string(),
                zone: network.zone_of(name).map(str::to_string),
                lines: network
                    .lines_through(name)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            })
            .collect();
        Self { stations }
    }
}
