//! Planner configuration.

use crate::graph::TransferWaits;

use super::fare::FareTable;

/// Configuration parameters for route planning.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Wait for an ordinary transfer (minutes).
    pub transfer_wait_mins: f64,

    /// Wait for a fast transfer whose rule sets no wait of its own (minutes).
    pub fast_transfer_wait_mins: f64,

    /// Fare charged for any trip.
    pub base_fare: u32,

    /// Number of fare zones covered by the base fare.
    pub included_zones: usize,

    /// Fare per zone beyond the included ones.
    pub extra_zone_fare: u32,

    /// Surcharge for riding any premium line.
    pub premium_surcharge: u32,

    /// Maximum (start line, end line) pairs solved per query.
    /// Guards against interchange-heavy stations on very large networks.
    pub max_combinations: usize,

    /// Maximum number of cached graphs (one per exclusion set).
    pub graph_cache_capacity: u64,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        transfer_wait_mins: f64,
        fast_transfer_wait_mins: f64,
        fares: FareTable,
        max_combinations: usize,
        graph_cache_capacity: u64,
    ) -> Self {
        Self {
            transfer_wait_mins,
            fast_transfer_wait_mins,
            base_fare: fares.base,
            included_zones: fares.included_zones,
            extra_zone_fare: fares.per_extra_zone,
            premium_surcharge: fares.premium_surcharge,
            max_combinations,
            graph_cache_capacity,
        }
    }

    /// Returns the transfer waits for the graph builder.
    pub fn transfer_waits(&self) -> TransferWaits {
        TransferWaits {
            default_mins: self.transfer_wait_mins,
            fast_mins: self.fast_transfer_wait_mins,
        }
    }

    /// Returns the fare constants.
    pub fn fare_table(&self) -> FareTable {
        FareTable {
            base: self.base_fare,
            included_zones: self.included_zones,
            per_extra_zone: self.extra_zone_fare,
            premium_surcharge: self.premium_surcharge,
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            transfer_wait_mins: 3.0,
            fast_transfer_wait_mins: 1.5,
            base_fare: 3,
            included_zones: 2,
            extra_zone_fare: 1,
            premium_surcharge: 5,
            max_combinations: 64,
            graph_cache_capacity: 16,
        }
    }
}
