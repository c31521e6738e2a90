//! Fare calculation.
//!
//! The base fare covers a fixed number of fare zones; each further distinct
//! zone touched adds one increment, and riding any premium line adds a flat
//! surcharge.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::network::Network;

use super::solve::PathResult;

/// Fare constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FareTable {
    pub base: u32,
    pub included_zones: usize,
    pub per_extra_zone: u32,
    pub premium_surcharge: u32,
}

/// Fare breakdown for one route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Fare {
    pub base: u32,
    pub additional: u32,
    pub premium: u32,
    pub total: u32,
}

impl FareTable {
    /// Charge for touching `zone_count` distinct zones.
    pub fn additional_fare(&self, zone_count: usize) -> u32 {
        let extra = zone_count.saturating_sub(self.included_zones);
        u32::try_from(extra)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.per_extra_zone)
    }

    /// Surcharge when a premium line is ridden.
    pub fn premium_fare(&self, uses_premium: bool) -> u32 {
        if uses_premium { self.premium_surcharge } else { 0 }
    }

    /// Combines the parts into a fare.
    pub fn fare(&self, zone_count: usize, uses_premium: bool) -> Fare {
        let additional = self.additional_fare(zone_count);
        let premium = self.premium_fare(uses_premium);
        Fare {
            base: self.base,
            additional,
            premium,
            total: self.base.saturating_add(additional).saturating_add(premium),
        }
    }
}

/// Distinct fare zones of the stations on `path`.
///
/// Each station is looked up once by name, whatever line it was visited on.
/// Stations without a zone are skipped.
pub fn zones_touched<'n>(network: &'n Network, path: &PathResult) -> BTreeSet<&'n str> {
    let stations: BTreeSet<&str> = path.stations().collect();
    stations
        .into_iter()
        .filter_map(|station| network.zone_of(station))
        .collect()
}

/// Fare for `path`. The empty path costs nothing.
pub fn calculate_fare(network: &Network, path: &PathResult, table: &FareTable) -> Fare {
    if path.is_empty() {
        return Fare::default();
    }
    let zones = zones_touched(network, path);
    let uses_premium = path.rides_on(|line| network.is_premium(line));
    table.fare(zones.len(), uses_premium)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn table_strategy() -> impl Strategy<Value = FareTable> {
        (0u32..20, 0usize..5, 0u32..5, 0u32..20).prop_map(
            |(base, included_zones, per_extra_zone, premium_surcharge)| FareTable {
                base,
                included_zones,
                per_extra_zone,
                premium_surcharge,
            },
        )
    }

    proptest! {
        /// Touching one more zone never lowers the additional fare
        #[test]
        fn additional_fare_is_monotone(table in table_strategy(), zones in 0usize..50) {
            prop_assert!(table.additional_fare(zones + 1) >= table.additional_fare(zones));
        }

        /// Dropping premium rides never raises the surcharge
        #[test]
        fn premium_removal_never_increases(table in table_strategy()) {
            prop_assert!(table.premium_fare(false) <= table.premium_fare(true));
            prop_assert_eq!(table.premium_fare(false), 0);
        }

        /// Total is always the sum of its parts
        #[test]
        fn total_is_sum(table in table_strategy(), zones in 0usize..50, premium in any::<bool>()) {
            let fare = table.fare(zones, premium);
            prop_assert_eq!(fare.total, fare.base + fare.additional + fare.premium);
            prop_assert_eq!(fare.base, table.base);
        }

        /// Nothing beyond the base within the included zones
        #[test]
        fn included_zones_are_free(table in table_strategy()) {
            for zones in 0..=table.included_zones {
                prop_assert_eq!(table.additional_fare(zones), 0);
            }
        }
    }
}
