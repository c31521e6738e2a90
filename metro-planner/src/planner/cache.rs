//! Cache of built routing graphs.
//!
//! A graph depends only on the network and the set of excluded lines, and
//! the network never changes after load, so graphs are cached by exclusion
//! set. Queries in practice use at most two sets: nothing excluded, and the
//! premium lines excluded.

use std::sync::Arc;

use moka::sync::Cache as MokaCache;
use tracing::debug;

use crate::graph::{ExclusionSet, Graph, TransferWaits, build_graph};
use crate::network::Network;

/// Bounded, thread-safe cache of graphs keyed by exclusion set.
pub struct GraphCache {
    graphs: MokaCache<ExclusionSet, Arc<Graph>>,
    waits: TransferWaits,
}

impl GraphCache {
    /// Create a cache holding at most `capacity` graphs, built with `waits`.
    pub fn new(capacity: u64, waits: TransferWaits) -> Self {
        Self {
            graphs: MokaCache::builder().max_capacity(capacity).build(),
            waits,
        }
    }

    /// Returns the graph for `exclude`, building it on a miss.
    pub fn get_or_build(&self, network: &Network, exclude: &ExclusionSet) -> Arc<Graph> {
        if let Some(graph) = self.get(exclude) {
            return graph;
        }
        self.graphs.get_with(exclude.clone(), || {
            debug!(
                excluded = ?exclude.iter().collect::<Vec<_>>(),
                "Graph cache miss"
            );
            Arc::new(build_graph(network, exclude, self.waits))
        })
    }

    /// Returns the cached graph for `exclude` without building it.
    pub fn get(&self, exclude: &ExclusionSet) -> Option<Arc<Graph>> {
        self.graphs.get(exclude)
    }
}
