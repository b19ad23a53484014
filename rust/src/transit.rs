//! Transit cost index: cheapest subway fees between the stations a request touches.
//!
//! Builds an undirected weighted graph from the subway edges and runs one
//! single-source shortest-path pass per queried station. Only stations that
//! actually appear in the request (task stations plus home) are used as
//! sources; destinations cover everything reachable from each source.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use crate::interner::{NodeIdx, StationInterner};
use crate::models::{Fee, StationId, SubwayEdge};
use crate::{log_changes, log_debug};

/// Errors that can occur while querying the transit cost index.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitError {
    /// A required fee lookup had no entry. The input guarantees mutual
    /// reachability of referenced stations, so this is a data-integrity
    /// error, never a condition to default to zero.
    #[error("no subway route from station {from} to station {to}")]
    Unreachable { from: StationId, to: StationId },
}

/// Undirected subway graph over interned station indices.
#[derive(Debug, Clone)]
pub struct TransitGraph {
    interner: StationInterner,
    adjacency: Vec<Vec<(NodeIdx, Fee)>>,
}

impl TransitGraph {
    /// Build the adjacency structure from edge records.
    ///
    /// Each edge contributes two arcs of equal weight. Parallel edges are
    /// all kept; the shortest-path pass selects the minimum naturally.
    pub fn new(edges: &[SubwayEdge]) -> Self {
        let mut interner = StationInterner::with_capacity(edges.len() * 2);
        let mut adjacency: Vec<Vec<(NodeIdx, Fee)>> = Vec::new();

        for edge in edges {
            let (a, b) = edge.stations;
            let u = Self::node(&mut interner, &mut adjacency, a);
            let v = Self::node(&mut interner, &mut adjacency, b);
            adjacency[u as usize].push((v, edge.fee));
            adjacency[v as usize].push((u, edge.fee));
        }

        Self {
            interner,
            adjacency,
        }
    }

    fn node(
        interner: &mut StationInterner,
        adjacency: &mut Vec<Vec<(NodeIdx, Fee)>>,
        station: StationId,
    ) -> NodeIdx {
        let idx = interner.intern(station);
        if idx as usize == adjacency.len() {
            adjacency.push(Vec::new());
        }
        idx
    }

    /// Single-source shortest fees from `source` to every reachable node.
    ///
    /// Standard binary-heap relaxation over non-negative weights; a popped
    /// entry whose fee no longer matches the tentative fee is stale and
    /// skipped.
    fn shortest_from(&self, source: NodeIdx, verbosity: u8) -> Vec<Option<Fee>> {
        let mut fees: Vec<Option<Fee>> = vec![None; self.adjacency.len()];
        let mut heap = BinaryHeap::new();

        fees[source as usize] = Some(0);
        heap.push(Reverse((0, source)));

        while let Some(Reverse((d, u))) = heap.pop() {
            if fees[u as usize] != Some(d) {
                continue; // stale entry
            }
            for &(v, w) in &self.adjacency[u as usize] {
                let nd = d + w;
                if fees[v as usize].map_or(true, |cur| nd < cur) {
                    log_debug!(
                        verbosity,
                        "relax: node {} -> node {} fee {}",
                        u,
                        v,
                        nd
                    );
                    fees[v as usize] = Some(nd);
                    heap.push(Reverse((nd, v)));
                }
            }
        }

        fees
    }
}

/// Fee table indexed by (source station, destination station).
///
/// Sources are exactly the queried stations; destinations are whatever is
/// reachable from each source. Rebuilt per request; nothing persists.
#[derive(Debug, Clone, Default)]
pub struct DistanceTable {
    fees: FxHashMap<StationId, FxHashMap<StationId, Fee>>,
}

impl DistanceTable {
    /// Build the table by running one shortest-path pass per query station.
    ///
    /// A query station absent from the graph still gets a (empty) row; only
    /// the self-distance rule answers lookups against it.
    pub fn build(
        edges: &[SubwayEdge],
        query_stations: &FxHashSet<StationId>,
        verbosity: u8,
    ) -> Self {
        let graph = TransitGraph::new(edges);
        let mut fees: FxHashMap<StationId, FxHashMap<StationId, Fee>> =
            FxHashMap::with_capacity_and_hasher(query_stations.len(), Default::default());

        for &station in query_stations {
            let mut row: FxHashMap<StationId, Fee> = FxHashMap::default();
            if let Some(source) = graph.interner.get(station) {
                for (idx, fee) in graph.shortest_from(source, verbosity).into_iter().enumerate() {
                    let (Some(fee), Some(dest)) = (fee, graph.interner.resolve(idx as NodeIdx))
                    else {
                        continue;
                    };
                    row.insert(dest, fee);
                }
            }
            fees.insert(station, row);
        }

        log_changes!(
            verbosity,
            "distance table built: {} sources over {} graph nodes",
            fees.len(),
            graph.interner.len()
        );

        Self { fees }
    }

    /// Cheapest fee from `from` to `to`.
    ///
    /// Self-distance is 0 by definition, overriding any self-loop edges.
    /// A missing entry is a hard error, not a zero.
    pub fn fee(&self, from: StationId, to: StationId) -> Result<Fee, TransitError> {
        if from == to {
            return Ok(0);
        }
        self.fees
            .get(&from)
            .and_then(|row| row.get(&to))
            .copied()
            .ok_or(TransitError::Unreachable { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(a: StationId, b: StationId, fee: Fee) -> SubwayEdge {
        SubwayEdge {
            stations: (a, b),
            fee,
        }
    }

    fn query(stations: &[StationId]) -> FxHashSet<StationId> {
        stations.iter().copied().collect()
    }

    #[test]
    fn test_direct_edge_fee() {
        let table = DistanceTable::build(&[edge(1, 2, 7)], &query(&[1, 2]), 0);
        assert_eq!(table.fee(1, 2), Ok(7));
        assert_eq!(table.fee(2, 1), Ok(7));
    }

    #[test]
    fn test_multi_hop_beats_direct_edge() {
        // 1-3 direct costs 10, but 1-2-3 costs 3+4=7
        let edges = [edge(1, 3, 10), edge(1, 2, 3), edge(2, 3, 4)];
        let table = DistanceTable::build(&edges, &query(&[1, 3]), 0);
        assert_eq!(table.fee(1, 3), Ok(7));
        assert_eq!(table.fee(3, 1), Ok(7));
    }

    #[test]
    fn test_parallel_edges_keep_cheapest() {
        let edges = [edge(1, 2, 9), edge(1, 2, 4), edge(1, 2, 6)];
        let table = DistanceTable::build(&edges, &query(&[1, 2]), 0);
        assert_eq!(table.fee(1, 2), Ok(4));
    }

    #[test]
    fn test_symmetry_over_chain() {
        let edges = [edge(1, 2, 2), edge(2, 3, 5), edge(3, 4, 1)];
        let table = DistanceTable::build(&edges, &query(&[1, 2, 3, 4]), 0);
        for &a in &[1, 2, 3, 4] {
            for &b in &[1, 2, 3, 4] {
                assert_eq!(table.fee(a, b), table.fee(b, a));
            }
        }
        assert_eq!(table.fee(1, 4), Ok(8));
    }

    #[test]
    fn test_self_distance_zero_despite_self_loop() {
        let edges = [edge(5, 5, 100), edge(5, 6, 2)];
        let table = DistanceTable::build(&edges, &query(&[5, 6]), 0);
        assert_eq!(table.fee(5, 5), Ok(0));
        assert_eq!(table.fee(6, 6), Ok(0));
        assert_eq!(table.fee(5, 6), Ok(2));
    }

    #[test]
    fn test_unreachable_is_an_error() {
        // two disconnected components
        let edges = [edge(1, 2, 1), edge(10, 11, 1)];
        let table = DistanceTable::build(&edges, &query(&[1, 10]), 0);
        assert_eq!(
            table.fee(1, 10),
            Err(TransitError::Unreachable { from: 1, to: 10 })
        );
    }

    #[test]
    fn test_station_absent_from_graph() {
        let table = DistanceTable::build(&[edge(1, 2, 1)], &query(&[1, 42]), 0);
        // self lookups still answer; anything else errors
        assert_eq!(table.fee(42, 42), Ok(0));
        assert_eq!(
            table.fee(42, 1),
            Err(TransitError::Unreachable { from: 42, to: 1 })
        );
    }

    #[test]
    fn test_destinations_not_restricted_to_query_set() {
        // only station 1 is queried, but 3 is reachable and gets an entry
        let edges = [edge(1, 2, 2), edge(2, 3, 2)];
        let table = DistanceTable::build(&edges, &query(&[1]), 0);
        assert_eq!(table.fee(1, 3), Ok(4));
        // 3 was never a source, so the reverse lookup has no row
        assert!(table.fee(3, 1).is_err());
    }

    #[test]
    fn test_zero_fee_edges() {
        let edges = [edge(1, 2, 0), edge(2, 3, 0)];
        let table = DistanceTable::build(&edges, &query(&[1, 3]), 0);
        assert_eq!(table.fee(1, 3), Ok(0));
    }
}
