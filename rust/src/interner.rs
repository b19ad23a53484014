//! Station interning for dense graph indexing.
//!
//! Maps sparse station identifiers to contiguous node indices so the
//! shortest-path arrays can be plain vectors instead of hash maps.

use rustc_hash::FxHashMap;

use crate::models::StationId;

/// Interned station index (u32 for compact storage and fast hashing).
pub type NodeIdx = u32;

/// Interner that maps station identifiers to dense node indices.
#[derive(Debug, Clone)]
pub struct StationInterner {
    to_idx: FxHashMap<StationId, NodeIdx>,
    from_idx: Vec<StationId>,
}

impl StationInterner {
    /// Create a new interner with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_idx: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            from_idx: Vec::with_capacity(capacity),
        }
    }

    /// Intern a station, returning its node index.
    /// If already interned, returns the existing index.
    pub fn intern(&mut self, station: StationId) -> NodeIdx {
        if let Some(&idx) = self.to_idx.get(&station) {
            return idx;
        }
        let idx = self.from_idx.len() as NodeIdx;
        self.from_idx.push(station);
        self.to_idx.insert(station, idx);
        idx
    }

    /// Get the node index for a station, if it exists.
    #[inline]
    pub fn get(&self, station: StationId) -> Option<NodeIdx> {
        self.to_idx.get(&station).copied()
    }

    /// Get the station for a node index.
    #[inline]
    pub fn resolve(&self, idx: NodeIdx) -> Option<StationId> {
        self.from_idx.get(idx as usize).copied()
    }

    /// Number of interned stations.
    pub fn len(&self) -> usize {
        self.from_idx.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.from_idx.is_empty()
    }
}

impl Default for StationInterner {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}
