use std::collections::HashMap;

use crate::types::{Dimension, Packet};

/// Per-dimension counters keyed by dimension value.
///
/// The same table shape serves three roles: the global absolute
/// distribution, the per-split quota floors, and the per-split running
/// fill counters. Fill counters only ever grow within a run.
#[derive(Debug, Clone, Default)]
pub struct DimTable {
    tables: [HashMap<String, usize>; 3],
}

impl DimTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter value for a (dimension, value) pair; absent means zero
    #[must_use]
    pub fn get(&self, dim: Dimension, key: &str) -> usize {
        self.tables[dim.index()].get(key).copied().unwrap_or(0)
    }

    /// Add to the counter for a (dimension, value) pair
    pub fn add(&mut self, dim: Dimension, key: &str, n: usize) {
        *self.tables[dim.index()].entry(key.to_string()).or_insert(0) += n;
    }

    /// All (value, count) entries for one dimension
    #[must_use]
    pub fn dim(&self, dim: Dimension) -> &HashMap<String, usize> {
        &self.tables[dim.index()]
    }

    /// Record one packet's contribution: every record counts toward the
    /// packet's year and discipline, and toward its own label.
    pub fn add_packet(&mut self, packet: &Packet) {
        let n = packet.records.len();
        if n == 0 {
            return;
        }
        self.add(Dimension::Year, &packet.year, n);
        self.add(Dimension::Discipline, &packet.discipline, n);
        for record in &packet.records {
            self.add(Dimension::Label, &record.label, 1);
        }
    }

    /// Total record count, summed over one dimension (every record
    /// contributes exactly once per dimension, so any dimension works)
    #[must_use]
    pub fn total(&self) -> usize {
        self.tables[Dimension::Year.index()].values().sum()
    }
}

/// Absolute record counts per dimension value over the whole corpus
#[must_use]
pub fn distribution(packets: &[Packet]) -> DimTable {
    let mut dist = DimTable::new();
    for packet in packets {
        dist.add_packet(packet);
    }
    dist
}

/// Minimum per-value record counts a split must reach, derived from
/// the global distribution: `ceil(min_records * count / total)` for
/// each dimension value. Floors are independent per value, not a
/// joint constraint.
#[must_use]
pub fn quota_floors(dist: &DimTable, min_records: usize) -> DimTable {
    let mut floors = DimTable::new();
    let total = dist.total();
    if total == 0 {
        return floors;
    }
    for dim in Dimension::ALL {
        for (key, &count) in dist.dim(dim) {
            floors.add(dim, key, (min_records * count).div_ceil(total));
        }
    }
    floors
}
