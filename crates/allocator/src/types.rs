use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Prefix marking debug-only record attributes, stripped before output
pub const DEBUG_PREFIX: char = '_';

/// One labeled data point inside a packet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    /// Stratification label (categorical)
    pub label: String,

    /// All remaining attributes, preserved verbatim
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Record {
    /// Create a record with an empty payload
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: Map::new(),
        }
    }

    /// Drop payload attributes whose key starts with the debug prefix
    pub fn strip_debug_fields(&mut self) {
        self.payload
            .retain(|key, _| !key.starts_with(DEBUG_PREFIX));
    }

    /// Check whether any payload key carries the debug prefix
    #[must_use]
    pub fn has_debug_fields(&self) -> bool {
        self.payload.keys().any(|k| k.starts_with(DEBUG_PREFIX))
    }
}

/// Atomic group of records sharing one source document.
///
/// A packet is the unit of assignment: all of its records land in the
/// same split, or the packet is dropped entirely during filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct Packet {
    /// Publication year, canonicalised to a string key
    pub year: String,

    /// Discipline the source document belongs to
    pub discipline: String,

    /// Ordered records extracted from the document
    pub records: Vec<Record>,
}

impl Packet {
    /// Distinct labels appearing in this packet
    #[must_use]
    pub fn distinct_labels(&self) -> HashSet<&str> {
        self.records.iter().map(|r| r.label.as_str()).collect()
    }
}

/// One of the three output partitions, in fill order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Split {
    Test,
    Dev,
    Train,
}

impl Split {
    /// All splits in fill order: test first, train last
    pub const ALL: [Self; 3] = [Self::Test, Self::Dev, Self::Train];

    /// Splits the greedy loop tries, in priority order.
    /// Train is the residual split and never a candidate.
    pub const CANDIDATES: [Self; 2] = [Self::Test, Self::Dev];

    /// File suffix for this split
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::Dev => "dev",
            Self::Train => "train",
        }
    }
}

/// An attribute whose distribution should be preserved across splits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Year,
    Discipline,
    Label,
}

impl Dimension {
    /// All dimensions, in need-check order
    pub const ALL: [Self; 3] = [Self::Year, Self::Discipline, Self::Label];

    /// Positional index, used by per-dimension counter tables
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Year => 0,
            Self::Discipline => 1,
            Self::Label => 2,
        }
    }

    /// Human-readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Discipline => "discipline",
            Self::Label => "label",
        }
    }
}
