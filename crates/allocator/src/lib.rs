//! # Strata Allocator
//!
//! Stratified train/dev/test partitioning for packet-grouped corpora.
//!
//! ## Philosophy
//!
//! The allocator splits a labeled corpus into three disjoint subsets
//! whose distributions over year, discipline and label all track the
//! global corpus, while never tearing a packet (one source document's
//! records) across subsets. It is a greedy heuristic, not a solver:
//! quota floors are approximate targets, and assignment order is fixed
//! by a seeded shuffle so results reproduce exactly.
//!
//! ## Pipeline
//!
//! ```text
//! Packet JSON array
//!     │
//!     ├──> Schema detection (which record key the corpus uses)
//!     │
//!     ├──> Label eligibility filter (label must reach all 3 splits)
//!     │
//!     ├──> Distribution + quota floors per (dimension, value)
//!     │
//!     ├──> Seeded shuffle (ChaCha8, fixed seed)
//!     │
//!     └──> Greedy assignment
//!          ├─> scarcity guard (keep rare labels coverable)
//!          ├─> need check (all 3 dimensions under-filled)
//!          └─> test → dev → train fall-through
//! ```
//!
//! ## Example
//!
//! ```rust
//! use strata_allocator::{allocate, parse_packets, SplitConfig};
//! use serde_json::json;
//!
//! let raw = json!([
//!     {"year": 2020, "discipline": "cs", "imrad_smpls": [
//!         {"label": "intro", "text": "..."}
//!     ]}
//! ]);
//! let packets = parse_packets(&raw).unwrap();
//! let allocation = allocate(packets, &SplitConfig::default());
//! assert_eq!(allocation.records_total(), 0); // "intro" is too rare
//! ```

mod allocator;
mod config;
mod error;
mod quota;
mod schema;
mod types;

pub use allocator::{allocate, Allocation};
pub use config::SplitConfig;
pub use error::{Result, SplitError};
pub use schema::{detect_record_key, parse_packets, RECORD_KEYS};
pub use types::{Dimension, Packet, Record, Split, DEBUG_PREFIX};
