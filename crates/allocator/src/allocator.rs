use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::SplitConfig;
use crate::quota::{distribution, quota_floors, DimTable};
use crate::types::{Dimension, Packet, Record, Split};

/// The three output record sequences, in assignment order and with
/// debug attributes already stripped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Allocation {
    pub test: Vec<Record>,
    pub dev: Vec<Record>,
    pub train: Vec<Record>,
}

impl Allocation {
    /// Records assigned to one split
    #[must_use]
    pub fn split(&self, split: Split) -> &[Record] {
        match split {
            Split::Test => &self.test,
            Split::Dev => &self.dev,
            Split::Train => &self.train,
        }
    }

    fn split_mut(&mut self, split: Split) -> &mut Vec<Record> {
        match split {
            Split::Test => &mut self.test,
            Split::Dev => &mut self.dev,
            Split::Train => &mut self.train,
        }
    }

    /// All splits with their records, in fill order
    pub fn iter(&self) -> impl Iterator<Item = (Split, &[Record])> + '_ {
        Split::ALL.into_iter().map(move |s| (s, self.split(s)))
    }

    /// Total record count across all three splits
    #[must_use]
    pub fn records_total(&self) -> usize {
        self.test.len() + self.dev.len() + self.train.len()
    }
}

/// Running quota state for one greedy candidate split
struct CandidateState {
    split: Split,
    floors: DimTable,
    fill: DimTable,
}

impl CandidateState {
    /// A split "needs" a dimension while at least one value of that
    /// dimension is still below its floor. Assignment requires all
    /// three dimensions to be needy at once, which biases packets
    /// toward splits making balanced progress instead of overshooting
    /// one dimension while another starves.
    fn needs_all_dimensions(&self, dist: &DimTable) -> bool {
        Dimension::ALL.into_iter().all(|dim| {
            dist.dim(dim)
                .keys()
                .any(|key| self.fill.get(dim, key) < self.floors.get(dim, key))
        })
    }
}

/// Partition a packet collection into test, dev and train.
///
/// Packets are atomic: all of a packet's usable records land in the
/// same split. Labels too rare to reach every split are dropped up
/// front. The greedy pass visits packets in seeded-shuffle order and
/// offers each to test, then dev; a packet that neither candidate can
/// take falls through to train. The shuffle seed is the sole source
/// of randomness, so identical input yields identical output.
#[must_use]
pub fn allocate(packets: Vec<Packet>, config: &SplitConfig) -> Allocation {
    // drop labels that cannot reach all three splits
    let mut packets_per_label = count_packets_per_label(&packets);
    let mut packets = filter_usable(packets, &packets_per_label);

    // global distribution and per-split quota floors
    let dist = distribution(&packets);
    log::info!(
        "{} packets with {} usable records across {} labels",
        packets.len(),
        dist.total(),
        dist.dim(Dimension::Label).len()
    );

    let mut candidates = [
        CandidateState {
            split: Split::Test,
            floors: quota_floors(&dist, config.test_min_records),
            fill: DimTable::new(),
        },
        CandidateState {
            split: Split::Dev,
            floors: quota_floors(&dist, config.dev_min_records),
            fill: DimTable::new(),
        },
    ];

    // deterministic shuffle
    let mut rng = ChaCha8Rng::seed_from_u64(config.shuffle_seed);
    packets.shuffle(&mut rng);

    // greedy assignment, test before dev, train as residual
    let mut allocation = Allocation::default();
    for packet in packets {
        let mut target = Split::Train;
        for (attempt, candidate) in candidates.iter().enumerate() {
            let remaining_splits = Split::ALL.len() - attempt - 1;
            if starves_scarce_label(&packet, &packets_per_label, remaining_splits) {
                continue;
            }
            if !candidate.needs_all_dimensions(&dist) {
                continue;
            }
            target = candidate.split;
            break;
        }

        if let Some(candidate) = candidates.iter_mut().find(|c| c.split == target) {
            candidate.fill.add_packet(&packet);
            // A packet claimed by test or dev burns one unit of
            // availability per distinct label; fall-through to train
            // does not.
            for label in packet.distinct_labels() {
                if let Some(n) = packets_per_label.get_mut(label) {
                    *n -= 1;
                }
            }
        }

        let out = allocation.split_mut(target);
        for mut record in packet.records {
            record.strip_debug_fields();
            out.push(record);
        }
    }

    for (split, records) in allocation.iter() {
        log::debug!("split {}: {} records", split.as_str(), records.len());
    }
    allocation
}

/// Number of distinct packets containing at least one record per label
fn count_packets_per_label(packets: &[Packet]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for packet in packets {
        for label in packet.distinct_labels() {
            *counts.entry(label.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

/// Keep only records whose label appears in at least as many packets
/// as there are splits, then drop packets left with no records
fn filter_usable(packets: Vec<Packet>, packets_per_label: &HashMap<String, usize>) -> Vec<Packet> {
    let min_packets = Split::ALL.len();
    let mut usable = Vec::with_capacity(packets.len());
    for mut packet in packets {
        packet
            .records
            .retain(|r| packets_per_label.get(&r.label).copied().unwrap_or(0) >= min_packets);
        if !packet.records.is_empty() {
            usable.push(packet);
        }
    }
    usable
}

/// Scarcity guard: true when assigning this packet now would leave too
/// few packets carrying one of its labels to cover the splits still to
/// be filled. The `<=` boundary is load-bearing; downstream splits
/// each need at least one packet per usable label.
fn starves_scarce_label(
    packet: &Packet,
    packets_per_label: &HashMap<String, usize>,
    remaining_splits: usize,
) -> bool {
    packet.records.iter().any(|record| {
        packets_per_label
            .get(&record.label)
            .copied()
            .unwrap_or(0)
            <= remaining_splits
    })
}
