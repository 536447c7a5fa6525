use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use strata_allocator::{parse_packets, Allocation, Packet};

/// Read and parse the packet array from `path`
pub fn read_packets(path: &Path) -> Result<Vec<Packet>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    let packets = parse_packets(&value)
        .with_context(|| format!("{} does not match the packet schema", path.display()))?;
    Ok(packets)
}

/// Write one `<stem>_<split>.jsonl` file per split into the current
/// directory, one serialised record per line in assignment order
pub fn write_splits(input: &Path, allocation: &Allocation) -> Result<()> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("corpus");

    for (split, records) in allocation.iter() {
        let path = PathBuf::from(format!("{stem}_{}.jsonl", split.as_str()));
        let file = File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        for record in records {
            serde_json::to_writer(&mut writer, record)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        log::info!("wrote {} records to {}", records.len(), path.display());
    }
    Ok(())
}
