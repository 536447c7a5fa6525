use serde_json::Value;

use crate::error::{Result, SplitError};
use crate::types::{Packet, Record};

/// Recognised names for the nested record array. The corpus carries
/// exactly one of these on every packet; which one is decided by
/// looking at the first packet.
pub const RECORD_KEYS: [&str; 2] = ["imrad_smpls", "citrec_smpls"];

/// Determine which of the recognised record keys the corpus uses.
///
/// Fails with a schema error when the first packet carries none of the
/// recognised keys. An empty corpus has no schema to detect and
/// returns `None`.
pub fn detect_record_key(raw_packets: &[Value]) -> Result<Option<&'static str>> {
    let Some(first) = raw_packets.first() else {
        return Ok(None);
    };
    for key in RECORD_KEYS {
        if first.get(key).is_some() {
            return Ok(Some(key));
        }
    }
    Err(SplitError::schema(format!(
        "first packet carries none of the recognised record keys: {}",
        RECORD_KEYS.join(", ")
    )))
}

/// Parse a raw JSON packet array into typed packets.
///
/// The top-level value must be an array of objects shaped as
/// `{year, discipline, <record-key>: [...]}`. An empty array is valid
/// and yields no packets.
pub fn parse_packets(raw: &Value) -> Result<Vec<Packet>> {
    let raw_packets = raw
        .as_array()
        .ok_or_else(|| SplitError::schema("input must be a JSON array of packets"))?;

    let Some(record_key) = detect_record_key(raw_packets)? else {
        return Ok(Vec::new());
    };

    let mut packets = Vec::with_capacity(raw_packets.len());
    for (idx, raw_packet) in raw_packets.iter().enumerate() {
        packets.push(parse_packet(raw_packet, record_key).map_err(|e| {
            SplitError::schema(format!("packet at index {idx}: {e}"))
        })?);
    }
    Ok(packets)
}

fn parse_packet(raw: &Value, record_key: &str) -> Result<Packet> {
    let year = raw
        .get("year")
        .and_then(scalar_key)
        .ok_or_else(|| SplitError::schema("missing or non-scalar 'year'"))?;
    let discipline = raw
        .get("discipline")
        .and_then(Value::as_str)
        .ok_or_else(|| SplitError::schema("missing or non-string 'discipline'"))?
        .to_string();
    let raw_records = raw
        .get(record_key)
        .and_then(Value::as_array)
        .ok_or_else(|| SplitError::schema(format!("missing record array '{record_key}'")))?;

    let mut records = Vec::with_capacity(raw_records.len());
    for raw_record in raw_records {
        let record: Record = serde_json::from_value(raw_record.clone())
            .map_err(|e| SplitError::schema(format!("malformed record: {e}")))?;
        records.push(record);
    }

    Ok(Packet {
        year,
        discipline,
        records,
    })
}

/// Canonicalise a scalar JSON value into a counter key. Years appear
/// both as numbers and as strings in the wild.
fn scalar_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn detects_first_recognised_key() {
        let raw = vec![json!({"imrad_smpls": [], "year": 2020, "discipline": "cs"})];
        assert_eq!(detect_record_key(&raw).unwrap(), Some("imrad_smpls"));

        let raw = vec![json!({"citrec_smpls": [], "year": 2020, "discipline": "cs"})];
        assert_eq!(detect_record_key(&raw).unwrap(), Some("citrec_smpls"));
    }

    #[test]
    fn unknown_record_key_is_a_schema_error() {
        let raw = vec![json!({"samples": [], "year": 2020, "discipline": "cs"})];
        let err = detect_record_key(&raw).unwrap_err();
        assert!(matches!(err, SplitError::Schema(_)));
    }

    #[test]
    fn empty_corpus_parses_to_no_packets() {
        let packets = parse_packets(&json!([])).unwrap();
        assert!(packets.is_empty());
    }

    #[test]
    fn parses_packets_with_numeric_and_string_years() {
        let raw = json!([
            {
                "year": 2019,
                "discipline": "physics",
                "imrad_smpls": [
                    {"label": "intro", "text": "a", "_debug": true},
                    {"label": "method", "text": "b"}
                ]
            },
            {
                "year": "2021",
                "discipline": "cs",
                "imrad_smpls": []
            }
        ]);
        let packets = parse_packets(&raw).unwrap();
        assert_eq!(packets.len(), 2);
        assert_eq!(packets[0].year, "2019");
        assert_eq!(packets[1].year, "2021");
        assert_eq!(packets[0].records.len(), 2);
        assert_eq!(packets[0].records[0].label, "intro");
        assert_eq!(packets[0].records[0].payload["text"], json!("a"));
        assert!(packets[0].records[0].payload.contains_key("_debug"));
    }

    #[test]
    fn missing_year_is_a_schema_error() {
        let raw = json!([
            {"discipline": "cs", "imrad_smpls": [{"label": "x"}]}
        ]);
        let err = parse_packets(&raw).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("year"), "unexpected message: {msg}");
    }

    #[test]
    fn record_without_label_is_a_schema_error() {
        let raw = json!([
            {"year": 2020, "discipline": "cs", "imrad_smpls": [{"text": "no label"}]}
        ]);
        assert!(parse_packets(&raw).is_err());
    }
}
