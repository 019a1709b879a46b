use serde_json::{Map, Value};
use tracing::debug;

/// Parse a string that is expected to contain a JSON object.
///
/// Fails when the input is not valid JSON or parses to something other
/// than an object.
pub fn parse_object(raw: &str) -> Result<Map<String, Value>, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Decode an optional JSON-object field, falling back to an empty mapping
/// when the field is absent, blank, malformed, or not an object.
///
/// Vendor payloads routinely carry broken JSON in these fields; parse
/// failures stop here and never reach the pipeline.
pub fn decode_object(raw: Option<&str>) -> Map<String, Value> {
    let Some(raw) = raw else {
        return Map::new();
    };
    if raw.trim().is_empty() {
        return Map::new();
    }
    match parse_object(raw) {
        Ok(map) => map,
        Err(err) => {
            debug!("discarding malformed json field: {}", err);
            Map::new()
        }
    }
}
