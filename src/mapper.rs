use serde_json::Value;
use serde_path_to_error::Segment;
use sesevent_types::{Event, Record, parse_instant};
use std::fmt::Write;

use crate::error::ParseError;

const RECORDS_KEY: &str = "Records";

/// Every schema field with this name holds an instant.
const INSTANT_FIELD: &str = "timestamp";

/// Parses an SES event document.
pub fn parse(json: &str) -> Result<Event, ParseError> {
    tracing::trace!(len = json.len(), "parsing ses event");
    let value: Value = serde_json::from_str(json).map_err(ParseError::Syntax)?;
    parse_value(value)
}

pub fn parse_slice(json: &[u8]) -> Result<Event, ParseError> {
    tracing::trace!(len = json.len(), "parsing ses event");
    let value: Value = serde_json::from_slice(json).map_err(ParseError::Syntax)?;
    parse_value(value)
}

/// Maps an already decoded JSON tree onto an [Event].
///
/// Records are mapped one at a time with their path tracked, so a failure
/// names the exact field, e.g. `Records[0].ses.mail.headers[1].name`.
pub fn parse_value(value: Value) -> Result<Event, ParseError> {
    let mut root = match value {
        Value::Object(root) => root,
        other => {
            return Err(ParseError::Shape {
                path: "$".to_string(),
                reason: format!("expected an object, found {}", json_type(&other)),
            });
        }
    };

    let raw_records = match root.remove(RECORDS_KEY) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(records)) => records,
        Some(other) => {
            return Err(ParseError::Shape {
                path: RECORDS_KEY.to_string(),
                reason: format!("expected an array, found {}", json_type(&other)),
            });
        }
    };

    let mut records = Vec::with_capacity(raw_records.len());
    for (index, raw) in raw_records.iter().enumerate() {
        let record: Record = serde_path_to_error::deserialize(raw)
            .map_err(|e| record_error(index, raw, e))?;
        records.push(record);
    }

    tracing::trace!(records = records.len(), "parsed ses event");
    Ok(Event { records })
}

/// Renders an event as compact JSON. Absent fields are omitted.
pub fn serialize(event: &Event) -> Result<String, serde_json::Error> {
    tracing::trace!(records = event.records.len(), "serializing ses event");
    serde_json::to_string(event)
}

pub fn serialize_pretty(event: &Event) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(event)
}

/// Turns a failure inside record `index` into a [ParseError] carrying the
/// full path. A string the instant parser rejects is reported as
/// [ParseError::Timestamp], anything else as [ParseError::Shape].
fn record_error(
    index: usize,
    record: &Value,
    error: serde_path_to_error::Error<serde_json::Error>,
) -> ParseError {
    let mut path = format!("{RECORDS_KEY}[{index}]");
    let mut pointer = Some(String::new());

    for segment in error.path().iter() {
        match segment {
            Segment::Seq { index } => {
                let _ = write!(path, "[{index}]");
                if let Some(pointer) = pointer.as_mut() {
                    let _ = write!(pointer, "/{index}");
                }
            }
            Segment::Map { key } | Segment::Enum { variant: key } => {
                let _ = write!(path, ".{key}");
                if let Some(pointer) = pointer.as_mut() {
                    let _ = write!(pointer, "/{}", key.replace('~', "~0").replace('/', "~1"));
                }
            }
            Segment::Unknown => {
                path.push_str(".?");
                pointer = None;
            }
        }
    }

    let at_instant = matches!(
        error.path().iter().last(),
        Some(Segment::Map { key }) if key == INSTANT_FIELD
    );
    if at_instant {
        let raw = pointer.as_deref().and_then(|pointer| record.pointer(pointer));
        if let Some(Value::String(raw)) = raw {
            if let Err(source) = parse_instant(raw) {
                return ParseError::Timestamp { path, source };
            }
        }
    }

    ParseError::Shape {
        path,
        reason: error.into_inner().to_string(),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
