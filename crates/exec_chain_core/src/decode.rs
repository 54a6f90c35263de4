use std::io::Read;

use base64::Engine;
use flate2::read::GzDecoder;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::contract::{CompletionRecord, InvocationEvent, ManualTrigger};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unrecognized trigger payload: {0}")]
    UnrecognizedTrigger(serde_json::Error),
    #[error("invalid base64 in log delivery payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("failed to decompress log delivery payload: {0}")]
    Decompress(#[from] std::io::Error),
    #[error("malformed log delivery JSON: {0}")]
    Json(serde_json::Error),
    #[error("log delivery contained no log events")]
    EmptyDelivery,
    #[error("log message has no trailing record segment: {message:?}")]
    MissingRecordSegment { message: String },
    #[error("completion record violates first <= last: first={first}, last={last}")]
    InvertedRange { first: u64, last: u64 },
}

#[derive(Debug, Deserialize)]
struct LogEventBatch {
    #[serde(rename = "logEvents")]
    log_events: Vec<LogEvent>,
}

#[derive(Debug, Deserialize)]
struct LogEvent {
    message: String,
}

/// Single internal representation of both trigger shapes.
///
/// Delivery triggers carry no symbol and no step override; the
/// controller falls back to its configured values for both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTrigger {
    pub symbol: Option<String>,
    pub last_consumed: u64,
    pub next_first: u64,
    pub continue_requested: bool,
    pub manual: bool,
    pub step_override: Option<u64>,
}

/// Parses a raw trigger value and normalizes it. Any failure is fatal
/// for the invocation and must propagate to the caller.
pub fn normalize_value(event: Value) -> Result<NormalizedTrigger, DecodeError> {
    let event: InvocationEvent =
        serde_json::from_value(event).map_err(DecodeError::UnrecognizedTrigger)?;
    normalize_event(event)
}

pub fn normalize_event(event: InvocationEvent) -> Result<NormalizedTrigger, DecodeError> {
    match event {
        InvocationEvent::Manual(manual) => Ok(normalize_manual(manual)),
        InvocationEvent::Delivery(delivery) => {
            let record = decode_completion_record(&delivery.data)?;
            Ok(NormalizedTrigger {
                symbol: None,
                last_consumed: record.last,
                next_first: record.last.saturating_add(1),
                continue_requested: record.invoke_next,
                manual: false,
                step_override: None,
            })
        }
    }
}

fn normalize_manual(manual: ManualTrigger) -> NormalizedTrigger {
    NormalizedTrigger {
        symbol: Some(manual.symbol),
        last_consumed: manual.first.saturating_sub(1),
        next_first: manual.first,
        continue_requested: manual.invoke_next,
        manual: true,
        step_override: Some(manual.range),
    }
}

/// Unwraps a log-subscription delivery blob down to the completion
/// record: base64, then gzip, then JSON, then the trailing tab-separated
/// segment of the most recent log event.
pub fn decode_completion_record(data: &str) -> Result<CompletionRecord, DecodeError> {
    let compressed = base64::engine::general_purpose::STANDARD.decode(data)?;
    let mut text = String::new();
    GzDecoder::new(compressed.as_slice()).read_to_string(&mut text)?;

    let batch: LogEventBatch = serde_json::from_str(&text).map_err(DecodeError::Json)?;
    // Deliveries batch multiple log lines; only the most recent
    // completion decides the next range.
    let last_event = batch.log_events.last().ok_or(DecodeError::EmptyDelivery)?;
    parse_record_segment(&last_event.message)
}

fn parse_record_segment(message: &str) -> Result<CompletionRecord, DecodeError> {
    let segment = message
        .rsplit('\t')
        .next()
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| DecodeError::MissingRecordSegment {
            message: message.to_string(),
        })?;

    let record: CompletionRecord =
        serde_json::from_str(segment).map_err(DecodeError::Json)?;
    if record.first > record.last {
        return Err(DecodeError::InvertedRange {
            first: record.first,
            last: record.last,
        });
    }
    Ok(record)
}
