use serde::{Deserialize, Serialize};

/// Trigger payload accepted by the controller, in one of two shapes:
/// an explicit testing/bootstrap payload, or a log-subscription delivery
/// wrapping a worker completion record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InvocationEvent {
    Manual(ManualTrigger),
    Delivery(LogDeliveryPayload),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManualTrigger {
    pub symbol: String,
    pub first: u64,
    pub range: u64,
    #[serde(default)]
    pub invoke_next: bool,
}

/// Encoded log-subscription blob: base64 over gzip over UTF-8 JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogDeliveryPayload {
    pub data: String,
}

/// Structured completion signal emitted by the range worker as the
/// trailing tab-separated JSON segment of its log line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletionRecord {
    pub name: String,
    pub first: u64,
    pub last: u64,
    pub state: String,
    pub invoke_next: bool,
}

/// Inclusive index range dispatched to the range worker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RangeRequest {
    pub symbol: String,
    pub first: u64,
    pub last: u64,
    pub invoke_next: bool,
}

/// Process-wide controller configuration, built once at startup and
/// passed explicitly. `latest_known_index` is the out-of-band upper
/// bound of the remote sequence and the sole anti-infinite-loop guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    pub step: u64,
    pub symbol: String,
    pub latest_known_index: u64,
    pub worker_function_id: String,
    pub notify_webhook: String,
}
