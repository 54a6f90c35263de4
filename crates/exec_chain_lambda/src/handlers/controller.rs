use chrono::Local;
use exec_chain_core::contract::{ControllerConfig, RangeRequest};
use exec_chain_core::decode::{normalize_value, DecodeError};
use exec_chain_core::pagination::{next_slice, should_stop};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::adapters::invoke::WorkerInvoker;
use crate::adapters::notify::CompletionNotifier;

pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M";

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("failed to decode trigger event: {0}")]
    Decode(#[from] DecodeError),
    #[error("failed to serialize range request: {0}")]
    Serialize(serde_json::Error),
    #[error("failed to dispatch range worker: {0}")]
    Dispatch(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ControllerResponse {
    pub status: String,
    pub message: String,
}

/// One run-to-completion controller step: decode the trigger, decide
/// whether the chain continues, and either dispatch the next range to
/// the worker or stop. Both outcomes send a best-effort status
/// notification and return the same message to the platform.
pub fn handle_controller_event(
    event: Value,
    config: &ControllerConfig,
    invoker: &dyn WorkerInvoker,
    notifier: &dyn CompletionNotifier,
) -> Result<ControllerResponse, ControllerError> {
    let trigger = normalize_value(event)?;

    if should_stop(
        trigger.next_first,
        trigger.continue_requested,
        config.latest_known_index,
        trigger.manual,
    ) {
        let message = format!(
            "{} range exhausted up to index {}",
            timestamp(),
            config.latest_known_index
        );
        notify_best_effort(notifier, &message);
        return Ok(ControllerResponse {
            status: "stopped".to_string(),
            message,
        });
    }

    let step = trigger.step_override.unwrap_or(config.step);
    let slice = next_slice(trigger.next_first, step, config.latest_known_index);
    let request = RangeRequest {
        symbol: trigger.symbol.unwrap_or_else(|| config.symbol.clone()),
        first: slice.first,
        last: slice.last,
        invoke_next: trigger.continue_requested,
    };

    let payload = serde_json::to_vec(&request).map_err(ControllerError::Serialize)?;
    invoker
        .invoke_worker_async(&payload)
        .map_err(ControllerError::Dispatch)?;

    let message = format!(
        "{} dispatched worker for [{}, {}]",
        timestamp(),
        request.first,
        request.last
    );
    notify_best_effort(notifier, &message);
    Ok(ControllerResponse {
        status: "dispatched".to_string(),
        message,
    })
}

fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

fn notify_best_effort(notifier: &dyn CompletionNotifier, message: &str) {
    if let Err(error) = notifier.notify(message) {
        tracing::warn!(%error, "status notification failed");
    }
}
