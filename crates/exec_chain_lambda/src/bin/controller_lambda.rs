use std::sync::Arc;

use aws_sdk_lambda::types::InvocationType;
use exec_chain_core::contract::ControllerConfig;
use exec_chain_lambda::adapters::invoke::WorkerInvoker;
use exec_chain_lambda::adapters::notify::CompletionNotifier;
use exec_chain_lambda::handlers::controller::{handle_controller_event, ControllerResponse};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

struct LambdaWorkerInvoker {
    lambda_client: aws_sdk_lambda::Client,
    worker_function_id: String,
}

impl WorkerInvoker for LambdaWorkerInvoker {
    fn invoke_worker_async(&self, payload: &[u8]) -> Result<(), String> {
        let request_payload = payload.to_vec();
        let client = self.lambda_client.clone();
        let function_name = self.worker_function_id.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .invoke()
                    .function_name(function_name)
                    .invocation_type(InvocationType::Event)
                    .set_payload(Some(request_payload.into()))
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to invoke range worker: {error}"))
            })
        })
    }
}

struct WebhookNotifier {
    http_client: reqwest::Client,
    webhook_url: String,
}

impl CompletionNotifier for WebhookNotifier {
    fn notify(&self, message: &str) -> Result<(), String> {
        let client = self.http_client.clone();
        let url = self.webhook_url.clone();
        let body = json!({ "content": message });

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .post(url)
                    .json(&body)
                    .send()
                    .await
                    .map_err(|error| format!("failed to send webhook notification: {error}"))?
                    .error_for_status()
                    .map(|_| ())
                    .map_err(|error| format!("webhook returned error status: {error}"))
            })
        })
    }
}

fn required_var(name: &str) -> Result<String, Error> {
    std::env::var(name).map_err(|_| Error::from(format!("{name} must be configured")))
}

fn required_u64(name: &str) -> Result<u64, Error> {
    required_var(name)?
        .parse::<u64>()
        .map_err(|error| Error::from(format!("{name} must be a non-negative integer: {error}")))
}

fn config_from_env() -> Result<ControllerConfig, Error> {
    let step = required_u64("FETCH_STEP")?;
    if step == 0 {
        return Err(Error::from("FETCH_STEP must be a positive integer"));
    }

    Ok(ControllerConfig {
        step,
        symbol: required_var("TRADE_SYMBOL")?,
        latest_known_index: required_u64("LATEST_EXECUTION_ID")?,
        worker_function_id: required_var("WORKER_LAMBDA_ARN")?,
        notify_webhook: required_var("NOTIFY_WEBHOOK_URL")?,
    })
}

async fn run() -> Result<(), Error> {
    let config = Arc::new(config_from_env()?);

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let invoker = Arc::new(LambdaWorkerInvoker {
        lambda_client: aws_sdk_lambda::Client::new(&aws_config),
        worker_function_id: config.worker_function_id.clone(),
    });
    let notifier = Arc::new(WebhookNotifier {
        http_client: reqwest::Client::new(),
        webhook_url: config.notify_webhook.clone(),
    });

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let config = Arc::clone(&config);
        let invoker = Arc::clone(&invoker);
        let notifier = Arc::clone(&notifier);
        async move {
            let response = handle_controller_event(
                event.payload,
                &config,
                invoker.as_ref(),
                notifier.as_ref(),
            )?;
            Ok::<ControllerResponse, Error>(response)
        }
    }))
    .await
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    run().await
}
