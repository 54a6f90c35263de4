/// Fire-and-forget dispatch of a serialized range request to the worker.
/// Acknowledgement of the invocation, not completion of the work, is the
/// success signal.
pub trait WorkerInvoker {
    fn invoke_worker_async(&self, payload: &[u8]) -> Result<(), String>;
}
