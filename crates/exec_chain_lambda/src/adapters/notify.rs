/// Best-effort delivery of a human-readable status message. Failures
/// are logged and swallowed by the handler, never propagated.
pub trait CompletionNotifier {
    fn notify(&self, message: &str) -> Result<(), String>;
}
