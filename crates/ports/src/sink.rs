//! Sink boundary contract.

/// A destination that receives pre-formatted log lines.
///
/// Implementations must be safe for concurrent writers and handle their own
/// I/O failures; a sink never fails a logging call.
pub trait LogSink: Send + Sync {
    /// Append one line (including its trailing newline).
    fn write_line(&self, line: &str);

    /// Flush buffered data.
    fn flush(&self) {}
}
