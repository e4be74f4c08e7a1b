use crate::message::LogRecord;
use std::sync::mpsc::Receiver;

/// Interface every adapter exposes to the routing host.
///
/// The host creates one channel per adapter instance, hands the receiving end
/// to [`LogAdapter::stream`] (usually on a dedicated thread) and keeps the
/// sending end. `stream` returns once every sender has been dropped.
pub trait LogAdapter: Send {
    /// Returns the name the adapter is registered under
    fn name(&self) -> &str;

    /// Consume records until the host closes the channel.
    fn stream(&mut self, logstream: Receiver<LogRecord>);
}
