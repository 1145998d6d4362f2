//! Push channel from the engines to whoever renders results.

pub mod channel;
pub mod dispatch;
pub mod message;

pub use message::{Message, Reply, SessionId};

/// Outbound push. Implementations must not block; callers treat a failed
/// send as non-fatal.
pub trait Transport: Send + Sync {
    fn send(&self, msg: Message) -> anyhow::Result<()>;
}

/// Send and swallow failures. Nothing on the scan path fails because the
/// receiving side went away.
pub fn push(transport: &dyn Transport, msg: Message) {
    if let Err(e) = transport.send(msg) {
        tracing::debug!("Dropped push message: {}", e);
    }
}
