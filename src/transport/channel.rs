use crate::transport::{Message, Transport};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// In-process transport over an unbounded tokio channel.
#[derive(Clone)]
pub struct ChannelTransport {
    tx: UnboundedSender<Message>,
}

impl ChannelTransport {
    pub fn new() -> (Self, UnboundedReceiver<Message>) {
        let (tx, rx) = unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Transport for ChannelTransport {
    fn send(&self, msg: Message) -> anyhow::Result<()> {
        self.tx
            .send(msg)
            .map_err(|e| anyhow::anyhow!("receiver closed: {:?}", e.0))
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Records every message; used by unit tests across the crate.
    #[derive(Default)]
    pub struct RecordingTransport {
        pub sent: Mutex<Vec<Message>>,
    }

    impl RecordingTransport {
        pub fn messages(&self) -> Vec<Message> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Transport for RecordingTransport {
        fn send(&self, msg: Message) -> anyhow::Result<()> {
            self.sent.lock().unwrap().push(msg);
            Ok(())
        }
    }
}
