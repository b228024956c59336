//! Native host process bridge

use std::sync::mpsc;
use tracing::warn;

/// Entry points exposed by the native host process
pub trait HostBridge: Send + Sync {
    /// Ask the host to quit the application
    fn request_quit(&self);
}

/// Host bridge that forwards quit requests over a channel
///
/// The host's main thread owns the receiver and decides how to shut down.
#[derive(Debug)]
pub struct ChannelHost {
    sender: mpsc::Sender<()>,
}

impl ChannelHost {
    /// Create the bridge and the receiver the host listens on
    pub fn channel() -> (Self, mpsc::Receiver<()>) {
        let (sender, receiver) = mpsc::channel();
        (Self { sender }, receiver)
    }

    /// Create a bridge that sends on an existing channel
    pub fn with_sender(sender: mpsc::Sender<()>) -> Self {
        Self { sender }
    }
}

impl HostBridge for ChannelHost {
    fn request_quit(&self) {
        if self.sender.send(()).is_err() {
            warn!("Quit requested but the host is no longer listening");
        }
    }
}
