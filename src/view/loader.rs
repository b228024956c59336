//! Loading overlay

use tracing::info;

/// Opens the loading overlay shown over the whole window
pub trait Loader: Send {
    /// Show an overlay with the given message and return a handle that closes it
    fn open(&self, message: &str) -> Box<dyn LoaderHandle>;
}

/// An open loading overlay
pub trait LoaderHandle: Send {
    /// Close the overlay
    fn close(self: Box<Self>);
}

/// Loader for the headless host: overlays are log lines
#[derive(Debug, Default, Clone, Copy)]
pub struct LogLoader;

struct LogLoaderHandle {
    message: String,
}

impl Loader for LogLoader {
    fn open(&self, message: &str) -> Box<dyn LoaderHandle> {
        info!("Loading overlay shown: {}", message);
        Box::new(LogLoaderHandle {
            message: message.to_string(),
        })
    }
}

impl LoaderHandle for LogLoaderHandle {
    fn close(self: Box<Self>) {
        info!("Loading overlay closed: {}", self.message);
    }
}
