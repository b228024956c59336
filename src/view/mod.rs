//! View layer module
//!
//! Holds the shared view model read by the renderer and the collaborator traits the
//! navbar controller drives:
//!
//! - `ViewModel`: daemon state, open safes, and wallet status snapshots
//! - `Loader` / `LoaderHandle`: the loading overlay widget
//! - `Navigator`: current route and redirection
//! - `HostBridge`: the native host process ("request quit")
//!
//! Every trait has a small implementation here for the headless host; the real
//! desktop shell supplies its own.

pub mod host;
pub mod loader;
pub mod navigation;
pub mod view_model;

pub use host::{ChannelHost, HostBridge};
pub use loader::{Loader, LoaderHandle, LogLoader};
pub use navigation::{MemoryNavigator, Navigator, is_within_route};
pub use view_model::{SharedViewModel, ViewModel};
