pub mod error;
pub mod event;
pub mod feed;
pub mod reducer;
pub mod snapshot;
pub mod state;
pub mod window;
pub mod wire;

pub use error::{IfchartError, Result};
pub use event::Message;
pub use feed::WindowFeed;
pub use snapshot::{Reading, Snapshot, SnapshotError};
pub use state::{ConnectionStatus, ViewState};
pub use window::{InterfaceState, Sample, Series, WindowStore, STEP, WINDOW_SIZE};
pub use wire::{InfoItem, ServerInfo, StatItem, WireMessage};
