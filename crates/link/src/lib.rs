pub mod client;
pub mod events;
pub mod protocol;
pub mod server;

pub use client::{fetch_info, StreamListener};
pub use events::{encode_payload, parse_line, LineBuffer, StreamLine};
pub use protocol::{EVENTS_PATH, INFO_PATH};
pub use server::Publisher;
