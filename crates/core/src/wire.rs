//! JSON shapes exchanged between the publisher and its subscribers.
//!
//! One value per line. These types mirror the payload exactly and carry no
//! invariants; [`crate::snapshot::Snapshot`] is the validated form.

use serde::{Deserialize, Serialize};

/// One stream event: `info[i]` and `stats[i]` describe the same interface.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WireMessage {
    pub info:  Vec<InfoItem>,
    /// `None` when the publisher could not read that interface's counters.
    pub stats: Vec<Option<StatItem>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoItem {
    pub name: String,
}

/// Bytes received / transmitted since the previous tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatItem {
    pub rx: u64,
    pub tx: u64,
}

/// Metadata answered by the `info` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub version: String,
    pub name:    String,
}

impl WireMessage {
    /// Build a message from `(name, stat)` pairs, keeping both lists aligned.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Option<StatItem>)>,
        S: Into<String>,
    {
        let (info, stats) = pairs
            .into_iter()
            .map(|(name, stat)| (InfoItem { name: name.into() }, stat))
            .unzip();
        Self { info, stats }
    }
}
