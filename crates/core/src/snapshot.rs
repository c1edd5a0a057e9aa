use crate::wire::{StatItem, WireMessage};
use std::collections::HashSet;
use thiserror::Error;

/// A wire message that breaks the positional-alignment contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("{names} interface names but {stats} stats entries")]
    LengthMismatch { names: usize, stats: usize },

    #[error("interface name at position {index} is empty")]
    EmptyName { index: usize },

    #[error("interface '{0}' appears more than once")]
    DuplicateName(String),
}

/// Current throughput reading for one interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    pub name: String,
    pub rx:   u64,
    pub tx:   u64,
}

impl Reading {
    pub fn new(name: impl Into<String>, rx: u64, tx: u64) -> Self {
        Self { name: name.into(), rx, tx }
    }
}

/// One validated inbound event, in the order the publisher listed interfaces.
///
/// Names are non-empty and unique. Only [`Snapshot::try_from`] and
/// [`Snapshot::new`] build one, so the reducer never sees misaligned input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    readings: Vec<Reading>,
}

impl Snapshot {
    /// Validate a list of readings directly (used by tests and local sources).
    pub fn new(readings: Vec<Reading>) -> Result<Self, SnapshotError> {
        let mut seen = HashSet::with_capacity(readings.len());
        for (index, reading) in readings.iter().enumerate() {
            if reading.name.is_empty() {
                return Err(SnapshotError::EmptyName { index });
            }
            if !seen.insert(reading.name.as_str()) {
                return Err(SnapshotError::DuplicateName(reading.name.clone()));
            }
        }
        Ok(Self { readings })
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

impl TryFrom<WireMessage> for Snapshot {
    type Error = SnapshotError;

    fn try_from(msg: WireMessage) -> Result<Self, Self::Error> {
        if msg.info.len() != msg.stats.len() {
            return Err(SnapshotError::LengthMismatch {
                names: msg.info.len(),
                stats: msg.stats.len(),
            });
        }

        let readings = msg
            .info
            .into_iter()
            .zip(msg.stats)
            .map(|(item, stat)| {
                // An unreadable counter still keeps the interface on the chart.
                let StatItem { rx, tx } = stat.unwrap_or_default();
                Reading { name: item.name, rx, tx }
            })
            .collect();

        Self::new(readings)
    }
}
