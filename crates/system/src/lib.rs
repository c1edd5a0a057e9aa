pub mod format;

pub use format::format_bytes;

use ifchart_core::{StatItem, WireMessage};
use std::collections::HashSet;
use std::time::Duration;
use sysinfo::Networks;
use tokio::sync::mpsc;
use tokio::time;

const LOOPBACK: &[&str] = &["lo", "lo0"];

/// Which interfaces a sampler reports.
#[derive(Debug, Clone, Default)]
pub struct InterfaceFilter {
    pub include_loopback: bool,
    pub ignore: HashSet<String>,
}

impl InterfaceFilter {
    pub fn new(include_loopback: bool, ignore: impl IntoIterator<Item = String>) -> Self {
        Self {
            include_loopback,
            ignore: ignore.into_iter().collect(),
        }
    }

    pub fn accepts(&self, name: &str) -> bool {
        if !self.include_loopback && LOOPBACK.contains(&name) {
            return false;
        }
        !self.ignore.contains(name)
    }
}

/// Spawn a background Tokio task that polls per-interface counters every
/// `interval_ms` milliseconds and forwards one [`WireMessage`] per tick
/// through the returned channel.
///
/// The task stops automatically when the receiver is dropped.
pub fn spawn_sampler(interval_ms: u64, filter: InterfaceFilter) -> mpsc::Receiver<WireMessage> {
    let (tx, rx) = mpsc::channel(4);
    let interval = Duration::from_millis(interval_ms);

    tokio::spawn(async move {
        let mut networks = Networks::new_with_refreshed_list();
        let mut ticker   = time::interval(interval);
        ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
        ticker.tick().await; // first tick fires immediately

        tracing::info!(interfaces = networks.iter().count(), "sampler started");

        loop {
            ticker.tick().await;
            networks.refresh(true); // true = forget interfaces that went away

            // `received()` / `transmitted()` are deltas since the last refresh.
            let message = build_message(
                networks
                    .iter()
                    .map(|(name, data)| (name.as_str(), data.received(), data.transmitted())),
                &filter,
            );

            if tx.send(message).await.is_err() {
                tracing::debug!("sampler receiver dropped; stopping");
                break;
            }
        }
    });

    rx
}

/// Turn raw `(name, rx, tx)` counters into a wire message, ordered by name.
pub fn build_message<'a>(
    counters: impl IntoIterator<Item = (&'a str, u64, u64)>,
    filter: &InterfaceFilter,
) -> WireMessage {
    let mut rows: Vec<_> = counters
        .into_iter()
        .filter(|(name, _, _)| filter.accepts(name))
        .collect();
    rows.sort_unstable_by(|a, b| a.0.cmp(b.0));
    rows.dedup_by(|a, b| a.0 == b.0);

    WireMessage::from_pairs(
        rows.into_iter()
            .map(|(name, rx, tx)| (name, Some(StatItem { rx, tx }))),
    )
}
