use crate::reducer;
use crate::snapshot::Snapshot;
use crate::window::WindowStore;
use std::sync::Arc;
use tokio::sync::watch;

/// Sole owner of the current [`WindowStore`].
///
/// Every [`apply`](Self::apply) publishes a fresh immutable store, so readers
/// holding an earlier `Arc` keep a consistent view while the next tick runs.
/// Taking `&mut self` keeps transitions serialized.
#[derive(Debug)]
pub struct WindowFeed {
    tx:    watch::Sender<Arc<WindowStore>>,
    ticks: u64,
}

impl WindowFeed {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Arc::new(WindowStore::default()));
        Self { tx, ticks: 0 }
    }

    /// Run one reducer tick and publish the result.
    pub fn apply(&mut self, snapshot: &Snapshot) -> Arc<WindowStore> {
        let next = Arc::new(reducer::apply(&self.current(), snapshot));
        self.tx.send_replace(Arc::clone(&next));
        self.ticks += 1;
        tracing::debug!(tick = self.ticks, interfaces = next.len(), "window advanced");
        next
    }

    /// Latest published store.
    pub fn current(&self) -> Arc<WindowStore> {
        Arc::clone(&self.tx.borrow())
    }

    /// A reader that is notified on every publication.
    pub fn subscribe(&self) -> watch::Receiver<Arc<WindowStore>> {
        self.tx.subscribe()
    }

    /// Number of snapshots applied so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Default for WindowFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Reading;

    #[tokio::test]
    async fn subscribers_see_each_publication() {
        let mut feed = WindowFeed::new();
        let mut rx = feed.subscribe();

        let snap = Snapshot::new(vec![Reading::new("eth0", 10, 20)]).unwrap();
        feed.apply(&snap);

        rx.changed().await.unwrap();
        let store = rx.borrow_and_update().clone();
        assert_eq!(store.get("eth0").unwrap().rx.newest().value, 10);
        assert_eq!(feed.ticks(), 1);
    }

    #[test]
    fn earlier_view_survives_next_tick() {
        let mut feed = WindowFeed::new();
        let snap = Snapshot::new(vec![Reading::new("eth0", 1, 1)]).unwrap();
        let first = feed.apply(&snap);

        feed.apply(&Snapshot::default());

        assert_eq!(first.len(), 1);
        assert!(feed.current().is_empty());
    }
}
