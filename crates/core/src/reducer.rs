use crate::snapshot::Snapshot;
use crate::window::{InterfaceState, Series, WindowStore};

/// Produce the next store from the current one and one snapshot.
///
/// The result is rebuilt from the snapshot: interfaces it names are advanced
/// (or seeded if unseen), everything else is dropped. Pure and total.
#[must_use]
pub fn apply(store: &WindowStore, snapshot: &Snapshot) -> WindowStore {
    let mut next = WindowStore::with_capacity(snapshot.len());

    for reading in snapshot.readings() {
        let state = match store.get(&reading.name) {
            Some(current) => InterfaceState {
                name: reading.name.clone(),
                rx:   current.rx.advanced(reading.rx),
                tx:   current.tx.advanced(reading.tx),
            },
            None => InterfaceState {
                name: reading.name.clone(),
                rx:   Series::seeded(reading.rx),
                tx:   Series::seeded(reading.tx),
            },
        };
        next.insert(state);
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Reading;
    use crate::window::{offset_at, STEP, WINDOW_SIZE};

    fn snap(readings: &[(&str, u64, u64)]) -> Snapshot {
        Snapshot::new(
            readings
                .iter()
                .map(|&(n, rx, tx)| Reading::new(n, rx, tx))
                .collect(),
        )
        .unwrap()
    }

    fn assert_shape(store: &WindowStore) {
        for iface in store.interfaces() {
            for series in [&iface.rx, &iface.tx] {
                assert_eq!(series.samples().len(), WINDOW_SIZE);
                for (i, s) in series.samples().iter().enumerate() {
                    assert_eq!(s.offset, offset_at(i));
                }
                assert_eq!(series.newest().offset, STEP);
            }
        }
    }

    #[test]
    fn new_interface_is_zero_filled() {
        let store = apply(&WindowStore::default(), &snap(&[("eth0", 100, 50)]));
        let eth0 = store.get("eth0").unwrap();

        let rx: Vec<u64> = eth0.rx.values().collect();
        assert_eq!(&rx[..WINDOW_SIZE - 1], &[0; WINDOW_SIZE - 1]);
        assert_eq!(rx[WINDOW_SIZE - 1], 100);

        let tx: Vec<u64> = eth0.tx.values().collect();
        assert_eq!(&tx[..WINDOW_SIZE - 1], &[0; WINDOW_SIZE - 1]);
        assert_eq!(tx[WINDOW_SIZE - 1], 50);
        assert_shape(&store);
    }

    #[test]
    fn existing_interface_slides_left() {
        let mut store = WindowStore::default();
        for rx in 1..=40 {
            store = apply(&store, &snap(&[("eth0", rx, 0)]));
        }
        let before: Vec<u64> = store.get("eth0").unwrap().rx.values().collect();
        assert_eq!(before[WINDOW_SIZE - 1], 40);

        let after_store = apply(&store, &snap(&[("eth0", 200, 0)]));
        let after: Vec<u64> = after_store.get("eth0").unwrap().rx.values().collect();

        assert_eq!(after.len(), WINDOW_SIZE);
        assert_eq!(&after[..WINDOW_SIZE - 1], &before[1..]);
        assert_eq!(after[WINDOW_SIZE - 1], 200);
        assert_shape(&after_store);
    }

    #[test]
    fn shape_holds_over_many_ticks() {
        let mut store = WindowStore::default();
        for tick in 0..100 {
            store = apply(&store, &snap(&[("eth0", tick, tick * 2), ("lo", 0, 0)]));
            assert_eq!(store.len(), 2);
            assert_shape(&store);
        }
    }

    #[test]
    fn absent_interface_is_dropped() {
        let store = apply(
            &WindowStore::default(),
            &snap(&[("eth0", 1, 1), ("eth1", 2, 2)]),
        );
        let next = apply(&store, &snap(&[("eth0", 3, 3)]));
        assert_eq!(next.names().collect::<Vec<_>>(), ["eth0"]);
        assert!(next.get("eth1").is_none());
    }

    #[test]
    fn empty_snapshot_empties_store() {
        let store = apply(&WindowStore::default(), &snap(&[("eth0", 1, 1)]));
        let next = apply(&store, &Snapshot::default());
        assert!(next.is_empty());
    }

    #[test]
    fn returning_interface_starts_fresh() {
        let mut store = apply(&WindowStore::default(), &snap(&[("eth0", 9, 9)]));
        store = apply(&store, &snap(&[]));
        store = apply(&store, &snap(&[("eth0", 4, 4)]));
        assert_eq!(store.get("eth0").unwrap().rx, Series::seeded(4));
    }

    #[test]
    fn result_follows_snapshot_order() {
        let store = apply(&WindowStore::default(), &snap(&[("b", 0, 0), ("a", 0, 0)]));
        let next = apply(&store, &snap(&[("c", 0, 0), ("a", 0, 0), ("b", 0, 0)]));
        assert_eq!(next.names().collect::<Vec<_>>(), ["c", "a", "b"]);
    }

    #[test]
    fn zero_reading_is_kept() {
        let store = apply(&WindowStore::default(), &snap(&[("eth0", 0, 0)]));
        assert_eq!(store.get("eth0").unwrap().rx.peak(), 0);
    }
}
