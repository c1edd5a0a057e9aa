//! Rolling-window storage: fixed-length rx/tx series per interface.

use std::collections::HashMap;

/// Number of samples retained per series.
pub const WINDOW_SIZE: usize = 30;

/// Distance between neighbouring offsets on the synthetic time axis.
pub const STEP: u32 = 2;

/// Offset of the sample stored at `index`; the newest slot is always `STEP`.
#[must_use]
pub const fn offset_at(index: usize) -> u32 {
    (WINDOW_SIZE - index) as u32 * STEP
}

/// One point on a chart: synthetic x-axis offset and the measured value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub offset: u32,
    pub value:  u64,
}

impl Sample {
    const fn at(index: usize, value: u64) -> Self {
        Self { offset: offset_at(index), value }
    }
}

/// Exactly [`WINDOW_SIZE`] samples, oldest first.
///
/// The array type makes any other length unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series([Sample; WINDOW_SIZE]);

impl Series {
    /// Flat-zero history with `value` in the newest slot.
    #[must_use]
    pub fn seeded(value: u64) -> Self {
        Self(std::array::from_fn(|i| {
            Sample::at(i, if i == WINDOW_SIZE - 1 { value } else { 0 })
        }))
    }

    /// Drop the oldest value, shift the rest down one slot and append `value`.
    /// Offsets are recomputed for every slot.
    #[must_use]
    pub fn advanced(&self, value: u64) -> Self {
        Self(std::array::from_fn(|i| {
            if i == WINDOW_SIZE - 1 {
                Sample::at(i, value)
            } else {
                Sample::at(i, self.0[i + 1].value)
            }
        }))
    }

    pub fn samples(&self) -> &[Sample] {
        &self.0
    }

    pub fn values(&self) -> impl Iterator<Item = u64> + '_ {
        self.0.iter().map(|s| s.value)
    }

    /// Most recent sample.
    pub fn newest(&self) -> Sample {
        self.0[WINDOW_SIZE - 1]
    }

    /// Largest value in the window (handy for scaling a chart).
    pub fn peak(&self) -> u64 {
        self.values().max().unwrap_or(0)
    }
}

/// Receive and transmit history for one interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceState {
    pub name: String,
    pub rx:   Series,
    pub tx:   Series,
}

/// Interface name → state, in the order of the snapshot that produced it.
///
/// Only the reducer builds a non-empty store; consumers get read access.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowStore {
    interfaces: Vec<InterfaceState>,
    index:      HashMap<String, usize>,
}

impl WindowStore {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            interfaces: Vec::with_capacity(capacity),
            index:      HashMap::with_capacity(capacity),
        }
    }

    /// Append an interface. Callers guarantee `state.name` is not present yet.
    pub(crate) fn insert(&mut self, state: InterfaceState) {
        self.index.insert(state.name.clone(), self.interfaces.len());
        self.interfaces.push(state);
    }

    pub fn get(&self, name: &str) -> Option<&InterfaceState> {
        self.index.get(name).map(|&i| &self.interfaces[i])
    }

    /// All interfaces in insertion order.
    pub fn interfaces(&self) -> &[InterfaceState] {
        &self.interfaces
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.interfaces.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }
}
