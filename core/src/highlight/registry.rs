//! Shared index of every tracker's highlighted parts.
//!
//! Several windows may highlight the same part in one frame. Whichever
//! tracker touches a part first captures its original appearance; later
//! trackers must take over that entry instead of capturing the already
//! highlighted state. The registry makes this possible by holding every
//! tracker's double buffer behind one lock.

use std::collections::BTreeMap;
use std::fmt;

use parking_lot::Mutex;

use super::state::HighlightState;
use crate::vessel::PartId;

/// Original highlight state per tracked part.
pub(crate) type Originals = BTreeMap<PartId, HighlightState>;

/// Identifies a tracker within its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrackerId(pub u32);

impl fmt::Display for TrackerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tracker {}", self.0)
    }
}

/// A tracker's two part sets, swapped at the end of every frame.
#[derive(Debug, Default)]
pub(crate) struct DoubleBuffer {
    /// Parts highlighted this frame.
    pub current: Originals,
    /// Parts highlighted last frame and not yet claimed this frame.
    pub previous: Originals,
}

impl DoubleBuffer {
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.previous);
    }
}

#[derive(Debug, Default)]
pub(crate) struct RegistryState {
    next_id: u32,
    pub buffers: BTreeMap<TrackerId, DoubleBuffer>,
    /// Entries left behind by trackers dropped while still holding parts.
    pub orphaned: Originals,
}

impl RegistryState {
    /// Moves `part`'s original state out of any tracker other than `except`,
    /// or out of the orphaned entries.
    pub fn take_foreign(&mut self, except: TrackerId, part: PartId) -> Option<HighlightState> {
        for (id, buffer) in self.buffers.iter_mut() {
            if *id == except {
                continue;
            }
            if let Some(state) = buffer.current.remove(&part) {
                return Some(state);
            }
            if let Some(state) = buffer.previous.remove(&part) {
                return Some(state);
            }
        }
        self.orphaned.remove(&part)
    }
}

/// Registry shared by all highlight trackers of one editor session.
///
/// Create one per session, wrap it in an [`Arc`](std::sync::Arc) and hand
/// it to every [`HighlightTracker`](super::HighlightTracker).
#[derive(Default)]
pub struct HighlightRegistry {
    state: Mutex<RegistryState>,
}

impl HighlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn register(&self) -> TrackerId {
        let mut state = self.state.lock();
        let id = TrackerId(state.next_id);
        state.next_id += 1;
        state.buffers.insert(id, DoubleBuffer::default());
        id
    }

    /// Removes a tracker. Parts it still holds keep their original state in
    /// the orphaned entries so no baseline is lost.
    pub(crate) fn unregister(&self, id: TrackerId) {
        let mut state = self.state.lock();
        let Some(buffer) = state.buffers.remove(&id) else {
            return;
        };
        let left = buffer.current.len() + buffer.previous.len();
        if left > 0 {
            log::warn!("{id} dropped while holding {left} highlighted part(s)");
        }
        for (part, original) in buffer.current.into_iter().chain(buffer.previous) {
            state.orphaned.entry(part).or_insert(original);
        }
    }

    /// Runs `f` with the registry locked.
    pub(crate) fn with_state<R>(&self, f: impl FnOnce(&mut RegistryState) -> R) -> R {
        f(&mut *self.state.lock())
    }

    /// Number of live trackers.
    pub fn tracker_count(&self) -> usize {
        self.state.lock().buffers.len()
    }

    /// Returns `true` if any tracker, or an orphaned entry, holds `part`.
    pub fn is_tracked(&self, part: PartId) -> bool {
        let state = self.state.lock();
        state.orphaned.contains_key(&part)
            || state
                .buffers
                .values()
                .any(|b| b.current.contains_key(&part) || b.previous.contains_key(&part))
    }

    /// The captured original state of `part`, wherever it is held.
    pub fn original_state(&self, part: PartId) -> Option<HighlightState> {
        let state = self.state.lock();
        state
            .buffers
            .values()
            .find_map(|b| b.current.get(&part).or_else(|| b.previous.get(&part)))
            .or_else(|| state.orphaned.get(&part))
            .copied()
    }

    /// Parts left behind by dropped trackers.
    pub fn orphaned_parts(&self) -> Vec<PartId> {
        self.state.lock().orphaned.keys().copied().collect()
    }

    /// Restores and forgets every orphaned part.
    pub fn restore_orphans<H: super::HighlightHost + ?Sized>(&self, host: &mut H) -> usize {
        let orphaned = std::mem::take(&mut self.state.lock().orphaned);
        let count = orphaned.len();
        for (part, original) in orphaned {
            host.apply_highlight_state(part, original);
        }
        count
    }
}

impl fmt::Debug for HighlightRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("HighlightRegistry")
            .field("trackers", &state.buffers.len())
            .field("orphaned", &state.orphaned.len())
            .finish()
    }
}
