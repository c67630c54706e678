//! Per-frame highlight transactions.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use super::host::HighlightHost;
use super::registry::{HighlightRegistry, Originals, TrackerId};
use super::state::{Color, HighlightKind};
use crate::invariant::invariant;
use crate::part_group::PartGroup;
use crate::vessel::PartId;

/// Usage errors of a [`HighlightTracker`].
///
/// These signal a caller bug in frame sequencing, not a runtime condition.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightError {
    #[error(
        "highlight tracking may not be started more than once; call end_tracking or cancel_tracking"
    )]
    AlreadyTracking,
    #[error("highlight tracking must be started before {0}")]
    NotTracking(&'static str),
    #[error("{0} may not be called while tracking; call end_tracking or cancel_tracking first")]
    StillTracking(&'static str),
    #[error("unknown part {0}")]
    UnknownPart(PartId),
}

/// Result type for highlight tracking.
pub type HighlightResult<T = ()> = Result<T, HighlightError>;

/// How a tracker returns parts to their appearance before highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestoreStrategy {
    /// Write back the captured original state.
    #[default]
    Snapshot,
    /// Ask the host to reset the part to its default highlight, falling back
    /// to the captured state when the host has none.
    HostDefault,
}

/// Transactional highlighter for one window.
///
/// Each frame the owner calls [`begin_tracking`](Self::begin_tracking), adds
/// the parts that should be highlighted, then commits with
/// [`end_tracking`](Self::end_tracking) or discards with
/// [`cancel_tracking`](Self::cancel_tracking). Parts highlighted last frame
/// but not re-added are restored on commit; a cancel restores everything.
///
/// A part's original appearance is captured exactly once, by whichever
/// tracker of the shared [`HighlightRegistry`] touches it first, and then
/// moves between trackers as they claim the part.
pub struct HighlightTracker {
    id: TrackerId,
    registry: Arc<HighlightRegistry>,
    strategy: RestoreStrategy,
    tracking: bool,
}

impl HighlightTracker {
    pub fn new(registry: Arc<HighlightRegistry>) -> Self {
        Self::with_strategy(registry, RestoreStrategy::default())
    }

    pub fn with_strategy(registry: Arc<HighlightRegistry>, strategy: RestoreStrategy) -> Self {
        let id = registry.register();
        Self {
            id,
            registry,
            strategy,
            tracking: false,
        }
    }

    pub fn id(&self) -> TrackerId {
        self.id
    }

    pub fn strategy(&self) -> RestoreStrategy {
        self.strategy
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn registry(&self) -> &Arc<HighlightRegistry> {
        &self.registry
    }

    /// Starts a frame.
    pub fn begin_tracking(&mut self) -> HighlightResult {
        if self.tracking {
            return Err(HighlightError::AlreadyTracking);
        }
        self.tracking = true;
        Ok(())
    }

    /// Highlights `part` with `color` for this frame.
    ///
    /// The color and recursion flag are applied to the host immediately;
    /// the highlight is switched on when the frame is committed.
    pub fn add_part<H: HighlightHost + ?Sized>(
        &mut self,
        host: &mut H,
        part: PartId,
        color: Color,
        recursive: bool,
    ) -> HighlightResult {
        if !self.tracking {
            return Err(HighlightError::NotTracking("adding parts to track"));
        }
        let Some(observed) = host.highlight_state(part) else {
            return Err(HighlightError::UnknownPart(part));
        };

        let id = self.id;
        self.registry.with_state(|state| {
            let Some(buffer) = state.buffers.get_mut(&id) else {
                invariant!(false, "{id} is not registered");
                return;
            };
            if buffer.current.contains_key(&part) {
                return;
            }
            if let Some(original) = buffer.previous.remove(&part) {
                buffer.current.insert(part, original);
                return;
            }
            let original = state.take_foreign(id, part).unwrap_or(observed);
            if let Some(buffer) = state.buffers.get_mut(&id) {
                buffer.current.insert(part, original);
            }
            invariant!(
                state
                    .buffers
                    .get(&id)
                    .is_some_and(|b| b.current.contains_key(&part)),
                "part {part} missing from {id} after add"
            );
        });

        host.set_highlight_recursive(part, recursive);
        host.set_highlight_color(part, color);
        Ok(())
    }

    /// Highlights `part` with `color` and each of its symmetry counterparts
    /// with `symmetry_color`.
    pub fn add_with_symmetry<H: HighlightHost + ?Sized>(
        &mut self,
        host: &mut H,
        part: PartId,
        color: Color,
        symmetry_color: Color,
        recursive: bool,
    ) -> HighlightResult {
        if !self.tracking {
            return Err(HighlightError::NotTracking("adding parts to track"));
        }
        self.add_part(host, part, color, recursive)?;
        for counterpart in host.symmetry_counterparts(part) {
            self.add_part(host, counterpart, symmetry_color, recursive)?;
        }
        Ok(())
    }

    /// Highlights every part of `group` with `color`.
    pub fn add_group<H: HighlightHost + ?Sized>(
        &mut self,
        host: &mut H,
        group: &PartGroup,
        color: Color,
        recursive: bool,
    ) -> HighlightResult {
        if !self.tracking {
            return Err(HighlightError::NotTracking("adding part groups to track"));
        }
        for &part in group.parts() {
            self.add_part(host, part, color, recursive)?;
        }
        Ok(())
    }

    /// Commits the frame.
    ///
    /// Switches on every part added this frame, restores the parts that were
    /// highlighted last frame but not this one, and keeps this frame's set as
    /// the baseline for the next.
    pub fn end_tracking<H: HighlightHost + ?Sized>(&mut self, host: &mut H) -> HighlightResult {
        if !self.tracking {
            return Err(HighlightError::NotTracking("tracking can be completed"));
        }
        let (current, stale) = self.with_buffer(|buffer| {
            let stale = std::mem::take(&mut buffer.previous);
            buffer.swap();
            (buffer.previous.keys().copied().collect::<Vec<_>>(), stale)
        });

        for part in current {
            host.set_highlight_kind(part, HighlightKind::AlwaysOn);
            host.set_highlight_active(part, true);
        }
        self.restore(host, stale);

        self.tracking = false;
        Ok(())
    }

    /// Discards the frame and restores every part this tracker holds.
    ///
    /// Nothing stays highlighted and the next frame starts without a baseline.
    pub fn cancel_tracking<H: HighlightHost + ?Sized>(&mut self, host: &mut H) -> HighlightResult {
        if !self.tracking {
            return Err(HighlightError::NotTracking("tracking can be cancelled"));
        }
        self.tracking = false;
        self.restore_all(host);
        Ok(())
    }

    /// Restores the parts still highlighted from the last committed frame.
    ///
    /// Used between frames, e.g. when the owning window closes or switches
    /// to another part.
    pub fn release<H: HighlightHost + ?Sized>(&mut self, host: &mut H) -> HighlightResult {
        if self.tracking {
            return Err(HighlightError::StillTracking("release"));
        }
        self.restore_all(host);
        Ok(())
    }

    fn restore_all<H: HighlightHost + ?Sized>(&mut self, host: &mut H) {
        let (current, mut previous) = self.with_buffer(|buffer| {
            (
                std::mem::take(&mut buffer.current),
                std::mem::take(&mut buffer.previous),
            )
        });
        previous.retain(|part, _| !current.contains_key(part));
        self.restore(host, current);
        self.restore(host, previous);
    }

    fn restore<H: HighlightHost + ?Sized>(&self, host: &mut H, parts: Originals) {
        for (part, original) in parts {
            let reset = self.strategy == RestoreStrategy::HostDefault && host.reset_highlight(part);
            if !reset {
                host.apply_highlight_state(part, original);
            }
        }
    }

    fn with_buffer<R: Default>(&self, f: impl FnOnce(&mut super::registry::DoubleBuffer) -> R) -> R {
        let id = self.id;
        self.registry.with_state(|state| match state.buffers.get_mut(&id) {
            Some(buffer) => f(buffer),
            None => {
                invariant!(false, "{id} is not registered");
                R::default()
            }
        })
    }

    /// Parts added so far this frame, or committed last frame when idle.
    pub fn tracked_parts(&self) -> Vec<PartId> {
        let id = self.id;
        let tracking = self.tracking;
        self.registry.with_state(|state| {
            state
                .buffers
                .get(&id)
                .map(|b| {
                    let set = if tracking { &b.current } else { &b.previous };
                    set.keys().copied().collect()
                })
                .unwrap_or_default()
        })
    }
}

impl Drop for HighlightTracker {
    fn drop(&mut self) {
        self.registry.unregister(self.id);
    }
}

impl fmt::Debug for HighlightTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HighlightTracker")
            .field("id", &self.id)
            .field("strategy", &self.strategy)
            .field("tracking", &self.tracking)
            .finish()
    }
}
