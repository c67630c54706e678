//! The highlight fields a tracker reads and writes.

use super::state::{Color, HighlightKind, HighlightState};
use crate::vessel::PartId;

/// Host access to per-part highlight state.
///
/// Setters on a part the host no longer knows are ignored: a tracker may
/// still hold entries for parts destroyed since they were highlighted.
pub trait HighlightHost {
    /// Current visual state, or `None` for an unknown part.
    fn highlight_state(&self, part: PartId) -> Option<HighlightState>;

    /// The part's symmetry counterparts, used to highlight whole families.
    fn symmetry_counterparts(&self, part: PartId) -> Vec<PartId>;

    fn set_highlight_color(&mut self, part: PartId, color: Color);

    fn set_highlight_kind(&mut self, part: PartId, kind: HighlightKind);

    fn set_highlight_recursive(&mut self, part: PartId, recursive: bool);

    fn set_highlight_active(&mut self, part: PartId, active: bool);

    /// Returns the part to the host's own default highlight.
    ///
    /// Returns `false` when the host has no default, in which case the
    /// tracker restores its captured snapshot instead.
    fn reset_highlight(&mut self, _part: PartId) -> bool {
        false
    }

    /// Writes a snapshot back: color, kind, recursion, then active flag.
    fn apply_highlight_state(&mut self, part: PartId, state: HighlightState) {
        self.set_highlight_color(part, state.color);
        self.set_highlight_kind(part, state.kind);
        self.set_highlight_recursive(part, state.recursive);
        self.set_highlight_active(part, state.active);
    }
}
