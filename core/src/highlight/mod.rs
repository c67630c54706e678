//! Part highlighting with transactional restore.
//!
//! Windows highlight parts every frame while the pointer is over them. The
//! highlight fields belong to the host and are shared by every window, so
//! each window drives a [`HighlightTracker`] that remembers the appearance a
//! part had before any window touched it and puts it back once no window
//! wants it highlighted any more.
//!
//! - [`HighlightTracker`]: begin / add / end-or-cancel per frame
//! - [`HighlightRegistry`]: the index shared by all trackers of a session
//! - [`HighlightHost`]: host access to a part's highlight fields
//! - [`HighlightState`] / [`Color`] / [`HighlightKind`]: the snapshot types
//!
//! # Frame protocol
//!
//! ```ignore
//! tracker.begin_tracking()?;
//! tracker.add_with_symmetry(&mut vessel, part, Color::GREEN, Color::YELLOW, false)?;
//! if rendered_ok && pointer_over_window {
//!     tracker.end_tracking(&mut vessel)?;
//! } else {
//!     tracker.cancel_tracking(&mut vessel)?;
//! }
//! ```

mod host;
mod registry;
mod state;
mod tracker;

pub use host::HighlightHost;
pub use registry::{HighlightRegistry, TrackerId};
pub use state::{Color, HighlightKind, HighlightState};
pub use tracker::{HighlightError, HighlightResult, HighlightTracker, RestoreStrategy};
