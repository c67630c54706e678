//! # PartWizard Editor
//!
//! The add-on's two windows, rendered headlessly: each frame takes pointer
//! and button state and returns what the window would draw.
//!
//! - [`part_list`]: every part with break-symmetry and delete buttons
//! - [`symmetry_editor`]: regroups a symmetry family and commits the result
//! - [`app`]: the toolbar-driven add-on object tying both to the settings file

pub mod app;
pub mod error;
pub mod logging;
pub mod part_list;
pub mod settings;
pub mod strings;
pub mod symmetry_editor;
pub mod window;

pub use app::{FrameInput, PartWizard};
pub use error::{EditorError, EditorResult};
pub use settings::{Settings, SettingsStore};
pub use window::{Screen, WindowContent};

/// Add-on version shown in the part list title.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
