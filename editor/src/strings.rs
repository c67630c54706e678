//! User-facing text.

pub const ADDON_NAME: &str = "PartWizard";

pub const VIEW_ALL: &str = "All";
pub const VIEW_HIDDEN: &str = "Hidden";

pub const BREAK_SYMMETRY_BUTTON: &str = "B";
pub const BREAK_SYMMETRY_DESCRIPTION: &str = "Edit symmetry";
pub const DELETE_PART_BUTTON: &str = "X";
pub const DELETE_PART_SINGULAR_DESCRIPTION: &str = "Delete part";
pub const DELETE_PART_PLURAL_DESCRIPTION: &str = "Delete part and its counterparts";

pub const NO_PART: &str = "NO PART";
pub const GROUP_REMOVE: &str = "Remove";
pub const GROUP_REMOVE_DESCRIPTION: &str = "Remove group";
pub const MOVE_DOWN: &str = "\\/";
pub const MOVE_DOWN_DESCRIPTION: &str = "Move Down";
pub const MOVE_UP: &str = "/\\";
pub const MOVE_UP_DESCRIPTION: &str = "Move Up";
pub const ADD_GROUP: &str = "Add Group";
pub const OK: &str = "OK";
pub const CANCEL: &str = "Cancel";

pub fn window_title(name: &str, version: &str) -> String {
    format!("{name} ({version})")
}

pub fn symmetry_editor_title(part_title: &str) -> String {
    format!("Symmetry Editor: {part_title}")
}

/// Status line under the part list, with the hovered control's tooltip.
pub fn status_line(part_count: usize, tooltip: Option<&str>) -> String {
    let noun = if part_count == 1 { "part" } else { "parts" };
    match tooltip {
        Some(tooltip) => format!("{part_count} {noun}: {tooltip}"),
        None => format!("{part_count} {noun}"),
    }
}

pub fn render_error(name: &str) -> String {
    format!(
        "{name} has encountered an unrecoverable error and cannot continue. \
         Close this window and check the log for details."
    )
}
