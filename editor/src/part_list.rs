//! The main window: every part of the vessel with break-symmetry and delete
//! buttons, plus the symmetry editor it opens.

use std::sync::Arc;

use partwizard_core::highlight::{Color, HighlightRegistry, HighlightTracker};
use partwizard_core::symmetry::{delete, has_breakable_symmetry, is_deletable};
use partwizard_core::vessel::{PartCategory, PartId, Vessel};

use crate::error::EditorResult;
use crate::settings::{SettingsStore, WindowRect};
use crate::strings;
use crate::symmetry_editor::{SymmetryEditorFrame, SymmetryEditorInput, SymmetryEditorWindow};
use crate::window::{FrameContext, Screen, WindowContent, WindowState, run_frame};

pub const SETTINGS_KEY: &str = "PART_WIZARD_WINDOW";

const DEFAULT_RECT: WindowRect = WindowRect::new(280.0, 160.0, 250.0, 400.0);
const MINIMUM_RECT: WindowRect = WindowRect::new(0.0, 0.0, 250.0, 400.0);

/// Which parts the list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    All,
    /// Parts without an editor category.
    Hidden,
}

impl ViewMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::All => strings::VIEW_ALL,
            Self::Hidden => strings::VIEW_HIDDEN,
        }
    }
}

/// The control of a part row under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTarget {
    Label,
    BreakSymmetry,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowHover {
    pub part: PartId,
    pub target: RowTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowButton {
    BreakSymmetry,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowClick {
    pub part: PartId,
    pub button: RowButton,
}

#[derive(Debug, Clone, Default)]
pub struct PartListInput {
    pub mouse_over_window: bool,
    /// View selected in the toggle set this frame.
    pub view: Option<ViewMode>,
    pub hovered: Option<RowHover>,
    pub clicked: Option<RowClick>,
    /// The title bar close button was pressed.
    pub close: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartRow {
    pub part: PartId,
    pub title: String,
    pub name: String,
    pub break_enabled: bool,
    pub break_tooltip: Option<String>,
    pub delete_enabled: bool,
    pub delete_tooltip: Option<String>,
}

impl PartRow {
    fn tooltip(&self, target: RowTarget) -> Option<&str> {
        match target {
            RowTarget::Label => Some(&self.name),
            RowTarget::BreakSymmetry => self.break_tooltip.as_deref(),
            RowTarget::Delete => self.delete_tooltip.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartListFrame {
    pub view: ViewMode,
    /// Rows up to and including a deleted part.
    pub rows: Vec<PartRow>,
    pub status: String,
    pub deleted: Option<PartId>,
}

/// Both windows' output for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowFrames {
    pub part_list: WindowContent<PartListFrame>,
    pub symmetry_editor: WindowContent<SymmetryEditorFrame>,
}

pub struct PartListWindow {
    window: WindowState,
    highlight: HighlightTracker,
    view: ViewMode,
    symmetry_editor: SymmetryEditorWindow,
}

impl PartListWindow {
    pub fn new(registry: Arc<HighlightRegistry>, version: &str) -> Self {
        Self {
            window: WindowState::new(
                strings::window_title(strings::ADDON_NAME, version),
                SETTINGS_KEY,
                DEFAULT_RECT,
                MINIMUM_RECT,
            ),
            highlight: HighlightTracker::new(registry.clone()),
            view: ViewMode::default(),
            symmetry_editor: SymmetryEditorWindow::new(registry),
        }
    }

    pub fn window(&self) -> &WindowState {
        &self.window
    }

    pub fn is_visible(&self) -> bool {
        self.window.is_visible()
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn symmetry_editor(&self) -> &SymmetryEditorWindow {
        &self.symmetry_editor
    }

    pub fn show(&mut self, settings: &SettingsStore, screen: Screen) -> EditorResult {
        self.window.show(settings, screen)
    }

    /// Hides this window and the symmetry editor.
    pub fn hide(&mut self, vessel: &mut Vessel, settings: &mut SettingsStore) -> EditorResult {
        if self.symmetry_editor.is_visible() {
            self.symmetry_editor.hide(vessel, settings)?;
        }
        if !self.highlight.is_tracking() {
            self.highlight.release(vessel)?;
        }
        self.window.hide(settings)
    }

    /// The host removed `part`; an edit session on its family is abandoned.
    pub fn on_part_removed(
        &mut self,
        vessel: &mut Vessel,
        settings: &mut SettingsStore,
        part: PartId,
    ) -> EditorResult {
        self.symmetry_editor.on_part_removed(vessel, settings, part)
    }

    /// Renders this window, then the symmetry editor.
    pub fn render(
        &mut self,
        ctx: &mut FrameContext<'_>,
        input: &PartListInput,
        editor_input: &SymmetryEditorInput,
    ) -> EditorResult<WindowFrames> {
        let part_list = self.render_list(ctx, input)?;
        let symmetry_editor = if part_list.is_hidden() {
            WindowContent::Hidden
        } else {
            self.symmetry_editor.render(ctx, editor_input)?
        };
        Ok(WindowFrames {
            part_list,
            symmetry_editor,
        })
    }

    fn render_list(
        &mut self,
        ctx: &mut FrameContext<'_>,
        input: &PartListInput,
    ) -> EditorResult<WindowContent<PartListFrame>> {
        if !self.window.is_visible() {
            return Ok(WindowContent::Hidden);
        }
        if self.window.has_render_error() {
            return Ok(WindowContent::Error(strings::render_error(strings::ADDON_NAME)));
        }
        if input.close {
            self.hide(ctx.vessel, ctx.settings)?;
            return Ok(WindowContent::Hidden);
        }
        self.window.set_mouse_over(input.mouse_over_window);
        if let Some(view) = input.view {
            self.view = view;
        }

        let view = self.view;
        let editor = &mut self.symmetry_editor;
        let frame = run_frame(
            &mut self.window,
            &mut self.highlight,
            ctx,
            |_, tracker, ctx| list_parts(ctx, tracker, editor, view, input),
        )?;
        Ok(WindowContent::Body(frame))
    }
}

fn listed_parts(vessel: &Vessel, view: ViewMode) -> Vec<PartId> {
    let parts = vessel.parts();
    match view {
        ViewMode::All => parts,
        ViewMode::Hidden => parts
            .into_iter()
            .filter(|&p| {
                vessel
                    .get(p)
                    .is_some_and(|part| part.info.category == PartCategory::None)
            })
            .collect(),
    }
}

fn part_row(ctx: &FrameContext<'_>, part: PartId) -> EditorResult<PartRow> {
    let node = ctx.vessel.part(part)?;
    let nothing_selected = ctx.host.selected_part().is_none();

    let breakability = has_breakable_symmetry(ctx.vessel, part)?;
    let break_enabled = nothing_selected && breakability.is_breakable();
    let break_tooltip = if break_enabled {
        Some(strings::BREAK_SYMMETRY_DESCRIPTION.to_owned())
    } else if nothing_selected && node.has_symmetry() {
        Some(breakability.message().to_owned())
    } else {
        None
    };

    let delete_enabled = nothing_selected && is_deletable(ctx.vessel, part)?;
    let delete_tooltip = delete_enabled.then(|| {
        if node.symmetry_counterparts.is_empty() {
            strings::DELETE_PART_SINGULAR_DESCRIPTION.to_owned()
        } else {
            strings::DELETE_PART_PLURAL_DESCRIPTION.to_owned()
        }
    });

    Ok(PartRow {
        part,
        title: node.title().to_owned(),
        name: node.name().to_owned(),
        break_enabled,
        break_tooltip,
        delete_enabled,
        delete_tooltip,
    })
}

fn list_parts(
    ctx: &mut FrameContext<'_>,
    tracker: &mut HighlightTracker,
    editor: &mut SymmetryEditorWindow,
    view: ViewMode,
    input: &PartListInput,
) -> EditorResult<PartListFrame> {
    let palette = ctx.settings.settings().highlight.clone();
    let parts = listed_parts(ctx.vessel, view);
    let mut rows = Vec::with_capacity(parts.len());
    let mut tooltip = None;
    let mut deleted = None;

    for &part in &parts {
        let row = part_row(ctx, part)?;
        let hover = input.hovered.filter(|h| h.part == part);
        let click = input.clicked.filter(|c| c.part == part);

        let mut suppress_hover = false;
        let break_hover =
            row.break_enabled && hover.is_some_and(|h| h.target == RowTarget::BreakSymmetry);
        let delete_hover =
            row.delete_enabled && hover.is_some_and(|h| h.target == RowTarget::Delete);

        match click.map(|c| c.button) {
            Some(RowButton::BreakSymmetry) if row.break_enabled => {
                editor.set_part(ctx.vessel, ctx.settings, Some(part))?;
                if !editor.is_visible() {
                    editor.show(ctx.settings, ctx.screen)?;
                    // The editor may open over this button and start its own
                    // highlighting; ours would then stay stuck on the part.
                    suppress_hover = true;
                }
            }
            Some(RowButton::Delete) if row.delete_enabled => {
                log::info!("Deleting part {}", row.name);
                let mut family = ctx.vessel.part(part)?.symmetry_counterparts.clone();
                family.insert(0, part);
                delete(ctx.vessel, &mut *ctx.host, part)?;
                for removed in family {
                    if !ctx.vessel.contains(removed) {
                        editor.on_part_removed(ctx.vessel, ctx.settings, removed)?;
                    }
                }
                deleted = Some(part);
            }
            _ => {}
        }

        if let Some(h) = hover {
            tooltip = row.tooltip(h.target).map(str::to_owned);
        }
        rows.push(row);

        // The part list changed; the remaining rows are stale.
        if deleted.is_some() {
            break;
        }

        let Some(hover) = hover.filter(|_| !suppress_hover) else {
            continue;
        };
        if break_hover {
            tracker.add_with_symmetry(
                ctx.vessel,
                part,
                Color::from_array(palette.editable_symmetry_root),
                Color::from_array(palette.editable_symmetry_counterparts),
                false,
            )?;
        } else if delete_hover {
            tracker.add_with_symmetry(
                ctx.vessel,
                part,
                Color::from_array(palette.deletable_part),
                Color::from_array(palette.deletable_counterparts),
                true,
            )?;
        } else {
            let color = if ctx.vessel.root() == Some(hover.part) {
                palette.root_part
            } else {
                palette.single_part
            };
            tracker.add_with_symmetry(
                ctx.vessel,
                part,
                Color::from_array(color),
                Color::from_array(palette.counterparts),
                false,
            )?;
        }
    }

    Ok(PartListFrame {
        view,
        rows,
        status: strings::status_line(parts.len(), tooltip.as_deref()),
        deleted,
    })
}
