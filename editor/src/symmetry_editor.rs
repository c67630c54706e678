//! Window for regrouping one symmetry family.
//!
//! The window is opened on a part and starts with one group per member of
//! the part's symmetry family. The user moves parts between neighbouring
//! groups, adds or removes groups, then commits with OK: every non-empty
//! group becomes a symmetry group of its own.

use std::sync::Arc;

use partwizard_core::highlight::{Color, HighlightRegistry, HighlightTracker};
use partwizard_core::part_group::SymmetryGroups;
use partwizard_core::symmetry::is_sibling;
use partwizard_core::vessel::{PartId, Vessel};

use crate::error::EditorResult;
use crate::settings::{SettingsStore, WindowRect};
use crate::strings;
use crate::window::{FrameContext, Screen, WindowContent, WindowState, run_frame};

pub const SETTINGS_KEY: &str = "SYMMETRY_EDITOR_WINDOW";

const DEFAULT_RECT: WindowRect = WindowRect::new(500.0, 200.0, 350.0, 400.0);
const MINIMUM_RECT: WindowRect = WindowRect::new(0.0, 0.0, 250.0, 200.0);

/// A button pressed in the symmetry editor this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymmetryAction {
    RemoveGroup(usize),
    MoveDown { group: usize, part: PartId },
    MoveUp { group: usize, part: PartId },
    AddGroup,
    Ok,
    Cancel,
}

/// The group, and optionally the part within it, under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupHover {
    pub group: usize,
    pub part: Option<PartId>,
}

#[derive(Debug, Clone, Default)]
pub struct SymmetryEditorInput {
    pub mouse_over_window: bool,
    pub hovered: Option<GroupHover>,
    pub action: Option<SymmetryAction>,
    /// The title bar close button was pressed.
    pub close: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupRow {
    pub part: PartId,
    pub title: String,
    pub can_move_down: bool,
    pub can_move_up: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupView {
    pub name: String,
    pub can_remove: bool,
    pub parts: Vec<GroupRow>,
}

/// How the edit session stands after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Editing,
    /// The groups were written back; holds the number of groups created.
    Committed(usize),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymmetryEditorFrame {
    pub title: String,
    pub groups: Vec<GroupView>,
    pub can_add_group: bool,
    pub outcome: EditOutcome,
}

pub struct SymmetryEditorWindow {
    window: WindowState,
    highlight: HighlightTracker,
    part: Option<PartId>,
    groups: Option<SymmetryGroups>,
}

impl SymmetryEditorWindow {
    pub fn new(registry: Arc<HighlightRegistry>) -> Self {
        Self {
            window: WindowState::new(strings::NO_PART, SETTINGS_KEY, DEFAULT_RECT, MINIMUM_RECT),
            highlight: HighlightTracker::new(registry),
            part: None,
            groups: None,
        }
    }

    pub fn window(&self) -> &WindowState {
        &self.window
    }

    pub fn is_visible(&self) -> bool {
        self.window.is_visible()
    }

    /// The part the editor was opened on.
    pub fn part(&self) -> Option<PartId> {
        self.part
    }

    pub fn groups(&self) -> Option<&SymmetryGroups> {
        self.groups.as_ref()
    }

    /// Switches the editor to `part`'s family, discarding any pending
    /// regrouping. `None` hides the window.
    pub fn set_part(
        &mut self,
        vessel: &mut Vessel,
        settings: &mut SettingsStore,
        part: Option<PartId>,
    ) -> EditorResult {
        if !self.highlight.is_tracking() {
            self.highlight.release(vessel)?;
        }
        match part {
            Some(part) => {
                let groups = SymmetryGroups::from_family(vessel, part)?;
                let title = vessel.part(part)?.title().to_owned();
                log::debug!("Editing symmetry of {title} ({} members)", groups.family_size());
                self.window.set_title(strings::symmetry_editor_title(&title));
                self.groups = Some(groups);
                self.part = Some(part);
                Ok(())
            }
            None => self.hide(vessel, settings),
        }
    }

    pub fn show(&mut self, settings: &SettingsStore, screen: Screen) -> EditorResult {
        self.window.show(settings, screen)
    }

    pub fn hide(&mut self, vessel: &mut Vessel, settings: &mut SettingsStore) -> EditorResult {
        self.part = None;
        self.groups = None;
        if !self.highlight.is_tracking() {
            self.highlight.release(vessel)?;
        }
        self.window.hide(settings)
    }

    /// Closes the editor if `removed` belonged to the family being edited.
    pub fn on_part_removed(
        &mut self,
        vessel: &mut Vessel,
        settings: &mut SettingsStore,
        removed: PartId,
    ) -> EditorResult {
        let Some(family) = self.part else {
            return Ok(());
        };
        if !self.window.is_visible() {
            return Ok(());
        }
        let in_groups = self
            .groups
            .as_ref()
            .is_some_and(|g| g.group_of(removed).is_some());
        // An unknown family means the family part itself is gone.
        let sibling = in_groups || is_sibling(vessel, removed, family).unwrap_or(true);
        if sibling {
            log::info!("Part {removed} was removed; closing the symmetry editor");
            self.set_part(vessel, settings, None)?;
        }
        Ok(())
    }

    pub fn render(
        &mut self,
        ctx: &mut FrameContext<'_>,
        input: &SymmetryEditorInput,
    ) -> EditorResult<WindowContent<SymmetryEditorFrame>> {
        if !self.window.is_visible() {
            return Ok(WindowContent::Hidden);
        }
        if self.window.has_render_error() {
            return Ok(WindowContent::Error(strings::render_error(strings::ADDON_NAME)));
        }
        if input.close || self.part.is_none() {
            self.hide(ctx.vessel, ctx.settings)?;
            return Ok(WindowContent::Hidden);
        }
        self.window.set_mouse_over(input.mouse_over_window);

        let edited = &mut self.part;
        let groups = &mut self.groups;
        let frame = run_frame(
            &mut self.window,
            &mut self.highlight,
            ctx,
            |window, tracker, ctx| {
                let (Some(family), Some(current)) = (*edited, groups.as_mut()) else {
                    return Ok(None);
                };
                let palette = ctx.settings.settings().highlight.clone();

                if window.is_mouse_over() {
                    let cyan = Color::from_array(palette.symmetry_editor);
                    tracker.add_with_symmetry(ctx.vessel, family, cyan, cyan, false)?;
                }
                if let Some(hover) = input.hovered
                    && let Some(group) = current.groups().get(hover.group)
                {
                    match hover.part.filter(|&p| group.contains(p)) {
                        Some(hovered_part) => {
                            let blue = Color::from_array(palette.symmetry_group);
                            let green = Color::from_array(palette.symmetry_group_part);
                            tracker.add_group(ctx.vessel, group, blue, false)?;
                            tracker.add_part(ctx.vessel, hovered_part, green, false)?;
                        }
                        None => {
                            let magenta = Color::from_array(palette.symmetry_group_hover);
                            tracker.add_group(ctx.vessel, group, magenta, false)?;
                        }
                    }
                }

                let mut outcome = EditOutcome::Editing;
                match input.action {
                    Some(SymmetryAction::RemoveGroup(index)) => {
                        current.remove_group(index);
                    }
                    Some(SymmetryAction::MoveDown { group, part }) => {
                        current.move_part_down(group, part);
                    }
                    Some(SymmetryAction::MoveUp { group, part }) => {
                        current.move_part_up(group, part);
                    }
                    Some(SymmetryAction::AddGroup) => {
                        current.add_group();
                    }
                    Some(SymmetryAction::Ok) => {
                        let committed = match groups.take() {
                            Some(regrouped) => regrouped.commit(ctx.vessel)?,
                            None => 0,
                        };
                        outcome = EditOutcome::Committed(committed);
                    }
                    Some(SymmetryAction::Cancel) => outcome = EditOutcome::Cancelled,
                    None => {}
                }

                let view = match groups.as_ref() {
                    Some(current) => group_views(current, ctx.vessel),
                    None => Vec::new(),
                };
                let can_add_group = groups.as_ref().is_some_and(|g| g.can_add_group());
                let title = window.title().to_owned();

                if outcome != EditOutcome::Editing {
                    *edited = None;
                    *groups = None;
                    window.hide(ctx.settings)?;
                }

                Ok(Some(SymmetryEditorFrame {
                    title,
                    groups: view,
                    can_add_group,
                    outcome,
                }))
            },
        )?;

        Ok(match frame {
            Some(frame) => WindowContent::Body(frame),
            None => WindowContent::Hidden,
        })
    }
}

fn group_views(groups: &SymmetryGroups, vessel: &Vessel) -> Vec<GroupView> {
    let can_remove = groups.can_remove_group();
    groups
        .groups()
        .iter()
        .enumerate()
        .map(|(index, group)| GroupView {
            name: group.name().to_owned(),
            can_remove,
            parts: group
                .parts()
                .iter()
                .map(|&part| GroupRow {
                    part,
                    title: vessel
                        .get(part)
                        .map(|p| p.title().to_owned())
                        .unwrap_or_default(),
                    can_move_down: groups.can_move_down(index),
                    can_move_up: groups.can_move_up(index),
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use partwizard_core::highlight::{HighlightHost, HighlightKind};
    use partwizard_core::symmetry::create_symmetry;
    use partwizard_core::vessel::{HeadlessHost, PartInfo};

    use super::*;

    const SCREEN: Screen = Screen::new(1920.0, 1080.0);

    struct Fixture {
        vessel: Vessel,
        host: HeadlessHost,
        settings: SettingsStore,
        editor: SymmetryEditorWindow,
        tanks: Vec<PartId>,
    }

    fn fixture() -> Fixture {
        let mut vessel = Vessel::new();
        let pod = vessel.add_root(PartInfo::new("pod")).unwrap();
        let tanks: Vec<PartId> = (0..3)
            .map(|_| {
                vessel
                    .add_child(pod, PartInfo::new("fuelTank").with_title("Fuel Tank"))
                    .unwrap()
            })
            .collect();
        create_symmetry(&mut vessel, tanks[0], &tanks[1..]).unwrap();
        let mut settings = SettingsStore::in_memory();
        let mut editor = SymmetryEditorWindow::new(Arc::new(HighlightRegistry::new()));
        editor.set_part(&mut vessel, &mut settings, Some(tanks[0])).unwrap();
        editor.show(&settings, SCREEN).unwrap();
        Fixture {
            vessel,
            host: HeadlessHost::new(),
            settings,
            editor,
            tanks,
        }
    }

    fn render(f: &mut Fixture, input: SymmetryEditorInput) -> WindowContent<SymmetryEditorFrame> {
        let mut ctx = FrameContext {
            vessel: &mut f.vessel,
            host: &mut f.host,
            settings: &mut f.settings,
            screen: SCREEN,
        };
        f.editor.render(&mut ctx, &input).unwrap()
    }

    #[test]
    fn opens_with_one_group_per_member() {
        let mut f = fixture();
        let content = render(&mut f, SymmetryEditorInput::default());
        let frame = content.body().unwrap();
        assert_eq!(frame.title, "Symmetry Editor: Fuel Tank");
        assert_eq!(frame.groups.len(), 3);
        assert_eq!(frame.groups[1].parts[0].part, f.tanks[1]);
        assert!(!frame.can_add_group);
        assert!(!frame.groups[0].parts[0].can_move_up);
        assert!(frame.groups[0].parts[0].can_move_down);
    }

    #[test]
    fn hovering_a_group_part_highlights_group_and_part() {
        let mut f = fixture();
        f.editor
            .groups
            .as_mut()
            .unwrap()
            .move_part_up(1, f.tanks[1]);
        let tank1 = f.tanks[1];
        render(
            &mut f,
            SymmetryEditorInput {
                mouse_over_window: true,
                hovered: Some(GroupHover {
                    group: 0,
                    part: Some(tank1),
                }),
                ..Default::default()
            },
        );

        let state = |p| f.vessel.highlight_state(p).unwrap();
        assert_eq!(state(f.tanks[0]).color, Color::BLUE);
        assert_eq!(state(f.tanks[1]).color, Color::GREEN);
        assert_eq!(state(f.tanks[2]).color, Color::CYAN);
        assert_eq!(state(f.tanks[1]).kind, HighlightKind::AlwaysOn);
    }

    #[test]
    fn ok_commits_and_hides() {
        let mut f = fixture();
        let moved = f.tanks[2];
        render(
            &mut f,
            SymmetryEditorInput {
                action: Some(SymmetryAction::MoveUp {
                    group: 2,
                    part: moved,
                }),
                ..Default::default()
            },
        );
        let content = render(
            &mut f,
            SymmetryEditorInput {
                action: Some(SymmetryAction::Ok),
                ..Default::default()
            },
        );

        assert_eq!(content.body().unwrap().outcome, EditOutcome::Committed(2));
        assert!(!f.editor.is_visible());
        assert!(f.editor.part().is_none());
        let links = |p| f.vessel.part(p).unwrap().symmetry_counterparts.clone();
        assert!(links(f.tanks[0]).is_empty());
        assert_eq!(links(f.tanks[1]), vec![f.tanks[2]]);
        assert!(f.settings.window_rect(SETTINGS_KEY, MINIMUM_RECT).is_ok());
        assert!(render(&mut f, SymmetryEditorInput::default()).is_hidden());
    }

    #[test]
    fn removal_of_a_family_member_closes() {
        let mut f = fixture();
        let removed = f.tanks[2];
        f.editor
            .on_part_removed(&mut f.vessel, &mut f.settings, removed)
            .unwrap();
        assert!(!f.editor.is_visible());
    }

    #[test]
    fn removal_elsewhere_keeps_editing() {
        let mut f = fixture();
        let root = f.vessel.root().unwrap();
        f.editor
            .on_part_removed(&mut f.vessel, &mut f.settings, root)
            .unwrap();
        assert!(f.editor.is_visible());
    }
}
