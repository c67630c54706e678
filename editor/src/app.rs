//! The add-on object the host editor drives: toolbar toggle, frame
//! rendering and settings persistence.

use std::sync::Arc;

use partwizard_core::highlight::HighlightRegistry;
use partwizard_core::vessel::{EditorHost, PartId, Vessel};

use crate::error::EditorResult;
use crate::part_list::{PartListInput, PartListWindow, WindowFrames};
use crate::settings::SettingsStore;
use crate::symmetry_editor::SymmetryEditorInput;
use crate::window::{FrameContext, Screen, WindowContent};

/// Pointer and button state of both windows for one frame.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub part_list: PartListInput,
    pub symmetry_editor: SymmetryEditorInput,
}

pub struct PartWizard {
    settings: SettingsStore,
    screen: Screen,
    registry: Arc<HighlightRegistry>,
    part_list: PartListWindow,
}

impl PartWizard {
    /// Sets up the add-on. Settings are saved right away so a fresh install
    /// gets a complete settings file.
    pub fn new(mut settings: SettingsStore, screen: Screen) -> EditorResult<Self> {
        settings.save()?;

        let registry = Arc::new(HighlightRegistry::new());
        let part_list = PartListWindow::new(registry.clone(), crate::VERSION);
        log::info!("{} {} ready", crate::strings::ADDON_NAME, crate::VERSION);
        Ok(Self {
            settings,
            screen,
            registry,
            part_list,
        })
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn part_list(&self) -> &PartListWindow {
        &self.part_list
    }

    pub fn registry(&self) -> &Arc<HighlightRegistry> {
        &self.registry
    }

    pub fn is_visible(&self) -> bool {
        self.part_list.is_visible()
    }

    pub fn set_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    /// Icon the toolbar button should show for the current visibility.
    pub fn toolbar_icon(&self) -> &str {
        let toolbar = &self.settings.settings().toolbar;
        if self.is_visible() {
            &toolbar.icon_active
        } else {
            &toolbar.icon_inactive
        }
    }

    /// Toolbar button handler.
    pub fn toggle_visibility(&mut self, vessel: &mut Vessel) -> EditorResult {
        if self.part_list.is_visible() {
            self.part_list.hide(vessel, &mut self.settings)?;
            self.settings.save()?;
        } else {
            self.part_list.show(&self.settings, self.screen)?;
        }
        Ok(())
    }

    /// Renders both windows, then persists any placement that changed.
    pub fn render(
        &mut self,
        vessel: &mut Vessel,
        host: &mut dyn EditorHost,
        input: &FrameInput,
    ) -> EditorResult<WindowFrames> {
        let frames = if self.part_list.is_visible() {
            let mut ctx = FrameContext {
                vessel,
                host,
                settings: &mut self.settings,
                screen: self.screen,
            };
            self.part_list
                .render(&mut ctx, &input.part_list, &input.symmetry_editor)?
        } else {
            WindowFrames {
                part_list: WindowContent::Hidden,
                symmetry_editor: WindowContent::Hidden,
            }
        };
        self.settings.save_if_dirty()?;
        Ok(frames)
    }

    /// The host editor removed `part` outside of the add-on.
    pub fn on_part_removed(&mut self, vessel: &mut Vessel, part: PartId) -> EditorResult {
        self.part_list.on_part_removed(vessel, &mut self.settings, part)
    }

    /// Hides everything, restores highlights left behind and saves settings.
    pub fn shutdown(&mut self, vessel: &mut Vessel) -> EditorResult {
        if self.part_list.is_visible() {
            self.part_list.hide(vessel, &mut self.settings)?;
        }
        let restored = self.registry.restore_orphans(vessel);
        if restored > 0 {
            log::debug!("Restored {restored} orphaned highlights");
        }
        self.settings.save_if_dirty()?;
        Ok(())
    }
}
