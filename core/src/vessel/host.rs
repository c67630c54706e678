//! Host editor services.

use super::{PartId, Vessel};
use crate::error::PartWizardResult;

/// Services of the construction editor that part deletion and symmetry
/// changes call into.
///
/// The editor owns part selection and staging; the core only asks it to
/// act. [`HeadlessHost`] is a complete implementation over a [`Vessel`].
pub trait EditorHost {
    /// The part currently picked up by the editor, if any.
    fn selected_part(&self) -> Option<PartId>;

    fn set_selected_part(&mut self, part: Option<PartId>);

    /// Destroys the selected part together with its symmetry counterparts.
    fn destroy_selected_part(&mut self, vessel: &mut Vessel) -> PartWizardResult;

    /// Re-sorts staging after the part list changed.
    fn sort_staging(&mut self);
}

/// An [`EditorHost`] without a surrounding editor: selection is a plain
/// field and destruction removes the part and its counterparts, each with
/// whatever hangs below it, from the vessel arena.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    selected: Option<PartId>,
    staging_sorts: usize,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of staging re-sorts requested so far.
    pub fn staging_sorts(&self) -> usize {
        self.staging_sorts
    }
}

impl EditorHost for HeadlessHost {
    fn selected_part(&self) -> Option<PartId> {
        self.selected
    }

    fn set_selected_part(&mut self, part: Option<PartId>) {
        self.selected = part;
    }

    fn destroy_selected_part(&mut self, vessel: &mut Vessel) -> PartWizardResult {
        let Some(part) = self.selected.take() else {
            return Ok(());
        };
        let counterparts = vessel.part(part)?.symmetry_counterparts.clone();
        vessel.destroy_subtree(part)?;
        for counterpart in counterparts {
            if vessel.contains(counterpart) {
                vessel.destroy_subtree(counterpart)?;
            }
        }
        Ok(())
    }

    fn sort_staging(&mut self) {
        self.staging_sorts += 1;
    }
}
