//! Read-only questions about symmetry groups.

use std::fmt::Write as _;

use crate::error::PartWizardResult;
use crate::vessel::{PartId, Vessel};

/// Returns `true` if `part` has at least one symmetry counterpart.
pub fn has_symmetry(vessel: &Vessel, part: PartId) -> PartWizardResult<bool> {
    Ok(vessel.part(part)?.has_symmetry())
}

/// Returns `true` if `part` is `family` or one of `family`'s counterparts.
///
/// `part` need not exist any more; this is asked after a part was removed.
pub fn is_sibling(vessel: &Vessel, part: PartId, family: PartId) -> PartWizardResult<bool> {
    let family_part = vessel.part(family)?;
    Ok(part == family || family_part.symmetry_counterparts.contains(&part))
}

/// Finds the canonical member of `part`'s symmetry group: the one whose
/// symmetry mode is zero. A part without such a counterpart is its own root.
pub fn find_symmetry_root(vessel: &Vessel, part: PartId) -> PartWizardResult<PartId> {
    let node = vessel.part(part)?;
    if node.symmetry_mode == 0 {
        return Ok(part);
    }
    for &counterpart in &node.symmetry_counterparts {
        if vessel.part(counterpart)?.symmetry_mode == 0 {
            return Ok(counterpart);
        }
    }
    Ok(part)
}

/// Describes `part`'s symmetry group starting from its root, and writes the
/// description to the debug log.
pub fn symmetry_report(vessel: &Vessel, part: PartId) -> PartWizardResult<String> {
    let root_id = find_symmetry_root(vessel, part)?;
    let root = vessel.part(root_id)?;

    let mut report = String::new();
    let _ = writeln!(report, "SYMMETRY REPORT FOR {}", root.name());
    let _ = writeln!(report, "Root:");
    let _ = writeln!(report, "\tname = {}", root.name());
    let _ = writeln!(report, "\tuid = {}", root.uid());
    let _ = writeln!(report, "\tsymmetryMode = {}", root.symmetry_mode);
    let _ = writeln!(report, "Counterparts:");
    for (index, &id) in root.symmetry_counterparts.iter().enumerate() {
        let c = vessel.part(id)?;
        let _ = writeln!(report, "\t{index} name = {}", c.name());
        let _ = writeln!(report, "\t{index} uid = {}", c.uid());
        let _ = writeln!(report, "\t{index} symmetryMode = {}", c.symmetry_mode);
        let _ = writeln!(report, "\t{index} children = {}", c.children().len());
    }
    report.push_str("END OF REPORT");

    for line in report.lines() {
        log::debug!("{line}");
    }
    Ok(report)
}
