//! Operations that rewrite the part tree or its symmetry links.

use std::collections::BTreeSet;

use super::query::find_symmetry_root;
use crate::error::{PartWizardError, PartWizardResult};
use crate::vessel::{EditorHost, PartId, Vessel};

/// Deletes a childless part through the host.
///
/// The part is detached from its parent, destroyed via the host's selection
/// and the selection cleared again. Staging is re-sorted last.
///
/// If the host fails to destroy it, the selection is cleared and a part
/// that survived goes back to its old place under its parent.
pub fn delete<H: EditorHost + ?Sized>(
    vessel: &mut Vessel,
    host: &mut H,
    part: PartId,
) -> PartWizardResult {
    let node = vessel.part(part)?;
    if !node.children().is_empty() {
        return Err(PartWizardError::HasChildren(part));
    }
    let parent = node.parent().ok_or(PartWizardError::NoParent(part))?;
    let index = vessel
        .part(parent)?
        .children()
        .iter()
        .position(|&c| c == part)
        .unwrap_or(usize::MAX);

    vessel.remove_child(parent, part)?;

    host.set_selected_part(Some(part));
    let destroyed = host.destroy_selected_part(vessel);
    host.set_selected_part(None);
    if let Err(e) = destroyed {
        if vessel.get(part).is_some_and(|p| p.parent().is_none()) && vessel.contains(parent) {
            vessel.attach_at(part, parent, index)?;
        }
        return Err(e);
    }

    host.sort_staging();
    Ok(())
}

/// Disconnects `part`'s whole symmetry group, cascading into the children of
/// every member, then re-sorts staging.
pub fn break_symmetry<H: EditorHost + ?Sized>(
    vessel: &mut Vessel,
    host: &mut H,
    part: PartId,
) -> PartWizardResult {
    vessel.part(part)?;
    break_group(vessel, part)?;
    host.sort_staging();
    Ok(())
}

fn break_group(vessel: &mut Vessel, part: PartId) -> PartWizardResult {
    let mut cleared = BTreeSet::new();
    let mut pending = vec![part];

    while let Some(next) = pending.pop() {
        if cleared.contains(&next) {
            continue;
        }
        let root = find_symmetry_root(vessel, next)?;
        let mut members = BTreeSet::from([root, next]);
        members.extend(vessel.part(root)?.symmetry_counterparts.iter().copied());
        members.extend(vessel.part(next)?.symmetry_counterparts.iter().copied());

        for member in members {
            if !cleared.insert(member) {
                continue;
            }
            let Some(node) = vessel.get_mut(member) else {
                continue;
            };
            node.symmetry_counterparts.clear();
            node.symmetry_mode = 0;
            pending.extend_from_slice(node.children());
        }
    }
    Ok(())
}

/// Makes `root` and `counterparts` one fully cross-linked symmetry group.
///
/// `root` becomes the canonical member (mode 0) listing every counterpart in
/// input order; each counterpart lists `root` first, then the other
/// counterparts. The new grouping is then pushed down into the root's
/// symmetrical children: each keeps only the counterparts hanging off one of
/// `counterparts`.
///
/// The input is validated before anything changes.
pub fn create_symmetry(
    vessel: &mut Vessel,
    root: PartId,
    counterparts: &[PartId],
) -> PartWizardResult {
    validate_group(vessel, root, counterparts)?;

    let mode = counterparts.len() as u32;
    {
        let node = vessel.part_mut(root)?;
        node.symmetry_mode = 0;
        node.symmetry_counterparts = counterparts.to_vec();
    }
    for (index, &counterpart) in counterparts.iter().enumerate() {
        let mut links = Vec::with_capacity(counterparts.len());
        links.push(root);
        links.extend(
            counterparts
                .iter()
                .enumerate()
                .filter(|&(other, _)| other != index)
                .map(|(_, &id)| id),
        );
        let node = vessel.part_mut(counterpart)?;
        node.symmetry_mode = mode;
        node.symmetry_counterparts = links;
    }

    let children = vessel.part(root)?.children().to_vec();
    for child in children {
        let node = vessel.part(child)?;
        if !node.has_symmetry() {
            continue;
        }
        let subset: Vec<PartId> = node
            .symmetry_counterparts
            .iter()
            .copied()
            .filter(|&c| {
                vessel
                    .get(c)
                    .and_then(|p| p.parent())
                    .is_some_and(|parent| counterparts.contains(&parent))
            })
            .collect();
        create_symmetry(vessel, child, &subset)?;
    }

    log::debug!(
        "Created symmetry around {root} with {} counterpart(s)",
        counterparts.len()
    );
    Ok(())
}

fn validate_group(vessel: &Vessel, root: PartId, counterparts: &[PartId]) -> PartWizardResult {
    vessel.part(root)?;
    let mut seen = BTreeSet::new();
    for &counterpart in counterparts {
        vessel.part(counterpart)?;
        let reason = if counterpart == root {
            "root is listed as its own counterpart"
        } else if !seen.insert(counterpart) {
            "counterpart listed more than once"
        } else {
            continue;
        };
        return Err(PartWizardError::InvalidSymmetryGroup {
            root,
            reason: format!("{reason} ({counterpart})"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vessel::{HeadlessHost, PartInfo};

    fn fins(count: usize) -> (Vessel, PartId, Vec<PartId>) {
        let mut vessel = Vessel::new();
        let pod = vessel.add_root(PartInfo::new("pod")).unwrap();
        let fins = (0..count)
            .map(|_| vessel.add_child(pod, PartInfo::new("fin")).unwrap())
            .collect();
        (vessel, pod, fins)
    }

    fn links(vessel: &Vessel, part: PartId) -> Vec<PartId> {
        vessel.part(part).unwrap().symmetry_counterparts.clone()
    }

    #[test]
    fn create_cross_links_in_order() {
        let (mut vessel, _pod, f) = fins(3);
        create_symmetry(&mut vessel, f[0], &[f[1], f[2]]).unwrap();

        assert_eq!(links(&vessel, f[0]), vec![f[1], f[2]]);
        assert_eq!(links(&vessel, f[1]), vec![f[0], f[2]]);
        assert_eq!(links(&vessel, f[2]), vec![f[0], f[1]]);
        assert_eq!(vessel.part(f[0]).unwrap().symmetry_mode, 0);
        assert_eq!(vessel.part(f[1]).unwrap().symmetry_mode, 2);
    }

    #[test]
    fn create_rejects_bad_groups_without_mutation() {
        let (mut vessel, _pod, f) = fins(2);
        let err = create_symmetry(&mut vessel, f[0], &[f[1], f[0]]).unwrap_err();
        assert!(matches!(err, PartWizardError::InvalidSymmetryGroup { .. }));
        assert!(links(&vessel, f[1]).is_empty());

        let err = create_symmetry(&mut vessel, f[0], &[f[1], f[1]]).unwrap_err();
        assert!(matches!(err, PartWizardError::InvalidSymmetryGroup { .. }));

        assert_eq!(
            create_symmetry(&mut vessel, f[0], &[PartId(404)]),
            Err(PartWizardError::UnknownPart(PartId(404)))
        );
        assert!(links(&vessel, f[0]).is_empty());
    }

    #[test]
    fn create_propagates_to_children() {
        let (mut vessel, _pod, f) = fins(3);
        let tips: Vec<PartId> = f
            .iter()
            .map(|&fin| vessel.add_child(fin, PartInfo::new("tip")).unwrap())
            .collect();
        create_symmetry(&mut vessel, tips[0], &[tips[1], tips[2]]).unwrap();

        // Regroup the fins as {f0, f1} and {f2}.
        create_symmetry(&mut vessel, f[0], &[f[1]]).unwrap();
        create_symmetry(&mut vessel, f[2], &[]).unwrap();

        assert_eq!(links(&vessel, tips[0]), vec![tips[1]]);
        assert_eq!(links(&vessel, tips[1]), vec![tips[0]]);
        assert!(links(&vessel, tips[2]).is_empty());
    }

    #[test]
    fn break_clears_whole_group_and_children() {
        let (mut vessel, _pod, f) = fins(2);
        let tips: Vec<PartId> = f
            .iter()
            .map(|&fin| vessel.add_child(fin, PartInfo::new("tip")).unwrap())
            .collect();
        create_symmetry(&mut vessel, tips[0], &[tips[1]]).unwrap();
        create_symmetry(&mut vessel, f[0], &[f[1]]).unwrap();

        let mut host = HeadlessHost::new();
        break_symmetry(&mut vessel, &mut host, f[1]).unwrap();

        for &part in f.iter().chain(&tips) {
            assert!(links(&vessel, part).is_empty());
            assert_eq!(vessel.part(part).unwrap().symmetry_mode, 0);
        }
        assert_eq!(host.staging_sorts(), 1);
    }

    #[test]
    fn delete_goes_through_the_host() {
        let (mut vessel, pod, f) = fins(3);
        create_symmetry(&mut vessel, f[0], &[f[1]]).unwrap();
        let mut host = HeadlessHost::new();

        delete(&mut vessel, &mut host, f[1]).unwrap();

        assert!(!vessel.contains(f[1]));
        assert!(!vessel.contains(f[0]));
        assert_eq!(vessel.part(pod).unwrap().children(), &[f[2]]);
        assert!(host.selected_part().is_none());
        assert_eq!(host.staging_sorts(), 1);
    }

    #[test]
    fn deleting_the_group_root_removes_the_whole_group() {
        let (mut vessel, pod, f) = fins(3);
        let tips: Vec<PartId> = f[1..]
            .iter()
            .map(|&fin| vessel.add_child(fin, PartInfo::new("tip")).unwrap())
            .collect();
        create_symmetry(&mut vessel, f[0], &[f[1], f[2]]).unwrap();
        let mut host = HeadlessHost::new();

        delete(&mut vessel, &mut host, f[0]).unwrap();

        for &part in f.iter().chain(&tips) {
            assert!(!vessel.contains(part));
        }
        assert!(vessel.part(pod).unwrap().children().is_empty());
        assert_eq!(vessel.len(), 1);
    }

    /// Fails every destruction, leaving the vessel untouched.
    #[derive(Default)]
    struct FailingHost {
        selected: Option<PartId>,
    }

    impl EditorHost for FailingHost {
        fn selected_part(&self) -> Option<PartId> {
            self.selected
        }

        fn set_selected_part(&mut self, part: Option<PartId>) {
            self.selected = part;
        }

        fn destroy_selected_part(&mut self, _vessel: &mut Vessel) -> PartWizardResult {
            Err(PartWizardError::HasChildren(PartId(0)))
        }

        fn sort_staging(&mut self) {}
    }

    #[test]
    fn failed_host_destruction_puts_the_part_back() {
        let (mut vessel, pod, f) = fins(3);
        let mut host = FailingHost::default();

        assert!(delete(&mut vessel, &mut host, f[1]).is_err());

        assert!(host.selected_part().is_none());
        assert_eq!(vessel.part(f[1]).unwrap().parent(), Some(pod));
        assert_eq!(vessel.part(pod).unwrap().children(), &f[..]);
    }

    #[test]
    fn break_visits_shared_descendants_once() {
        let (mut vessel, _pod, f) = fins(2);
        let tips: Vec<PartId> = f
            .iter()
            .map(|&fin| vessel.add_child(fin, PartInfo::new("tip")).unwrap())
            .collect();
        let caps: Vec<PartId> = tips
            .iter()
            .map(|&tip| vessel.add_child(tip, PartInfo::new("cap")).unwrap())
            .collect();
        create_symmetry(&mut vessel, caps[0], &[caps[1]]).unwrap();
        create_symmetry(&mut vessel, tips[0], &[tips[1]]).unwrap();
        create_symmetry(&mut vessel, f[0], &[f[1]]).unwrap();

        let mut host = HeadlessHost::new();
        break_symmetry(&mut vessel, &mut host, f[0]).unwrap();

        for &part in f.iter().chain(&tips).chain(&caps) {
            assert!(links(&vessel, part).is_empty());
            assert_eq!(vessel.part(part).unwrap().symmetry_mode, 0);
        }
    }

    #[test]
    fn delete_refuses_parts_with_children_or_no_parent() {
        let (mut vessel, pod, f) = fins(1);
        vessel.add_child(f[0], PartInfo::new("tip")).unwrap();
        let mut host = HeadlessHost::new();

        assert_eq!(
            delete(&mut vessel, &mut host, f[0]),
            Err(PartWizardError::HasChildren(f[0]))
        );
        let loose = vessel.spawn(PartInfo::new("loose"));
        assert_eq!(
            delete(&mut vessel, &mut host, loose),
            Err(PartWizardError::NoParent(loose))
        );
        assert!(vessel.contains(pod));
        assert_eq!(host.staging_sorts(), 0);
    }
}
