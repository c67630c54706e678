//! Transient part groups for regrouping a symmetry family.
//!
//! While the user rearranges symmetry in the editor, each prospective group
//! is a [`PartGroup`]. [`SymmetryGroups`] holds the ordered groups of one
//! family and commits them back into the vessel as real symmetry groups.

use crate::error::PartWizardResult;
use crate::symmetry::create_symmetry;
use crate::vessel::{PartId, Vessel};

/// A named, ordered collection of parts. Membership only; the parts belong to
/// the vessel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartGroup {
    name: String,
    parts: Vec<PartId>,
}

impl PartGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_part(mut self, part: PartId) -> Self {
        self.parts.push(part);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn parts(&self) -> &[PartId] {
        &self.parts
    }

    pub fn count(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn contains(&self, part: PartId) -> bool {
        self.parts.contains(&part)
    }

    /// Moves `part` to the end of `destination`. Returns `false` if this
    /// group does not hold `part`.
    pub fn move_to(&mut self, part: PartId, destination: &mut PartGroup) -> bool {
        let Some(index) = self.parts.iter().position(|&p| p == part) else {
            return false;
        };
        self.parts.remove(index);
        destination.parts.push(part);
        true
    }

    /// Appends every part of `source`, leaving it empty.
    pub fn merge_from(&mut self, source: &mut PartGroup) {
        self.parts.append(&mut source.parts);
    }

    /// Removes and returns the part at `index`.
    pub fn extract(&mut self, index: usize) -> Option<PartId> {
        (index < self.parts.len()).then(|| self.parts.remove(index))
    }
}

fn group_name(index: usize) -> String {
    format!("Group {}", index + 1)
}

/// The prospective symmetry groups of one family during an edit session.
///
/// Starts with one group per family member. Parts move between neighbouring
/// groups only, so every member is in exactly one group at all times.
#[derive(Debug, Clone)]
pub struct SymmetryGroups {
    family: PartId,
    family_size: usize,
    groups: Vec<PartGroup>,
}

impl SymmetryGroups {
    /// One group for `part` followed by one group per counterpart.
    pub fn from_family(vessel: &Vessel, part: PartId) -> PartWizardResult<Self> {
        let node = vessel.part(part)?;
        let members: Vec<PartId> = std::iter::once(part)
            .chain(node.symmetry_counterparts.iter().copied())
            .collect();
        let groups = members
            .iter()
            .enumerate()
            .map(|(index, &member)| PartGroup::new(group_name(index)).with_part(member))
            .collect();
        Ok(Self {
            family: part,
            family_size: members.len(),
            groups,
        })
    }

    /// The part the session was opened on.
    pub fn family(&self) -> PartId {
        self.family
    }

    pub fn family_size(&self) -> usize {
        self.family_size
    }

    pub fn groups(&self) -> &[PartGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// A new group is allowed only while there are members left to fill it.
    pub fn can_add_group(&self) -> bool {
        self.groups.len() < self.family_size
    }

    pub fn add_group(&mut self) -> bool {
        if !self.can_add_group() {
            return false;
        }
        self.groups.push(PartGroup::new(group_name(self.groups.len())));
        true
    }

    pub fn can_remove_group(&self) -> bool {
        self.groups.len() > 1
    }

    /// Removes the group at `index`, merging its parts into the group above,
    /// or below when it is the first.
    pub fn remove_group(&mut self, index: usize) -> bool {
        if !self.can_remove_group() || index >= self.groups.len() {
            return false;
        }
        let mut removed = self.groups.remove(index);
        let destination = index.saturating_sub(1);
        self.groups[destination].merge_from(&mut removed);
        self.renumber();
        true
    }

    pub fn can_move_down(&self, group: usize) -> bool {
        group + 1 < self.groups.len()
    }

    pub fn can_move_up(&self, group: usize) -> bool {
        group > 0 && group < self.groups.len()
    }

    /// Moves `part` from group `group` into the next one.
    pub fn move_part_down(&mut self, group: usize, part: PartId) -> bool {
        if !self.can_move_down(group) {
            return false;
        }
        let (head, tail) = self.groups.split_at_mut(group + 1);
        head[group].move_to(part, &mut tail[0])
    }

    /// Moves `part` from group `group` into the previous one.
    pub fn move_part_up(&mut self, group: usize, part: PartId) -> bool {
        if !self.can_move_up(group) {
            return false;
        }
        let (head, tail) = self.groups.split_at_mut(group);
        tail[0].move_to(part, &mut head[group - 1])
    }

    /// Index of the group holding `part`.
    pub fn group_of(&self, part: PartId) -> Option<usize> {
        self.groups.iter().position(|g| g.contains(part))
    }

    fn renumber(&mut self) {
        for (index, group) in self.groups.iter_mut().enumerate() {
            group.set_name(group_name(index));
        }
    }

    /// Writes the groups back into the vessel: the first part of each
    /// non-empty group becomes its symmetry root and the rest its
    /// counterparts. Returns the number of groups created.
    pub fn commit(mut self, vessel: &mut Vessel) -> PartWizardResult<usize> {
        for part in self.groups.iter().flat_map(|g| g.parts()) {
            vessel.part(*part)?;
        }

        let mut created = 0;
        for group in &mut self.groups {
            let Some(root) = group.extract(0) else {
                continue;
            };
            create_symmetry(vessel, root, group.parts())?;
            created += 1;
        }
        log::info!(
            "Committed {created} symmetry group(s) for family {}",
            self.family
        );
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vessel::PartInfo;

    fn family(count: usize) -> (Vessel, Vec<PartId>) {
        let mut vessel = Vessel::new();
        let pod = vessel.add_root(PartInfo::new("pod")).unwrap();
        let parts: Vec<PartId> = (0..count)
            .map(|_| vessel.add_child(pod, PartInfo::new("tank")).unwrap())
            .collect();
        create_symmetry(&mut vessel, parts[0], &parts[1..]).unwrap();
        (vessel, parts)
    }

    #[test]
    fn move_to_and_merge() {
        let mut a = PartGroup::new("a").with_part(PartId(1)).with_part(PartId(2));
        let mut b = PartGroup::new("b");

        assert!(a.move_to(PartId(1), &mut b));
        assert!(!a.move_to(PartId(1), &mut b));
        assert_eq!(a.parts(), &[PartId(2)]);
        assert_eq!(b.parts(), &[PartId(1)]);

        b.merge_from(&mut a);
        assert!(a.is_empty());
        assert_eq!(b.parts(), &[PartId(1), PartId(2)]);
        assert_eq!(b.extract(0), Some(PartId(1)));
        assert_eq!(b.extract(5), None);
        assert_eq!(b.count(), 1);
    }

    #[test]
    fn starts_with_one_group_per_member() {
        let (vessel, parts) = family(3);
        let groups = SymmetryGroups::from_family(&vessel, parts[1]).unwrap();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups.groups()[0].parts(), &[parts[1]]);
        assert_eq!(groups.groups()[2].name(), "Group 3");
        assert!(!groups.can_add_group());
    }

    #[test]
    fn remove_merges_upward_then_downward() {
        let (vessel, parts) = family(3);
        let mut groups = SymmetryGroups::from_family(&vessel, parts[0]).unwrap();

        assert!(groups.remove_group(2));
        assert_eq!(groups.groups()[1].parts(), &[parts[1], parts[2]]);

        assert!(groups.remove_group(0));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups.groups()[0].parts(), &[parts[1], parts[2], parts[0]]);
        assert_eq!(groups.groups()[0].name(), "Group 1");

        assert!(!groups.remove_group(0));
        assert!(groups.can_add_group());
    }

    #[test]
    fn moves_are_bounded() {
        let (vessel, parts) = family(2);
        let mut groups = SymmetryGroups::from_family(&vessel, parts[0]).unwrap();

        assert!(!groups.move_part_up(0, parts[0]));
        assert!(!groups.move_part_down(1, parts[1]));
        assert!(groups.move_part_down(0, parts[0]));
        assert_eq!(groups.group_of(parts[0]), Some(1));
        assert!(groups.move_part_up(1, parts[1]));
        assert_eq!(groups.group_of(parts[1]), Some(0));
    }

    #[test]
    fn commit_skips_empty_groups() {
        let (mut vessel, parts) = family(3);
        let mut groups = SymmetryGroups::from_family(&vessel, parts[0]).unwrap();
        assert!(groups.move_part_up(2, parts[2]));
        assert!(groups.move_part_up(1, parts[2]));
        assert!(groups.move_part_up(1, parts[1]));

        assert_eq!(groups.commit(&mut vessel).unwrap(), 1);
        let root = vessel.part(parts[0]).unwrap();
        assert_eq!(root.symmetry_counterparts, vec![parts[2], parts[1]]);
        assert_eq!(root.symmetry_mode, 0);
    }
}
