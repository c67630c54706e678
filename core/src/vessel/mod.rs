//! The vessel under construction.
//!
//! Parts live in an arena keyed by [`PartId`]; parent and child links are
//! ids, so the tree can be walked and rewritten without shared ownership.
//! All tree operations keep `parent` and `children` consistent.
//!
//! - [`Vessel`]: the part arena with its root part
//! - [`Part`] / [`PartInfo`] / [`PartCategory`]: part data
//! - [`EditorHost`]: editor services (selection, destruction, staging)

mod host;
mod types;

use std::collections::BTreeMap;

pub use host::{EditorHost, HeadlessHost};
pub use types::{Part, PartCategory, PartId, PartInfo};

use crate::error::{PartWizardError, PartWizardResult};
use crate::highlight::{Color, HighlightHost, HighlightKind, HighlightState};

/// Arena of parts forming one vessel.
#[derive(Debug)]
pub struct Vessel {
    parts: BTreeMap<PartId, Part>,
    root: Option<PartId>,
    next_uid: u32,
    default_highlight: Option<HighlightState>,
}

impl Vessel {
    pub fn new() -> Self {
        Self {
            parts: BTreeMap::new(),
            root: None,
            next_uid: 1,
            default_highlight: None,
        }
    }

    /// Sets the highlight state parts return to on
    /// [`reset_highlight`](HighlightHost::reset_highlight).
    #[must_use]
    pub fn with_default_highlight(mut self, state: HighlightState) -> Self {
        self.default_highlight = Some(state);
        self
    }

    fn next_id(&mut self) -> PartId {
        let id = PartId(self.next_uid);
        self.next_uid += 1;
        id
    }

    /// Creates the root part. A vessel has exactly one root.
    pub fn add_root(&mut self, info: PartInfo) -> PartWizardResult<PartId> {
        if let Some(root) = self.root {
            return Err(PartWizardError::RootExists(root));
        }
        let id = self.next_id();
        self.parts.insert(id, Part::new(id, info));
        self.root = Some(id);
        Ok(id)
    }

    /// Creates a part that is not yet attached anywhere.
    pub fn spawn(&mut self, info: PartInfo) -> PartId {
        let id = self.next_id();
        self.parts.insert(id, Part::new(id, info));
        id
    }

    /// Creates a part attached beneath `parent`.
    pub fn add_child(&mut self, parent: PartId, info: PartInfo) -> PartWizardResult<PartId> {
        self.part(parent)?;
        let id = self.spawn(info);
        self.attach(id, parent)?;
        Ok(id)
    }

    /// Attaches a detached part beneath `parent`.
    pub fn attach(&mut self, part: PartId, parent: PartId) -> PartWizardResult {
        self.attach_at(part, parent, usize::MAX)
    }

    /// Attaches a detached part as `parent`'s child number `index`, or last
    /// when `index` is past the end.
    pub fn attach_at(&mut self, part: PartId, parent: PartId, index: usize) -> PartWizardResult {
        if part == parent || self.is_ancestor(parent, part) {
            return Err(PartWizardError::CyclicAttachment(part));
        }
        self.part(parent)?;
        if self.root == Some(part) {
            return Err(PartWizardError::RootExists(part));
        }
        let node = self.part_mut(part)?;
        if let Some(existing) = node.parent {
            return Err(PartWizardError::AlreadyAttached {
                part,
                parent: existing,
            });
        }
        node.parent = Some(parent);
        let parent_node = self.part_mut(parent)?;
        if !parent_node.children.contains(&part) {
            let index = index.min(parent_node.children.len());
            parent_node.children.insert(index, part);
        }
        Ok(())
    }

    /// Detaches `child` from `parent`. The child stays in the arena.
    pub fn remove_child(&mut self, parent: PartId, child: PartId) -> PartWizardResult {
        let parent_node = self.part_mut(parent)?;
        parent_node.children.retain(|&c| c != child);
        let child_node = self.part_mut(child)?;
        if child_node.parent == Some(parent) {
            child_node.parent = None;
        }
        Ok(())
    }

    /// Removes a childless part from the arena.
    ///
    /// The part is detached from its parent and dropped from the counterpart
    /// list of every part it was symmetrical with, so no id in the vessel
    /// refers to it afterwards. The surviving group keeps exactly one
    /// canonical member: a lone survivor loses its symmetry, otherwise the
    /// first survivor takes over as root if the removed part held that role.
    pub fn destroy(&mut self, part: PartId) -> PartWizardResult<Part> {
        let node = self.part(part)?;
        if !node.children.is_empty() {
            return Err(PartWizardError::HasChildren(part));
        }
        if let Some(parent) = node.parent {
            self.remove_child(parent, part)?;
        }
        let removed = self
            .parts
            .remove(&part)
            .ok_or(PartWizardError::UnknownPart(part))?;
        for counterpart in &removed.symmetry_counterparts {
            if let Some(other) = self.parts.get_mut(counterpart) {
                other.symmetry_counterparts.retain(|&c| c != part);
            }
        }
        self.regroup_survivors(&removed.symmetry_counterparts);
        if self.root == Some(part) {
            self.root = None;
        }
        log::debug!("Destroyed part {} ({})", part, removed.name());
        Ok(removed)
    }

    /// Removes `part` and everything attached below it, children first.
    pub fn destroy_subtree(&mut self, part: PartId) -> PartWizardResult<Vec<Part>> {
        let children = self.part(part)?.children.clone();
        let mut removed = Vec::new();
        for child in children {
            removed.extend(self.destroy_subtree(child)?);
        }
        removed.push(self.destroy(part)?);
        Ok(removed)
    }

    fn regroup_survivors(&mut self, group: &[PartId]) {
        let survivors: Vec<PartId> = group
            .iter()
            .copied()
            .filter(|id| self.parts.contains_key(id))
            .collect();
        if let [single] = survivors[..] {
            if let Some(node) = self.parts.get_mut(&single) {
                node.symmetry_counterparts.clear();
                node.symmetry_mode = 0;
            }
            return;
        }
        let root = survivors
            .iter()
            .copied()
            .find(|id| self.parts.get(id).is_some_and(|p| p.symmetry_mode == 0))
            .or_else(|| survivors.first().copied());
        for &id in &survivors {
            if let Some(node) = self.parts.get_mut(&id) {
                node.symmetry_mode = if Some(id) == root {
                    0
                } else {
                    node.symmetry_counterparts.len() as u32
                };
            }
        }
    }

    pub fn root(&self) -> Option<PartId> {
        self.root
    }

    pub fn get(&self, id: PartId) -> Option<&Part> {
        self.parts.get(&id)
    }

    pub fn get_mut(&mut self, id: PartId) -> Option<&mut Part> {
        self.parts.get_mut(&id)
    }

    /// Like [`get`](Self::get), but an unknown id is an error.
    pub fn part(&self, id: PartId) -> PartWizardResult<&Part> {
        self.parts.get(&id).ok_or(PartWizardError::UnknownPart(id))
    }

    pub fn part_mut(&mut self, id: PartId) -> PartWizardResult<&mut Part> {
        self.parts.get_mut(&id).ok_or(PartWizardError::UnknownPart(id))
    }

    pub fn contains(&self, id: PartId) -> bool {
        self.parts.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// The vessel's part list: every part reachable from the root, in
    /// depth-first pre-order.
    pub fn parts(&self) -> Vec<PartId> {
        let mut out = Vec::with_capacity(self.parts.len());
        if let Some(root) = self.root {
            self.collect_subtree(root, &mut out);
        }
        out
    }

    fn collect_subtree(&self, id: PartId, out: &mut Vec<PartId>) {
        out.push(id);
        if let Some(part) = self.parts.get(&id) {
            for &child in &part.children {
                self.collect_subtree(child, out);
            }
        }
    }

    /// Returns `true` if `possible_ancestor` is on the parent chain above `part`.
    pub fn is_ancestor(&self, part: PartId, possible_ancestor: PartId) -> bool {
        match self.parts.get(&part).and_then(|p| p.parent) {
            Some(parent) => parent == possible_ancestor || self.is_ancestor(parent, possible_ancestor),
            None => false,
        }
    }

    /// Returns `true` if `possible_descendant` is in the subtree below `part`.
    pub fn is_descendant(&self, part: PartId, possible_descendant: PartId) -> bool {
        let Some(node) = self.parts.get(&part) else {
            return false;
        };
        node.children
            .iter()
            .any(|&child| child == possible_descendant || self.is_descendant(child, possible_descendant))
    }
}

impl Default for Vessel {
    fn default() -> Self {
        Self::new()
    }
}

impl HighlightHost for Vessel {
    fn highlight_state(&self, part: PartId) -> Option<HighlightState> {
        self.parts.get(&part).map(|p| p.highlight)
    }

    fn symmetry_counterparts(&self, part: PartId) -> Vec<PartId> {
        self.parts
            .get(&part)
            .map(|p| p.symmetry_counterparts.clone())
            .unwrap_or_default()
    }

    fn set_highlight_color(&mut self, part: PartId, color: Color) {
        if let Some(p) = self.parts.get_mut(&part) {
            p.highlight.color = color;
        }
    }

    fn set_highlight_kind(&mut self, part: PartId, kind: HighlightKind) {
        if let Some(p) = self.parts.get_mut(&part) {
            p.highlight.kind = kind;
        }
    }

    fn set_highlight_recursive(&mut self, part: PartId, recursive: bool) {
        if let Some(p) = self.parts.get_mut(&part) {
            p.highlight.recursive = recursive;
        }
    }

    fn set_highlight_active(&mut self, part: PartId, active: bool) {
        if let Some(p) = self.parts.get_mut(&part) {
            p.highlight.active = active;
        }
    }

    fn reset_highlight(&mut self, part: PartId) -> bool {
        let Some(default) = self.default_highlight else {
            return false;
        };
        match self.parts.get_mut(&part) {
            Some(p) => {
                p.highlight = default;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pod_with_children() -> (Vessel, PartId, PartId, PartId) {
        let mut vessel = Vessel::new();
        let root = vessel.add_root(PartInfo::new("pod")).unwrap();
        let tank = vessel.add_child(root, PartInfo::new("tank")).unwrap();
        let engine = vessel.add_child(tank, PartInfo::new("engine")).unwrap();
        (vessel, root, tank, engine)
    }

    #[test]
    fn add_child_links_both_directions() {
        let (vessel, root, tank, engine) = pod_with_children();
        assert_eq!(vessel.part(tank).unwrap().parent(), Some(root));
        assert_eq!(vessel.part(root).unwrap().children(), &[tank]);
        assert_eq!(vessel.part(tank).unwrap().children(), &[engine]);
    }

    #[test]
    fn second_root_is_rejected() {
        let (mut vessel, root, ..) = pod_with_children();
        assert_eq!(
            vessel.add_root(PartInfo::new("other")),
            Err(PartWizardError::RootExists(root))
        );
    }

    #[test]
    fn parts_are_listed_in_pre_order() {
        let (mut vessel, root, tank, engine) = pod_with_children();
        let chute = vessel.add_child(root, PartInfo::new("chute")).unwrap();
        assert_eq!(vessel.parts(), vec![root, tank, engine, chute]);
    }

    #[test]
    fn detached_parts_are_not_listed() {
        let (mut vessel, root, tank, engine) = pod_with_children();
        vessel.spawn(PartInfo::new("loose"));
        assert_eq!(vessel.parts(), vec![root, tank, engine]);
        assert_eq!(vessel.len(), 4);
    }

    #[test]
    fn ancestry_queries() {
        let (vessel, root, tank, engine) = pod_with_children();
        assert!(vessel.is_ancestor(engine, tank));
        assert!(vessel.is_ancestor(engine, root));
        assert!(!vessel.is_ancestor(root, engine));
        assert!(!vessel.is_ancestor(engine, engine));

        assert!(vessel.is_descendant(root, engine));
        assert!(vessel.is_descendant(tank, engine));
        assert!(!vessel.is_descendant(engine, root));
        assert!(!vessel.is_descendant(engine, engine));
    }

    #[test]
    fn attach_rejects_cycles() {
        let (mut vessel, root, tank, engine) = pod_with_children();
        vessel.remove_child(root, tank).unwrap();
        assert_eq!(
            vessel.attach(tank, engine),
            Err(PartWizardError::CyclicAttachment(tank))
        );
        assert_eq!(
            vessel.attach(tank, tank),
            Err(PartWizardError::CyclicAttachment(tank))
        );
    }

    #[test]
    fn attach_rejects_second_parent() {
        let (mut vessel, root, tank, engine) = pod_with_children();
        assert_eq!(
            vessel.attach(engine, root),
            Err(PartWizardError::AlreadyAttached {
                part: engine,
                parent: tank
            })
        );
    }

    #[test]
    fn remove_child_detaches() {
        let (mut vessel, _root, tank, engine) = pod_with_children();
        vessel.remove_child(tank, engine).unwrap();
        assert!(vessel.part(engine).unwrap().parent().is_none());
        assert!(vessel.part(tank).unwrap().children().is_empty());
        assert!(vessel.contains(engine));
    }

    #[test]
    fn destroy_removes_leaf_and_symmetry_links() {
        let (mut vessel, root, _tank, engine) = pod_with_children();
        let fin_a = vessel.add_child(root, PartInfo::new("fin")).unwrap();
        let fin_b = vessel.add_child(root, PartInfo::new("fin")).unwrap();
        vessel.part_mut(fin_a).unwrap().symmetry_counterparts = vec![fin_b];
        vessel.part_mut(fin_b).unwrap().symmetry_counterparts = vec![fin_a];

        vessel.destroy(fin_b).unwrap();

        assert!(!vessel.contains(fin_b));
        assert!(vessel.part(fin_a).unwrap().symmetry_counterparts.is_empty());
        assert!(!vessel.part(root).unwrap().children().contains(&fin_b));
        assert_eq!(
            vessel.destroy(root),
            Err(PartWizardError::HasChildren(root))
        );
        vessel.destroy(engine).unwrap();
    }

    #[test]
    fn destroying_the_group_root_promotes_a_survivor() {
        let (mut vessel, root, ..) = pod_with_children();
        let fins: Vec<PartId> = (0..3)
            .map(|_| vessel.add_child(root, PartInfo::new("fin")).unwrap())
            .collect();
        vessel.part_mut(fins[0]).unwrap().symmetry_counterparts = vec![fins[1], fins[2]];
        for (i, &fin) in fins.iter().enumerate().skip(1) {
            let node = vessel.part_mut(fin).unwrap();
            node.symmetry_counterparts = vec![fins[0], fins[3 - i]];
            node.symmetry_mode = 2;
        }

        vessel.destroy(fins[0]).unwrap();

        let a = vessel.part(fins[1]).unwrap();
        let b = vessel.part(fins[2]).unwrap();
        assert_eq!(a.symmetry_counterparts, vec![fins[2]]);
        assert_eq!(b.symmetry_counterparts, vec![fins[1]]);
        assert_eq!(a.symmetry_mode, 0);
        assert_eq!(b.symmetry_mode, 1);
    }

    #[test]
    fn destroy_subtree_removes_descendants_first() {
        let (mut vessel, root, tank, engine) = pod_with_children();
        let removed: Vec<PartId> = vessel
            .destroy_subtree(tank)
            .unwrap()
            .iter()
            .map(Part::uid)
            .collect();
        assert_eq!(removed, vec![engine, tank]);
        assert!(vessel.part(root).unwrap().children().is_empty());
        assert_eq!(vessel.len(), 1);
    }

    #[test]
    fn attach_at_keeps_sibling_order() {
        let (mut vessel, root, tank, _engine) = pod_with_children();
        let chute = vessel.add_child(root, PartInfo::new("chute")).unwrap();
        vessel.remove_child(root, tank).unwrap();
        vessel.attach_at(tank, root, 0).unwrap();
        assert_eq!(vessel.part(root).unwrap().children(), &[tank, chute]);
    }

    #[test]
    fn unknown_part_is_an_error() {
        let vessel = Vessel::new();
        assert_eq!(
            vessel.part(PartId(99)).unwrap_err(),
            PartWizardError::UnknownPart(PartId(99))
        );
        assert!(vessel.get(PartId(99)).is_none());
    }

    #[test]
    fn ids_are_never_reused() {
        let mut vessel = Vessel::new();
        let root = vessel.add_root(PartInfo::new("pod")).unwrap();
        let a = vessel.add_child(root, PartInfo::new("a")).unwrap();
        vessel.destroy(a).unwrap();
        let b = vessel.add_child(root, PartInfo::new("b")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn reset_highlight_requires_a_default() {
        let mut vessel = Vessel::new();
        let root = vessel.add_root(PartInfo::new("pod")).unwrap();
        vessel.set_highlight_color(root, Color::RED);
        assert!(!vessel.reset_highlight(root));

        let mut vessel = Vessel::new().with_default_highlight(HighlightState::default());
        let root = vessel.add_root(PartInfo::new("pod")).unwrap();
        vessel.set_highlight_color(root, Color::RED);
        vessel.set_highlight_active(root, true);
        assert!(vessel.reset_highlight(root));
        assert_eq!(vessel.highlight_state(root), Some(HighlightState::default()));
    }
}
