//! Deletability and breakability rules.
//!
//! A symmetrical part can have its symmetry broken only when breaking can
//! cascade cleanly through its subtree and every counterpart agrees on the
//! outcome. The rules are checked in a fixed order and the first failing one
//! is reported:
//!
//! 1. The part must be symmetrical.
//! 2. No counterpart may be a descendant of the part; breaking would walk a
//!    cycle. This happens when a counterpart (or one of its children) was
//!    made the vessel root.
//! 3. No counterpart may be an ancestor of the part; counterparts would then
//!    disagree about breakability.
//! 4. The part must have a parent. The root's children include unrelated
//!    parts of the vessel, so symmetry cannot be decided from parentage.
//! 5. Every child must be asymmetrical or itself breakable.
//! 6. Every counterpart must have a parent.

use std::fmt;

use crate::error::PartWizardResult;
use crate::vessel::{PartId, Vessel};

/// The rule that made a part's symmetry unbreakable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakRule {
    NotSymmetrical,
    DescendantCounterpart { counterpart: PartId },
    AncestralCounterpart { counterpart: PartId },
    NoParent,
    ChildNotBreakable { child: PartId },
    CounterpartHasNoParent { counterpart: PartId },
}

/// Outcome of [`has_breakable_symmetry`], with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakability {
    part: PartId,
    rule: Option<BreakRule>,
    message: String,
}

impl Breakability {
    fn breakable(part: PartId, name: &str) -> Self {
        Self {
            part,
            rule: None,
            message: format!("{name} has breakable symmetry"),
        }
    }

    fn refused(vessel: &Vessel, part: PartId, rule: BreakRule) -> PartWizardResult<Self> {
        let name = vessel.part(part)?.name();
        let other = |id: PartId| vessel.part(id).map(|p| p.name().to_owned());
        let message = match rule {
            BreakRule::NotSymmetrical => format!("{name} not breakable: part is not symmetrical"),
            BreakRule::DescendantCounterpart { counterpart } => format!(
                "{name} not breakable: counterpart {} is a descendant",
                other(counterpart)?
            ),
            BreakRule::AncestralCounterpart { counterpart } => format!(
                "{name} not breakable: counterpart {} is an ancestor",
                other(counterpart)?
            ),
            BreakRule::NoParent => format!("{name} not breakable: part has no parent"),
            BreakRule::ChildNotBreakable { child } => format!(
                "{name} not breakable: child {} is not breakable",
                other(child)?
            ),
            BreakRule::CounterpartHasNoParent { counterpart } => format!(
                "{name} not breakable: counterpart {} has no parent",
                other(counterpart)?
            ),
        };
        Ok(Self {
            part,
            rule: Some(rule),
            message,
        })
    }

    pub fn part(&self) -> PartId {
        self.part
    }

    pub fn is_breakable(&self) -> bool {
        self.rule.is_none()
    }

    /// The failed rule, or `None` when breakable.
    pub fn rule(&self) -> Option<BreakRule> {
        self.rule
    }

    /// Tooltip / status text describing the outcome.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Breakability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Decides whether `part`'s symmetry can be broken.
///
/// Rules are checked in order and the first failure is reported. The
/// ancestor check walks the whole parent chain including the vessel root,
/// so a counterpart that is the root is reported as an ancestor rather than
/// as a counterpart without a parent.
pub fn has_breakable_symmetry(vessel: &Vessel, part: PartId) -> PartWizardResult<Breakability> {
    let node = vessel.part(part)?;

    let rule = if !node.has_symmetry() {
        Some(BreakRule::NotSymmetrical)
    } else if let Some(&counterpart) = node
        .symmetry_counterparts
        .iter()
        .find(|&&c| vessel.is_descendant(part, c))
    {
        Some(BreakRule::DescendantCounterpart { counterpart })
    } else if let Some(&counterpart) = node
        .symmetry_counterparts
        .iter()
        .find(|&&c| vessel.is_ancestor(part, c))
    {
        Some(BreakRule::AncestralCounterpart { counterpart })
    } else if node.parent().is_none() {
        Some(BreakRule::NoParent)
    } else {
        match first_unbreakable_child(vessel, part)? {
            Some(child) => Some(BreakRule::ChildNotBreakable { child }),
            None => first_orphan_counterpart(vessel, part)?
                .map(|counterpart| BreakRule::CounterpartHasNoParent { counterpart }),
        }
    };

    match rule {
        None => Ok(Breakability::breakable(part, node.name())),
        Some(rule) => Breakability::refused(vessel, part, rule),
    }
}

fn first_unbreakable_child(vessel: &Vessel, part: PartId) -> PartWizardResult<Option<PartId>> {
    for &child in vessel.part(part)?.children() {
        if vessel.part(child)?.has_symmetry() && !has_breakable_symmetry(vessel, child)?.is_breakable()
        {
            return Ok(Some(child));
        }
    }
    Ok(None)
}

fn first_orphan_counterpart(vessel: &Vessel, part: PartId) -> PartWizardResult<Option<PartId>> {
    for &counterpart in &vessel.part(part)?.symmetry_counterparts {
        if vessel.part(counterpart)?.parent().is_none() {
            return Ok(Some(counterpart));
        }
    }
    Ok(None)
}

/// Decides whether `part` may be deleted: it must have a parent, no
/// children, and either no symmetry or breakable symmetry.
pub fn is_deletable(vessel: &Vessel, part: PartId) -> PartWizardResult<bool> {
    let node = vessel.part(part)?;
    if node.parent().is_none() || !node.children().is_empty() {
        return Ok(false);
    }
    if !node.has_symmetry() {
        return Ok(true);
    }
    Ok(has_breakable_symmetry(vessel, part)?.is_breakable())
}
