//! Part data types.

use std::fmt;

use crate::highlight::HighlightState;

/// Stable, process-unique identifier of a part.
///
/// Ids are never reused within a [`Vessel`](super::Vessel), so a destroyed
/// part's id stays unknown for the rest of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PartId(pub u32);

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Editor category a part is listed under.
///
/// Parts with [`PartCategory::None`] are not shown in the editor's part
/// catalogue and make up the "hidden" view of the part list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PartCategory {
    None,
    Propulsion,
    Control,
    Structural,
    Aero,
    Utility,
    Science,
    #[default]
    Pods,
}

/// Catalogue information used to create a part.
#[derive(Debug, Clone, PartialEq)]
pub struct PartInfo {
    /// Internal part name.
    pub name: String,
    /// Display title.
    pub title: String,
    pub category: PartCategory,
}

impl PartInfo {
    /// Creates part info whose title equals its name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            title: name.clone(),
            name,
            category: PartCategory::default(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: PartCategory) -> Self {
        self.category = category;
        self
    }
}

/// A part of the vessel under construction.
///
/// Tree links are maintained by [`Vessel`](super::Vessel); symmetry links
/// are maintained by the [`symmetry`](crate::symmetry) operations and must
/// stay mutual (if A lists B, B lists A) and never self-referencing.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    uid: PartId,
    pub info: PartInfo,
    pub(crate) parent: Option<PartId>,
    pub(crate) children: Vec<PartId>,
    /// Parts symmetrical to this one.
    pub symmetry_counterparts: Vec<PartId>,
    /// `0` for the canonical symmetry root, otherwise the group cardinality.
    pub symmetry_mode: u32,
    /// Host-owned visual state.
    pub highlight: HighlightState,
}

impl Part {
    pub(crate) fn new(uid: PartId, info: PartInfo) -> Self {
        Self {
            uid,
            info,
            parent: None,
            children: Vec::new(),
            symmetry_counterparts: Vec::new(),
            symmetry_mode: 0,
            highlight: HighlightState::default(),
        }
    }

    pub fn uid(&self) -> PartId {
        self.uid
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn title(&self) -> &str {
        &self.info.title
    }

    pub fn parent(&self) -> Option<PartId> {
        self.parent
    }

    pub fn children(&self) -> &[PartId] {
        &self.children
    }

    pub fn has_symmetry(&self) -> bool {
        !self.symmetry_counterparts.is_empty()
    }
}
