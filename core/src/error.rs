//! Error types for part graph operations.

use thiserror::Error;

use crate::highlight::HighlightError;
use crate::vessel::PartId;

/// Errors raised by vessel and symmetry operations.
///
/// All of these are contract violations by the caller: the operation is
/// rejected before the part graph is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PartWizardError {
    #[error("unknown part {0}")]
    UnknownPart(PartId),
    #[error("part {0} has children and may not be deleted")]
    HasChildren(PartId),
    #[error("part {0} has no parent")]
    NoParent(PartId),
    #[error("part {part} is already attached to {parent}")]
    AlreadyAttached { part: PartId, parent: PartId },
    #[error("vessel already has root part {0}")]
    RootExists(PartId),
    #[error("cannot attach part {0} beneath itself")]
    CyclicAttachment(PartId),
    #[error("invalid symmetry group rooted at {root}: {reason}")]
    InvalidSymmetryGroup { root: PartId, reason: String },
    #[error(transparent)]
    Highlight(#[from] HighlightError),
}

/// Result type for vessel and symmetry operations.
pub type PartWizardResult<T = ()> = Result<T, PartWizardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            PartWizardError::UnknownPart(PartId(7)).to_string(),
            "unknown part #7"
        );
        assert_eq!(
            PartWizardError::HasChildren(PartId(2)).to_string(),
            "part #2 has children and may not be deleted"
        );
        assert_eq!(
            PartWizardError::InvalidSymmetryGroup {
                root: PartId(1),
                reason: "duplicate counterpart #3".into(),
            }
            .to_string(),
            "invalid symmetry group rooted at #1: duplicate counterpart #3"
        );
    }

    #[test]
    fn highlight_errors_convert() {
        let err: PartWizardError = HighlightError::AlreadyTracking.into();
        assert_eq!(err, PartWizardError::Highlight(HighlightError::AlreadyTracking));
    }
}
