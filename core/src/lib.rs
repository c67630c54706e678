//! # PartWizard Core
//!
//! Editing logic for symmetrical vessel parts, independent of any UI.
//!
//! - [`vessel`]: arena-backed part tree and the host service traits
//! - [`symmetry`]: deletability / breakability rules and the graph mutations
//!   that break or rebuild symmetry groups
//! - [`part_group`]: transient part groups used while regrouping symmetry
//! - [`highlight`]: per-frame highlight transactions with original-state restore

mod invariant;

pub mod error;
pub mod highlight;
pub mod part_group;
pub mod symmetry;
pub mod vessel;

pub use error::{PartWizardError, PartWizardResult};

/// Core library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
