//! Symmetry rules and symmetry graph mutations.
//!
//! Symmetry links are stored per part and are not transitive by themselves:
//! every operation here that rewrites them leaves each group fully and
//! mutually linked, with no part listing itself.
//!
//! - Queries: [`has_symmetry`], [`is_sibling`], [`find_symmetry_root`],
//!   [`symmetry_report`]
//! - Rules: [`has_breakable_symmetry`], [`is_deletable`]
//! - Mutations: [`delete`], [`break_symmetry`], [`create_symmetry`]

mod breakability;
mod mutation;
mod query;

pub use breakability::{BreakRule, Breakability, has_breakable_symmetry, is_deletable};
pub use mutation::{break_symmetry, create_symmetry, delete};
pub use query::{find_symmetry_root, has_symmetry, is_sibling, symmetry_report};
