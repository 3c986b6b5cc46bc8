//! Checker passes.
//!
//! - [`collision`]: JavaScript name clashes, constructor export and rename consistency
//! - [`property`]: property accessor shape, pairing and access
//! - [`structural`]: per-kind contracts for JsFunctions, native types and overlays
//! - [`usability`]: advisory warnings for types JavaScript cannot hold

pub mod collision;
pub mod property;
pub mod structural;
pub mod usability;

pub use collision::CollisionPass;
pub use property::PropertyValidator;
pub use structural::{StructuralKind, StructuralRuleEngine};
pub use usability::UsabilityAnalyzer;
