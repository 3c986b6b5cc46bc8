//! Program registry for the JsInterop restriction checker.
//!
//! The front end feeds types and members into a [`ProgramBuilder`]; the
//! checker reads the resulting immutable [`Program`] and its [`Hierarchy`].

mod builder;
mod hierarchy;
mod program;

pub use builder::ProgramBuilder;
pub use hierarchy::{Hierarchy, InheritanceEdge};
pub use program::Program;
