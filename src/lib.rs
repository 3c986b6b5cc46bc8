//! JsInterop restriction checking for Java programs compiled to JavaScript.
//!
//! Build a [`Program`] from resolved types and members, then check it:
//!
//! ```
//! use jsinterop::prelude::*;
//!
//! let mut builder = ProgramBuilder::new();
//! let ty = builder.add_type(
//!     TypeEntry::class("Buggy", "EntryPoint.Buggy", "test")
//!         .with_js(JsTypeFlags::JS_TYPE)
//!         .at("test/EntryPoint.java", Span::line(5)),
//! );
//! builder
//!     .add_member(ty, MemberEntry::method("show", vec![], DataType::Void).at(Span::line(6)))
//!     .unwrap();
//! let program = builder.build().unwrap();
//!
//! let output = jsinterop::check(&program).unwrap();
//! assert!(output.is_success());
//! ```

mod logging;

pub use jsinterop_checker as checker;
pub use jsinterop_core as model;
pub use jsinterop_registry as registry;

pub use jsinterop_checker::{CheckOutput, CheckerConfig, JsInteropChecker};
pub use jsinterop_core::{CheckError, Diagnostic, Diagnostics, ModelError};
pub use jsinterop_registry::{Program, ProgramBuilder};
pub use logging::init_tracing;

/// Check a program with the default configuration.
pub fn check(program: &Program) -> Result<CheckOutput, CheckError> {
    JsInteropChecker::new(program).run()
}

/// Check a program with the given configuration.
pub fn check_with(program: &Program, config: CheckerConfig) -> Result<CheckOutput, CheckError> {
    JsInteropChecker::new(program).with_config(config).run()
}

pub mod prelude {
    pub use jsinterop_checker::{CheckOutput, CheckerConfig, JsInteropChecker};
    pub use jsinterop_core::{
        CallSite, CheckError, DataType, Diagnostic, DiagnosticCode, DiagnosticKind, Diagnostics,
        ExportKind, FieldInitializer, InstanceOfCheck, JsTypeFlags, MemberEntry, MemberId,
        MethodBody, Parameter, PrimitiveKind, Span, TypeEntry, TypeId, Visibility,
    };
    pub use jsinterop_registry::{Program, ProgramBuilder};
}
