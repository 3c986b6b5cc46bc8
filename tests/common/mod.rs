//! Shared fixture builder for the integration tests.
//!
//! Fixtures mirror a single `test/EntryPoint.java` compilation unit: every
//! type is nested in `EntryPoint`, lives in package `test`, and carries an
//! explicit line number so expected messages can be written as they appear
//! in compiler output.

#![allow(dead_code)]

use jsinterop::prelude::*;

pub const FILE: &str = "test/EntryPoint.java";

/// Builds a program one declaration at a time.
#[derive(Default)]
pub struct EntryPoint {
    builder: ProgramBuilder,
}

impl EntryPoint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: TypeEntry) -> TypeId {
        self.builder.add_type(entry)
    }

    pub fn member(&mut self, ty: TypeId, entry: MemberEntry) -> MemberId {
        self.builder
            .add_member(ty, entry)
            .unwrap_or_else(|e| panic!("fixture member rejected: {e}"))
    }

    pub fn delegate(&mut self, ctor: MemberId, target: MemberId) {
        self.builder
            .set_delegation(ctor, target)
            .unwrap_or_else(|e| panic!("fixture delegation rejected: {e}"));
    }

    pub fn build(self) -> Program {
        self.builder
            .build()
            .unwrap_or_else(|e| panic!("fixture program rejected: {e}"))
    }
}

pub fn class(name: &str, line: u32) -> TypeEntry {
    TypeEntry::class(name, format!("EntryPoint.{name}"), "test").at(FILE, Span::line(line))
}

pub fn interface(name: &str, line: u32) -> TypeEntry {
    TypeEntry::interface(name, format!("EntryPoint.{name}"), "test").at(FILE, Span::line(line))
}

pub fn js_type(name: &str, line: u32) -> TypeEntry {
    class(name, line).with_js(JsTypeFlags::JS_TYPE)
}

pub fn js_interface(name: &str, line: u32) -> TypeEntry {
    interface(name, line).with_js(JsTypeFlags::JS_TYPE)
}

/// `void name(params)` at `line`.
pub fn method(name: &str, params: Vec<Parameter>, line: u32) -> MemberEntry {
    MemberEntry::method(name, params, DataType::Void).at(Span::line(line))
}

pub fn returning(name: &str, ret: DataType, line: u32) -> MemberEntry {
    MemberEntry::method(name, vec![], ret).at(Span::line(line))
}

pub fn field(name: &str, ty: DataType, line: u32) -> MemberEntry {
    MemberEntry::field(name, ty).at(Span::line(line))
}

pub fn ctor(owner: &str, params: Vec<Parameter>, line: u32) -> MemberEntry {
    MemberEntry::constructor(format!("EntryPoint${owner}"), params).at(Span::line(line))
}

pub fn param(name: &str, ty: DataType) -> Parameter {
    Parameter::new(name, ty)
}

/// Run the checker and return its output grouped the way the compiler
/// prints it.
pub fn report(program: &Program) -> Vec<String> {
    report_with(program, CheckerConfig::default())
}

pub fn report_with(program: &Program, config: CheckerConfig) -> Vec<String> {
    let output = jsinterop::check_with(program, config).expect("check failed");
    grouped(&output.diagnostics)
}

pub fn grouped(diagnostics: &Diagnostics) -> Vec<String> {
    let mut buffer = Vec::new();
    diagnostics
        .emit_grouped(&mut buffer)
        .expect("writing to a Vec cannot fail");
    String::from_utf8(buffer)
        .expect("diagnostics are UTF-8")
        .lines()
        .map(str::to_string)
        .collect()
}

/// Assert the program fails with exactly `errors`. Warnings are ignored.
pub fn assert_fails(program: &Program, errors: &[&str]) {
    assert!(!errors.is_empty());
    let output = jsinterop::check(program).expect("check failed");
    assert!(!output.is_success());
    let mut only_errors = Diagnostics::new();
    for diagnostic in output.errors() {
        only_errors.push(diagnostic.clone());
    }
    let mut expected = vec![format!("Errors in {FILE}")];
    expected.extend(errors.iter().map(|e| format!("  {e}")));
    assert_eq!(grouped(&only_errors), expected);
}

/// Assert the program passes, with exactly `warnings`.
pub fn assert_succeeds(program: &Program, warnings: &[&str]) {
    let output = jsinterop::check(program).expect("check failed");
    assert!(output.is_success(), "unexpected errors: {:?}", grouped(&output.diagnostics));
    let mut expected = Vec::new();
    if !warnings.is_empty() {
        expected.push(format!("Warnings in {FILE}"));
        expected.extend(warnings.iter().map(|w| format!("  {w}")));
    }
    assert_eq!(grouped(&output.diagnostics), expected);
}
