// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! qirlift diagnostics.
//!
//! Structured reports for everything the pipeline refuses to do:
//! structural violations, unsupported constructs, unclassified calls.
//! Each diagnostic is a (function, block, construct, reason) value, so a
//! consumer can decide whether to fail a whole generation or only skip
//! the affected function. Free text never carries the decision.

pub mod convert;
pub mod formatter;
pub mod json;

use serde::Serialize;

pub use convert::ToDiagnostic;

/// One structured report tied to a place in the program.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Function the report is about.
    pub function: String,
    /// Block within the function, when the report is that precise.
    pub block: Option<String>,
    /// Rendered instruction/terminator descriptor.
    pub construct: Option<String>,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The affected function cannot be processed further.
    Error,
    /// Something was dropped; the function still lowers.
    Warning,
}

impl Diagnostic {
    pub fn error(function: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(Severity::Error, function, reason)
    }

    pub fn warning(function: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::new(Severity::Warning, function, reason)
    }

    fn new(severity: Severity, function: impl Into<String>, reason: impl Into<String>) -> Self {
        Diagnostic {
            severity,
            function: function.into(),
            block: None,
            construct: None,
            reason: reason.into(),
        }
    }

    pub fn in_block(mut self, block: impl Into<String>) -> Self {
        self.block = Some(block.into());
        self
    }

    pub fn with_construct(mut self, construct: impl ToString) -> Self {
        self.construct = Some(construct.to_string());
        self
    }
}
