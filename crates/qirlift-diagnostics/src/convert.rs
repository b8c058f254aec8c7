// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Conversions from phase error types into [`Diagnostic`].

use crate::Diagnostic;
use qirlift_ir::StructuralError;

/// Implemented by phase errors that know where in the program they
/// happened.
pub trait ToDiagnostic {
    fn to_diagnostic(&self) -> Diagnostic;
}

impl ToDiagnostic for StructuralError {
    fn to_diagnostic(&self) -> Diagnostic {
        let function = match self {
            StructuralError::EmptyFunction { function }
            | StructuralError::DuplicateBlockName { function, .. }
            | StructuralError::DuplicateDefinition { function, .. }
            | StructuralError::MissingTerminator { function, .. }
            | StructuralError::MisplacedPhi { function, .. }
            | StructuralError::PhiSourceMismatch { function, .. }
            | StructuralError::UnknownBranchTarget { function, .. } => function.clone(),
        };
        let diag = Diagnostic::error(function, self.to_string());
        match self {
            StructuralError::DuplicateBlockName { block, .. }
            | StructuralError::MissingTerminator { block, .. }
            | StructuralError::MisplacedPhi { block, .. }
            | StructuralError::PhiSourceMismatch { block, .. }
            | StructuralError::UnknownBranchTarget { block, .. } => diag.in_block(block.clone()),
            _ => diag,
        }
    }
}
