// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Typed program model for base-profile QIR.
//!
//! A read-only object graph over a fully parsed module: functions made of
//! basic blocks of SSA instructions, each block ending in exactly one
//! terminator. The loader collaborator builds the model once (via
//! [`FunctionBuilder`]); everything downstream only queries it.

mod builder;
mod display;
mod function;
mod instr;
mod module;
mod operand;
mod terminator;
mod types;
mod validate;

pub use builder::FunctionBuilder;
pub use function::{QirBlock, QirFunction, QirParameter};
pub use instr::{BinOp, CallKind, FloatPredicate, IntPredicate, QirInstr, QirInstrKind};
pub use module::QirModule;
pub use operand::{QirConst, QirOperand};
pub use terminator::QirTerminator;
pub use types::QirType;
pub use validate::{validate_function, StructuralError};

/// Callee-name prefix marking calls into the quantum instruction set.
pub const QIS_PREFIX: &str = "__quantum__qis__";
/// Callee-name prefix marking calls into the QIR runtime.
pub const RT_PREFIX: &str = "__quantum__rt__";
/// Callee-name prefix marking base-profile helper calls.
pub const QIR_PREFIX: &str = "__quantum__qir__";

/// Function attribute naming an executable entry point.
pub const ATTR_ENTRY_POINT: &str = "EntryPoint";
/// Function attribute marking interop-friendly signatures.
pub const ATTR_INTEROP_FRIENDLY: &str = "InteropFriendly";
/// Function attribute carrying the static qubit count (decimal).
pub const ATTR_REQUIRED_QUBITS: &str = "RequiredQubits";
/// Function attribute carrying the static result count (decimal).
pub const ATTR_REQUIRED_RESULTS: &str = "RequiredResults";
