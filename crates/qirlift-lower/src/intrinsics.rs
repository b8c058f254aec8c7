// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Call-site translation.
//!
//! Runtime and instruction-set callees are matched by full name and
//! rewritten into statement shapes; reference-count bookkeeping
//! disappears entirely. A generic call that names a module function
//! stays a call. Anything else is dropped with a warning so the rest of
//! the function still lowers.

use log::debug;

use qirlift_diagnostics::Diagnostic;
use qirlift_ir::{QirBlock, QirConst, QirFunction, QirInstr, QirModule, QirOperand};

use crate::generate::{needs_indirection, resolve_operand, LowerError};
use crate::stmt::{ExprOp, LowExpr, LowStmt, Place};

const QUBIT_ALLOCATE: &str = "__quantum__rt__qubit_allocate";
const ARRAY_CREATE_1D: &str = "__quantum__rt__array_create_1d";
const ARRAY_GET_ELEMENT_PTR_1D: &str = "__quantum__rt__array_get_element_ptr_1d";
const ARRAY_COPY: &str = "__quantum__rt__array_copy";
const RESULT_GET_ONE: &str = "__quantum__rt__result_get_one";
const RESULT_GET_ZERO: &str = "__quantum__rt__result_get_zero";
const RESULT_EQUAL: &str = "__quantum__rt__result_equal";
const READ_RESULT: &str = "__quantum__qir__read_result";

/// Bookkeeping calls with no observable effect in the generated code.
const DISCARDED: &[&str] = &[
    "__quantum__rt__qubit_release",
    "__quantum__rt__array_unreference",
    "__quantum__rt__array_update_reference_count",
    "__quantum__rt__array_update_alias_count",
    "__quantum__rt__result_update_reference_count",
    "__quantum__rt__result_unreference",
];

/// Measurement entry points; all collapse to a stochastic bit.
const MEASUREMENTS: &[&str] = &[
    "__quantum__qis__measure",
    "__quantum__qis__m__body",
    "__quantum__qis__mz__body",
    "__quantum__qis__measure__body",
];

pub(crate) fn lower_call(
    module: &QirModule,
    func: &QirFunction,
    block: &QirBlock,
    instr: &QirInstr,
    callee: &str,
    args: &[QirOperand],
    diagnostics: &mut Vec<Diagnostic>,
    out: &mut Vec<LowStmt>,
) -> Result<(), LowerError> {
    if DISCARDED.contains(&callee) {
        return Ok(());
    }
    if MEASUREMENTS.contains(&callee) {
        return lower_measurement(func, block, instr, args, diagnostics, out);
    }

    match callee {
        QUBIT_ALLOCATE => {
            if let Some(output) = &instr.output {
                out.push(LowStmt::DeclareQubit { name: output.clone() });
            }
            Ok(())
        }
        ARRAY_CREATE_1D => {
            let Some(output) = &instr.output else {
                return Ok(());
            };
            // Second argument is the element count; a run-time length has
            // no statically sized backing store.
            let Some(count) = args.get(1).and_then(const_u64) else {
                return Err(LowerError::new(func, block, instr));
            };
            out.push(LowStmt::DeclareArray { name: output.clone(), count });
            Ok(())
        }
        ARRAY_GET_ELEMENT_PTR_1D => {
            let Some(output) = &instr.output else {
                return Ok(());
            };
            let Some(base) = args.first().and_then(|a| a.local_name()) else {
                return Err(LowerError::new(func, block, instr));
            };
            let Some(index) = args.get(1) else {
                return Err(LowerError::new(func, block, instr));
            };
            out.push(LowStmt::Assign {
                dst: Place::Local(output.clone()),
                pointer: true,
                value: LowExpr::ElemPtr {
                    base: base.to_string(),
                    index: Box::new(resolve_operand(index)),
                },
            });
            Ok(())
        }
        // A copied array aliases its source; element storage is shared.
        ARRAY_COPY => {
            let Some(output) = &instr.output else {
                return Ok(());
            };
            let Some(source) = args.first() else {
                return Err(LowerError::new(func, block, instr));
            };
            out.push(LowStmt::Assign {
                dst: Place::Local(output.clone()),
                pointer: true,
                value: resolve_operand(source),
            });
            Ok(())
        }
        RESULT_GET_ONE | RESULT_GET_ZERO => {
            if let Some(output) = &instr.output {
                let value = if callee == RESULT_GET_ONE { 1 } else { 0 };
                out.push(LowStmt::Assign {
                    dst: Place::Local(output.clone()),
                    pointer: false,
                    value: LowExpr::Int(value),
                });
            }
            Ok(())
        }
        RESULT_EQUAL => {
            let Some(output) = &instr.output else {
                return Ok(());
            };
            let (Some(lhs), Some(rhs)) = (args.first(), args.get(1)) else {
                return Err(LowerError::new(func, block, instr));
            };
            out.push(LowStmt::Assign {
                dst: Place::Local(output.clone()),
                pointer: false,
                value: LowExpr::bool_of(LowExpr::binary(
                    ExprOp::Eq,
                    resolve_operand(lhs),
                    resolve_operand(rhs),
                )),
            });
            Ok(())
        }
        READ_RESULT => {
            let Some(output) = &instr.output else {
                return Ok(());
            };
            let Some(slot) = args.first() else {
                return Err(LowerError::new(func, block, instr));
            };
            out.push(LowStmt::Assign {
                dst: Place::Local(output.clone()),
                pointer: false,
                value: resolve_operand(slot),
            });
            Ok(())
        }
        _ if module.func_by_name(callee).is_some() => {
            out.push(LowStmt::Call {
                dst: instr.output.clone().map(Place::Local),
                callee: callee.to_string(),
                args: args.iter().map(resolve_operand).collect(),
            });
            Ok(())
        }
        _ => {
            debug!("dropping unclassified call to '{}' in '{}'", callee, func.name);
            diagnostics.push(
                Diagnostic::warning(func.name.clone(), "unclassified call dropped")
                    .in_block(block.name.clone())
                    .with_construct(instr),
            );
            Ok(())
        }
    }
}

/// Measurement writes a stochastic bit either into the call's output
/// local or, for the in-place form, into the static result slot named
/// by a constant argument.
fn lower_measurement(
    func: &QirFunction,
    block: &QirBlock,
    instr: &QirInstr,
    args: &[QirOperand],
    diagnostics: &mut Vec<Diagnostic>,
    out: &mut Vec<LowStmt>,
) -> Result<(), LowerError> {
    let dst = if let Some(output) = &instr.output {
        Some(Place::Local(output.clone()))
    } else {
        args.iter().find_map(|arg| match arg {
            QirOperand::Constant(QirConst::Result(id)) => Some(Place::ResultSlot(*id)),
            _ => None,
        })
    };
    let Some(dst) = dst else {
        diagnostics.push(
            Diagnostic::warning(func.name.clone(), "measurement without a destination dropped")
                .in_block(block.name.clone())
                .with_construct(instr),
        );
        return Ok(());
    };
    let pointer = instr
        .output
        .as_ref()
        .map(|_| needs_indirection(&instr.ty))
        .unwrap_or(false);
    out.push(LowStmt::Assign { dst, pointer, value: LowExpr::MeasuredBit });
    Ok(())
}

fn const_u64(op: &QirOperand) -> Option<u64> {
    match op {
        QirOperand::Constant(QirConst::Int { value, .. }) => Some(*value),
        _ => None,
    }
}
