// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Dispatch generation: one function to one statement sequence.
//!
//! The block-id table is a per-invocation value, never process state; a
//! forward branch and the block's own case label always agree because
//! they share the same table.

use log::warn;

use qirlift_diagnostics::{Diagnostic, ToDiagnostic};
use qirlift_ir::{
    BinOp, IntPredicate, QirBlock, QirFunction, QirInstr, QirInstrKind, QirModule, QirOperand,
    QirTerminator, QirType,
};

use crate::intrinsics;
use crate::stmt::{BlockId, ExprOp, LowExpr, LowStmt, Place};

/// Name → id bijection built lazily in first-encountered order.
#[derive(Debug, Clone, Default)]
pub struct BlockIdTable {
    names: Vec<String>,
}

impl BlockIdTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Existing id for a seen name, next sequential id otherwise.
    pub fn id(&mut self, name: &str) -> BlockId {
        match self.names.iter().position(|n| n == name) {
            Some(idx) => BlockId(idx as u32),
            None => {
                self.names.push(name.to_string());
                BlockId((self.names.len() - 1) as u32)
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<BlockId> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| BlockId(idx as u32))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// (name, id) pairs in id order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, BlockId)> {
        self.names
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.as_str(), BlockId(idx as u32)))
    }
}

/// A recognized construct the dispatch table refuses to translate.
/// Guessing a translation would miscompile, so the affected function's
/// lowering is abandoned instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unsupported construct in function '{function}', block '{block}': {construct}")]
pub struct LowerError {
    pub function: String,
    pub block: String,
    pub construct: String,
}

impl LowerError {
    pub(crate) fn new(func: &QirFunction, block: &QirBlock, construct: impl ToString) -> Self {
        LowerError {
            function: func.name.clone(),
            block: block.name.clone(),
            construct: construct.to_string(),
        }
    }
}

impl ToDiagnostic for LowerError {
    fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.function.clone(), "unsupported construct, function skipped")
            .in_block(self.block.clone())
            .with_construct(&self.construct)
    }
}

/// The lowering of one function.
#[derive(Debug, Clone)]
pub struct FunctionLowering {
    pub function: String,
    pub statements: Vec<LowStmt>,
    pub block_ids: BlockIdTable,
}

/// Lowerings of every function that survived, plus everything reported
/// along the way.
#[derive(Debug, Clone, Default)]
pub struct ModuleLowering {
    pub functions: Vec<FunctionLowering>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Lower every function in the module. An unsupported construct abandons
/// only the affected function; siblings still lower.
pub fn lower_module(module: &QirModule) -> ModuleLowering {
    let mut out = ModuleLowering::default();
    for func in &module.functions {
        match lower_function(module, func, &mut out.diagnostics) {
            Ok(lowered) => out.functions.push(lowered),
            Err(err) => {
                warn!("abandoning lowering of '{}': {}", func.name, err);
                out.diagnostics.push(err.to_diagnostic());
            }
        }
    }
    out
}

/// Lower one function to its dispatch statement sequence.
///
/// Dropped-call warnings are appended to `diagnostics`; a hard
/// unsupported construct returns `Err` and nothing is emitted for the
/// function.
pub fn lower_function(
    module: &QirModule,
    func: &QirFunction,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<FunctionLowering, LowerError> {
    let mut table = BlockIdTable::new();
    let mut statements = Vec::new();

    for block in &func.blocks {
        let id = table.id(&block.name);
        statements.push(LowStmt::Case { id });
        // Keeps the case legal even when nothing else is emitted for it.
        statements.push(LowStmt::Nop);

        for phi in block.phi_nodes() {
            lower_phi(func, block, phi, &mut table, &mut statements)?;
        }
        for instr in block.body() {
            lower_instr(module, func, block, instr, &mut table, diagnostics, &mut statements)?;
        }
        lower_terminator(func, block, &mut table, &mut statements)?;
        statements.push(LowStmt::Break);
    }

    Ok(FunctionLowering {
        function: func.name.clone(),
        statements,
        block_ids: table,
    })
}

/// Pointer-typed values get the indirection marker; qubit and result
/// pointers do not, their identity is nominal in the target model.
pub(crate) fn needs_indirection(ty: &QirType) -> bool {
    ty.is_pointer() && !ty.is_qubit() && !ty.is_result()
}

pub(crate) fn resolve_operand(op: &QirOperand) -> LowExpr {
    use qirlift_ir::QirConst;
    match op {
        QirOperand::Local { name, .. } => LowExpr::Local(name.clone()),
        QirOperand::Constant(c) => match c {
            QirConst::Int { value, .. } => LowExpr::Int(*value as i64),
            QirConst::Double(v) => LowExpr::Double(*v),
            QirConst::Null => LowExpr::Null,
            QirConst::Qubit(id) => LowExpr::QubitHandle(*id),
            QirConst::Result(id) => LowExpr::ResultSlot(*id),
        },
    }
}

/// `v = (prev == id(src_0)) ? val_0 : ... : val_last` — the final pair
/// is the unconditioned default. Evaluated at case entry, before any
/// branch updates `previous_block_id` again.
fn lower_phi(
    func: &QirFunction,
    block: &QirBlock,
    phi: &QirInstr,
    table: &mut BlockIdTable,
    out: &mut Vec<LowStmt>,
) -> Result<(), LowerError> {
    let QirInstrKind::Phi { incoming } = &phi.kind else {
        return Ok(());
    };
    let Some(output) = &phi.output else {
        return Ok(());
    };
    let Some((last, rest)) = incoming.split_last() else {
        return Err(LowerError::new(func, block, &phi.kind));
    };

    let mut value = resolve_operand(&last.0);
    for (operand, source) in rest.iter().rev() {
        let source_id = table.id(source);
        value = LowExpr::ternary(
            LowExpr::previous_is(source_id),
            resolve_operand(operand),
            value,
        );
    }
    out.push(LowStmt::Assign {
        dst: Place::Local(output.clone()),
        pointer: needs_indirection(&phi.ty),
        value,
    });
    Ok(())
}

fn binop_operator(op: BinOp) -> Option<ExprOp> {
    match op {
        BinOp::Add | BinOp::FAdd => Some(ExprOp::Add),
        BinOp::Sub | BinOp::FSub => Some(ExprOp::Sub),
        BinOp::Mul | BinOp::FMul => Some(ExprOp::Mul),
        BinOp::UDiv | BinOp::SDiv | BinOp::FDiv => Some(ExprOp::Div),
        BinOp::URem | BinOp::SRem => Some(ExprOp::Rem),
        BinOp::And => Some(ExprOp::And),
        BinOp::Or => Some(ExprOp::Or),
        BinOp::Xor => Some(ExprOp::Xor),
        BinOp::Shl => Some(ExprOp::Shl),
        BinOp::LShr | BinOp::AShr => Some(ExprOp::Shr),
        // No target-neutral float remainder.
        BinOp::FRem => None,
    }
}

fn icmp_operator(pred: IntPredicate) -> Option<ExprOp> {
    match pred {
        IntPredicate::Eq => Some(ExprOp::Eq),
        IntPredicate::Ne => Some(ExprOp::Ne),
        IntPredicate::Sgt => Some(ExprOp::Gt),
        IntPredicate::Sge => Some(ExprOp::Ge),
        IntPredicate::Slt => Some(ExprOp::Lt),
        IntPredicate::Sle => Some(ExprOp::Le),
        // Unsigned comparison semantics are not established for the
        // target model.
        IntPredicate::Ugt | IntPredicate::Uge | IntPredicate::Ult | IntPredicate::Ule => None,
    }
}

fn lower_instr(
    module: &QirModule,
    func: &QirFunction,
    block: &QirBlock,
    instr: &QirInstr,
    table: &mut BlockIdTable,
    diagnostics: &mut Vec<Diagnostic>,
    out: &mut Vec<LowStmt>,
) -> Result<(), LowerError> {
    match &instr.kind {
        QirInstrKind::BinOp { op, lhs, rhs } => {
            let Some(operator) = binop_operator(*op) else {
                return Err(LowerError::new(func, block, instr));
            };
            if let Some(output) = &instr.output {
                out.push(LowStmt::Assign {
                    dst: Place::Local(output.clone()),
                    pointer: false,
                    value: LowExpr::binary(operator, resolve_operand(lhs), resolve_operand(rhs)),
                });
            }
            Ok(())
        }
        QirInstrKind::ICmp { pred, lhs, rhs } => {
            let Some(operator) = icmp_operator(*pred) else {
                return Err(LowerError::new(func, block, instr));
            };
            if let Some(output) = &instr.output {
                out.push(LowStmt::Assign {
                    dst: Place::Local(output.clone()),
                    pointer: false,
                    value: LowExpr::bool_of(LowExpr::binary(
                        operator,
                        resolve_operand(lhs),
                        resolve_operand(rhs),
                    )),
                });
            }
            Ok(())
        }
        QirInstrKind::FCmp { .. } | QirInstrKind::FNeg { .. } => {
            Err(LowerError::new(func, block, instr))
        }
        QirInstrKind::Phi { .. } => lower_phi(func, block, instr, table, out),
        QirInstrKind::Select { cond, true_value, false_value } => {
            if let Some(output) = &instr.output {
                out.push(LowStmt::Assign {
                    dst: Place::Local(output.clone()),
                    pointer: needs_indirection(&instr.ty),
                    value: LowExpr::ternary(
                        resolve_operand(cond),
                        resolve_operand(true_value),
                        resolve_operand(false_value),
                    ),
                });
            }
            Ok(())
        }
        QirInstrKind::Alloca { allocated_ty } => {
            if let Some(output) = &instr.output {
                out.push(LowStmt::Declare {
                    name: output.clone(),
                    pointer: needs_indirection(allocated_ty),
                });
            }
            Ok(())
        }
        QirInstrKind::Load { ptr } => {
            if let Some(output) = &instr.output {
                out.push(LowStmt::Assign {
                    dst: Place::Local(output.clone()),
                    pointer: needs_indirection(&instr.ty),
                    value: resolve_operand(ptr),
                });
            }
            Ok(())
        }
        QirInstrKind::Store { value, ptr } => {
            // The pointed-to cell and the handle are identified; alias
            // chains were already materialized by bitcast lowering.
            let Some(dst) = ptr.local_name() else {
                return Err(LowerError::new(func, block, instr));
            };
            out.push(LowStmt::Assign {
                dst: Place::Local(dst.to_string()),
                pointer: false,
                value: resolve_operand(value),
            });
            Ok(())
        }
        QirInstrKind::BitCast { value } => {
            if let Some(output) = &instr.output {
                out.push(LowStmt::Assign {
                    dst: Place::Local(output.clone()),
                    pointer: needs_indirection(&instr.ty),
                    value: resolve_operand(value),
                });
            }
            Ok(())
        }
        QirInstrKind::Call { callee, args, .. } => {
            intrinsics::lower_call(module, func, block, instr, callee, args, diagnostics, out)
        }
    }
}

fn lower_terminator(
    func: &QirFunction,
    block: &QirBlock,
    table: &mut BlockIdTable,
    out: &mut Vec<LowStmt>,
) -> Result<(), LowerError> {
    match &block.terminator {
        QirTerminator::Br { dest } => {
            let target = table.id(dest);
            out.push(LowStmt::Branch { target });
            Ok(())
        }
        QirTerminator::CondBr { cond, true_dest, false_dest } => {
            let true_target = table.id(true_dest);
            let false_target = table.id(false_dest);
            out.push(LowStmt::CondBranch {
                cond: resolve_operand(cond),
                true_target,
                false_target,
            });
            Ok(())
        }
        QirTerminator::Ret { operand } => {
            out.push(LowStmt::Return {
                value: operand.as_ref().map(resolve_operand),
                pointer: operand
                    .as_ref()
                    .map(|op| needs_indirection(&op.ty()))
                    .unwrap_or(false),
            });
            Ok(())
        }
        // No established translation; guessing would miscompile.
        term @ (QirTerminator::Switch { .. } | QirTerminator::Unreachable) => {
            Err(LowerError::new(func, block, term))
        }
    }
}
