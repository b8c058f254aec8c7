// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! SSA instructions.

use crate::{QirOperand, QirType, QIR_PREFIX, QIS_PREFIX, RT_PREFIX};

/// A single non-terminator instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct QirInstr {
    /// Name of the SSA value this instruction defines, or `None` if it
    /// produces no value (void calls, stores).
    pub output: Option<String>,
    /// Result type; `Void` when there is no output.
    pub ty: QirType,
    pub kind: QirInstrKind,
}

/// Instruction payload, one variant per opcode family.
#[derive(Debug, Clone, PartialEq)]
pub enum QirInstrKind {
    BinOp {
        op: BinOp,
        lhs: QirOperand,
        rhs: QirOperand,
    },
    FNeg {
        operand: QirOperand,
    },
    ICmp {
        pred: IntPredicate,
        lhs: QirOperand,
        rhs: QirOperand,
    },
    FCmp {
        pred: FloatPredicate,
        lhs: QirOperand,
        rhs: QirOperand,
    },
    /// Value selection keyed on the predecessor block. Phi nodes always
    /// precede every other instruction in their block.
    Phi {
        incoming: Vec<(QirOperand, String)>,
    },
    Select {
        cond: QirOperand,
        true_value: QirOperand,
        false_value: QirOperand,
    },
    Alloca {
        allocated_ty: QirType,
    },
    Load {
        ptr: QirOperand,
    },
    Store {
        value: QirOperand,
        ptr: QirOperand,
    },
    BitCast {
        value: QirOperand,
    },
    Call {
        callee: String,
        kind: CallKind,
        args: Vec<QirOperand>,
    },
}

/// Binary opcodes, integer then float.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    UDiv,
    SDiv,
    URem,
    SRem,
    And,
    Or,
    Xor,
    Shl,
    LShr,
    AShr,
    FAdd,
    FSub,
    FMul,
    FDiv,
    FRem,
}

/// `icmp` predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntPredicate {
    Eq,
    Ne,
    Ugt,
    Uge,
    Ult,
    Ule,
    Sgt,
    Sge,
    Slt,
    Sle,
}

/// `fcmp` predicates, ordered and unordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatPredicate {
    False,
    Oeq,
    Ogt,
    Oge,
    Olt,
    Ole,
    One,
    Ord,
    Uno,
    Ueq,
    Ugt,
    Uge,
    Ult,
    Ule,
    Une,
    True,
}

/// Call-site classification, decided by callee-name prefix alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// `__quantum__qis__*` — quantum instruction set.
    QuantumIntrinsic,
    /// `__quantum__rt__*` — runtime library.
    Runtime,
    /// `__quantum__qir__*` — base-profile helpers.
    BaseProfile,
    /// Everything else, including calls between module functions.
    Generic,
}

impl CallKind {
    /// Classify a callee name. Deterministic: prefix match only, never
    /// position or arity.
    pub fn classify(callee: &str) -> CallKind {
        if callee.starts_with(QIS_PREFIX) {
            CallKind::QuantumIntrinsic
        } else if callee.starts_with(RT_PREFIX) {
            CallKind::Runtime
        } else if callee.starts_with(QIR_PREFIX) {
            CallKind::BaseProfile
        } else {
            CallKind::Generic
        }
    }
}

impl QirInstr {
    /// Convenience constructor that classifies the callee eagerly.
    pub fn call(
        output: Option<String>,
        ty: QirType,
        callee: impl Into<String>,
        args: Vec<QirOperand>,
    ) -> Self {
        let callee = callee.into();
        let kind = CallKind::classify(&callee);
        QirInstr {
            output,
            ty,
            kind: QirInstrKind::Call { callee, kind, args },
        }
    }

    pub fn is_phi(&self) -> bool {
        matches!(self.kind, QirInstrKind::Phi { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_is_prefix_only() {
        assert_eq!(
            CallKind::classify("__quantum__qis__mz__body"),
            CallKind::QuantumIntrinsic
        );
        assert_eq!(
            CallKind::classify("__quantum__rt__qubit_allocate"),
            CallKind::Runtime
        );
        assert_eq!(
            CallKind::classify("__quantum__qir__read_result"),
            CallKind::BaseProfile
        );
        assert_eq!(CallKind::classify("Qrng__RandomBit__body"), CallKind::Generic);
        // Prefix must be at the start.
        assert_eq!(CallKind::classify("x__quantum__rt__y"), CallKind::Generic);
    }

    #[test]
    fn call_constructor_classifies() {
        let instr = QirInstr::call(None, QirType::Void, "__quantum__rt__qubit_release", vec![]);
        match instr.kind {
            QirInstrKind::Call { kind, .. } => assert_eq!(kind, CallKind::Runtime),
            other => panic!("expected call, got {:?}", other),
        }
    }
}
