// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Display implementations for model types.
//!
//! These render the construct descriptors diagnostics carry; they are not
//! a serialization format.

use crate::instr::{BinOp, FloatPredicate, IntPredicate};
use crate::*;
use std::fmt;

impl fmt::Display for QirType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QirType::Void => write!(f, "void"),
            QirType::Integer { width } => write!(f, "i{}", width),
            QirType::Double => write!(f, "double"),
            QirType::Pointer { pointee, addr_space: 0 } => write!(f, "{}*", pointee),
            QirType::Pointer { pointee, addr_space } => {
                write!(f, "{} addrspace({})*", pointee, addr_space)
            }
            QirType::Array { element_types, count } => {
                write!(f, "[{} x ", count)?;
                for (i, ty) in element_types.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", ty)?;
                }
                write!(f, "]")
            }
            QirType::Struct { element_types } => {
                write!(f, "{{")?;
                for (i, ty) in element_types.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", ty)?;
                }
                write!(f, "}}")
            }
            QirType::NamedStruct { name } => write!(f, "%{}", name),
        }
    }
}

impl fmt::Display for QirConst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QirConst::Int { value, .. } => write!(f, "{}", value),
            QirConst::Double(v) => write!(f, "{}", v),
            QirConst::Null => write!(f, "null"),
            QirConst::Qubit(id) => write!(f, "qubit#{}", id),
            QirConst::Result(id) => write!(f, "result#{}", id),
        }
    }
}

impl fmt::Display for QirOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QirOperand::Local { name, .. } => write!(f, "%{}", name),
            QirOperand::Constant(c) => write!(f, "{}", c),
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BinOp::Add => "add",
            BinOp::Sub => "sub",
            BinOp::Mul => "mul",
            BinOp::UDiv => "udiv",
            BinOp::SDiv => "sdiv",
            BinOp::URem => "urem",
            BinOp::SRem => "srem",
            BinOp::And => "and",
            BinOp::Or => "or",
            BinOp::Xor => "xor",
            BinOp::Shl => "shl",
            BinOp::LShr => "lshr",
            BinOp::AShr => "ashr",
            BinOp::FAdd => "fadd",
            BinOp::FSub => "fsub",
            BinOp::FMul => "fmul",
            BinOp::FDiv => "fdiv",
            BinOp::FRem => "frem",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for IntPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IntPredicate::Eq => "eq",
            IntPredicate::Ne => "ne",
            IntPredicate::Ugt => "ugt",
            IntPredicate::Uge => "uge",
            IntPredicate::Ult => "ult",
            IntPredicate::Ule => "ule",
            IntPredicate::Sgt => "sgt",
            IntPredicate::Sge => "sge",
            IntPredicate::Slt => "slt",
            IntPredicate::Sle => "sle",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for FloatPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FloatPredicate::False => "false",
            FloatPredicate::Oeq => "oeq",
            FloatPredicate::Ogt => "ogt",
            FloatPredicate::Oge => "oge",
            FloatPredicate::Olt => "olt",
            FloatPredicate::Ole => "ole",
            FloatPredicate::One => "one",
            FloatPredicate::Ord => "ord",
            FloatPredicate::Uno => "uno",
            FloatPredicate::Ueq => "ueq",
            FloatPredicate::Ugt => "ugt",
            FloatPredicate::Uge => "uge",
            FloatPredicate::Ult => "ult",
            FloatPredicate::Ule => "ule",
            FloatPredicate::Une => "une",
            FloatPredicate::True => "true",
        };
        write!(f, "{}", name)
    }
}

impl fmt::Display for QirInstrKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QirInstrKind::BinOp { op, lhs, rhs } => write!(f, "{} {}, {}", op, lhs, rhs),
            QirInstrKind::FNeg { operand } => write!(f, "fneg {}", operand),
            QirInstrKind::ICmp { pred, lhs, rhs } => {
                write!(f, "icmp {} {}, {}", pred, lhs, rhs)
            }
            QirInstrKind::FCmp { pred, lhs, rhs } => {
                write!(f, "fcmp {} {}, {}", pred, lhs, rhs)
            }
            QirInstrKind::Phi { incoming } => {
                write!(f, "phi ")?;
                for (i, (value, src)) in incoming.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "[{}, {}]", value, src)?;
                }
                Ok(())
            }
            QirInstrKind::Select { cond, true_value, false_value } => {
                write!(f, "select {}, {}, {}", cond, true_value, false_value)
            }
            QirInstrKind::Alloca { allocated_ty } => write!(f, "alloca {}", allocated_ty),
            QirInstrKind::Load { ptr } => write!(f, "load {}", ptr),
            QirInstrKind::Store { value, ptr } => write!(f, "store {}, {}", value, ptr),
            QirInstrKind::BitCast { value } => write!(f, "bitcast {}", value),
            QirInstrKind::Call { callee, args, .. } => {
                write!(f, "call {}(", callee)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for QirInstr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(output) = &self.output {
            write!(f, "%{} = ", output)?;
        }
        write!(f, "{}", self.kind)
    }
}

impl fmt::Display for QirTerminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QirTerminator::Ret { operand: Some(v) } => write!(f, "ret {}", v),
            QirTerminator::Ret { operand: None } => write!(f, "ret void"),
            QirTerminator::Br { dest } => write!(f, "br {}", dest),
            QirTerminator::CondBr { cond, true_dest, false_dest } => {
                write!(f, "br {}, {}, {}", cond, true_dest, false_dest)
            }
            QirTerminator::Switch { operand, dests, default_dest } => {
                write!(f, "switch {} [", operand)?;
                for (i, (value, dest)) in dests.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", value, dest)?;
                }
                write!(f, ", default: {}]", default_dest)
            }
            QirTerminator::Unreachable => write!(f, "unreachable"),
        }
    }
}
