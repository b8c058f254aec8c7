// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Display implementations for generated statements.
//!
//! A debugging rendition in a C-like surface syntax, not the emission
//! contract.

use crate::stmt::*;
use std::fmt;

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Place::Local(name) => write!(f, "{}", name),
            Place::ResultSlot(id) => write!(f, "results[{}]", id),
        }
    }
}

impl fmt::Display for ExprOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sym = match self {
            ExprOp::Add => "+",
            ExprOp::Sub => "-",
            ExprOp::Mul => "*",
            ExprOp::Div => "/",
            ExprOp::Rem => "%",
            ExprOp::And => "&",
            ExprOp::Or => "|",
            ExprOp::Xor => "^",
            ExprOp::Shl => "<<",
            ExprOp::Shr => ">>",
            ExprOp::Eq => "==",
            ExprOp::Ne => "!=",
            ExprOp::Lt => "<",
            ExprOp::Gt => ">",
            ExprOp::Le => "<=",
            ExprOp::Ge => ">=",
        };
        write!(f, "{}", sym)
    }
}

impl fmt::Display for LowExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LowExpr::PreviousBlock => write!(f, "previous_block_id"),
            LowExpr::Local(name) => write!(f, "{}", name),
            LowExpr::Int(v) => write!(f, "{}", v),
            LowExpr::Double(v) => write!(f, "{}", v),
            LowExpr::Null => write!(f, "null"),
            LowExpr::QubitHandle(id) => write!(f, "qubits[{}]", id),
            LowExpr::ResultSlot(id) => write!(f, "results[{}]", id),
            LowExpr::MeasuredBit => write!(f, "random_bit()"),
            LowExpr::Binary { op, lhs, rhs } => write!(f, "{} {} {}", lhs, op, rhs),
            LowExpr::Ternary { cond, then_value, else_value } => {
                write!(f, "{} ? {} : {}", cond, then_value, else_value)
            }
            LowExpr::ElemPtr { base, index } => write!(f, "&{}[{}]", base, index),
        }
    }
}

impl fmt::Display for LowStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LowStmt::Case { id } => write!(f, "case {}:", id.0),
            LowStmt::Nop => write!(f, ";"),
            LowStmt::DeclareQubit { name } => write!(f, "var {} = 0", name),
            LowStmt::DeclareArray { name, count } => {
                write!(f, "var* {} = alloc({})", name, count)
            }
            LowStmt::Declare { name, pointer: true } => write!(f, "var* {}", name),
            LowStmt::Declare { name, pointer: false } => write!(f, "var {}", name),
            LowStmt::Assign { dst, pointer, value } => {
                if *pointer {
                    write!(f, "*{} = {}", dst, value)
                } else {
                    write!(f, "{} = {}", dst, value)
                }
            }
            LowStmt::Branch { target } => {
                write!(
                    f,
                    "previous_block_id = current_block_id; current_block_id = {}",
                    target.0
                )
            }
            LowStmt::CondBranch { cond, true_target, false_target } => {
                write!(
                    f,
                    "previous_block_id = current_block_id; current_block_id = {} ? {} : {}",
                    cond, true_target.0, false_target.0
                )
            }
            LowStmt::Return { value: Some(v), .. } => write!(f, "return {}", v),
            LowStmt::Return { value: None, .. } => write!(f, "return"),
            LowStmt::Call { dst, callee, args } => {
                if let Some(d) = dst {
                    write!(f, "{} = ", d)?;
                }
                write!(f, "{}(", callee)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            LowStmt::Break => write!(f, "break"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phi_assignment_renders_as_conditional_chain() {
        let stmt = LowStmt::Assign {
            dst: Place::Local("v".to_string()),
            pointer: false,
            value: LowExpr::ternary(
                LowExpr::previous_is(BlockId(1)),
                LowExpr::Int(10),
                LowExpr::Int(20),
            ),
        };
        assert_eq!(stmt.to_string(), "v = previous_block_id == 1 ? 10 : 20");
    }

    #[test]
    fn branch_updates_both_dispatch_locals() {
        assert_eq!(
            LowStmt::Branch { target: BlockId(3) }.to_string(),
            "previous_block_id = current_block_id; current_block_id = 3"
        );
    }
}
