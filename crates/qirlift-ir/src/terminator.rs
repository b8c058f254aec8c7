// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Block terminators.

use crate::{QirConst, QirOperand};

/// Control transfer ending a block. Every block has exactly one, always
/// last.
#[derive(Debug, Clone, PartialEq)]
pub enum QirTerminator {
    Ret {
        operand: Option<QirOperand>,
    },
    Br {
        dest: String,
    },
    CondBr {
        cond: QirOperand,
        true_dest: String,
        false_dest: String,
    },
    Switch {
        operand: QirOperand,
        dests: Vec<(QirConst, String)>,
        default_dest: String,
    },
    Unreachable,
}

impl QirTerminator {
    /// Successor block names in terminator-specific order: true before
    /// false, case list order then default.
    pub fn successors(&self) -> Vec<&str> {
        match self {
            QirTerminator::Ret { .. } | QirTerminator::Unreachable => Vec::new(),
            QirTerminator::Br { dest } => vec![dest],
            QirTerminator::CondBr { true_dest, false_dest, .. } => {
                vec![true_dest, false_dest]
            }
            QirTerminator::Switch { dests, default_dest, .. } => {
                let mut out: Vec<&str> = dests.iter().map(|(_, d)| d.as_str()).collect();
                out.push(default_dest);
                out
            }
        }
    }
}
