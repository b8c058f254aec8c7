// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Instruction operands and constants.

use crate::QirType;

/// A value consumed by an instruction or terminator.
#[derive(Debug, Clone, PartialEq)]
pub enum QirOperand {
    /// Reference to an SSA value defined elsewhere in the same function.
    Local { name: String, ty: QirType },
    Constant(QirConst),
}

/// A compile-time constant.
///
/// `Qubit` and `Result` carry the static indices the base profile assigns
/// to its resource arrays; they are indices, not addresses.
#[derive(Debug, Clone, PartialEq)]
pub enum QirConst {
    Int { width: u32, value: u64 },
    Double(f64),
    Null,
    Qubit(u64),
    Result(u64),
}

impl QirOperand {
    pub fn local(name: impl Into<String>, ty: QirType) -> Self {
        QirOperand::Local { name: name.into(), ty }
    }

    pub fn int(width: u32, value: u64) -> Self {
        QirOperand::Constant(QirConst::Int { width, value })
    }

    /// The operand's type, as far as the model can tell.
    ///
    /// `Null` carries no pointee information of its own, so it reports a
    /// void pointer.
    pub fn ty(&self) -> QirType {
        match self {
            QirOperand::Local { ty, .. } => ty.clone(),
            QirOperand::Constant(c) => c.ty(),
        }
    }

    /// The local name if this operand is a local reference.
    pub fn local_name(&self) -> Option<&str> {
        match self {
            QirOperand::Local { name, .. } => Some(name),
            QirOperand::Constant(_) => None,
        }
    }
}

impl QirConst {
    pub fn ty(&self) -> QirType {
        match self {
            QirConst::Int { width, .. } => QirType::Integer { width: *width },
            QirConst::Double(_) => QirType::Double,
            QirConst::Null => QirType::Pointer {
                pointee: Box::new(QirType::Void),
                addr_space: 0,
            },
            QirConst::Qubit(_) => QirType::qubit(),
            QirConst::Result(_) => QirType::result(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_types_follow_variant() {
        assert_eq!(
            QirOperand::int(64, 7).ty(),
            QirType::Integer { width: 64 }
        );
        assert!(QirConst::Qubit(0).ty().is_qubit());
        assert!(QirConst::Result(3).ty().is_result());
    }

    #[test]
    fn local_name_only_for_locals() {
        let op = QirOperand::local("x", QirType::Integer { width: 64 });
        assert_eq!(op.local_name(), Some("x"));
        assert_eq!(QirOperand::int(1, 0).local_name(), None);
    }
}
