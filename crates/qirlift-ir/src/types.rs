// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! QIR type descriptions.

/// A type as it appears in the parsed program.
///
/// The base profile only ever produces scalar integers, doubles, pointers
/// and the two opaque resource structs, but the model keeps the full shape
/// so queries never have to guess.
#[derive(Debug, Clone, PartialEq)]
pub enum QirType {
    Void,
    Integer {
        width: u32,
    },
    Double,
    Pointer {
        pointee: Box<QirType>,
        addr_space: u32,
    },
    Array {
        element_types: Vec<QirType>,
        count: u64,
    },
    Struct {
        element_types: Vec<QirType>,
    },
    /// Globally named struct, usually an opaque pointee.
    NamedStruct {
        name: String,
    },
}

/// Name of the opaque struct behind `%Qubit*`.
pub(crate) const QUBIT_STRUCT: &str = "Qubit";
/// Name of the opaque struct behind `%Result*`.
pub(crate) const RESULT_STRUCT: &str = "Result";

impl QirType {
    /// Pointer to the opaque `Qubit` struct.
    pub fn qubit() -> Self {
        QirType::Pointer {
            pointee: Box::new(QirType::NamedStruct { name: QUBIT_STRUCT.to_string() }),
            addr_space: 0,
        }
    }

    /// Pointer to the opaque `Result` struct.
    pub fn result() -> Self {
        QirType::Pointer {
            pointee: Box::new(QirType::NamedStruct { name: RESULT_STRUCT.to_string() }),
            addr_space: 0,
        }
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, QirType::Pointer { .. })
    }

    /// True for pointers to the named opaque `Qubit` struct.
    pub fn is_qubit(&self) -> bool {
        self.points_to_named(QUBIT_STRUCT)
    }

    /// True for pointers to the named opaque `Result` struct.
    pub fn is_result(&self) -> bool {
        self.points_to_named(RESULT_STRUCT)
    }

    fn points_to_named(&self, expected: &str) -> bool {
        match self {
            QirType::Pointer { pointee, .. } => {
                matches!(&**pointee, QirType::NamedStruct { name } if name == expected)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qubit_and_result_recognized_by_name() {
        assert!(QirType::qubit().is_qubit());
        assert!(!QirType::qubit().is_result());
        assert!(QirType::result().is_result());
        assert!(QirType::result().is_pointer());
    }

    #[test]
    fn other_named_struct_pointers_are_not_resources() {
        let ty = QirType::Pointer {
            pointee: Box::new(QirType::NamedStruct { name: "Array".to_string() }),
            addr_space: 0,
        };
        assert!(!ty.is_qubit());
        assert!(!ty.is_result());
    }
}
