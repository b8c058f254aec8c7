// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! FunctionBuilder - construction API for the loader collaborator.
//!
//! The model itself is read-only; this is the one place it gets built.
//! `finish` validates the structural invariants, so a builder can never
//! hand out a function that violates them.

use std::collections::BTreeMap;

use crate::{validate_function, QirBlock, QirFunction, QirInstr, QirParameter};
use crate::{QirTerminator, QirType, StructuralError};

pub struct FunctionBuilder {
    name: String,
    parameters: Vec<QirParameter>,
    return_type: QirType,
    attributes: BTreeMap<String, Option<String>>,
    blocks: Vec<PendingBlock>,
}

struct PendingBlock {
    name: String,
    instructions: Vec<QirInstr>,
    terminator: Option<QirTerminator>,
}

impl FunctionBuilder {
    pub fn new(name: impl Into<String>, return_type: QirType) -> Self {
        FunctionBuilder {
            name: name.into(),
            parameters: Vec::new(),
            return_type,
            attributes: BTreeMap::new(),
            blocks: Vec::new(),
        }
    }

    pub fn param(&mut self, name: impl Into<String>, ty: QirType) -> &mut Self {
        self.parameters.push(QirParameter { name: name.into(), ty });
        self
    }

    pub fn attribute(&mut self, name: impl Into<String>, value: Option<&str>) -> &mut Self {
        self.attributes.insert(name.into(), value.map(str::to_string));
        self
    }

    /// Open the named block, creating it on first use. The first block
    /// opened is the entry block.
    pub fn block(&mut self, name: impl Into<String>) -> BlockCursor<'_> {
        let name = name.into();
        let idx = match self.blocks.iter().position(|b| b.name == name) {
            Some(idx) => idx,
            None => {
                self.blocks.push(PendingBlock {
                    name,
                    instructions: Vec::new(),
                    terminator: None,
                });
                self.blocks.len() - 1
            }
        };
        BlockCursor { block: &mut self.blocks[idx] }
    }

    /// Seal the function: every block needs its terminator, then the
    /// structural invariants are checked.
    pub fn finish(self) -> Result<QirFunction, StructuralError> {
        let mut blocks = Vec::with_capacity(self.blocks.len());
        for pending in self.blocks {
            let terminator = pending.terminator.ok_or_else(|| {
                StructuralError::MissingTerminator {
                    function: self.name.clone(),
                    block: pending.name.clone(),
                }
            })?;
            blocks.push(QirBlock {
                name: pending.name,
                instructions: pending.instructions,
                terminator,
            });
        }
        let func = QirFunction {
            name: self.name,
            parameters: self.parameters,
            return_type: self.return_type,
            blocks,
            attributes: self.attributes,
        };
        validate_function(&func)?;
        Ok(func)
    }
}

/// Mutable view of one block under construction.
pub struct BlockCursor<'a> {
    block: &'a mut PendingBlock,
}

impl BlockCursor<'_> {
    pub fn push(&mut self, instr: QirInstr) -> &mut Self {
        self.block.instructions.push(instr);
        self
    }

    pub fn terminate(&mut self, terminator: QirTerminator) {
        self.block.terminator = Some(terminator);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QirOperand;

    #[test]
    fn unterminated_block_is_refused() {
        let mut b = FunctionBuilder::new("f", QirType::Void);
        b.block("entry");
        match b.finish() {
            Err(StructuralError::MissingTerminator { block, .. }) => {
                assert_eq!(block, "entry");
            }
            other => panic!("expected MissingTerminator, got {:?}", other),
        }
    }

    #[test]
    fn first_block_opened_is_entry() {
        let mut b = FunctionBuilder::new("f", QirType::Void);
        b.block("start").terminate(QirTerminator::Br { dest: "exit".to_string() });
        b.block("exit").terminate(QirTerminator::Ret { operand: None });
        let func = b.finish().expect("valid function");
        assert_eq!(func.entry_block().map(|b| b.name.as_str()), Some("start"));
        assert_eq!(func.blocks.len(), 2);
    }

    #[test]
    fn push_and_terminate_chain_on_one_cursor() {
        let mut b = FunctionBuilder::new("f", QirType::Integer { width: 64 });
        b.block("entry")
            .push(QirInstr::call(
                Some("x".to_string()),
                QirType::Integer { width: 64 },
                "g",
                vec![],
            ))
            .terminate(QirTerminator::Ret {
                operand: Some(QirOperand::local("x", QirType::Integer { width: 64 })),
            });
        let func = b.finish().expect("valid function");
        assert_eq!(func.blocks[0].instructions.len(), 1);
        assert!(matches!(
            func.blocks[0].terminator,
            QirTerminator::Ret { operand: Some(_) }
        ));
    }

    #[test]
    fn reopening_a_block_appends() {
        let mut b = FunctionBuilder::new("f", QirType::Integer { width: 64 });
        b.block("entry").push(QirInstr::call(
            Some("x".to_string()),
            QirType::Integer { width: 64 },
            "g",
            vec![],
        ));
        b.block("entry")
            .terminate(QirTerminator::Ret { operand: Some(QirOperand::int(64, 0)) });
        let func = b.finish().expect("valid function");
        assert_eq!(func.blocks[0].instructions.len(), 1);
    }
}
