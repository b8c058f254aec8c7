// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Structural validation of the model invariants.
//!
//! A function that fails any of these checks is never presented by the
//! model: computing over inconsistent SSA would silently miscompile.

use std::collections::BTreeSet;

use crate::{QirFunction, QirInstrKind};

/// A violated model invariant. Fatal for the affected function only.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StructuralError {
    #[error("function '{function}' has no blocks")]
    EmptyFunction { function: String },

    #[error("duplicate block name '{block}' in function '{function}'")]
    DuplicateBlockName { function: String, block: String },

    #[error("value '{name}' defined more than once in function '{function}'")]
    DuplicateDefinition { function: String, name: String },

    #[error("block '{block}' in function '{function}' has no terminator")]
    MissingTerminator { function: String, block: String },

    #[error("phi node after non-phi instruction in block '{block}' of function '{function}'")]
    MisplacedPhi { function: String, block: String },

    #[error(
        "phi sources {phi_sources:?} in block '{block}' of function '{function}' \
         do not match predecessors {predecessors:?}"
    )]
    PhiSourceMismatch {
        function: String,
        block: String,
        phi_sources: Vec<String>,
        predecessors: Vec<String>,
    },

    #[error("branch to unknown block '{dest}' in block '{block}' of function '{function}'")]
    UnknownBranchTarget {
        function: String,
        block: String,
        dest: String,
    },
}

/// Check every invariant the model promises: non-empty block list, unique
/// block names, SSA-unique output names, phi nodes leading their block,
/// phi incoming sets equal to the predecessor set, and branch targets
/// that exist.
pub fn validate_function(func: &QirFunction) -> Result<(), StructuralError> {
    if func.blocks.is_empty() {
        return Err(StructuralError::EmptyFunction { function: func.name.clone() });
    }

    let mut block_names = BTreeSet::new();
    for block in &func.blocks {
        if !block_names.insert(block.name.as_str()) {
            return Err(StructuralError::DuplicateBlockName {
                function: func.name.clone(),
                block: block.name.clone(),
            });
        }
    }

    let mut defined = BTreeSet::new();
    for block in &func.blocks {
        for instr in &block.instructions {
            if let Some(name) = &instr.output {
                if !defined.insert(name.as_str()) {
                    return Err(StructuralError::DuplicateDefinition {
                        function: func.name.clone(),
                        name: name.clone(),
                    });
                }
            }
        }
    }

    for block in &func.blocks {
        let mut seen_non_phi = false;
        for instr in &block.instructions {
            if instr.is_phi() {
                if seen_non_phi {
                    return Err(StructuralError::MisplacedPhi {
                        function: func.name.clone(),
                        block: block.name.clone(),
                    });
                }
            } else {
                seen_non_phi = true;
            }
        }
    }

    for block in &func.blocks {
        for dest in block.terminator.successors() {
            if !block_names.contains(dest) {
                return Err(StructuralError::UnknownBranchTarget {
                    function: func.name.clone(),
                    block: block.name.clone(),
                    dest: dest.to_string(),
                });
            }
        }
    }

    let preds = func.predecessor_map();
    for block in &func.blocks {
        let pred_set: BTreeSet<&str> = preds
            .get(block.name.as_str())
            .map(|p| p.iter().copied().collect())
            .unwrap_or_default();
        for phi in block.phi_nodes() {
            let QirInstrKind::Phi { incoming } = &phi.kind else { continue };
            let phi_sources: BTreeSet<&str> =
                incoming.iter().map(|(_, src)| src.as_str()).collect();
            if phi_sources != pred_set {
                return Err(StructuralError::PhiSourceMismatch {
                    function: func.name.clone(),
                    block: block.name.clone(),
                    phi_sources: phi_sources.iter().map(|s| s.to_string()).collect(),
                    predecessors: pred_set.iter().map(|s| s.to_string()).collect(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{QirBlock, QirInstr, QirOperand, QirTerminator, QirType};
    use std::collections::BTreeMap;

    fn int_ty() -> QirType {
        QirType::Integer { width: 64 }
    }

    fn func(blocks: Vec<QirBlock>) -> QirFunction {
        QirFunction {
            name: "f".to_string(),
            parameters: vec![],
            return_type: int_ty(),
            blocks,
            attributes: BTreeMap::new(),
        }
    }

    fn ret_block(name: &str, instructions: Vec<QirInstr>) -> QirBlock {
        QirBlock {
            name: name.to_string(),
            instructions,
            terminator: QirTerminator::Ret { operand: Some(QirOperand::int(64, 0)) },
        }
    }

    fn phi(output: &str, incoming: Vec<(QirOperand, &str)>) -> QirInstr {
        QirInstr {
            output: Some(output.to_string()),
            ty: int_ty(),
            kind: QirInstrKind::Phi {
                incoming: incoming
                    .into_iter()
                    .map(|(v, s)| (v, s.to_string()))
                    .collect(),
            },
        }
    }

    #[test]
    fn empty_function_is_refused() {
        assert!(matches!(
            validate_function(&func(vec![])),
            Err(StructuralError::EmptyFunction { .. })
        ));
    }

    #[test]
    fn duplicate_block_names_are_refused() {
        let f = func(vec![ret_block("entry", vec![]), ret_block("entry", vec![])]);
        assert!(matches!(
            validate_function(&f),
            Err(StructuralError::DuplicateBlockName { .. })
        ));
    }

    #[test]
    fn double_definition_violates_ssa() {
        let define = |name: &str| {
            QirInstr::call(Some(name.to_string()), int_ty(), "g", vec![])
        };
        let f = func(vec![ret_block("entry", vec![define("x"), define("x")])]);
        assert!(matches!(
            validate_function(&f),
            Err(StructuralError::DuplicateDefinition { name, .. }) if name == "x"
        ));
    }

    #[test]
    fn phi_after_body_instruction_is_refused() {
        let f = func(vec![
            QirBlock {
                name: "entry".to_string(),
                instructions: vec![],
                terminator: QirTerminator::Br { dest: "next".to_string() },
            },
            ret_block(
                "next",
                vec![
                    QirInstr::call(Some("x".to_string()), int_ty(), "g", vec![]),
                    phi("v", vec![(QirOperand::int(64, 1), "entry")]),
                ],
            ),
        ]);
        assert!(matches!(
            validate_function(&f),
            Err(StructuralError::MisplacedPhi { .. })
        ));
    }

    #[test]
    fn phi_sources_must_equal_predecessor_set() {
        // "elsewhere" never branches to merge, so the phi set mismatches.
        let f = func(vec![
            QirBlock {
                name: "entry".to_string(),
                instructions: vec![],
                terminator: QirTerminator::Br { dest: "merge".to_string() },
            },
            ret_block(
                "merge",
                vec![phi("v", vec![(QirOperand::int(64, 1), "elsewhere")])],
            ),
        ]);
        assert!(matches!(
            validate_function(&f),
            Err(StructuralError::PhiSourceMismatch { .. })
        ));
    }

    #[test]
    fn branch_to_unknown_block_is_refused() {
        let f = func(vec![QirBlock {
            name: "entry".to_string(),
            instructions: vec![],
            terminator: QirTerminator::Br { dest: "ghost".to_string() },
        }]);
        assert!(matches!(
            validate_function(&f),
            Err(StructuralError::UnknownBranchTarget { dest, .. }) if dest == "ghost"
        ));
    }

    #[test]
    fn well_formed_diamond_passes() {
        let f = func(vec![
            QirBlock {
                name: "entry".to_string(),
                instructions: vec![],
                terminator: QirTerminator::CondBr {
                    cond: QirOperand::int(1, 1),
                    true_dest: "then".to_string(),
                    false_dest: "else".to_string(),
                },
            },
            QirBlock {
                name: "then".to_string(),
                instructions: vec![],
                terminator: QirTerminator::Br { dest: "merge".to_string() },
            },
            QirBlock {
                name: "else".to_string(),
                instructions: vec![],
                terminator: QirTerminator::Br { dest: "merge".to_string() },
            },
            ret_block(
                "merge",
                vec![phi(
                    "v",
                    vec![
                        (QirOperand::int(64, 1), "then"),
                        (QirOperand::int(64, 2), "else"),
                    ],
                )],
            ),
        ]);
        assert_eq!(validate_function(&f), Ok(()));
    }
}
