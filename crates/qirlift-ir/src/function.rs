// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Functions, parameters and basic blocks.

use std::collections::BTreeMap;

use crate::{QirInstr, QirInstrKind, QirOperand, QirTerminator, QirType};
use crate::{ATTR_REQUIRED_QUBITS, ATTR_REQUIRED_RESULTS};

/// A basic block: straight-line instructions plus one terminator.
#[derive(Debug, Clone, PartialEq)]
pub struct QirBlock {
    /// Unique within the owning function; branch destinations refer to it.
    pub name: String,
    /// Non-terminator instructions in execution order. Phi nodes, when
    /// present, form the leading subsequence.
    pub instructions: Vec<QirInstr>,
    pub terminator: QirTerminator,
}

impl QirBlock {
    /// The leading phi-node subsequence.
    pub fn phi_nodes(&self) -> impl Iterator<Item = &QirInstr> {
        self.instructions.iter().take_while(|i| i.is_phi())
    }

    /// Instructions after the phi prefix.
    pub fn body(&self) -> impl Iterator<Item = &QirInstr> {
        self.instructions.iter().skip_while(|i| i.is_phi())
    }

    /// (output name, incoming value) pairs selected by the given
    /// predecessor across all phi nodes in this block.
    pub fn phi_pairs_for_source(&self, source: &str) -> Vec<(&str, &QirOperand)> {
        let mut pairs = Vec::new();
        for phi in self.phi_nodes() {
            let (Some(output), QirInstrKind::Phi { incoming }) = (&phi.output, &phi.kind) else {
                continue;
            };
            if let Some((value, _)) = incoming.iter().find(|(_, src)| src == source) {
                pairs.push((output.as_str(), value));
            }
        }
        pairs
    }
}

/// A named, typed function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct QirParameter {
    pub name: String,
    pub ty: QirType,
}

/// A function: ordered blocks (first is entry) plus attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct QirFunction {
    pub name: String,
    pub parameters: Vec<QirParameter>,
    pub return_type: QirType,
    pub blocks: Vec<QirBlock>,
    /// Attribute name → optional string value. A present key with `None`
    /// models a value-less attribute such as `EntryPoint`.
    pub attributes: BTreeMap<String, Option<String>>,
}

impl QirFunction {
    /// The entry block. Validated functions always have one.
    pub fn entry_block(&self) -> Option<&QirBlock> {
        self.blocks.first()
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// The attribute's string value, or `None` when the attribute is
    /// missing or value-less. Absence is an expected outcome, not an
    /// error.
    pub fn attribute_value(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)?.as_deref()
    }

    /// Qubit count from the `RequiredQubits` attribute, when present and
    /// a well-formed decimal.
    pub fn required_qubits(&self) -> Option<u64> {
        self.attribute_value(ATTR_REQUIRED_QUBITS)?.parse().ok()
    }

    /// Result count from the `RequiredResults` attribute.
    pub fn required_results(&self) -> Option<u64> {
        self.attribute_value(ATTR_REQUIRED_RESULTS)?.parse().ok()
    }

    pub fn block_by_name(&self, name: &str) -> Option<&QirBlock> {
        self.blocks.iter().find(|b| b.name == name)
    }

    /// The instruction defining the given SSA value. By the SSA invariant
    /// there is at most one; a full scan finds it.
    pub fn instr_by_output_name(&self, name: &str) -> Option<&QirInstr> {
        self.blocks
            .iter()
            .flat_map(|b| b.instructions.iter())
            .find(|i| i.output.as_deref() == Some(name))
    }

    /// Block name → predecessor block names, derived from terminators.
    /// Declaration order within each predecessor list.
    pub fn predecessor_map(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut preds: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for block in &self.blocks {
            preds.entry(block.name.as_str()).or_default();
        }
        for block in &self.blocks {
            for succ in block.terminator.successors() {
                if let Some(list) = preds.get_mut(succ) {
                    if !list.contains(&block.name.as_str()) {
                        list.push(block.name.as_str());
                    }
                }
            }
        }
        preds
    }
}
