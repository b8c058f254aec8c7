// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Control-flow graph over a model function.
//!
//! A read-only analysis pass: one directed multigraph per function, with
//! a node per block plus synthetic sinks for `ret` and `unreachable`
//! terminators. Nothing here mutates the model; independent functions can
//! be analyzed concurrently since each graph is self-contained.

use std::collections::BTreeSet;

use qirlift_ir::{QirConst, QirFunction, QirTerminator};

/// Index of a node inside one [`ControlFlowGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// A graph node: a real block or a synthetic sink.
#[derive(Debug, Clone, PartialEq)]
pub enum CfgNode {
    Block(String),
    /// Single sink all `ret` terminators feed into.
    Return,
    /// Single sink for `unreachable` terminators; only present when one
    /// occurs.
    Unreachable,
}

/// Edge label distinguishing parallel edges out of one block.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeLabel {
    /// Unconditional branch, return or unreachable.
    Plain,
    True,
    False,
    /// One switch case, keyed by its constant.
    Case(QirConst),
    Default,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CfgEdge {
    pub from: NodeId,
    pub to: NodeId,
    pub label: EdgeLabel,
}

/// Directed multigraph of one function's control flow.
///
/// Construction is deterministic: block nodes in declaration order, then
/// the Return sink; edges in block order, then terminator-destination
/// order (true before false, case list before default).
#[derive(Debug, Clone)]
pub struct ControlFlowGraph {
    nodes: Vec<CfgNode>,
    edges: Vec<CfgEdge>,
}

impl ControlFlowGraph {
    pub fn build(func: &QirFunction) -> Self {
        let mut nodes: Vec<CfgNode> = func
            .blocks
            .iter()
            .map(|b| CfgNode::Block(b.name.clone()))
            .collect();
        let return_sink = NodeId(nodes.len() as u32);
        nodes.push(CfgNode::Return);
        let mut unreachable_sink: Option<NodeId> = None;

        let block_node = |name: &str| -> Option<NodeId> {
            func.blocks
                .iter()
                .position(|b| b.name == name)
                .map(|i| NodeId(i as u32))
        };

        let mut edges = Vec::new();
        for (idx, block) in func.blocks.iter().enumerate() {
            let from = NodeId(idx as u32);
            match &block.terminator {
                QirTerminator::Br { dest } => {
                    if let Some(to) = block_node(dest) {
                        edges.push(CfgEdge { from, to, label: EdgeLabel::Plain });
                    }
                }
                QirTerminator::CondBr { true_dest, false_dest, .. } => {
                    if let Some(to) = block_node(true_dest) {
                        edges.push(CfgEdge { from, to, label: EdgeLabel::True });
                    }
                    if let Some(to) = block_node(false_dest) {
                        edges.push(CfgEdge { from, to, label: EdgeLabel::False });
                    }
                }
                QirTerminator::Ret { .. } => {
                    edges.push(CfgEdge { from, to: return_sink, label: EdgeLabel::Plain });
                }
                QirTerminator::Switch { dests, default_dest, .. } => {
                    for (value, dest) in dests {
                        if let Some(to) = block_node(dest) {
                            edges.push(CfgEdge {
                                from,
                                to,
                                label: EdgeLabel::Case(value.clone()),
                            });
                        }
                    }
                    if let Some(to) = block_node(default_dest) {
                        edges.push(CfgEdge { from, to, label: EdgeLabel::Default });
                    }
                }
                QirTerminator::Unreachable => {
                    let to = *unreachable_sink.get_or_insert_with(|| {
                        let id = NodeId(nodes.len() as u32);
                        nodes.push(CfgNode::Unreachable);
                        id
                    });
                    edges.push(CfgEdge { from, to, label: EdgeLabel::Plain });
                }
            }
        }

        ControlFlowGraph { nodes, edges }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&CfgNode> {
        self.nodes.get(id.0 as usize)
    }

    pub fn edges(&self) -> &[CfgEdge] {
        &self.edges
    }

    /// Node for the named block.
    pub fn block_node(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| {
            matches!(n, CfgNode::Block(block) if block == name)
        })
        .map(|i| NodeId(i as u32))
    }

    /// Successor nodes in edge-insertion order.
    pub fn successors(&self, id: NodeId) -> Vec<NodeId> {
        self.edges
            .iter()
            .filter(|e| e.from == id)
            .map(|e| e.to)
            .collect()
    }

    /// Predecessor block names of the named block, in edge-insertion
    /// order (= block declaration order).
    pub fn predecessor_names(&self, name: &str) -> Vec<&str> {
        let Some(target) = self.block_node(name) else {
            return Vec::new();
        };
        let mut preds = Vec::new();
        for edge in &self.edges {
            if edge.to != target {
                continue;
            }
            if let Some(CfgNode::Block(from)) = self.node(edge.from) {
                if !preds.contains(&from.as_str()) {
                    preds.push(from.as_str());
                }
            }
        }
        preds
    }

    /// Block names reachable from the entry block (node 0).
    pub fn reachable_blocks(&self) -> BTreeSet<&str> {
        let mut reachable = BTreeSet::new();
        let mut stack = vec![NodeId(0)];
        let mut visited = BTreeSet::new();
        while let Some(id) = stack.pop() {
            if !visited.insert(id.0) {
                continue;
            }
            if let Some(CfgNode::Block(name)) = self.node(id) {
                reachable.insert(name.as_str());
                stack.extend(self.successors(id));
            }
        }
        reachable
    }

    /// Blocks no path from the entry reaches. Dead code is legal in the
    /// model; this is how consumers find it.
    pub fn dead_blocks(&self) -> Vec<&str> {
        let reachable = self.reachable_blocks();
        self.nodes
            .iter()
            .filter_map(|n| match n {
                CfgNode::Block(name) if !reachable.contains(name.as_str()) => {
                    Some(name.as_str())
                }
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qirlift_ir::{FunctionBuilder, QirOperand, QirType};

    fn cond() -> QirOperand {
        QirOperand::local("c", QirType::Integer { width: 1 })
    }

    fn diamond() -> QirFunction {
        let mut b = FunctionBuilder::new("f", QirType::Integer { width: 64 });
        b.param("c", QirType::Integer { width: 1 });
        b.block("entry").terminate(QirTerminator::CondBr {
            cond: cond(),
            true_dest: "then".to_string(),
            false_dest: "else".to_string(),
        });
        b.block("then").terminate(QirTerminator::Br { dest: "merge".to_string() });
        b.block("else").terminate(QirTerminator::Br { dest: "merge".to_string() });
        b.block("merge")
            .terminate(QirTerminator::Ret { operand: Some(QirOperand::int(64, 0)) });
        b.finish().expect("valid function")
    }

    #[test]
    fn diamond_has_four_blocks_and_return_sink() {
        let cfg = ControlFlowGraph::build(&diamond());
        // 4 blocks + Return, no Unreachable sink.
        assert_eq!(cfg.node_count(), 5);
        assert_eq!(cfg.edge_count(), 5);
        assert!(cfg.nodes.iter().any(|n| matches!(n, CfgNode::Return)));
        assert!(!cfg.nodes.iter().any(|n| matches!(n, CfgNode::Unreachable)));
    }

    #[test]
    fn cond_branch_edges_are_labeled_true_then_false() {
        let cfg = ControlFlowGraph::build(&diamond());
        let entry = cfg.block_node("entry").unwrap();
        let out: Vec<&CfgEdge> = cfg.edges().iter().filter(|e| e.from == entry).collect();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].label, EdgeLabel::True);
        assert_eq!(cfg.node(out[0].to), Some(&CfgNode::Block("then".to_string())));
        assert_eq!(out[1].label, EdgeLabel::False);
        assert_eq!(cfg.node(out[1].to), Some(&CfgNode::Block("else".to_string())));
    }

    #[test]
    fn merge_predecessors_in_declaration_order() {
        let cfg = ControlFlowGraph::build(&diamond());
        assert_eq!(cfg.predecessor_names("merge"), vec!["then", "else"]);
    }

    #[test]
    fn unreachable_sink_is_created_once_and_lazily() {
        let mut b = FunctionBuilder::new("f", QirType::Void);
        b.block("entry").terminate(QirTerminator::CondBr {
            cond: cond(),
            true_dest: "a".to_string(),
            false_dest: "b".to_string(),
        });
        b.block("a").terminate(QirTerminator::Unreachable);
        b.block("b").terminate(QirTerminator::Unreachable);
        let cfg = ControlFlowGraph::build(&b.finish().expect("valid function"));

        let sinks = cfg
            .nodes
            .iter()
            .filter(|n| matches!(n, CfgNode::Unreachable))
            .count();
        assert_eq!(sinks, 1);
        // 3 blocks + Return + Unreachable.
        assert_eq!(cfg.node_count(), 5);
    }

    #[test]
    fn switch_edges_follow_case_order_then_default() {
        let mut b = FunctionBuilder::new("f", QirType::Void);
        b.block("entry").terminate(QirTerminator::Switch {
            operand: QirOperand::local("x", QirType::Integer { width: 64 }),
            dests: vec![
                (QirConst::Int { width: 64, value: 0 }, "zero".to_string()),
                (QirConst::Int { width: 64, value: 1 }, "one".to_string()),
            ],
            default_dest: "fallback".to_string(),
        });
        b.block("zero").terminate(QirTerminator::Ret { operand: None });
        b.block("one").terminate(QirTerminator::Ret { operand: None });
        b.block("fallback").terminate(QirTerminator::Ret { operand: None });
        let cfg = ControlFlowGraph::build(&b.finish().expect("valid function"));

        let entry = cfg.block_node("entry").unwrap();
        let labels: Vec<&EdgeLabel> = cfg
            .edges()
            .iter()
            .filter(|e| e.from == entry)
            .map(|e| &e.label)
            .collect();
        assert_eq!(
            labels,
            vec![
                &EdgeLabel::Case(QirConst::Int { width: 64, value: 0 }),
                &EdgeLabel::Case(QirConst::Int { width: 64, value: 1 }),
                &EdgeLabel::Default,
            ]
        );
    }

    #[test]
    fn repeated_builds_are_identical() {
        let func = diamond();
        let a = ControlFlowGraph::build(&func);
        let b = ControlFlowGraph::build(&func);
        assert_eq!(a.nodes, b.nodes);
        assert_eq!(a.edges, b.edges);
    }

    #[test]
    fn dead_block_detected() {
        let mut b = FunctionBuilder::new("f", QirType::Void);
        b.block("entry").terminate(QirTerminator::Ret { operand: None });
        b.block("orphan").terminate(QirTerminator::Ret { operand: None });
        let cfg = ControlFlowGraph::build(&b.finish().expect("valid function"));
        assert_eq!(cfg.dead_blocks(), vec!["orphan"]);
        assert!(cfg.reachable_blocks().contains("entry"));
    }
}
