// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Target-neutral statement and expression shapes.
//!
//! These define what the generator emits and which identifiers it
//! references (block ids, `previous_block_id`, per-instruction output
//! names); a concrete textual grammar is the emission collaborator's
//! concern.

/// Stable integer id assigned to a block during one function lowering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(pub u32);

/// An assignable location in the generated code.
#[derive(Debug, Clone, PartialEq)]
pub enum Place {
    /// A local named after the SSA value it materializes.
    Local(String),
    /// A slot of the statically allocated measurement-result array.
    ResultSlot(u64),
}

/// Binary operators of the target expression language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

/// A side-effect-free expression.
#[derive(Debug, Clone, PartialEq)]
pub enum LowExpr {
    /// The `previous_block_id` dispatch local.
    PreviousBlock,
    /// A local named after an SSA value.
    Local(String),
    Int(i64),
    Double(f64),
    Null,
    /// Nominal handle of a statically allocated qubit.
    QubitHandle(u64),
    /// Read of a static measurement-result slot.
    ResultSlot(u64),
    /// A stochastic single-bit measurement outcome. The randomness source
    /// is an external collaborator, not part of the statement model.
    MeasuredBit,
    Binary {
        op: ExprOp,
        lhs: Box<LowExpr>,
        rhs: Box<LowExpr>,
    },
    Ternary {
        cond: Box<LowExpr>,
        then_value: Box<LowExpr>,
        else_value: Box<LowExpr>,
    },
    /// Address of an array element, `&base[index]`.
    ElemPtr {
        base: String,
        index: Box<LowExpr>,
    },
}

impl LowExpr {
    pub fn binary(op: ExprOp, lhs: LowExpr, rhs: LowExpr) -> Self {
        LowExpr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }
    }

    pub fn ternary(cond: LowExpr, then_value: LowExpr, else_value: LowExpr) -> Self {
        LowExpr::Ternary {
            cond: Box::new(cond),
            then_value: Box::new(then_value),
            else_value: Box::new(else_value),
        }
    }

    /// `cond ? 1 : 0` — comparisons materialize their boolean.
    pub fn bool_of(cond: LowExpr) -> Self {
        LowExpr::ternary(cond, LowExpr::Int(1), LowExpr::Int(0))
    }

    /// `previous_block_id == id`.
    pub fn previous_is(id: BlockId) -> Self {
        LowExpr::binary(ExprOp::Eq, LowExpr::PreviousBlock, LowExpr::Int(id.0 as i64))
    }
}

/// One generated statement.
#[derive(Debug, Clone, PartialEq)]
pub enum LowStmt {
    /// Start of the dispatch arm for a block.
    Case { id: BlockId },
    /// No-op; keeps a case label legal even when nothing follows it.
    Nop,
    /// Fresh qubit handle with a zero sentinel. Qubit identity is purely
    /// nominal at this level.
    DeclareQubit { name: String },
    /// Pointer-typed local backing a 1-D array of the given length.
    DeclareArray { name: String, count: u64 },
    /// Plain local declaration; `pointer` adds the indirection marker.
    Declare { name: String, pointer: bool },
    Assign {
        dst: Place,
        pointer: bool,
        value: LowExpr,
    },
    /// `previous_block_id = current_block_id; current_block_id = target`.
    Branch { target: BlockId },
    /// Same update with a conditional target: true destination first.
    CondBranch {
        cond: LowExpr,
        true_target: BlockId,
        false_target: BlockId,
    },
    Return {
        value: Option<LowExpr>,
        pointer: bool,
    },
    /// Call into another function of the module.
    Call {
        dst: Option<Place>,
        callee: String,
        args: Vec<LowExpr>,
    },
    /// End of a dispatch arm.
    Break,
}
