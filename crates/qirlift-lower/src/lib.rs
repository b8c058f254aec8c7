// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Block-dispatch lowering — SSA functions to a loop-and-switch state
//! machine.
//!
//! Each function becomes an ordered statement sequence shaped as a switch
//! over an integer block id, driven by two mutable locals
//! (`current_block_id`, `previous_block_id`). Phi nodes turn into
//! previous-block-conditional assignments, branches into id updates.
//! The output is a value; textual emission belongs to an external
//! serialization collaborator.

mod display;
mod generate;
mod intrinsics;
mod stmt;


pub use generate::{
    lower_function, lower_module, BlockIdTable, FunctionLowering, LowerError, ModuleLowering,
};
pub use stmt::{BlockId, ExprOp, LowExpr, LowStmt, Place};
