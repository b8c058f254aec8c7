// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Module: the dependency root of the model.

use crate::{validate_function, QirFunction, StructuralError};
use crate::{ATTR_ENTRY_POINT, ATTR_INTEROP_FRIENDLY};

/// A parsed program: ordered functions with unique names.
#[derive(Debug, Clone, PartialEq)]
pub struct QirModule {
    pub name: String,
    pub functions: Vec<QirFunction>,
}

impl QirModule {
    pub fn new(name: impl Into<String>, functions: Vec<QirFunction>) -> Self {
        QirModule { name: name.into(), functions }
    }

    /// Build a module from loader output, refusing structurally invalid
    /// functions. Each offending function is dropped and its violation
    /// reported; sibling functions stay available.
    pub fn validated(
        name: impl Into<String>,
        functions: Vec<QirFunction>,
    ) -> (Self, Vec<StructuralError>) {
        let mut kept = Vec::with_capacity(functions.len());
        let mut errors = Vec::new();
        for func in functions {
            match validate_function(&func) {
                Ok(()) => kept.push(func),
                Err(err) => errors.push(err),
            }
        }
        (QirModule::new(name, kept), errors)
    }

    pub fn func_by_name(&self, name: &str) -> Option<&QirFunction> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Functions carrying the given attribute, in declaration order.
    pub fn funcs_by_attr(&self, attr: &str) -> Vec<&QirFunction> {
        self.functions.iter().filter(|f| f.has_attribute(attr)).collect()
    }

    /// Functions marked `EntryPoint`.
    pub fn entry_point_funcs(&self) -> Vec<&QirFunction> {
        self.funcs_by_attr(ATTR_ENTRY_POINT)
    }

    /// Functions marked `InteropFriendly`.
    pub fn interop_funcs(&self) -> Vec<&QirFunction> {
        self.funcs_by_attr(ATTR_INTEROP_FRIENDLY)
    }
}
