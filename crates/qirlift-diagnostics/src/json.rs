// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! JSON output for machine consumers.

use crate::Diagnostic;

/// Serialize diagnostics as a JSON array.
pub fn to_json(diagnostics: &[Diagnostic]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(diagnostics)
}
