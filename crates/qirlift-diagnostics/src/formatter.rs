// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Terminal rendering of diagnostics.

use colored::Colorize;

use crate::{Diagnostic, Severity};

/// Render one diagnostic for a terminal:
/// `error: reason` / `  --> function / block` / `  | construct`.
pub fn format(diag: &Diagnostic) -> String {
    let header = match diag.severity {
        Severity::Error => "error".red().bold(),
        Severity::Warning => "warning".yellow().bold(),
    };
    let mut out = format!("{}: {}\n", header, diag.reason);
    match &diag.block {
        Some(block) => {
            out.push_str(&format!("  --> {} / {}\n", diag.function, block));
        }
        None => {
            out.push_str(&format!("  --> {}\n", diag.function));
        }
    }
    if let Some(construct) = &diag.construct {
        out.push_str(&format!("   | {}\n", construct));
    }
    out
}

/// Render a batch, one after another.
pub fn format_all(diagnostics: &[Diagnostic]) -> String {
    diagnostics.iter().map(format).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_includes_location_and_construct() {
        colored::control::set_override(false);
        let diag = Diagnostic::error("main", "switch terminator is not supported")
            .in_block("entry")
            .with_construct("switch %x [0: a, default: b]");
        let text = format(&diag);
        assert!(text.starts_with("error: switch terminator"));
        assert!(text.contains("--> main / entry"));
        assert!(text.contains("| switch %x"));
    }
}
