//! Terminal rendering for diagnostics: a colored header, the source
//! location, the offending line with a caret, and the hint.

use colored::Colorize;

use crate::types::Diagnostic;

/// Render one diagnostic against the source it was produced from:
///
/// ```text
/// error: type error in let binding
///   @ line 3, col 1
///   |
///   | (let x : int "hello")
///   | ^
///   hint: type mismatch: expected int, found string
///   Γ ⊢ int
/// ```
pub fn render(diagnostic: &Diagnostic, source: &str) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} {}\n",
        "error:".red().bold(),
        diagnostic.message
    ));

    if diagnostic.line() > 0 {
        out.push_str(&format!(
            "{} line {}, col {}\n",
            "  @".purple(),
            diagnostic.line(),
            diagnostic.column()
        ));
    }

    if let Some(context) = diagnostic.context_line(source) {
        let gutter = "  |".blue();
        out.push_str(&format!("{}\n", gutter));
        out.push_str(&format!("{} {}\n", gutter, context));
        out.push_str(&format!(
            "{} {}^\n",
            gutter,
            " ".repeat(diagnostic.column().saturating_sub(1))
        ));
    }

    out.push_str(&format!("{} {}", "  hint:".yellow(), diagnostic.hint));

    if let Some(ty) = &diagnostic.ty {
        out.push_str(&format!("\n{} {}", "  Γ ⊢".purple(), ty.pretty()));
    }

    out
}
