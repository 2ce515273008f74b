//! TypeScript grammar checks
//!
//! No TypeScript parser is linked in, so validation is structural:
//! delimiters must balance (ignoring string literals) and every statement
//! form a fixture uses must be present.

use crate::Language;

use super::Grammar;

/// Statement forms every statement fixture contains
const REQUIRED_FORMS: [&str; 7] = [
    "const a = ",
    "if (",
    "} else if (",
    "while (",
    "do {",
    "for (let i = ",
    "console.log(",
];

/// TypeScript grammar for fixture validation
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeScriptGrammar;

impl TypeScriptGrammar {
    /// Create a new TypeScript grammar
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Check that `()`, `[]` and `{}` nest correctly outside string literals
    #[must_use]
    pub fn is_balanced(code: &str) -> bool {
        let mut stack = Vec::new();
        let mut quote: Option<char> = None;
        let mut escaped = false;

        for ch in code.chars() {
            if let Some(q) = quote {
                if escaped {
                    escaped = false;
                } else if ch == '\\' {
                    escaped = true;
                } else if ch == q {
                    quote = None;
                }
                continue;
            }
            match ch {
                '"' | '\'' | '`' => quote = Some(ch),
                '(' | '[' | '{' => stack.push(ch),
                ')' | ']' | '}' => {
                    let open = match ch {
                        ')' => '(',
                        ']' => '[',
                        _ => '{',
                    };
                    if stack.pop() != Some(open) {
                        return false;
                    }
                }
                _ => {}
            }
        }

        stack.is_empty() && quote.is_none()
    }

    /// Statement forms from the fixture shape that `code` lacks
    #[must_use]
    pub fn missing_forms(code: &str) -> Vec<&'static str> {
        REQUIRED_FORMS
            .iter()
            .copied()
            .filter(|form| !code.contains(form))
            .collect()
    }
}

impl Grammar for TypeScriptGrammar {
    fn language(&self) -> Language {
        Language::TypeScript
    }

    fn validate(&self, code: &str) -> bool {
        if code.trim().is_empty() {
            return false;
        }
        Self::is_balanced(code) && Self::missing_forms(code).is_empty()
    }
}
