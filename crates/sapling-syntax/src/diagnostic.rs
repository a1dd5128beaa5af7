//! Parse and lint annotations carried by green nodes and tokens.

use sapling_errors::{Diagnostic, Severity};
use text_size::TextRange;

/// A diagnostic without a position; the position comes from the red node or
/// token it is read through.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SyntaxDiagnostic {
    code: &'static str,
    message: Box<str>,
    severity: Severity,
}

impl SyntaxDiagnostic {
    pub fn new(code: &'static str, severity: Severity, message: impl Into<Box<str>>) -> Self {
        Self { code, message: message.into(), severity }
    }

    pub fn error(code: &'static str, message: impl Into<Box<str>>) -> Self {
        Self::new(code, Severity::Error, message)
    }

    pub fn warning(code: &'static str, message: impl Into<Box<str>>) -> Self {
        Self::new(code, Severity::Warning, message)
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn located(&self, range: TextRange) -> Diagnostic {
        Diagnostic::new(self.severity, &*self.message, range).with_code(self.code)
    }
}
