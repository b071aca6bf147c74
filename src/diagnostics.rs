//! Diagnostic collection and rendering.
//!
//! The parser never prints anything itself: every note, warning, error, and
//! pedantic advisory is handed to a [`DiagnosticSink`] keyed by a resolved
//! line/column position.  The sink is append-only; whether any
//! error-severity diagnostic was recorded is the signal that downstream
//! phases must not run, independent of whether a (partial) tree was built.

use std::fmt;
use std::io::{self, Write};

use termcolor::{Color, ColorSpec, WriteColor};

/// A resolved position in the source text, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Severity of a diagnostic as surfaced to the user.
///
/// `Note` never stands alone; it supplies matching-context (such as
/// "to match this '('") for the error that immediately precedes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Note,
    Warning,
    Error,
    Pedantic,
}

impl Severity {
    fn label(self) -> &'static str {
        match self {
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Pedantic => "pedantic",
        }
    }

    fn color(self) -> Color {
        match self {
            Severity::Note => Color::Cyan,
            Severity::Warning => Color::Yellow,
            Severity::Error => Color::Red,
            Severity::Pedantic => Color::Magenta,
        }
    }
}

/// One recorded diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub loc: SourceLocation,
    pub message: String,
}

impl Diagnostic {
    /// Writes this diagnostic with a colored severity label.
    pub fn render(&self, out: &mut impl WriteColor) -> io::Result<()> {
        out.set_color(ColorSpec::new().set_fg(Some(self.severity.color())).set_bold(true))?;
        write!(out, "{}", self.severity.label())?;
        out.reset()?;
        writeln!(out, ": {}: {}", self.loc, self.message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity.label(), self.loc, self.message)
    }
}

/// Shared parser options.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Emit pedantic advisories (suppressed by default).
    pub pedantic: bool,
    /// Maximum delimiter nesting depth before the parser fails cleanly
    /// instead of recursing further.
    pub max_nesting: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            pedantic: false,
            max_nesting: 256,
        }
    }
}

/// Append-only collector for diagnostics.
#[derive(Debug)]
pub struct DiagnosticSink {
    options: Options,
    diagnostics: Vec<Diagnostic>,
    errors: usize,
}

impl DiagnosticSink {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            diagnostics: Vec::new(),
            errors: 0,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn note(&mut self, loc: SourceLocation, message: impl Into<String>) {
        self.push(Severity::Note, loc, message.into());
    }

    pub fn warn(&mut self, loc: SourceLocation, message: impl Into<String>) {
        self.push(Severity::Warning, loc, message.into());
    }

    pub fn error(&mut self, loc: SourceLocation, message: impl Into<String>) {
        self.errors += 1;
        self.push(Severity::Error, loc, message.into());
    }

    /// Advisory diagnostics; dropped unless pedantic mode is on.
    pub fn pedantic(&mut self, loc: SourceLocation, message: impl Into<String>) {
        if self.options.pedantic {
            self.push(Severity::Pedantic, loc, message.into());
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    pub fn error_count(&self) -> usize {
        self.errors
    }

    fn push(&mut self, severity: Severity, loc: SourceLocation, message: String) {
        self.diagnostics.push(Diagnostic {
            severity,
            loc,
            message,
        });
    }
}
