//! # Introduction
//!
//! csyn parses a subset of C11 into a homogeneous syntax tree while
//! collecting as many diagnostics as it can in a single pass.  A local syntax
//! error fails only the production it occurred in; parsing resumes at the
//! next statement, declaration, or list-element boundary so that one bad
//! token does not hide every error after it.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → SyntaxTree
//!                     ↓
//!                Diagnostics
//! ```
//!
//! 1. [`parser::lexer`] — tokenises the source into a flat token sequence
//!    terminated by an explicit end-of-input token.
//! 2. [`parser::combinators`] — the generic parsing layer: alternation,
//!    repetition, optionality, delimited and list forms, and
//!    operator-precedence folding, all built on a two-state outcome model
//!    that separates "this rule does not start here" from "this rule
//!    recognised the input but it is malformed".
//! 3. [`parser`] — the grammar itself: expressions (15 precedence levels),
//!    declarations (specifiers, declarators, struct/union/enum), statements,
//!    and the translation unit.
//! 4. [`diagnostics`] — the sink that collects notes, warnings, errors, and
//!    pedantic advisories keyed by line and column.
//!
//! ## Supported C subset
//!
//! Declarations: every C11 declaration-specifier class, pointer, array
//! (including `static` and VLA forms), and function declarators, abstract
//! declarators, bit-fields, designated initializers, `_Static_assert`.
//! Expressions: the full C operator grammar including casts, compound
//! literals, `sizeof`/`_Alignof`, and the comma operator.
//! Statements: labels, compound blocks, `if`/`switch`, `while`/`do`/`for`,
//! and jumps.  No preprocessor (directives are skipped) and no semantic
//! analysis; typedef names are not resolved.

pub mod diagnostics;
pub mod parser;

pub use diagnostics::{Diagnostic, Options, Severity};
pub use parser::Parser;
