//! C source code parser.
//!
//! This module transforms C source text into a syntax tree:
//! - [`lexer`]: tokenization (source text → tokens)
//! - [`combinators`]: the generic parsing layer and its two-state outcome
//!   model
//! - [`ast`]: syntax tree definitions
//! - `expressions` / `declarations` / `statements`: the grammar rules
//!
//! # Parser implementation
//!
//! Hand-written recursive descent.  Every rule maps a position in the token
//! sequence to a new position plus either a tree or an error list; rules
//! that do not apply at a position give up silently so alternation can try
//! the next production, while rules that recognised malformed input report
//! concrete errors and let the enclosing statement or declaration loop
//! resynchronize.  One parse collects as many independent diagnostics as it
//! can; it never stops at the first error.

pub mod ast;
pub mod combinators;
pub mod lexer;

mod declarations;
mod expressions;
mod statements;

use crate::diagnostics::{Diagnostic, Options};

use ast::SyntaxTree;
use combinators::{giveup_to_expected_auto, Outcome, ParserContext, ParserResult};
use lexer::{LexError, Lexer, Token};

/// Recursive descent parser for a C11 subset.
pub struct Parser {
    ctx: ParserContext,
}

impl Parser {
    /// Lexes `source` and prepares a parser over the resulting tokens.
    pub fn new(source: &str, options: Options) -> Result<Self, LexError> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self::from_tokens(tokens, options))
    }

    /// Parses an already-lexed token sequence.  The sequence should end with
    /// an [`lexer::TokenKind::Eof`] token, as [`Lexer::tokenize`] guarantees.
    pub fn from_tokens(tokens: Vec<Token>, options: Options) -> Self {
        Self {
            ctx: ParserContext::new(tokens, options),
        }
    }

    /// Parses the whole unit.  Returns the `CompilationUnit` tree on
    /// success; on failure returns `None` with the collected errors already
    /// delivered to the diagnostic sink.
    pub fn parse_unit(&mut self) -> Option<SyntaxTree> {
        let ParserResult { next, outcome } = statements::compilation_unit(&mut self.ctx, 0);
        debug_assert!(next == self.ctx.end() || self.ctx.end() == 0);

        match giveup_to_expected_auto(outcome) {
            Outcome::Success(tree) => tree,
            Outcome::Failure(errors) => {
                self.ctx.report(errors);
                None
            }
        }
    }

    /// Every diagnostic recorded so far, in emission order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.ctx.diagnostics()
    }

    /// Whether any error-severity diagnostic was recorded.  When true,
    /// downstream phases should not proceed even if a tree was produced.
    pub fn has_errors(&self) -> bool {
        self.ctx.sink().has_errors()
    }
}
