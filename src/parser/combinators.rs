//! The generic parsing layer.
//!
//! Every grammar rule has the same shape: `(&mut ParserContext, position) ->
//! ParserResult`.  A rule either succeeds with an optional tree, or fails
//! with an ordered list of errors.  The crucial distinction inside a failure
//! is [`Status::GiveUp`] ("this production does not start here" — silent,
//! drives alternation) versus [`Status::Error`] ("this production was
//! recognised but is malformed" — always surfaced).  Once a rule commits to
//! a syntactic context where only one production is legal, leftover GiveUps
//! are promoted to concrete "expected ..." errors via
//! [`giveup_to_expected`].
//!
//! Positions only move forward.  A GiveUp outcome hands the rule's entry
//! position back to the caller; an Error outcome hands back how far the rule
//! got, so enclosing repetition combinators can resynchronise there instead
//! of aborting the whole parse.

use crate::diagnostics::{Diagnostic, DiagnosticSink, Options};

use super::ast::{NodeKind, SyntaxTree};
use super::lexer::{Token, TokenKind};

/// Internal severity of a single parse error.
///
/// `GiveUp` never reaches the diagnostic sink; `Note` always chains to the
/// `Error` recorded immediately before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    GiveUp,
    Error,
    Note,
}

/// One parse error: what happened, at which token, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub status: Status,
    pub at: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(status: Status, at: usize, message: impl Into<String>) -> Self {
        Self {
            status,
            at,
            message: message.into(),
        }
    }
}

/// Outcome of a parse attempt.  `Success(None)` means "matched, produced no
/// node" and is distinct from failure.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Success(Option<SyntaxTree>),
    Failure(Vec<ParseError>),
}

/// Return value of every rule: the next position plus the outcome.  The
/// consumed range from the entry position to `next` is contiguous and never
/// retreats.
#[derive(Debug)]
pub struct ParserResult {
    pub next: usize,
    pub outcome: Outcome,
}

impl ParserResult {
    pub fn new(next: usize, outcome: Outcome) -> Self {
        Self { next, outcome }
    }

    pub fn success(next: usize, tree: SyntaxTree) -> Self {
        Self::new(next, Outcome::Success(Some(tree)))
    }

    pub fn giveup(pos: usize, what: impl Into<String>) -> Self {
        Self::new(pos, make_error(Status::GiveUp, pos, what))
    }
}

/// A grammar rule.  Plain functions and capturing closures both qualify.
pub trait Rule: Fn(&mut ParserContext, usize) -> ParserResult {}

impl<F: Fn(&mut ParserContext, usize) -> ParserResult> Rule for F {}

/// The state threaded through the whole parse: the token sequence, the
/// diagnostic sink, the scoped "inside specifiers" commitment flag, and the
/// delimiter nesting depth.
pub struct ParserContext {
    tokens: Vec<Token>,
    sink: DiagnosticSink,
    /// Set while parsing struct/union/enum/atomic type specifiers, where a
    /// missing ';' after the specifier is diagnosable.  Saved and restored
    /// around the specifier sub-parse.
    pub(crate) inside_specifiers: bool,
    depth: usize,
}

impl ParserContext {
    pub fn new(tokens: Vec<Token>, options: Options) -> Self {
        Self {
            tokens,
            sink: DiagnosticSink::new(options),
            inside_specifiers: false,
            depth: 0,
        }
    }

    /// One past the last valid position.
    pub fn end(&self) -> usize {
        self.tokens.len()
    }

    /// Token kind at `pos`; positions past the end read as `Eof`.
    pub fn kind(&self, pos: usize) -> TokenKind {
        self.tokens.get(pos).map_or(TokenKind::Eof, |t| t.kind)
    }

    pub fn token(&self, pos: usize) -> &Token {
        &self.tokens[pos]
    }

    pub fn text(&self, pos: usize) -> &str {
        &self.tokens[pos].text
    }

    pub fn sink(&self) -> &DiagnosticSink {
        &self.sink
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.sink.diagnostics()
    }

    pub fn pedantic(&mut self, pos: usize, message: &str) {
        if pos < self.end() {
            let loc = self.tokens[pos].loc;
            self.sink.pedantic(loc, message);
        }
    }

    fn max_nesting(&self) -> usize {
        self.sink.options().max_nesting
    }

    /// Delivers a failure's errors to the sink, mapping `Note` entries to
    /// notes and everything else to errors.  Entries pointing past the token
    /// sequence are dropped.
    pub fn report(&mut self, errors: Vec<ParseError>) {
        for error in errors {
            if error.at >= self.tokens.len() {
                continue;
            }
            let loc = self.tokens[error.at].loc;
            match error.status {
                Status::Note => self.sink.note(loc, error.message),
                _ => self.sink.error(loc, error.message),
            }
        }
    }
}

/// Constructs a failure outcome holding one error.
pub fn make_error(status: Status, at: usize, message: impl Into<String>) -> Outcome {
    Outcome::Failure(vec![ParseError::new(status, at, message)])
}

/// Appends `error` to `state`; a success becomes a failure.
pub fn add_error(state: &mut Outcome, error: ParseError) {
    match state {
        Outcome::Success(_) => *state = Outcome::Failure(vec![error]),
        Outcome::Failure(errors) => errors.push(error),
    }
}

fn add_errors(state: &mut Outcome, errors: Vec<ParseError>) {
    for error in errors {
        add_error(state, error);
    }
}

/// Whether `state` is a failure consisting solely of GiveUp errors, i.e.
/// the rule did not apply at all.
pub fn is_giveup(state: &Outcome) -> bool {
    match state {
        Outcome::Success(_) => false,
        Outcome::Failure(errors) => errors.iter().all(|e| e.status == Status::GiveUp),
    }
}

/// Adds `node` to the state's tree if it is a success: the node becomes the
/// tree if there is none yet, is spliced away if it is elidable, and is
/// appended as a child otherwise.
pub fn add_node(state: &mut Outcome, node: SyntaxTree) {
    if let Outcome::Success(slot) = state {
        match slot {
            None => *slot = Some(node),
            Some(tree) => {
                if node.is_elidable() {
                    tree.splice_children(node);
                } else {
                    tree.add_child(node);
                }
            }
        }
    }
}

/// Accumulates one outcome into another.  Failure dominates: merging a
/// success into a failure discards the tree; merging failures concatenates
/// their error lists.
pub fn add_state(state: &mut Outcome, other: Outcome) {
    match other {
        Outcome::Success(Some(tree)) => add_node(state, tree),
        Outcome::Success(None) => {}
        Outcome::Failure(errors) => add_errors(state, errors),
    }
}

/// Promotes GiveUp entries to "expected `what`" errors once a production is
/// committed and can no longer backtrack.  A GiveUp that carried descriptive
/// text keeps it as an attached note pointing at the offending token.
pub fn giveup_to_expected(ctx: &ParserContext, state: Outcome, what: &str) -> Outcome {
    match state {
        Outcome::Failure(errors) => {
            let mut promoted = Outcome::Success(None);
            for error in errors {
                if error.status == Status::GiveUp {
                    add_error(
                        &mut promoted,
                        ParseError::new(Status::Error, error.at, format!("expected {}", what)),
                    );
                    if !error.message.is_empty() {
                        let found = ctx.kind(error.at);
                        add_error(
                            &mut promoted,
                            ParseError::new(
                                Status::Note,
                                error.at,
                                format!("{} instead of this {}", error.message, found),
                            ),
                        );
                    }
                } else {
                    add_error(&mut promoted, error);
                }
            }
            promoted
        }
        success => success,
    }
}

/// Promotion variant for call sites without their own description: the
/// GiveUp's descriptive text becomes the expected-message itself.
pub fn giveup_to_expected_auto(state: Outcome) -> Outcome {
    match state {
        Outcome::Failure(errors) => {
            let mut promoted = Outcome::Success(None);
            for error in errors {
                if error.status == Status::GiveUp {
                    add_error(
                        &mut promoted,
                        ParseError::new(
                            Status::Error,
                            error.at,
                            format!("expected {}", error.message),
                        ),
                    );
                } else {
                    add_error(&mut promoted, error);
                }
            }
            promoted
        }
        success => success,
    }
}

/// Requires the token at `pos` to be `kind`; records an error into `state`
/// otherwise.  Returns whether the caller should advance past it.
pub fn expect_token(state: &mut Outcome, ctx: &ParserContext, pos: usize, kind: TokenKind) -> bool {
    if pos < ctx.end() && ctx.kind(pos) != kind {
        add_error(
            state,
            ParseError::new(
                Status::Error,
                pos,
                format!("expected {} before {}", kind, ctx.kind(pos)),
            ),
        );
        return false;
    }
    pos < ctx.end()
}

/// Like [`expect_token`] for closing delimiters: a mismatch also records a
/// note pointing back at the opening token.
pub fn expect_end_token(
    state: &mut Outcome,
    ctx: &ParserContext,
    open: usize,
    pos: usize,
    kind: TokenKind,
) -> bool {
    if pos < ctx.end() {
        if ctx.kind(pos) != kind {
            add_error(
                state,
                ParseError::new(Status::Error, pos, format!("expected {}", kind)),
            );
            add_error(
                state,
                ParseError::new(
                    Status::Note,
                    open,
                    format!("to match this {}", ctx.kind(open)),
                ),
            );
            return false;
        }
        true
    } else {
        add_error(
            state,
            ParseError::new(Status::Error, open, format!("missing {} for this", kind)),
        );
        false
    }
}

/// Tries each rule in order; the first outcome that is not a GiveUp wins and
/// is returned as-is, including its own errors.  If every rule gives up, the
/// individual errors are discarded and a single "expected `expected_what`"
/// GiveUp at the entry position stands in for them.
pub fn one_of(
    ctx: &mut ParserContext,
    pos: usize,
    expected_what: &str,
    rules: &[&dyn Rule],
) -> ParserResult {
    for rule in rules {
        let result = rule(ctx, pos);
        if !is_giveup(&result.outcome) {
            return result;
        }
    }
    ParserResult::giveup(pos, expected_what)
}

/// Repeats `rule` while `pred` holds on the current token.  Zero repetitions
/// are fine; a non-GiveUp failure from `rule` aborts the loop and surfaces in
/// the outcome.
pub fn many_of(
    ctx: &mut ParserContext,
    pos: usize,
    rule: &dyn Rule,
    pred: impl Fn(&Token) -> bool,
) -> ParserResult {
    let mut state = Outcome::Success(Some(SyntaxTree::collector()));
    let mut it = pos;

    while it < ctx.end() && pred(ctx.token(it)) {
        let ParserResult { next, outcome } = rule(ctx, it);
        let failed = matches!(outcome, Outcome::Failure(_)) && !is_giveup(&outcome);
        add_state(&mut state, outcome);
        if next == it {
            break;
        }
        it = next;
        if failed {
            break;
        }
    }

    ParserResult::new(it, state)
}

fn is_empty_node(state: &Outcome) -> bool {
    matches!(state, Outcome::Success(Some(tree)) if tree.kind() == NodeKind::Nothing)
}

/// Requires at least one successful application of `rule`, then keeps going
/// until it gives up.  Degenerate "nothing" nodes (stray semicolons) are
/// dropped with a pedantic advisory instead of entering the tree.
pub fn one_many_of(
    ctx: &mut ParserContext,
    pos: usize,
    expected_what: &str,
    rule: &dyn Rule,
) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, expected_what);
    }

    let mut state = Outcome::Success(Some(SyntaxTree::collector()));
    let mut it = pos;

    let ParserResult { next, outcome } = rule(ctx, it);
    if is_giveup(&outcome) {
        return ParserResult::giveup(pos, expected_what);
    }
    if is_empty_node(&outcome) {
        ctx.pedantic(it, "empty statement");
    } else {
        add_state(&mut state, outcome);
    }
    it = next;

    while it < ctx.end() {
        let ParserResult { next, outcome } = rule(ctx, it);
        if is_giveup(&outcome) {
            break;
        }
        if is_empty_node(&outcome) {
            ctx.pedantic(it, "empty statement");
        } else {
            add_state(&mut state, outcome);
        }
        // Bail if the rule made no progress.
        if next == it {
            break;
        }
        it = next;
    }

    ParserResult::new(it, state)
}

/// One-or-more variant driven by a token predicate: applies `rule` once,
/// then again as long as `pred` holds on the next token, accumulating every
/// outcome (including failures) so the whole run is reported at once.
pub fn one_many_of_while(
    ctx: &mut ParserContext,
    pos: usize,
    expected_what: &str,
    rule: &dyn Rule,
    pred: impl Fn(&Token) -> bool,
) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, expected_what);
    }

    let mut state = Outcome::Success(Some(SyntaxTree::collector()));
    let mut it = pos;

    loop {
        let ParserResult { next, outcome } = rule(ctx, it);
        add_state(&mut state, outcome);
        let stalled = next == it;
        it = next;
        if stalled || it >= ctx.end() || !pred(ctx.token(it)) {
            break;
        }
    }

    ParserResult::new(it, state)
}

/// Consumes exactly one token satisfying `matches`, wrapping it as a leaf of
/// the given kind; gives up without consuming otherwise.
pub fn operator(
    kind: NodeKind,
    matches: impl Fn(&Token) -> bool,
) -> impl Fn(&mut ParserContext, usize) -> ParserResult {
    move |ctx, pos| {
        if pos < ctx.end() && matches(ctx.token(pos)) {
            ParserResult::success(
                pos + 1,
                SyntaxTree::with_token(kind, ctx.token(pos).clone()),
            )
        } else {
            ParserResult::giveup(pos, kind.to_string())
        }
    }
}

/// Left-associative operator folding: parses `lhs` once, then loops matching
/// `op` and `rhs`, folding each round into a fresh operator node whose
/// children are the accumulated left tree and the new right tree.  When the
/// right operand fails, the cursor still advances one token so the loop is
/// guaranteed to terminate, and the failure is promoted to
/// "expected expression for operator '...'".
pub fn left_binary_operator<L: Rule, O: Rule, R: Rule>(
    lhs_rule: L,
    op_rule: O,
    rhs_rule: R,
) -> impl Fn(&mut ParserContext, usize) -> ParserResult {
    move |ctx, pos| {
        if pos >= ctx.end() {
            return ParserResult::giveup(pos, "binary operator");
        }

        let ParserResult {
            next: mut lhs_it,
            outcome: mut lhs_state,
        } = lhs_rule(ctx, pos);

        if is_giveup(&lhs_state) {
            return ParserResult::new(pos, lhs_state);
        }

        loop {
            let ParserResult {
                next: op_it,
                outcome: mut op_state,
            } = op_rule(ctx, lhs_it);

            if is_giveup(&op_state) {
                break;
            }

            let op_text = ctx.text(lhs_it).to_string();
            let ParserResult {
                next: rhs_it,
                outcome: rhs_state,
            } = rhs_rule(ctx, op_it);

            lhs_it = if matches!(rhs_state, Outcome::Success(_)) {
                rhs_it
            } else if op_it < ctx.end() {
                op_it + 1
            } else {
                op_it
            };

            let what = format!("expression for operator '{}'", op_text);
            add_state(&mut op_state, giveup_to_expected(ctx, lhs_state, &what));
            add_state(&mut op_state, giveup_to_expected(ctx, rhs_state, &what));
            lhs_state = op_state;
        }

        ParserResult::new(lhs_it, lhs_state)
    }
}

/// Right-associative operator folding: a single `lhs op rhs` attempt where
/// `rhs_rule` is the combined rule itself, so chained operators recurse to
/// the right.  Any non-match at `op` is a GiveUp.
pub fn right_binary_operator<L: Rule, O: Rule, R: Rule>(
    lhs_rule: L,
    op_rule: O,
    rhs_rule: R,
) -> impl Fn(&mut ParserContext, usize) -> ParserResult {
    move |ctx, pos| {
        if pos < ctx.end() {
            let ParserResult {
                next: lhs_it,
                outcome: lhs_state,
            } = lhs_rule(ctx, pos);

            if !is_giveup(&lhs_state) {
                let ParserResult {
                    next: op_it,
                    outcome: mut op_state,
                } = op_rule(ctx, lhs_it);

                if !is_giveup(&op_state) {
                    let op_text = ctx.text(lhs_it).to_string();
                    let ParserResult {
                        next: rhs_it,
                        outcome: rhs_state,
                    } = rhs_rule(ctx, op_it);

                    let what = format!("expression for operator '{}'", op_text);
                    add_state(&mut op_state, lhs_state);
                    add_state(&mut op_state, giveup_to_expected(ctx, rhs_state, &what));

                    return ParserResult::new(rhs_it, op_state);
                }
            }
        }

        ParserResult::giveup(pos, "binary operator")
    }
}

/// Converts a GiveUp from `rule` into a neutral "nothing" node at the
/// unchanged position; never itself fails.
pub fn opt<R: Rule>(rule: R) -> impl Fn(&mut ParserContext, usize) -> ParserResult {
    move |ctx, pos| {
        let result = rule(ctx, pos);
        if !is_giveup(&result.outcome) {
            result
        } else {
            ParserResult::success(pos, SyntaxTree::new(NodeKind::Nothing))
        }
    }
}

/// Requires the literal `open` token (GiveUp otherwise, without consuming),
/// parses `rule`, then requires `close`, reporting a missing close with a
/// note pointing back at the opening token.  Also meters delimiter nesting
/// against the configured limit.
pub fn delimited<R: Rule>(
    rule: R,
    open: TokenKind,
    close: TokenKind,
) -> impl Fn(&mut ParserContext, usize) -> ParserResult {
    move |ctx, pos| {
        if pos < ctx.end() && ctx.kind(pos) == open {
            if ctx.depth >= ctx.max_nesting() {
                return ParserResult::new(
                    pos + 1,
                    make_error(Status::Error, pos, "too many levels of nesting"),
                );
            }

            ctx.depth += 1;
            let ParserResult {
                mut next,
                mut outcome,
            } = rule(ctx, pos + 1);
            ctx.depth -= 1;

            if is_giveup(&outcome) {
                return ParserResult::new(pos, outcome);
            }
            if expect_end_token(&mut outcome, ctx, pos, next, close) {
                next += 1;
            }
            return ParserResult::new(next, outcome);
        }

        ParserResult::giveup(pos, open.to_string())
    }
}

pub fn parens<R: Rule>(rule: R) -> impl Fn(&mut ParserContext, usize) -> ParserResult {
    delimited(rule, TokenKind::LeftParen, TokenKind::RightParen)
}

pub fn braces<R: Rule>(rule: R) -> impl Fn(&mut ParserContext, usize) -> ParserResult {
    delimited(rule, TokenKind::LeftBrace, TokenKind::RightBrace)
}

pub fn brackets<R: Rule>(rule: R) -> impl Fn(&mut ParserContext, usize) -> ParserResult {
    delimited(rule, TokenKind::LeftBracket, TokenKind::RightBracket)
}

/// Comma-separated repetition.  The list context is already committed, so an
/// element's GiveUp is promoted to a concrete "expected" error.  The loop
/// ends when no comma follows the element; with `allow_trailing_comma`, a
/// closing delimiter right after a comma also ends it.
pub fn list_of<R: Rule>(
    rule: R,
    allow_trailing_comma: bool,
) -> impl Fn(&mut ParserContext, usize) -> ParserResult {
    move |ctx, pos| {
        if pos >= ctx.end() {
            return ParserResult::giveup(pos, "list");
        }

        let mut state = Outcome::Success(Some(SyntaxTree::collector()));
        let mut it = pos;

        while it < ctx.end() {
            let ParserResult { next, outcome } = rule(ctx, it);
            add_state(&mut state, giveup_to_expected_auto(outcome));
            it = next;

            if it < ctx.end() && ctx.kind(it) == TokenKind::Comma {
                it += 1;
            }

            if allow_trailing_comma
                && matches!(
                    ctx.kind(it),
                    TokenKind::RightBrace | TokenKind::RightBracket | TokenKind::RightParen
                )
            {
                break;
            }

            if next >= ctx.end() || ctx.kind(next) != TokenKind::Comma {
                break;
            }
        }

        ParserResult::new(it, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::expressions::{assignment_expression, identifier};
    use crate::parser::lexer::Lexer;

    fn context(source: &str) -> ParserContext {
        let tokens = Lexer::new(source).tokenize().expect("lexing failed");
        ParserContext::new(tokens, Options::default())
    }

    fn never(_: &mut ParserContext, pos: usize) -> ParserResult {
        ParserResult::giveup(pos, "never")
    }

    #[test]
    fn test_one_of_keeps_first_applicable_result() {
        let mut ctx = context("x");
        let result = one_of(&mut ctx, 0, "something", &[&never, &identifier]);
        assert_eq!(result.next, 1);
        assert!(matches!(result.outcome, Outcome::Success(Some(_))));
    }

    #[test]
    fn test_one_of_synthesizes_single_giveup() {
        let mut ctx = context("42");
        let result = one_of(&mut ctx, 0, "a name of some kind", &[&never, &never]);
        assert_eq!(result.next, 0);
        match result.outcome {
            Outcome::Failure(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].status, Status::GiveUp);
                assert_eq!(errors[0].message, "a name of some kind");
            }
            _ => panic!("expected failure"),
        }
    }

    #[test]
    fn test_opt_turns_giveup_into_nothing() {
        let mut ctx = context("42");
        let result = opt(identifier)(&mut ctx, 0);
        assert_eq!(result.next, 0);
        match result.outcome {
            Outcome::Success(Some(tree)) => assert_eq!(tree.kind(), NodeKind::Nothing),
            _ => panic!("expected a nothing node"),
        }
    }

    #[test]
    fn test_many_of_stops_at_predicate() {
        let mut ctx = context("a b c 1");
        let result = many_of(&mut ctx, 0, &identifier, |t| {
            t.kind == TokenKind::Identifier
        });
        assert_eq!(result.next, 3);
        match result.outcome {
            Outcome::Success(Some(tree)) => assert_eq!(tree.child_count(), 3),
            _ => panic!("expected success"),
        }
    }

    #[test]
    fn test_many_of_aborts_on_hard_failure() {
        // The second group is malformed; the loop must stop there and
        // surface the delimiter error.
        let mut ctx = context("(a) (b c");
        let group = parens(identifier);
        let result = many_of(&mut ctx, 0, &group, |t| t.kind == TokenKind::LeftParen);
        match result.outcome {
            Outcome::Failure(errors) => {
                assert!(errors.iter().any(|e| e.status == Status::Error));
            }
            _ => panic!("expected the failure to surface"),
        }
        assert_eq!(result.next, 5);
    }

    #[test]
    fn test_many_of_accepts_zero_repetitions() {
        let mut ctx = context("1");
        let result = many_of(&mut ctx, 0, &identifier, |t| {
            t.kind == TokenKind::Identifier
        });
        assert_eq!(result.next, 0);
        assert!(matches!(result.outcome, Outcome::Success(_)));
    }

    #[test]
    fn test_one_many_of_requires_one() {
        let mut ctx = context("1 2");
        let result = one_many_of(&mut ctx, 0, "identifiers", &identifier);
        assert!(is_giveup(&result.outcome));
        assert_eq!(result.next, 0);
    }

    #[test]
    fn test_parens_reports_missing_close_with_note() {
        let mut ctx = context("(a;");
        let result = parens(identifier)(&mut ctx, 0);
        match result.outcome {
            Outcome::Failure(errors) => {
                assert_eq!(errors[0].status, Status::Error);
                assert!(errors[0].message.contains("expected ')'"));
                assert_eq!(errors[1].status, Status::Note);
                assert!(errors[1].message.contains("to match this '('"));
                assert_eq!(errors[1].at, 0);
            }
            _ => panic!("expected failure"),
        }
    }

    #[test]
    fn test_parens_gives_up_without_open() {
        let mut ctx = context("a");
        let result = parens(identifier)(&mut ctx, 0);
        assert!(is_giveup(&result.outcome));
        assert_eq!(result.next, 0);
    }

    #[test]
    fn test_nesting_limit_fails_cleanly() {
        let mut ctx = ParserContext::new(
            Lexer::new("((((a))))").tokenize().unwrap(),
            Options {
                max_nesting: 2,
                ..Options::default()
            },
        );

        fn nested(ctx: &mut ParserContext, pos: usize) -> ParserResult {
            if ctx.kind(pos) == TokenKind::LeftParen {
                parens(nested)(ctx, pos)
            } else {
                identifier(ctx, pos)
            }
        }

        let result = nested(&mut ctx, 0);
        match result.outcome {
            Outcome::Failure(errors) => {
                assert!(errors
                    .iter()
                    .any(|e| e.message.contains("too many levels of nesting")));
            }
            _ => panic!("expected the depth limit to trip"),
        }
    }

    #[test]
    fn test_list_of_collects_elements() {
        let mut ctx = context("a, b, c");
        let result = list_of(identifier, false)(&mut ctx, 0);
        assert_eq!(result.next, 5);
        match result.outcome {
            Outcome::Success(Some(tree)) => assert_eq!(tree.child_count(), 3),
            _ => panic!("expected success"),
        }
    }

    #[test]
    fn test_list_of_promotes_element_giveup() {
        let mut ctx = context("a, 1");
        let result = list_of(identifier, false)(&mut ctx, 0);
        match result.outcome {
            Outcome::Failure(errors) => {
                assert!(errors.iter().any(|e| e.status == Status::Error
                    && e.message.contains("expected identifier")));
            }
            _ => panic!("expected failure"),
        }
    }

    #[test]
    fn test_list_of_trailing_comma() {
        let mut ctx = context("a, b, }");
        let result = list_of(identifier, true)(&mut ctx, 0);
        assert_eq!(result.next, 4);
        assert!(matches!(result.outcome, Outcome::Success(_)));
    }

    #[test]
    fn test_giveup_promotion_preserves_descriptive_text() {
        let ctx = context("42");
        let state = make_error(Status::GiveUp, 0, "identifier");
        match giveup_to_expected(&ctx, state, "declarator") {
            Outcome::Failure(errors) => {
                assert_eq!(errors[0].message, "expected declarator");
                assert_eq!(errors[1].status, Status::Note);
                assert_eq!(
                    errors[1].message,
                    "identifier instead of this integer constant"
                );
            }
            _ => panic!("expected failure"),
        }
    }

    #[test]
    fn test_failure_dominates_merge() {
        let mut state = make_error(Status::Error, 0, "broken");
        add_state(
            &mut state,
            Outcome::Success(Some(SyntaxTree::new(NodeKind::Expression))),
        );
        match state {
            Outcome::Failure(errors) => assert_eq!(errors.len(), 1),
            _ => panic!("failure must dominate"),
        }
    }

    #[test]
    fn test_operand_failure_still_advances() {
        // `1 + ;` must produce exactly one error for the missing operand and
        // leave the cursor past the ';' so the caller can resynchronise.
        let mut ctx = context("1 + ;");
        let result = assignment_expression(&mut ctx, 0);
        assert_eq!(result.next, 3);
        match result.outcome {
            Outcome::Failure(errors) => {
                let hard: Vec<_> = errors
                    .iter()
                    .filter(|e| e.status == Status::Error)
                    .collect();
                assert_eq!(hard.len(), 1);
                assert_eq!(hard[0].message, "expected expression for operator '+'");
            }
            _ => panic!("expected failure"),
        }
    }
}
