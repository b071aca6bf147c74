//! Statement grammar and the translation-unit entry point.
//!
//! Statement-sequence and external-declaration loops are the
//! resynchronization points of the parser: a malformed statement reports its
//! errors and hands back how far it got, and the enclosing loop carries on
//! from there, so a single pass over the input surfaces every independent
//! error it can find.

use super::ast::{NodeKind, SyntaxTree};
use super::combinators::{
    add_node, add_state, braces, expect_token, giveup_to_expected, giveup_to_expected_auto,
    is_giveup, one_many_of, one_of, parens, Outcome, ParserContext, ParserResult,
};
use super::declarations::{declaration, declaration_specifiers, declarator};
use super::expressions::{constant_expression, expression, identifier};
use super::lexer::TokenKind;

// statement:
//   labeled-statement
//   compound-statement
//   expression-statement
//   selection-statement
//   iteration-statement
//   jump-statement

pub(crate) fn statement(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    one_of(
        ctx,
        pos,
        "statement",
        &[
            &labeled_statement,
            &compound_statement,
            &expression_statement,
            &selection_statement,
            &iteration_statement,
            &jump_statement,
        ],
    )
}

// labeled-statement:
//   identifier ':' statement
//   'case' constant-expression ':' statement
//   'default' ':' statement

pub(crate) fn labeled_statement(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "labeled statement");
    }

    if ctx.kind(pos) == TokenKind::Case {
        let mut label = Outcome::Success(None);

        let ParserResult {
            next: mut expr_it,
            outcome: mut expr,
        } = constant_expression(ctx, pos + 1);

        if expect_token(&mut expr, ctx, expr_it, TokenKind::Colon) {
            expr_it += 1;
        }

        let ParserResult {
            next: stmt_it,
            outcome: stmt,
        } = statement(ctx, expr_it);

        if matches!(&expr, Outcome::Success(_)) && matches!(&stmt, Outcome::Success(_)) {
            add_node(
                &mut label,
                SyntaxTree::with_token(NodeKind::LabeledStatement, ctx.token(pos).clone()),
            );
        }
        add_state(
            &mut label,
            giveup_to_expected(ctx, expr, "constant expression for case-label"),
        );
        add_state(
            &mut label,
            giveup_to_expected(ctx, stmt, "statement after case-label"),
        );

        return ParserResult::new(stmt_it, label);
    }

    if ctx.kind(pos) == TokenKind::Default {
        let mut label = Outcome::Success(Some(SyntaxTree::with_token(
            NodeKind::LabeledStatement,
            ctx.token(pos).clone(),
        )));
        let mut it = pos + 1;

        if expect_token(&mut label, ctx, it, TokenKind::Colon) {
            it += 1;
        }

        let ParserResult {
            next: stmt_it,
            outcome: stmt,
        } = statement(ctx, it);
        add_state(
            &mut label,
            giveup_to_expected(ctx, stmt, "statement after default-label"),
        );

        return ParserResult::new(stmt_it, label);
    }

    if ctx.kind(pos) == TokenKind::Identifier && ctx.kind(pos + 1) == TokenKind::Colon {
        let mut label = Outcome::Success(None);

        let ParserResult {
            next: stmt_it,
            outcome: stmt,
        } = statement(ctx, pos + 2);

        if matches!(&stmt, Outcome::Success(_)) {
            add_node(
                &mut label,
                SyntaxTree::with_token(NodeKind::LabeledStatement, ctx.token(pos).clone()),
            );
        }
        add_state(
            &mut label,
            giveup_to_expected(ctx, stmt, "statement after label"),
        );

        return ParserResult::new(stmt_it, label);
    }

    ParserResult::giveup(pos, "labeled statement")
}

// compound-statement:
//   '{' (declaration | statement)* '}'
//
// Stray ';' inside the block parses as an empty statement and is dropped
// with a pedantic advisory.

pub(crate) fn compound_statement(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() || ctx.kind(pos) != TokenKind::LeftBrace {
        return ParserResult::giveup(pos, "compound statement");
    }

    fn block_item(ctx: &mut ParserContext, pos: usize) -> ParserResult {
        one_of(
            ctx,
            pos,
            "declaration or statement",
            &[&declaration, &statement],
        )
    }

    fn block_item_list(ctx: &mut ParserContext, pos: usize) -> ParserResult {
        let ParserResult { next, outcome } = one_many_of(
            ctx,
            pos,
            "list of block items inside compound statement",
            &block_item,
        );

        if is_giveup(&outcome) {
            return ParserResult::success(pos, SyntaxTree::new(NodeKind::Nothing));
        }
        ParserResult::new(next, outcome)
    }

    let ParserResult { next, outcome } = braces(block_item_list)(ctx, pos);

    let mut stmt = Outcome::Success(None);
    if matches!(&outcome, Outcome::Success(_)) {
        add_node(
            &mut stmt,
            SyntaxTree::with_token(NodeKind::CompoundStatement, ctx.token(pos).clone()),
        );
    }
    add_state(&mut stmt, giveup_to_expected_auto(outcome));

    ParserResult::new(next, stmt)
}

// expression-statement:
//   expression? ';'
//
// A lone ';' is an empty statement: a Nothing node the enclosing block
// drops.

pub(crate) fn expression_statement(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "expression statement");
    }

    if ctx.kind(pos) == TokenKind::Semicolon {
        return ParserResult::success(
            pos + 1,
            SyntaxTree::with_token(NodeKind::Nothing, ctx.token(pos).clone()),
        );
    }

    let ParserResult {
        mut next,
        outcome: mut expr,
    } = expression(ctx, pos);

    if is_giveup(&expr) {
        return ParserResult::new(pos, expr);
    }

    if expect_token(&mut expr, ctx, next, TokenKind::Semicolon) {
        next += 1;
    }

    ParserResult::new(next, expr)
}

// selection-statement:
//   'if' '(' expression ')' statement ('else' statement)?
//   'switch' '(' expression ')' statement

pub(crate) fn selection_statement(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    fn if_statement(ctx: &mut ParserContext, pos: usize) -> ParserResult {
        if ctx.kind(pos) != TokenKind::If {
            return ParserResult::giveup(pos, "");
        }

        let mut stmt = Outcome::Success(Some(SyntaxTree::with_token(
            NodeKind::SelectionStatement,
            ctx.token(pos).clone(),
        )));
        let mut it = pos + 1;

        let ParserResult { next, outcome } = parens(expression)(ctx, it);
        add_state(
            &mut stmt,
            giveup_to_expected(ctx, outcome, "condition for if-clause"),
        );
        it = next;

        let ParserResult { next, outcome } = statement(ctx, it);
        add_state(
            &mut stmt,
            giveup_to_expected(ctx, outcome, "statement for if-clause"),
        );
        it = next;

        if it < ctx.end() && ctx.kind(it) == TokenKind::Else {
            let ParserResult { next, outcome } = statement(ctx, it + 1);
            add_state(
                &mut stmt,
                giveup_to_expected(ctx, outcome, "statement for else-clause"),
            );
            it = next;
        }

        ParserResult::new(it, stmt)
    }

    fn switch_statement(ctx: &mut ParserContext, pos: usize) -> ParserResult {
        if ctx.kind(pos) != TokenKind::Switch {
            return ParserResult::giveup(pos, "");
        }

        let mut stmt = Outcome::Success(Some(SyntaxTree::with_token(
            NodeKind::SelectionStatement,
            ctx.token(pos).clone(),
        )));
        let mut it = pos + 1;

        let ParserResult { next, outcome } = parens(expression)(ctx, it);
        add_state(
            &mut stmt,
            giveup_to_expected(ctx, outcome, "expression for switch-clause"),
        );
        it = next;

        let ParserResult { next, outcome } = statement(ctx, it);
        add_state(
            &mut stmt,
            giveup_to_expected(ctx, outcome, "statement for switch-clause"),
        );
        it = next;

        ParserResult::new(it, stmt)
    }

    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "selection statement");
    }

    one_of(
        ctx,
        pos,
        "selection statement",
        &[&if_statement, &switch_statement],
    )
}

// iteration-statement:
//   'while' '(' expression ')' statement
//   'do' statement 'while' '(' expression ')' ';'
//   'for' '(' (declaration | expression? ';') expression? ';' expression? ')'
//     statement
//
// Absent for-clauses leave a Nothing placeholder so the statement keeps a
// fixed clause arity.

pub(crate) fn iteration_statement(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    fn while_statement(ctx: &mut ParserContext, pos: usize) -> ParserResult {
        if ctx.kind(pos) != TokenKind::While {
            return ParserResult::giveup(pos, "");
        }

        let mut stmt = Outcome::Success(Some(SyntaxTree::with_token(
            NodeKind::IterationStatement,
            ctx.token(pos).clone(),
        )));
        let mut it = pos + 1;

        let ParserResult { next, outcome } = parens(expression)(ctx, it);
        add_state(
            &mut stmt,
            giveup_to_expected(ctx, outcome, "condition for while-clause"),
        );
        it = next;

        let ParserResult { next, outcome } = statement(ctx, it);
        add_state(
            &mut stmt,
            giveup_to_expected(ctx, outcome, "statement for while-clause"),
        );
        it = next;

        ParserResult::new(it, stmt)
    }

    fn do_while_statement(ctx: &mut ParserContext, pos: usize) -> ParserResult {
        if ctx.kind(pos) != TokenKind::Do {
            return ParserResult::giveup(pos, "");
        }

        let mut stmt = Outcome::Success(Some(SyntaxTree::with_token(
            NodeKind::IterationStatement,
            ctx.token(pos).clone(),
        )));
        let mut it = pos + 1;

        let ParserResult { next, outcome } = statement(ctx, it);
        add_state(
            &mut stmt,
            giveup_to_expected(ctx, outcome, "statement for do-while-clause"),
        );
        it = next;

        if expect_token(&mut stmt, ctx, it, TokenKind::While) {
            it += 1;
        }

        let ParserResult { next, outcome } = parens(expression)(ctx, it);
        add_state(
            &mut stmt,
            giveup_to_expected(ctx, outcome, "condition for do-while-clause"),
        );
        it = next;

        if expect_token(&mut stmt, ctx, it, TokenKind::Semicolon) {
            it += 1;
        }

        ParserResult::new(it, stmt)
    }

    fn for_statement(ctx: &mut ParserContext, pos: usize) -> ParserResult {
        if ctx.kind(pos) != TokenKind::For {
            return ParserResult::giveup(pos, "");
        }

        fn for_clauses(ctx: &mut ParserContext, pos: usize) -> ParserResult {
            if pos >= ctx.end() {
                return ParserResult::giveup(pos, "");
            }

            let mut clauses = Outcome::Success(Some(SyntaxTree::collector()));
            let mut it = pos;

            // `for ( here ; ; )` — a declaration consumes its own ';'.
            let decl = declaration(ctx, it);
            if !is_giveup(&decl.outcome) {
                add_state(&mut clauses, decl.outcome);
                it = decl.next;
            } else {
                let ParserResult { next, outcome } = expression(ctx, it);
                if !is_giveup(&outcome) {
                    add_state(&mut clauses, outcome);
                    it = next;
                } else {
                    add_node(&mut clauses, SyntaxTree::new(NodeKind::Nothing));
                }

                if expect_token(&mut clauses, ctx, it, TokenKind::Semicolon) {
                    it += 1;
                }
            }

            // `for ( ; here ; )`
            let ParserResult { next, outcome } = expression(ctx, it);
            if !is_giveup(&outcome) {
                add_state(&mut clauses, outcome);
                it = next;
            } else {
                add_node(&mut clauses, SyntaxTree::new(NodeKind::Nothing));
            }

            if expect_token(&mut clauses, ctx, it, TokenKind::Semicolon) {
                it += 1;
            }

            // `for ( ; ; here )`
            let ParserResult { next, outcome } = expression(ctx, it);
            if !is_giveup(&outcome) {
                add_state(&mut clauses, outcome);
                it = next;
            } else {
                add_node(&mut clauses, SyntaxTree::new(NodeKind::Nothing));
            }

            ParserResult::new(it, clauses)
        }

        let mut stmt = Outcome::Success(Some(SyntaxTree::with_token(
            NodeKind::IterationStatement,
            ctx.token(pos).clone(),
        )));
        let mut it = pos + 1;

        let ParserResult { next, outcome } = parens(for_clauses)(ctx, it);
        add_state(
            &mut stmt,
            giveup_to_expected(ctx, outcome, "expressions separated by ';'"),
        );
        it = next;

        let ParserResult { next, outcome } = statement(ctx, it);
        add_state(
            &mut stmt,
            giveup_to_expected(ctx, outcome, "statement for for-clause"),
        );
        it = next;

        ParserResult::new(it, stmt)
    }

    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "iteration statement");
    }

    one_of(
        ctx,
        pos,
        "iteration statement",
        &[&while_statement, &do_while_statement, &for_statement],
    )
}

// jump-statement:
//   'goto' identifier ';'
//   'continue' ';'
//   'break' ';'
//   'return' expression? ';'

pub(crate) fn jump_statement(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "jump statement");
    }

    match ctx.kind(pos) {
        TokenKind::Goto => {
            let mut stmt = Outcome::Success(None);

            let ParserResult {
                next,
                outcome: ident,
            } = identifier(ctx, pos + 1);
            let mut it = next;

            if matches!(&ident, Outcome::Success(_)) {
                add_node(
                    &mut stmt,
                    SyntaxTree::with_token(NodeKind::JumpStatement, ctx.token(pos).clone()),
                );
            }
            add_state(
                &mut stmt,
                giveup_to_expected(ctx, ident, "label for goto statement"),
            );

            if expect_token(&mut stmt, ctx, it, TokenKind::Semicolon) {
                it += 1;
            }

            ParserResult::new(it, stmt)
        }

        TokenKind::Continue | TokenKind::Break => {
            let mut stmt = Outcome::Success(None);
            let mut it = pos + 1;

            if expect_token(&mut stmt, ctx, it, TokenKind::Semicolon) {
                it += 1;
            }

            if matches!(&stmt, Outcome::Success(_)) {
                add_node(
                    &mut stmt,
                    SyntaxTree::with_token(NodeKind::JumpStatement, ctx.token(pos).clone()),
                );
            }

            ParserResult::new(it, stmt)
        }

        TokenKind::Return => {
            let mut stmt = Outcome::Success(Some(SyntaxTree::with_token(
                NodeKind::JumpStatement,
                ctx.token(pos).clone(),
            )));

            let ParserResult { next, outcome } = expression(ctx, pos + 1);
            let mut it = pos + 1;

            if !is_giveup(&outcome) {
                add_state(&mut stmt, outcome);
                it = next;
            }

            if expect_token(&mut stmt, ctx, it, TokenKind::Semicolon) {
                it += 1;
            }

            ParserResult::new(it, stmt)
        }

        _ => ParserResult::giveup(pos, "jump statement"),
    }
}

// function-definition:
//   declaration-specifiers declarator declaration-list? compound-statement
//
// declaration-list is the K&R parameter declaration block between the
// declarator and the body.

pub(crate) fn function_definition(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    fn declaration_list(ctx: &mut ParserContext, pos: usize) -> ParserResult {
        let ParserResult { next, outcome } = one_many_of(ctx, pos, "declarations", &declaration);

        if matches!(&outcome, Outcome::Success(_)) {
            let mut list = Outcome::Success(Some(SyntaxTree::new(NodeKind::DeclarationList)));
            add_state(&mut list, outcome);
            return ParserResult::new(next, list);
        }
        ParserResult::new(next, outcome)
    }

    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "function definition");
    }

    let ParserResult {
        next: specs_it,
        outcome: specs,
    } = declaration_specifiers(ctx, pos);

    if is_giveup(&specs) {
        return ParserResult::new(pos, specs);
    }

    let ParserResult {
        next: decl_it,
        outcome: decl,
    } = declarator(ctx, specs_it);

    if is_giveup(&decl) {
        return ParserResult::new(pos, decl);
    }

    let mut it = decl_it;
    let mut declarations = None;

    let decls = declaration_list(ctx, it);
    if !is_giveup(&decls.outcome) {
        declarations = Some(decls.outcome);
        it = decls.next;
    }

    let ParserResult {
        next: body_it,
        outcome: body,
    } = compound_statement(ctx, it);
    it = body_it;

    let mut func = Outcome::Success(None);
    if matches!(&decl, Outcome::Success(_)) && matches!(&body, Outcome::Success(_)) {
        add_node(&mut func, SyntaxTree::new(NodeKind::FunctionDefinition));
    }
    add_state(&mut func, specs);
    add_state(&mut func, decl);
    add_state(&mut func, body);
    if let Some(declarations) = declarations {
        add_state(&mut func, declarations);
    }

    ParserResult::new(it, func)
}

// compilation-unit:
//   (function-definition | declaration | ';')* EOF
//
// An unparseable token run is reported once and skipped through the next
// ';' so the loop always makes forward progress.

pub(crate) fn compilation_unit(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "compilation unit");
    }

    let mut unit = Outcome::Success(Some(SyntaxTree::new(NodeKind::CompilationUnit)));
    let mut it = pos;

    while it < ctx.end() {
        match ctx.kind(it) {
            TokenKind::Eof => {
                it += 1;
                break;
            }
            TokenKind::Semicolon => {
                it += 1;
            }
            _ => {
                let ParserResult { next, outcome } = one_of(
                    ctx,
                    it,
                    "external declaration",
                    &[&function_definition, &declaration],
                );

                let stalled = is_giveup(&outcome);
                add_state(&mut unit, giveup_to_expected_auto(outcome));

                if stalled {
                    // Resynchronize past the next ';'.
                    while it < ctx.end()
                        && !matches!(ctx.kind(it), TokenKind::Semicolon | TokenKind::Eof)
                    {
                        it += 1;
                    }
                    if ctx.kind(it) == TokenKind::Semicolon {
                        it += 1;
                    }
                } else if next == it {
                    it += 1;
                } else {
                    it = next;
                }
            }
        }
    }

    ParserResult::new(it, unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Options;
    use crate::parser::lexer::Lexer;

    fn context(source: &str) -> ParserContext {
        let tokens = Lexer::new(source).tokenize().expect("lexing failed");
        ParserContext::new(tokens, Options::default())
    }

    fn parse_statement(source: &str) -> SyntaxTree {
        let mut ctx = context(source);
        let result = statement(&mut ctx, 0);
        match result.outcome {
            Outcome::Success(Some(tree)) => tree,
            other => panic!("statement did not parse: {:?}", other),
        }
    }

    #[test]
    fn test_if_else() {
        let tree = parse_statement("if (x) return 1; else return 0;");
        assert_eq!(tree.kind(), NodeKind::SelectionStatement);
        assert_eq!(tree.text(), Some("if"));
        assert_eq!(tree.child_count(), 3);
        assert_eq!(tree.child(0).kind(), NodeKind::Identifier);
        assert_eq!(tree.child(1).kind(), NodeKind::JumpStatement);
        assert_eq!(tree.child(2).kind(), NodeKind::JumpStatement);
    }

    #[test]
    fn test_while_loop() {
        let tree = parse_statement("while (n > 0) n--;");
        assert_eq!(tree.kind(), NodeKind::IterationStatement);
        assert_eq!(tree.text(), Some("while"));
        assert_eq!(tree.child(0).kind(), NodeKind::RelationalExpression);
        assert_eq!(tree.child(1).kind(), NodeKind::PostfixDecrement);
    }

    #[test]
    fn test_do_while_loop() {
        let tree = parse_statement("do { n--; } while (n);");
        assert_eq!(tree.kind(), NodeKind::IterationStatement);
        assert_eq!(tree.text(), Some("do"));
        assert_eq!(tree.child(0).kind(), NodeKind::CompoundStatement);
        assert_eq!(tree.child(1).kind(), NodeKind::Identifier);
    }

    #[test]
    fn test_for_with_declaration() {
        let tree = parse_statement("for (int i = 0; i < 10; i++) ;");
        assert_eq!(tree.kind(), NodeKind::IterationStatement);
        assert_eq!(tree.text(), Some("for"));
        assert_eq!(tree.child(0).kind(), NodeKind::Declaration);
        assert_eq!(tree.child(1).kind(), NodeKind::RelationalExpression);
        assert_eq!(tree.child(2).kind(), NodeKind::PostfixIncrement);
        assert_eq!(tree.child(3).kind(), NodeKind::Nothing);
    }

    #[test]
    fn test_empty_for_keeps_placeholders() {
        let tree = parse_statement("for (;;) break;");
        assert_eq!(tree.kind(), NodeKind::IterationStatement);
        assert_eq!(tree.child_count(), 4);
        assert_eq!(tree.child(0).kind(), NodeKind::Nothing);
        assert_eq!(tree.child(1).kind(), NodeKind::Nothing);
        assert_eq!(tree.child(2).kind(), NodeKind::Nothing);
        assert_eq!(tree.child(3).kind(), NodeKind::JumpStatement);
    }

    #[test]
    fn test_switch_with_cases() {
        let tree = parse_statement("switch (c) { case 1: break; default: break; }");
        assert_eq!(tree.kind(), NodeKind::SelectionStatement);
        assert_eq!(tree.text(), Some("switch"));
        let body = tree.child(1);
        assert_eq!(body.kind(), NodeKind::CompoundStatement);
        assert_eq!(body.child(0).kind(), NodeKind::LabeledStatement);
        assert_eq!(body.child(0).text(), Some("case"));
        assert_eq!(body.child(1).kind(), NodeKind::LabeledStatement);
        assert_eq!(body.child(1).text(), Some("default"));
    }

    #[test]
    fn test_goto_and_label() {
        let tree = parse_statement("again: goto again;");
        assert_eq!(tree.kind(), NodeKind::LabeledStatement);
        assert_eq!(tree.text(), Some("again"));
        assert_eq!(tree.child(0).kind(), NodeKind::JumpStatement);
        assert_eq!(tree.child(0).text(), Some("goto"));
    }

    #[test]
    fn test_return_without_value() {
        let tree = parse_statement("return;");
        assert_eq!(tree.kind(), NodeKind::JumpStatement);
        assert_eq!(tree.child_count(), 0);
    }

    fn parse_unit(source: &str) -> SyntaxTree {
        let mut ctx = context(source);
        let result = compilation_unit(&mut ctx, 0);
        match result.outcome {
            Outcome::Success(Some(tree)) => tree,
            other => panic!("unit did not parse: {:?}", other),
        }
    }

    #[test]
    fn test_minimal_function_shape() {
        let tree = parse_unit("int main(){return 0;}");
        assert_eq!(tree.kind(), NodeKind::CompilationUnit);
        assert_eq!(tree.child_count(), 1);

        let func = tree.child(0);
        assert_eq!(func.kind(), NodeKind::FunctionDefinition);
        assert_eq!(func.child_count(), 3);

        let specs = func.child(0);
        assert_eq!(specs.kind(), NodeKind::DeclarationSpecifiers);
        assert_eq!(specs.child(0).text(), Some("int"));

        let decl = func.child(1);
        assert_eq!(decl.kind(), NodeKind::Declarator);
        assert_eq!(decl.child(0).kind(), NodeKind::Identifier);
        assert_eq!(decl.child(0).text(), Some("main"));
        assert_eq!(decl.child(1).kind(), NodeKind::FunctionDeclarator);
        assert_eq!(decl.child(1).child_count(), 0);

        let body = func.child(2);
        assert_eq!(body.kind(), NodeKind::CompoundStatement);
        assert_eq!(body.child(0).kind(), NodeKind::JumpStatement);
        assert_eq!(body.child(0).child(0).kind(), NodeKind::IntegerConstant);
        assert_eq!(body.child(0).child(0).text(), Some("0"));
    }

    #[test]
    fn test_unit_mixes_functions_and_declarations() {
        let tree = parse_unit("int x; int main(){return x;} ;");
        assert_eq!(tree.child_count(), 2);
        assert_eq!(tree.child(0).kind(), NodeKind::Declaration);
        assert_eq!(tree.child(1).kind(), NodeKind::FunctionDefinition);
    }

    #[test]
    fn test_empty_unit() {
        let tree = parse_unit("");
        assert_eq!(tree.kind(), NodeKind::CompilationUnit);
        assert_eq!(tree.child_count(), 0);
    }
}
