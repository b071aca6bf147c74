//! Expression grammar: lexical leaves, postfix/unary/cast forms, the ten
//! binary precedence levels, and the conditional/assignment/comma layers.
//!
//! Precedence is encoded structurally: each level parses the next-tighter
//! level as its operands, so `a + b * c` folds the multiplication first
//! without any explicit precedence table.  Two ambiguities are resolved by
//! bounded lookahead: a parenthesized type name followed by `{` is a
//! compound literal rather than a cast, and `sizeof` tries the
//! type-name-in-parentheses reading before the general unary expression.

use super::ast::{NodeKind, SyntaxTree};
use super::combinators::{
    add_state, braces, expect_end_token, giveup_to_expected, giveup_to_expected_auto, is_giveup,
    left_binary_operator, list_of, one_many_of_while, one_of, operator, parens,
    right_binary_operator, Outcome, ParserContext, ParserResult,
};
use super::declarations::{initializer_list, type_name};
use super::lexer::TokenKind;

// identifier:
//   [a-zA-Z_] ([a-zA-Z_] | [0-9])*

pub(crate) fn identifier(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos < ctx.end() && ctx.kind(pos) == TokenKind::Identifier {
        let tree = SyntaxTree::with_token(NodeKind::Identifier, ctx.token(pos).clone());
        return ParserResult::success(pos + 1, tree);
    }
    ParserResult::giveup(pos, "identifier")
}

// constant:
//   integer-constant
//   floating-constant
//   character-constant
//   enumeration-constant

pub(crate) fn constant(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "constant");
    }

    let kind = match ctx.kind(pos) {
        TokenKind::IntegerConstant
        | TokenKind::OctIntegerConstant
        | TokenKind::HexIntegerConstant => NodeKind::IntegerConstant,
        TokenKind::FloatConstant => NodeKind::FloatingConstant,
        TokenKind::CharConstant => NodeKind::CharacterConstant,
        TokenKind::Identifier => NodeKind::EnumerationConstant,
        _ => return ParserResult::giveup(pos, "constant"),
    };

    ParserResult::success(pos + 1, SyntaxTree::with_token(kind, ctx.token(pos).clone()))
}

// string-literal:
//   encoding-prefix? string-constant

pub(crate) fn string_literal(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    let mut it = pos;
    let mut prefix = None;

    if it < ctx.end() && ctx.kind(it) == TokenKind::EncodingPrefix {
        prefix = Some(ctx.token(it).clone());
        it += 1;
    }

    if it < ctx.end() && ctx.kind(it) == TokenKind::StringConstant {
        let mut tree = SyntaxTree::with_token(NodeKind::StringLiteral, ctx.token(it).clone());
        if let Some(prefix) = prefix {
            tree.add_child(SyntaxTree::with_token(NodeKind::EncodingPrefix, prefix));
        }
        return ParserResult::success(it + 1, tree);
    }

    ParserResult::giveup(pos, "string literal")
}

// string-literal-list:
//   string-literal+
//
// Adjacent string literals concatenate into one list node; a lone literal
// stays singular.

pub(crate) fn string_literal_list(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    let ParserResult { next, outcome } =
        one_many_of_while(ctx, pos, "string literal", &string_literal, |t| {
            matches!(
                t.kind,
                TokenKind::StringConstant | TokenKind::EncodingPrefix
            )
        });

    if let Outcome::Success(Some(mut tree)) = outcome {
        if tree.child_count() == 1 {
            if let Some(only) = tree.pop_child() {
                return ParserResult::success(next, only);
            }
        }
        let mut list = Outcome::Success(Some(SyntaxTree::new(NodeKind::StringLiteralList)));
        add_state(&mut list, Outcome::Success(Some(tree)));
        return ParserResult::new(next, list);
    }

    if !is_giveup(&outcome) {
        let mut list = Outcome::Success(Some(SyntaxTree::new(NodeKind::StringLiteralList)));
        add_state(&mut list, outcome);
        return ParserResult::new(next, list);
    }

    ParserResult::giveup(pos, "string literal list")
}

// primary-expression:
//   identifier
//   constant
//   string-literal+
//   '(' expression ')'

pub(crate) fn primary_expression(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    fn parens_expr(ctx: &mut ParserContext, pos: usize) -> ParserResult {
        if pos < ctx.end() && ctx.kind(pos) == TokenKind::LeftParen {
            let ParserResult { next, outcome } = parens(expression)(ctx, pos);
            return ParserResult::new(next, giveup_to_expected(ctx, outcome, "expression"));
        }
        ParserResult::giveup(pos, "expression")
    }

    one_of(
        ctx,
        pos,
        "primary expression",
        &[&identifier, &constant, &string_literal_list, &parens_expr],
    )
}

// postfix-expression:
//   primary-expression
//   compound-literal
//   postfix-expression '[' expression ']'
//   postfix-expression '(' argument-expression-list? ')'
//   postfix-expression ('.' | '->') identifier
//   postfix-expression ('++' | '--')
//
// compound-literal:
//   '(' type-name ')' '{' initializer-list ','? '}'

pub(crate) fn postfix_expression(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    fn compound_literal(ctx: &mut ParserContext, pos: usize) -> ParserResult {
        if pos < ctx.end() {
            let ParserResult {
                next: type_it,
                outcome: type_name_state,
            } = parens(type_name)(ctx, pos);

            if !is_giveup(&type_name_state) {
                let ParserResult {
                    next: init_it,
                    outcome: init_state,
                } = braces(initializer_list)(ctx, type_it);

                if !is_giveup(&init_state) {
                    let mut literal =
                        Outcome::Success(Some(SyntaxTree::new(NodeKind::CompoundLiteral)));
                    add_state(&mut literal, type_name_state);
                    add_state(&mut literal, init_state);
                    return ParserResult::new(init_it, literal);
                }
            }
        }
        ParserResult::giveup(pos, "compound literal")
    }

    fn postfix_suffix(ctx: &mut ParserContext, pos: usize) -> ParserResult {
        if pos >= ctx.end() {
            return ParserResult::giveup(pos, "postfix operator");
        }

        match ctx.kind(pos) {
            TokenKind::LeftBracket => {
                let ParserResult {
                    next: expr_it,
                    outcome: mut expr,
                } = expression(ctx, pos + 1);

                if expect_end_token(&mut expr, ctx, pos, expr_it, TokenKind::RightBracket) {
                    let mut subscript = Outcome::Success(Some(SyntaxTree::with_token(
                        NodeKind::ArraySubscripting,
                        ctx.token(pos).clone(),
                    )));
                    add_state(&mut subscript, giveup_to_expected(ctx, expr, "expression"));
                    ParserResult::new(expr_it + 1, subscript)
                } else {
                    ParserResult::new(expr_it, expr)
                }
            }

            TokenKind::LeftParen => {
                let call = SyntaxTree::with_token(NodeKind::FunctionCall, ctx.token(pos).clone());

                if ctx.kind(pos + 1) == TokenKind::RightParen {
                    return ParserResult::success(pos + 2, call);
                }

                let ParserResult {
                    next: arg_it,
                    outcome: argument_list,
                } = parens(list_of(assignment_expression, false))(ctx, pos);

                let mut arguments =
                    Outcome::Success(Some(SyntaxTree::new(NodeKind::ArgumentExpressionList)));
                add_state(
                    &mut arguments,
                    giveup_to_expected(ctx, argument_list, "argument list"),
                );

                let mut postfix = Outcome::Success(Some(call));
                add_state(&mut postfix, arguments);
                ParserResult::new(arg_it, postfix)
            }

            TokenKind::Dot | TokenKind::RightArrow => {
                let kind = if ctx.kind(pos) == TokenKind::Dot {
                    NodeKind::MemberAccess
                } else {
                    NodeKind::PointerMemberAccess
                };

                let ParserResult {
                    next: ident_it,
                    outcome: ident,
                } = identifier(ctx, pos + 1);

                let mut access = Outcome::Success(Some(SyntaxTree::with_token(
                    kind,
                    ctx.token(pos).clone(),
                )));
                add_state(&mut access, giveup_to_expected_auto(ident));
                ParserResult::new(ident_it, access)
            }

            TokenKind::Increment | TokenKind::Decrement => {
                let kind = if ctx.kind(pos) == TokenKind::Increment {
                    NodeKind::PostfixIncrement
                } else {
                    NodeKind::PostfixDecrement
                };
                ParserResult::success(
                    pos + 1,
                    SyntaxTree::with_token(kind, ctx.token(pos).clone()),
                )
            }

            _ => ParserResult::giveup(pos, "postfix operator"),
        }
    }

    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "postfix expression");
    }

    let ParserResult {
        next: mut it,
        outcome: mut expr,
    } = one_of(
        ctx,
        pos,
        "compound literal or expression",
        &[&compound_literal, &primary_expression],
    );

    if is_giveup(&expr) {
        return ParserResult::new(pos, expr);
    }

    loop {
        let ParserResult {
            next: op_it,
            outcome: mut suffix,
        } = postfix_suffix(ctx, it);

        if is_giveup(&suffix) {
            break;
        }

        add_state(&mut suffix, expr);
        expr = suffix;
        it = op_it;
    }

    ParserResult::new(it, expr)
}

// unary-expression:
//   postfix-expression
//   ('++' | '--') unary-expression
//   unary-operator cast-expression
//   'sizeof' unary-expression
//   'sizeof' '(' type-name ')'
//   '_Alignof' '(' type-name ')'
//
// unary-operator: one of
//   & * + - ~ !

pub(crate) fn unary_expression(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    fn incremental_unary(ctx: &mut ParserContext, pos: usize) -> ParserResult {
        let incremental_operator = operator(NodeKind::UnaryExpression, |t| {
            matches!(t.kind, TokenKind::Increment | TokenKind::Decrement)
        });

        let ParserResult {
            next: incr_it,
            outcome: mut incr_op,
        } = incremental_operator(ctx, pos);

        if is_giveup(&incr_op) {
            return ParserResult::giveup(pos, "unary operator");
        }

        let ParserResult {
            next: unary_it,
            outcome: unary,
        } = unary_expression(ctx, incr_it);

        add_state(&mut incr_op, giveup_to_expected(ctx, unary, "unary expression"));
        ParserResult::new(unary_it, incr_op)
    }

    fn unary_cast(ctx: &mut ParserContext, pos: usize) -> ParserResult {
        let unary_operator = operator(NodeKind::UnaryExpression, |t| {
            matches!(
                t.kind,
                TokenKind::BitwiseAnd
                    | TokenKind::BitwiseNot
                    | TokenKind::Times
                    | TokenKind::Plus
                    | TokenKind::Minus
                    | TokenKind::LogicalNot
            )
        });

        let ParserResult {
            next: op_it,
            outcome: mut op,
        } = unary_operator(ctx, pos);

        if is_giveup(&op) {
            return ParserResult::giveup(pos, "basic unary expression");
        }

        let ParserResult {
            next: cast_it,
            outcome: cast,
        } = cast_expression(ctx, op_it);

        add_state(&mut op, cast);
        ParserResult::new(cast_it, op)
    }

    // '(' type-name ')' — shared by sizeof and _Alignof.
    fn parens_type_name(ctx: &mut ParserContext, pos: usize) -> ParserResult {
        if pos < ctx.end() && ctx.kind(pos) == TokenKind::LeftParen {
            let ParserResult {
                next: type_it,
                outcome: mut name,
            } = type_name(ctx, pos + 1);

            let mut it = type_it;
            if matches!(name, Outcome::Success(_))
                && expect_end_token(&mut name, ctx, pos, type_it, TokenKind::RightParen)
            {
                it = type_it + 1;
            }

            return ParserResult::new(it, name);
        }
        ParserResult::giveup(pos, "type name inside parentheses")
    }

    fn size_of(ctx: &mut ParserContext, pos: usize) -> ParserResult {
        if pos >= ctx.end() {
            return ParserResult::giveup(pos, "sizeof/alignof expression");
        }

        if ctx.kind(pos) == TokenKind::Sizeof {
            let ParserResult { next, outcome } = one_of(
                ctx,
                pos + 1,
                "type name, or unary expression",
                &[&parens_type_name, &unary_expression],
            );

            let mut sizeof_op = Outcome::Success(Some(SyntaxTree::with_token(
                NodeKind::UnaryExpression,
                ctx.token(pos).clone(),
            )));
            add_state(
                &mut sizeof_op,
                giveup_to_expected(
                    ctx,
                    outcome,
                    "unary expression or type name inside parentheses",
                ),
            );
            return ParserResult::new(next, sizeof_op);
        }

        if ctx.kind(pos) == TokenKind::Alignof {
            let ParserResult { next, outcome } = parens_type_name(ctx, pos + 1);

            let mut alignof_op = Outcome::Success(Some(SyntaxTree::with_token(
                NodeKind::UnaryExpression,
                ctx.token(pos).clone(),
            )));
            add_state(
                &mut alignof_op,
                giveup_to_expected(ctx, outcome, "type name inside parentheses"),
            );
            return ParserResult::new(next, alignof_op);
        }

        ParserResult::giveup(pos, "sizeof/alignof expression")
    }

    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "unary expression");
    }

    one_of(
        ctx,
        pos,
        "unary expression",
        &[&postfix_expression, &incremental_unary, &size_of, &unary_cast],
    )
}

// cast-expression:
//   unary-expression
//   '(' type-name ')' cast-expression
//
// A '{' right after the closing paren means the parenthesized type name
// belongs to a compound literal, so the cast reading is abandoned.

pub(crate) fn cast_expression(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    fn cast_production(ctx: &mut ParserContext, pos: usize) -> ParserResult {
        if pos < ctx.end() && ctx.kind(pos) == TokenKind::LeftParen {
            let ParserResult {
                next: type_it,
                outcome: mut name,
            } = type_name(ctx, pos + 1);

            if !is_giveup(&name)
                && expect_end_token(&mut name, ctx, pos, type_it, TokenKind::RightParen)
            {
                let ParserResult {
                    next: cast_it,
                    outcome: operand,
                } = cast_expression(ctx, type_it + 1);

                if ctx.kind(cast_it) != TokenKind::LeftBrace {
                    let mut cast = Outcome::Success(Some(SyntaxTree::new(NodeKind::CastExpression)));
                    add_state(&mut cast, name);
                    add_state(&mut cast, giveup_to_expected(ctx, operand, "cast expression"));
                    return ParserResult::new(cast_it, cast);
                }
            }
        }
        ParserResult::giveup(pos, "cast expression")
    }

    one_of(
        ctx,
        pos,
        "cast or unary expression",
        &[&cast_production, &unary_expression],
    )
}

// multiplicative-expression:
//   cast-expression (('*' | '/' | '%') cast-expression)*

pub(crate) fn multiplicative_expression(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "multiplicative expression");
    }

    let multiplicative_operator = operator(NodeKind::MultiplicativeExpression, |t| {
        matches!(
            t.kind,
            TokenKind::Times | TokenKind::Divide | TokenKind::Percent
        )
    });

    left_binary_operator(cast_expression, multiplicative_operator, cast_expression)(ctx, pos)
}

// additive-expression:
//   multiplicative-expression (('+' | '-') multiplicative-expression)*

pub(crate) fn additive_expression(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "additive expression");
    }

    let additive_operator = operator(NodeKind::AdditiveExpression, |t| {
        matches!(t.kind, TokenKind::Plus | TokenKind::Minus)
    });

    left_binary_operator(
        multiplicative_expression,
        additive_operator,
        multiplicative_expression,
    )(ctx, pos)
}

// shift-expression:
//   additive-expression (('<<' | '>>') additive-expression)*

pub(crate) fn shift_expression(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "shift expression");
    }

    let shift_operator = operator(NodeKind::ShiftExpression, |t| {
        matches!(
            t.kind,
            TokenKind::BitwiseLeftShift | TokenKind::BitwiseRightShift
        )
    });

    left_binary_operator(additive_expression, shift_operator, additive_expression)(ctx, pos)
}

// relational-expression:
//   shift-expression (('<' | '>' | '<=' | '>=') shift-expression)*

pub(crate) fn relational_expression(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "relational expression");
    }

    let relational_operator = operator(NodeKind::RelationalExpression, |t| {
        matches!(
            t.kind,
            TokenKind::LessThan
                | TokenKind::GreaterThan
                | TokenKind::LessEqual
                | TokenKind::GreaterEqual
        )
    });

    left_binary_operator(shift_expression, relational_operator, shift_expression)(ctx, pos)
}

// equality-expression:
//   relational-expression (('==' | '!=') relational-expression)*

pub(crate) fn equality_expression(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "equality expression");
    }

    let equality_operator = operator(NodeKind::EqualityExpression, |t| {
        matches!(t.kind, TokenKind::EqualsTo | TokenKind::NotEqualTo)
    });

    left_binary_operator(relational_expression, equality_operator, relational_expression)(ctx, pos)
}

// and-expression:
//   equality-expression ('&' equality-expression)*

pub(crate) fn and_expression(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "and expression");
    }

    let and_operator = operator(NodeKind::AndExpression, |t| {
        t.kind == TokenKind::BitwiseAnd
    });

    left_binary_operator(equality_expression, and_operator, equality_expression)(ctx, pos)
}

// exclusive-or-expression:
//   and-expression ('^' and-expression)*

pub(crate) fn exclusive_or_expression(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "exclusive or expression");
    }

    let exclusive_or_operator = operator(NodeKind::ExclusiveOrExpression, |t| {
        t.kind == TokenKind::BitwiseXor
    });

    left_binary_operator(and_expression, exclusive_or_operator, and_expression)(ctx, pos)
}

// inclusive-or-expression:
//   exclusive-or-expression ('|' exclusive-or-expression)*

pub(crate) fn inclusive_or_expression(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "inclusive or expression");
    }

    let inclusive_or_operator = operator(NodeKind::InclusiveOrExpression, |t| {
        t.kind == TokenKind::BitwiseOr
    });

    left_binary_operator(
        exclusive_or_expression,
        inclusive_or_operator,
        exclusive_or_expression,
    )(ctx, pos)
}

// logical-and-expression:
//   inclusive-or-expression ('&&' inclusive-or-expression)*

pub(crate) fn logical_and_expression(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "logical and expression");
    }

    let logical_and_operator = operator(NodeKind::LogicalAndExpression, |t| {
        t.kind == TokenKind::LogicalAnd
    });

    left_binary_operator(
        inclusive_or_expression,
        logical_and_operator,
        inclusive_or_expression,
    )(ctx, pos)
}

// logical-or-expression:
//   logical-and-expression ('||' logical-and-expression)*

pub(crate) fn logical_or_expression(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "logical or expression");
    }

    let logical_or_operator = operator(NodeKind::LogicalOrExpression, |t| {
        t.kind == TokenKind::LogicalOr
    });

    left_binary_operator(
        logical_and_expression,
        logical_or_operator,
        logical_and_expression,
    )(ctx, pos)
}

// conditional-expression:
//   logical-or-expression ('?' expression ':' conditional-expression)?
//
// The false branch recurses through this rule, making `?:` right-associative.

pub(crate) fn conditional_expression(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "conditional expression");
    }

    let ParserResult {
        next: or_it,
        outcome: or_expr,
    } = logical_or_expression(ctx, pos);

    if is_giveup(&or_expr) {
        return ParserResult::new(pos, or_expr);
    }

    if or_it < ctx.end() && ctx.kind(or_it) == TokenKind::QuestionMark {
        let ternary_op_it = or_it;

        let mut condition = Outcome::Success(Some(SyntaxTree::new(NodeKind::ConditionalExpression)));
        add_state(&mut condition, or_expr);

        let ParserResult {
            next: true_it,
            outcome: true_expr,
        } = expression(ctx, ternary_op_it + 1);
        add_state(&mut condition, giveup_to_expected(ctx, true_expr, "expression"));

        if expect_end_token(&mut condition, ctx, ternary_op_it, true_it, TokenKind::Colon) {
            let ParserResult {
                next: false_it,
                outcome: false_expr,
            } = conditional_expression(ctx, true_it + 1);
            add_state(&mut condition, giveup_to_expected(ctx, false_expr, "expression"));

            return ParserResult::new(false_it, condition);
        }

        return ParserResult::new(true_it, condition);
    }

    ParserResult::new(or_it, or_expr)
}

// constant-expression:
//   conditional-expression

pub(crate) fn constant_expression(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    conditional_expression(ctx, pos)
}

// assignment-expression:
//   conditional-expression
//   unary-expression assignment-operator assignment-expression
//
// assignment-operator: one of
//   = *= /= %= += -= <<= >>= &= ^= |=

pub(crate) fn assignment_expression(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "assignment expression");
    }

    fn assignment_production(ctx: &mut ParserContext, pos: usize) -> ParserResult {
        let assign_operator = operator(NodeKind::AssignmentExpression, |t| {
            matches!(
                t.kind,
                TokenKind::Assign
                    | TokenKind::TimesAssign
                    | TokenKind::DivideAssign
                    | TokenKind::ModuloAssign
                    | TokenKind::PlusAssign
                    | TokenKind::MinusAssign
                    | TokenKind::BitwiseLeftShiftAssign
                    | TokenKind::BitwiseRightShiftAssign
                    | TokenKind::BitwiseAndAssign
                    | TokenKind::BitwiseXorAssign
                    | TokenKind::BitwiseOrAssign
            )
        });

        right_binary_operator(unary_expression, assign_operator, assignment_expression)(ctx, pos)
    }

    one_of(
        ctx,
        pos,
        "assignment or conditional expression",
        &[&assignment_production, &conditional_expression],
    )
}

// expression:
//   assignment-expression (',' assignment-expression)*

pub(crate) fn expression(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "expression");
    }

    let comma_operator = operator(NodeKind::Expression, |t| t.kind == TokenKind::Comma);

    left_binary_operator(assignment_expression, comma_operator, assignment_expression)(ctx, pos)
}
