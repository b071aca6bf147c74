//! Declaration grammar: declaration specifiers, declarators and abstract
//! declarators, struct/union/enum specifiers, initializers, and
//! `_Static_assert`.
//!
//! Array and function declarator suffixes are folded iteratively
//! left-to-right into a flat child sequence, so `int x[2][3]` nests input
//! depth in a loop rather than in recursion.  Struct, union, and enum
//! specifiers run with the "inside specifiers" flag raised: when the
//! specifier ends and the next token can neither start a declarator nor
//! terminate the declaration, the common missing-`;` mistake is diagnosed on
//! the spot.

use super::ast::{NodeKind, SyntaxTree};
use super::combinators::{
    add_error, add_node, add_state, braces, brackets, expect_end_token, expect_token,
    giveup_to_expected, giveup_to_expected_auto, is_giveup, list_of, one_many_of,
    one_many_of_while, one_of, parens, Outcome, ParseError, ParserContext, ParserResult, Status,
};
use super::expressions::{assignment_expression, constant_expression, identifier, string_literal_list};
use super::lexer::TokenKind;

// storage-class-specifier:
//   'typedef' | 'extern' | 'static' | '_Thread_local' | 'auto' | 'register'

pub(crate) fn storage_class_specifier(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos < ctx.end()
        && matches!(
            ctx.kind(pos),
            TokenKind::Typedef
                | TokenKind::Extern
                | TokenKind::Static
                | TokenKind::ThreadLocal
                | TokenKind::Auto
                | TokenKind::Register
        )
    {
        let tree =
            SyntaxTree::with_token(NodeKind::StorageClassSpecifier, ctx.token(pos).clone());
        return ParserResult::success(pos + 1, tree);
    }
    ParserResult::giveup(pos, "storage class specifier")
}

// type-qualifier:
//   'const' | 'restrict' | 'volatile' | '_Atomic'

pub(crate) fn type_qualifier(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos < ctx.end()
        && matches!(
            ctx.kind(pos),
            TokenKind::Const | TokenKind::Restrict | TokenKind::Volatile | TokenKind::Atomic
        )
    {
        let tree = SyntaxTree::with_token(NodeKind::TypeQualifier, ctx.token(pos).clone());
        return ParserResult::success(pos + 1, tree);
    }
    ParserResult::giveup(pos, "type qualifier")
}

// type-qualifier-list:
//   type-qualifier+

pub(crate) fn type_qualifier_list(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    let ParserResult { next, outcome } =
        one_many_of_while(ctx, pos, "type qualifier list", &type_qualifier, |t| {
            matches!(
                t.kind,
                TokenKind::Const | TokenKind::Restrict | TokenKind::Volatile | TokenKind::Atomic
            )
        });

    let mut qualifiers = Outcome::Success(None);
    if matches!(&outcome, Outcome::Success(_)) {
        add_node(&mut qualifiers, SyntaxTree::new(NodeKind::TypeQualifierList));
    }
    add_state(&mut qualifiers, outcome);

    ParserResult::new(next, qualifiers)
}

// function-specifier:
//   'inline' | '_Noreturn' | '__stdcall'
//   '__declspec' '(' identifier ')'

pub(crate) fn function_specifier(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "function specifier");
    }

    match ctx.kind(pos) {
        TokenKind::Inline | TokenKind::Noreturn | TokenKind::Stdcall => {
            let tree = SyntaxTree::with_token(NodeKind::FunctionSpecifier, ctx.token(pos).clone());
            ParserResult::success(pos + 1, tree)
        }

        TokenKind::Declspec => {
            let ParserResult { next, outcome } = parens(identifier)(ctx, pos + 1);

            let mut spec = Outcome::Success(None);
            if matches!(&outcome, Outcome::Success(_)) {
                add_node(
                    &mut spec,
                    SyntaxTree::with_token(NodeKind::FunctionSpecifier, ctx.token(pos).clone()),
                );
            }
            add_state(&mut spec, giveup_to_expected(ctx, outcome, "declspec argument"));

            ParserResult::new(next, spec)
        }

        _ => ParserResult::giveup(pos, "function specifier"),
    }
}

// alignment-specifier:
//   '_Alignas' '(' type-name ')'
//   '_Alignas' '(' constant-expression ')'

pub(crate) fn alignment_specifier(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos < ctx.end() && ctx.kind(pos) == TokenKind::Alignas {
        fn alignas_arg(ctx: &mut ParserContext, pos: usize) -> ParserResult {
            one_of(
                ctx,
                pos,
                "type name or constant expression",
                &[&type_name, &constant_expression],
            )
        }

        let ParserResult { next, outcome } = parens(alignas_arg)(ctx, pos + 1);

        let mut spec = Outcome::Success(Some(SyntaxTree::with_token(
            NodeKind::AlignmentSpecifier,
            ctx.token(pos).clone(),
        )));
        add_state(&mut spec, giveup_to_expected(ctx, outcome, "alignas argument"));

        return ParserResult::new(next, spec);
    }
    ParserResult::giveup(pos, "alignment specifier")
}

// atomic-type-specifier:
//   '_Atomic' '(' type-name ')'
//
// Without the parenthesis lookahead this reads as the `_Atomic` qualifier.

pub(crate) fn atomic_type_specifier(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos < ctx.end()
        && ctx.kind(pos) == TokenKind::Atomic
        && ctx.kind(pos + 1) == TokenKind::LeftParen
    {
        let ParserResult { next, outcome } = parens(type_name)(ctx, pos + 1);

        let mut spec = Outcome::Success(Some(SyntaxTree::with_token(
            NodeKind::AtomicTypeSpecifier,
            ctx.token(pos).clone(),
        )));
        add_state(
            &mut spec,
            giveup_to_expected(ctx, outcome, "type name for atomic type specifier"),
        );

        return ParserResult::new(next, spec);
    }
    ParserResult::giveup(pos, "atomic type specifier")
}

// type-specifier:
//   'void' | 'char' | 'short' | 'int' | 'long' | 'float' | 'double'
//   'signed' | 'unsigned' | '_Bool' | '_Complex'
//   atomic-type-specifier
//   struct-or-union-specifier
//   enum-specifier

pub(crate) fn type_specifier(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "type specifier");
    }

    match ctx.kind(pos) {
        TokenKind::VoidType
        | TokenKind::CharType
        | TokenKind::ShortType
        | TokenKind::IntType
        | TokenKind::LongType
        | TokenKind::FloatType
        | TokenKind::DoubleType
        | TokenKind::Signed
        | TokenKind::Unsigned
        | TokenKind::Bool
        | TokenKind::Complex => {
            let tree = SyntaxTree::with_token(NodeKind::TypeSpecifier, ctx.token(pos).clone());
            ParserResult::success(pos + 1, tree)
        }

        _ => {
            let saved = ctx.inside_specifiers;
            ctx.inside_specifiers = true;
            let ParserResult { next, outcome } = one_of(
                ctx,
                pos,
                "type specifier",
                &[
                    &atomic_type_specifier,
                    &struct_or_union_specifier,
                    &enum_specifier,
                ],
            );
            ctx.inside_specifiers = saved;

            let mut spec = Outcome::Success(None);
            if matches!(&outcome, Outcome::Success(_)) {
                add_node(&mut spec, SyntaxTree::new(NodeKind::TypeSpecifier));
            }
            add_state(&mut spec, outcome);

            ParserResult::new(next, spec)
        }
    }
}

// specifier-qualifier-list:
//   (type-specifier | type-qualifier)+

pub(crate) fn specifier_qualifier_list(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    fn spec_or_qual(ctx: &mut ParserContext, pos: usize) -> ParserResult {
        one_of(
            ctx,
            pos,
            "type specifier or qualifier",
            &[&type_specifier, &type_qualifier],
        )
    }

    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "specifier qualifier list");
    }

    let mut list = Outcome::Success(Some(SyntaxTree::new(NodeKind::SpecifierQualifierList)));

    let ParserResult { next, outcome } = spec_or_qual(ctx, pos);
    if is_giveup(&outcome) {
        return ParserResult::new(pos, outcome);
    }
    add_state(&mut list, outcome);
    let mut it = next;

    loop {
        let ParserResult { next, outcome } = spec_or_qual(ctx, it);
        if is_giveup(&outcome) {
            break;
        }
        add_state(&mut list, outcome);
        if next == it {
            break;
        }
        it = next;
    }

    ParserResult::new(it, list)
}

// type-name:
//   specifier-qualifier-list abstract-declarator?

pub(crate) fn type_name(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "type name");
    }

    let ParserResult {
        next: spec_it,
        outcome: spec_qual,
    } = specifier_qualifier_list(ctx, pos);

    if is_giveup(&spec_qual) {
        return ParserResult::new(pos, spec_qual);
    }

    let mut name = Outcome::Success(Some(SyntaxTree::new(NodeKind::TypeName)));
    add_state(&mut name, spec_qual);
    let mut it = spec_it;

    let ParserResult { next, outcome } = abstract_declarator(ctx, it);
    if !is_giveup(&outcome) {
        add_state(&mut name, outcome);
        it = next;
    }

    ParserResult::new(it, name)
}

// pointer:
//   '*' type-qualifier-list? pointer?

pub(crate) fn pointer(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos < ctx.end() && ctx.kind(pos) == TokenKind::Times {
        let mut ptr = Outcome::Success(Some(SyntaxTree::with_token(
            NodeKind::PointerDeclarator,
            ctx.token(pos).clone(),
        )));
        let mut it = pos + 1;

        let ParserResult { next, outcome } = type_qualifier_list(ctx, it);
        if !is_giveup(&outcome) {
            add_state(
                &mut ptr,
                giveup_to_expected(ctx, outcome, "type qualifier list for pointer type"),
            );
            it = next;
        }

        if it < ctx.end() && ctx.kind(it) == TokenKind::Times {
            let ParserResult { next, outcome } = pointer(ctx, it);
            add_state(&mut ptr, giveup_to_expected(ctx, outcome, "nested pointer"));
            it = next;
        }

        return ParserResult::new(it, ptr);
    }
    ParserResult::giveup(pos, "pointer")
}

// The bracketed part of an array declarator, entered just past the '[':
//   ']'                                          (unsized)
//   '*' ']'                                      (VLA)
//   'static' type-qualifier-list? assignment-expression
//   type-qualifier-list 'static' assignment-expression
//   type-qualifier-list? '*'
//   type-qualifier-list? assignment-expression?

fn array_declarator(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "array declarator");
    }

    let array_token = ctx.token(pos - 1).clone();
    let mut it = pos;

    if ctx.kind(it) == TokenKind::RightBracket {
        return ParserResult::success(
            it,
            SyntaxTree::with_token(NodeKind::ArrayVLADeclarator, array_token),
        );
    }

    if ctx.kind(it) == TokenKind::Times && ctx.kind(it + 1) == TokenKind::RightBracket {
        return ParserResult::success(
            it + 1,
            SyntaxTree::with_token(NodeKind::ArrayVLADeclarator, array_token),
        );
    }

    if ctx.kind(it) == TokenKind::Static {
        let mut decl = Outcome::Success(Some(SyntaxTree::with_token(
            NodeKind::ArrayStaticDeclarator,
            array_token,
        )));
        it += 1;

        let ParserResult { next, outcome } = type_qualifier_list(ctx, it);
        if !is_giveup(&outcome) {
            add_state(
                &mut decl,
                giveup_to_expected(ctx, outcome, "qualifiers for array declarator"),
            );
            it = next;
        }

        let ParserResult { next, outcome } = assignment_expression(ctx, it);
        add_state(
            &mut decl,
            giveup_to_expected(ctx, outcome, "expression for array length"),
        );
        it = next;

        return ParserResult::new(it, decl);
    }

    let ParserResult {
        next: qual_it,
        outcome: qualifiers,
    } = type_qualifier_list(ctx, it);

    if !is_giveup(&qualifiers) && ctx.kind(qual_it) == TokenKind::Static {
        let ParserResult { next, outcome } = assignment_expression(ctx, qual_it + 1);

        let mut decl = Outcome::Success(None);
        if matches!(&outcome, Outcome::Success(_)) {
            add_node(
                &mut decl,
                SyntaxTree::with_token(NodeKind::ArrayStaticDeclarator, array_token),
            );
        }
        add_state(
            &mut decl,
            giveup_to_expected(ctx, qualifiers, "qualifiers for array declarator"),
        );
        add_state(
            &mut decl,
            giveup_to_expected(ctx, outcome, "expression for array length"),
        );

        return ParserResult::new(next, decl);
    }

    if ctx.kind(qual_it) == TokenKind::Times {
        let mut decl = Outcome::Success(Some(SyntaxTree::with_token(
            NodeKind::ArrayVLADeclarator,
            array_token,
        )));
        if !is_giveup(&qualifiers) {
            add_state(&mut decl, qualifiers);
        }
        return ParserResult::new(qual_it + 1, decl);
    }

    let mut decl = Outcome::Success(Some(SyntaxTree::with_token(
        NodeKind::ArrayDeclarator,
        array_token,
    )));

    if !is_giveup(&qualifiers) {
        add_state(&mut decl, qualifiers);
        it = qual_it;
    }

    let ParserResult { next, outcome } = assignment_expression(ctx, it);
    if !is_giveup(&outcome) {
        add_state(&mut decl, outcome);
        it = next;
    }

    ParserResult::new(it, decl)
}

// '(' ')', '(' parameter-type-list ')', or '(' identifier-list ')' as a
// declarator suffix, folded onto whatever declarator came before it.

fn function_suffix(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos < ctx.end() && ctx.kind(pos) == TokenKind::LeftParen {
        if ctx.kind(pos + 1) == TokenKind::RightParen {
            return ParserResult::success(
                pos + 2,
                SyntaxTree::with_token(NodeKind::FunctionDeclarator, ctx.token(pos).clone()),
            );
        }

        fn params_or_identifiers(ctx: &mut ParserContext, pos: usize) -> ParserResult {
            one_of(
                ctx,
                pos,
                "parameter type list",
                &[&parameter_type_list, &identifier_list],
            )
        }

        let ParserResult { next, outcome } = parens(params_or_identifiers)(ctx, pos);

        let mut func = Outcome::Success(Some(SyntaxTree::with_token(
            NodeKind::FunctionDeclarator,
            ctx.token(pos).clone(),
        )));
        add_state(&mut func, giveup_to_expected_auto(outcome));

        return ParserResult::new(next, func);
    }
    ParserResult::giveup(pos, "function declarator")
}

// direct-declarator:
//   (identifier | '(' declarator ')')
//   followed by any number of '[...]' and '(...)' suffixes, folded
//   iteratively into a flat sequence.

pub(crate) fn direct_declarator(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end()
        || !matches!(ctx.kind(pos), TokenKind::Identifier | TokenKind::LeftParen)
    {
        return ParserResult::giveup(pos, "direct declarator");
    }

    fn base(ctx: &mut ParserContext, pos: usize) -> ParserResult {
        let parens_declarator = parens(declarator);
        one_of(
            ctx,
            pos,
            "identifier or declarator inside parentheses",
            &[&identifier, &parens_declarator],
        )
    }

    let ParserResult { next, outcome } = base(ctx, pos);
    if is_giveup(&outcome) {
        return ParserResult::giveup(pos, "direct declarator");
    }

    let mut state = Outcome::Success(Some(SyntaxTree::collector()));
    add_state(&mut state, giveup_to_expected_auto(outcome));
    let mut it = next;

    loop {
        match ctx.kind(it) {
            TokenKind::LeftBracket => {
                let ParserResult { next, outcome } = brackets(array_declarator)(ctx, it);
                add_state(&mut state, giveup_to_expected_auto(outcome));
                if next == it {
                    break;
                }
                it = next;
            }
            TokenKind::LeftParen => {
                let ParserResult { next, outcome } = function_suffix(ctx, it);
                add_state(&mut state, giveup_to_expected_auto(outcome));
                if next == it {
                    break;
                }
                it = next;
            }
            _ => break,
        }
    }

    ParserResult::new(it, state)
}

/// Whether a declarator can start at `pos`.
pub(crate) fn is_declarator_start(ctx: &ParserContext, pos: usize) -> bool {
    matches!(
        ctx.kind(pos),
        TokenKind::Times | TokenKind::Identifier | TokenKind::LeftParen
    )
}

// declarator:
//   pointer? direct-declarator

pub(crate) fn declarator(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "declarator");
    }

    let mut decl = Outcome::Success(Some(SyntaxTree::new(NodeKind::Declarator)));

    let ParserResult { next, outcome } = pointer(ctx, pos);
    let mut it = pos;
    if !is_giveup(&outcome) {
        add_state(&mut decl, outcome);
        it = next;
    }

    let ParserResult { next, outcome } = direct_declarator(ctx, it);
    add_state(&mut decl, outcome);

    ParserResult::new(next, decl)
}

// abstract-declarator:
//   pointer
//   pointer? direct-abstract-declarator

pub(crate) fn abstract_declarator(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "abstract declarator");
    }

    match ctx.kind(pos) {
        TokenKind::Times => {
            let ParserResult {
                next: ptr_it,
                outcome: ptr,
            } = pointer(ctx, pos);

            if matches!(ctx.kind(ptr_it), TokenKind::LeftBracket | TokenKind::LeftParen) {
                let ParserResult { next, outcome } = direct_abstract_declarator(ctx, ptr_it);

                let mut decl = Outcome::Success(None);
                if !is_giveup(&outcome) {
                    add_node(&mut decl, SyntaxTree::new(NodeKind::AbstractDeclarator));
                }
                add_state(&mut decl, giveup_to_expected_auto(ptr));
                add_state(&mut decl, giveup_to_expected_auto(outcome));

                return ParserResult::new(next, decl);
            }

            ParserResult::new(ptr_it, ptr)
        }

        TokenKind::LeftBracket | TokenKind::LeftParen => direct_abstract_declarator(ctx, pos),

        _ => ParserResult::giveup(pos, "abstract declarator"),
    }
}

// direct-abstract-declarator:
//   '(' abstract-declarator ')'
//   '(' parameter-type-list? ')'
//   '[' ... ']' array forms
//   followed by further '(...)' and '[...]' suffixes, folded iteratively.

pub(crate) fn direct_abstract_declarator(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    fn paren_group(ctx: &mut ParserContext, pos: usize) -> ParserResult {
        fn inner(ctx: &mut ParserContext, pos: usize) -> ParserResult {
            if pos >= ctx.end() {
                return ParserResult::giveup(pos, "function declarator");
            }

            let func_token = ctx.token(pos - 1).clone();

            // '(' ')'
            if ctx.kind(pos) == TokenKind::RightParen {
                return ParserResult::success(
                    pos,
                    SyntaxTree::with_token(NodeKind::FunctionDeclarator, func_token),
                );
            }

            let nested = abstract_declarator(ctx, pos);
            if !is_giveup(&nested.outcome) {
                return nested;
            }

            let ParserResult { next, outcome } = parameter_type_list(ctx, pos);
            let mut func = Outcome::Success(None);
            if matches!(&outcome, Outcome::Success(_)) {
                add_node(
                    &mut func,
                    SyntaxTree::with_token(NodeKind::FunctionDeclarator, func_token),
                );
            }
            add_state(&mut func, outcome);
            ParserResult::new(next, func)
        }

        parens(inner)(ctx, pos)
    }

    fn bracket_group(ctx: &mut ParserContext, pos: usize) -> ParserResult {
        brackets(array_declarator)(ctx, pos)
    }

    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "direct abstract declarator");
    }

    let ParserResult { next, outcome } = one_of(
        ctx,
        pos,
        "function or array declarator",
        &[&paren_group, &bracket_group],
    );

    if is_giveup(&outcome) {
        return ParserResult::new(pos, outcome);
    }

    let mut state = Outcome::Success(Some(SyntaxTree::collector()));
    add_state(&mut state, outcome);
    let mut it = next;

    loop {
        match ctx.kind(it) {
            TokenKind::LeftParen => {
                let ParserResult { next, outcome } = function_suffix(ctx, it);
                add_state(&mut state, giveup_to_expected_auto(outcome));
                if next == it {
                    break;
                }
                it = next;
            }
            TokenKind::LeftBracket => {
                let ParserResult { next, outcome } = bracket_group(ctx, it);
                add_state(&mut state, giveup_to_expected_auto(outcome));
                if next == it {
                    break;
                }
                it = next;
            }
            _ => break,
        }
    }

    ParserResult::new(it, state)
}

// parameter-declaration:
//   declaration-specifiers declarator
//   declaration-specifiers abstract-declarator?

pub(crate) fn parameter_declaration(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "parameter declaration");
    }

    let ParserResult { next, outcome: specs } = declaration_specifiers(ctx, pos);
    if is_giveup(&specs) {
        return ParserResult::giveup(pos, "parameter declaration");
    }

    let mut param = Outcome::Success(None);
    if matches!(&specs, Outcome::Success(_)) {
        add_node(&mut param, SyntaxTree::new(NodeKind::ParameterDeclaration));
    }
    add_state(&mut param, specs);
    let mut it = next;

    let decl = declarator(ctx, it);
    if !is_giveup(&decl.outcome) {
        add_state(&mut param, decl.outcome);
        it = decl.next;
    } else {
        let abs = abstract_declarator(ctx, it);
        if !is_giveup(&abs.outcome) {
            add_state(&mut param, abs.outcome);
            it = abs.next;
        }
    }

    ParserResult::new(it, param)
}

// parameter-type-list:
//   parameter-list (',' '...')?
//
// parameter-list:
//   parameter-declaration (',' parameter-declaration)*

pub(crate) fn parameter_type_list(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "parameter type list");
    }

    let mut parameters = Outcome::Success(Some(SyntaxTree::new(NodeKind::ParameterList)));
    let mut it = pos;

    let ParserResult { next, outcome } = parameter_declaration(ctx, it);
    add_state(&mut parameters, outcome);
    it = next;

    if it < ctx.end() && ctx.kind(it) == TokenKind::Comma {
        it += 1;
    } else {
        return ParserResult::new(it, parameters);
    }

    if it < ctx.end() && ctx.kind(it) == TokenKind::Ellipsis {
        add_node(
            &mut parameters,
            SyntaxTree::with_token(NodeKind::VariadicParameter, ctx.token(it).clone()),
        );
        return ParserResult::new(it + 1, parameters);
    }

    while it < ctx.end() {
        let ParserResult { next, outcome } = parameter_declaration(ctx, it);
        add_state(&mut parameters, giveup_to_expected_auto(outcome));
        if next == it {
            break;
        }
        it = next;

        if it < ctx.end() && ctx.kind(it) == TokenKind::Comma {
            it += 1;
        } else {
            break;
        }

        if it < ctx.end() && ctx.kind(it) == TokenKind::Ellipsis {
            add_node(
                &mut parameters,
                SyntaxTree::with_token(NodeKind::VariadicParameter, ctx.token(it).clone()),
            );
            it += 1;
            break;
        }
    }

    ParserResult::new(it, parameters)
}

// identifier-list:
//   identifier (',' identifier)*
//
// The K&R-style parameter name list of a function declarator.

pub(crate) fn identifier_list(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos < ctx.end() && ctx.kind(pos) == TokenKind::Identifier {
        let ParserResult { next, outcome } = list_of(identifier, false)(ctx, pos);

        let mut list = Outcome::Success(None);
        if matches!(&outcome, Outcome::Success(_)) {
            add_node(&mut list, SyntaxTree::new(NodeKind::IdentifierList));
        }
        add_state(
            &mut list,
            giveup_to_expected(ctx, outcome, "identifiers separated by comma"),
        );

        return ParserResult::new(next, list);
    }
    ParserResult::giveup(pos, "identifier list")
}

// declaration-specifier:
//   storage-class-specifier
//   type-specifier
//   type-qualifier
//   function-specifier
//   alignment-specifier

pub(crate) fn declaration_specifier(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    one_of(
        ctx,
        pos,
        "declaration specifier",
        &[
            &storage_class_specifier,
            &type_specifier,
            &type_qualifier,
            &function_specifier,
            &alignment_specifier,
        ],
    )
}

// declaration-specifiers:
//   declaration-specifier+

pub(crate) fn declaration_specifiers(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    let ParserResult { next, outcome } =
        one_many_of(ctx, pos, "declaration specifiers", &declaration_specifier);

    let mut specs = Outcome::Success(None);
    if matches!(&outcome, Outcome::Success(_)) {
        add_node(&mut specs, SyntaxTree::new(NodeKind::DeclarationSpecifiers));
    }
    add_state(&mut specs, outcome);

    ParserResult::new(next, specs)
}

// init-declarator:
//   declarator ('=' initializer)?

pub(crate) fn init_declarator(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "init declarator");
    }

    let ParserResult { next, outcome } = declarator(ctx, pos);
    if is_giveup(&outcome) {
        return ParserResult::giveup(pos, "init declarator");
    }

    let mut init = Outcome::Success(Some(SyntaxTree::new(NodeKind::InitDeclarator)));
    add_state(&mut init, outcome);
    let mut it = next;

    if it < ctx.end() && ctx.kind(it) == TokenKind::Assign {
        let ParserResult { next, outcome } = initializer(ctx, it + 1);
        it = next;
        add_state(
            &mut init,
            giveup_to_expected(ctx, outcome, "initializer for init declarator"),
        );
    }

    ParserResult::new(it, init)
}

// init-declarator-list:
//   init-declarator (',' init-declarator)*

pub(crate) fn init_declarator_list(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    list_of(init_declarator, false)(ctx, pos)
}

// initializer:
//   assignment-expression
//   '{' initializer-list ','? '}'

pub(crate) fn initializer(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "initializer");
    }

    if ctx.kind(pos) == TokenKind::LeftBrace {
        braces(initializer_list)(ctx, pos)
    } else {
        assignment_expression(ctx, pos)
    }
}

// initializer-list:
//   designation? initializer (',' designation? initializer)* ','?
//
// designation:
//   designator+ '='
//
// designator:
//   '[' constant-expression ']'
//   '.' identifier

pub(crate) fn initializer_list(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    fn designator(ctx: &mut ParserContext, pos: usize) -> ParserResult {
        if pos < ctx.end() {
            if ctx.kind(pos) == TokenKind::LeftBracket {
                let ParserResult { next, outcome } = brackets(constant_expression)(ctx, pos);

                let mut subscript =
                    Outcome::Success(Some(SyntaxTree::new(NodeKind::ArraySubscripting)));
                add_state(&mut subscript, outcome);
                return ParserResult::new(next, subscript);
            }

            if ctx.kind(pos) == TokenKind::Dot {
                let ParserResult { next, outcome } = identifier(ctx, pos + 1);

                let mut access = Outcome::Success(Some(SyntaxTree::new(NodeKind::MemberAccess)));
                add_state(
                    &mut access,
                    giveup_to_expected(ctx, outcome, "identifier for designator"),
                );
                return ParserResult::new(next, access);
            }
        }
        ParserResult::giveup(pos, "designator")
    }

    fn designation(ctx: &mut ParserContext, pos: usize) -> ParserResult {
        if pos >= ctx.end() {
            return ParserResult::giveup(pos, "designation");
        }

        let ParserResult { next, outcome } = designator(ctx, pos);
        if is_giveup(&outcome) {
            return ParserResult::giveup(pos, "designation");
        }

        let mut state = Outcome::Success(Some(SyntaxTree::new(NodeKind::Designation)));
        add_state(&mut state, giveup_to_expected(ctx, outcome, "designator"));
        let mut it = next;

        while it < ctx.end() && ctx.kind(it) != TokenKind::Assign {
            let ParserResult { next, outcome } = designator(ctx, it);

            if is_giveup(&outcome) {
                // Ran out of designators without reaching the '='.
                add_error(
                    &mut state,
                    ParseError::new(
                        Status::Error,
                        it,
                        "expected assignment operator for designator",
                    ),
                );
                break;
            }

            add_state(&mut state, giveup_to_expected(ctx, outcome, "designator"));
            it = next;
        }

        if it < ctx.end() && ctx.kind(it) == TokenKind::Assign {
            ParserResult::new(it + 1, state)
        } else {
            ParserResult::new(it, state)
        }
    }

    fn init_item(ctx: &mut ParserContext, pos: usize) -> ParserResult {
        if pos >= ctx.end() {
            return ParserResult::giveup(pos, "initializer list");
        }

        let mut item = Outcome::Success(None);

        let des = designation(ctx, pos);
        if !is_giveup(&des.outcome) {
            let init = initializer(ctx, des.next);
            add_state(&mut item, des.outcome);
            add_state(&mut item, giveup_to_expected(ctx, init.outcome, "initializer"));
            return ParserResult::new(init.next, item);
        }

        let init = initializer(ctx, pos);
        add_state(&mut item, init.outcome);
        ParserResult::new(init.next, item)
    }

    let ParserResult { next, outcome } = list_of(init_item, true)(ctx, pos);

    if !is_giveup(&outcome) {
        let mut list = Outcome::Success(Some(SyntaxTree::new(NodeKind::InitializerList)));
        add_state(&mut list, outcome);
        return ParserResult::new(next, list);
    }

    ParserResult::giveup(pos, "initializer list")
}

// enumeration-constant:
//   identifier

pub(crate) fn enumeration_constant(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos < ctx.end() && ctx.kind(pos) == TokenKind::Identifier {
        let tree = SyntaxTree::with_token(NodeKind::Enumerator, ctx.token(pos).clone());
        return ParserResult::success(pos + 1, tree);
    }
    ParserResult::giveup(pos, "enumerator")
}

// enum-specifier:
//   'enum' identifier? '{' enumerator-list ','? '}'
//   'enum' identifier
//
// enumerator:
//   enumeration-constant ('=' constant-expression)?

pub(crate) fn enum_specifier(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() || ctx.kind(pos) != TokenKind::Enum {
        return ParserResult::giveup(pos, "enumerator specifier");
    }

    fn enumerator(ctx: &mut ParserContext, pos: usize) -> ParserResult {
        if pos < ctx.end() && ctx.kind(pos) == TokenKind::Identifier {
            let ParserResult {
                next,
                outcome: mut state,
            } = enumeration_constant(ctx, pos);
            let mut it = next;

            if it < ctx.end() && ctx.kind(it) == TokenKind::Assign {
                let ParserResult { next, outcome } = constant_expression(ctx, it + 1);
                add_state(
                    &mut state,
                    giveup_to_expected(ctx, outcome, "constant expression"),
                );
                it = next;
            }

            return ParserResult::new(it, state);
        }
        ParserResult::giveup(pos, "enumerator")
    }

    fn enumerator_body(ctx: &mut ParserContext, pos: usize) -> ParserResult {
        braces(list_of(enumerator, true))(ctx, pos)
    }

    let mut spec = Outcome::Success(Some(SyntaxTree::with_token(
        NodeKind::EnumSpecifier,
        ctx.token(pos).clone(),
    )));
    let mut it = pos + 1;

    if it >= ctx.end() {
        return ParserResult::giveup(pos, "enumerator specifier");
    }

    if ctx.kind(it) == TokenKind::Identifier {
        let ParserResult { next, outcome } = identifier(ctx, it);
        add_state(&mut spec, outcome);
        it = next;

        if it < ctx.end() && ctx.kind(it) == TokenKind::LeftBrace {
            let ParserResult { next, outcome } = enumerator_body(ctx, it);
            add_state(&mut spec, giveup_to_expected_auto(outcome));
            it = next;
        }
    } else if ctx.kind(it) == TokenKind::LeftBrace {
        let ParserResult { next, outcome } = enumerator_body(ctx, it);
        add_state(&mut spec, giveup_to_expected_auto(outcome));
        it = next;
    } else {
        add_error(
            &mut spec,
            ParseError::new(Status::Error, it, "expected identifier or '{'"),
        );
        add_error(
            &mut spec,
            ParseError::new(Status::Note, pos, "for this enumerator specifier"),
        );
    }

    if ctx.inside_specifiers
        && matches!(&spec, Outcome::Success(_))
        && it < ctx.end()
        && ctx.kind(it) != TokenKind::Semicolon
        && !is_declarator_start(ctx, it)
    {
        add_error(
            &mut spec,
            ParseError::new(
                Status::Error,
                it - 1,
                "missing ';' after enumerator declaration",
            ),
        );
    }

    ParserResult::new(it, spec)
}

// struct-or-union-specifier:
//   ('struct' | 'union') identifier? '{' struct-declaration-list '}'
//   ('struct' | 'union') identifier
//
// struct-declaration:
//   specifier-qualifier-list struct-declarator-list? ';'
//   static-assert-declaration
//
// struct-declarator:
//   declarator
//   declarator? ':' constant-expression

pub(crate) fn struct_or_union_specifier(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() || !matches!(ctx.kind(pos), TokenKind::Struct | TokenKind::Union) {
        return ParserResult::giveup(pos, "struct or union specifier");
    }

    let keyword = ctx.text(pos).to_string();

    let struct_declarator = {
        let keyword = keyword.clone();
        move |ctx: &mut ParserContext, pos: usize| -> ParserResult {
            if pos >= ctx.end() {
                return ParserResult::giveup(pos, format!("{} declarator", keyword));
            }

            let mut state = Outcome::Success(Some(SyntaxTree::new(NodeKind::StructDeclarator)));
            let mut it = pos;

            if ctx.kind(pos) != TokenKind::Colon {
                let ParserResult { next, outcome } = declarator(ctx, pos);
                add_state(&mut state, giveup_to_expected(ctx, outcome, "declarator"));
                it = next;

                if it < ctx.end() && ctx.kind(it) == TokenKind::Colon {
                    let ParserResult { next, outcome } = constant_expression(ctx, it + 1);
                    add_state(
                        &mut state,
                        giveup_to_expected(ctx, outcome, "constant expression"),
                    );
                    it = next;
                }
            } else {
                // Anonymous bit-field.
                let ParserResult { next, outcome } = constant_expression(ctx, it + 1);
                add_state(
                    &mut state,
                    giveup_to_expected(ctx, outcome, "constant expression"),
                );
                it = next;
            }

            ParserResult::new(it, state)
        }
    };

    let struct_declaration = {
        let keyword = keyword.clone();
        let struct_declarator_list = list_of(struct_declarator, false);
        move |ctx: &mut ParserContext, pos: usize| -> ParserResult {
            if pos >= ctx.end() {
                return ParserResult::giveup(pos, format!("{} declaration", keyword));
            }

            if ctx.kind(pos) == TokenKind::StaticAssert {
                return static_assert_declaration(ctx, pos);
            }

            let mut state = Outcome::Success(Some(SyntaxTree::new(NodeKind::StructDeclaration)));

            let ParserResult { next, outcome } = specifier_qualifier_list(ctx, pos);
            add_state(
                &mut state,
                giveup_to_expected(ctx, outcome, "specifier qualifier list"),
            );
            let mut it = next;

            let decl_list = struct_declarator_list(ctx, it);
            if matches!(&decl_list.outcome, Outcome::Success(_)) {
                add_state(&mut state, decl_list.outcome);
                it = decl_list.next;
            }

            if expect_token(&mut state, ctx, it, TokenKind::Semicolon) {
                it += 1;
            }

            ParserResult::new(it, state)
        }
    };

    let struct_declaration_list = {
        let keyword = keyword.clone();
        move |ctx: &mut ParserContext, pos: usize| -> ParserResult {
            one_many_of_while(
                ctx,
                pos,
                &format!("{} declaration list", keyword),
                &struct_declaration,
                |t| t.kind != TokenKind::RightBrace,
            )
        }
    };

    let body = braces(struct_declaration_list);

    let mut spec = Outcome::Success(Some(SyntaxTree::with_token(
        NodeKind::StructOrUnionSpecifier,
        ctx.token(pos).clone(),
    )));
    let mut it = pos + 1;

    if it >= ctx.end() {
        return ParserResult::giveup(pos, "struct or union specifier");
    }

    if ctx.kind(it) == TokenKind::Identifier {
        let ParserResult { next, outcome } = identifier(ctx, it);
        add_state(&mut spec, outcome);
        it = next;

        if it < ctx.end() && ctx.kind(it) == TokenKind::LeftBrace {
            let ParserResult { next, outcome } = body(ctx, it);
            add_state(&mut spec, giveup_to_expected_auto(outcome));
            it = next;
        }
    } else if ctx.kind(it) == TokenKind::LeftBrace {
        let ParserResult { next, outcome } = body(ctx, it);
        add_state(&mut spec, giveup_to_expected_auto(outcome));
        it = next;
    } else {
        add_error(
            &mut spec,
            ParseError::new(Status::Error, it, "expected identifier or '{'"),
        );
        add_error(
            &mut spec,
            ParseError::new(Status::Note, pos, format!("for this {} specifier", keyword)),
        );
    }

    if ctx.inside_specifiers
        && matches!(&spec, Outcome::Success(_))
        && it < ctx.end()
        && ctx.kind(it) != TokenKind::Semicolon
        && !is_declarator_start(ctx, it)
    {
        add_error(
            &mut spec,
            ParseError::new(
                Status::Error,
                it - 1,
                format!("missing ';' after {} declaration", keyword),
            ),
        );
    }

    ParserResult::new(it, spec)
}

// static-assert-declaration:
//   '_Static_assert' '(' constant-expression ',' string-literal+ ')' ';'

pub(crate) fn static_assert_declaration(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    fn assert_args(ctx: &mut ParserContext, pos: usize) -> ParserResult {
        let mut state = Outcome::Success(Some(SyntaxTree::collector()));

        let ParserResult { next, outcome } = constant_expression(ctx, pos);
        add_state(&mut state, giveup_to_expected_auto(outcome));
        let mut it = next;

        if expect_token(&mut state, ctx, it, TokenKind::Comma) {
            it += 1;
        }

        let ParserResult { next, outcome } = string_literal_list(ctx, it);
        add_state(&mut state, giveup_to_expected_auto(outcome));
        it = next;

        ParserResult::new(it, state)
    }

    if pos < ctx.end() && ctx.kind(pos) == TokenKind::StaticAssert {
        let ParserResult {
            mut next,
            outcome: mut arguments,
        } = parens(assert_args)(ctx, pos + 1);

        if matches!(&arguments, Outcome::Success(_))
            && expect_end_token(&mut arguments, ctx, pos, next, TokenKind::Semicolon)
        {
            next += 1;
        }

        let mut decl = Outcome::Success(Some(SyntaxTree::new(NodeKind::StaticAssertDeclaration)));
        add_state(&mut decl, arguments);

        return ParserResult::new(next, decl);
    }
    ParserResult::giveup(pos, "static assert declaration")
}

// declaration:
//   declaration-specifiers init-declarator-list? ';'
//   static-assert-declaration

pub(crate) fn declaration(ctx: &mut ParserContext, pos: usize) -> ParserResult {
    if pos >= ctx.end() {
        return ParserResult::giveup(pos, "declaration");
    }

    if ctx.kind(pos) == TokenKind::StaticAssert {
        return static_assert_declaration(ctx, pos);
    }

    let ParserResult { next, outcome: specs } = declaration_specifiers(ctx, pos);
    if is_giveup(&specs) {
        return ParserResult::giveup(pos, "declaration");
    }

    let mut decl = Outcome::Success(None);
    add_node(&mut decl, SyntaxTree::new(NodeKind::Declaration));
    add_state(&mut decl, specs);
    let mut it = next;

    if it < ctx.end() && ctx.kind(it) != TokenKind::Semicolon {
        let ParserResult { next, outcome } = init_declarator_list(ctx, it);
        it = next;
        add_state(&mut decl, giveup_to_expected_auto(outcome));
    }

    if expect_token(&mut decl, ctx, it, TokenKind::Semicolon) {
        it += 1;
    }

    ParserResult::new(it, decl)
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

    fn parse_declaration(source: &str) -> SyntaxTree {
        let mut ctx = context(source);
        let result = declaration(&mut ctx, 0);
        match result.outcome {
            Outcome::Success(Some(tree)) => tree,
            other => panic!("declaration did not parse: {:?}", other),
        }
    }

    #[test]
    fn test_simple_declaration_shape() {
        let tree = parse_declaration("int x;");
        assert_eq!(tree.kind(), NodeKind::Declaration);
        assert_eq!(tree.child(0).kind(), NodeKind::DeclarationSpecifiers);
        assert_eq!(tree.child(0).child(0).text(), Some("int"));
        // Single-child declarator layers collapse down to the identifier.
        assert_eq!(tree.child(1).kind(), NodeKind::Identifier);
        assert_eq!(tree.child(1).text(), Some("x"));
    }

    #[test]
    fn test_pointer_declarator() {
        let tree = parse_declaration("const char *p;");
        let specs = tree.child(0);
        assert_eq!(specs.kind(), NodeKind::DeclarationSpecifiers);
        assert_eq!(specs.child_count(), 2);

        let decl = tree.child(1);
        assert_eq!(decl.kind(), NodeKind::Declarator);
        assert_eq!(decl.child(0).kind(), NodeKind::PointerDeclarator);
        assert_eq!(decl.child(1).kind(), NodeKind::Identifier);
    }

    #[test]
    fn test_array_suffixes_fold_flat() {
        let tree = parse_declaration("int grid[2][3];");
        let decl = tree.child(1);
        assert_eq!(decl.kind(), NodeKind::Declarator);
        assert_eq!(decl.child_count(), 3);
        assert_eq!(decl.child(0).kind(), NodeKind::Identifier);
        assert_eq!(decl.child(1).kind(), NodeKind::ArrayDeclarator);
        assert_eq!(decl.child(2).kind(), NodeKind::ArrayDeclarator);
    }

    #[test]
    fn test_initialized_declarator() {
        let tree = parse_declaration("int x = 5, y;");
        assert_eq!(tree.kind(), NodeKind::Declaration);
        let init = tree.child(1);
        assert_eq!(init.kind(), NodeKind::InitDeclarator);
        assert_eq!(init.child(0).kind(), NodeKind::Identifier);
        assert_eq!(init.child(1).kind(), NodeKind::IntegerConstant);
        // The second, uninitialized declarator collapses to its identifier.
        assert_eq!(tree.child(2).kind(), NodeKind::Identifier);
    }

    #[test]
    fn test_single_element_initializer_list_is_kept() {
        let tree = parse_declaration("int a[] = {1};");
        let init = tree.child(1);
        assert_eq!(init.kind(), NodeKind::InitDeclarator);
        let list = init.child(init.child_count() - 1);
        assert_eq!(list.kind(), NodeKind::InitializerList);
        assert_eq!(list.child_count(), 1);
    }

    #[test]
    fn test_designated_initializers() {
        let tree = parse_declaration("struct point p = {.x = 1, [0] = 2};");
        let init = tree.child(1);
        let list = init.child(init.child_count() - 1);
        assert_eq!(list.kind(), NodeKind::InitializerList);
        // Single-designator designations collapse to the designated name or
        // index next to the initializer value.
        assert_eq!(list.child(0).kind(), NodeKind::Designation);
        assert_eq!(list.child(0).child(0).text(), Some("x"));
        assert_eq!(list.child(0).child(1).text(), Some("1"));
        assert_eq!(list.child(1).kind(), NodeKind::Designation);
        assert_eq!(list.child(1).child(0).text(), Some("0"));
        assert_eq!(list.child(1).child(1).text(), Some("2"));
    }

    #[test]
    fn test_struct_definition() {
        let tree = parse_declaration("struct point { int x; int y; };");
        let specs = tree.child(0);
        assert_eq!(specs.kind(), NodeKind::DeclarationSpecifiers);
        let spec = specs.child(0);
        assert_eq!(spec.kind(), NodeKind::StructOrUnionSpecifier);
        assert_eq!(spec.text(), Some("struct"));
        assert_eq!(spec.child(0).kind(), NodeKind::Identifier);
        assert_eq!(spec.child(1).kind(), NodeKind::StructDeclaration);
        assert_eq!(spec.child(2).kind(), NodeKind::StructDeclaration);
    }

    #[test]
    fn test_bit_field_declarator() {
        let tree = parse_declaration("struct flags { unsigned ready : 1; };");
        let spec = tree.child(0).child(0);
        let member = spec.child(1);
        assert_eq!(member.kind(), NodeKind::StructDeclaration);
        let declarator = member.child(1);
        assert_eq!(declarator.kind(), NodeKind::StructDeclarator);
        assert_eq!(declarator.child_count(), 2);
    }

    #[test]
    fn test_enum_with_values() {
        let tree = parse_declaration("enum color { RED, GREEN = 2, };");
        let spec = tree.child(0).child(0);
        assert_eq!(spec.kind(), NodeKind::EnumSpecifier);
        assert_eq!(spec.child(0).kind(), NodeKind::Identifier);
        assert_eq!(spec.child(1).kind(), NodeKind::Enumerator);
        assert_eq!(spec.child(2).kind(), NodeKind::Enumerator);
        assert_eq!(spec.child(2).child_count(), 1);
    }

    #[test]
    fn test_missing_semicolon_after_struct_body() {
        let mut ctx = context("struct S { int x; } 42");
        let result = declaration(&mut ctx, 0);
        match result.outcome {
            Outcome::Failure(errors) => {
                assert!(errors
                    .iter()
                    .any(|e| e.message.contains("missing ';' after struct declaration")));
            }
            _ => panic!("expected the missing semicolon to be diagnosed"),
        }
    }

    #[test]
    fn test_struct_followed_by_declarator_is_fine() {
        // `struct S { ... } name;` — the declarator legitimately follows.
        let tree = parse_declaration("struct S { int x; } s;");
        assert_eq!(tree.kind(), NodeKind::Declaration);
        assert_eq!(tree.child(1).kind(), NodeKind::Identifier);
    }

    #[test]
    fn test_variadic_parameter_list() {
        let tree = parse_declaration("int printf(const char *fmt, ...);");
        let decl = tree.child(1);
        assert_eq!(decl.kind(), NodeKind::Declarator);
        let func = decl.child(1);
        assert_eq!(func.kind(), NodeKind::FunctionDeclarator);
        let params = func.child(0);
        assert_eq!(params.kind(), NodeKind::ParameterList);
        assert_eq!(
            params.child(params.child_count() - 1).kind(),
            NodeKind::VariadicParameter
        );
    }

    #[test]
    fn test_kr_identifier_list() {
        let tree = parse_declaration("int old_style(a, b);");
        let decl = tree.child(1);
        let func = decl.child(1);
        assert_eq!(func.kind(), NodeKind::FunctionDeclarator);
        assert_eq!(func.child(0).kind(), NodeKind::IdentifierList);
        assert_eq!(func.child(0).child_count(), 2);
    }

    #[test]
    fn test_function_pointer_declarator() {
        let tree = parse_declaration("void (*handler)(int);");
        let decl = tree.child(1);
        assert_eq!(decl.kind(), NodeKind::Declarator);
        assert_eq!(decl.child(0).kind(), NodeKind::Declarator);
        assert_eq!(decl.child(0).child(0).kind(), NodeKind::PointerDeclarator);
        assert_eq!(decl.child(1).kind(), NodeKind::FunctionDeclarator);
    }

    #[test]
    fn test_type_name_with_abstract_declarator() {
        let mut ctx = context("const int *");
        let result = type_name(&mut ctx, 0);
        match result.outcome {
            Outcome::Success(Some(tree)) => {
                assert_eq!(tree.kind(), NodeKind::TypeName);
                assert_eq!(tree.child(0).kind(), NodeKind::SpecifierQualifierList);
                assert_eq!(tree.child(1).kind(), NodeKind::PointerDeclarator);
            }
            other => panic!("type name did not parse: {:?}", other),
        }
    }

    #[test]
    fn test_static_assert() {
        let tree = parse_declaration(r#"_Static_assert(1, "always");"#);
        assert_eq!(tree.kind(), NodeKind::StaticAssertDeclaration);
        assert_eq!(tree.child(0).kind(), NodeKind::IntegerConstant);
        assert_eq!(tree.child(1).kind(), NodeKind::StringLiteral);
    }

    #[test]
    fn test_atomic_type_specifier_vs_qualifier() {
        let tree = parse_declaration("_Atomic(int) counter;");
        let specs = tree.child(0);
        assert_eq!(specs.child(0).kind(), NodeKind::AtomicTypeSpecifier);

        let tree = parse_declaration("_Atomic int counter;");
        let specs = tree.child(0);
        assert_eq!(specs.child(0).kind(), NodeKind::TypeQualifier);
    }

    #[test]
    fn test_alignment_specifier() {
        let tree = parse_declaration("_Alignas(16) char buffer[64];");
        let specs = tree.child(0);
        assert_eq!(specs.child(0).kind(), NodeKind::AlignmentSpecifier);
    }
}
