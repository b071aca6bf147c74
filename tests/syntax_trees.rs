// Integration tests for tree shapes produced from whole translation units.

use csyn::parser::ast::{NodeKind, SyntaxTree};
use csyn::{Options, Parser};

fn parse(source: &str) -> SyntaxTree {
    let mut parser = Parser::new(source, Options::default()).expect("lexing failed");
    let tree = parser.parse_unit();
    assert!(
        !parser.has_errors(),
        "unexpected diagnostics: {:?}",
        parser.diagnostics()
    );
    tree.expect("no tree produced")
}

/// Digs out the body of the first function definition in the unit.
fn first_function_body(tree: &SyntaxTree) -> &SyntaxTree {
    let func = tree.child(0);
    assert_eq!(func.kind(), NodeKind::FunctionDefinition);
    let body = func.child(2);
    assert_eq!(body.kind(), NodeKind::CompoundStatement);
    body
}

#[test]
fn test_minimal_function() {
    let tree = parse("int main(){return 0;}");

    assert_eq!(tree.kind(), NodeKind::CompilationUnit);
    let func = tree.child(0);
    assert_eq!(func.kind(), NodeKind::FunctionDefinition);

    let specs = func.child(0);
    assert_eq!(specs.kind(), NodeKind::DeclarationSpecifiers);
    assert_eq!(specs.child(0).kind(), NodeKind::TypeSpecifier);
    assert_eq!(specs.child(0).text(), Some("int"));

    let declarator = func.child(1);
    assert_eq!(declarator.kind(), NodeKind::Declarator);
    assert_eq!(declarator.child(0).text(), Some("main"));
    assert_eq!(declarator.child(1).kind(), NodeKind::FunctionDeclarator);
    assert_eq!(declarator.child(1).child_count(), 0);

    let body = func.child(2);
    assert_eq!(body.kind(), NodeKind::CompoundStatement);
    let ret = body.child(0);
    assert_eq!(ret.kind(), NodeKind::JumpStatement);
    assert_eq!(ret.text(), Some("return"));
    assert_eq!(ret.child(0).kind(), NodeKind::IntegerConstant);
    assert_eq!(ret.child(0).text(), Some("0"));
}

#[test]
fn test_precedence_and_associativity() {
    let tree = parse("int main(){ int r; r = a + b * c; }");
    let body = first_function_body(&tree);

    // r = a + b * c  →  Assignment(r, Additive(a, Multiplicative(b, c)))
    let assign = body.child(1);
    assert_eq!(assign.kind(), NodeKind::AssignmentExpression);
    let sum = assign.child(1);
    assert_eq!(sum.kind(), NodeKind::AdditiveExpression);
    assert_eq!(sum.child(0).text(), Some("a"));
    let product = sum.child(1);
    assert_eq!(product.kind(), NodeKind::MultiplicativeExpression);
    assert_eq!(product.child(0).text(), Some("b"));
    assert_eq!(product.child(1).text(), Some("c"));
}

#[test]
fn test_left_associative_subtraction() {
    let tree = parse("int main(){ a - b - c; }");
    let body = first_function_body(&tree);

    let outer = body.child(0);
    assert_eq!(outer.kind(), NodeKind::AdditiveExpression);
    let inner = outer.child(0);
    assert_eq!(inner.kind(), NodeKind::AdditiveExpression);
    assert_eq!(inner.child(0).text(), Some("a"));
    assert_eq!(inner.child(1).text(), Some("b"));
    assert_eq!(outer.child(1).text(), Some("c"));
}

#[test]
fn test_right_associative_assignment() {
    let tree = parse("int main(){ a = b = c; }");
    let body = first_function_body(&tree);

    let outer = body.child(0);
    assert_eq!(outer.kind(), NodeKind::AssignmentExpression);
    assert_eq!(outer.child(0).text(), Some("a"));
    let inner = outer.child(1);
    assert_eq!(inner.kind(), NodeKind::AssignmentExpression);
    assert_eq!(inner.child(0).text(), Some("b"));
    assert_eq!(inner.child(1).text(), Some("c"));
}

#[test]
fn test_cast_vs_compound_literal() {
    let tree = parse("int main(){ x = (int)y; p = (int){1, 2}; }");
    let body = first_function_body(&tree);

    let cast = body.child(0).child(1);
    assert_eq!(cast.kind(), NodeKind::CastExpression);
    assert_eq!(cast.child(0).kind(), NodeKind::TypeName);
    assert_eq!(cast.child(1).text(), Some("y"));

    let literal = body.child(1).child(1);
    assert_eq!(literal.kind(), NodeKind::CompoundLiteral);
    assert_eq!(literal.child(0).kind(), NodeKind::TypeName);
    let inits = literal.child(1);
    assert_eq!(inits.kind(), NodeKind::InitializerList);
    assert_eq!(inits.child_count(), 2);
}

#[test]
fn test_single_element_initializer_list_keeps_wrapper() {
    let tree = parse("int a[] = {1};");
    let decl = tree.child(0);
    assert_eq!(decl.kind(), NodeKind::Declaration);
    let init = decl.child(1);
    assert_eq!(init.kind(), NodeKind::InitDeclarator);
    let list = init.child(init.child_count() - 1);
    assert_eq!(list.kind(), NodeKind::InitializerList);
    assert_eq!(list.child_count(), 1);
}

#[test]
fn test_pass_through_layers_leave_no_wrappers() {
    // A bare identifier expression statement reaches the block as the
    // identifier itself, with no expression-layer wrappers around it.
    let tree = parse("int main(){ x; }");
    let body = first_function_body(&tree);
    assert_eq!(body.child_count(), 1);
    assert_eq!(body.child(0).kind(), NodeKind::Identifier);
}

#[test]
fn test_struct_union_enum_round_trip() {
    let tree = parse(
        "struct point { int x; int y; };\n\
         union value { int i; float f; };\n\
         enum color { RED, GREEN = 2 };",
    );

    assert_eq!(tree.child_count(), 3);
    for (index, keyword) in ["struct", "union", "enum"].iter().enumerate() {
        let decl = tree.child(index);
        assert_eq!(decl.kind(), NodeKind::Declaration);
        let spec = decl.child(0).child(0);
        assert_eq!(spec.text(), Some(*keyword));
    }
}

#[test]
fn test_function_with_parameters_and_locals() {
    let tree = parse(
        "int add(int a, int b) {\n\
             int sum = a + b;\n\
             return sum;\n\
         }",
    );

    let func = tree.child(0);
    let declarator = func.child(1);
    let params = declarator.child(1).child(0);
    assert_eq!(params.kind(), NodeKind::ParameterList);
    assert_eq!(params.child_count(), 2);

    let body = func.child(2);
    assert_eq!(body.child(0).kind(), NodeKind::Declaration);
    assert_eq!(body.child(1).kind(), NodeKind::JumpStatement);
}

#[test]
fn test_control_flow_statements() {
    let tree = parse(
        "void walk(void) {\n\
             for (int i = 0; i < 8; i++) {\n\
                 if (i % 2) continue;\n\
                 while (busy()) wait();\n\
             }\n\
             do { step(); } while (more());\n\
             switch (mode) { case 1: break; default: stop(); }\n\
         }",
    );

    let body = first_function_body(&tree);
    assert_eq!(body.child(0).kind(), NodeKind::IterationStatement);
    assert_eq!(body.child(0).text(), Some("for"));
    assert_eq!(body.child(1).kind(), NodeKind::IterationStatement);
    assert_eq!(body.child(1).text(), Some("do"));
    assert_eq!(body.child(2).kind(), NodeKind::SelectionStatement);
    assert_eq!(body.child(2).text(), Some("switch"));
}

#[test]
fn test_sizeof_and_alignof() {
    let tree = parse("int main(){ a = sizeof(int); b = sizeof a; c = _Alignof(char); }");
    let body = first_function_body(&tree);

    for index in 0..3 {
        let unary = body.child(index).child(1);
        assert_eq!(unary.kind(), NodeKind::UnaryExpression);
    }
}

#[test]
fn test_string_literal_concatenation() {
    let tree = parse(r#"const char *msg = "hello" " " "world";"#);
    let init = tree.child(0).child(1);
    assert_eq!(init.kind(), NodeKind::InitDeclarator);
    let strings = init.child(init.child_count() - 1);
    assert_eq!(strings.kind(), NodeKind::StringLiteralList);
    assert_eq!(strings.child_count(), 3);
}

#[test]
fn test_static_assert_at_top_level() {
    let tree = parse(r#"_Static_assert(1, "must hold");"#);
    assert_eq!(tree.child(0).kind(), NodeKind::StaticAssertDeclaration);
}

#[test]
fn test_kr_function_definition() {
    let tree = parse(
        "int old_sum(a, b)\n\
         int a;\n\
         int b;\n\
         { return a + b; }",
    );

    let func = tree.child(0);
    assert_eq!(func.kind(), NodeKind::FunctionDefinition);
    // Children: specifiers, declarator, body, then the K&R declaration list.
    assert_eq!(func.child_count(), 4);
    assert_eq!(func.child(3).kind(), NodeKind::DeclarationList);
    assert_eq!(func.child(3).child_count(), 2);
}

#[test]
fn test_dump_renders_preorder() {
    let tree = parse("int main(){return 0;}");
    let mut buffer = Vec::new();
    tree.dump(&mut buffer, 0).unwrap();
    let text = String::from_utf8(buffer).unwrap();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "compilation unit:");
    assert_eq!(lines[1], "  function definition:");
    assert!(lines[2].starts_with("    declaration specifiers"));
}
