// Integration tests for error reporting and recovery: one parse pass should
// surface every independent problem it can find, with accurate positions.

use csyn::{Options, Parser, Severity};

fn diagnose(source: &str) -> Parser {
    let mut parser = Parser::new(source, Options::default()).expect("lexing failed");
    parser.parse_unit();
    parser
}

fn messages(parser: &Parser, severity: Severity) -> Vec<String> {
    parser
        .diagnostics()
        .iter()
        .filter(|d| d.severity == severity)
        .map(|d| d.message.clone())
        .collect()
}

#[test]
fn test_clean_parse_has_no_diagnostics() {
    let parser = diagnose("int main(){return 0;}");
    assert!(!parser.has_errors());
    assert!(parser.diagnostics().is_empty());
}

#[test]
fn test_missing_operand_names_the_operator() {
    let parser = diagnose("int main(){ 1 + ; }");
    assert!(parser.has_errors());
    let errors = messages(&parser, Severity::Error);
    assert!(errors
        .iter()
        .any(|m| m == "expected expression for operator '+'"));
}

#[test]
fn test_unterminated_call_points_at_open_paren() {
    let parser = diagnose("int main(){ foo(1,2; }");
    assert!(parser.has_errors());

    let errors = messages(&parser, Severity::Error);
    assert!(errors.iter().any(|m| m.contains("expected ')'")));

    let notes = messages(&parser, Severity::Note);
    assert!(notes.iter().any(|m| m.contains("to match this '('")));
}

#[test]
fn test_missing_semicolon_after_struct() {
    let parser = diagnose("struct S { int x; } int y;");
    assert!(parser.has_errors());
    let errors = messages(&parser, Severity::Error);
    assert!(errors
        .iter()
        .any(|m| m.contains("missing ';' after struct declaration")));
}

#[test]
fn test_unterminated_block_reports_missing_brace() {
    let parser = diagnose("int main() { return 0;");
    assert!(parser.has_errors());
    let errors = messages(&parser, Severity::Error);
    assert!(errors.iter().any(|m| m.contains("expected '}'")));
}

#[test]
fn test_multiple_errors_in_one_pass() {
    // Each statement is independently malformed; all three must be reported.
    let parser = diagnose(
        "int main() {\n\
             1 + ;\n\
             foo(1,2;\n\
             return 0\n\
         }",
    );
    assert!(parser.has_errors());
    let errors = messages(&parser, Severity::Error);
    assert!(errors
        .iter()
        .any(|m| m.contains("expression for operator '+'")));
    assert!(errors.iter().any(|m| m.contains("expected ')'")));
    assert!(errors.iter().any(|m| m.contains("expected ';'")));
}

#[test]
fn test_recovery_continues_after_garbage() {
    // The unparseable run is skipped through the next ';' and parsing
    // continues with the following declaration.
    let parser = diagnose("42 7 ; int y;");
    assert!(parser.has_errors());
    let errors = messages(&parser, Severity::Error);
    assert!(errors
        .iter()
        .any(|m| m.contains("expected external declaration")));
    // Only one error for the whole skipped run.
    assert_eq!(
        errors
            .iter()
            .filter(|m| m.contains("expected external declaration"))
            .count(),
        1
    );
}

#[test]
fn test_positions_are_line_and_column_accurate() {
    let parser = diagnose("int main() {\n    1 + ;\n}");
    let error = parser
        .diagnostics()
        .iter()
        .find(|d| d.severity == Severity::Error)
        .expect("an error");
    assert_eq!(error.loc.line, 2);
    assert_eq!(error.loc.column, 9);
}

#[test]
fn test_pedantic_empty_statement_is_gated() {
    let source = "int main() { ;; return 0; }";

    let parser = diagnose(source);
    assert!(!parser.has_errors());
    assert!(parser.diagnostics().is_empty());

    let mut parser = Parser::new(
        source,
        Options {
            pedantic: true,
            ..Options::default()
        },
    )
    .expect("lexing failed");
    parser.parse_unit();
    assert!(!parser.has_errors());
    let pedantic = messages(&parser, Severity::Pedantic);
    assert_eq!(pedantic.len(), 2);
    assert!(pedantic.iter().all(|m| m == "empty statement"));
}

#[test]
fn test_nesting_limit_fails_cleanly() {
    let mut parser = Parser::new(
        "int main() { return ((((((1)))))); }",
        Options {
            max_nesting: 4,
            ..Options::default()
        },
    )
    .expect("lexing failed");
    parser.parse_unit();
    assert!(parser.has_errors());
    assert!(parser
        .diagnostics()
        .iter()
        .any(|d| d.message.contains("too many levels of nesting")));
}

#[test]
fn test_missing_condition_in_if() {
    let parser = diagnose("int main() { if () return 1; }");
    assert!(parser.has_errors());
    let errors = messages(&parser, Severity::Error);
    assert!(errors.iter().any(|m| m.contains("condition for if-clause")));
}

#[test]
fn test_do_without_while() {
    let parser = diagnose("int main() { do step(); }");
    assert!(parser.has_errors());
    let errors = messages(&parser, Severity::Error);
    assert!(errors.iter().any(|m| m.contains("expected 'while'")));
}

#[test]
fn test_enum_without_body_or_name() {
    let parser = diagnose("enum ; int x;");
    assert!(parser.has_errors());
    let errors = messages(&parser, Severity::Error);
    assert!(errors.iter().any(|m| m.contains("expected identifier or '{'")));
    let notes = messages(&parser, Severity::Note);
    assert!(notes
        .iter()
        .any(|m| m.contains("for this enumerator specifier")));
}

#[test]
fn test_errors_and_failure_travel_together() {
    let parser = diagnose("int main() { return 0 }");
    assert!(parser.has_errors());

    let mut parser = Parser::new("int main() { return 0 }", Options::default()).unwrap();
    assert!(parser.parse_unit().is_none());
}
