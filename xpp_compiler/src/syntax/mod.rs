//! Syntax analysis for the class grammar
//!
//! A hand-written LL(1) recursive-descent parser. Each non-terminal is one
//! method on [`Parser`]; alternatives are chosen by looking at the single
//! lookahead token. In [`ParseMode::Semantic`] the same descent also drives
//! the symbol table and runs the declaration checks inline.

mod declarations;
mod error;
mod expressions;
mod parser;
mod statements;

pub use error::{ParseError, ParseResult, SyntaxError};
pub use parser::{ParseMode, ParseReport, Parser};

/// Parse a whole compilation unit
pub fn parse(source: impl Into<Vec<u8>>, mode: ParseMode) -> ParseResult<ParseReport> {
    Parser::new(source, mode).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::{tokenize, Dialect, LexerError};
    use crate::semantic_analysis::SemanticError;
    use crate::symbols::SymbolKind;
    use crate::tokens::TokenKind;
    use assert_matches::assert_matches;

    fn check(source: &str) -> ParseResult<ParseReport> {
        parse(source, ParseMode::Semantic)
    }

    fn syntax(source: &str) -> ParseResult<ParseReport> {
        parse(source, ParseMode::Syntax)
    }

    const SHAPES: &str = r#"
        class Shape {
            int sides;
            string name;
            constructor(int n) {
                sides = n;
                name = "shape";
            }
            Shape copy() {
                int copies;
                copies = sides * 2;
                return copies;
            }
        }
    "#;

    #[test]
    fn test_class_with_variable_and_constructor() {
        let report = check("class A { int x; constructor() {} }").unwrap();
        assert_eq!(report.classes, vec!["A".to_string()]);
    }

    #[test]
    fn test_duplicate_member_variable() {
        assert_matches!(
            check("class A { int x; int x; constructor() {} }"),
            Err(ParseError::Semantic(SemanticError::DuplicateDeclaration {
                ref name,
                kind: SymbolKind::Variable,
                ..
            })) if name == "x"
        );
        // Grammar alone accepts it
        assert!(syntax("class A { int x; int x; constructor() {} }").is_ok());
    }

    #[test]
    fn test_parent_class_must_come_first() {
        assert_matches!(
            check("class B extends A { constructor() {} }"),
            Err(ParseError::Semantic(SemanticError::UndeclaredParentClass { ref parent, line: 1 }))
                if parent == "A"
        );

        let report =
            check("class A { constructor() {} }\nclass B extends A { constructor() {} }").unwrap();
        assert_eq!(report.classes, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_sibling_constructors_have_separate_scopes() {
        let report =
            check("class A { constructor() { int i; } constructor() { int i; } }").unwrap();
        assert_eq!(report.scopes_entered, 3);
        assert_eq!(report.scopes_exited, 3);
        assert_eq!(report.max_scope_depth, 2);
    }

    #[test]
    fn test_duplicate_class() {
        assert_matches!(
            check("class A { }\nclass A { }"),
            Err(ParseError::Semantic(SemanticError::DuplicateClass { previous_line: 1, line: 2, .. }))
        );
    }

    #[test]
    fn test_method_before_variables() {
        assert_matches!(
            check("class A { int f() { } }"),
            Err(ParseError::Syntax(SyntaxError::MethodBeforeVariables { ref name, .. })) if name == "f"
        );
        assert_matches!(
            syntax("class A { int x; string g(int a) { } }"),
            Err(ParseError::Syntax(SyntaxError::MethodBeforeVariables { .. }))
        );

        // After a constructor the same shape is a method
        assert!(check("class A { int x; constructor() {} int f() { return x; } }").is_ok());
    }

    #[test]
    fn test_method_shape_in_statements_is_a_missing_semicolon() {
        let source = "class A { int x;\n constructor() {\n  int f() { }\n } }";
        for result in [syntax(source), check(source)] {
            assert_matches!(
                result,
                Err(ParseError::Syntax(SyntaxError::UnexpectedToken {
                    expected: TokenKind::Semicolon,
                    found: TokenKind::LeftBracket,
                    line: 3,
                    ..
                }))
            );
        }
    }

    #[test]
    fn test_every_token_is_consumed_once() {
        let expected = tokenize(SHAPES, Dialect::Xpp).unwrap().len();
        let report = check(SHAPES).unwrap();
        assert_eq!(report.tokens_consumed, expected);
        assert_eq!(report.scopes_entered, report.scopes_exited);
    }

    #[test]
    fn test_syntax_and_semantic_modes_agree_on_valid_programs() {
        let syntactic = syntax(SHAPES).unwrap();
        let semantic = check(SHAPES).unwrap();
        assert_eq!(syntactic, semantic);
    }

    #[test]
    fn test_block_scoped_names_disappear() {
        let source = "class A { int x; constructor() {
            if (x) { int y; y = 1; } else { int y; y = 2; }
            y = 3;
        } }";
        assert_matches!(
            check(source),
            Err(ParseError::Semantic(SemanticError::UndeclaredVariable { ref name, line: 3 }))
                if name == "y"
        );
    }

    #[test]
    fn test_for_scope_covers_header_and_body() {
        let source = "class A { int n; constructor() {
            for (n = 0; n < 10; n = n + 1) { int tmp; tmp = n % 2; break; }
            for (;;) { int tmp; }
        } }";
        let report = check(source).unwrap();
        // class, constructor and two loops
        assert_eq!(report.scopes_entered, 4);
        assert_eq!(report.max_scope_depth, 3);
    }

    #[test]
    fn test_shadowing_an_outer_name_is_legal() {
        let source = "class A { int x; constructor(int x) { if (x) { string x; x = \"s\"; } } }";
        assert!(check(source).is_ok());
    }

    #[test]
    fn test_lvalue_suffix_chains() {
        let source = "class A { int[] b; int i; constructor(A a, int x, int y) {
            i = a.b[i].c(x, y);
            i = a.b[a.b[0]].c().d;
            read a.b[i];
        }
        int f(int n) { return f(n)(n)[0].g; } }";
        assert!(check(source).is_ok());
    }

    #[test]
    fn test_undeclared_lvalue_head() {
        assert_matches!(
            check("class A { constructor() { z = 1; } }"),
            Err(ParseError::Semantic(SemanticError::UndeclaredVariable { .. }))
        );
        assert_matches!(
            check("class A { constructor() { print q + 1; } }"),
            Err(ParseError::Semantic(SemanticError::UndeclaredVariable { .. }))
        );
    }

    #[test]
    fn test_allocations() {
        let source = "class B { constructor() {} }
        class A { int[] v; constructor(B b) {
            b = new B();
            v = int[10 * 2];
            b = new B(1, \"two\", (3));
        } }";
        assert!(check(source).is_ok());

        assert_matches!(
            check("class A { constructor(A a) { a = new Missing(); } }"),
            Err(ParseError::Semantic(SemanticError::UndeclaredClass { ref name, .. })) if name == "Missing"
        );

        // Only int and string have an array allocation; `C[n]` is an indexed l-value
        assert_matches!(
            check("class A { int[] v; constructor() { v = Missing[3]; } }"),
            Err(ParseError::Semantic(SemanticError::UndeclaredVariable { ref name, .. })) if name == "Missing"
        );
        assert!(syntax("class A { int[] v; constructor() { v = Missing[3]; } }").is_ok());
    }

    #[test]
    fn test_class_typed_declarations() {
        assert_matches!(
            check("class A { constructor(Ghost g) {} }"),
            Err(ParseError::Semantic(SemanticError::UndeclaredClass { .. }))
        );
        assert_matches!(
            check("class A { constructor() {} Ghost make() {} }"),
            Err(ParseError::Semantic(SemanticError::UndeclaredClass { .. }))
        );
        assert!(check("class A { constructor() {} void run() {} A self() {} }").is_ok());
    }

    #[test]
    fn test_duplicate_methods_and_parameters() {
        assert_matches!(
            check("class A { constructor() {} void m() {} void m() {} }"),
            Err(ParseError::Semantic(SemanticError::DuplicateDeclaration { kind: SymbolKind::Method, .. }))
        );
        assert_matches!(
            check("class A { constructor(int p, string p) {} }"),
            Err(ParseError::Semantic(SemanticError::DuplicateDeclaration { kind: SymbolKind::Parameter, .. }))
        );
    }

    #[test]
    fn test_statement_forms() {
        let source = "class P { constructor() {} }
        class C extends P { int a, b; string s; constructor(int x) {
            super(x, 1);
            ;
            read a;
            print \"a\" ;
            a = -x + +3 * (b - 2) / 4;
            if (a >= b) { return a; }
            if (a != b) { print a; } else { print b; }
        } }";
        assert!(check(source).is_ok());
        assert!(syntax(source).is_ok());
    }

    #[test]
    fn test_syntax_errors_report_expected_and_found() {
        assert_matches!(
            syntax("class A { int x }"),
            Err(ParseError::Syntax(SyntaxError::UnexpectedToken {
                expected: TokenKind::Semicolon,
                found: TokenKind::RightCurlyBrace,
                line: 1,
                ..
            }))
        );
        assert_matches!(
            syntax(""),
            Err(ParseError::Syntax(SyntaxError::UnexpectedToken {
                expected: TokenKind::Class,
                found: TokenKind::EndOfFile,
                ..
            }))
        );
        assert_matches!(
            syntax("class A { constructor() { 1 = x; } }"),
            Err(ParseError::Syntax(SyntaxError::UnexpectedToken {
                expected: TokenKind::RightCurlyBrace,
                found: TokenKind::IntegerLiteral,
                ..
            }))
        );
        assert_matches!(
            syntax("class A { constructor() { x = ; } }"),
            Err(ParseError::Syntax(SyntaxError::GrammarViolation { found: TokenKind::Semicolon, .. }))
        );
        assert_matches!(
            syntax("class A { } extra"),
            Err(ParseError::Syntax(SyntaxError::UnexpectedToken {
                expected: TokenKind::EndOfFile,
                found: TokenKind::Id,
                ..
            }))
        );
    }

    #[test]
    fn test_lexical_errors_stop_parsing() {
        assert_matches!(
            check("class A {\n int 1x; }"),
            Err(ParseError::Lexical(LexerError::InvalidNumber { line: 2, .. }))
        );
        assert_matches!(
            syntax("class A { /* open"),
            Err(ParseError::Lexical(LexerError::UnterminatedComment { .. }))
        );
    }

    #[test]
    fn test_keywords_cannot_name_declarations() {
        assert_matches!(
            check("class print { }"),
            Err(ParseError::Syntax(SyntaxError::UnexpectedToken {
                expected: TokenKind::Id,
                found: TokenKind::Print,
                ..
            }))
        );
    }
}
