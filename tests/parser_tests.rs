use tacc::error::{CompileError, ErrorKind};
use tacc::lexer::Lexer;
use tacc::parser::{BinOpKind, Expr, Literal, Parser, Program, Stmt, TypeSpecifier};

fn parse(input: &str) -> Result<Program, CompileError> {
    let tokens = Lexer::tokenize(input).expect("lexing should succeed");
    Parser::new(tokens).parse()
}

/// Parses `input` as the body of `int main()` and returns its statements.
fn parse_body(input: &str) -> Vec<Stmt> {
    let program = parse(&format!("int main() {{ {input} }}")).unwrap();
    program.0.into_iter().next().unwrap().body.stmts
}

/// Parses `input` as a returned expression.
fn parse_expr(input: &str) -> Expr {
    match parse_body(&format!("return {input};")).remove(0) {
        Stmt::Return { value: Some(expr), .. } => expr,
        stmt => panic!("expected a return, got {stmt:?}"),
    }
}

fn num(n: i64) -> Expr {
    Expr::int(n, 1)
}

fn var(name: &str) -> Expr {
    Expr::Variable {
        name: name.to_string(),
        line: 1,
    }
}

fn bin(op: BinOpKind, lhs: Expr, rhs: Expr) -> Expr {
    Expr::binary(op, lhs, rhs, 1)
}

#[test]
fn mul_binds_tighter_than_add() {
    assert_eq!(
        parse_expr("2 + 3 * 4"),
        bin(BinOpKind::Add, num(2), bin(BinOpKind::Mul, num(3), num(4)))
    );
}

#[test]
fn operators_are_left_associative() {
    assert_eq!(
        parse_expr("a - b - c"),
        bin(BinOpKind::Sub, bin(BinOpKind::Sub, var("a"), var("b")), var("c"))
    );
    assert_eq!(
        parse_expr("a / b * c"),
        bin(BinOpKind::Mul, bin(BinOpKind::Div, var("a"), var("b")), var("c"))
    );
}

#[test]
fn relational_binds_tighter_than_equality() {
    assert_eq!(
        parse_expr("a == b < c"),
        bin(
            BinOpKind::Equal,
            var("a"),
            bin(BinOpKind::LessThan, var("b"), var("c"))
        )
    );
}

#[test]
fn parentheses_override_precedence() {
    assert_eq!(
        parse_expr("(2 + 3) * 4"),
        bin(BinOpKind::Mul, bin(BinOpKind::Add, num(2), num(3)), num(4))
    );
}

#[test]
fn unary_minus() {
    assert_eq!(
        parse_expr("-5 + +x"),
        bin(
            BinOpKind::Add,
            Expr::Neg {
                operand: Box::new(num(5)),
                line: 1
            },
            var("x")
        )
    );
}

#[test]
fn float_and_string_primaries() {
    assert_eq!(
        parse_expr("1.5"),
        Expr::Literal {
            value: Literal::Float(1.5),
            line: 1
        }
    );
    assert_eq!(
        parse_expr("\"hi\""),
        Expr::StringLiteral {
            value: "hi".to_string(),
            line: 1
        }
    );
}

#[test]
fn calls() {
    assert_eq!(
        parse_expr("f(1, g(), x + 1)"),
        Expr::Call {
            name: "f".to_string(),
            args: vec![
                num(1),
                Expr::Call {
                    name: "g".to_string(),
                    args: vec![],
                    line: 1
                },
                bin(BinOpKind::Add, var("x"), num(1)),
            ],
            line: 1
        }
    );
}

#[test]
fn functions_and_params() {
    let program = parse("int add(int a, float b) { return a; }\nvoid main() { }").unwrap();
    assert_eq!(program.0.len(), 2);

    let add = &program.0[0];
    assert_eq!(add.ty, TypeSpecifier::Int);
    assert_eq!(add.name, "add");
    let params: Vec<_> = add.params.iter().map(|p| (p.ty, p.name.as_str())).collect();
    assert_eq!(
        params,
        vec![(TypeSpecifier::Int, "a"), (TypeSpecifier::Float, "b")]
    );

    let main = &program.0[1];
    assert_eq!(main.ty, TypeSpecifier::Void);
    assert_eq!(main.line, 2);
    assert!(main.params.is_empty());
    assert!(main.body.stmts.is_empty());
}

#[test]
fn statements() {
    let stmts = parse_body("int x; int y = 1; x = y; f(x); return; { }");

    assert_eq!(
        stmts,
        vec![
            Stmt::Declaration {
                ty: TypeSpecifier::Int,
                name: "x".to_string(),
                init: None,
                line: 1
            },
            Stmt::Declaration {
                ty: TypeSpecifier::Int,
                name: "y".to_string(),
                init: Some(num(1)),
                line: 1
            },
            Stmt::Assignment {
                name: "x".to_string(),
                value: var("y"),
                line: 1
            },
            Stmt::Expr(Expr::Call {
                name: "f".to_string(),
                args: vec![var("x")],
                line: 1
            }),
            Stmt::Return {
                value: None,
                line: 1
            },
            Stmt::Block(tacc::parser::Block::new(vec![], 1)),
        ]
    );
}

#[test]
fn comparison_is_not_an_assignment() {
    let stmts = parse_body("x == 1;");
    assert_eq!(
        stmts,
        vec![Stmt::Expr(bin(BinOpKind::Equal, var("x"), num(1)))]
    );
}

#[test]
fn control_flow() {
    let stmts = parse_body("if (x) { } if (x) { } else { y = 1; } while (x < 3) { }");

    assert!(matches!(stmts[0], Stmt::If { .. }));
    match &stmts[1] {
        Stmt::IfElse { otherwise, .. } => assert_eq!(otherwise.stmts.len(), 1),
        stmt => panic!("expected if/else, got {stmt:?}"),
    }
    match &stmts[2] {
        Stmt::While { cond, body, .. } => {
            assert_eq!(*cond, bin(BinOpKind::LessThan, var("x"), num(3)));
            assert!(body.stmts.is_empty());
        }
        stmt => panic!("expected while, got {stmt:?}"),
    }
}

#[test]
fn statement_lines() {
    let stmts = parse_body("int x;\nx = 2;\n\nreturn x;");
    let lines: Vec<_> = stmts.iter().map(Stmt::line).collect();
    assert_eq!(lines, vec![1, 2, 4]);
}

#[test]
fn missing_expression() {
    let err = parse("int main() {\n  int x = ;\n}").unwrap_err();
    assert_eq!(
        err,
        CompileError::Syntax {
            found: "';'".to_string(),
            line: 2
        }
    );
    assert_eq!(err.to_string(), "Syntax Error: unexpected ';' (line 2)");
}

#[test]
fn missing_semicolon() {
    let err = parse("int main() { return 1 }").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SyntaxError);
    assert_eq!(err.to_string(), "Syntax Error: unexpected '}' (line 1)");
}

#[test]
fn unclosed_block() {
    let err = parse("int main() {\n return 0;").unwrap_err();
    assert_eq!(err, CompileError::UnexpectedEof { line: 2 });
}

#[test]
fn empty_program() {
    assert_eq!(parse("").unwrap_err(), CompileError::UnexpectedEof { line: 1 });
}

#[test]
fn unsupported_for_loop() {
    let err = parse("int main() { for (;;) { } }").unwrap_err();
    assert_eq!(
        err,
        CompileError::Syntax {
            found: "'for'".to_string(),
            line: 1
        }
    );
}

#[test]
fn statement_outside_function() {
    let err = parse("x = 1;").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SyntaxError);
}

#[test]
fn deep_parentheses_are_rejected() {
    let input = format!("return {}1{};", "(".repeat(1000), ")".repeat(1000));
    let err = parse(&format!("int main() {{ {input} }}")).unwrap_err();
    assert_eq!(err.to_string(), "Syntax Error: unexpected '(' (line 1)");
}

#[test]
fn deep_unary_chain_is_rejected() {
    let input = format!("return {}1;", "- ".repeat(1000));
    let err = parse(&format!("int main() {{ {input} }}")).unwrap_err();
    assert_eq!(err.to_string(), "Syntax Error: unexpected '-' (line 1)");
}

#[test]
fn deep_blocks_are_rejected() {
    let input = format!("{}{}", "{".repeat(1000), "}".repeat(1000));
    let err = parse(&format!("int main() {{ {input} }}")).unwrap_err();
    assert_eq!(err.to_string(), "Syntax Error: unexpected '{' (line 1)");
}

#[test]
fn moderate_nesting_is_accepted() {
    let expr = parse_expr(&format!("{}1{}", "(".repeat(50), ")".repeat(50)));
    assert_eq!(expr, num(1));

    let stmts = parse_body(&format!("{}{}", "{".repeat(50), "}".repeat(50)));
    assert_eq!(stmts.len(), 1);
}
