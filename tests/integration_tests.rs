use tacc::codegen::render;
use tacc::error::ErrorKind;
use tacc::{compile, CompileOptions};

fn wrap_in_main(input: &str) -> String {
    format!("int main() {{{}}}", input)
}

fn ir(input: &str) -> String {
    let compilation = compile(input, &CompileOptions::default()).expect("compilation should succeed");
    render(&compilation.instructions)
}

fn ir_unoptimized(input: &str) -> String {
    let options = CompileOptions { optimize: false };
    let compilation = compile(input, &options).expect("compilation should succeed");
    render(&compilation.instructions)
}

fn error_kinds(input: &str) -> Vec<ErrorKind> {
    compile(input, &CompileOptions::default())
        .expect_err("compilation should fail")
        .iter()
        .map(|e| e.kind())
        .collect()
}

#[test]
fn folded_return() {
    assert_eq!(
        ir(&wrap_in_main("return 2 + 3 * 4;")),
        "func main:\nt1 = 14\ngoto L1\nL1:"
    );
}

#[test]
fn unoptimized_return() {
    assert_eq!(
        ir_unoptimized(&wrap_in_main("return 2 + 3 * 4;")),
        "func main:\nt2 = 3 * 4\nt3 = 2 + t2\nt1 = t3\ngoto L1\nL1:"
    );
}

#[test]
fn propagated_locals() {
    assert_eq!(
        ir(&wrap_in_main("int a = 5; int b = a + 2; return b;")),
        "func main:\na = 5\nb = 7\nt1 = 7\ngoto L1\nL1:"
    );
}

#[test]
fn propagated_constants_cross_function_boundaries() {
    assert_eq!(
        ir("int f() { int a = 5; return a; } int g(int a) { return a; }"),
        [
            "func f:", "a = 5", "t1 = 5", "goto L1", "L1:", "func g:", "param a", "t2 = 5",
            "goto L2", "L2:",
        ]
        .join("\n")
    );
}

#[test]
fn unreachable_statements_are_counted() {
    let input = wrap_in_main("int x; int y; return 1; x = 2; y = 3;");
    let compilation = compile(&input, &CompileOptions::default()).unwrap();

    assert_eq!(compilation.removed, 2);
    assert_eq!(
        render(&compilation.instructions),
        "func main:\nt1 = 1\ngoto L1\nL1:"
    );
}

#[test]
fn nothing_is_removed_without_optimizer() {
    let input = wrap_in_main("int x; return 1; x = 2;");
    let compilation = compile(&input, &CompileOptions { optimize: false }).unwrap();

    assert_eq!(compilation.removed, 0);
    assert!(render(&compilation.instructions).contains("x = 2"));
}

#[test]
fn identities_are_reduced() {
    assert_eq!(
        ir("int f(int x) { return x * 1 + 0; }"),
        "func f:\nparam x\nt1 = x\ngoto L1\nL1:"
    );
}

#[test]
fn recursive_function() {
    assert_eq!(
        ir("int fact(int n) {
                if (n < 2) { return 1; }
                return n * fact(n - 1);
            }"),
        [
            "func fact:",
            "param n",
            "t2 = n < 2",
            "if not t2 goto L2",
            "t1 = 1",
            "goto L1",
            "goto L3",
            "L2:",
            "L3:",
            "t3 = n - 1",
            "param t3",
            "t4 = call fact, 1",
            "t5 = n * t4",
            "t1 = t5",
            "goto L1",
            "L1:",
        ]
        .join("\n")
    );
}

#[test]
fn loop_over_parameter() {
    assert_eq!(
        ir("int sum(int n) {
                int total;
                total = 0;
                while (0 < n) {
                    total = total + n;
                    n = n - 1;
                }
                return total;
            }"),
        [
            "func sum:",
            "param n",
            "total = 0",
            "goto L3",
            "L2:",
            "t2 = total + n",
            "total = t2",
            "t3 = n - 1",
            "n = t3",
            "L3:",
            "t4 = 0 < n",
            "if t4 goto L2",
            "L4:",
            "t1 = total",
            "goto L1",
            "L1:",
        ]
        .join("\n")
    );
}

#[test]
fn symbol_table_is_returned() {
    let compilation = compile("int f(int a) { return a; }", &CompileOptions::default()).unwrap();
    assert!(compilation
        .symbol_table
        .lookup(tacc::analyzer::SymbolTable::GLOBAL, "f")
        .is_some_and(|s| s.is_function()));
}

#[test]
fn undeclared_variable_produces_no_ir() {
    let errors = compile(&wrap_in_main("int x = 1; return x + y;"), &CompileOptions::default())
        .unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].to_string(),
        "Semantic Error: variable 'y' is not declared (line 1)"
    );
}

#[test]
fn scopes_are_isolated() {
    assert!(compile(
        "int f(int x) { return x; } int g() { int x = 1; return x; }",
        &CompileOptions::default()
    )
    .is_ok());
    assert_eq!(
        error_kinds(&wrap_in_main("int x; int x; return 0;")),
        vec![ErrorKind::DuplicateDeclaration]
    );
}

#[test]
fn every_lexical_error_is_reported() {
    assert_eq!(
        error_kinds(&wrap_in_main("int a = 1 @ 2; return $a;")),
        vec![ErrorKind::LexicalError, ErrorKind::LexicalError]
    );
}

#[test]
fn first_syntax_error_stops_compilation() {
    assert_eq!(
        error_kinds(&wrap_in_main("int = 1; return ;;")),
        vec![ErrorKind::SyntaxError]
    );
}

#[test]
fn semantic_errors_are_all_reported() {
    assert_eq!(
        error_kinds(
            "int add(int a, int b) { return a + b; }
             int main() { return add(1) + sub(2) + z; }"
        ),
        vec![
            ErrorKind::ArityError,
            ErrorKind::UndeclaredFunction,
            ErrorKind::UndeclaredVariable,
        ]
    );
}

#[test]
fn compiling_twice_gives_the_same_ir() {
    let input = "int f(int x) { if (x) { return 1; } return 2; } int main() { return f(3); }";
    assert_eq!(ir(input), ir(input));
}
