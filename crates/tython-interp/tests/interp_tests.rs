//! End-to-end interpreter tests: source text in, values or rendered errors
//! out.

use tython_common::error::ErrorKind;
use tython_common::span::Span;
use tython_common::token::TypeTag;
use tython_interp::value::{Value, ValueKind};
use tython_interp::{run, Runtime};

/// Run a program and return the value of its last statement.
fn last_value(source: &str) -> Value {
    let result = run(source).expect("program should run");
    let ValueKind::List(mut values) = result.kind else {
        panic!("top-level result must be a list of statement values");
    };
    values.pop().expect("program has at least one statement")
}

// ── Literals and arithmetic ────────────────────────────────────────────

#[test]
fn power_tower_is_right_associative() {
    let value = last_value("int x = 2^3^2");
    assert_eq!(value.kind, ValueKind::Int(512));
}

#[test]
fn string_repetition() {
    let value = last_value("str s = \"ab\" * 3");
    assert_eq!(value.kind, ValueKind::Str("ababab".to_string()));
}

#[test]
fn precedence_in_evaluation() {
    assert_eq!(last_value("1+2*3").kind, ValueKind::Int(7));
    assert_eq!(last_value("(1+2)*3").kind, ValueKind::Int(9));
}

#[test]
fn unary_minus() {
    assert_eq!(last_value("-5").kind, ValueKind::Int(-5));
    assert_eq!(last_value("--5").kind, ValueKind::Int(5));
}

#[test]
fn division_by_zero_spans_the_divisor() {
    let err = run("1 / 0").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Runtime);
    assert_eq!(err.details, "Cannot divide by zero");
    assert_eq!(err.span, Span::new(4, 5));
}

// ── Typed assignment ───────────────────────────────────────────────────

#[test]
fn typed_assignment_accepts_matching_types() {
    assert_eq!(last_value("int x = 3").kind, ValueKind::Int(3));
    assert_eq!(last_value("num x = 3.5").kind, ValueKind::Float(3.5));
    assert_eq!(last_value("num x = 3").kind, ValueKind::Int(3));
    assert_eq!(
        last_value("any x = \"hi\"").kind,
        ValueKind::Str("hi".to_string())
    );
}

#[test]
fn typed_assignment_rejects_mismatches() {
    let err = run("int x = \"hi\"").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Type);

    let err = run("num x = \"s\"").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Type);

    let err = run("str s = 1").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Type);
}

#[test]
fn assignment_binds_for_later_statements() {
    assert_eq!(last_value("int x = 3\nx + 1").kind, ValueKind::Int(4));
}

#[test]
fn accessing_undefined_name_fails() {
    let err = run("missing").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Runtime);
    assert_eq!(err.details, "missing is not defined");
}

#[test]
fn variable_access_copies_the_value() {
    // Appending through a second name must not alias the first.
    let program = "any a = [1]\nany b = a + 2\na";
    let value = last_value(program);
    let ValueKind::List(elements) = value.kind else {
        panic!("expected a list");
    };
    assert_eq!(elements.len(), 1);
}

// ── Control flow ───────────────────────────────────────────────────────

#[test]
fn inline_if_yields_branch_value() {
    let value = last_value("if 1 < 2: \"yes\" else \"no\"");
    assert_eq!(value.kind, ValueKind::Str("yes".to_string()));

    let value = last_value("if 1 > 2: \"yes\" else \"no\"");
    assert_eq!(value.kind, ValueKind::Str("no".to_string()));
}

#[test]
fn elif_chain_picks_first_truthy_case() {
    let program = "int x = 2\nif x == 1: 10 elif x == 2: 20 else 30";
    assert_eq!(last_value(program).kind, ValueKind::Int(20));
}

#[test]
fn if_without_match_yields_null() {
    assert_eq!(last_value("if 0: 1").kind, ValueKind::Null);
}

#[test]
fn block_if_yields_null() {
    assert_eq!(last_value("if 1:\n 5\nstop").kind, ValueKind::Null);
}

#[test]
fn for_loop_accumulates_through_scope() {
    let program = "int n = 0\nfor i = 1 to 5: int n = n + i\nn";
    assert_eq!(last_value(program).kind, ValueKind::Int(10));
}

#[test]
fn inline_for_collects_body_values() {
    let value = last_value("for i = 0 to 3: i * 2");
    assert_eq!(
        value.kind,
        ValueKind::List(vec![
            Value::int(0, Span::point(0), None),
            Value::int(2, Span::point(0), None),
            Value::int(4, Span::point(0), None),
        ])
    );
}

#[test]
fn block_for_yields_null() {
    assert_eq!(last_value("for i = 0 to 3:\n i\nstop").kind, ValueKind::Null);
}

#[test]
fn for_with_negative_step_counts_down() {
    let value = last_value("for i = 3 to 0 step -1: i");
    assert_eq!(
        value.kind,
        ValueKind::List(vec![
            Value::int(3, Span::point(0), None),
            Value::int(2, Span::point(0), None),
            Value::int(1, Span::point(0), None),
        ])
    );
}

#[test]
fn for_bounds_must_be_ints() {
    let err = run("for i = 1.5 to 3: i").unwrap_err();
    assert_eq!(err.details, "For loop bounds must be of type <Int>");
}

#[test]
fn while_loop_with_break() {
    let program = "int n = 0\nwhile True:\n int n = n + 1\n if n == 3: break\nstop\nn";
    assert_eq!(last_value(program).kind, ValueKind::Int(3));
}

#[test]
fn continue_skips_collection() {
    let value = last_value("for i = 0 to 5: if i == 2: continue else i");
    assert_eq!(
        value.kind,
        ValueKind::List(vec![
            Value::int(0, Span::point(0), None),
            Value::int(1, Span::point(0), None),
            Value::int(3, Span::point(0), None),
            Value::int(4, Span::point(0), None),
        ])
    );
}

// ── Functions ──────────────────────────────────────────────────────────

#[test]
fn auto_return_function() {
    let value = last_value("def add(a, b) -> a + b; add(2, 3)");
    assert_eq!(value.kind, ValueKind::Int(5));
}

#[test]
fn block_function_needs_explicit_return() {
    let program = "def f()\n 41\n return 42\nstop\nf()";
    assert_eq!(last_value(program).kind, ValueKind::Int(42));

    // Without a return the call yields Null.
    let program = "def g()\n 41\nstop\ng()";
    assert_eq!(last_value(program).kind, ValueKind::Null);
}

#[test]
fn return_exits_the_enclosing_loop_and_function() {
    let program = "def f()\n for i = 5 to 10: return i\n return 0\nstop\nf()";
    assert_eq!(last_value(program).kind, ValueKind::Int(5));
}

#[test]
fn lexical_scope_resolves_at_call_time() {
    // g is defined after f, but f's definition context chains to the
    // program scope, so the call finds it.
    let program = "def f() -> g()\ndef g() -> 42\nf()";
    assert_eq!(last_value(program).kind, ValueKind::Int(42));
}

#[test]
fn closures_capture_the_defining_frame() {
    let program = "def outer(x)\n def inner() -> x * 2\n return inner()\nstop\nouter(21)";
    assert_eq!(last_value(program).kind, ValueKind::Int(42));
}

#[test]
fn arity_mismatch_is_an_error() {
    let err = run("def f(a) -> a\nf(1, 2)").unwrap_err();
    assert_eq!(
        err.details,
        "too many args passed into 'f' (Expected 1)"
    );

    let err = run("def f(a, b) -> a\nf(1)").unwrap_err();
    assert_eq!(err.details, "too few args passed into 'f' (Expected 2)");
}

#[test]
fn calling_a_non_function_fails() {
    let err = run("int x = 3\nx()").unwrap_err();
    assert_eq!(err.details, "Illegal operation");
}

#[test]
fn anonymous_functions_are_values() {
    let value = last_value("def (a) -> a + 1");
    assert!(matches!(value.kind, ValueKind::Function(_)));
}

#[test]
fn runtime_errors_carry_a_traceback() {
    let err = run("def f() -> 1 / 0\nf()").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Runtime);
    assert_eq!(err.trace.len(), 2);
    assert_eq!(err.trace[0].display_name, "<program>");
    assert_eq!(err.trace[1].display_name, "f");
}

// ── Globals and built-ins ──────────────────────────────────────────────

#[test]
fn globals_are_pre_bound() {
    assert_eq!(last_value("True").kind, ValueKind::Bool(true));
    assert_eq!(last_value("False").kind, ValueKind::Bool(false));
    assert_eq!(last_value("Null").kind, ValueKind::Null);
}

#[test]
fn type_builtin_reifies_types() {
    assert_eq!(last_value("type(3)").kind, ValueKind::Type(TypeTag::Int));
    assert_eq!(
        last_value("type(3.5)").kind,
        ValueKind::Type(TypeTag::Float)
    );
    assert_eq!(
        last_value("type(\"s\")").kind,
        ValueKind::Type(TypeTag::String)
    );
    assert_eq!(
        last_value("type(type(3))").kind,
        ValueKind::Type(TypeTag::Type)
    );
}

#[test]
fn len_builtin() {
    assert_eq!(last_value("len([1, 2, 3])").kind, ValueKind::Int(3));
    assert_eq!(last_value("len([])").kind, ValueKind::Int(0));

    let err = run("len(3)").unwrap_err();
    assert_eq!(err.details, "Argument must be of type <List>");
}

#[test]
fn print_yields_null() {
    assert_eq!(last_value("print(1)").kind, ValueKind::Null);
}

#[test]
fn list_operators_end_to_end() {
    assert_eq!(
        last_value("[1, 2] / 1").kind,
        ValueKind::Int(2)
    );
    assert_eq!(last_value("len([1, 2] * [3])").kind, ValueKind::Int(3));
    assert_eq!(last_value("len([1, 2] - 0)").kind, ValueKind::Int(1));

    let err = run("[1, 2] / 9").unwrap_err();
    assert_eq!(err.details, "Index out of bounds");
}

#[test]
fn logic_operators_end_to_end() {
    assert_eq!(last_value("1 and 2").kind, ValueKind::Bool(true));
    assert_eq!(last_value("0 or \"\"").kind, ValueKind::Bool(false));
    assert_eq!(last_value("not 0").kind, ValueKind::Bool(true));
}

// ── Sessions ───────────────────────────────────────────────────────────

#[test]
fn runtime_persists_definitions_between_runs() {
    let runtime = Runtime::new();
    runtime.run("int x = 41").expect("first run succeeds");
    let result = runtime.run("x + 1").expect("second run sees x");
    let ValueKind::List(values) = result.kind else {
        panic!("top-level result must be a list");
    };
    assert_eq!(values[0].kind, ValueKind::Int(42));
}

#[test]
fn fresh_runs_are_isolated() {
    run("int x = 1").expect("first run succeeds");
    let err = run("x").unwrap_err();
    assert_eq!(err.details, "x is not defined");
}

#[test]
fn multi_statement_program_yields_all_values() {
    let result = run("1\n2\n3").expect("program runs");
    let ValueKind::List(values) = result.kind else {
        panic!("expected list");
    };
    assert_eq!(values.len(), 3);
    assert_eq!(values[2].kind, ValueKind::Int(3));
}

#[test]
fn rendered_runtime_error_has_traceback_and_arrows() {
    let source = "def f() -> 1 / 0\nf()";
    let err = run(source).unwrap_err();
    let rendered = err.render("test.ty", source);
    assert!(rendered.starts_with("Traceback (most recent call last):\n"));
    assert!(rendered.contains("  File test.ty, line 2, in <program>\n"));
    assert!(rendered.contains("  File test.ty, line 1, in f\n"));
    assert!(rendered.contains("RuntimeError: Cannot divide by zero\n"));
}
