// tamarin-vm - Runtime error path tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use tamarin_parser::parse;
use tamarin_vm::compiler::Compiler;
use tamarin_vm::vm::{RuntimeError, VM};

fn run_err(source: &str) -> RuntimeError {
    let program = parse(source).expect("parse error");
    let mut compiler = Compiler::new();
    compiler.compile(&program).expect("compile error");
    let mut vm = VM::new(compiler.bytecode());
    vm.run().expect_err("expected runtime error")
}

fn assert_error_message(source: &str, expected: &str) {
    assert_eq!(run_err(source).to_string(), expected, "source: {:?}", source);
}

#[test]
fn test_binary_type_mismatches() {
    assert_error_message(
        "5 + true",
        "unsupported types for binary operation: INTEGER BOOLEAN",
    );
    assert_error_message(
        "5 + true; 5;",
        "unsupported types for binary operation: INTEGER BOOLEAN",
    );
    assert_error_message(
        "\"a\" + 1",
        "unsupported types for binary operation: STRING INTEGER",
    );
    assert_error_message("\"a\" - \"b\"", "unknown string operator: OpSub");
    assert_error_message(
        "true + false",
        "unsupported types for binary operation: BOOLEAN BOOLEAN",
    );
}

#[test]
fn test_comparison_type_errors() {
    assert_error_message(
        "true > false",
        "unknown operator: OpGreaterThan (BOOLEAN BOOLEAN)",
    );
    assert_error_message(
        "\"a\" > \"b\"",
        "unknown operator: OpGreaterThan (STRING STRING)",
    );
    // Equality works across every type and never errors.
    let program = parse("[1] == {1: 1}").expect("parse error");
    let mut compiler = Compiler::new();
    compiler.compile(&program).expect("compile error");
    let mut vm = VM::new(compiler.bytecode());
    vm.run().expect("equality must not error");
}

#[test]
fn test_negation_errors() {
    assert_error_message("-true", "unsupported type for negation: BOOLEAN");
    assert_error_message("-\"a\"", "unsupported type for negation: STRING");
}

#[test]
fn test_division_by_zero() {
    assert_eq!(run_err("1 / 0"), RuntimeError::DivisionByZero);
    assert_eq!(run_err("let x = 10; x / (5 - 5)"), RuntimeError::DivisionByZero);
    assert_error_message("1 / 0", "division by zero");
}

#[test]
fn test_calling_non_functions() {
    assert_error_message("1(2)", "calling non-function and non-builtin");
    assert_error_message("\"not a fn\"()", "calling non-function and non-builtin");
    assert_error_message("let x = 5; x();", "calling non-function and non-builtin");
}

#[test]
fn test_arity_mismatches() {
    assert_error_message(
        "fn() { 1; }(1);",
        "wrong number of arguments: want=0, got=1",
    );
    assert_error_message(
        "fn(a) { a; }();",
        "wrong number of arguments: want=1, got=0",
    );
    assert_error_message(
        "fn(a, b) { a + b; }(1);",
        "wrong number of arguments: want=2, got=1",
    );
}

#[test]
fn test_unusable_hash_keys() {
    assert_error_message(
        "{\"name\": \"Tamarin\"}[fn(x) { x }];",
        "unusable as hash key: CLOSURE",
    );
    assert_error_message("{[1]: 2}", "unusable as hash key: ARRAY");
    assert_error_message("{{}: 2}", "unusable as hash key: HASH");
}

#[test]
fn test_unsupported_index_targets() {
    assert_error_message("5[0]", "index operator not supported: INTEGER");
    assert_error_message("\"str\"[0]", "index operator not supported: STRING");
    assert_error_message("true[0]", "index operator not supported: BOOLEAN");
}

#[test]
fn test_builtin_errors_become_runtime_errors() {
    assert_eq!(
        run_err("len(1)"),
        RuntimeError::Builtin("argument to `len` not supported, got INTEGER".to_string())
    );
    assert_eq!(
        run_err("len(\"one\", \"two\")"),
        RuntimeError::Builtin("wrong number of arguments. got=2, want=1".to_string())
    );
    assert_eq!(
        run_err("first(1)"),
        RuntimeError::Builtin("argument to `first` must be ARRAY, got INTEGER".to_string())
    );
    assert_eq!(
        run_err("push(1, 1)"),
        RuntimeError::Builtin("argument to `push` must be ARRAY, got INTEGER".to_string())
    );
}

#[test]
fn test_unbounded_recursion_overflows_frames() {
    assert_eq!(
        run_err("let f = fn() { f(); }; f();"),
        RuntimeError::FrameOverflow
    );
}

#[test]
fn test_deep_argument_recursion_overflows() {
    // Each nested call leaves its callee and argument on the stack, so
    // runaway recursion trips one of the fixed-size limits.
    let error = run_err("let f = fn(x) { f(x + 1); }; f(0);");
    assert!(
        matches!(error, RuntimeError::FrameOverflow | RuntimeError::StackOverflow),
        "unexpected error: {:?}",
        error
    );
}

#[test]
fn test_value_stack_overflow() {
    // A single expression pushing more than the stack holds.
    let mut source = String::from("[");
    for i in 0..3000 {
        if i > 0 {
            source.push_str(", ");
        }
        source.push('1');
    }
    source.push(']');
    assert_eq!(run_err(&source), RuntimeError::StackOverflow);
}
