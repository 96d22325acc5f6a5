// tamarin-vm - Recursive fibonacci benchmark
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use tamarin_parser::parse;
use tamarin_vm::compiler::Compiler;
use tamarin_vm::vm::VM;

fn run(source: &str) {
    let program = parse(source).expect("parse error");
    let mut compiler = Compiler::new();
    compiler.compile(&program).expect("compile error");
    let mut vm = VM::new(compiler.bytecode());
    vm.run().expect("runtime error");
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let code = "
    let fib = fn(x) {
        if (x == 0) { return 0; }
        if (x == 1) { return 1; }
        return fib(x - 1) + fib(x - 2);
    };
    fib(22);
    ";
    c.bench_function("fib(22) in vm", |b| b.iter(|| run(black_box(code))));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
