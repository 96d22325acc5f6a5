// tamarin - A small language with a bytecode VM, written in Rust
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process;
use std::time::Instant;

use tamarin_core::builtins::BUILTINS;
use tamarin_core::env::Env;
use tamarin_core::eval::eval_program;
use tamarin_core::object::Object;
use tamarin_parser::{Parser, parse};
use tamarin_vm::compiler::{Compiler, SymbolTable};
use tamarin_vm::vm::VM;

/// Which execution engine to run source through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Engine {
    /// Compile to bytecode and run on the VM (default).
    Vm,
    /// Walk the AST directly.
    Eval,
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    if args.len() == 1 && (args[0] == "--version" || args[0] == "-v") {
        println!("Tamarin v0.1.0");
        return;
    }

    if args.first().map(String::as_str) == Some("bench") {
        run_bench();
        return;
    }

    if args.first().map(String::as_str) == Some("--bytecode") {
        match args.get(1) {
            Some(file) => dump_bytecode(file),
            None => {
                eprintln!("--bytecode requires a file argument");
                process::exit(1);
            }
        }
        return;
    }

    let engine = if args.iter().any(|a| a == "--eval") {
        Engine::Eval
    } else {
        Engine::Vm
    };
    let files: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();

    if files.is_empty() {
        run_repl(engine);
    } else {
        run_files(&files, engine);
    }
}

/// Evaluate a sequence of source files.
fn run_files(files: &[&String], engine: Engine) {
    for file_path in files {
        if let Err(e) = run_file(file_path, engine) {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

/// Evaluate a single source file.
fn run_file(file_path: &str, engine: Engine) -> Result<(), String> {
    let path = Path::new(file_path);

    match path.extension().and_then(|e| e.to_str()) {
        Some("tam") => {}
        Some(ext) => {
            return Err(format!(
                "Error: unsupported file extension '.{}' for '{}'",
                ext, file_path
            ));
        }
        None => {
            return Err(format!(
                "Error: file '{}' has no extension (expected .tam)",
                file_path
            ));
        }
    }

    let source =
        fs::read_to_string(path).map_err(|e| format!("Error reading '{}': {}", file_path, e))?;

    let program = parse(&source)
        .map_err(|errors| format!("Parse errors in '{}':\n{}", file_path, errors))?;

    match engine {
        Engine::Vm => {
            let mut compiler = Compiler::new();
            compiler
                .compile(&program)
                .map_err(|e| format!("Error in '{}': {}", file_path, e))?;
            let mut vm = VM::new(compiler.bytecode());
            vm.run()
                .map_err(|e| format!("Error in '{}': {}", file_path, e))?;
        }
        Engine::Eval => {
            let env = Env::new();
            let result = eval_program(&program, &env);
            if let Object::Error(message) = result {
                return Err(format!("Error in '{}': {}", file_path, message));
            }
        }
    }

    Ok(())
}

/// Run the interactive console loop.
///
/// The compiler symbol table, constants pool, and globals slab persist
/// across inputs, so definitions carry over from line to line.
fn run_repl(engine: Engine) {
    println!("Hello! This is the Tamarin programming language!");
    println!("Feel free to type in commands");

    // VM session state
    let symbol_table = SymbolTable::new();
    for (i, builtin) in BUILTINS.iter().enumerate() {
        symbol_table.define_builtin(i, builtin.name);
    }
    let mut constants = Vec::new();
    let globals = VM::new_globals();

    // Evaluator session state
    let env = Env::new();

    loop {
        print!(">> ");
        io::stdout().flush().expect("flushing stdout");

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => {
                println!();
                break;
            }
            Ok(_) => {
                let input = input.trim();
                if input.is_empty() {
                    continue;
                }

                let mut parser = Parser::new(tamarin_parser::Lexer::new(input));
                let program = parser.parse_program();
                if !parser.errors().is_empty() {
                    for message in parser.errors() {
                        eprintln!("\t{}", message);
                    }
                    continue;
                }

                match engine {
                    Engine::Vm => {
                        let mut compiler =
                            Compiler::new_with_state(symbol_table.clone(), constants.clone());
                        if let Err(e) = compiler.compile(&program) {
                            eprintln!("Compilation failed:\n\t{}", e);
                            continue;
                        }
                        let bytecode = compiler.bytecode();
                        constants = bytecode.constants.clone();
                        let mut vm = VM::with_globals(bytecode, globals.clone());
                        match vm.run() {
                            Ok(()) => println!("{}", vm.last_popped_stack_elem()),
                            Err(e) => eprintln!("Executing bytecode failed:\n\t{}", e),
                        }
                    }
                    Engine::Eval => match eval_program(&program, &env) {
                        Object::Error(message) => eprintln!("Error: {}", message),
                        result => println!("{}", result),
                    },
                }
            }
            Err(e) => {
                eprintln!("Read error: {}", e);
                break;
            }
        }
    }
}

/// Time the recursive fibonacci program on both engines.
fn run_bench() {
    let source = "
    let fib = fn(x) {
        if (x == 0) { return 0; }
        if (x == 1) { return 1; }
        return fib(x - 1) + fib(x - 2);
    };
    fib(25);
    ";

    let program = parse(source).unwrap_or_else(|errors| {
        eprintln!("Parse errors:\n{}", errors);
        process::exit(1);
    });

    let start = Instant::now();
    let mut compiler = Compiler::new();
    if let Err(e) = compiler.compile(&program) {
        eprintln!("Compilation failed: {}", e);
        process::exit(1);
    }
    let mut vm = VM::new(compiler.bytecode());
    if let Err(e) = vm.run() {
        eprintln!("Executing bytecode failed: {}", e);
        process::exit(1);
    }
    println!(
        "vm     took: {:?} (result: {})",
        start.elapsed(),
        vm.last_popped_stack_elem()
    );

    let start = Instant::now();
    let env = Env::new();
    let result = eval_program(&program, &env);
    println!("eval   took: {:?} (result: {})", start.elapsed(), result);
}

/// Compile a file and print its constants and disassembled main function.
fn dump_bytecode(file_path: &str) {
    let source = match fs::read_to_string(file_path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading '{}': {}", file_path, e);
            process::exit(1);
        }
    };

    let program = parse(&source).unwrap_or_else(|errors| {
        eprintln!("Parse errors in '{}':\n{}", file_path, errors);
        process::exit(1);
    });

    let mut compiler = Compiler::new();
    if let Err(e) = compiler.compile(&program) {
        eprintln!("Error in '{}': {}", file_path, e);
        process::exit(1);
    }
    let bytecode = compiler.bytecode();

    println!("== constants ==");
    for (i, constant) in bytecode.constants.iter().enumerate() {
        match constant {
            Object::CompiledFunction(func) => {
                println!(
                    "{:>4}: fn ({} params, {} locals)",
                    i, func.num_parameters, func.num_locals
                );
                for line in func.instructions.to_string().lines() {
                    println!("      {}", line);
                }
            }
            other => println!("{:>4}: {}", i, other),
        }
    }
    println!("== main ==");
    print!("{}", bytecode.instructions);
}
