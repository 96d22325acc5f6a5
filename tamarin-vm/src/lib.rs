// tamarin-vm - Bytecode compiler and virtual machine for the Tamarin programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Bytecode compiler and stack-based virtual machine for Tamarin.
//!
//! This crate provides the performance path: source is compiled to the
//! flat bytecode defined in `tamarin-core::code` and executed by a stack
//! machine with call frames and closures. The AST-walking evaluator in
//! `tamarin-core` provides the same observable semantics without the
//! compile step.

pub mod compiler;
pub mod vm;

pub use compiler::{Bytecode, CompileError, Compiler, Symbol, SymbolScope, SymbolTable};
pub use vm::{GLOBALS_SIZE, MAX_FRAMES, RuntimeError, STACK_SIZE, VM};
