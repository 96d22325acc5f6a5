// tamarin-parser - Abstract syntax tree for Tamarin
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Abstract syntax tree node definitions.
//!
//! Statements and expressions are sum types with boxed recursion. Every
//! node has a stable `Display` rendering: the parser tests compare
//! renderings instead of tree shapes, and the compiler uses the rendering
//! of hash keys to order them deterministically.

use std::fmt;

/// The root node of every parse.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{}", statement)?;
        }
        Ok(())
    }
}

/// A statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `let <name> = <value>;`
    Let { name: String, value: Expression },
    /// `return <value>?;`
    Return { value: Option<Expression> },
    /// A bare expression; its value is discarded (or reported by the REPL).
    Expression { expression: Expression },
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { name, value } => write!(f, "let {} = {};", name, value),
            Statement::Return { value: Some(value) } => write!(f, "return {};", value),
            Statement::Return { value: None } => write!(f, "return;"),
            Statement::Expression { expression } => write!(f, "{}", expression),
        }
    }
}

/// A brace-delimited statement list, as used by `if` arms and function
/// bodies. Renders as the concatenation of its statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStatement {
    pub statements: Vec<Statement>,
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{}", statement)?;
        }
        Ok(())
    }
}

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(String),
    IntegerLiteral(i64),
    StringLiteral(String),
    Boolean(bool),
    /// `!x` or `-x`.
    Prefix {
        operator: String,
        right: Box<Expression>,
    },
    /// `a <op> b`.
    Infix {
        left: Box<Expression>,
        operator: String,
        right: Box<Expression>,
    },
    /// `if (<condition>) { ... } else { ... }`; the else arm is optional.
    If {
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    /// `fn(<params>) { … }`. `name` is filled in when the literal is the
    /// right-hand side of a `let`, enabling self-recursion.
    FunctionLiteral {
        parameters: Vec<String>,
        body: BlockStatement,
        name: Option<String>,
    },
    /// `f(a, b)`.
    Call {
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
    /// `[a, b, c]`.
    ArrayLiteral { elements: Vec<Expression> },
    /// `{k: v, …}`. Pairs keep source order; the compiler sorts by the
    /// key's rendering when emitting.
    HashLiteral { pairs: Vec<(Expression, Expression)> },
    /// `a[i]`.
    Index {
        left: Box<Expression>,
        index: Box<Expression>,
    },
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(name) => f.write_str(name),
            Expression::IntegerLiteral(value) => write!(f, "{}", value),
            Expression::StringLiteral(value) => f.write_str(value),
            Expression::Boolean(value) => write!(f, "{}", value),
            Expression::Prefix { operator, right } => write!(f, "({}{})", operator, right),
            Expression::Infix {
                left,
                operator,
                right,
            } => write!(f, "({} {} {})", left, operator, right),
            Expression::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if ({}) {{ {} }}", condition, consequence)?;
                if let Some(alternative) = alternative {
                    write!(f, " else {{ {} }}", alternative)?;
                }
                Ok(())
            }
            Expression::FunctionLiteral {
                parameters, body, ..
            } => {
                // The self-name is compiler metadata, not surface syntax,
                // so it does not render.
                write!(f, "fn({}) {{ {} }}", parameters.join(", "), body)
            }
            Expression::Call {
                function,
                arguments,
            } => {
                let args: Vec<String> = arguments.iter().map(|a| a.to_string()).collect();
                write!(f, "{}({})", function, args.join(", "))
            }
            Expression::ArrayLiteral { elements } => {
                let elems: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
                write!(f, "[{}]", elems.join(", "))
            }
            Expression::HashLiteral { pairs } => {
                let pairs: Vec<String> = pairs
                    .iter()
                    .map(|(k, v)| format!("{}:{}", k, v))
                    .collect();
                write!(f, "{{{}}}", pairs.join(", "))
            }
            Expression::Index { left, index } => write!(f, "({}[{}])", left, index),
        }
    }
}
