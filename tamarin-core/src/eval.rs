// tamarin-core - Tree-walking evaluator for Tamarin
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Tree-walking evaluator.
//!
//! The reference semantics for Tamarin: walks the AST directly with a
//! chained environment. Failures are in-language `Object::Error` values
//! that propagate outward through statements and blocks, short-circuiting
//! further evaluation, and `return` travels as an `Object::ReturnValue`
//! wrapper that the enclosing function call (or program) unwraps.
//!
//! The compiled VM path is the performance path; this one exists for
//! cross-checking and for hosts that want evaluation without bytecode.

use std::rc::Rc;

use tamarin_parser::ast::{BlockStatement, Expression, Program, Statement};

use crate::builtins;
use crate::env::Env;
use crate::object::{Function, HashPair, Object};

/// Evaluate a program, unwrapping any top-level `return`.
pub fn eval_program(program: &Program, env: &Env) -> Object {
    let mut result = Object::Null;
    for statement in &program.statements {
        result = eval_statement(statement, env);
        match result {
            Object::ReturnValue(value) => return *value,
            Object::Error(_) => return result,
            _ => {}
        }
    }
    result
}

/// Evaluate a block without unwrapping `ReturnValue`, so `return` inside
/// nested blocks reaches the enclosing function.
fn eval_block(block: &BlockStatement, env: &Env) -> Object {
    let mut result = Object::Null;
    for statement in &block.statements {
        result = eval_statement(statement, env);
        if matches!(result, Object::ReturnValue(_) | Object::Error(_)) {
            return result;
        }
    }
    result
}

fn eval_statement(statement: &Statement, env: &Env) -> Object {
    match statement {
        Statement::Let { name, value } => {
            let value = eval_expression(value, env);
            if value.is_error() {
                return value;
            }
            env.define(name.clone(), value);
            Object::Null
        }
        Statement::Return { value } => {
            let value = match value {
                Some(expression) => eval_expression(expression, env),
                None => Object::Null,
            };
            if value.is_error() {
                return value;
            }
            Object::ReturnValue(Box::new(value))
        }
        Statement::Expression { expression } => eval_expression(expression, env),
    }
}

fn eval_expression(expression: &Expression, env: &Env) -> Object {
    match expression {
        Expression::IntegerLiteral(value) => Object::Integer(*value),
        Expression::StringLiteral(value) => Object::string(value.clone()),
        Expression::Boolean(value) => Object::Boolean(*value),
        Expression::Identifier(name) => eval_identifier(name, env),
        Expression::Prefix { operator, right } => {
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_prefix_expression(operator, right)
        }
        Expression::Infix {
            left,
            operator,
            right,
        } => {
            let left = eval_expression(left, env);
            if left.is_error() {
                return left;
            }
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_infix_expression(operator, left, right)
        }
        Expression::If {
            condition,
            consequence,
            alternative,
        } => {
            let condition = eval_expression(condition, env);
            if condition.is_error() {
                return condition;
            }
            if condition.is_truthy() {
                eval_block(consequence, env)
            } else if let Some(alternative) = alternative {
                eval_block(alternative, env)
            } else {
                Object::Null
            }
        }
        Expression::FunctionLiteral {
            parameters, body, ..
        } => Object::Function(Rc::new(Function {
            parameters: parameters.clone(),
            body: body.clone(),
            env: env.clone(),
        })),
        Expression::Call {
            function,
            arguments,
        } => {
            let function = eval_expression(function, env);
            if function.is_error() {
                return function;
            }
            let arguments = match eval_expressions(arguments, env) {
                Ok(arguments) => arguments,
                Err(error) => return error,
            };
            apply_function(function, &arguments)
        }
        Expression::ArrayLiteral { elements } => match eval_expressions(elements, env) {
            Ok(elements) => Object::array(elements),
            Err(error) => error,
        },
        Expression::HashLiteral { pairs } => eval_hash_literal(pairs, env),
        Expression::Index { left, index } => {
            let left = eval_expression(left, env);
            if left.is_error() {
                return left;
            }
            let index = eval_expression(index, env);
            if index.is_error() {
                return index;
            }
            eval_index_expression(left, index)
        }
    }
}

fn eval_identifier(name: &str, env: &Env) -> Object {
    if let Some(value) = env.lookup(name) {
        return value;
    }
    if let Some(builtin) = builtins::lookup(name) {
        return Object::Builtin(builtin);
    }
    Object::Error(format!("identifier not found: {}", name))
}

fn eval_expressions(
    expressions: &[Expression],
    env: &Env,
) -> Result<Vec<Object>, Object> {
    let mut results = Vec::with_capacity(expressions.len());
    for expression in expressions {
        let value = eval_expression(expression, env);
        if value.is_error() {
            return Err(value);
        }
        results.push(value);
    }
    Ok(results)
}

fn eval_prefix_expression(operator: &str, right: Object) -> Object {
    match operator {
        "!" => Object::Boolean(!right.is_truthy()),
        "-" => match right {
            Object::Integer(value) => Object::Integer(value.wrapping_neg()),
            other => Object::Error(format!("unknown operator: -{}", other.kind())),
        },
        _ => Object::Error(format!("unknown operator: {}{}", operator, right.kind())),
    }
}

fn eval_infix_expression(operator: &str, left: Object, right: Object) -> Object {
    match (&left, &right) {
        (Object::Integer(l), Object::Integer(r)) => {
            eval_integer_infix_expression(operator, *l, *r)
        }
        (Object::Str(l), Object::Str(r)) => {
            if operator == "+" {
                Object::string(format!("{}{}", l, r))
            } else if operator == "==" {
                Object::Boolean(l == r)
            } else if operator == "!=" {
                Object::Boolean(l != r)
            } else {
                Object::Error(format!("unknown operator: STRING {} STRING", operator))
            }
        }
        _ => match operator {
            "==" => Object::Boolean(left == right),
            "!=" => Object::Boolean(left != right),
            _ if left.kind() != right.kind() => Object::Error(format!(
                "type mismatch: {} {} {}",
                left.kind(),
                operator,
                right.kind()
            )),
            _ => Object::Error(format!(
                "unknown operator: {} {} {}",
                left.kind(),
                operator,
                right.kind()
            )),
        },
    }
}

fn eval_integer_infix_expression(operator: &str, left: i64, right: i64) -> Object {
    match operator {
        "+" => Object::Integer(left.wrapping_add(right)),
        "-" => Object::Integer(left.wrapping_sub(right)),
        "*" => Object::Integer(left.wrapping_mul(right)),
        "/" => {
            if right == 0 {
                Object::Error("division by zero".to_string())
            } else {
                Object::Integer(left.wrapping_div(right))
            }
        }
        "<" => Object::Boolean(left < right),
        ">" => Object::Boolean(left > right),
        "==" => Object::Boolean(left == right),
        "!=" => Object::Boolean(left != right),
        _ => Object::Error(format!("unknown operator: INTEGER {} INTEGER", operator)),
    }
}

fn apply_function(function: Object, arguments: &[Object]) -> Object {
    match function {
        Object::Function(function) => {
            if arguments.len() != function.parameters.len() {
                return Object::Error(format!(
                    "wrong number of arguments: want={}, got={}",
                    function.parameters.len(),
                    arguments.len()
                ));
            }
            let env = function.env.child();
            for (parameter, argument) in function.parameters.iter().zip(arguments) {
                env.define(parameter.clone(), argument.clone());
            }
            unwrap_return_value(eval_block(&function.body, &env))
        }
        Object::Builtin(builtin) => (builtin.func)(arguments).unwrap_or(Object::Null),
        other => Object::Error(format!("not a function: {}", other.kind())),
    }
}

fn unwrap_return_value(value: Object) -> Object {
    match value {
        Object::ReturnValue(value) => *value,
        other => other,
    }
}

fn eval_hash_literal(pairs: &[(Expression, Expression)], env: &Env) -> Object {
    let mut hash = im::OrdMap::new();
    for (key_expression, value_expression) in pairs {
        let key = eval_expression(key_expression, env);
        if key.is_error() {
            return key;
        }
        let Some(hash_key) = key.hash_key() else {
            return Object::Error(format!("unusable as hash key: {}", key.kind()));
        };
        let value = eval_expression(value_expression, env);
        if value.is_error() {
            return value;
        }
        hash.insert(hash_key, HashPair { key, value });
    }
    Object::Hash(hash)
}

fn eval_index_expression(left: Object, index: Object) -> Object {
    match (&left, &index) {
        (Object::Array(elements), Object::Integer(i)) => {
            if *i < 0 || *i as usize >= elements.len() {
                Object::Null
            } else {
                elements[*i as usize].clone()
            }
        }
        (Object::Hash(pairs), _) => match index.hash_key() {
            Some(key) => pairs
                .get(&key)
                .map(|pair| pair.value.clone())
                .unwrap_or(Object::Null),
            None => Object::Error(format!("unusable as hash key: {}", index.kind())),
        },
        _ => Object::Error(format!("index operator not supported: {}", left.kind())),
    }
}
