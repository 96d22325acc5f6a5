// tamarin-core - Built-in functions for Tamarin
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The built-in function registry.
//!
//! Builtins are exposed by stable name and index: the evaluator resolves
//! them by name, while compiled bytecode refers to them positionally via
//! `GetBuiltin`, so the order of `BUILTINS` is part of the compiled
//! contract and must not change.
//!
//! Failures are reported as `Object::Error` results; the evaluator passes
//! them through as in-language values and the VM converts them into
//! runtime errors.

use crate::object::{Builtin, Object, ObjectKind};

/// All built-in functions, in registry order.
pub const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "len",
        func: builtin_len,
    },
    Builtin {
        name: "puts",
        func: builtin_puts,
    },
    Builtin {
        name: "first",
        func: builtin_first,
    },
    Builtin {
        name: "last",
        func: builtin_last,
    },
    Builtin {
        name: "rest",
        func: builtin_rest,
    },
    Builtin {
        name: "push",
        func: builtin_push,
    },
];

/// Look up a builtin by name.
pub fn lookup(name: &str) -> Option<Builtin> {
    BUILTINS.iter().copied().find(|b| b.name == name)
}

/// Look up a builtin by registry index.
pub fn get(index: usize) -> Option<Builtin> {
    BUILTINS.get(index).copied()
}

fn error(message: String) -> Option<Object> {
    Some(Object::Error(message))
}

fn wrong_arguments(got: usize, want: usize) -> Option<Object> {
    error(format!(
        "wrong number of arguments. got={}, want={}",
        got, want
    ))
}

/// `len(x)` - byte length of a string, or element count of an array.
fn builtin_len(args: &[Object]) -> Option<Object> {
    if args.len() != 1 {
        return wrong_arguments(args.len(), 1);
    }
    match &args[0] {
        Object::Str(value) => Some(Object::Integer(value.len() as i64)),
        Object::Array(elements) => Some(Object::Integer(elements.len() as i64)),
        other => error(format!(
            "argument to `len` not supported, got {}",
            other.kind()
        )),
    }
}

/// `puts(v1, ...)` - print each value's display form on its own line.
fn builtin_puts(args: &[Object]) -> Option<Object> {
    for arg in args {
        println!("{}", arg);
    }
    None
}

fn expect_array<'a>(args: &'a [Object], name: &str) -> Result<&'a im::Vector<Object>, Object> {
    match &args[0] {
        Object::Array(elements) => Ok(elements),
        other => Err(Object::Error(format!(
            "argument to `{}` must be {}, got {}",
            name,
            ObjectKind::Array,
            other.kind()
        ))),
    }
}

/// `first(a)` - the first element of an array, or `null` when empty.
fn builtin_first(args: &[Object]) -> Option<Object> {
    if args.len() != 1 {
        return wrong_arguments(args.len(), 1);
    }
    match expect_array(args, "first") {
        Ok(elements) => elements.front().cloned().map(Some).unwrap_or(None),
        Err(error) => Some(error),
    }
}

/// `last(a)` - the last element of an array, or `null` when empty.
fn builtin_last(args: &[Object]) -> Option<Object> {
    if args.len() != 1 {
        return wrong_arguments(args.len(), 1);
    }
    match expect_array(args, "last") {
        Ok(elements) => elements.back().cloned().map(Some).unwrap_or(None),
        Err(error) => Some(error),
    }
}

/// `rest(a)` - a new array without the head, or `null` when empty.
fn builtin_rest(args: &[Object]) -> Option<Object> {
    if args.len() != 1 {
        return wrong_arguments(args.len(), 1);
    }
    match expect_array(args, "rest") {
        Ok(elements) => {
            if elements.is_empty() {
                None
            } else {
                Some(Object::Array(elements.clone().split_at(1).1))
            }
        }
        Err(error) => Some(error),
    }
}

/// `push(a, v)` - a new array with the value appended.
fn builtin_push(args: &[Object]) -> Option<Object> {
    if args.len() != 2 {
        return wrong_arguments(args.len(), 2);
    }
    match expect_array(args, "push") {
        Ok(elements) => {
            let mut pushed = elements.clone();
            pushed.push_back(args[1].clone());
            Some(Object::Array(pushed))
        }
        Err(error) => Some(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str, args: &[Object]) -> Option<Object> {
        (lookup(name).expect("builtin").func)(args)
    }

    #[test]
    fn test_registry_order_is_stable() {
        let names: Vec<&str> = BUILTINS.iter().map(|b| b.name).collect();
        assert_eq!(names, vec!["len", "puts", "first", "last", "rest", "push"]);
        assert_eq!(get(0).map(|b| b.name), Some("len"));
        assert_eq!(get(6), None);
    }

    #[test]
    fn test_len() {
        assert_eq!(
            call("len", &[Object::string("hello")]),
            Some(Object::Integer(5))
        );
        assert_eq!(call("len", &[Object::string("")]), Some(Object::Integer(0)));
        assert_eq!(
            call(
                "len",
                &[Object::array([Object::Integer(1), Object::Integer(2)])]
            ),
            Some(Object::Integer(2))
        );
        assert_eq!(
            call("len", &[Object::Integer(1)]),
            Some(Object::Error(
                "argument to `len` not supported, got INTEGER".to_string()
            ))
        );
        assert_eq!(
            call("len", &[]),
            Some(Object::Error(
                "wrong number of arguments. got=0, want=1".to_string()
            ))
        );
    }

    #[test]
    fn test_first_last() {
        let arr = Object::array([Object::Integer(1), Object::Integer(2)]);
        assert_eq!(call("first", &[arr.clone()]), Some(Object::Integer(1)));
        assert_eq!(call("last", &[arr]), Some(Object::Integer(2)));
        assert_eq!(call("first", &[Object::array([])]), None);
        assert_eq!(call("last", &[Object::array([])]), None);
        assert_eq!(
            call("first", &[Object::Integer(1)]),
            Some(Object::Error(
                "argument to `first` must be ARRAY, got INTEGER".to_string()
            ))
        );
    }

    #[test]
    fn test_rest() {
        let arr = Object::array([
            Object::Integer(1),
            Object::Integer(2),
            Object::Integer(3),
        ]);
        assert_eq!(
            call("rest", &[arr.clone()]),
            Some(Object::array([Object::Integer(2), Object::Integer(3)]))
        );
        // rest of a one-element array is an empty array, not null
        assert_eq!(
            call("rest", &[Object::array([Object::Integer(1)])]),
            Some(Object::array([]))
        );
        assert_eq!(call("rest", &[Object::array([])]), None);

        // the original array is untouched
        assert_eq!(call("len", &[arr]), Some(Object::Integer(3)));
    }

    #[test]
    fn test_push() {
        let arr = Object::array([Object::Integer(1)]);
        assert_eq!(
            call("push", &[arr.clone(), Object::Integer(2)]),
            Some(Object::array([Object::Integer(1), Object::Integer(2)]))
        );
        assert_eq!(call("len", &[arr]), Some(Object::Integer(1)));
        assert_eq!(
            call("push", &[Object::Integer(1), Object::Integer(2)]),
            Some(Object::Error(
                "argument to `push` must be ARRAY, got INTEGER".to_string()
            ))
        );
        assert_eq!(
            call("push", &[Object::array([])]),
            Some(Object::Error(
                "wrong number of arguments. got=1, want=2".to_string()
            ))
        );
    }
}
