use std::fmt;
use std::fmt::Formatter;

use crate::evaluator::new_error;
use crate::object::Object;

pub type BuiltinFn = fn(args: Vec<Object>) -> Object;

#[derive(Clone)]
pub struct BuiltinFunction {
    name: String,
    func: BuiltinFn,
}

impl fmt::Display for BuiltinFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl BuiltinFunction {
    pub fn look_up(name: &str) -> Option<Self> {
        match name {
            "len" => Some(Self {
                name: "len".to_string(),
                func: builtin_len,
            }),
            "first" => Some(Self {
                name: "first".to_string(),
                func: builtin_first,
            }),
            "last" => Some(Self {
                name: "last".to_string(),
                func: builtin_last,
            }),
            "rest" => Some(Self {
                name: "rest".to_string(),
                func: builtin_rest,
            }),
            "push" => Some(Self {
                name: "push".to_string(),
                func: builtin_push,
            }),
            "puts" => Some(Self {
                name: "puts".to_string(),
                func: builtin_puts,
            }),
            _ => None,
        }
    }

    pub fn call(&self, args: Vec<Object>) -> Object {
        (self.func)(args)
    }
}

fn builtin_len(args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return new_error(format!(
            "wrong number of arguments. got={}, want=1",
            args.len()
        ));
    }

    match &args[0] {
        // byte length, not code points
        Object::String(s) => Object::Integer(s.len() as i64),
        Object::Array(arr) => Object::Integer(arr.len() as i64),
        other => new_error(format!(
            "argument to 'len' not supported, got {}",
            other.object_type()
        )),
    }
}

fn builtin_first(args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return new_error(format!(
            "wrong number of arguments. got={}, want=1",
            args.len()
        ));
    }

    match &args[0] {
        Object::Array(arr) => match arr.first() {
            Some(v) => v.clone(),
            None => Object::Null,
        },
        other => new_error(format!(
            "argument to 'first' must be ARRAY, got {}",
            other.object_type()
        )),
    }
}

fn builtin_last(args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return new_error(format!(
            "wrong number of arguments. got={}, want=1",
            args.len()
        ));
    }

    match &args[0] {
        Object::Array(arr) => match arr.last() {
            Some(v) => v.clone(),
            None => Object::Null,
        },
        other => new_error(format!(
            "argument to 'last' must be ARRAY, got {}",
            other.object_type()
        )),
    }
}

fn builtin_rest(args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return new_error(format!(
            "wrong number of arguments. got={}, want=1",
            args.len()
        ));
    }

    match &args[0] {
        Object::Array(arr) => {
            if arr.is_empty() {
                Object::Null
            } else {
                Object::Array(arr[1..].to_vec())
            }
        }
        other => new_error(format!(
            "argument to 'rest' must be ARRAY, got {}",
            other.object_type()
        )),
    }
}

fn builtin_push(args: Vec<Object>) -> Object {
    if args.len() != 2 {
        return new_error(format!(
            "wrong number of arguments. got={}, want=2",
            args.len()
        ));
    }

    match &args[0] {
        Object::Array(arr) => {
            let mut extended = arr.clone();
            extended.push(args[1].clone());
            Object::Array(extended)
        }
        other => new_error(format!(
            "argument to 'push' must be ARRAY, got {}",
            other.object_type()
        )),
    }
}

fn builtin_puts(args: Vec<Object>) -> Object {
    for arg in args {
        println!("{}", arg.inspect());
    }
    Object::Null
}
