use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::fmt::Formatter;
use std::rc::Rc;

use crate::ast::Statement;
use crate::builtin::BuiltinFunction;
use crate::environment::Environment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Integer,
    Boolean,
    String,
    Null,
    ReturnValue,
    Error,
    Function,
    Builtin,
    Array,
    Hash,
    Break,
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ObjectType::Integer => "INTEGER",
                ObjectType::Boolean => "BOOLEAN",
                ObjectType::String => "STRING",
                ObjectType::Null => "NULL",
                ObjectType::ReturnValue => "RETURN_VALUE",
                ObjectType::Error => "ERROR",
                ObjectType::Function => "FUNCTION",
                ObjectType::Builtin => "BUILTIN",
                ObjectType::Array => "ARRAY",
                ObjectType::Hash => "HASH",
                ObjectType::Break => "BREAK",
            }
        )
    }
}

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Key identity for hash entries. Strings digest their raw bytes, without
/// any normalization; integers and booleans map to their numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    pub kind: ObjectType,
    pub value: u64,
}

#[derive(Clone)]
pub struct HashPair {
    pub key: Object,
    pub value: Object,
}

#[derive(Clone)]
pub enum Object {
    Integer(i64),
    String(String),
    Boolean(bool),
    Null,
    ReturnValue(Box<Object>),
    Error(String),
    Function {
        parameters: Vec<String>,
        body: Statement,
        env: Rc<RefCell<Environment>>,
    },
    Builtin(BuiltinFunction),
    Array(Vec<Object>),
    Hash(HashMap<HashKey, HashPair>),
    Break,
}

impl Object {
    pub fn object_type(&self) -> ObjectType {
        match self {
            Object::Integer(_) => ObjectType::Integer,
            Object::String(_) => ObjectType::String,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::Null => ObjectType::Null,
            Object::ReturnValue(_) => ObjectType::ReturnValue,
            Object::Error(_) => ObjectType::Error,
            Object::Function { .. } => ObjectType::Function,
            Object::Builtin(_) => ObjectType::Builtin,
            Object::Array(_) => ObjectType::Array,
            Object::Hash(_) => ObjectType::Hash,
            Object::Break => ObjectType::Break,
        }
    }

    /// Only integers, booleans, and strings are hashable.
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Object::Integer(i) => Some(HashKey {
                kind: ObjectType::Integer,
                value: *i as u64,
            }),
            Object::Boolean(b) => Some(HashKey {
                kind: ObjectType::Boolean,
                value: u64::from(*b),
            }),
            Object::String(s) => Some(HashKey {
                kind: ObjectType::String,
                value: fnv1a(s.as_bytes()),
            }),
            _ => None,
        }
    }

    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(i) => write!(f, "{}", i),
            Object::String(s) => write!(f, "{}", s),
            Object::Boolean(b) => write!(f, "{}", b),
            Object::Null => write!(f, "null"),
            Object::ReturnValue(obj) => write!(f, "{}", obj),
            Object::Error(msg) => write!(f, "ERROR: {}", msg),
            Object::Function {
                parameters, body, ..
            } => write!(f, "fn({}) {{\n{}\n}}", parameters.join(", "), body),
            Object::Builtin(_) => write!(f, "builtin function"),
            Object::Array(arr) => write!(
                f,
                "[{}]",
                arr.iter()
                    .map(|v| v.inspect())
                    .collect::<Vec<_>>()
                    .join(",")
            ),
            Object::Hash(pairs) => write!(
                f,
                "{{{}}}",
                pairs
                    .values()
                    .map(|pair| format!("{}:{}", pair.key.inspect(), pair.value.inspect()))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Object::Break => write!(f, "break"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::object::{HashPair, Object, ObjectType};

    #[test]
    fn test_inspect_scalars() {
        assert_eq!(Object::Integer(42).inspect(), "42");
        assert_eq!(Object::Boolean(true).inspect(), "true");
        assert_eq!(Object::Null.inspect(), "null");
        assert_eq!(Object::String("hello".to_string()).inspect(), "hello");
        assert_eq!(
            Object::Error("identifier not found: x".to_string()).inspect(),
            "ERROR: identifier not found: x"
        );
    }

    #[test]
    fn test_inspect_array_has_no_spaces() {
        let arr = Object::Array(vec![
            Object::Integer(1),
            Object::Integer(2),
            Object::Integer(3),
        ]);
        assert_eq!(arr.inspect(), "[1,2,3]");
    }

    #[test]
    fn test_inspect_hash() {
        let key = Object::String("one".to_string());
        let mut pairs = HashMap::new();
        pairs.insert(
            key.hash_key().unwrap(),
            HashPair {
                key,
                value: Object::Integer(1),
            },
        );
        assert_eq!(Object::Hash(pairs).inspect(), "{one:1}");
    }

    #[test]
    fn test_string_hash_keys_compare_by_content() {
        let one = Object::String("Hello World".to_string());
        let two = Object::String("Hello World".to_string());
        let other = Object::String("hello world".to_string());

        assert_eq!(one.hash_key(), two.hash_key());
        assert_ne!(one.hash_key(), other.hash_key());
    }

    #[test]
    fn test_fnv1a_digest() {
        // FNV-1a reference vectors
        let empty = Object::String(String::new());
        assert_eq!(empty.hash_key().unwrap().value, 0xcbf2_9ce4_8422_2325);

        let a = Object::String("a".to_string());
        assert_eq!(a.hash_key().unwrap().value, 0xaf63_dc4c_8601_ec8c);
    }

    #[test]
    fn test_hash_keys_distinguish_kinds() {
        let int_key = Object::Integer(1).hash_key().unwrap();
        let bool_key = Object::Boolean(true).hash_key().unwrap();

        assert_eq!(int_key.value, bool_key.value);
        assert_ne!(int_key, bool_key);
        assert_eq!(int_key.kind, ObjectType::Integer);
    }

    #[test]
    fn test_unhashable_objects() {
        assert!(Object::Array(vec![]).hash_key().is_none());
        assert!(Object::Null.hash_key().is_none());
    }

    #[test]
    fn test_object_type_display() {
        assert_eq!(Object::Integer(1).object_type().to_string(), "INTEGER");
        assert_eq!(Object::Null.object_type().to_string(), "NULL");
        assert_eq!(Object::Break.object_type().to_string(), "BREAK");
        assert_eq!(
            Object::Array(vec![]).object_type().to_string(),
            "ARRAY"
        );
    }
}
