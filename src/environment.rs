use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::object::Object;

/// Marks what kind of construct a scope belongs to. `break` is only legal
/// when the current scope was opened by a loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionContext {
    #[default]
    None,
    Loop,
}

/// A single scope: name bindings plus a link to the enclosing scope.
/// Environments are shared by reference; a closure holds the same
/// environment instance that was live when it was created.
#[derive(Default)]
pub struct Environment {
    store: HashMap<String, Object>,
    outer: Option<Rc<RefCell<Environment>>>,
    context: ExecutionContext,
}

impl Environment {
    pub fn new() -> Self {
        Environment::default()
    }

    pub fn new_scoped(outer: Rc<RefCell<Environment>>) -> Self {
        Environment {
            store: HashMap::new(),
            outer: Some(outer),
            context: ExecutionContext::None,
        }
    }

    /// Resolves a name by walking the scope chain outwards.
    pub fn get(&self, name: &str) -> Option<Object> {
        match self.store.get(name) {
            Some(obj) => Some(obj.clone()),
            None => match &self.outer {
                Some(env) => env.borrow().get(name),
                None => None,
            },
        }
    }

    /// Binds a name in this scope only; outer bindings are never written
    /// through.
    pub fn set(&mut self, name: String, value: Object) {
        self.store.insert(name, value);
    }

    pub fn execution_context(&self) -> ExecutionContext {
        self.context
    }

    pub fn set_execution_context(&mut self, context: ExecutionContext) {
        self.context = context;
    }
}
