use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::{Expression, Node, Program, Statement};
use crate::builtin::BuiltinFunction;
use crate::environment::{Environment, ExecutionContext};
use crate::module::ModuleLoader;
use crate::object::{HashPair, Object};

/// Walks the AST and reduces nodes to objects. Holds the module loader used
/// to resolve `import`; all other state lives in the environments passed to
/// `eval`.
pub struct Evaluator {
    loader: Option<Rc<dyn ModuleLoader>>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Evaluator::new()
    }
}

/// Evaluates a node with a one-off evaluator that has no module loader.
pub fn eval(node: Node, env: &Rc<RefCell<Environment>>) -> Object {
    Evaluator::new().eval(node, env)
}

impl Evaluator {
    pub fn new() -> Self {
        Evaluator { loader: None }
    }

    pub fn with_loader(loader: Rc<dyn ModuleLoader>) -> Self {
        Evaluator {
            loader: Some(loader),
        }
    }

    pub fn eval(&self, node: Node, env: &Rc<RefCell<Environment>>) -> Object {
        match node {
            Node::Program(program) => self.eval_program(program, env),
            Node::Statement(stmt) => self.eval_statement(stmt, env),
            Node::Expression(exp) => self.eval_expression(exp, env),
        }
    }

    fn eval_program(&self, program: Program, env: &Rc<RefCell<Environment>>) -> Object {
        let mut result = Object::Null;

        for stmt in program.statements {
            result = self.eval_statement(stmt, env);

            match result {
                Object::ReturnValue(ret) => return *ret,
                Object::Error(_) => return result,
                _ => {}
            }
        }
        result
    }

    fn eval_statement(&self, stmt: Statement, env: &Rc<RefCell<Environment>>) -> Object {
        match stmt {
            Statement::Block(block) => self.eval_block_statement(block, env),
            Statement::Expression(exp) => self.eval_expression(exp, env),
            Statement::Return(exp) => {
                let value = self.eval_expression(exp, env);
                if is_error(&value) {
                    return value;
                }
                Object::ReturnValue(Box::new(value))
            }
            Statement::Let { name, value } => {
                let value = self.eval_expression(value, env);
                if is_error(&value) {
                    return value;
                }
                env.borrow_mut().set(name, value);
                Object::Null
            }
            Statement::Import(module) => self.eval_import_statement(module, env),
            Statement::ForEach {
                identifiers,
                collection,
                body,
            } => self.eval_for_each_statement(identifiers, collection, *body, env),
            Statement::Break => {
                if env.borrow().execution_context() == ExecutionContext::Loop {
                    Object::Break
                } else {
                    new_error("break cannot be used outside a loop context".to_string())
                }
            }
        }
    }

    // Unlike eval_program, blocks pass return values, errors, and breaks
    // through unchanged so the enclosing construct can handle them.
    fn eval_block_statement(&self, block: Vec<Statement>, env: &Rc<RefCell<Environment>>) -> Object {
        let mut result = Object::Null;

        for stmt in block {
            result = self.eval_statement(stmt, env);

            match result {
                Object::ReturnValue(_) | Object::Error(_) | Object::Break => return result,
                _ => {}
            }
        }
        result
    }

    fn eval_expression(&self, exp: Expression, env: &Rc<RefCell<Environment>>) -> Object {
        match exp {
            Expression::Integer(i) => Object::Integer(i),
            Expression::String(s) => Object::String(s),
            Expression::Boolean(b) => Object::Boolean(b),
            Expression::Null => Object::Null,
            Expression::Identifier(name) => self.eval_identifier(name, env),
            Expression::Prefix { operator, right } => {
                let right = self.eval_expression(*right, env);
                if is_error(&right) {
                    return right;
                }
                eval_prefix_expression(&operator, right)
            }
            Expression::Infix {
                operator,
                left,
                right,
            } => {
                let left = self.eval_expression(*left, env);
                if is_error(&left) {
                    return left;
                }
                let right = self.eval_expression(*right, env);
                if is_error(&right) {
                    return right;
                }
                eval_infix_expression(&operator, left, right)
            }
            Expression::If {
                condition,
                consequence,
                alternative,
            } => self.eval_if_expression(*condition, *consequence, alternative, env),
            Expression::Function { parameters, body } => Object::Function {
                parameters,
                body: *body,
                env: Rc::clone(env),
            },
            Expression::Call {
                function,
                arguments,
            } => {
                let function = self.eval_expression(*function, env);
                if is_error(&function) {
                    return function;
                }
                let args = match self.eval_expressions(arguments, env) {
                    Ok(args) => args,
                    Err(err) => return err,
                };
                self.apply_function(function, args)
            }
            Expression::Array(elements) => match self.eval_expressions(elements, env) {
                Ok(elements) => Object::Array(elements),
                Err(err) => err,
            },
            Expression::Hash(pairs) => self.eval_hash_literal(pairs, env),
            Expression::Index { left, index } => {
                let left = self.eval_expression(*left, env);
                if is_error(&left) {
                    return left;
                }
                let index = self.eval_expression(*index, env);
                if is_error(&index) {
                    return index;
                }
                eval_index_expression(left, index)
            }
        }
    }

    fn eval_identifier(&self, name: String, env: &Rc<RefCell<Environment>>) -> Object {
        if let Some(obj) = env.borrow().get(&name) {
            return obj;
        }
        match BuiltinFunction::look_up(&name) {
            Some(builtin) => Object::Builtin(builtin),
            None => new_error(format!("identifier not found: {}", name)),
        }
    }

    // Arguments evaluate left to right; the first error aborts the rest.
    fn eval_expressions(
        &self,
        exps: Vec<Expression>,
        env: &Rc<RefCell<Environment>>,
    ) -> Result<Vec<Object>, Object> {
        let mut result = Vec::with_capacity(exps.len());

        for exp in exps {
            let evaluated = self.eval_expression(exp, env);
            if is_error(&evaluated) {
                return Err(evaluated);
            }
            result.push(evaluated);
        }
        Ok(result)
    }

    fn apply_function(&self, function: Object, args: Vec<Object>) -> Object {
        match function {
            Object::Function {
                parameters,
                body,
                env,
            } => {
                let scope = Rc::new(RefCell::new(Environment::new_scoped(env)));
                for (i, param) in parameters.iter().enumerate() {
                    // extra arguments are ignored; missing ones are an error
                    match args.get(i) {
                        Some(arg) => scope.borrow_mut().set(param.clone(), arg.clone()),
                        None => {
                            return new_error(format!(
                                "wrong number of arguments. got={}, want={}",
                                args.len(),
                                parameters.len()
                            ))
                        }
                    }
                }

                let result = self.eval_statement(body, &scope);
                unwrap_return_value(result)
            }
            Object::Builtin(builtin) => builtin.call(args),
            other => new_error(format!("not a function: {}", other.object_type())),
        }
    }

    fn eval_if_expression(
        &self,
        condition: Expression,
        consequence: Statement,
        alternative: Option<Box<Statement>>,
        env: &Rc<RefCell<Environment>>,
    ) -> Object {
        let condition = self.eval_expression(condition, env);
        if is_error(&condition) {
            return condition;
        }

        if is_truthy(&condition) {
            self.eval_statement(consequence, env)
        } else {
            match alternative {
                Some(alt) => self.eval_statement(*alt, env),
                None => Object::Null,
            }
        }
    }

    fn eval_import_statement(&self, module: String, env: &Rc<RefCell<Environment>>) -> Object {
        let loader = match &self.loader {
            Some(loader) => loader,
            None => return new_error(format!("standard module does not exist: {}", module)),
        };

        match loader.load(&module) {
            // the module's bindings land in the importing scope
            Ok(program) => {
                let result = self.eval_program(program, env);
                if is_error(&result) {
                    return result;
                }
                Object::Null
            }
            Err(msg) => new_error(msg),
        }
    }

    fn eval_for_each_statement(
        &self,
        identifiers: Vec<String>,
        collection: Expression,
        body: Statement,
        env: &Rc<RefCell<Environment>>,
    ) -> Object {
        let collection = self.eval_expression(collection, env);
        if is_error(&collection) {
            return collection;
        }

        match (collection, identifiers.as_slice()) {
            (Object::Array(values), [id]) => {
                for value in values {
                    let scope = self.loop_scope(env);
                    scope.borrow_mut().set(id.clone(), value);

                    let result = self.eval_statement(body.clone(), &scope);
                    match result {
                        Object::Error(_) | Object::ReturnValue(_) => return result,
                        Object::Break => break,
                        _ => {}
                    }
                }
                Object::Null
            }
            (Object::Hash(pairs), [key_id, value_id]) => {
                for pair in pairs.into_values() {
                    let scope = self.loop_scope(env);
                    scope.borrow_mut().set(key_id.clone(), pair.key);
                    scope.borrow_mut().set(value_id.clone(), pair.value);

                    let result = self.eval_statement(body.clone(), &scope);
                    match result {
                        Object::Error(_) | Object::ReturnValue(_) => return result,
                        Object::Break => break,
                        _ => {}
                    }
                }
                Object::Null
            }
            (collection, ids) => new_error(format!(
                "unsupported iteration type: {} and {} identifiers",
                collection.object_type(),
                ids.len()
            )),
        }
    }

    // Each iteration gets a fresh scope so loop variables do not leak and
    // `break` is authorized.
    fn loop_scope(&self, env: &Rc<RefCell<Environment>>) -> Rc<RefCell<Environment>> {
        let scope = Rc::new(RefCell::new(Environment::new_scoped(Rc::clone(env))));
        scope
            .borrow_mut()
            .set_execution_context(ExecutionContext::Loop);
        scope
    }

    fn eval_hash_literal(
        &self,
        pairs: Vec<(Expression, Expression)>,
        env: &Rc<RefCell<Environment>>,
    ) -> Object {
        let mut hash = HashMap::new();

        for (key_exp, value_exp) in pairs {
            let key = self.eval_expression(key_exp, env);
            if is_error(&key) {
                return key;
            }

            let hash_key = match key.hash_key() {
                Some(hash_key) => hash_key,
                None => {
                    return new_error(format!("unusable as hash key: {}", key.object_type()))
                }
            };

            let value = self.eval_expression(value_exp, env);
            if is_error(&value) {
                return value;
            }

            hash.insert(hash_key, HashPair { key, value });
        }
        Object::Hash(hash)
    }
}

pub fn new_error(message: String) -> Object {
    Object::Error(message)
}

fn is_error(obj: &Object) -> bool {
    matches!(obj, Object::Error(_))
}

fn is_truthy(obj: &Object) -> bool {
    match obj {
        Object::Null => false,
        Object::Boolean(b) => *b,
        _ => true,
    }
}

fn native_bool_to_object(input: bool) -> Object {
    Object::Boolean(input)
}

fn unwrap_return_value(obj: Object) -> Object {
    match obj {
        Object::ReturnValue(value) => *value,
        other => other,
    }
}

fn eval_prefix_expression(operator: &str, right: Object) -> Object {
    match operator {
        "!" => eval_bang_expression(right),
        "-" => eval_minus_prefix_expression(right),
        _ => new_error(format!(
            "unknown operator: {}{}",
            operator,
            right.object_type()
        )),
    }
}

fn eval_bang_expression(right: Object) -> Object {
    match right {
        Object::Boolean(b) => Object::Boolean(!b),
        Object::Null => Object::Boolean(true),
        _ => Object::Boolean(false),
    }
}

fn eval_minus_prefix_expression(right: Object) -> Object {
    match right {
        Object::Integer(i) => Object::Integer(i.wrapping_neg()),
        _ => new_error(format!("unknown operator: -{}", right.object_type())),
    }
}

fn eval_infix_expression(operator: &str, left: Object, right: Object) -> Object {
    match (&left, &right) {
        (Object::Integer(l), Object::Integer(r)) => {
            eval_integer_infix_expression(operator, *l, *r)
        }
        (Object::Boolean(l), Object::Boolean(r)) => {
            eval_boolean_infix_expression(operator, *l, *r, &left, &right)
        }
        (Object::String(l), Object::String(r)) => {
            eval_string_infix_expression(operator, l, r, &left, &right)
        }
        _ if left.object_type() != right.object_type() => new_error(format!(
            "type mismatch: {} {} {}",
            left.object_type(),
            operator,
            right.object_type()
        )),
        _ => new_error(format!(
            "unknown operator: {} {} {}",
            left.object_type(),
            operator,
            right.object_type()
        )),
    }
}

// Arithmetic is two's-complement 64-bit; only division by zero is an error.
fn eval_integer_infix_expression(operator: &str, left: i64, right: i64) -> Object {
    match operator {
        "+" => Object::Integer(left.wrapping_add(right)),
        "-" => Object::Integer(left.wrapping_sub(right)),
        "*" => Object::Integer(left.wrapping_mul(right)),
        "/" => {
            if right == 0 {
                new_error("division by zero".to_string())
            } else {
                Object::Integer(left.wrapping_div(right))
            }
        }
        "%" => {
            if right == 0 {
                new_error("division by zero".to_string())
            } else {
                Object::Integer(left.wrapping_rem(right))
            }
        }
        "**" => Object::Integer((left as f64).powf(right as f64) as i64),
        "<" => native_bool_to_object(left < right),
        "<=" => native_bool_to_object(left <= right),
        ">" => native_bool_to_object(left > right),
        ">=" => native_bool_to_object(left >= right),
        "==" => native_bool_to_object(left == right),
        "!=" => native_bool_to_object(left != right),
        // logical operators treat nonzero as true
        "&&" => native_bool_to_object(left != 0 && right != 0),
        "||" => native_bool_to_object(left != 0 || right != 0),
        _ => new_error(format!("unknown operator: INTEGER {} INTEGER", operator)),
    }
}

fn eval_boolean_infix_expression(
    operator: &str,
    left: bool,
    right: bool,
    left_obj: &Object,
    right_obj: &Object,
) -> Object {
    match operator {
        "&&" => native_bool_to_object(left && right),
        "||" => native_bool_to_object(left || right),
        "==" => native_bool_to_object(left == right),
        "!=" => native_bool_to_object(left != right),
        _ => new_error(format!(
            "unknown operator: {} {} {}",
            left_obj.object_type(),
            operator,
            right_obj.object_type()
        )),
    }
}

fn eval_string_infix_expression(
    operator: &str,
    left: &str,
    right: &str,
    left_obj: &Object,
    right_obj: &Object,
) -> Object {
    match operator {
        "+" => Object::String(format!("{}{}", left, right)),
        "==" => native_bool_to_object(left == right),
        "!=" => native_bool_to_object(left != right),
        _ => new_error(format!(
            "unknown operator: {} {} {}",
            left_obj.object_type(),
            operator,
            right_obj.object_type()
        )),
    }
}

fn eval_index_expression(left: Object, index: Object) -> Object {
    match (left, index) {
        (Object::Array(values), Object::Integer(i)) => {
            if i < 0 || i >= values.len() as i64 {
                new_error(format!(
                    "out of bounds error: index {} is out of range for array",
                    i
                ))
            } else {
                values[i as usize].clone()
            }
        }
        (Object::Hash(pairs), index) => match index.hash_key() {
            Some(key) => match pairs.get(&key) {
                Some(pair) => pair.value.clone(),
                None => Object::Null,
            },
            None => new_error(format!("unusable as hash key: {}", index.object_type())),
        },
        (left, _) => new_error(format!(
            "index operator not supported: {}",
            left.object_type()
        )),
    }
}
