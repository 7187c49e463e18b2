//! Tree-walking interpreter for the Langur scripting language.
//!
//! The pipeline is lexer -> parser -> evaluator: [`lexer::Lexer`] turns
//! source text into tokens, [`parser::Parser`] builds an AST with Pratt
//! parsing, and [`evaluator::Evaluator`] walks the AST against a chain of
//! [`environment::Environment`] scopes. Runtime values, including the
//! control sentinels used for `return`/`break`/errors, live in
//! [`object`]; `import` resolution is pluggable through
//! [`module::ModuleLoader`].

pub mod ast;
pub mod builtin;
pub mod environment;
pub mod evaluator;
pub mod lexer;
pub mod module;
pub mod object;
pub mod parser;
pub mod repl;
pub mod token;
