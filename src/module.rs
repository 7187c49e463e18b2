use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::ast::Program;
use crate::lexer::Lexer;
use crate::parser::Parser;

/// File extension for Langur modules.
pub const MODULE_EXTENSION: &str = "lgr";

/// Resolves `import NAME;` to a parsed program. The resolution mechanism
/// is up to the host; the evaluator only sees this interface.
pub trait ModuleLoader {
    fn load(&self, name: &str) -> Result<Program, String>;
}

/// Loads modules from `<root>/<name>.lgr`.
pub struct FileModuleLoader {
    root: PathBuf,
}

impl FileModuleLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileModuleLoader { root: root.into() }
    }
}

impl ModuleLoader for FileModuleLoader {
    fn load(&self, name: &str) -> Result<Program, String> {
        let path = self.root.join(format!("{}.{}", name, MODULE_EXTENSION));
        let source = fs::read_to_string(&path)
            .map_err(|_| format!("standard module does not exist: {}", name))?;
        parse_module(name, &source)
    }
}

/// Serves modules from an in-memory table of sources.
#[derive(Default)]
pub struct StaticModuleLoader {
    sources: HashMap<String, String>,
}

impl StaticModuleLoader {
    pub fn new() -> Self {
        StaticModuleLoader::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, source: impl Into<String>) {
        self.sources.insert(name.into(), source.into());
    }
}

impl ModuleLoader for StaticModuleLoader {
    fn load(&self, name: &str) -> Result<Program, String> {
        let source = self
            .sources
            .get(name)
            .ok_or_else(|| format!("standard module does not exist: {}", name))?;
        parse_module(name, source)
    }
}

fn parse_module(name: &str, source: &str) -> Result<Program, String> {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program();
    if let Some(err) = parser.errors().first() {
        return Err(format!("failed to parse module '{}': {}", name, err));
    }
    Ok(program)
}
