use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{bail, Context};
use clap::Parser;

use langur::ast::Node;
use langur::environment::Environment;
use langur::evaluator::Evaluator;
use langur::lexer::Lexer;
use langur::module::FileModuleLoader;
use langur::object::Object;
use langur::repl;

/// Tree-walking interpreter for the Langur scripting language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Script to run; drops into a REPL when omitted.
    script: Option<PathBuf>,

    /// Directory searched for modules loaded with `import`.
    #[arg(long, default_value = "stdlib")]
    stdlib: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let evaluator = Evaluator::with_loader(Rc::new(FileModuleLoader::new(args.stdlib)));

    match args.script {
        Some(path) => run_script(&evaluator, &path),
        None => Ok(repl::start(&evaluator)?),
    }
}

fn run_script(evaluator: &Evaluator, path: &Path) -> anyhow::Result<()> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let mut parser = langur::parser::Parser::new(Lexer::new(&source));
    let program = parser.parse_program();
    if !parser.errors().is_empty() {
        for err in parser.errors() {
            eprintln!("{}", err);
        }
        bail!("{} contains syntax errors", path.display());
    }

    let env = Rc::new(RefCell::new(Environment::new()));
    let result = evaluator.eval(Node::Program(program), &env);
    if let Object::Error(_) = result {
        eprintln!("{}", result.inspect());
        bail!("{} failed", path.display());
    }

    Ok(())
}
