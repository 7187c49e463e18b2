use std::cell::RefCell;
use std::rc::Rc;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::ast::Node;
use crate::environment::Environment;
use crate::evaluator::Evaluator;
use crate::lexer::Lexer;
use crate::object::Object;
use crate::parser::{ParseError, Parser};

const PROMPT: &str = ">> ";

/// Reads lines until EOF or Ctrl-C, evaluating each one against a single
/// persistent environment.
pub fn start(evaluator: &Evaluator) -> rustyline::Result<()> {
    let mut rl = DefaultEditor::new()?;
    let env = Rc::new(RefCell::new(Environment::new()));

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());

                let l = Lexer::new(&line);
                let mut p = Parser::new(l);
                let program = p.parse_program();
                if !p.errors().is_empty() {
                    print_parser_errors(p.errors());
                    continue;
                }

                match evaluator.eval(Node::Program(program), &env) {
                    Object::Null => {}
                    obj => println!("{}", obj.inspect()),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err),
        }
    }

    Ok(())
}

fn print_parser_errors(errors: &[ParseError]) {
    println!("parser errors:");
    for err in errors {
        println!("    {}", err);
    }
}
