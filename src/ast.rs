use std::fmt;
use std::fmt::Formatter;

pub enum Node {
    Program(Program),
    Statement(Statement),
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for stmt in self.statements.iter() {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let {
        name: String,
        value: Expression,
    },
    Return(Expression),
    Expression(Expression),
    Block(Vec<Statement>),
    Import(String),
    ForEach {
        identifiers: Vec<String>,
        collection: Expression,
        body: Box<Statement>,
    },
    Break,
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { name, value } => write!(f, "let {} = {};", name, value),
            Statement::Return(ret) => write!(f, "return {};", ret),
            Statement::Expression(exp) => write!(f, "{};", exp),
            Statement::Block(block) => {
                for stmt in block.iter() {
                    write!(f, "{}", stmt)?;
                }
                Ok(())
            }
            Statement::Import(module) => write!(f, "import {};", module),
            Statement::ForEach {
                identifiers,
                collection,
                body,
            } => write!(
                f,
                "for {} in {} {{{}}}",
                identifiers.join(", "),
                collection,
                body
            ),
            Statement::Break => write!(f, "break;"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(String),
    Boolean(bool),
    Integer(i64),
    String(String),
    Null,
    Array(Vec<Expression>),
    Hash(Vec<(Expression, Expression)>),
    Prefix {
        operator: String,
        right: Box<Expression>,
    },
    Infix {
        operator: String,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    If {
        condition: Box<Expression>,
        consequence: Box<Statement>,
        alternative: Option<Box<Statement>>,
    },
    Function {
        parameters: Vec<String>,
        body: Box<Statement>,
    },
    Call {
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
    Index {
        left: Box<Expression>,
        index: Box<Expression>,
    },
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(ident) => write!(f, "{}", ident),
            Expression::Boolean(b) => write!(f, "{}", b),
            Expression::Integer(int) => write!(f, "{}", int),
            Expression::String(st) => write!(f, "\"{}\"", st),
            Expression::Null => write!(f, "null"),
            Expression::Array(exps) => {
                write!(
                    f,
                    "[{}]",
                    exps.iter()
                        .map(|exp| format!("{}", exp))
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
            Expression::Hash(pairs) => {
                write!(
                    f,
                    "{{{}}}",
                    pairs
                        .iter()
                        .map(|(k, v)| format!("{}: {}", k, v))
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
            Expression::Prefix { operator, right } => write!(f, "({}{})", operator, right),
            Expression::Infix {
                operator,
                left,
                right,
            } => write!(f, "({} {} {})", left, operator, right),
            Expression::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if {} {{{}}}", condition, consequence)?;
                if let Some(alt) = alternative {
                    write!(f, " else {{{}}}", alt)?;
                }
                Ok(())
            }
            Expression::Function { parameters, body } => {
                write!(f, "fn ({}) {{{}}}", parameters.join(", "), body)
            }
            Expression::Call {
                function,
                arguments,
            } => write!(
                f,
                "{}({})",
                function,
                arguments
                    .iter()
                    .map(|arg| format!("{}", arg))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Expression::Index { left, index } => write!(f, "({}[{}])", left, index),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::ast::{Expression, Program, Statement};

    #[test]
    fn test_let_statement_display() {
        let program = Program {
            statements: vec![Statement::Let {
                name: "a".to_string(),
                value: Expression::Integer(12),
            }],
        };

        assert_eq!(format!("{}", program), "let a = 12;");
    }

    #[test]
    fn test_for_each_display() {
        let stmt = Statement::ForEach {
            identifiers: vec!["k".to_string(), "v".to_string()],
            collection: Expression::Identifier("pairs".to_string()),
            body: Box::new(Statement::Block(vec![Statement::Break])),
        };

        assert_eq!(format!("{}", stmt), "for k, v in pairs {break;}");
    }

    #[test]
    fn test_import_display() {
        let stmt = Statement::Import("math".to_string());
        assert_eq!(format!("{}", stmt), "import math;");
    }

    #[test]
    fn test_nested_expression_display() {
        let exp = Expression::Infix {
            operator: "+".to_string(),
            left: Box::new(Expression::Prefix {
                operator: "-".to_string(),
                right: Box::new(Expression::Identifier("a".to_string())),
            }),
            right: Box::new(Expression::Index {
                left: Box::new(Expression::Identifier("xs".to_string())),
                index: Box::new(Expression::Integer(0)),
            }),
        };

        assert_eq!(format!("{}", exp), "((-a) + (xs[0]))");
    }
}
