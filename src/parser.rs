use thiserror::Error;

use crate::ast::{Expression, Program, Statement};
use crate::lexer::Lexer;
use crate::token::{Token, TokenType};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected next token to be '{expected}', got '{got}' instead")]
    UnexpectedToken {
        expected: TokenType,
        got: TokenType,
    },
    #[error("could not parse {literal:?} as integer")]
    InvalidIntegerLiteral { literal: String },
    #[error("no prefix parse function found for '{0}'")]
    NoPrefixParseFn(TokenType),
}

#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Copy, Clone)]
enum Precedence {
    LOWEST,
    OR,          // ||
    AND,         // &&
    EQUALS,      // == !=
    LessGreater, // < <= > >=
    SUM,         // + -
    PRODUCT,     // * / %
    POWER,       // **
    PREFIX,      // -x !x ++x --x
    CALL,        // f(x) and xs[i]
}

fn get_precedence(token: TokenType) -> Option<Precedence> {
    match token {
        TokenType::OR => Some(Precedence::OR),
        TokenType::AND => Some(Precedence::AND),
        TokenType::EQ | TokenType::NotEq => Some(Precedence::EQUALS),
        TokenType::LT | TokenType::GT | TokenType::LtEq | TokenType::GtEq => {
            Some(Precedence::LessGreater)
        }
        TokenType::PLUS | TokenType::MINUS => Some(Precedence::SUM),
        TokenType::ASTERISK | TokenType::SLASH | TokenType::PERCENT => Some(Precedence::PRODUCT),
        TokenType::POWER => Some(Precedence::POWER),
        TokenType::LPAREN | TokenType::LBRACKET => Some(Precedence::CALL),
        _ => None,
    }
}

pub struct Parser {
    l: Lexer,
    errors: Vec<ParseError>,

    cur_token: Token,
    peek_token: Token,
}

impl Parser {
    pub fn new(mut l: Lexer) -> Self {
        // read two tokens so that cur_token and peek_token are both set
        let cur_token = l.next_token();
        let peek_token = l.next_token();

        Parser {
            l,
            errors: Vec::new(),
            cur_token,
            peek_token,
        }
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn parse_program(&mut self) -> Program {
        let mut program = Program {
            statements: Vec::new(),
        };

        while !self.cur_token_is(TokenType::EOF) {
            if let Some(stmt) = self.parse_statement() {
                program.statements.push(stmt);
            }
            self.next_token();
        }
        program
    }

    fn next_token(&mut self) {
        self.cur_token = self.peek_token.clone();
        self.peek_token = self.l.next_token();
    }

    fn cur_token_is(&self, t: TokenType) -> bool {
        self.cur_token.token_type == t
    }

    fn peek_token_is(&self, t: TokenType) -> bool {
        self.peek_token.token_type == t
    }

    fn expect_peek(&mut self, t: TokenType) -> bool {
        if self.peek_token_is(t) {
            self.next_token();
            true
        } else {
            self.peek_error(t);
            false
        }
    }

    fn peek_error(&mut self, t: TokenType) {
        self.errors.push(ParseError::UnexpectedToken {
            expected: t,
            got: self.peek_token.token_type,
        });
    }

    fn no_prefix_parse_fn_error(&mut self, t: TokenType) {
        self.errors.push(ParseError::NoPrefixParseFn(t));
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.cur_token.token_type {
            TokenType::LET => self.parse_let_statement(),
            TokenType::RETURN => self.parse_return_statement(),
            TokenType::IMPORT => self.parse_import_statement(),
            TokenType::FOR => self.parse_for_each_statement(),
            TokenType::BREAK => self.parse_break_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Option<Statement> {
        if !self.expect_peek(TokenType::IDENT) {
            return None;
        }

        let name = self.cur_token.literal.clone();

        if !self.expect_peek(TokenType::ASSIGN) {
            return None;
        }
        self.next_token();

        let value = self.parse_expression(Precedence::LOWEST)?;

        if !self.expect_peek(TokenType::SEMICOLON) {
            return None;
        }

        Some(Statement::Let { name, value })
    }

    fn parse_return_statement(&mut self) -> Option<Statement> {
        self.next_token();

        let value = self.parse_expression(Precedence::LOWEST)?;

        if !self.expect_peek(TokenType::SEMICOLON) {
            return None;
        }

        Some(Statement::Return(value))
    }

    fn parse_import_statement(&mut self) -> Option<Statement> {
        if !self.expect_peek(TokenType::IDENT) {
            return None;
        }

        let module = self.cur_token.literal.clone();

        if !self.expect_peek(TokenType::SEMICOLON) {
            return None;
        }

        Some(Statement::Import(module))
    }

    fn parse_break_statement(&mut self) -> Option<Statement> {
        if !self.expect_peek(TokenType::SEMICOLON) {
            return None;
        }

        Some(Statement::Break)
    }

    fn parse_for_each_statement(&mut self) -> Option<Statement> {
        let identifiers = self.parse_for_identifiers()?;

        if !self.expect_peek(TokenType::IN) {
            return None;
        }
        self.next_token();

        let collection = self.parse_expression(Precedence::LOWEST)?;

        if !self.expect_peek(TokenType::LBRACE) {
            return None;
        }

        let body = self.parse_block_statement()?;

        Some(Statement::ForEach {
            identifiers,
            collection,
            body: Box::new(body),
        })
    }

    fn parse_for_identifiers(&mut self) -> Option<Vec<String>> {
        let mut identifiers = Vec::new();

        if !self.expect_peek(TokenType::IDENT) {
            return None;
        }
        identifiers.push(self.cur_token.literal.clone());

        while self.peek_token_is(TokenType::COMMA) {
            self.next_token();
            if !self.expect_peek(TokenType::IDENT) {
                return None;
            }
            identifiers.push(self.cur_token.literal.clone());
        }

        Some(identifiers)
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let expression = self.parse_expression(Precedence::LOWEST)?;

        // semicolons are optional after expression statements
        if self.peek_token_is(TokenType::SEMICOLON) {
            self.next_token();
        }

        Some(Statement::Expression(expression))
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let mut left_exp = match self.cur_token.token_type {
            TokenType::IDENT => self.parse_identifier(),
            TokenType::INT => self.parse_integer_literal(),
            TokenType::STRING => self.parse_string_literal(),
            TokenType::TRUE | TokenType::FALSE => self.parse_boolean(),
            TokenType::NULL => Some(Expression::Null),
            TokenType::BANG | TokenType::MINUS | TokenType::INCR | TokenType::DECR => {
                self.parse_prefix_expression()
            }
            TokenType::LPAREN => self.parse_grouped_expression(),
            TokenType::LBRACKET => self.parse_array_literal(),
            TokenType::LBRACE => self.parse_hash_literal(),
            TokenType::IF => self.parse_if_expression(),
            TokenType::FUNCTION => self.parse_function_literal(),
            t => {
                self.no_prefix_parse_fn_error(t);
                None
            }
        }?;

        while !self.peek_token_is(TokenType::SEMICOLON) && precedence < self.peek_precedence() {
            left_exp = match self.peek_token.token_type {
                TokenType::PLUS
                | TokenType::MINUS
                | TokenType::ASTERISK
                | TokenType::SLASH
                | TokenType::PERCENT
                | TokenType::POWER
                | TokenType::EQ
                | TokenType::NotEq
                | TokenType::LT
                | TokenType::GT
                | TokenType::LtEq
                | TokenType::GtEq
                | TokenType::AND
                | TokenType::OR => {
                    self.next_token();
                    self.parse_infix_expression(left_exp)?
                }
                TokenType::LPAREN => {
                    self.next_token();
                    self.parse_call_expression(left_exp)?
                }
                TokenType::LBRACKET => {
                    self.next_token();
                    self.parse_index_expression(left_exp)?
                }
                _ => return Some(left_exp),
            }
        }

        Some(left_exp)
    }

    fn peek_precedence(&self) -> Precedence {
        get_precedence(self.peek_token.token_type).unwrap_or(Precedence::LOWEST)
    }

    fn cur_precedence(&self) -> Precedence {
        get_precedence(self.cur_token.token_type).unwrap_or(Precedence::LOWEST)
    }

    fn parse_identifier(&self) -> Option<Expression> {
        Some(Expression::Identifier(self.cur_token.literal.clone()))
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        match self.cur_token.literal.parse::<i64>() {
            Ok(value) => Some(Expression::Integer(value)),
            Err(_) => {
                self.errors.push(ParseError::InvalidIntegerLiteral {
                    literal: self.cur_token.literal.clone(),
                });
                None
            }
        }
    }

    fn parse_string_literal(&self) -> Option<Expression> {
        Some(Expression::String(self.cur_token.literal.clone()))
    }

    fn parse_boolean(&self) -> Option<Expression> {
        Some(Expression::Boolean(self.cur_token_is(TokenType::TRUE)))
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let operator = self.cur_token.literal.clone();
        self.next_token();
        let right = self.parse_expression(Precedence::PREFIX)?;

        Some(Expression::Prefix {
            operator,
            right: Box::new(right),
        })
    }

    // All infix operators are left-associative, including `**`: the right
    // operand is parsed at the operator's own precedence.
    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let operator = self.cur_token.literal.clone();

        let precedence = self.cur_precedence();
        self.next_token();
        let right = self.parse_expression(precedence)?;

        Some(Expression::Infix {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();

        let exp = self.parse_expression(Precedence::LOWEST)?;

        if !self.expect_peek(TokenType::RPAREN) {
            return None;
        }
        Some(exp)
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        if !self.expect_peek(TokenType::LPAREN) {
            return None;
        }
        self.next_token();

        let condition = self.parse_expression(Precedence::LOWEST)?;

        if !self.expect_peek(TokenType::RPAREN) {
            return None;
        }
        if !self.expect_peek(TokenType::LBRACE) {
            return None;
        }

        let consequence = self.parse_block_statement()?;

        let alternative = if self.peek_token_is(TokenType::ELSE) {
            self.next_token();
            if !self.expect_peek(TokenType::LBRACE) {
                return None;
            }
            Some(Box::new(self.parse_block_statement()?))
        } else {
            None
        };

        Some(Expression::If {
            condition: Box::new(condition),
            consequence: Box::new(consequence),
            alternative,
        })
    }

    fn parse_block_statement(&mut self) -> Option<Statement> {
        let mut statements = Vec::new();

        self.next_token();
        while !self.cur_token_is(TokenType::RBRACE) && !self.cur_token_is(TokenType::EOF) {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.next_token();
        }

        Some(Statement::Block(statements))
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        if !self.expect_peek(TokenType::LPAREN) {
            return None;
        }

        let parameters = self.parse_function_parameters()?;

        if !self.expect_peek(TokenType::LBRACE) {
            return None;
        }

        let body = self.parse_block_statement()?;

        Some(Expression::Function {
            parameters,
            body: Box::new(body),
        })
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<String>> {
        let mut parameters = Vec::new();

        if self.peek_token_is(TokenType::RPAREN) {
            self.next_token();
            return Some(parameters);
        }

        if !self.expect_peek(TokenType::IDENT) {
            return None;
        }
        parameters.push(self.cur_token.literal.clone());

        while self.peek_token_is(TokenType::COMMA) {
            self.next_token();
            if !self.expect_peek(TokenType::IDENT) {
                return None;
            }
            parameters.push(self.cur_token.literal.clone());
        }

        if !self.expect_peek(TokenType::RPAREN) {
            return None;
        }

        Some(parameters)
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let arguments = self.parse_expression_list(TokenType::RPAREN)?;

        Some(Expression::Call {
            function: Box::new(function),
            arguments,
        })
    }

    fn parse_expression_list(&mut self, end: TokenType) -> Option<Vec<Expression>> {
        let mut list = Vec::new();

        if self.peek_token_is(end) {
            self.next_token();
            return Some(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::LOWEST)?);

        while self.peek_token_is(TokenType::COMMA) {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::LOWEST)?);
        }

        if !self.expect_peek(end) {
            return None;
        }

        Some(list)
    }

    fn parse_array_literal(&mut self) -> Option<Expression> {
        let elements = self.parse_expression_list(TokenType::RBRACKET)?;

        Some(Expression::Array(elements))
    }

    fn parse_index_expression(&mut self, left: Expression) -> Option<Expression> {
        self.next_token();
        let index = self.parse_expression(Precedence::LOWEST)?;

        if !self.expect_peek(TokenType::RBRACKET) {
            return None;
        }

        Some(Expression::Index {
            left: Box::new(left),
            index: Box::new(index),
        })
    }

    fn parse_hash_literal(&mut self) -> Option<Expression> {
        let mut pairs = Vec::new();

        while !self.peek_token_is(TokenType::RBRACE) {
            self.next_token();
            let key = self.parse_expression(Precedence::LOWEST)?;

            if !self.expect_peek(TokenType::COLON) {
                return None;
            }
            self.next_token();

            let value = self.parse_expression(Precedence::LOWEST)?;

            if !self.peek_token_is(TokenType::RBRACE) && !self.expect_peek(TokenType::COMMA) {
                return None;
            }

            pairs.push((key, value));
        }

        if !self.expect_peek(TokenType::RBRACE) {
            return None;
        }

        Some(Expression::Hash(pairs))
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::ast::{Expression, Statement};
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn parse(input: &str) -> crate::ast::Program {
        let l = Lexer::new(input);
        let mut p = Parser::new(l);
        let program = p.parse_program();
        assert!(
            p.errors().is_empty(),
            "unexpected parse errors {:?} for {:?}",
            p.errors(),
            input
        );
        program
    }

    fn parse_single_statement(input: &str) -> Statement {
        let program = parse(input);
        assert_eq!(program.statements.len(), 1, "input {:?}", input);
        program.statements[0].clone()
    }

    #[test]
    fn test_let_statement() {
        struct Test<'a> {
            input: &'a str,
            exp_name: &'a str,
            exp_value: Expression,
        }
        let tests = vec![
            Test {
                input: "let x = 5;",
                exp_name: "x",
                exp_value: Expression::Integer(5),
            },
            Test {
                input: "let y = true;",
                exp_name: "y",
                exp_value: Expression::Boolean(true),
            },
            Test {
                input: "let foobar = y;",
                exp_name: "foobar",
                exp_value: Expression::Identifier("y".to_string()),
            },
        ];

        for test in tests {
            match parse_single_statement(test.input) {
                Statement::Let { name, value } => {
                    assert_eq!(name, test.exp_name);
                    assert_eq!(value, test.exp_value);
                }
                other => panic!("not a let statement: {}", other),
            }
        }
    }

    #[test]
    fn test_return_statement() {
        struct Test<'a> {
            input: &'a str,
            exp_value: Expression,
        }
        let tests = vec![
            Test {
                input: "return true;",
                exp_value: Expression::Boolean(true),
            },
            Test {
                input: "return 5;",
                exp_value: Expression::Integer(5),
            },
            Test {
                input: "return foobar;",
                exp_value: Expression::Identifier("foobar".to_string()),
            },
        ];

        for test in tests {
            match parse_single_statement(test.input) {
                Statement::Return(value) => assert_eq!(value, test.exp_value),
                other => panic!("not a return statement: {}", other),
            }
        }
    }

    #[test]
    fn test_import_statement() {
        match parse_single_statement("import math;") {
            Statement::Import(module) => assert_eq!(module, "math"),
            other => panic!("not an import statement: {}", other),
        }
    }

    #[test]
    fn test_break_statement() {
        assert_eq!(parse_single_statement("break;"), Statement::Break);
    }

    #[test]
    fn test_for_each_statement() {
        struct Test<'a> {
            input: &'a str,
            exp_identifiers: Vec<&'a str>,
            exp_collection: Expression,
        }
        let tests = vec![
            Test {
                input: "for x in xs { x; }",
                exp_identifiers: vec!["x"],
                exp_collection: Expression::Identifier("xs".to_string()),
            },
            Test {
                input: "for k, v in {\"one\": 1} { k; }",
                exp_identifiers: vec!["k", "v"],
                exp_collection: Expression::Hash(vec![(
                    Expression::String("one".to_string()),
                    Expression::Integer(1),
                )]),
            },
            Test {
                input: "for x in [1, 2] { x; }",
                exp_identifiers: vec!["x"],
                exp_collection: Expression::Array(vec![
                    Expression::Integer(1),
                    Expression::Integer(2),
                ]),
            },
        ];

        for test in tests {
            match parse_single_statement(test.input) {
                Statement::ForEach {
                    identifiers,
                    collection,
                    ..
                } => {
                    assert_eq!(identifiers, test.exp_identifiers);
                    assert_eq!(collection, test.exp_collection);
                }
                other => panic!("not a for statement: {}", other),
            }
        }
    }

    #[test]
    fn test_parsing_prefix_expressions() {
        struct Test<'a> {
            input: &'a str,
            exp_operator: &'a str,
            exp_value: Expression,
        }
        let tests = vec![
            Test {
                input: "!5;",
                exp_operator: "!",
                exp_value: Expression::Integer(5),
            },
            Test {
                input: "-15;",
                exp_operator: "-",
                exp_value: Expression::Integer(15),
            },
            Test {
                input: "!true;",
                exp_operator: "!",
                exp_value: Expression::Boolean(true),
            },
            Test {
                input: "++i;",
                exp_operator: "++",
                exp_value: Expression::Identifier("i".to_string()),
            },
            Test {
                input: "--i;",
                exp_operator: "--",
                exp_value: Expression::Identifier("i".to_string()),
            },
        ];

        for test in tests {
            match parse_single_statement(test.input) {
                Statement::Expression(Expression::Prefix { operator, right }) => {
                    assert_eq!(operator, test.exp_operator);
                    assert_eq!(*right, test.exp_value);
                }
                other => panic!("not a prefix expression: {}", other),
            }
        }
    }

    #[test]
    fn test_parsing_infix_expressions() {
        let operators = vec![
            "+", "-", "*", "/", "%", "**", "<", ">", "<=", ">=", "==", "!=", "&&", "||",
        ];

        for op in operators {
            let input = format!("5 {} 3;", op);
            match parse_single_statement(&input) {
                Statement::Expression(Expression::Infix {
                    operator,
                    left,
                    right,
                }) => {
                    assert_eq!(operator, op);
                    assert_eq!(*left, Expression::Integer(5));
                    assert_eq!(*right, Expression::Integer(3));
                }
                other => panic!("not an infix expression: {}", other),
            }
        }
    }

    #[test]
    fn test_operator_precedence() {
        struct Test<'a> {
            input: &'a str,
            expected: &'a str,
        }
        let tests = vec![
            Test {
                input: "-a*b",
                expected: "((-a) * b);",
            },
            Test {
                input: "!-a",
                expected: "(!(-a));",
            },
            Test {
                input: "a+b+c",
                expected: "((a + b) + c);",
            },
            Test {
                input: "a-b*c",
                expected: "(a - (b * c));",
            },
            Test {
                input: "a + b * c + d / e - f",
                expected: "(((a + (b * c)) + (d / e)) - f);",
            },
            Test {
                input: "0 + 4; -5 / 9",
                expected: "(0 + 4);((-5) / 9);",
            },
            Test {
                input: "5 > 4 == 3<4",
                expected: "((5 > 4) == (3 < 4));",
            },
            Test {
                input: "3 + 4 * 5 == 3 * 1 + 4 * 5",
                expected: "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)));",
            },
            Test {
                input: "(5 + 5) * 2",
                expected: "((5 + 5) * 2);",
            },
            Test {
                input: "2 / (5 + 5)",
                expected: "(2 / (5 + 5));",
            },
            Test {
                input: "-(5 + 5)",
                expected: "(-(5 + 5));",
            },
            Test {
                input: "!(true == true)",
                expected: "(!(true == true));",
            },
            Test {
                input: "a + add(b * c) + d",
                expected: "((a + add((b * c))) + d);",
            },
            Test {
                input: "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
                expected: "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)));",
            },
            Test {
                input: "add(a * b[2], b[1], 2 * [1, 2][1])",
                expected: "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])));",
            },
            Test {
                input: "-a * b + c / d ** 2",
                expected: "(((-a) * b) + (c / (d ** 2)));",
            },
            Test {
                input: "a % b * c",
                expected: "((a % b) * c);",
            },
            Test {
                input: "a == b && c != d || e < f",
                expected: "(((a == b) && (c != d)) || (e < f));",
            },
            Test {
                input: "a || b && c",
                expected: "(a || (b && c));",
            },
            Test {
                input: "1 + 2 <= 3 * 4",
                expected: "((1 + 2) <= (3 * 4));",
            },
            Test {
                input: "5 >= 4 == true",
                expected: "((5 >= 4) == true);",
            },
            // left-associative power
            Test {
                input: "2 ** 3 ** 2",
                expected: "((2 ** 3) ** 2);",
            },
        ];

        for test in tests {
            let program = parse(test.input);
            assert_eq!(format!("{}", program), test.expected);
        }
    }

    #[test]
    fn test_if_expression() {
        struct Test<'a> {
            input: &'a str,
            expected: Expression,
        }
        let tests = vec![
            Test {
                input: "if (x < y) { x }",
                expected: Expression::If {
                    condition: Box::new(Expression::Infix {
                        operator: "<".to_string(),
                        left: Box::new(Expression::Identifier("x".to_string())),
                        right: Box::new(Expression::Identifier("y".to_string())),
                    }),
                    consequence: Box::new(Statement::Block(vec![Statement::Expression(
                        Expression::Identifier("x".to_string()),
                    )])),
                    alternative: None,
                },
            },
            Test {
                input: "if (x < y) { x } else { y }",
                expected: Expression::If {
                    condition: Box::new(Expression::Infix {
                        operator: "<".to_string(),
                        left: Box::new(Expression::Identifier("x".to_string())),
                        right: Box::new(Expression::Identifier("y".to_string())),
                    }),
                    consequence: Box::new(Statement::Block(vec![Statement::Expression(
                        Expression::Identifier("x".to_string()),
                    )])),
                    alternative: Some(Box::new(Statement::Block(vec![Statement::Expression(
                        Expression::Identifier("y".to_string()),
                    )]))),
                },
            },
        ];

        for test in tests {
            let got = parse_single_statement(test.input);
            assert_eq!(got, Statement::Expression(test.expected));
        }
    }

    #[test]
    fn test_function_literal() {
        match parse_single_statement("fn(x, y) { x + y; }") {
            Statement::Expression(Expression::Function { parameters, body }) => {
                assert_eq!(parameters, vec!["x", "y"]);
                assert_eq!(
                    *body,
                    Statement::Block(vec![Statement::Expression(Expression::Infix {
                        operator: "+".to_string(),
                        left: Box::new(Expression::Identifier("x".to_string())),
                        right: Box::new(Expression::Identifier("y".to_string())),
                    })])
                );
            }
            other => panic!("not a function literal: {}", other),
        }
    }

    #[test]
    fn test_function_parameters() {
        struct Test<'a> {
            input: &'a str,
            expected: Vec<&'a str>,
        }
        let tests = vec![
            Test {
                input: "fn() {}",
                expected: vec![],
            },
            Test {
                input: "fn(x) {}",
                expected: vec!["x"],
            },
            Test {
                input: "fn(x, y, z) {}",
                expected: vec!["x", "y", "z"],
            },
        ];

        for test in tests {
            match parse_single_statement(test.input) {
                Statement::Expression(Expression::Function { parameters, .. }) => {
                    assert_eq!(parameters, test.expected);
                }
                other => panic!("not a function literal: {}", other),
            }
        }
    }

    #[test]
    fn test_call_expression() {
        match parse_single_statement("add(1, 2 * 3, 4 + a)") {
            Statement::Expression(Expression::Call {
                function,
                arguments,
            }) => {
                assert_eq!(*function, Expression::Identifier("add".to_string()));
                assert_eq!(
                    arguments,
                    vec![
                        Expression::Integer(1),
                        Expression::Infix {
                            operator: "*".to_string(),
                            left: Box::new(Expression::Integer(2)),
                            right: Box::new(Expression::Integer(3)),
                        },
                        Expression::Infix {
                            operator: "+".to_string(),
                            left: Box::new(Expression::Integer(4)),
                            right: Box::new(Expression::Identifier("a".to_string())),
                        },
                    ]
                );
            }
            other => panic!("not a call expression: {}", other),
        }
    }

    #[test]
    fn test_string_literal() {
        match parse_single_statement("\"hello world\"") {
            Statement::Expression(Expression::String(st)) => assert_eq!(st, "hello world"),
            other => panic!("not a string literal: {}", other),
        }
    }

    #[test]
    fn test_null_literal() {
        match parse_single_statement("null") {
            Statement::Expression(Expression::Null) => {}
            other => panic!("not a null literal: {}", other),
        }
    }

    #[test]
    fn test_array_literal() {
        match parse_single_statement("[1, a + 2]") {
            Statement::Expression(Expression::Array(elements)) => {
                assert_eq!(
                    elements,
                    vec![
                        Expression::Integer(1),
                        Expression::Infix {
                            operator: "+".to_string(),
                            left: Box::new(Expression::Identifier("a".to_string())),
                            right: Box::new(Expression::Integer(2)),
                        },
                    ]
                );
            }
            other => panic!("not an array literal: {}", other),
        }
    }

    #[test]
    fn test_empty_array_literal() {
        match parse_single_statement("[]") {
            Statement::Expression(Expression::Array(elements)) => assert!(elements.is_empty()),
            other => panic!("not an array literal: {}", other),
        }
    }

    #[test]
    fn test_index_expression() {
        match parse_single_statement("myArray[a + 2]") {
            Statement::Expression(Expression::Index { left, index }) => {
                assert_eq!(*left, Expression::Identifier("myArray".to_string()));
                assert_eq!(
                    *index,
                    Expression::Infix {
                        operator: "+".to_string(),
                        left: Box::new(Expression::Identifier("a".to_string())),
                        right: Box::new(Expression::Integer(2)),
                    }
                );
            }
            other => panic!("not an index expression: {}", other),
        }
    }

    #[test]
    fn test_hash_literal() {
        match parse_single_statement(r#"{"one": 1, "two": 2}"#) {
            Statement::Expression(Expression::Hash(pairs)) => {
                assert_eq!(
                    pairs,
                    vec![
                        (
                            Expression::String("one".to_string()),
                            Expression::Integer(1)
                        ),
                        (
                            Expression::String("two".to_string()),
                            Expression::Integer(2)
                        ),
                    ]
                );
            }
            other => panic!("not a hash literal: {}", other),
        }
    }

    #[test]
    fn test_empty_hash_literal() {
        match parse_single_statement("{}") {
            Statement::Expression(Expression::Hash(pairs)) => assert!(pairs.is_empty()),
            other => panic!("not a hash literal: {}", other),
        }
    }

    #[test]
    fn test_hash_literal_with_expression_keys() {
        match parse_single_statement("{1 + 1: true, true: 2}") {
            Statement::Expression(Expression::Hash(pairs)) => {
                assert_eq!(pairs.len(), 2);
                assert_eq!(
                    pairs[0],
                    (
                        Expression::Infix {
                            operator: "+".to_string(),
                            left: Box::new(Expression::Integer(1)),
                            right: Box::new(Expression::Integer(1)),
                        },
                        Expression::Boolean(true)
                    )
                );
                assert_eq!(
                    pairs[1],
                    (Expression::Boolean(true), Expression::Integer(2))
                );
            }
            other => panic!("not a hash literal: {}", other),
        }
    }

    #[test]
    fn test_parse_errors() {
        struct Test<'a> {
            input: &'a str,
            expected: &'a str,
        }
        let tests = vec![
            Test {
                input: "let x 5;",
                expected: "expected next token to be '=', got 'INT' instead",
            },
            Test {
                input: "let = 5;",
                expected: "expected next token to be 'IDENT', got '=' instead",
            },
            Test {
                input: "let x = 5",
                expected: "expected next token to be ';', got 'EOF' instead",
            },
            Test {
                input: "break",
                expected: "expected next token to be ';', got 'EOF' instead",
            },
            Test {
                input: "for in xs { x; }",
                expected: "expected next token to be 'IDENT', got 'IN' instead",
            },
            Test {
                input: "import;",
                expected: "no prefix parse function found for ';'",
            },
            Test {
                input: "@",
                expected: "no prefix parse function found for 'ILLEGAL'",
            },
            Test {
                input: "a = 2; a;",
                expected: "no prefix parse function found for '='",
            },
        ];

        for test in tests {
            let l = Lexer::new(test.input);
            let mut p = Parser::new(l);
            p.parse_program();

            let errors: Vec<String> = p.errors().iter().map(|e| e.to_string()).collect();
            assert!(
                errors.contains(&test.expected.to_string()),
                "errors for {:?} were {:?}",
                test.input,
                errors
            );
        }
    }

    #[test]
    fn test_error_recovery_continues_parsing() {
        let l = Lexer::new("let x 5; let y = 7;");
        let mut p = Parser::new(l);
        let program = p.parse_program();

        assert!(!p.errors().is_empty());
        // the second statement still parses
        assert!(program.statements.contains(&Statement::Let {
            name: "y".to_string(),
            value: Expression::Integer(7),
        }));
    }

    #[test]
    fn test_rendered_program_reparses() {
        let inputs = vec![
            "let x = 5;",
            "return add(1, 2 * 3);",
            "if (x < y) { x } else { y }",
            "let f = fn (a, b) {return (a + b);};",
            "for k, v in pairs {puts(k, v)}",
            "import math;",
            "let h = {\"one\": 1, \"two\": 2};",
            "(xs[0])",
            "true; 5;",
            "1; 2;",
        ];

        for input in inputs {
            let first = parse(input);
            let rendered = format!("{}", first);
            let second = parse(&rendered);
            assert_eq!(first, second, "round trip failed for {:?}", input);
        }
    }

    // Adjacent bare literals must not fuse on re-render: without statement
    // terminators "true; 5;" would render as "true5", which re-lexes as a
    // single identifier.
    #[test]
    fn test_adjacent_literal_statements_stay_separate() {
        let first = parse("true; 5;");
        assert_eq!(
            first.statements,
            vec![
                Statement::Expression(Expression::Boolean(true)),
                Statement::Expression(Expression::Integer(5)),
            ]
        );

        let rendered = format!("{}", first);
        assert_eq!(rendered, "true;5;");

        let second = parse(&rendered);
        assert_eq!(first, second);
    }
}
