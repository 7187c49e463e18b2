use std::fmt;
use std::fmt::Formatter;

#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy, Hash)]
pub enum TokenType {
    ILLEGAL,
    EOF,

    IDENT,
    INT,
    STRING,

    ASSIGN,
    PLUS,
    MINUS,
    BANG, // !
    ASTERISK,
    SLASH,
    PERCENT,
    POWER, // **

    LT,
    GT,
    LtEq,
    GtEq,
    EQ,
    NotEq,

    AND, // &&
    OR,  // ||

    PlusAssign,     // +=
    MinusAssign,    // -=
    AsteriskAssign, // *=
    SlashAssign,    // /=
    PercentAssign,  // %=
    INCR,           // ++
    DECR,           // --

    COMMA,
    SEMICOLON,
    COLON,
    PERIOD,

    LPAREN,   // (
    RPAREN,   // )
    LBRACE,   // {
    RBRACE,   // }
    LBRACKET, // [
    RBRACKET, // ]

    // keywords
    FUNCTION, // fn
    LET,      // let
    TRUE,     // true
    FALSE,    // false
    IF,       // if
    ELSE,     // else
    RETURN,   // return
    NULL,     // null
    IMPORT,   // import
    FOR,      // for
    IN,       // in
    BREAK,    // break
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // Operator and delimiter tokens display as their source text; the
        // parser interpolates these into its error messages.
        write!(
            f,
            "{}",
            match &self {
                TokenType::ILLEGAL => "ILLEGAL",
                TokenType::EOF => "EOF",
                TokenType::IDENT => "IDENT",
                TokenType::INT => "INT",
                TokenType::STRING => "STRING",
                TokenType::ASSIGN => "=",
                TokenType::PLUS => "+",
                TokenType::MINUS => "-",
                TokenType::BANG => "!",
                TokenType::ASTERISK => "*",
                TokenType::SLASH => "/",
                TokenType::PERCENT => "%",
                TokenType::POWER => "**",
                TokenType::LT => "<",
                TokenType::GT => ">",
                TokenType::LtEq => "<=",
                TokenType::GtEq => ">=",
                TokenType::EQ => "==",
                TokenType::NotEq => "!=",
                TokenType::AND => "&&",
                TokenType::OR => "||",
                TokenType::PlusAssign => "+=",
                TokenType::MinusAssign => "-=",
                TokenType::AsteriskAssign => "*=",
                TokenType::SlashAssign => "/=",
                TokenType::PercentAssign => "%=",
                TokenType::INCR => "++",
                TokenType::DECR => "--",
                TokenType::COMMA => ",",
                TokenType::SEMICOLON => ";",
                TokenType::COLON => ":",
                TokenType::PERIOD => ".",
                TokenType::LPAREN => "(",
                TokenType::RPAREN => ")",
                TokenType::LBRACE => "{",
                TokenType::RBRACE => "}",
                TokenType::LBRACKET => "[",
                TokenType::RBRACKET => "]",
                TokenType::FUNCTION => "FUNCTION",
                TokenType::LET => "LET",
                TokenType::TRUE => "TRUE",
                TokenType::FALSE => "FALSE",
                TokenType::IF => "IF",
                TokenType::ELSE => "ELSE",
                TokenType::RETURN => "RETURN",
                TokenType::NULL => "NULL",
                TokenType::IMPORT => "IMPORT",
                TokenType::FOR => "FOR",
                TokenType::IN => "IN",
                TokenType::BREAK => "BREAK",
            }
        )
    }
}

#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone)]
pub struct Token {
    pub token_type: TokenType,
    pub literal: String,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}: {}}}", self.token_type, self.literal)
    }
}

pub fn look_up_ident(ident: &str) -> TokenType {
    match ident {
        "fn" => TokenType::FUNCTION,
        "let" => TokenType::LET,
        "true" => TokenType::TRUE,
        "false" => TokenType::FALSE,
        "if" => TokenType::IF,
        "else" => TokenType::ELSE,
        "return" => TokenType::RETURN,
        "null" => TokenType::NULL,
        "import" => TokenType::IMPORT,
        "for" => TokenType::FOR,
        "in" => TokenType::IN,
        "break" => TokenType::BREAK,
        _ => TokenType::IDENT,
    }
}
