use log::debug;
use serde::Serialize;
use std::fmt;

/// The different kinds of tokens recognized by the scanner.
///
/// Literal payloads live on [`Token::literal`], so the kind itself is a
/// plain `Copy` tag that the parser can compare cheaply.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenType {
    /// '('
    LEFT_PAREN,

    /// ')'
    RIGHT_PAREN,

    /// '{'
    LEFT_BRACE,

    /// '}'
    RIGHT_BRACE,

    /// ','
    COMMA,

    /// '.'
    DOT,

    /// '-'
    MINUS,

    /// '+'
    PLUS,

    /// ';'
    SEMICOLON,

    /// '/'
    SLASH,

    /// '*'
    STAR,

    /// '!'
    BANG,

    /// '!='
    BANG_EQUAL,

    /// '='
    EQUAL,

    /// '=='
    EQUAL_EQUAL,

    /// '>'
    GREATER,

    /// '>='
    GREATER_EQUAL,

    /// '<'
    LESS,

    /// '<='
    LESS_EQUAL,

    /// A user‑defined identifier
    IDENTIFIER,

    /// A string literal
    STRING,

    /// A numeric literal
    NUMBER,

    AND,
    CLASS,
    ELSE,
    FALSE,
    FUN,
    FOR,
    IF,
    NIL,
    OR,
    PRINT,
    RETURN,
    SUPER,
    THIS,
    TRUE,
    VAR,
    WHILE,

    /// End‑of‑file marker
    EOF,
}

impl TokenType {
    /// Upper-case name used by the `tokenize` listing.
    pub fn name(self) -> &'static str {
        match self {
            TokenType::LEFT_PAREN => "LEFT_PAREN",
            TokenType::RIGHT_PAREN => "RIGHT_PAREN",
            TokenType::LEFT_BRACE => "LEFT_BRACE",
            TokenType::RIGHT_BRACE => "RIGHT_BRACE",
            TokenType::COMMA => "COMMA",
            TokenType::DOT => "DOT",
            TokenType::MINUS => "MINUS",
            TokenType::PLUS => "PLUS",
            TokenType::SEMICOLON => "SEMICOLON",
            TokenType::SLASH => "SLASH",
            TokenType::STAR => "STAR",
            TokenType::BANG => "BANG",
            TokenType::BANG_EQUAL => "BANG_EQUAL",
            TokenType::EQUAL => "EQUAL",
            TokenType::EQUAL_EQUAL => "EQUAL_EQUAL",
            TokenType::GREATER => "GREATER",
            TokenType::GREATER_EQUAL => "GREATER_EQUAL",
            TokenType::LESS => "LESS",
            TokenType::LESS_EQUAL => "LESS_EQUAL",
            TokenType::IDENTIFIER => "IDENTIFIER",
            TokenType::STRING => "STRING",
            TokenType::NUMBER => "NUMBER",
            TokenType::AND => "AND",
            TokenType::CLASS => "CLASS",
            TokenType::ELSE => "ELSE",
            TokenType::FALSE => "FALSE",
            TokenType::FUN => "FUN",
            TokenType::FOR => "FOR",
            TokenType::IF => "IF",
            TokenType::NIL => "NIL",
            TokenType::OR => "OR",
            TokenType::PRINT => "PRINT",
            TokenType::RETURN => "RETURN",
            TokenType::SUPER => "SUPER",
            TokenType::THIS => "THIS",
            TokenType::TRUE => "TRUE",
            TokenType::VAR => "VAR",
            TokenType::WHILE => "WHILE",
            TokenType::EOF => "EOF",
        }
    }
}

/// A **literal constant** that appears directly in the source code.
///
/// The scanner attaches one to `NUMBER` and `STRING` tokens; the parser
/// copies it into [`crate::expr::Expr::Literal`] leaves, together with the
/// keyword constants `true`, `false` and `nil`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LiteralValue {
    /// Numeric literal ‑ stored as IEEE‑754 `f64`.
    Number(f64),

    /// String literal without surrounding quotes.
    Str(String),

    Bool(bool),

    Nil,
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Number(n) => write!(f, "{}", n),
            LiteralValue::Str(s) => write!(f, "{}", s),
            LiteralValue::Bool(b) => write!(f, "{}", b),
            LiteralValue::Nil => write!(f, "nil"),
        }
    }
}

/// A scanned token: its kind, the exact lexeme, an optional literal value
/// and the byte offset of the lexeme's first character in the source.
///
/// Tokens own their lexeme so that statements parsed from one REPL line
/// (and the closures built from them) can outlive that line's buffer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// The category of this token.
    pub token_type: TokenType,

    /// The exact substring from the source that produced this token.
    pub lexeme: String,

    /// Parsed value for `NUMBER` and `STRING` tokens.
    pub literal: Option<LiteralValue>,

    /// Byte offset of the lexeme start. Line and column are derived from it
    /// only when a diagnostic is rendered.
    pub offset: usize,
}

impl Token {
    /// Create a new token without a literal payload.
    pub fn new(token_type: TokenType, lexeme: impl Into<String>, offset: usize) -> Self {
        Self {
            token_type,
            lexeme: lexeme.into(),
            literal: None,
            offset,
        }
    }

    /// Create a `NUMBER` / `STRING` token carrying its parsed value.
    pub fn with_literal(
        token_type: TokenType,
        lexeme: impl Into<String>,
        literal: LiteralValue,
        offset: usize,
    ) -> Self {
        Self {
            token_type,
            lexeme: lexeme.into(),
            literal: Some(literal),
            offset,
        }
    }

    /// The end-of-file marker placed at `offset` (the source length).
    pub fn eof(offset: usize) -> Self {
        Self::new(TokenType::EOF, "", offset)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug!(
            "Formatting token: type={:?}, lexeme={}, offset={}",
            self.token_type, self.lexeme, self.offset
        );

        let variant: &'static str = self.token_type.name();

        match &self.literal {
            // 3 → "3.0", 3.14 → "3.14"
            Some(LiteralValue::Number(n)) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
                let mut buf: itoa::Buffer = itoa::Buffer::new();
                write!(f, "{} {} {}.0", variant, self.lexeme, buf.format(*n as i64))
            }
            Some(literal) => write!(f, "{} {} {}", variant, self.lexeme, literal),
            None => write!(f, "{} {} null", variant, self.lexeme),
        }
    }
}
