//! Module `scanner` implements a one‑pass, streaming lexer.
//!
//! It transforms a source string into a sequence of [`Token`]s, skipping
//! whitespace and comments, and emitting exactly one `EOF` token at the end.
//! Designed as a `FusedIterator`, it can be chained safely with other
//! iterator adapters.
//!
//! # Public API
//!
//! - `scan(source) -> Scanner`
//!   Create a new lexer over the input. Each call starts from scratch.
//!
//! - `impl Iterator for Scanner<'a>`
//!   Yields `Result<Token, LoxError>` on each `.next()`. An `Err` reports a
//!   malformed lexeme at its *start* offset; scanning carries on afterwards.
//!
//! - `scan_all(source) -> (Vec<Token>, Vec<LoxError>)`
//!   Drains a scanner, splitting tokens from errors.
//!
//! # Token Recognition (`scan_token`)
//!
//! - Single‑character tokens: `(`, `)`, `{`, `}`, `,`, `.`, `-`, `+`, `;`, `*`.
//! - Two‑character operators: `!=`, `==`, `<=`, `>=`.
//! - `//` comments run to end of line and are skipped with `memchr`.
//! - String literals: `"` … `"`, may span lines; unterminated ⇒ error.
//! - Numeric literals: digits with an optional fractional part.
//! - Identifiers/keywords: alphanumeric/_ runs, resolved via a perfect‑hash
//!   `KEYWORDS` map.
//!
//! # Example
//!
//! ```rust
//! use rox::scanner::scan;
//!
//! for result in scan("print 123; // example") {
//!     match result {
//!         Ok(token) => println!("{}", token),
//!         Err(err) => eprintln!("Lex error: {}", err),
//!     }
//! }
//! ```

use crate::error::{LoxError, Result};
use crate::token::{LiteralValue, Token, TokenType};
use log::{debug, info};
use memchr::memchr;
use phf::phf_map;
use std::iter::FusedIterator;

// ─────────────────────────────────────────────────────────────────────────────
// Static keyword map (compile‑time perfect hash)
// ─────────────────────────────────────────────────────────────────────────────

static KEYWORDS: phf::Map<&'static str, TokenType> = phf_map! {
    "and"    => TokenType::AND,
    "class"  => TokenType::CLASS,
    "else"   => TokenType::ELSE,
    "false"  => TokenType::FALSE,
    "fun"    => TokenType::FUN,
    "for"    => TokenType::FOR,
    "if"     => TokenType::IF,
    "nil"    => TokenType::NIL,
    "or"     => TokenType::OR,
    "print"  => TokenType::PRINT,
    "return" => TokenType::RETURN,
    "super"  => TokenType::SUPER,
    "this"   => TokenType::THIS,
    "true"   => TokenType::TRUE,
    "var"    => TokenType::VAR,
    "while"  => TokenType::WHILE,
};

/// Start scanning `source`.
pub fn scan(source: &str) -> Scanner<'_> {
    Scanner::new(source)
}

/// Scan the whole of `source`, returning every token (ending with `EOF`)
/// and every lexical error, each in source order.
pub fn scan_all(source: &str) -> (Vec<Token>, Vec<LoxError>) {
    let mut tokens: Vec<Token> = Vec::new();
    let mut errors: Vec<LoxError> = Vec::new();

    for result in scan(source) {
        match result {
            Ok(token) => tokens.push(token),
            Err(e) => errors.push(e),
        }
    }

    info!(
        "Scanned {} tokens with {} errors",
        tokens.len(),
        errors.len()
    );

    (tokens, errors)
}

/// A single pass **scanner / lexer**. Both cursors are byte offsets into
/// `src` and always sit on char boundaries.
pub struct Scanner<'a> {
    src: &'a str,
    bytes: &'a [u8],
    start: usize,                     // first byte of the current lexeme
    curr: usize,                      // one past the last byte examined
    pending: Option<TokenType>,       // recognised token kind waiting to be emitted
    literal: Option<LiteralValue>,    // payload for `pending`, if any
    done: bool,
}

impl<'a> Scanner<'a> {
    /// Create a new lexer over `src`.
    #[inline]
    pub fn new(src: &'a str) -> Self {
        info!("Scanner created over {} bytes", src.len());

        Self {
            src,
            bytes: src.as_bytes(),
            start: 0,
            curr: 0,
            pending: None,
            literal: None,
            done: false,
        }
    }

    // ───────────────────────────── primitive helpers ────────────────────────

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.curr >= self.bytes.len()
    }

    /// Advance one byte and return it. Callers guard with [`Self::is_at_end`].
    #[inline(always)]
    fn advance(&mut self) -> u8 {
        let b = self.bytes[self.curr];
        self.curr += 1;
        b
    }

    /// Peek at the current byte without consuming it. `0` past EOF.
    #[inline(always)]
    fn peek(&self) -> u8 {
        self.bytes.get(self.curr).copied().unwrap_or(0)
    }

    #[inline(always)]
    fn peek_next(&self) -> u8 {
        self.bytes.get(self.curr + 1).copied().unwrap_or(0)
    }

    /// Consume a byte **iff** it matches `expected`.
    #[inline(always)]
    fn match_byte(&mut self, expected: u8) -> bool {
        if self.peek() == expected {
            self.curr += 1;
            true
        } else {
            false
        }
    }

    /// Pick between a one- and two-character operator on a trailing `=`.
    #[inline(always)]
    fn one_or_two(&mut self, single: TokenType, double: TokenType) -> TokenType {
        if self.match_byte(b'=') {
            double
        } else {
            single
        }
    }

    // ───────────────────────────── core lexing ─────────────────────────────

    /// Scan a *single* lexeme starting at `self.curr`. If it produces a
    /// token the kind is stored in `self.pending`; whitespace and comments
    /// leave `pending` empty.
    fn scan_token(&mut self) -> Result<()> {
        let b = self.advance();

        let tt = match b {
            // ── single‑character punctuators ──────────────────────────────
            b'(' => TokenType::LEFT_PAREN,
            b')' => TokenType::RIGHT_PAREN,
            b'{' => TokenType::LEFT_BRACE,
            b'}' => TokenType::RIGHT_BRACE,
            b',' => TokenType::COMMA,
            b'.' => TokenType::DOT,
            b'-' => TokenType::MINUS,
            b'+' => TokenType::PLUS,
            b';' => TokenType::SEMICOLON,
            b'*' => TokenType::STAR,

            // ── two‑character operators (!=, ==, <=, >=) ─────────────────
            b'!' => self.one_or_two(TokenType::BANG, TokenType::BANG_EQUAL),
            b'=' => self.one_or_two(TokenType::EQUAL, TokenType::EQUAL_EQUAL),
            b'<' => self.one_or_two(TokenType::LESS, TokenType::LESS_EQUAL),
            b'>' => self.one_or_two(TokenType::GREATER, TokenType::GREATER_EQUAL),

            // ── whitespace ───────────────────────────────────────────────
            b' ' | b'\r' | b'\t' | b'\n' => return Ok(()),

            // ── comments (// … until newline) ────────────────────────────
            b'/' => {
                if self.match_byte(b'/') {
                    match memchr(b'\n', &self.bytes[self.curr..]) {
                        Some(pos) => self.curr += pos,
                        None => self.curr = self.bytes.len(),
                    }

                    return Ok(());
                }

                TokenType::SLASH
            }

            b'"' => return self.parse_string(),

            b'0'..=b'9' => self.parse_number(),

            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.parse_identifier(),

            // ── unexpected character ─────────────────────────────────────
            _ => {
                // Swallow the rest of a multi-byte character.
                while self.peek() & 0xC0 == 0x80 {
                    self.curr += 1;
                }

                return Err(LoxError::lex(self.start, "Unexpected character."));
            }
        };

        self.pending = Some(tt);

        Ok(())
    }

    /// Parse a double‑quoted string literal. `self.start` still points to
    /// the opening `"`; on success `self.curr` is past the closing one.
    fn parse_string(&mut self) -> Result<()> {
        match memchr(b'"', &self.bytes[self.curr..]) {
            Some(pos) => self.curr += pos + 1,
            None => {
                self.curr = self.bytes.len();

                return Err(LoxError::lex(self.start, "Unterminated string."));
            }
        }

        let contents: &str = &self.src[self.start + 1..self.curr - 1];

        self.pending = Some(TokenType::STRING);
        self.literal = Some(LiteralValue::Str(contents.to_owned()));

        Ok(())
    }

    /// Parse a numeric literal (`123`, `3.14`). Fractions are optional;
    /// `1.` and `.5` are not numbers.
    fn parse_number(&mut self) -> TokenType {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
            self.advance(); // consume "."

            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        // Only ASCII digits and one dot were consumed, so parsing succeeds.
        let n: f64 = self.src[self.start..self.curr].parse::<f64>().unwrap_or(0.0);
        self.literal = Some(LiteralValue::Number(n));

        TokenType::NUMBER
    }

    /// Parse an identifier and decide if it is a **keyword** or a generic
    /// `IDENTIFIER` token.
    fn parse_identifier(&mut self) -> TokenType {
        while {
            let c: u8 = self.peek();
            c.is_ascii_alphanumeric() || c == b'_'
        } {
            self.advance();
        }

        KEYWORDS
            .get(&self.src[self.start..self.curr])
            .copied()
            .unwrap_or(TokenType::IDENTIFIER)
    }
}

// ───────────────────────── Iterator implementation ─────────────────────────

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            // EOF guard: emit exactly one EOF then terminate.
            if self.is_at_end() {
                self.done = true;

                return Some(Ok(Token::eof(self.bytes.len())));
            }

            self.start = self.curr;
            self.pending = None;
            self.literal = None;

            if let Err(e) = self.scan_token() {
                return Some(Err(e));
            }

            if let Some(tt) = self.pending.take() {
                let lexeme: &str = &self.src[self.start..self.curr];
                debug!("Scanned token ({:?}) at offset {}", tt, self.start);

                let token = match self.literal.take() {
                    Some(literal) => Token::with_literal(tt, lexeme, literal, self.start),
                    None => Token::new(tt, lexeme, self.start),
                };

                return Some(Ok(token));
            }
            // Otherwise it was whitespace / comment → continue loop.
        }
    }
}

impl<'a> FusedIterator for Scanner<'a> {}
