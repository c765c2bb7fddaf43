//! Streaming lexer.
//!
//! [`Scanner`] walks the source byte by byte and yields one
//! `Result<Token, Diagnostic>` per lexeme.  A bad character or an
//! unterminated string is reported and scanning carries on, so a single pass
//! surfaces every lexical error.  The stream always finishes with exactly one
//! `EOF` token, after which the iterator is fused.
//!
//! ```rust
//! use rlox_tw::scanner::Scanner;
//!
//! for result in Scanner::new("print 123; // trailing comment") {
//!     match result {
//!         Ok(token) => println!("{}", token),
//!         Err(err) => eprintln!("{}", err),
//!     }
//! }
//! ```
//!
//! Keywords are looked up in a compile-time `phf` map; comments are skipped
//! with a single `memchr` for the next newline.

use crate::error::{Diagnostic, Diagnostics};
use crate::token::{Token, TokenType};
use log::{debug, info};
use memchr::memchr;
use phf::phf_map;
use std::iter::FusedIterator;

static KEYWORDS: phf::Map<&'static [u8], TokenType> = phf_map! {
    b"and" => TokenType::AND,
    b"class" => TokenType::CLASS,
    b"else" => TokenType::ELSE,
    b"false" => TokenType::FALSE,
    b"for" => TokenType::FOR,
    b"fun" => TokenType::FUN,
    b"if" => TokenType::IF,
    b"nil" => TokenType::NIL,
    b"or" => TokenType::OR,
    b"print" => TokenType::PRINT,
    b"return" => TokenType::RETURN,
    b"super" => TokenType::SUPER,
    b"this" => TokenType::THIS,
    b"true" => TokenType::TRUE,
    b"var" => TokenType::VAR,
    b"while" => TokenType::WHILE,
};

/// `Ok(None)` means the bytes consumed were trivia (whitespace, comment).
type LexResult = std::result::Result<Option<TokenType>, Diagnostic>;

pub struct Scanner<'a> {
    src: &'a str,
    bytes: &'a [u8],
    /// Offset of the lexeme being scanned.
    lexeme_start: usize,
    pos: usize,
    line: usize,
    done: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        info!("Scanner created over {} bytes", src.len());

        Self {
            src,
            bytes: src.as_bytes(),
            lexeme_start: 0,
            pos: 0,
            line: 1,
            done: false,
        }
    }

    #[inline]
    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Consume one byte.  Only called when not [`at_end`](Self::at_end).
    #[inline]
    fn bump(&mut self) -> u8 {
        let b = self.bytes[self.pos];
        self.pos += 1;
        b
    }

    /// Byte `ahead` positions past the cursor, `0` beyond the input.
    #[inline]
    fn look(&self, ahead: usize) -> u8 {
        self.bytes.get(self.pos + ahead).copied().unwrap_or(0)
    }

    #[inline]
    fn eat(&mut self, expected: u8) -> bool {
        let hit = !self.at_end() && self.look(0) == expected;
        if hit {
            self.pos += 1;
        }
        hit
    }

    /// `long` if an `=` follows, else `short`.
    #[inline]
    fn with_equal(&mut self, long: TokenType, short: TokenType) -> LexResult {
        Ok(Some(if self.eat(b'=') { long } else { short }))
    }

    fn lex_one(&mut self) -> LexResult {
        use TokenType::*;

        let kind = match self.bump() {
            b'(' => LEFT_PAREN,
            b')' => RIGHT_PAREN,
            b'{' => LEFT_BRACE,
            b'}' => RIGHT_BRACE,
            b',' => COMMA,
            b'.' => DOT,
            b'-' => MINUS,
            b'+' => PLUS,
            b';' => SEMICOLON,
            b'*' => STAR,

            b'!' => return self.with_equal(BANG_EQUAL, BANG),
            b'=' => return self.with_equal(EQUAL_EQUAL, EQUAL),
            b'<' => return self.with_equal(LESS_EQUAL, LESS),
            b'>' => return self.with_equal(GREATER_EQUAL, GREATER),

            b'/' if self.eat(b'/') => {
                // Stop on the newline so it still bumps the line count.
                self.pos = match memchr(b'\n', &self.bytes[self.pos..]) {
                    Some(offset) => self.pos + offset,
                    None => self.bytes.len(),
                };
                return Ok(None);
            }
            b'/' => SLASH,

            b' ' | b'\r' | b'\t' => return Ok(None),
            b'\n' => {
                self.line += 1;
                return Ok(None);
            }

            b'"' => return self.lex_string().map(Some),
            b'0'..=b'9' => self.lex_number(),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.lex_word(),

            _ => return Err(self.unexpected()),
        };

        Ok(Some(kind))
    }

    /// Report the character at `lexeme_start`, consuming all of its bytes.
    fn unexpected(&mut self) -> Diagnostic {
        if let Some(c) = self.src[self.lexeme_start..].chars().next() {
            self.pos = self.lexeme_start + c.len_utf8();
            debug!("Unexpected character {:?} on line {}", c, self.line);
        }

        Diagnostic::lex(self.line, "Unexpected character.")
    }

    /// Body of a string literal; the opening quote is already consumed.
    /// Strings may span lines and have no escapes.
    fn lex_string(&mut self) -> std::result::Result<TokenType, Diagnostic> {
        while !self.at_end() && self.look(0) != b'"' {
            if self.bump() == b'\n' {
                self.line += 1;
            }
        }

        if !self.eat(b'"') {
            return Err(Diagnostic::lex(self.line, "Unterminated string."));
        }

        // Quotes are ASCII, so these are char boundaries.
        let contents: &str = &self.src[self.lexeme_start + 1..self.pos - 1];
        Ok(TokenType::STRING(contents.to_owned()))
    }

    /// `123` or `3.14`.  A `.` not followed by a digit is left alone.
    fn lex_number(&mut self) -> TokenType {
        let skip_digits = |s: &mut Self| {
            while s.look(0).is_ascii_digit() {
                s.pos += 1;
            }
        };

        skip_digits(self);
        if self.look(0) == b'.' && self.look(1).is_ascii_digit() {
            self.pos += 1;
            skip_digits(self);
        }

        // Digits with at most one interior '.' always parse.
        let value: f64 = self.src[self.lexeme_start..self.pos]
            .parse()
            .unwrap_or_default();
        TokenType::NUMBER(value)
    }

    fn lex_word(&mut self) -> TokenType {
        while matches!(self.look(0), b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_') {
            self.pos += 1;
        }

        KEYWORDS
            .get(&self.bytes[self.lexeme_start..self.pos])
            .cloned()
            .unwrap_or(TokenType::IDENTIFIER)
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = std::result::Result<Token, Diagnostic>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        while !self.at_end() {
            self.lexeme_start = self.pos;

            match self.lex_one() {
                Ok(None) => continue,
                Ok(Some(kind)) => {
                    let lexeme: &str = &self.src[self.lexeme_start..self.pos];
                    return Some(Ok(Token::new(kind, lexeme, self.line)));
                }
                Err(e) => return Some(Err(e)),
            }
        }

        self.done = true;
        Some(Ok(Token::new(TokenType::EOF, "", self.line)))
    }
}

impl<'a> FusedIterator for Scanner<'a> {}

/// Scan all of `src`, separating tokens from lexical diagnostics.  The token
/// list always ends with `EOF`, even when errors were reported.
pub fn scan_tokens(src: &str) -> (Vec<Token>, Diagnostics) {
    let mut tokens: Vec<Token> = Vec::new();
    let mut diagnostics = Diagnostics::new();

    for result in Scanner::new(src) {
        match result {
            Ok(token) => tokens.push(token),
            Err(e) => diagnostics.push(e),
        }
    }

    info!(
        "Scanned {} token(s) with {} error(s)",
        tokens.len(),
        diagnostics.len()
    );

    (tokens, diagnostics)
}
