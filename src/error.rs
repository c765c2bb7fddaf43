//! Centralised error hierarchy for the **Lox interpreter**.
//!
//! Compile‑time phases (scanner, parser, resolver) never stop at the first
//! problem: they push [`Diagnostic`]s into a [`Diagnostics`] accumulator that
//! the driver inspects between phases.  Runtime failures are fail‑fast and
//! carry a single [`RuntimeError`].  Both funnel into [`LoxError`] so the
//! whole crate can share one `Result<T>` alias.
//!
//! Nothing here prints; rendering is left to the caller through `Display`.

use std::fmt;
use std::io;

use log::info;
use thiserror::Error;

use crate::token::{Token, TokenType};

/// Which compile‑time phase produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Lex,
    Parse,
    Resolve,
}

/// One compile‑time problem: `[line N] Error{location}: message`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[line {line}] Error{location}: {message}")]
pub struct Diagnostic {
    pub phase: Phase,

    /// 1‑based line where the error occurred.
    pub line: usize,

    /// Empty, `" at end"` or `" at 'lexeme'"`.
    pub location: String,

    /// Human‑readable description.
    pub message: String,
}

impl Diagnostic {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Lex error: line={}, msg={}", line, message);

        Diagnostic {
            phase: Phase::Lex,
            line,
            location: String::new(),
            message,
        }
    }

    /// Helper constructor for the **parser**.
    pub fn parse<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Parse error: line={}, msg={}", token.line, message);

        Diagnostic {
            phase: Phase::Parse,
            line: token.line,
            location: location_of(token),
            message,
        }
    }

    /// Helper constructor for the **resolver**.
    pub fn resolve<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Resolve error: line={}, msg={}", token.line, message);

        Diagnostic {
            phase: Phase::Resolve,
            line: token.line,
            location: location_of(token),
            message,
        }
    }
}

fn location_of(token: &Token) -> String {
    if token.token_type == TokenType::EOF {
        " at end".to_string()
    } else {
        format!(" at '{}'", token.lexeme)
    }
}

/// Ordered accumulator of compile‑time diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    /// `Ok(value)` when nothing was reported, otherwise the diagnostics.
    pub fn into_result<T>(self, value: T) -> std::result::Result<T, Diagnostics> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl<'d> IntoIterator for &'d Diagnostics {
    type Item = &'d Diagnostic;
    type IntoIter = std::slice::Iter<'d, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", diagnostic)?;
        }

        Ok(())
    }
}

/// Fatal evaluation error attributed to the offending token's line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}\n[line {line}]")]
pub struct RuntimeError {
    pub message: String,
    pub line: usize,
}

impl RuntimeError {
    pub fn new<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Runtime error: line={}, msg={}", token.line, message);

        RuntimeError {
            message,
            line: token.line,
        }
    }
}

/// Canonical error type used throughout the interpreter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoxError {
    /// One or more scan, parse or resolution diagnostics; nothing was executed.
    #[error("{0}")]
    Compile(Diagnostics),

    /// The first runtime error; execution stopped there.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// Wrapper around `std::io::Error` (transparent).  Enables `?` on I/O ops.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<Diagnostics> for LoxError {
    fn from(diagnostics: Diagnostics) -> Self {
        LoxError::Compile(diagnostics)
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, LoxError>;
