//! The front‑to‑back pipeline: source → tokens → statements → resolved
//! program → execution.
//!
//! Each phase only runs if the previous one reported nothing.  Scan and
//! parse diagnostics are reported together (the parser still runs over the
//! tokens that did scan); resolution diagnostics are reported on their own.

use std::io::Write;

use log::{debug, info};

use crate::ast::Stmt;
use crate::error::{Diagnostics, Result};
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;
use crate::scanner::scan_tokens;

/// A session.  Globals persist across [`Lox::run`] calls, which is what the
/// interactive prompt relies on.
pub struct Lox {
    interpreter: Interpreter,
}

impl Default for Lox {
    fn default() -> Self {
        Self::new()
    }
}

impl Lox {
    /// Session printing to standard output.
    pub fn new() -> Self {
        Self {
            interpreter: Interpreter::new(),
        }
    }

    /// Session printing to `out`.
    pub fn with_output(out: Box<dyn Write>) -> Self {
        Self {
            interpreter: Interpreter::with_output(out),
        }
    }

    /// Scan and parse `source` without running it.
    pub fn parse(source: &str) -> std::result::Result<Vec<Stmt>, Diagnostics> {
        let (tokens, mut diagnostics) = scan_tokens(source);

        match Parser::new(&tokens).parse() {
            Ok(statements) => diagnostics.into_result(statements),
            Err(parse_errors) => {
                diagnostics.extend(parse_errors);
                Err(diagnostics)
            }
        }
    }

    /// Run `source` to completion or to the first error.
    pub fn run(&mut self, source: &str) -> Result<()> {
        info!("Running {} bytes of source", source.len());

        let statements: Vec<Stmt> = Self::parse(source)?;
        debug!("Parsed {} statement(s)", statements.len());

        Resolver::new(&mut self.interpreter).resolve(&statements)?;

        self.interpreter.interpret(&statements)
    }
}
