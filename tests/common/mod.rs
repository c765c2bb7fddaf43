#![allow(dead_code)]

use rlox_tw::io::SharedBuffer;
use rlox_tw::{Lox, LoxError};

/// Run `source` in a fresh session, returning printed output and the outcome.
pub fn run(source: &str) -> (String, Result<(), LoxError>) {
    let buffer = SharedBuffer::new();
    let mut lox = Lox::with_output(Box::new(buffer.clone()));
    let result = lox.run(source);
    (buffer.contents(), result)
}

/// Printed lines of a program that must succeed.
pub fn output_lines(source: &str) -> Vec<String> {
    let (output, result) = run(source);
    if let Err(e) = result {
        panic!("program failed: {}\noutput so far:\n{}", e, output);
    }
    output.lines().map(str::to_string).collect()
}

/// Rendered compile diagnostics of a program that must be rejected.
pub fn compile_errors(source: &str) -> Vec<String> {
    let (output, result) = run(source);
    assert!(output.is_empty(), "rejected program printed: {}", output);
    match result {
        Err(LoxError::Compile(diagnostics)) => {
            diagnostics.iter().map(|d| d.to_string()).collect()
        }
        other => panic!("expected compile errors, got {:?}", other),
    }
}

/// Output before, and message/line of, the runtime error a program must hit.
pub fn runtime_error(source: &str) -> (String, String, usize) {
    let (output, result) = run(source);
    match result {
        Err(LoxError::Runtime(e)) => (output, e.message, e.line),
        other => panic!("expected a runtime error, got {:?}", other),
    }
}
