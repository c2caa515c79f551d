//! # Modeling Scripts
//!
//! A small expression language for building solids from text. Evaluation is
//! sandboxed: the only capability in scope is the [`ShapeBuilder`] handed to
//! [`evaluate`], there is no I/O and no looping, so every script terminates.
//! Expressions may nest at most [`parser::MAX_DEPTH`] levels deep.
//!
//! ```text
//! # comments start with '#'
//! let plate = box(40, 30, 5)
//! let hole = cylinder(4, 10, centered = true)
//! result = difference(plate, translate(hole, 10, 0, 0))
//! ```
//!
//! ## Built-ins
//! - `box(width, length, height, centered = true)`
//! - `cylinder(radius, height, centered = true)`
//! - `union(a, b, ...)`, `difference(a, b, ...)` (`subtract`, `cut`),
//!   `intersection(a, b, ...)` (`intersect`)
//! - `translate(shape, x, y, z)`
//! - constants `pi`, `true`, `false`
//!
//! The script must bind `result` to a shape.

pub mod eval;
pub mod lexer;
pub mod parser;

use solidforge_core::{GeometryHandle, ModelingError, Result, ShapeBuilder};
use std::fmt;

/// Name the script must bind its output to.
pub const RESULT_BINDING: &str = "result";

/// Position in the script source, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A located script failure, converted to [`ModelingError::Script`] at the edge.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptFailure {
    pub span: Span,
    pub message: String,
}

impl ScriptFailure {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }
}

impl From<ScriptFailure> for ModelingError {
    fn from(failure: ScriptFailure) -> Self {
        ModelingError::script(format!("{}: {}", failure.span, failure.message))
    }
}

/// Run `source` with `builder` as its only capability and return `result`.
pub fn evaluate<B>(source: &str, builder: &B) -> Result<GeometryHandle>
where
    B: ShapeBuilder + ?Sized,
{
    let tokens = lexer::tokenize(source)?;
    let program = parser::parse(tokens)?;
    eval::Interpreter::new(builder).run(&program)
}
