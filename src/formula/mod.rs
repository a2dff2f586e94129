//! Safe evaluation of designer-authored growth formulas
//!
//! Formulas are parsed into an AST by a recursive-descent parser over a
//! closed grammar: numeric literals, the `level`/`x` and `size` bindings,
//! `+ - * / ^`, parentheses, unary minus, and a short function whitelist.
//! A formula string can produce a number or an error, never host code.

pub mod ast;
pub mod eval;
pub mod parser;
pub mod token;

pub use eval::{evaluate, Bindings, EvalError};
