//! AST evaluation against a variable binding

use crate::formula::ast::{BinaryOp, Expr, Func, Var};
use crate::formula::parser::parse;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("Unknown identifier: {0}")]
    UnknownIdentifier(String),

    #[error("Domain error: {0}")]
    Domain(String),
}

/// Values bound to the grammar's free variables
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bindings {
    /// Bound to `level` and its alias `x`
    pub level: f64,
    pub size: f64,
}

impl Bindings {
    pub fn new(level: f64, size: f64) -> Self {
        Self { level, size }
    }

    /// Binding with only the level set, for exp-curve formulas
    pub fn for_level(level: f64) -> Self {
        Self { level, size: 0.0 }
    }
}

/// Parse and evaluate a formula string
///
/// Returns the raw numeric result; callers that need integer experience
/// floor it themselves. Non-finite and NaN results are domain errors.
pub fn evaluate(formula: &str, bindings: &Bindings) -> Result<f64, EvalError> {
    let expr = parse(formula)?;
    let value = eval_expr(&expr, bindings)?;
    if !value.is_finite() {
        return Err(EvalError::Domain(format!(
            "formula produced a non-finite result ({value})"
        )));
    }
    Ok(value)
}

fn eval_expr(expr: &Expr, bindings: &Bindings) -> Result<f64, EvalError> {
    match expr {
        Expr::Number(value) => Ok(*value),
        Expr::Var(Var::Level) => Ok(bindings.level),
        Expr::Var(Var::Size) => Ok(bindings.size),
        Expr::Neg(inner) => Ok(-eval_expr(inner, bindings)?),
        Expr::Binary(op, lhs, rhs) => {
            let a = eval_expr(lhs, bindings)?;
            let b = eval_expr(rhs, bindings)?;
            match op {
                BinaryOp::Add => Ok(a + b),
                BinaryOp::Sub => Ok(a - b),
                BinaryOp::Mul => Ok(a * b),
                BinaryOp::Div => {
                    if b == 0.0 {
                        return Err(EvalError::Domain("division by zero".to_string()));
                    }
                    Ok(a / b)
                }
                BinaryOp::Pow => Ok(a.powf(b)),
            }
        }
        Expr::Call(func, args) => {
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(eval_expr(arg, bindings)?);
            }
            Ok(apply(*func, &values))
        }
    }
}

fn apply(func: Func, args: &[f64]) -> f64 {
    match func {
        Func::Max => args[0].max(args[1]),
        Func::Min => args[0].min(args[1]),
        Func::Round => args[0].round(),
        Func::Floor => args[0].floor(),
        Func::Ceil => args[0].ceil(),
        Func::Sqrt => args[0].sqrt(),
    }
}
