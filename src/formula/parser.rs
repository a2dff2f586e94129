//! Recursive-descent formula parser
//!
//! Three precedence levels plus exponentiation:
//! - `parse_expression`: `+`, `-`
//! - `parse_term`: `*`, `/`
//! - `parse_unary`: unary minus
//! - `parse_power`: `^`, right-associative
//! - `parse_primary`: literals, variables, calls, grouping

use crate::formula::ast::{BinaryOp, Expr, Func, Var};
use crate::formula::eval::EvalError;
use crate::formula::token::{tokenize, Token};

/// Parse a formula string into an expression tree
pub fn parse(input: &str) -> Result<Expr, EvalError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(EvalError::Syntax("empty formula".to_string()));
    }

    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_expression()?;
    if let Some(token) = parser.peek() {
        return Err(EvalError::Syntax(format!(
            "unexpected trailing input at {token:?}"
        )));
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: Token) -> Result<(), EvalError> {
        match self.advance() {
            Some(token) if token == expected => Ok(()),
            Some(token) => Err(EvalError::Syntax(format!(
                "expected {expected:?}, found {token:?}"
            ))),
            None => Err(EvalError::Syntax(format!(
                "expected {expected:?}, found end of formula"
            ))),
        }
    }

    fn parse_expression(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.parse_term()?;
        while let Some(op) = match self.peek() {
            Some(Token::Plus) => Some(BinaryOp::Add),
            Some(Token::Minus) => Some(BinaryOp::Sub),
            _ => None,
        } {
            self.advance();
            let rhs = self.parse_term()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_term(&mut self) -> Result<Expr, EvalError> {
        let mut lhs = self.parse_unary()?;
        while let Some(op) = match self.peek() {
            Some(Token::Star) => Some(BinaryOp::Mul),
            Some(Token::Slash) => Some(BinaryOp::Div),
            _ => None,
        } {
            self.advance();
            let rhs = self.parse_unary()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr, EvalError> {
        if matches!(self.peek(), Some(Token::Minus)) {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expr::Neg(Box::new(operand)));
        }
        self.parse_power()
    }

    fn parse_power(&mut self) -> Result<Expr, EvalError> {
        let base = self.parse_primary()?;
        if matches!(self.peek(), Some(Token::Caret)) {
            self.advance();
            // Right-associative; the exponent may carry its own unary minus
            let exponent = self.parse_unary()?;
            return Ok(Expr::Binary(
                BinaryOp::Pow,
                Box::new(base),
                Box::new(exponent),
            ));
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<Expr, EvalError> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(Expr::Number(value)),
            Some(Token::Ident(name)) => {
                if matches!(self.peek(), Some(Token::LParen)) {
                    let Some(func) = Func::from_name(&name) else {
                        return Err(EvalError::Syntax(format!("unknown function '{name}'")));
                    };
                    self.parse_call(func)
                } else {
                    match name.as_str() {
                        "level" | "x" => Ok(Expr::Var(Var::Level)),
                        "size" => Ok(Expr::Var(Var::Size)),
                        _ => Err(EvalError::UnknownIdentifier(name)),
                    }
                }
            }
            Some(Token::LParen) => {
                let inner = self.parse_expression()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Some(token) => Err(EvalError::Syntax(format!("unexpected {token:?}"))),
            None => Err(EvalError::Syntax("unexpected end of formula".to_string())),
        }
    }

    fn parse_call(&mut self, func: Func) -> Result<Expr, EvalError> {
        self.expect(Token::LParen)?;
        let mut args = vec![self.parse_expression()?];
        while matches!(self.peek(), Some(Token::Comma)) {
            self.advance();
            args.push(self.parse_expression()?);
        }
        self.expect(Token::RParen)?;

        if args.len() != func.arity() {
            return Err(EvalError::Syntax(format!(
                "{func:?} takes {} argument(s), found {}",
                func.arity(),
                args.len()
            )));
        }
        Ok(Expr::Call(func, args))
    }
}
