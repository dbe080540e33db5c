//! Recursive-descent parser producing an evaluable syntax tree.
//!
//! Precedence, loosest first:
//!
//! ```text
//! sum      := product (('+' | '-') product)*
//! product  := implicit (('*' | '/') implicit)*
//! implicit := unary primary_power*        (juxtaposition: 2x, 3(x+1))
//! unary    := ('+' | '-') unary | power
//! power    := primary ('^' unary)?        (right-associative)
//! primary  := number | name | name '(' args ')' | '(' sum ')'
//! ```

use std::collections::BTreeSet;

use super::function::{lookup_constant, power, Function};
use super::lexer::{SpannedToken, Token};
use crate::error::ExprError;

/// Deepest nesting of parentheses, signs and exponents accepted by [`parse`].
pub const MAX_DEPTH: usize = 64;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Syntax tree node. Constants are folded into [`Node::Number`] while parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Number(f64),
    Variable(String),
    Neg(Box<Node>),
    Binary(BinaryOp, Box<Node>, Box<Node>),
    Call(Function, Vec<Node>),
}

impl Node {
    /// Evaluates the tree. `lookup` resolves free variables; `None` means unbound.
    pub fn eval(&self, lookup: &dyn Fn(&str) -> Option<f64>) -> Option<f64> {
        let value = match self {
            Node::Number(v) => *v,
            Node::Variable(name) => lookup(name)?,
            Node::Neg(inner) => -inner.eval(lookup)?,
            Node::Binary(op, lhs, rhs) => {
                let a = lhs.eval(lookup)?;
                let b = rhs.eval(lookup)?;
                match op {
                    BinaryOp::Add => a + b,
                    BinaryOp::Sub => a - b,
                    BinaryOp::Mul => a * b,
                    BinaryOp::Div => a / b,
                    BinaryOp::Pow => power(a, b),
                }
            }
            Node::Call(func, args) => {
                let values = args
                    .iter()
                    .map(|arg| arg.eval(lookup))
                    .collect::<Option<Vec<_>>>()?;
                func.apply(&values)
            }
        };
        Some(value)
    }

    /// Collects the names of all free variables.
    pub fn collect_variables<'a>(&'a self, out: &mut BTreeSet<&'a str>) {
        match self {
            Node::Number(_) => {}
            Node::Variable(name) => {
                out.insert(name.as_str());
            }
            Node::Neg(inner) => inner.collect_variables(out),
            Node::Binary(_, lhs, rhs) => {
                lhs.collect_variables(out);
                rhs.collect_variables(out);
            }
            Node::Call(_, args) => {
                for arg in args {
                    arg.collect_variables(out);
                }
            }
        }
    }
}

/// Parses a token stream into a syntax tree.
///
/// # Errors
///
/// Returns an [`ExprError`] describing the first syntax problem found, or
/// [`ExprError::TooDeep`] past [`MAX_DEPTH`] nested levels.
pub fn parse(tokens: &[SpannedToken]) -> Result<Node, ExprError> {
    if tokens.is_empty() {
        return Err(ExprError::Empty);
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let node = parser.sum()?;
    match parser.peek() {
        None => Ok(node),
        Some(tok) => Err(parser.unexpected(tok)),
    }
}

struct Parser<'a> {
    tokens: &'a [SpannedToken],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&SpannedToken> {
        self.tokens.get(self.pos)
    }

    fn peek_token(&self) -> Option<&Token> {
        self.peek().map(|t| &t.token)
    }

    fn advance(&mut self) -> Option<&SpannedToken> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek_token() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<(), ExprError> {
        if self.eat(expected) {
            return Ok(());
        }
        match self.peek() {
            Some(tok) => Err(self.unexpected(tok)),
            None => Err(ExprError::UnexpectedEnd),
        }
    }

    fn unexpected(&self, tok: &SpannedToken) -> ExprError {
        ExprError::UnexpectedToken {
            found: tok.token.to_string(),
            offset: tok.offset,
        }
    }

    fn sum(&mut self) -> Result<Node, ExprError> {
        let mut node = self.product()?;
        loop {
            let op = match self.peek_token() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => return Ok(node),
            };
            self.pos += 1;
            let rhs = self.product()?;
            node = Node::Binary(op, Box::new(node), Box::new(rhs));
        }
    }

    fn product(&mut self) -> Result<Node, ExprError> {
        let mut node = self.implicit()?;
        loop {
            let op = match self.peek_token() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                _ => return Ok(node),
            };
            self.pos += 1;
            let rhs = self.implicit()?;
            node = Node::Binary(op, Box::new(node), Box::new(rhs));
        }
    }

    fn implicit(&mut self) -> Result<Node, ExprError> {
        let mut node = self.unary()?;
        while matches!(
            self.peek_token(),
            Some(Token::Number(_) | Token::Ident(_) | Token::LParen)
        ) {
            let rhs = self.power()?;
            node = Node::Binary(BinaryOp::Mul, Box::new(node), Box::new(rhs));
        }
        Ok(node)
    }

    /// Every nested sub-expression passes through here, so this is where
    /// recursion depth is bounded.
    fn unary(&mut self) -> Result<Node, ExprError> {
        if self.depth >= MAX_DEPTH {
            return Err(ExprError::TooDeep { max: MAX_DEPTH });
        }
        self.depth += 1;
        let node = self.signed();
        self.depth -= 1;
        node
    }

    fn signed(&mut self) -> Result<Node, ExprError> {
        if self.eat(&Token::Minus) {
            return Ok(Node::Neg(Box::new(self.unary()?)));
        }
        if self.eat(&Token::Plus) {
            return self.unary();
        }
        self.power()
    }

    fn power(&mut self) -> Result<Node, ExprError> {
        let base = self.primary()?;
        if self.eat(&Token::Caret) {
            let exponent = self.unary()?;
            return Ok(Node::Binary(BinaryOp::Pow, Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Node, ExprError> {
        let Some(tok) = self.advance().cloned() else {
            return Err(ExprError::UnexpectedEnd);
        };
        match tok.token {
            Token::Number(v) => Ok(Node::Number(v)),
            Token::LParen => {
                let inner = self.sum()?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            Token::Ident(name) => self.named(name),
            _ => Err(self.unexpected(&tok)),
        }
    }

    fn named(&mut self, name: String) -> Result<Node, ExprError> {
        if let Some(func) = Function::lookup(&name) {
            self.expect(&Token::LParen)?;
            let args = self.arguments()?;
            func.check_arity(args.len())?;
            return Ok(Node::Call(func, args));
        }
        if let Some(value) = lookup_constant(&name) {
            return Ok(Node::Number(value));
        }
        if self.peek_token() == Some(&Token::LParen) && name.len() > 1 {
            return Err(ExprError::UnknownFunction(name));
        }
        Ok(Node::Variable(name))
    }

    fn arguments(&mut self) -> Result<Vec<Node>, ExprError> {
        let mut args = Vec::new();
        if self.eat(&Token::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.sum()?);
            if self.eat(&Token::Comma) {
                continue;
            }
            self.expect(&Token::RParen)?;
            return Ok(args);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::expr::lexer::tokenize;

    fn eval_at(src: &str, x: f64) -> f64 {
        let node = parse(&tokenize(src).unwrap()).unwrap();
        node.eval(&|name| (name == "x").then_some(x)).unwrap()
    }

    fn parse_err(src: &str) -> ExprError {
        parse(&tokenize(src).unwrap()).unwrap_err()
    }

    #[test]
    fn precedence_and_associativity() {
        assert!((eval_at("1 + 2 * 3", 0.0) - 7.0).abs() < 1e-12);
        assert!((eval_at("2 ^ 3 ^ 2", 0.0) - 512.0).abs() < 1e-12);
        assert!((eval_at("-x^2", 3.0) + 9.0).abs() < 1e-12);
        assert!((eval_at("2^-1", 0.0) - 0.5).abs() < 1e-12);
        assert!((eval_at("10 - 4 - 3", 0.0) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn deep_nesting_is_an_error() {
        let nested = format!("{}x{}", "(".repeat(10_000), ")".repeat(10_000));
        assert_eq!(parse_err(&nested), ExprError::TooDeep { max: MAX_DEPTH });
        let signs = format!("{}x", "-".repeat(10_000));
        assert_eq!(parse_err(&signs), ExprError::TooDeep { max: MAX_DEPTH });
        let towers = format!("2{}", "^2".repeat(10_000));
        assert_eq!(parse_err(&towers), ExprError::TooDeep { max: MAX_DEPTH });
        let calls = format!("{}x{}", "sin(".repeat(10_000), ")".repeat(10_000));
        assert_eq!(parse_err(&calls), ExprError::TooDeep { max: MAX_DEPTH });
    }

    #[test]
    fn moderate_nesting_is_accepted() {
        let nested = format!("{}x{}", "(".repeat(20), ")".repeat(20));
        assert!((eval_at(&nested, 3.0) - 3.0).abs() < 1e-12);
        assert!((eval_at("--x", 2.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn implicit_multiplication() {
        assert!((eval_at("2x", 3.0) - 6.0).abs() < 1e-12);
        assert!((eval_at("3(x + 1)", 1.0) - 6.0).abs() < 1e-12);
        assert!((eval_at("x(x + 1)", 2.0) - 6.0).abs() < 1e-12);
        assert!((eval_at("(x + 1)(x - 1)", 3.0) - 8.0).abs() < 1e-12);
        assert!((eval_at("2x^2", 3.0) - 18.0).abs() < 1e-12);
        assert!((eval_at("1/2x", 2.0) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn functions_and_constants_resolve() {
        assert!((eval_at("sin(pi / 2)", 0.0) - 1.0).abs() < 1e-12);
        assert!((eval_at("max(1, x, 3)", 5.0) - 5.0).abs() < 1e-12);
        assert!((eval_at("2pi", 0.0) - std::f64::consts::TAU).abs() < 1e-12);
    }

    #[test]
    fn unbound_variables_propagate_none() {
        let node = parse(&tokenize("y + 1").unwrap()).unwrap();
        assert_eq!(node.eval(&|_| None), None);
    }

    #[test]
    fn syntax_errors() {
        assert_eq!(parse_err("(x + 1"), ExprError::UnexpectedEnd);
        assert!(matches!(parse_err("x + * 2"), ExprError::UnexpectedToken { .. }));
        assert!(matches!(parse_err("foo(2)"), ExprError::UnknownFunction(_)));
        assert!(matches!(parse_err("sin(1, 2)"), ExprError::Arity { .. }));
        assert!(matches!(parse_err("sin x"), ExprError::UnexpectedToken { .. }));
    }

    #[test]
    fn collects_free_variables() {
        let node = parse(&tokenize("x * y + sin(x) + pi").unwrap()).unwrap();
        let mut vars = BTreeSet::new();
        node.collect_variables(&mut vars);
        assert_eq!(vars.into_iter().collect::<Vec<_>>(), vec!["x", "y"]);
    }
}
