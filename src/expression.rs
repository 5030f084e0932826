//! Arithmetic expression trees parsed from infix text
//!
//! Parses infix expressions over `f64` literals with the operators `+`,
//! `-`, `*`, `/`, `^` and parentheses into a binary tree. Parsing is the
//! shunting-yard algorithm: tokens stream into postfix order under
//! operator precedence (`^` above `*` `/` above `+` `-`), and the postfix
//! stream folds into a tree. All operators associate to the left,
//! including `^`.
//!
//! The tree evaluates with ordinary `f64` arithmetic (division by zero
//! yields an infinity, as f64 defines) and prints itself in infix, prefix,
//! or postfix notation.
//!
//! # Example
//!
//! ```rust
//! use cursor_collections::expression::ExpressionTree;
//!
//! let tree = ExpressionTree::parse("3 + 4 * 2")?;
//! assert_eq!(tree.evaluate(), 11.0);
//! assert_eq!(tree.to_postfix(), "3 4 2 * +");
//! assert_eq!(tree.to_infix(), "(3+(4*2))");
//! # Ok::<(), cursor_collections::ContainerError>(())
//! ```

use crate::traits::ContainerError;

/// The binary operators the parser understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            '^' => Some(Self::Pow),
            _ => None,
        }
    }

    fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Pow => '^',
        }
    }

    fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
            Self::Pow => 3,
        }
    }

    fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Sub => left - right,
            Self::Mul => left * right,
            Self::Div => left / right,
            Self::Pow => left.powf(right),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Operand(f64),
    Operator(BinaryOp),
    OpenParen,
    CloseParen,
}

#[derive(Debug)]
enum ExprNode {
    Operand(f64),
    Operator(BinaryOp, Box<ExprNode>, Box<ExprNode>),
}

/// A parsed arithmetic expression
#[derive(Debug)]
pub struct ExpressionTree {
    root: ExprNode,
}

impl ExpressionTree {
    /// Parses an infix expression
    ///
    /// # Errors
    /// [`ContainerError::InvalidArgument`] for malformed literals,
    /// unrecognized characters, unbalanced parentheses, or operators
    /// missing an operand.
    pub fn parse(text: &str) -> Result<Self, ContainerError> {
        let tokens = Self::tokenize(text)?;
        let postfix = Self::shunt(&tokens)?;
        let root = Self::fold(&postfix)?;
        Ok(Self { root })
    }

    /// Evaluates the expression with `f64` arithmetic
    pub fn evaluate(&self) -> f64 {
        Self::eval_node(&self.root)
    }

    /// Renders the expression fully parenthesized in infix order
    pub fn to_infix(&self) -> String {
        let mut out = String::new();
        Self::write_infix(&self.root, &mut out);
        out
    }

    /// Renders the expression in prefix order, space separated
    pub fn to_prefix(&self) -> String {
        let mut out = String::new();
        Self::write_prefix(&self.root, &mut out);
        out
    }

    /// Renders the expression in postfix order, space separated
    pub fn to_postfix(&self) -> String {
        let mut out = String::new();
        Self::write_postfix(&self.root, &mut out);
        out
    }

    fn tokenize(text: &str) -> Result<Vec<Token>, ContainerError> {
        let mut tokens = Vec::new();
        let mut chars = text.chars().peekable();
        while let Some(&c) = chars.peek() {
            if c.is_whitespace() {
                chars.next();
                continue;
            }
            if c.is_ascii_digit() || c == '.' {
                let mut literal = String::new();
                while let Some(&d) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        literal.push(d);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value: f64 = literal.parse().map_err(|_| {
                    ContainerError::InvalidArgument("malformed numeric literal")
                })?;
                tokens.push(Token::Operand(value));
                continue;
            }
            chars.next();
            let token = match c {
                '(' => Token::OpenParen,
                ')' => Token::CloseParen,
                _ => match BinaryOp::from_char(c) {
                    Some(op) => Token::Operator(op),
                    None => {
                        return Err(ContainerError::InvalidArgument(
                            "unrecognized character in expression",
                        ))
                    }
                },
            };
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Shunting-yard: reorders infix tokens into postfix
    fn shunt(tokens: &[Token]) -> Result<Vec<Token>, ContainerError> {
        let mut output = Vec::with_capacity(tokens.len());
        let mut stack: Vec<Token> = Vec::new();
        for &token in tokens {
            match token {
                Token::Operand(_) => output.push(token),
                Token::Operator(op) => {
                    // Left associativity: equal precedence pops too.
                    while let Some(&Token::Operator(top)) = stack.last() {
                        if top.precedence() < op.precedence() {
                            break;
                        }
                        stack.pop();
                        output.push(Token::Operator(top));
                    }
                    stack.push(token);
                }
                Token::OpenParen => stack.push(token),
                Token::CloseParen => loop {
                    match stack.pop() {
                        Some(Token::OpenParen) => break,
                        Some(op @ Token::Operator(_)) => output.push(op),
                        _ => {
                            return Err(ContainerError::InvalidArgument(
                                "unmatched closing parenthesis",
                            ))
                        }
                    }
                },
            }
        }
        while let Some(token) = stack.pop() {
            match token {
                Token::Operator(_) => output.push(token),
                _ => {
                    return Err(ContainerError::InvalidArgument(
                        "unmatched opening parenthesis",
                    ))
                }
            }
        }
        Ok(output)
    }

    /// Folds a postfix token stream into a tree
    fn fold(postfix: &[Token]) -> Result<ExprNode, ContainerError> {
        let mut stack: Vec<ExprNode> = Vec::new();
        for &token in postfix {
            match token {
                Token::Operand(v) => stack.push(ExprNode::Operand(v)),
                Token::Operator(op) => {
                    let right = stack
                        .pop()
                        .ok_or(ContainerError::InvalidArgument("operator is missing an operand"))?;
                    let left = stack
                        .pop()
                        .ok_or(ContainerError::InvalidArgument("operator is missing an operand"))?;
                    stack.push(ExprNode::Operator(op, Box::new(left), Box::new(right)));
                }
                _ => unreachable!("parentheses are resolved during shunting"),
            }
        }
        let root = stack
            .pop()
            .ok_or(ContainerError::InvalidArgument("expression is empty"))?;
        if !stack.is_empty() {
            return Err(ContainerError::InvalidArgument(
                "expression has dangling operands",
            ));
        }
        Ok(root)
    }

    fn eval_node(node: &ExprNode) -> f64 {
        match node {
            ExprNode::Operand(v) => *v,
            ExprNode::Operator(op, left, right) => {
                op.apply(Self::eval_node(left), Self::eval_node(right))
            }
        }
    }

    fn write_infix(node: &ExprNode, out: &mut String) {
        match node {
            ExprNode::Operand(v) => out.push_str(&v.to_string()),
            ExprNode::Operator(op, left, right) => {
                out.push('(');
                Self::write_infix(left, out);
                out.push(op.symbol());
                Self::write_infix(right, out);
                out.push(')');
            }
        }
    }

    fn write_prefix(node: &ExprNode, out: &mut String) {
        if !out.is_empty() {
            out.push(' ');
        }
        match node {
            ExprNode::Operand(v) => out.push_str(&v.to_string()),
            ExprNode::Operator(op, left, right) => {
                out.push(op.symbol());
                Self::write_prefix(left, out);
                Self::write_prefix(right, out);
            }
        }
    }

    fn write_postfix(node: &ExprNode, out: &mut String) {
        match node {
            ExprNode::Operand(v) => {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(&v.to_string());
            }
            ExprNode::Operator(op, left, right) => {
                Self::write_postfix(left, out);
                Self::write_postfix(right, out);
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push(op.symbol());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence() {
        let tree = ExpressionTree::parse("3+4*2").unwrap();
        assert_eq!(tree.evaluate(), 11.0);
        assert_eq!(tree.to_infix(), "(3+(4*2))");
        assert_eq!(tree.to_prefix(), "+ 3 * 4 2");
        assert_eq!(tree.to_postfix(), "3 4 2 * +");
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let tree = ExpressionTree::parse("(3+4)*2").unwrap();
        assert_eq!(tree.evaluate(), 14.0);
        assert_eq!(tree.to_infix(), "((3+4)*2)");
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(ExpressionTree::parse("10-4-3").unwrap().evaluate(), 3.0);
        assert_eq!(ExpressionTree::parse("16/4/2").unwrap().evaluate(), 2.0);
        // ^ associates left like everything else here.
        assert_eq!(ExpressionTree::parse("2^3^2").unwrap().evaluate(), 64.0);
    }

    #[test]
    fn test_power_binds_tightest() {
        assert_eq!(ExpressionTree::parse("2*3^2").unwrap().evaluate(), 18.0);
        assert_eq!(ExpressionTree::parse("2^3*2").unwrap().evaluate(), 16.0);
    }

    #[test]
    fn test_decimals_and_whitespace() {
        assert_eq!(ExpressionTree::parse(" 2.5 * 4 ").unwrap().evaluate(), 10.0);
        assert_eq!(ExpressionTree::parse("7/2").unwrap().evaluate(), 3.5);
        assert_eq!(ExpressionTree::parse("12+3").unwrap().evaluate(), 15.0);
    }

    #[test]
    fn test_division_by_zero_is_infinite() {
        assert!(ExpressionTree::parse("1/0").unwrap().evaluate().is_infinite());
    }

    #[test]
    fn test_single_operand() {
        let tree = ExpressionTree::parse("42").unwrap();
        assert_eq!(tree.evaluate(), 42.0);
        assert_eq!(tree.to_infix(), "42");
        assert_eq!(tree.to_prefix(), "42");
        assert_eq!(tree.to_postfix(), "42");
    }

    #[test]
    fn test_infix_output_reparses_to_same_value() {
        let tree = ExpressionTree::parse("2^3 + 14/(6-4) * 3").unwrap();
        let reparsed = ExpressionTree::parse(&tree.to_infix()).unwrap();
        assert_eq!(tree.evaluate(), reparsed.evaluate());
        assert_eq!(tree.evaluate(), 29.0);
    }

    #[test]
    fn test_parse_rejections() {
        for text in ["", "2+", "+2", "(2+3", "2+3)", "2$3", "1..2", "2 3"] {
            assert!(
                matches!(
                    ExpressionTree::parse(text),
                    Err(ContainerError::InvalidArgument(_))
                ),
                "{text:?} should not parse"
            );
        }
    }
}
