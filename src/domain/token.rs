//! Tokens of a prefix-notation arithmetic expression.

use std::fmt;

use tracing::trace;

/// Binary operator tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl Operator {
    pub const ALL: [Operator; 6] = [
        Operator::Add,
        Operator::Sub,
        Operator::Mul,
        Operator::Div,
        Operator::Mod,
        Operator::Pow,
    ];

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            '%' => Some(Operator::Mod),
            '^' => Some(Operator::Pow),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
            Operator::Mod => '%',
            Operator::Pow => '^',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A single digit operand or an operator, in left-to-right input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Digit(u8),
    Op(Operator),
}

impl Token {
    pub fn from_char(c: char) -> Option<Self> {
        if let Some(d) = c.to_digit(10) {
            // to_digit(10) yields 0..=9
            return Some(Token::Digit(d as u8));
        }
        Operator::from_symbol(c).map(Token::Op)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Digit(d) => write!(f, "{}", d),
            Token::Op(op) => write!(f, "{}", op),
        }
    }
}

/// Splits raw input into tokens.
///
/// Digits and the six operator symbols are recognised, everything else
/// (whitespace, newlines, stray characters) is skipped.
pub fn tokenize(input: &str) -> Vec<Token> {
    let tokens: Vec<Token> = input.chars().filter_map(Token::from_char).collect();
    trace!("tokenize: {} chars -> {} tokens", input.len(), tokens.len());
    tokens
}
