use crate::graph::Operation;
use std::fmt;

/// One element of a flat calculator expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Operator(Operation),
}

impl Token {
    fn as_number(self) -> Option<f64> {
        match self {
            Token::Number(n) => Some(n),
            Token::Operator(_) => None,
        }
    }
}

impl From<f64> for Token {
    fn from(value: f64) -> Self {
        Token::Number(value)
    }
}

impl From<Operation> for Token {
    fn from(operation: Operation) -> Self {
        Token::Operator(operation)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", crate::graph::DisplayValue(Some(*n))),
            Token::Operator(op) => write!(f, "{}", op),
        }
    }
}

/// Evaluates `number (op number)*` with `×`/`÷` binding tighter than
/// `+`/`-`, left to right within a tier.
///
/// Returns `None` for an empty or malformed sequence, when any division
/// has an exact zero divisor, and when a reduction produces NaN.
pub fn eval_with_precedence(tokens: &[Token]) -> Option<f64> {
    if !is_well_formed(tokens) {
        return None;
    }

    let mut work = tokens.to_vec();
    for level in [1, 0] {
        // Each reduction rescans from the start so chained operators of the
        // same tier collapse left to right.
        while let Some(at) = first_operator_at(&work, level) {
            let Token::Operator(op) = work[at] else {
                return None;
            };
            let left = work[at - 1].as_number()?;
            let right = work[at + 1].as_number()?;
            let reduced = op.apply(left, right)?;
            work[at - 1] = Token::Number(reduced);
            work.remove(at);
            work.remove(at);
        }
    }

    match work.as_slice() {
        [Token::Number(n)] => Some(*n),
        _ => None,
    }
}

fn first_operator_at(work: &[Token], level: u8) -> Option<usize> {
    work.iter()
        .position(|t| matches!(t, Token::Operator(op) if op.precedence() == level))
}

fn is_well_formed(tokens: &[Token]) -> bool {
    tokens.len() % 2 == 1
        && tokens.iter().enumerate().all(|(i, t)| match t {
            Token::Number(_) => i % 2 == 0,
            Token::Operator(_) => i % 2 == 1,
        })
}
