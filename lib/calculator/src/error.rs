use derive_more::Display;
use strum_macros::{AsRefStr, EnumString};

use telemetry::IsErr;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
    #[display(fmt = "Division by zero")]
    DivisionByZero,
    #[display(fmt = "Integer overflow")]
    Overflow,
}
impl std::error::Error for ArithmeticError {}

/// The category of an [`EvalError`]
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    UnexpectedCharacter,
    MalformedNumeral,
    UnbalancedGrouping,
    DivisionByZero,
    Overflow,
    DepthExceeded,
}

/// Positions are byte offsets into the evaluated expression
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[display(fmt = "Unexpected character {:?} at {}", found, position)]
    UnexpectedCharacter { found: char, position: usize },

    #[display(fmt = "Unexpected end of expression at {}", position)]
    UnexpectedEnd { position: usize },

    #[display(fmt = "Numeral at {} has no digits", position)]
    MalformedNumeral { position: usize },

    #[display(fmt = "Numeral at {} is out of range", position)]
    NumeralOutOfRange { position: usize },

    #[display(fmt = "Unmatched closing parenthesis at {}", position)]
    UnmatchedClose { position: usize },

    #[display(fmt = "{} unclosed parenthesis group(s)", depth)]
    Unclosed { depth: usize },

    #[display(fmt = "Division by zero at {}", position)]
    DivisionByZero { position: usize },

    #[display(fmt = "Integer overflow at {}", position)]
    Overflow { position: usize },

    #[display(fmt = "Nesting depth limit of {} exceeded at {}", limit, position)]
    DepthExceeded { limit: usize, position: usize },
}
impl std::error::Error for EvalError {}

impl EvalError {
    pub(crate) fn arithmetic(e: ArithmeticError, position: usize) -> Self {
        match e {
            ArithmeticError::DivisionByZero => EvalError::DivisionByZero { position },
            ArithmeticError::Overflow => EvalError::Overflow { position },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::UnexpectedCharacter { .. } | EvalError::UnexpectedEnd { .. } => {
                ErrorKind::UnexpectedCharacter
            }
            EvalError::MalformedNumeral { .. } => ErrorKind::MalformedNumeral,
            EvalError::UnmatchedClose { .. } | EvalError::Unclosed { .. } => {
                ErrorKind::UnbalancedGrouping
            }
            EvalError::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            EvalError::NumeralOutOfRange { .. } | EvalError::Overflow { .. } => {
                ErrorKind::Overflow
            }
            EvalError::DepthExceeded { .. } => ErrorKind::DepthExceeded,
        }
    }
}

// Malformed input is the caller's problem and isn't recorded as a failure
impl IsErr for EvalError {
    fn is_err(&self) -> bool {
        !matches!(
            self.kind(),
            ErrorKind::UnexpectedCharacter
                | ErrorKind::MalformedNumeral
                | ErrorKind::UnbalancedGrouping
        )
    }
}
