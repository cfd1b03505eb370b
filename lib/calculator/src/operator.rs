use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumString};

use crate::error::ArithmeticError;

/// A binary operator. Operators carry no precedence, they are applied to the
/// running result strictly in the order they appear.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, AsRefStr, EnumString, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Subtract,
    #[strum(serialize = "*")]
    Multiply,
    #[strum(serialize = "/")]
    Divide,
}

// The first term of every group is added to an initial zero
impl Default for Operator {
    fn default() -> Self {
        Operator::Add
    }
}

impl Operator {
    pub fn from_char(c: char) -> Option<Operator> {
        let mut buf = [0; 4];
        Operator::from_str(c.encode_utf8(&mut buf)).ok()
    }

    /// Combines `lhs` and `rhs`, checking the divisor before dividing.
    ///
    /// Division truncates toward zero.
    pub fn apply(self, lhs: i32, rhs: i32) -> Result<i32, ArithmeticError> {
        let value = match self {
            Operator::Add => lhs.checked_add(rhs),
            Operator::Subtract => lhs.checked_sub(rhs),
            Operator::Multiply => lhs.checked_mul(rhs),
            Operator::Divide => {
                if rhs == 0 {
                    return Err(ArithmeticError::DivisionByZero);
                }
                lhs.checked_div(rhs)
            }
        };
        value.ok_or(ArithmeticError::Overflow)
    }
}
