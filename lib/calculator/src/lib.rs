//! Evaluates integer arithmetic expressions without operator precedence.
//!
//! Operators are applied strictly left to right and parentheses force their
//! contents to be resolved first, so `4 - 3 * 5` is `(4 - 3) * 5 = 5`.
//! Numerals may carry a leading `-`, whitespace between tokens is ignored.
#[macro_use]
extern crate lazy_static;

use log::debug;

use telemetry::Measure;

pub use config::EvaluatorConfig;
pub use error::{ArithmeticError, ErrorKind, EvalError};
pub use operator::Operator;

use scanner::Scanner;

mod config;
mod error;
mod operator;
mod scanner;

lazy_static! {
    static ref EVALUATE_MEASURE: Measure = Measure::new("evaluator", "evaluate");
}

/// Evaluates `expression` with the default configuration
pub fn evaluate(expression: &str) -> Result<i32, EvalError> {
    Evaluator::default().evaluate(expression)
}

/// Holds no state between calls and may be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvaluatorConfig,
}

impl Evaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Evaluator { config }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    pub fn evaluate(&self, expression: &str) -> Result<i32, EvalError> {
        let result = EVALUATE_MEASURE.stats(|| Scanner::new(&self.config).run(expression));
        match &result {
            Ok(value) => debug!("evaluated {:?} to {}", expression, value),
            Err(e) => debug!(
                "rejected {:?} ({}): {}",
                expression,
                e.kind().as_ref(),
                e
            ),
        }
        result
    }
}
