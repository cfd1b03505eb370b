use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct EvaluatorConfig {
    // Maximum parenthesis nesting depth, unbounded if None
    pub max_depth: Option<usize>,
}
