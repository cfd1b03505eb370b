use log::trace;

use crate::config::EvaluatorConfig;
use crate::error::EvalError;
use crate::operator::Operator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    // Expecting a numeral or an opening parenthesis
    AwaitingTerm,
    // Expecting an operator, a closing parenthesis or the end of input
    AwaitingOperatorOrClose,
    AccumulatingDigits,
}

/// The result and pending operator of an enclosing group, restored when the
/// innermost group closes.
#[derive(Debug, Clone, Copy)]
struct Frame {
    result: i32,
    operator: Operator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Symbol {
    Digit(char),
    Operator(Operator),
    Open,
    Close,
    Whitespace,
    End,
    Other(char),
}

impl Symbol {
    fn classify(c: Option<char>) -> Symbol {
        match c {
            None => Symbol::End,
            Some(c @ '0'..='9') => Symbol::Digit(c),
            Some('(') => Symbol::Open,
            Some(')') => Symbol::Close,
            Some(' ') | Some('\t') | Some('\r') | Some('\n') => Symbol::Whitespace,
            Some(c) => Operator::from_char(c)
                .map(Symbol::Operator)
                .unwrap_or(Symbol::Other(c)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Advance,
    // Feed the same character to the new state
    Redispatch,
    Accept,
}

fn unexpected(c: Option<char>, position: usize) -> EvalError {
    match c {
        Some(found) => EvalError::UnexpectedCharacter { found, position },
        None => EvalError::UnexpectedEnd { position },
    }
}

/// A single left-to-right pass over an expression, evaluating as it scans.
///
/// Each open parenthesis saves the current result and pending operator as a
/// [`Frame`] and starts the group from zero, so no recursion or lookahead is
/// needed.
pub(crate) struct Scanner<'a> {
    config: &'a EvaluatorConfig,
    state: State,
    numeral: String,
    numeral_start: usize,
    result: i32,
    operator: Operator,
    stack: Vec<Frame>,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(config: &'a EvaluatorConfig) -> Self {
        Scanner {
            config,
            state: State::AwaitingTerm,
            numeral: String::new(),
            numeral_start: 0,
            result: 0,
            operator: Operator::default(),
            stack: Vec::new(),
        }
    }

    pub(crate) fn run(mut self, expression: &str) -> Result<i32, EvalError> {
        let mut chars = expression.char_indices().peekable();
        loop {
            let (position, c) = match chars.peek() {
                Some(&(position, c)) => (position, Some(c)),
                None => (expression.len(), None),
            };

            match self.step(position, c)? {
                Step::Advance => {
                    chars.next();
                }
                Step::Redispatch => {}
                Step::Accept => return Ok(self.result),
            }
        }
    }

    fn step(&mut self, position: usize, c: Option<char>) -> Result<Step, EvalError> {
        let symbol = Symbol::classify(c);
        match self.state {
            State::AwaitingTerm => match symbol {
                Symbol::Digit(d) => self.start_numeral(d, position),
                Symbol::Operator(Operator::Subtract) => self.start_numeral('-', position),
                Symbol::Open => {
                    self.open_group(position)?;
                    Ok(Step::Advance)
                }
                Symbol::Whitespace => Ok(Step::Advance),
                _ => Err(unexpected(c, position)),
            },
            State::AccumulatingDigits => match symbol {
                Symbol::Digit(d) => {
                    self.numeral.push(d);
                    Ok(Step::Advance)
                }
                Symbol::Operator(_) | Symbol::Close | Symbol::End => {
                    self.close_numeral()?;
                    Ok(Step::Redispatch)
                }
                Symbol::Whitespace => {
                    self.close_numeral()?;
                    Ok(Step::Advance)
                }
                Symbol::Open | Symbol::Other(_) => Err(unexpected(c, position)),
            },
            State::AwaitingOperatorOrClose => match symbol {
                Symbol::Operator(op) => {
                    self.operator = op;
                    self.state = State::AwaitingTerm;
                    Ok(Step::Advance)
                }
                Symbol::Close => {
                    self.close_group(position)?;
                    Ok(Step::Advance)
                }
                Symbol::Whitespace => Ok(Step::Advance),
                Symbol::End => match self.stack.len() {
                    0 => Ok(Step::Accept),
                    depth => Err(EvalError::Unclosed { depth }),
                },
                Symbol::Digit(_) | Symbol::Open | Symbol::Other(_) => {
                    Err(unexpected(c, position))
                }
            },
        }
    }

    fn start_numeral(&mut self, c: char, position: usize) -> Result<Step, EvalError> {
        self.numeral.push(c);
        self.numeral_start = position;
        self.state = State::AccumulatingDigits;
        Ok(Step::Advance)
    }

    fn close_numeral(&mut self) -> Result<(), EvalError> {
        let position = self.numeral_start;
        if self.numeral == "-" {
            return Err(EvalError::MalformedNumeral { position });
        }

        // The buffer only ever holds an optional sign and digits
        let value: i32 = self
            .numeral
            .parse()
            .map_err(|_| EvalError::NumeralOutOfRange { position })?;

        self.result = self
            .operator
            .apply(self.result, value)
            .map_err(|e| EvalError::arithmetic(e, position))?;
        self.numeral.clear();
        self.state = State::AwaitingOperatorOrClose;
        Ok(())
    }

    fn open_group(&mut self, position: usize) -> Result<(), EvalError> {
        if let Some(limit) = self.config.max_depth {
            if self.stack.len() >= limit {
                return Err(EvalError::DepthExceeded { limit, position });
            }
        }

        self.stack.push(Frame {
            result: self.result,
            operator: self.operator,
        });
        self.result = 0;
        self.operator = Operator::default();
        trace!("opened group at {}, depth {}", position, self.stack.len());
        Ok(())
    }

    fn close_group(&mut self, position: usize) -> Result<(), EvalError> {
        let frame = self
            .stack
            .pop()
            .ok_or(EvalError::UnmatchedClose { position })?;

        let inner = self.result;
        self.result = frame
            .operator
            .apply(frame.result, inner)
            .map_err(|e| EvalError::arithmetic(e, position))?;
        trace!("closed group at {}, depth {}", position, self.stack.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(expression: &str) -> Result<i32, EvalError> {
        Scanner::new(&EvaluatorConfig::default()).run(expression)
    }

    #[test]
    fn test_classify() {
        assert_eq!(Symbol::classify(None), Symbol::End);
        assert_eq!(Symbol::classify(Some('7')), Symbol::Digit('7'));
        assert_eq!(
            Symbol::classify(Some('-')),
            Symbol::Operator(Operator::Subtract)
        );
        assert_eq!(Symbol::classify(Some('\t')), Symbol::Whitespace);
        assert_eq!(Symbol::classify(Some('\r')), Symbol::Whitespace);
        assert_eq!(Symbol::classify(Some(')')), Symbol::Close);
        assert_eq!(Symbol::classify(Some('x')), Symbol::Other('x'));
    }

    #[test]
    fn test_redispatch() -> Result<(), Box<dyn std::error::Error>> {
        let config = EvaluatorConfig::default();
        let mut scanner = Scanner::new(&config);

        assert_eq!(scanner.step(0, Some('4'))?, Step::Advance);
        assert_eq!(scanner.state, State::AccumulatingDigits);

        // The operator ends the numeral and is then handled as an operator
        assert_eq!(scanner.step(1, Some('*'))?, Step::Redispatch);
        assert_eq!(scanner.state, State::AwaitingOperatorOrClose);
        assert_eq!(scanner.result, 4);

        assert_eq!(scanner.step(1, Some('*'))?, Step::Advance);
        assert_eq!(scanner.state, State::AwaitingTerm);
        assert_eq!(scanner.operator, Operator::Multiply);
        Ok(())
    }

    #[test]
    fn test_frames() -> Result<(), Box<dyn std::error::Error>> {
        let config = EvaluatorConfig::default();
        let mut scanner = Scanner::new(&config);

        for (position, c) in "2 * (".char_indices() {
            scanner.step(position, Some(c))?;
        }
        assert_eq!(scanner.stack.len(), 1);
        assert_eq!(scanner.stack[0].result, 2);
        assert_eq!(scanner.stack[0].operator, Operator::Multiply);
        assert_eq!(scanner.result, 0);
        assert_eq!(scanner.operator, Operator::Add);
        Ok(())
    }

    #[test]
    fn test_whitespace_ends_numeral() {
        assert_eq!(
            scan("1 2"),
            Err(EvalError::UnexpectedCharacter {
                found: '2',
                position: 2
            })
        );
        assert_eq!(scan("12\n"), Ok(12));
        assert_eq!(scan(" \t 12 \r\n+ 3 "), Ok(15));
    }

    #[test]
    fn test_error_positions() {
        assert_eq!(scan(""), Err(EvalError::UnexpectedEnd { position: 0 }));
        assert_eq!(scan("1 +"), Err(EvalError::UnexpectedEnd { position: 3 }));
        assert_eq!(
            scan("-(12)"),
            Err(EvalError::UnexpectedCharacter {
                found: '(',
                position: 1
            })
        );
        assert_eq!(
            scan("()"),
            Err(EvalError::UnexpectedCharacter {
                found: ')',
                position: 1
            })
        );
        assert_eq!(scan("1 - -"), Err(EvalError::MalformedNumeral { position: 4 }));
        assert_eq!(scan("(1))"), Err(EvalError::UnmatchedClose { position: 3 }));
        assert_eq!(scan("((1)"), Err(EvalError::Unclosed { depth: 1 }));
        assert_eq!(scan("8 / 0"), Err(EvalError::DivisionByZero { position: 4 }));
        assert_eq!(
            scan("8 / (2 - 2)"),
            Err(EvalError::DivisionByZero { position: 10 })
        );
        assert_eq!(
            scan("1 + x"),
            Err(EvalError::UnexpectedCharacter {
                found: 'x',
                position: 4
            })
        );
    }

    #[test]
    fn test_multibyte_position() {
        assert_eq!(
            scan("1 + é"),
            Err(EvalError::UnexpectedCharacter {
                found: 'é',
                position: 4
            })
        );
    }
}
