use thiserror::Error as ThisError;

///
/// PatternError
///
/// Raised while parsing a `like` pattern. Patterns are validated at
/// construction; an already-built pattern never fails during evaluation.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PatternError {
    #[error("pattern '{pattern}' ends with an unterminated escape")]
    UnterminatedEscape { pattern: String },
}

///
/// ValueError
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum ValueError {
    #[error("non-finite float {value} is not a legal condition value")]
    NonFiniteFloat { value: f64 },
}
