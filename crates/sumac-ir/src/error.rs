use crate::Function;

/// Error type for malformed function declarations or bodies.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IrError {
    /// A function with the same name is already declared in the module.
    #[error("duplicate function name '{0}'")]
    DuplicateFunction(String),
    /// The function does not exist or has been deleted.
    #[error("unknown function {0:?}")]
    UnknownFunction(Function),
    /// An operand refers to an argument the enclosing function does not have.
    #[error("argument index {index} out of range for function '{function}' with {count} arguments")]
    ArgumentOutOfRange {
        function: String,
        index: usize,
        count: usize,
    },
    /// A direct call passes a different number of operands than the callee declares.
    #[error("arity mismatch calling '{callee}': expected {expected} arguments, got {got}")]
    ArityMismatch {
        callee: String,
        expected: usize,
        got: usize,
    },
    /// A partial application captures more operands than the callee declares.
    #[error("partial application of '{callee}' captures {captured} operands but it takes {expected}")]
    TooManyCaptures {
        callee: String,
        expected: usize,
        captured: usize,
    },
}
