//! Error types for the interpreter kernel.

use thiserror::Error;

/// Errors surfaced by the interpreter.
///
/// Stack underflow is deliberately absent: evolved programs routinely issue
/// more pops than pushes, so every stack operation treats an empty stack as
/// inert rather than fatal.
#[derive(Debug, Error)]
pub enum InterpError {
    /// The active instruction set was configured with an element that is not
    /// an instruction name. The whole configuration call aborts; the previous
    /// generator pool stays active.
    #[error("instruction list must contain only instruction names, got '{0}'")]
    InvalidInstructionList(String),

    /// Random generation was requested with an empty active generator pool.
    #[error("no active atom generators to sample from")]
    EmptyGeneratorPool,

    /// A user-supplied instruction body failed. Instruction bodies are
    /// trusted; the engine reports their errors unmodified.
    #[error("instruction '{name}' failed: {message}")]
    Instruction { name: String, message: String },
}

/// Result alias for interpreter operations.
pub type InterpResult<T> = Result<T, InterpError>;
