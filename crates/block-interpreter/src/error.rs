//! The runtime error taxonomy. All three variants are fatal to the Thread
//! that raised them; the scheduler never lets one escape `tick`.

use block_model::Command;

#[derive(Debug, thiserror::Error)]
pub enum InterpError {
    #[error("no handler registered for command {0:?}")]
    UnknownBlockType(Command),

    #[error("expected a number for {command:?}, got {found}")]
    ArgumentTypeError { command: Command, found: String },

    #[error("no sprite named {0:?}")]
    MissingEntity(String),
}

pub type Result<T> = std::result::Result<T, InterpError>;
