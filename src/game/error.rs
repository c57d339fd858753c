use thiserror::Error;

/// Non-fatal simulation faults.
///
/// None of these abort the game: callers log the condition and skip the
/// affected operation for that tick.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SimError {
    /// A required entity or service handle is absent.
    #[error("missing collaborator: {0}")]
    MissingCollaborator(&'static str),

    /// The segment chain is in a shape the operation cannot work on.
    #[error("invalid chain state: {0}")]
    InvalidChainState(&'static str),
}
