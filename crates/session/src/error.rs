use chess_core::{Color, MoveError};
use thiserror::Error;

/// Why the session refused a command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("no game in progress")]
    NoGame,
    #[error("it is {0}'s turn")]
    NotYourTurn(Color),
    #[error("the opponent is thinking")]
    OpponentThinking,
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error("a tokio runtime is required to schedule the opponent")]
    NoRuntime,
}
