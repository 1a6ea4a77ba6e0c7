//! Game Session
//!
//! Wraps a [`chess_core::Game`] for a human playing against the heuristic
//! opponent. Front ends send commands ([`GameSession::start_game`],
//! [`GameSession::select_square`], [`GameSession::attempt_move`],
//! [`GameSession::reset_game`]) and subscribe to notifications through
//! [`GameObserver`].

pub mod config;
pub mod error;
pub mod observer;
pub mod session;

pub use config::{ConfigError, SessionConfig};
pub use error::SessionError;
pub use observer::{ChannelObserver, GameEvent, GameObserver};
pub use session::{GameSession, Selection, SessionSnapshot};

pub use heuristic_engine::Difficulty;
