//! Notifications sent from a session to whoever presents it.

use chess_core::{MoveRecord, Outcome};
use tokio::sync::mpsc;

use crate::session::SessionSnapshot;

/// Receives session notifications.
///
/// Called after the session's lock is released, so implementations may call
/// back into the session. Calls come from whichever thread or task made the
/// change, including the deferred opponent task.
pub trait GameObserver: Send + Sync {
    fn on_state_changed(&self, _snapshot: &SessionSnapshot) {}

    fn on_move_applied(&self, _record: &MoveRecord) {}

    fn on_terminal(&self, _outcome: Outcome) {}

    fn on_opponent_thinking_changed(&self, _thinking: bool) {}
}

/// One notification, as a value.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    StateChanged(SessionSnapshot),
    MoveApplied(MoveRecord),
    Terminal(Outcome),
    OpponentThinkingChanged(bool),
}

impl GameEvent {
    pub(crate) fn dispatch(&self, observer: &dyn GameObserver) {
        match self {
            GameEvent::StateChanged(snapshot) => observer.on_state_changed(snapshot),
            GameEvent::MoveApplied(record) => observer.on_move_applied(record),
            GameEvent::Terminal(outcome) => observer.on_terminal(*outcome),
            GameEvent::OpponentThinkingChanged(thinking) => {
                observer.on_opponent_thinking_changed(*thinking)
            }
        }
    }
}

/// Forwards every notification into an unbounded channel.
///
/// Events sent after the receiver is dropped are discarded.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<GameEvent>,
}

impl ChannelObserver {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<GameEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn send(&self, event: GameEvent) {
        let _ = self.tx.send(event);
    }
}

impl GameObserver for ChannelObserver {
    fn on_state_changed(&self, snapshot: &SessionSnapshot) {
        self.send(GameEvent::StateChanged(snapshot.clone()));
    }

    fn on_move_applied(&self, record: &MoveRecord) {
        self.send(GameEvent::MoveApplied(record.clone()));
    }

    fn on_terminal(&self, outcome: Outcome) {
        self.send(GameEvent::Terminal(outcome));
    }

    fn on_opponent_thinking_changed(&self, thinking: bool) {
        self.send(GameEvent::OpponentThinkingChanged(thinking));
    }
}
