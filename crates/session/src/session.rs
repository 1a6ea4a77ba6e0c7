//! One human-vs-computer game at a time.
//!
//! The session owns the [`Game`], the opponent engine and the UI-side
//! selection. Human input is synchronous. The opponent's reply and the
//! end-of-game announcement are deferred onto tokio tasks so a front end
//! can show "thinking" and let the last move land before the result.
//!
//! Each deferred task remembers the generation it was scheduled in. Starting
//! or resetting a game bumps the generation and aborts outstanding tasks, so
//! a reply computed for an old game can never reach a new one.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chess_core::{
    legal_targets, Board, Color, Engine, Game, GameStatus, MoveError, MoveRecord, Outcome, Square,
};
use heuristic_engine::{Difficulty, HeuristicEngine};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::observer::{GameEvent, GameObserver};

/// Everything a front end needs to draw the game.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub generation: u64,
    pub board: Board,
    pub current_player: Color,
    pub human_color: Color,
    pub difficulty: Difficulty,
    pub status: GameStatus,
    pub in_check: bool,
    pub selected: Option<Square>,
    /// Legal destinations of the selected piece.
    pub targets: Vec<Square>,
    pub opponent_thinking: bool,
    pub history: Vec<MoveRecord>,
}

impl SessionSnapshot {
    pub fn is_game_over(&self) -> bool {
        matches!(self.status, GameStatus::Terminal(_))
    }
}

/// What a click on a square did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Nothing changed.
    Ignored,
    Selected { square: Square, targets: Vec<Square> },
    Deselected,
    Moved(MoveRecord),
}

/// Handle to a running session. Clones share the same game.
#[derive(Clone)]
pub struct GameSession {
    shared: Arc<Shared>,
}

struct Shared {
    config: SessionConfig,
    runtime: Handle,
    state: Mutex<State>,
    observers: Mutex<Vec<Arc<dyn GameObserver>>>,
}

struct State {
    game: Option<Game>,
    difficulty: Difficulty,
    generation: u64,
    selected: Option<Square>,
    thinking: bool,
    engine: HeuristicEngine,
    rng: StdRng,
    pending: Vec<JoinHandle<()>>,
}

impl State {
    fn snapshot(&self, human_color: Color) -> Option<SessionSnapshot> {
        let game = self.game.as_ref()?;
        let targets = self
            .selected
            .map(|sq| legal_targets(game.board(), sq))
            .unwrap_or_default();
        Some(SessionSnapshot {
            generation: self.generation,
            board: *game.board(),
            current_player: game.current_player(),
            human_color,
            difficulty: self.difficulty,
            status: game.status(),
            in_check: game.in_check(),
            selected: self.selected,
            targets,
            opponent_thinking: self.thinking,
            history: game.history().to_vec(),
        })
    }

    fn state_changed(&self, human_color: Color) -> Option<GameEvent> {
        self.snapshot(human_color).map(GameEvent::StateChanged)
    }

    /// Human input is accepted only on the human's turn of a live game while
    /// the opponent is idle.
    fn check_human_turn(&self, human_color: Color) -> Result<&Game, SessionError> {
        let game = self.game.as_ref().ok_or(SessionError::NoGame)?;
        if game.is_game_over() {
            return Err(MoveError::GameOver.into());
        }
        if self.thinking {
            return Err(SessionError::OpponentThinking);
        }
        if game.current_player() != human_color {
            return Err(SessionError::NotYourTurn(game.current_player()));
        }
        Ok(game)
    }

    fn thinking_time(&mut self, config: &SessionConfig) -> Duration {
        let jitter = if config.thinking_jitter_ms > 0 {
            self.rng.gen_range(0..config.thinking_jitter_ms)
        } else {
            0
        };
        Duration::from_millis(config.thinking_min_ms.saturating_add(jitter))
    }

    fn cancel_pending(&mut self) {
        for handle in self.pending.drain(..) {
            handle.abort();
        }
    }
}

impl GameSession {
    /// Create a session on the current tokio runtime. No game is running
    /// until [`start_game`](Self::start_game).
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        let runtime = Handle::try_current().map_err(|_| SessionError::NoRuntime)?;
        Ok(Self::with_runtime(config, runtime))
    }

    pub fn with_runtime(config: SessionConfig, runtime: Handle) -> Self {
        let (engine, rng) = match config.seed {
            Some(seed) => (
                HeuristicEngine::with_seed(config.difficulty, seed),
                StdRng::seed_from_u64(seed.wrapping_add(1)),
            ),
            None => (
                HeuristicEngine::new(config.difficulty),
                StdRng::from_entropy(),
            ),
        };
        let state = State {
            game: None,
            difficulty: config.difficulty,
            generation: 0,
            selected: None,
            thinking: false,
            engine,
            rng,
            pending: Vec::new(),
        };
        Self {
            shared: Arc::new(Shared {
                config,
                runtime,
                state: Mutex::new(state),
                observers: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.shared.config
    }

    pub fn add_observer(&self, observer: Arc<dyn GameObserver>) {
        self.shared
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(observer);
    }

    /// Throw away whatever is running and start from the initial position.
    pub fn start_game(&self, difficulty: Difficulty) {
        self.start_from(Game::new(), difficulty);
    }

    /// Like [`start_game`](Self::start_game) but from an arbitrary game,
    /// e.g. a fixture position.
    pub fn start_from(&self, game: Game, difficulty: Difficulty) {
        let human = self.shared.config.human_color;
        let events = {
            let mut state = self.lock();
            state.cancel_pending();
            state.generation += 1;

            let mut events = Vec::new();
            if state.thinking {
                state.thinking = false;
                events.push(GameEvent::OpponentThinkingChanged(false));
            }

            let outcome = game.outcome();
            let to_move = game.current_player();
            state.game = Some(game);
            state.difficulty = difficulty;
            state.selected = None;
            state.engine.set_difficulty(difficulty);
            state.engine.new_game();
            info!(generation = state.generation, %difficulty, %human, "game started");

            match outcome {
                Some(outcome) => self.schedule_terminal(&mut state, outcome),
                None if to_move != human => self.schedule_opponent(&mut state),
                None => {}
            }
            events.extend(state.state_changed(human));
            events
        };
        self.notify(events);
    }

    /// Start over at the current difficulty. Any pending opponent move is
    /// discarded.
    pub fn reset_game(&self) {
        let difficulty = self.lock().difficulty;
        info!(%difficulty, "game reset");
        self.start_game(difficulty);
    }

    /// Handle a click on `square`.
    ///
    /// With nothing selected, an own piece becomes selected. With a
    /// selection, the same square deselects, a legal target plays the move
    /// and another own piece moves the selection. Anything else is ignored
    /// and the selection is kept.
    pub fn select_square(&self, square: Square) -> Selection {
        let human = self.shared.config.human_color;
        let mut state = self.lock();

        let (own_piece, legal_target) = match state.check_human_turn(human) {
            Ok(game) => {
                let own_piece = game
                    .board()
                    .piece_at(square)
                    .is_some_and(|pc| pc.color == human);
                let legal_target = state
                    .selected
                    .is_some_and(|from| game.is_valid_move(from, square));
                (own_piece, legal_target)
            }
            Err(err) => {
                debug!(%square, %err, "selection ignored");
                return Selection::Ignored;
            }
        };

        let selected = state.selected;
        let selection = match selected {
            Some(from) if from == square => {
                state.selected = None;
                Selection::Deselected
            }
            Some(from) if legal_target => {
                let applied = self.apply_human_move(&mut state, from, square);
                drop(state);
                return match applied {
                    Ok((record, events)) => {
                        self.notify(events);
                        Selection::Moved(record)
                    }
                    Err(err) => {
                        warn!(%from, to = %square, %err, "selected move rejected");
                        Selection::Ignored
                    }
                };
            }
            _ if own_piece => {
                state.selected = Some(square);
                let targets = state
                    .game
                    .as_ref()
                    .map(|game| legal_targets(game.board(), square))
                    .unwrap_or_default();
                Selection::Selected { square, targets }
            }
            _ => return Selection::Ignored,
        };

        let events: Vec<_> = state.state_changed(human).into_iter().collect();
        drop(state);
        self.notify(events);
        selection
    }

    /// Play a human move directly, bypassing the selection.
    pub fn attempt_move(&self, from: Square, to: Square) -> Result<MoveRecord, SessionError> {
        let (record, events) = {
            let mut state = self.lock();
            self.apply_human_move(&mut state, from, to)
                .inspect_err(|err| warn!(%from, %to, %err, "move refused"))?
        };
        self.notify(events);
        Ok(record)
    }

    /// `None` until the first game starts.
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.lock().snapshot(self.shared.config.human_color)
    }

    pub fn is_opponent_thinking(&self) -> bool {
        self.lock().thinking
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Deliver events to every observer, in order. Must be called without
    /// the state lock held.
    fn notify(&self, events: Vec<GameEvent>) {
        if events.is_empty() {
            return;
        }
        let observers = self
            .shared
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for event in &events {
            for observer in &observers {
                event.dispatch(observer.as_ref());
            }
        }
    }

    fn apply_human_move(
        &self,
        state: &mut State,
        from: Square,
        to: Square,
    ) -> Result<(MoveRecord, Vec<GameEvent>), SessionError> {
        let human = self.shared.config.human_color;
        state.check_human_turn(human)?;
        let game = state.game.as_mut().ok_or(SessionError::NoGame)?;
        let record = game.apply_move(from, to)?;
        let outcome = game.outcome();
        state.selected = None;
        debug!(notation = %record.notation, mv = %record.mv, "human move");

        match outcome {
            Some(outcome) => self.schedule_terminal(state, outcome),
            None => self.schedule_opponent(state),
        }

        let mut events = vec![GameEvent::MoveApplied(record.clone())];
        events.extend(state.state_changed(human));
        Ok((record, events))
    }

    fn schedule_opponent(&self, state: &mut State) {
        let task = self.clone().run_opponent(state.generation);
        self.track(state, task);
    }

    fn schedule_terminal(&self, state: &mut State, outcome: Outcome) {
        let task = self.clone().announce_terminal(state.generation, outcome);
        self.track(state, task);
    }

    fn track<F>(&self, state: &mut State, task: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        state.pending.retain(|handle| !handle.is_finished());
        state.pending.push(self.shared.runtime.spawn(task));
    }

    async fn run_opponent(self, generation: u64) {
        let config = &self.shared.config;
        let human = config.human_color;
        tokio::time::sleep(config.opponent_delay()).await;

        let (think, events) = {
            let mut state = self.lock();
            if state.generation != generation {
                warn!(generation, current = state.generation, "stale opponent task dropped");
                return;
            }
            state.thinking = true;
            let think = state.thinking_time(config);
            let mut events = vec![GameEvent::OpponentThinkingChanged(true)];
            events.extend(state.state_changed(human));
            (think, events)
        };
        self.notify(events);
        tokio::time::sleep(think).await;

        let events = {
            let mut state = self.lock();
            if state.generation != generation {
                warn!(generation, current = state.generation, "stale opponent move discarded");
                return;
            }
            state.thinking = false;
            state.selected = None;
            let mut events = vec![GameEvent::OpponentThinkingChanged(false)];
            if let Some(record) = self.play_opponent_move(&mut state) {
                events.push(GameEvent::MoveApplied(record));
            }
            events.extend(state.state_changed(human));
            events
        };
        self.notify(events);
    }

    fn play_opponent_move(&self, state: &mut State) -> Option<MoveRecord> {
        let color = self.shared.config.opponent_color();
        let State { game, engine, .. } = state;
        let game = game.as_mut()?;
        if game.is_game_over() || game.current_player() != color {
            warn!(%color, to_move = %game.current_player(), "opponent woke up out of turn");
            return None;
        }

        let board = *game.board();
        let Some(mv) = engine.choose_move(&board, color) else {
            // The status check above should have caught this; never retry.
            warn!(%color, "opponent found no move");
            return None;
        };

        match game.apply_move(mv.from, mv.to) {
            Ok(record) => {
                debug!(notation = %record.notation, mv = %record.mv, engine = engine.name(), "opponent move");
                if let Some(outcome) = game.outcome() {
                    self.schedule_terminal(state, outcome);
                }
                Some(record)
            }
            Err(err) => {
                warn!(%mv, %err, "opponent produced an illegal move");
                None
            }
        }
    }

    async fn announce_terminal(self, generation: u64, outcome: Outcome) {
        tokio::time::sleep(self.shared.config.terminal_delay()).await;
        let current = self.lock().generation;
        if current != generation {
            warn!(generation, current, "stale terminal notice dropped");
            return;
        }
        info!(kind = ?outcome.kind, winner = ?outcome.winner, "game over");
        self.notify(vec![GameEvent::Terminal(outcome)]);
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
