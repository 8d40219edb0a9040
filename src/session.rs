//! Game session management.
//!
//! The rules engine is pure and holds no locks, so everything that must
//! happen one action at a time lives here: each session owns its state and
//! dice RNG, and the manager runs every action while holding its lock.

use crate::config::MatchConfig;
use derive_more::{Display, Error};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use strictly_backgammon::{
    Dice, GamePhase, GameState, Move, MoveError, Player, WinType, accept_double, can_move,
    constrained_moves, create_match_state, decline_double, end_turn, match_winner, offer_double,
    play, record_game, roll, roll_dice_with, turn_complete,
};
use tracing::{debug, info, instrument, warn};

/// Unique identifier for a game session.
pub type SessionId = String;

/// Where the turn stands after a session action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnStatus {
    /// The same player still has moves to make.
    Moving,
    /// The turn passed to the opponent.
    Passed,
    /// The same player rolls next, as after a taken double.
    ToRoll,
    /// The game ended.
    GameOver {
        /// Winner of the game.
        winner: Player,
        /// How the game was won.
        win_type: WinType,
    },
}

/// Result of rolling in a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollOutcome {
    /// The dice thrown.
    pub dice: Dice,
    /// `Passed` when no move was possible and the turn was forfeited.
    pub status: TurnStatus,
}

/// One game (or match) and the dice that drive it.
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Session ID.
    pub id: SessionId,
    state: GameState,
    rng: StdRng,
}

impl GameSession {
    /// Creates a session at the opening position of a new match.
    #[instrument(skip(config), fields(match_length = config.match_length()))]
    pub fn new(id: SessionId, config: &MatchConfig) -> Self {
        info!(session_id = %id, seed = ?config.seed(), "Creating new game session");
        Self::from_state(id, create_match_state(*config.match_length()), *config.seed())
    }

    /// Resumes a session from a previously persisted state.
    #[instrument(skip(state))]
    pub fn from_state(id: SessionId, state: GameState, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { id, state, rng }
    }

    /// Restores a session from a JSON snapshot.
    #[track_caller]
    pub fn from_snapshot(
        id: SessionId,
        json: &str,
        seed: Option<u64>,
    ) -> Result<Self, SessionError> {
        let state: GameState = serde_json::from_str(json)?;
        Ok(Self::from_state(id, state, seed))
    }

    /// Serializes the state verbatim so a host can persist it.
    #[track_caller]
    pub fn snapshot(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string(&self.state)?)
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Moves the current player may make.
    pub fn allowed_moves(&self) -> Vec<Move> {
        constrained_moves(&self.state)
    }

    /// Rolls the session's dice for the current player.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn roll(&mut self) -> Result<RollOutcome, SessionError> {
        let dice = roll_dice_with(&mut self.rng);
        self.roll_with(dice)
    }

    /// Starts the turn with a given roll.
    ///
    /// When the roll allows no move the turn is forfeited immediately.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn roll_with(&mut self, dice: Dice) -> Result<RollOutcome, SessionError> {
        let rolled = roll(&self.state, dice.clone())?;
        if !can_move(&rolled) {
            info!(
                player = %rolled.current_player(),
                dice = ?dice.values(),
                "No legal move, turn forfeited"
            );
            self.state = end_turn(&rolled);
            return Ok(RollOutcome {
                dice,
                status: TurnStatus::Passed,
            });
        }
        self.state = rolled;
        Ok(RollOutcome {
            dice,
            status: TurnStatus::Moving,
        })
    }

    /// Plays one checker; closes the turn once nothing is left to play.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn play(&mut self, mv: Move) -> Result<TurnStatus, SessionError> {
        let mover = self.state.current_player();
        let next = play(&self.state, mv).inspect_err(|e| {
            warn!(%mv, error = %e, "Invalid move");
        })?;
        if !turn_complete(&next) {
            self.state = next;
            return Ok(TurnStatus::Moving);
        }
        self.state = end_turn(&next);
        Ok(self.status(mover))
    }

    /// The current player offers a double.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn offer_double(&mut self) -> Result<(), SessionError> {
        self.state = offer_double(&self.state)?;
        Ok(())
    }

    /// The opponent answers a pending double.
    ///
    /// A take leaves the offerer to roll (`ToRoll`); a drop ends the game.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn respond_to_double(&mut self, accept: bool) -> Result<TurnStatus, SessionError> {
        let offerer = self.state.current_player();
        self.state = if accept {
            accept_double(&self.state)?
        } else {
            decline_double(&self.state)?
        };
        Ok(self.status(offerer))
    }

    /// Scores the finished game and sets up the next one.
    ///
    /// Returns the match winner once the match is decided.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn next_game(&mut self) -> Result<Option<Player>, SessionError> {
        self.state = record_game(&self.state)?;
        let winner = match_winner(&self.state);
        if let Some(winner) = winner {
            info!(%winner, score = ?self.state.score(), "Match won");
        }
        Ok(winner)
    }

    /// Status relative to `mover`, the player who acted last.
    fn status(&self, mover: Player) -> TurnStatus {
        match (self.state.phase(), self.state.winner(), self.state.win_type()) {
            (GamePhase::GameOver, Some(winner), Some(win_type)) => {
                TurnStatus::GameOver { winner, win_type }
            }
            (GamePhase::Moving, _, _) => TurnStatus::Moving,
            _ if self.state.current_player() == mover => TurnStatus::ToRoll,
            _ => TurnStatus::Passed,
        }
    }
}

/// Manages all game sessions.
#[derive(Debug, Clone)]
pub struct SessionManager {
    sessions: Arc<Mutex<HashMap<SessionId, GameSession>>>,
}

impl SessionManager {
    /// Creates a new session manager.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session manager");
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Creates a new game session.
    #[instrument(skip(self, config))]
    pub fn create_session(
        &self,
        id: SessionId,
        config: &MatchConfig,
    ) -> Result<SessionId, SessionError> {
        self.with_sessions(|sessions| {
            if sessions.contains_key(&id) {
                warn!(session_id = %id, "Session already exists");
                return Err(SessionError::new(format!("Session {} already exists", id)));
            }
            sessions.insert(id.clone(), GameSession::new(id.clone(), config));
            info!(session_id = %id, "Created new session");
            Ok(id)
        })
    }

    /// Runs `action` against one session while holding the lock.
    ///
    /// This is the only way to mutate a managed session, so actions on the
    /// same game never interleave.
    #[instrument(skip(self, action))]
    pub fn with_session<R>(
        &self,
        id: &str,
        action: impl FnOnce(&mut GameSession) -> Result<R, SessionError>,
    ) -> Result<R, SessionError> {
        self.with_sessions(|sessions| {
            let session = sessions
                .get_mut(id)
                .ok_or_else(|| SessionError::new(format!("Session {} not found", id)))?;
            action(session)
        })
    }

    /// Gets a copy of a session's state.
    #[instrument(skip(self))]
    pub fn get_state(&self, id: &str) -> Result<GameState, SessionError> {
        self.with_session(id, |session| Ok(session.state().clone()))
    }

    /// Lists all active session IDs.
    #[instrument(skip(self))]
    pub fn list_sessions(&self) -> Result<Vec<SessionId>, SessionError> {
        self.with_sessions(|sessions| {
            let ids: Vec<_> = sessions.keys().cloned().collect();
            debug!(count = ids.len(), "Listed sessions");
            Ok(ids)
        })
    }

    /// Removes a session, returning it if it existed.
    #[instrument(skip(self))]
    pub fn remove_session(&self, id: &str) -> Result<Option<GameSession>, SessionError> {
        self.with_sessions(|sessions| Ok(sessions.remove(id)))
    }

    fn with_sessions<R>(
        &self,
        f: impl FnOnce(&mut HashMap<SessionId, GameSession>) -> Result<R, SessionError>,
    ) -> Result<R, SessionError> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|_| SessionError::new("Session lock poisoned".to_string()))?;
        f(&mut sessions)
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Session error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Session error: {} at {}:{}", message, file, line)]
pub struct SessionError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SessionError {
    /// Creates a new session error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<MoveError> for SessionError {
    #[track_caller]
    fn from(err: MoveError) -> Self {
        Self::new(format!("Rejected: {}", err))
    }
}

impl From<serde_json::Error> for SessionError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Snapshot error: {}", err))
    }
}
