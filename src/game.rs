//! The per-lobby game engine.
//!
//! `LudoGame` owns the ordered player list, the turn state machine, the die
//! source and the action history for one game. It performs no locking: the
//! caller serializes every mutating call for a given instance.
//!
//! ## Trust boundary
//!
//! The raw operations (`roll_die`, `advance`, `next_turn`) do not check
//! whose turn it is. Callers either check `turn_of`/`check_action` first, or
//! use `play_roll`/`play_advance`, which validate and then drive the turn
//! machine the way a session layer would.
//!
//! ## Example
//!
//! ```
//! use ludo_engine::core::{Color, GameConfig, LoadedDice, Player, PlayerId};
//! use ludo_engine::rules::TurnPhase;
//! use ludo_engine::LudoGame;
//!
//! let mut game = LudoGame::with_dice(GameConfig::default(), LoadedDice::new([6, 2]));
//! game.start_game(vec![
//!     Player::new("a", "Alice", Color::Red),
//!     Player::new("b", "Bob", Color::Blue),
//! ]).unwrap();
//!
//! let alice = PlayerId::new("a");
//! game.next_turn().unwrap();
//! assert_eq!(game.turn_of(&alice), TurnPhase::Roll);
//!
//! let roll = game.play_roll(&alice).unwrap();
//! assert_eq!(roll.value, 6);
//! assert_eq!(roll.moves.len(), 4);
//!
//! let outcome = game.play_advance(&alice, Some(0)).unwrap();
//! assert_eq!(outcome.result.unwrap().to, 0);
//! assert_eq!(game.active_player().unwrap().id(), &PlayerId::new("b"));
//! ```

use im::Vector;
use tracing::{debug, info, instrument};

use crate::core::{
    Action, ActionRecord, Color, DieSource, EngineError, EngineResult, GameConfig, GameRng, Player, PlayerId,
    COLOR_COUNT,
};
use crate::rules::{self, AdvanceResult, Moves, TurnPhase, TurnState};

/// Result of a validated roll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RollOutcome {
    /// Die value rolled.
    pub value: u8,
    /// Legal moves for that value (possibly empty).
    pub moves: Moves,
    /// Player now expected to act (the roller, in the advance phase).
    pub next: PlayerId,
}

/// Result of a validated advance or pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdvanceOutcome {
    /// The executed move, `None` for a pass.
    pub result: Option<AdvanceResult>,
    /// The mover has won. The turn machine is left where it was.
    pub won: bool,
    /// Player now expected to roll, `None` after a win.
    pub next: Option<PlayerId>,
}

/// One game instance.
#[derive(Clone, Debug)]
pub struct LudoGame<D = GameRng> {
    config: GameConfig,
    players: Vec<Player>,
    turn: TurnState,
    dice: D,
    winner: Option<PlayerId>,
    history: Vector<ActionRecord>,
    round: u32,
    sequence: u32,
}

impl LudoGame<GameRng> {
    /// Create a game with a ChaCha8 die seeded from `config.seed`
    /// (or from entropy when unset).
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let dice = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        Self::with_dice(config, dice)
    }
}

impl Default for LudoGame<GameRng> {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl<D: DieSource> LudoGame<D> {
    /// Create a game with an injected die source.
    pub fn with_dice(config: GameConfig, dice: D) -> Self {
        Self {
            config,
            players: Vec::new(),
            turn: TurnState::new(),
            dice,
            winner: None,
            history: Vector::new(),
            round: 1,
            sequence: 0,
        }
    }

    // === Setup ===

    /// Start a game with the given turn order.
    ///
    /// Every player's pieces go back to base and the turn state resets to
    /// phase `None` at index 0. The first `next_turn` hands the roll to the
    /// first player.
    #[instrument(skip(self, players), fields(count = players.len()))]
    pub fn start_game(&mut self, mut players: Vec<Player>) -> EngineResult<()> {
        if players.is_empty() || players.len() > COLOR_COUNT {
            return Err(EngineError::InvalidPlayerCount(players.len()));
        }
        let mut colors: Vec<Color> = Vec::with_capacity(players.len());
        for (i, player) in players.iter().enumerate() {
            if colors.contains(&player.color()) {
                return Err(EngineError::DuplicateColor(player.color()));
            }
            if players[..i].iter().any(|p| p.id() == player.id()) {
                return Err(EngineError::DuplicatePlayer(player.id().clone()));
            }
            colors.push(player.color());
        }

        players.iter_mut().for_each(Player::reset);
        self.players = players;
        self.turn = TurnState::new();
        self.winner = None;
        self.history = Vector::new();
        self.round = 1;
        self.sequence = 0;

        info!(players = ?self.players.iter().map(|p| p.id().as_str()).collect::<Vec<_>>(), "game started");
        Ok(())
    }

    // === Lookup ===

    /// Look up a player by identifier.
    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id() == id)
    }

    /// Mutable lookup, for callers that own player state (ready flag, setup).
    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id() == id)
    }

    fn index_of(&self, id: &PlayerId) -> EngineResult<usize> {
        self.players
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| EngineError::UnknownPlayer(id.clone()))
    }

    /// Players in turn order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The player at the active index, `None` when nobody is left.
    #[must_use]
    pub fn active_player(&self) -> Option<&Player> {
        self.players.get(self.turn.active)
    }

    #[must_use]
    pub fn turn_state(&self) -> TurnState {
        self.turn
    }

    /// Phase for `id`: the current phase if they are active, `None` otherwise
    /// (including unknown identifiers).
    #[must_use]
    pub fn turn_of(&self, id: &PlayerId) -> TurnPhase {
        self.index_of(id)
            .map_or(TurnPhase::None, |index| self.turn.phase_for(index))
    }

    /// Winner recorded by the last winning advance.
    #[must_use]
    pub fn winner(&self) -> Option<&PlayerId> {
        self.winner.as_ref()
    }

    /// Recorded actions, oldest first. Empty when history is disabled.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The game's die source (e.g. to snapshot a `GameRng`).
    #[must_use]
    pub fn dice(&self) -> &D {
        &self.dice
    }

    /// Every piece standing on `square`, as (owner, piece index) pairs.
    #[must_use]
    pub fn pieces_on(&self, square: i32) -> Vec<(&PlayerId, usize)> {
        self.players
            .iter()
            .flat_map(|p| {
                p.pieces()
                    .iter()
                    .enumerate()
                    .filter(move |&(_, &pos)| pos == square)
                    .map(move |(i, _)| (p.id(), i))
            })
            .collect()
    }

    // === Validation ===

    /// Single validation entry point for turn-bound actions.
    ///
    /// Succeeds with the player's index when the player is in the game, no
    /// one has won, the player is active, and the game is in `expected`.
    pub fn check_action(&self, id: &PlayerId, expected: TurnPhase) -> EngineResult<usize> {
        let index = self.index_of(id)?;
        if let Some(winner) = &self.winner {
            return Err(EngineError::GameOver(winner.clone()));
        }
        if index != self.turn.active {
            let active = self
                .active_player()
                .map(|p| p.id().clone())
                .ok_or(EngineError::InvalidState("active index outside turn order"))?;
            return Err(EngineError::NotYourTurn { player: id.clone(), active });
        }
        if self.turn.phase != expected {
            return Err(EngineError::WrongPhase {
                expected,
                actual: self.turn.phase,
            });
        }
        Ok(index)
    }

    // === Raw operations ===

    /// Roll the die for `id` and store the value as their last roll.
    ///
    /// Precondition: `id` is active in the `Roll` phase (see `check_action`).
    #[instrument(skip(self))]
    pub fn roll_die(&mut self, id: &PlayerId) -> EngineResult<u8> {
        let index = self.index_of(id)?;
        let value = self.dice.roll_die();
        self.players[index].set_last_roll(value);
        debug!(value, "rolled");
        self.record(id.clone(), Action::Roll(value));
        Ok(value)
    }

    /// Legal moves for `id` with die value `die`.
    pub fn possible_moves(&self, id: &PlayerId, die: u8) -> EngineResult<Moves> {
        let player = self.player(id).ok_or_else(|| EngineError::UnknownPlayer(id.clone()))?;
        let moves = rules::possible_moves(player, die);
        debug!(player = %id, die, candidates = moves.len(), "moves generated");
        Ok(moves)
    }

    /// Move piece `piece` of `id` by their stored roll, capturing opponents.
    ///
    /// Precondition: `id` is active in the `Advance` phase and `piece` came
    /// from `possible_moves` for their last roll. With `strict_moves` the
    /// second half is checked and violations return `IllegalMove`.
    #[instrument(skip(self))]
    pub fn advance(&mut self, id: &PlayerId, piece: usize) -> EngineResult<AdvanceResult> {
        let index = self.index_of(id)?;

        if self.config.strict_moves {
            let player = &self.players[index];
            let die = player.last_roll().ok_or_else(|| EngineError::NoRoll(id.clone()))?;
            if piece >= player.pieces().len() {
                return Err(EngineError::InvalidPieceIndex(piece));
            }
            if !rules::possible_moves(player, die).iter().any(|m| m.piece_index == piece) {
                return Err(EngineError::IllegalMove { piece, die });
            }
        }

        let result = rules::apply_advance(&mut self.players, index, piece)?;
        debug!(piece, from = result.from, to = result.to, captures = result.kicked.len(), "advanced");

        self.record(
            id.clone(),
            Action::Move {
                piece,
                from: result.from,
                to: result.to,
                captured: result.kicked.clone(),
            },
        );

        if rules::has_won(&self.players[index]) {
            info!(winner = %id, "game won");
            self.winner = Some(id.clone());
        }

        Ok(result)
    }

    /// Has `id` brought all four pieces into their finish lane?
    pub fn has_won(&self, id: &PlayerId) -> EngineResult<bool> {
        self.player(id)
            .map(rules::has_won)
            .ok_or_else(|| EngineError::UnknownPlayer(id.clone()))
    }

    /// Step the turn machine and return the player now expected to act.
    #[instrument(skip(self))]
    pub fn next_turn(&mut self) -> EngineResult<&Player> {
        let rotating = self.turn.phase == TurnPhase::Advance;
        let active = self.turn.advance(self.players.len())?;
        if rotating {
            self.round += 1;
        }
        let player = self
            .players
            .get(active)
            .ok_or(EngineError::InvalidState("active index outside turn order"))?;
        debug!(player = %player.id(), phase = ?self.turn.phase, "next turn");
        Ok(player)
    }

    /// Remove `id` from turn order, repairing the active index and phase.
    ///
    /// Returns the removed player, or `None` if they were not in the game.
    #[instrument(skip(self))]
    pub fn remove_player(&mut self, id: &PlayerId) -> Option<Player> {
        let index = self.index_of(id).ok()?;
        let players = std::mem::take(&mut self.players);
        let (players, turn, removed) = rules::remove_from_order(players, self.turn, index);
        self.players = players;
        self.turn = turn;

        info!(
            remaining = ?self.players.iter().map(|p| p.id().as_str()).collect::<Vec<_>>(),
            active = self.turn.active,
            phase = ?self.turn.phase,
            "player removed from turn order"
        );
        removed
    }

    // === Validated flow ===

    /// Validate and perform a roll, then hand the player their advance phase.
    pub fn play_roll(&mut self, id: &PlayerId) -> EngineResult<RollOutcome> {
        self.check_action(id, TurnPhase::Roll)?;
        let value = self.roll_die(id)?;
        let moves = self.possible_moves(id, value)?;
        let next = self.next_turn()?.id().clone();
        Ok(RollOutcome { value, moves, next })
    }

    /// Validate and perform an advance (`Some(piece)`) or a pass (`None`).
    ///
    /// A winning move leaves the turn machine untouched; otherwise the turn
    /// passes to the next player.
    pub fn play_advance(&mut self, id: &PlayerId, piece: Option<usize>) -> EngineResult<AdvanceOutcome> {
        self.check_action(id, TurnPhase::Advance)?;

        let result = match piece {
            Some(piece) => Some(self.advance(id, piece)?),
            None => {
                self.record(id.clone(), Action::Pass);
                None
            }
        };

        if self.winner.as_ref() == Some(id) {
            return Ok(AdvanceOutcome {
                result,
                won: true,
                next: None,
            });
        }

        let next = self.next_turn()?.id().clone();
        Ok(AdvanceOutcome {
            result,
            won: false,
            next: Some(next),
        })
    }

    fn record(&mut self, player: PlayerId, action: Action) {
        if !self.config.record_history {
            return;
        }
        let sequence = self.sequence;
        self.sequence += 1;
        self.history
            .push_back(ActionRecord::new(player, action, self.round, sequence));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LoadedDice, BASE};

    fn id(s: &str) -> PlayerId {
        PlayerId::new(s)
    }

    fn two_player_game(dice: impl IntoIterator<Item = u8>) -> LudoGame<LoadedDice> {
        let mut game = LudoGame::with_dice(GameConfig::default(), LoadedDice::new(dice));
        game.start_game(vec![
            Player::new("a", "Alice", Color::Red),
            Player::new("b", "Bob", Color::Blue),
        ])
        .unwrap();
        game
    }

    #[test]
    fn test_start_game_resets_state() {
        let mut game = LudoGame::with_dice(GameConfig::default(), LoadedDice::new([6]));
        let mut dirty = Player::new("a", "Alice", Color::Red).with_pieces([3, 4, 5, 6]);
        dirty.set_last_roll(2);

        game.start_game(vec![dirty]).unwrap();

        assert_eq!(game.turn_state(), TurnState::new());
        assert_eq!(game.players()[0].pieces(), &[BASE; 4]);
        assert_eq!(game.players()[0].last_roll(), None);
    }

    #[test]
    fn test_start_game_rejects_bad_lineups() {
        let mut game = LudoGame::with_dice(GameConfig::default(), LoadedDice::new([1]));

        assert_eq!(game.start_game(vec![]), Err(EngineError::InvalidPlayerCount(0)));

        let same_color = vec![Player::new("a", "A", Color::Red), Player::new("b", "B", Color::Red)];
        assert_eq!(game.start_game(same_color), Err(EngineError::DuplicateColor(Color::Red)));

        let same_id = vec![Player::new("a", "A", Color::Red), Player::new("a", "B", Color::Blue)];
        assert_eq!(game.start_game(same_id), Err(EngineError::DuplicatePlayer(id("a"))));

        let five: Vec<_> = (0..5).map(|i| Player::new(i.to_string(), "x", Color::Red)).collect();
        assert_eq!(game.start_game(five), Err(EngineError::InvalidPlayerCount(5)));
    }

    #[test]
    fn test_turn_of() {
        let mut game = two_player_game([1]);
        assert_eq!(game.turn_of(&id("a")), TurnPhase::None);

        game.next_turn().unwrap();
        assert_eq!(game.turn_of(&id("a")), TurnPhase::Roll);
        assert_eq!(game.turn_of(&id("b")), TurnPhase::None);
        assert_eq!(game.turn_of(&id("nobody")), TurnPhase::None);
    }

    #[test]
    fn test_roll_stores_value() {
        let mut game = two_player_game([4]);
        assert_eq!(game.roll_die(&id("a")).unwrap(), 4);
        assert_eq!(game.player(&id("a")).unwrap().last_roll(), Some(4));
        assert_eq!(game.roll_die(&id("zz")), Err(EngineError::UnknownPlayer(id("zz"))));
    }

    #[test]
    fn test_possible_moves_for_player() {
        let mut game = two_player_game([1]);
        game.player_mut(&id("a")).unwrap().set_piece(1, 12);

        let moves = game.possible_moves(&id("a"), 6).unwrap();
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().any(|m| m.piece_index == 1 && m.to == 18));

        assert_eq!(game.possible_moves(&id("a"), 2).unwrap().len(), 1);
        assert_eq!(game.possible_moves(&id("zz"), 6), Err(EngineError::UnknownPlayer(id("zz"))));
    }

    #[test]
    fn test_check_action() {
        let mut game = two_player_game([1]);
        game.next_turn().unwrap();

        assert_eq!(game.check_action(&id("a"), TurnPhase::Roll), Ok(0));
        assert_eq!(
            game.check_action(&id("b"), TurnPhase::Roll),
            Err(EngineError::NotYourTurn { player: id("b"), active: id("a") })
        );
        assert_eq!(
            game.check_action(&id("a"), TurnPhase::Advance),
            Err(EngineError::WrongPhase { expected: TurnPhase::Advance, actual: TurnPhase::Roll })
        );
        assert_eq!(game.check_action(&id("x"), TurnPhase::Roll), Err(EngineError::UnknownPlayer(id("x"))));
    }

    #[test]
    fn test_strict_advance_rejects_illegal_piece() {
        let mut game = two_player_game([3]);
        game.roll_die(&id("a")).unwrap();

        // All in base, a 3 cannot move anything
        assert_eq!(game.advance(&id("a"), 0), Err(EngineError::IllegalMove { piece: 0, die: 3 }));
        assert_eq!(game.advance(&id("a"), 7), Err(EngineError::InvalidPieceIndex(7)));
        assert_eq!(game.players()[0].pieces(), &[BASE; 4]);
    }

    #[test]
    fn test_advance_without_roll() {
        let mut game = two_player_game([3]);
        assert_eq!(game.advance(&id("a"), 0), Err(EngineError::NoRoll(id("a"))));
    }

    #[test]
    fn test_lenient_advance_trusts_caller() {
        let mut game = LudoGame::with_dice(GameConfig::default().with_strict_moves(false), LoadedDice::new([3]));
        game.start_game(vec![Player::new("a", "Alice", Color::Red)]).unwrap();
        game.roll_die(&id("a")).unwrap();

        // Base piece on a 3: not legal, but executed as asked
        let result = game.advance(&id("a"), 0).unwrap();
        assert_eq!(result.to, 0);
    }

    #[test]
    fn test_pass_moves_turn_on() {
        let mut game = two_player_game([2]);
        game.next_turn().unwrap();

        let roll = game.play_roll(&id("a")).unwrap();
        assert!(roll.moves.is_empty());
        assert_eq!(roll.next, id("a"));

        let outcome = game.play_advance(&id("a"), None).unwrap();
        assert_eq!(outcome, AdvanceOutcome { result: None, won: false, next: Some(id("b")) });
        assert_eq!(game.turn_of(&id("b")), TurnPhase::Roll);
    }

    #[test]
    fn test_winning_move_stops_the_game() {
        let mut game = two_player_game([1]);
        for (piece, pos) in [(0, 40), (1, 41), (2, 43), (3, 39)] {
            game.player_mut(&id("a")).unwrap().set_piece(piece, pos);
        }
        game.next_turn().unwrap();

        // Only 41 -> 42 is open: 40 and 43 are blocked or overshoot, 39 -> 40 is taken
        let roll = game.play_roll(&id("a")).unwrap();
        assert_eq!(roll.moves.len(), 1);
        let outcome = game.play_advance(&id("a"), Some(1)).unwrap();
        assert!(!outcome.won);

        game.play_roll(&id("b")).unwrap();
        game.play_advance(&id("b"), None).unwrap();
        game.play_roll(&id("a")).unwrap();
        game.play_advance(&id("a"), Some(0)).unwrap();

        game.play_roll(&id("b")).unwrap();
        game.play_advance(&id("b"), None).unwrap();
        game.play_roll(&id("a")).unwrap();
        let outcome = game.play_advance(&id("a"), Some(3)).unwrap();

        assert!(outcome.won);
        assert_eq!(outcome.next, None);
        assert_eq!(game.winner(), Some(&id("a")));
        assert!(game.has_won(&id("a")).unwrap());
        assert_eq!(game.play_roll(&id("b")), Err(EngineError::GameOver(id("a"))));
    }

    #[test]
    fn test_history_records_actions() {
        let mut game = two_player_game([6, 1]);
        game.next_turn().unwrap();
        game.play_roll(&id("a")).unwrap();
        game.play_advance(&id("a"), Some(0)).unwrap();
        game.play_roll(&id("b")).unwrap();
        game.play_advance(&id("b"), None).unwrap();

        let actions: Vec<_> = game.history().iter().map(|r| (r.player.clone(), r.action.clone(), r.turn)).collect();
        assert_eq!(
            actions,
            vec![
                (id("a"), Action::Roll(6), 1),
                (id("a"), Action::Move { piece: 0, from: BASE, to: 0, captured: Default::default() }, 1),
                (id("b"), Action::Roll(1), 2),
                (id("b"), Action::Pass, 2),
            ]
        );
        let sequences: Vec<_> = game.history().iter().map(|r| r.sequence).collect();
        assert_eq!(sequences, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_history_can_be_disabled() {
        let mut game = LudoGame::with_dice(GameConfig::default().with_history(false), LoadedDice::new([6]));
        game.start_game(vec![Player::new("a", "Alice", Color::Red)]).unwrap();
        game.roll_die(&id("a")).unwrap();
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_pieces_on() {
        let mut game = two_player_game([1]);
        game.player_mut(&id("a")).unwrap().set_piece(2, 15);
        game.player_mut(&id("b")).unwrap().set_piece(0, 15);

        assert_eq!(game.pieces_on(15), vec![(&id("a"), 2), (&id("b"), 0)]);
        assert!(game.pieces_on(16).is_empty());
    }

    #[test]
    fn test_seeded_games_are_reproducible() {
        let rolls = |seed| {
            let mut game = LudoGame::new(GameConfig::default().with_seed(seed));
            game.start_game(vec![Player::new("a", "Alice", Color::Red)]).unwrap();
            (0..20).map(|_| game.roll_die(&id("a")).unwrap()).collect::<Vec<_>>()
        };
        assert_eq!(rolls(11), rolls(11));
        assert_eq!(LudoGame::new(GameConfig::default().with_seed(11)).dice().seed(), 11);
    }
}
