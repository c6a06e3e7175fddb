//! Rock-paper-scissors against a uniform-random computer opponent.
//!
//! Round resolution is split in two so the shell can stage its reveal
//! delay without the engine touching a clock: [`RockPaperScissors::play`]
//! samples the opponent and stashes the pending round, and
//! [`RockPaperScissors::finalize_round`] — invoked by the shell after
//! its delay — applies scores and the visible record in one step.
//! Queries are safe in between; input is ignored until the round lands.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Engine, GameRng};

/// A throw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    /// All three throws, the computer's sampling domain.
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    /// The throw this one defeats (cyclic dominance).
    #[must_use]
    pub const fn beats(self) -> Self {
        match self {
            Choice::Rock => Choice::Scissors,
            Choice::Paper => Choice::Rock,
            Choice::Scissors => Choice::Paper,
        }
    }
}

/// Round outcome from the player's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Win,
    Lose,
    Tie,
}

/// A resolved round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub player: Choice,
    pub computer: Choice,
    pub outcome: RoundOutcome,
}

impl Round {
    fn resolve(player: Choice, computer: Choice) -> Self {
        let outcome = if player == computer {
            RoundOutcome::Tie
        } else if player.beats() == computer {
            RoundOutcome::Win
        } else {
            RoundOutcome::Lose
        };

        Self {
            player,
            computer,
            outcome,
        }
    }
}

/// Observable rock-paper-scissors state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpsState {
    /// Rounds the player has won. Monotone until `reset_score`.
    pub player_score: u32,
    /// Rounds the computer has won. Monotone until `reset_score`.
    pub computer_score: u32,
    /// Most recently finalized round.
    pub last_round: Option<Round>,
    /// A round has been played but not yet revealed.
    pub resolving: bool,
}

impl RpsState {
    fn new() -> Self {
        Self {
            player_score: 0,
            computer_score: 0,
            last_round: None,
            resolving: false,
        }
    }
}

/// Rock-paper-scissors rule engine.
#[derive(Clone, Debug)]
pub struct RockPaperScissors {
    rng: GameRng,
    state: RpsState,
    pending: Option<Round>,
}

impl RockPaperScissors {
    /// Create a fresh scoreboard with the given RNG.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self {
            rng,
            state: RpsState::new(),
            pending: None,
        }
    }

    /// Play a round.
    ///
    /// Ignored while a round is resolving. Samples the computer's throw
    /// uniformly, decides the outcome, and holds it pending until
    /// [`RockPaperScissors::finalize_round`].
    pub fn play(&mut self, choice: Choice) {
        if self.state.resolving {
            return;
        }

        let computer = Choice::ALL[self.rng.gen_range_usize(0..Choice::ALL.len())];
        let round = Round::resolve(choice, computer);
        debug!(?round, "round played");

        self.pending = Some(round);
        self.state.resolving = true;
    }

    /// Land the pending round: update the winning side's score and the
    /// visible record atomically. No-op when no round is in flight.
    pub fn finalize_round(&mut self) {
        let Some(round) = self.pending.take() else {
            return;
        };

        match round.outcome {
            RoundOutcome::Win => self.state.player_score += 1,
            RoundOutcome::Lose => self.state.computer_score += 1,
            RoundOutcome::Tie => {}
        }

        self.state.last_round = Some(round);
        self.state.resolving = false;
        debug!(
            player = self.state.player_score,
            computer = self.state.computer_score,
            "round finalized"
        );
    }

    /// Zero both scores and clear the round record.
    ///
    /// A round in flight stays in flight; its point still lands at
    /// finalization.
    pub fn reset_score(&mut self) {
        self.state.player_score = 0;
        self.state.computer_score = 0;
        self.state.last_round = None;
    }

    /// Read-only snapshot for rendering.
    #[must_use]
    pub fn state(&self) -> &RpsState {
        &self.state
    }
}

impl Engine for RockPaperScissors {
    type Input = Choice;
    type State = RpsState;

    fn apply_input(&mut self, input: Choice) {
        self.play(input);
    }

    /// Rock-paper-scissors has no end state; the scoreboard runs until
    /// the shell discards the engine.
    fn is_terminal(&self) -> bool {
        false
    }

    fn score(&self) -> u32 {
        self.state.player_score
    }

    fn reset(&mut self) {
        self.state = RpsState::new();
        self.pending = None;
    }

    fn state(&self) -> &RpsState {
        &self.state
    }
}
