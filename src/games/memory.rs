//! Memory match: a timed-reveal pair-matching board.
//!
//! Matching itself is immediate: the moment the second card of a
//! comparison turns face-up, the engine marks matches, scores, and
//! checks the win. Only the flip-back of a failed pair — and the move
//! counter, which counts comparisons — wait for
//! [`MemoryMatch::finalize_resolution`], which the shell invokes after
//! its reveal delay. While two cards are up, further flips are ignored.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{Engine, GameRng};

/// Index of a card in the shuffled layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u8);

impl CardId {
    /// Create a new card id.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Position of the card in the layout.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Pair identity. Opaque to the engine; the shell maps symbols to art.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(pub u8);

/// One card on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub symbol: Symbol,
    pub face_up: bool,
    /// Matched cards stay face-up for the rest of the game.
    pub matched: bool,
}

/// Memory match configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Number of symbol pairs; the board holds twice as many cards.
    pub pair_count: u8,
    /// Score awarded per matched pair.
    pub points_per_match: u32,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            pair_count: 8,
            points_per_match: 10,
        }
    }
}

/// Observable memory-match state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryState {
    /// The shuffled layout.
    pub cards: Vec<Card>,
    /// Cards pending comparison, oldest first. Never more than two.
    pub revealed: SmallVec<[CardId; 2]>,
    /// Completed comparisons, matched or not.
    pub moves: u32,
    pub score: u32,
    /// True once every card is matched; never reverts within a game.
    pub won: bool,
}

/// Memory match rule engine.
#[derive(Clone, Debug)]
pub struct MemoryMatch {
    config: MemoryConfig,
    rng: GameRng,
    state: MemoryState,
}

impl MemoryMatch {
    /// Create a game with the default 8-pair board.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self::with_config(MemoryConfig::default(), rng)
    }

    /// Create a game with a custom board.
    ///
    /// Panics if `pair_count` is zero or the board would not be
    /// addressable by [`CardId`].
    #[must_use]
    pub fn with_config(config: MemoryConfig, mut rng: GameRng) -> Self {
        assert!(config.pair_count > 0, "Must have at least one pair");
        assert!(
            config.pair_count <= u8::MAX / 2,
            "Card ids are u8; at most 127 pairs"
        );

        let state = deal(&config, &mut rng);
        Self { config, rng, state }
    }

    /// Get the board configuration.
    #[must_use]
    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    /// Read-only snapshot for rendering.
    #[must_use]
    pub fn state(&self) -> &MemoryState {
        &self.state
    }

    /// Turn a card face-up.
    ///
    /// No-ops: a comparison already pending, an out-of-range id, or a
    /// card that is face-up or matched. The second card of a pair
    /// resolves the comparison immediately — matched cards lock
    /// face-up and score; the flip-back of a failed pair waits for
    /// [`MemoryMatch::finalize_resolution`].
    pub fn flip(&mut self, id: CardId) {
        if self.state.revealed.len() >= 2 {
            return;
        }

        let Some(card) = self.state.cards.get_mut(id.index()) else {
            return;
        };
        if card.face_up || card.matched {
            return;
        }

        card.face_up = true;
        self.state.revealed.push(id);

        if self.state.revealed.len() == 2 {
            self.resolve();
        }
    }

    /// Compare the two revealed cards.
    fn resolve(&mut self) {
        let (first, second) = (self.state.revealed[0], self.state.revealed[1]);
        let symbol = self.state.cards[first.index()].symbol;

        if symbol != self.state.cards[second.index()].symbol {
            return;
        }

        self.state.cards[first.index()].matched = true;
        self.state.cards[second.index()].matched = true;
        self.state.score += self.config.points_per_match;
        debug!(?symbol, score = self.state.score, "pair matched");

        if self.state.cards.iter().all(|card| card.matched) {
            self.state.won = true;
            debug!(moves = self.state.moves, "all pairs matched");
        }
    }

    /// Complete the pending comparison: flip unmatched reveals back
    /// face-down, clear the pending pair, and count the move.
    ///
    /// No-op unless two cards are revealed. The move counts whether or
    /// not the pair matched.
    pub fn finalize_resolution(&mut self) {
        if self.state.revealed.len() < 2 {
            return;
        }

        for id in self.state.revealed.drain(..) {
            let card = &mut self.state.cards[id.index()];
            if !card.matched {
                card.face_up = false;
            }
        }

        self.state.moves += 1;
    }

    /// Re-deal: a fresh shuffle, all cards face-down, counters cleared.
    pub fn reset(&mut self) {
        self.state = deal(&self.config, &mut self.rng);
    }
}

/// Build and shuffle a fresh layout.
fn deal(config: &MemoryConfig, rng: &mut GameRng) -> MemoryState {
    let mut cards: Vec<Card> = (0..config.pair_count)
        .flat_map(|pair| {
            let card = Card {
                symbol: Symbol(pair),
                face_up: false,
                matched: false,
            };
            [card, card]
        })
        .collect();

    rng.shuffle(&mut cards);

    MemoryState {
        cards,
        revealed: SmallVec::new(),
        moves: 0,
        score: 0,
        won: false,
    }
}

impl Engine for MemoryMatch {
    type Input = CardId;
    type State = MemoryState;

    fn apply_input(&mut self, input: CardId) {
        self.flip(input);
    }

    fn is_terminal(&self) -> bool {
        self.state.won
    }

    fn score(&self) -> u32 {
        self.state.score
    }

    fn reset(&mut self) {
        MemoryMatch::reset(self);
    }

    fn state(&self) -> &MemoryState {
        &self.state
    }
}
