//! Tic-tac-toe: turn-based 3×3 board with win/tie detection.
//!
//! X always opens. Every move synchronously re-evaluates the outcome,
//! so the shell never observes a won board that still reports a player
//! to move.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::Engine;

/// The eight winning lines: three rows, three columns, two diagonals.
const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A player's mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// The other mark.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// Game outcome.
///
/// Leaves `InProgress` at most once per game and is then frozen until
/// reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    /// Three in a row; `line` holds the winning cell indices so the
    /// shell can highlight them.
    Win { mark: Mark, line: [usize; 3] },
    Tie,
}

/// Observable tic-tac-toe state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicTacToeState {
    /// Cells in row-major order; `None` is empty.
    pub board: [Option<Mark>; 9],
    /// Whose turn it is.
    pub to_move: Mark,
    pub outcome: Outcome,
}

impl TicTacToeState {
    fn new() -> Self {
        Self {
            board: [None; 9],
            to_move: Mark::X,
            outcome: Outcome::InProgress,
        }
    }
}

impl Default for TicTacToeState {
    fn default() -> Self {
        Self::new()
    }
}

/// Tic-tac-toe rule engine.
#[derive(Clone, Debug, Default)]
pub struct TicTacToe {
    state: TicTacToeState,
}

impl TicTacToe {
    /// Create a fresh game, X to move.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place the current player's mark on `cell` (row-major, 0-8).
    ///
    /// Occupied cells, out-of-range indices, and finished games are
    /// silent no-ops. A legal move evaluates the outcome and, if the
    /// game continues, hands the turn to the opponent.
    pub fn apply_move(&mut self, cell: usize) {
        if cell >= 9 || self.state.board[cell].is_some() || self.is_terminal() {
            return;
        }

        let mark = self.state.to_move;
        self.state.board[cell] = Some(mark);
        self.state.outcome = evaluate(&self.state.board);

        match self.state.outcome {
            Outcome::InProgress => self.state.to_move = mark.opponent(),
            outcome => debug!(?outcome, "game over"),
        }
    }

    /// Read-only snapshot for rendering.
    #[must_use]
    pub fn state(&self) -> &TicTacToeState {
        &self.state
    }
}

/// Scan the fixed lines; first fully-equal non-empty triple wins.
/// A full board with no winner is a tie.
fn evaluate(board: &[Option<Mark>; 9]) -> Outcome {
    for line in WIN_LINES {
        let [a, b, c] = line;
        if let Some(mark) = board[a] {
            if board[b] == Some(mark) && board[c] == Some(mark) {
                return Outcome::Win { mark, line };
            }
        }
    }

    if board.iter().all(Option::is_some) {
        Outcome::Tie
    } else {
        Outcome::InProgress
    }
}

impl Engine for TicTacToe {
    type Input = usize;
    type State = TicTacToeState;

    fn apply_input(&mut self, input: usize) {
        self.apply_move(input);
    }

    fn is_terminal(&self) -> bool {
        self.state.outcome != Outcome::InProgress
    }

    fn score(&self) -> u32 {
        0
    }

    fn reset(&mut self) {
        self.state = TicTacToeState::new();
    }

    fn state(&self) -> &TicTacToeState {
        &self.state
    }
}
