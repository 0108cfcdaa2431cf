//! Error types for action validation, wall/deal mechanics, and scoring.

use mahjong_elements::meld::Meld;
use mahjong_elements::player::Player;
use mahjong_elements::tile::Tile;
use thiserror::Error;

/// A requested action is not legal given the current state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidAction {
    #[error("tile {0} does not exist in {1}'s closed hand")]
    TileNotInHand(Tile, Player),

    #[error("cannot Chi {called} with own {t1}{t2}; player to the left only")]
    InvalidChi { called: Tile, t1: Tile, t2: Tile },

    #[error("cannot Pong {called} without at least two {called} in hand")]
    InvalidPong { called: Tile },

    #[error("cannot open-kong {0}; need all four copies claimable")]
    InvalidOpenKong(Tile),

    #[error("cannot add {tile} to an existing Pong; no matching meld from {from_player}")]
    NoPongForAddedKong { tile: Tile, from_player: Player },

    #[error("cannot concealed-kong {0}; not enough copies in hand")]
    NotEnoughForConcealedKong(Tile),

    #[error("{0} is not a legal claim on meld {1}")]
    IllegalClaim(&'static str, Meld),

    #[error("action submitted out of turn: expected {expected}, got {actual}")]
    OutOfTurn { expected: Player, actual: Player },
}

/// A resource (wall, dead wall, flower replacement pool) ran out mid-hand.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceExhausted {
    #[error("live wall is empty; hand ends in a draw")]
    WallEmpty,

    #[error("dead wall has no tiles left to replace flower {0}")]
    NoFlowerReplacement(Tile),
}

/// An internal invariant was violated; indicates a bug rather than bad
/// input, since callers are expected to have validated against the public
/// API already.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("deck has {0} tiles, expected 144")]
    WrongDeckSize(usize),

    #[error("hand for {0} has {1} tiles, expected {2}")]
    WrongHandSize(Player, usize, usize),

    #[error("tai subtotal {0} exceeds configured max_tai before clamping")]
    TaiOverflow(u32),
}

/// Top-level error for engine operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    InvalidAction(#[from] InvalidAction),

    #[error(transparent)]
    ResourceExhausted(#[from] ResourceExhausted),

    #[error(transparent)]
    InvariantViolation(#[from] InvariantViolation),

    /// Not an error condition by itself (a hand simply may not decompose
    /// at a given moment) but threaded through `Result`-returning APIs
    /// that need to distinguish "not a win" from "malformed input".
    #[error("hand has no valid 5-set-plus-pair decomposition")]
    NoDecomposition,
}
