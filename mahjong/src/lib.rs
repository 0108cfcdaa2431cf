//! Taiwan 16-tile Mahjong engine: wall, deal, action validators, a
//! turn/claim session state machine, and yaku scoring.
//!
//! Rendering, persistence, networking, and AI agents live outside this
//! crate; it only models the rules of one hand.

pub mod actions;
pub mod deal;
pub mod errors;
pub mod rules;
pub mod scoring;
pub mod session;
pub mod state;
pub mod wall;
pub mod win;

pub mod prelude {
    pub use crate::actions::*;
    pub use crate::errors::*;
    pub use crate::rules::Ruleset;
    pub use crate::scoring::{score_hand, ScoringResult, WinCircumstances, WinContext, WinSource};
    pub use crate::session::{Action, GameSession};
    pub use crate::state::{GameState, Phase, PlayerState};
    pub use crate::wall::{build_full_deck, Wall};
    pub use crate::win::{is_winning_hand, WinKind};
}
