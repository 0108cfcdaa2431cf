//! Hand decomposition and shanten search for Taiwan 16-tile Mahjong.
//!
//! This crate is deliberately ignorant of sessions, scoring, or rules: it
//! is a pure function library over tile multisets.

pub mod decomposer;
pub mod shanten;

pub use decomposer::{decompose_hand, is_standard_win, tenpai_tiles, Decomposition};
pub use shanten::shanten_number;
