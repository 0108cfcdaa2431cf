//! [`Meld`] (副露), a declared group: chi, pong, open kong, added kong, or
//! concealed kong.

use core::fmt::{Display, Formatter};

use crate::{player::Player, tile::Tile};

/// Sum type of all kinds of melds (副露) in Taiwan 16-tile Mahjong.
///
/// Unlike Japanese Riichi (which distinguishes sequences by which of the
/// three positions was called, and triplets by direction), Taiwan scoring
/// only cares about the meld *kind* and its tiles, so this is a single enum
/// with inline fields rather than one struct type per kind.
///
/// ## Optional `serde` support
///
/// `{type, tiles, from_player}`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum Meld {
    /// 吃: three consecutive number tiles of one suit, two from hand.
    Chi { tiles: [Tile; 3], from_player: Player },
    /// 碰: three identical tiles, two from hand.
    Pong { tile: Tile, from_player: Player },
    /// 明槓: four identical tiles, three from hand, claimed from a discard.
    OpenKong { tile: Tile, from_player: Player },
    /// 加槓: an existing Pong upgraded with a fourth tile drawn/held.
    AddedKong { tile: Tile, from_player: Player },
    /// 暗槓: four identical tiles, all from hand; never claimed.
    ConcealedKong { tile: Tile },
}

impl Meld {
    /// [`Meld::ConcealedKong`] only.
    pub fn is_concealed(&self) -> bool {
        matches!(self, Meld::ConcealedKong { .. })
    }

    /// [`Meld::OpenKong`], [`Meld::AddedKong`], or [`Meld::ConcealedKong`].
    pub fn is_kong(&self) -> bool {
        matches!(self, Meld::OpenKong { .. } | Meld::AddedKong { .. } | Meld::ConcealedKong { .. })
    }

    /// Number of tiles occupied by this meld: 3 for chi/pong, 4 for any kong.
    /// Never empty, so there is no `is_empty`.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        if self.is_kong() { 4 } else { 3 }
    }

    /// Player whose discard was claimed, if any (`None` for concealed kong).
    pub fn from_player(&self) -> Option<Player> {
        match self {
            Meld::Chi { from_player, .. }
            | Meld::Pong { from_player, .. }
            | Meld::OpenKong { from_player, .. }
            | Meld::AddedKong { from_player, .. } => Some(*from_player),
            Meld::ConcealedKong { .. } => None,
        }
    }

    /// The tiles making up this meld (for chi, ascending order; for
    /// pong/kong, all copies of the same tile).
    pub fn to_tiles(&self) -> Vec<Tile> {
        match self {
            Meld::Chi { tiles, .. } => tiles.to_vec(),
            Meld::Pong { tile, .. } => vec![*tile; 3],
            Meld::OpenKong { tile, .. } | Meld::AddedKong { tile, .. } => vec![*tile; 4],
            Meld::ConcealedKong { tile } => vec![*tile; 4],
        }
    }

    /// The 3-tile set this meld counts as for scoring purposes (kongs count
    /// as their equivalent triplet).
    pub fn as_set(&self) -> [Tile; 3] {
        match self {
            Meld::Chi { tiles, .. } => *tiles,
            Meld::Pong { tile, .. }
            | Meld::OpenKong { tile, .. }
            | Meld::AddedKong { tile, .. }
            | Meld::ConcealedKong { tile } => [*tile; 3],
        }
    }
}

impl Display for Meld {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Meld::Chi { tiles, .. } => write!(f, "Chi({}{}{})", tiles[0], tiles[1], tiles[2]),
            Meld::Pong { tile, .. } => write!(f, "Pong({0}{0}{0})", tile),
            Meld::OpenKong { tile, .. } => write!(f, "OpenKong({0}{0}{0}{0})", tile),
            Meld::AddedKong { tile, .. } => write!(f, "AddedKong({0}{0}{0}{0})", tile),
            Meld::ConcealedKong { tile } => write!(f, "ConcealedKong({0}{0}{0}{0})", tile),
        }
    }
}
