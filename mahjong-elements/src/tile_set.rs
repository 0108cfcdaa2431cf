//! [`TileSet34`]: an unordered multiset of the 34 standard tile kinds,
//! represented as a histogram. Flowers never participate in hand
//! decomposition, so they are not tracked here.

use core::fmt::{Display, Formatter};
use core::ops::{Index, IndexMut};

use derive_more::{Constructor, From, Index, IndexMut, Into, IntoIterator};

use crate::tile::Tile;

/// Histogram over the 34 standard (non-flower) tile kinds.
/// Can be directly indexed with [`Tile`].
#[derive(Clone, Debug, Eq, PartialEq, Constructor, From, Into, IntoIterator, Index, IndexMut)]
pub struct TileSet34(pub [u8; 34]);

impl Index<Tile> for TileSet34 {
    type Output = u8;
    fn index(&self, tile: Tile) -> &Self::Output {
        &self.0[tile.encoding() as usize]
    }
}

impl IndexMut<Tile> for TileSet34 {
    fn index_mut(&mut self, tile: Tile) -> &mut Self::Output {
        &mut self.0[tile.encoding() as usize]
    }
}

impl Default for TileSet34 {
    fn default() -> Self { TileSet34([0u8; 34]) }
}

impl Display for TileSet34 {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        for xs in self.0.chunks(9) {
            for x in xs {
                write!(f, "{}", x)?;
            }
            write!(f, ",")?;
        }
        Ok(())
    }
}

impl FromIterator<Tile> for TileSet34 {
    fn from_iter<T: IntoIterator<Item = Tile>>(tiles: T) -> Self {
        let mut ts = Self::default();
        for tile in tiles {
            debug_assert!(!tile.is_flower(), "flowers cannot be part of a hand's tile set");
            ts[tile] += 1;
        }
        ts
    }
}

impl TileSet34 {
    /// An empty tile set.
    pub const fn empty_set() -> Self { TileSet34([0; 34]) }

    /// The complete set of non-flower tiles in a game: 4 copies each of the
    /// 34 standard kinds (136 tiles total).
    pub const fn complete_set() -> Self { TileSet34([4; 34]) }

    pub fn total(&self) -> u32 { self.0.iter().map(|&x| x as u32).sum() }

    /// Yields each distinct tile kind present, paired with its count.
    pub fn iter_nonzero(&self) -> impl Iterator<Item = (Tile, u8)> + '_ {
        self.0.iter().enumerate().filter(|&(_, &c)| c > 0).map(|(i, &c)| {
            (Tile::from_encoding(i as u8).unwrap(), c)
        })
    }

    /// Expands back into a flat, sorted `Vec<Tile>`.
    pub fn to_vec(&self) -> Vec<Tile> {
        let mut out = Vec::with_capacity(self.total() as usize);
        for (tile, count) in self.iter_nonzero() {
            for _ in 0..count {
                out.push(tile);
            }
        }
        out
    }
}
