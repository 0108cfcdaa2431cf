//! Wall construction and shuffling.
//!
//! The 144-tile deck (136 standard tiles + 8 flowers) is shuffled and split
//! into a 128-tile live wall, drawn from the head, and a 16-tile back wall
//! (鐵八墩) reserved for kong and flower replacement draws.

use mahjong_elements::tile::Tile;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::errors::ResourceExhausted;
use crate::rules::Ruleset;

/// The full 144-tile deck: 4 copies of each of the 34 standard tile kinds,
/// plus 1 copy of each of the 8 flowers.
pub fn build_full_deck() -> Vec<Tile> {
    let mut deck = Vec::with_capacity(144);
    for encoding in 0..Tile::NUM_STANDARD {
        let tile = Tile::from_encoding(encoding).unwrap();
        deck.extend(std::iter::repeat_n(tile, 4));
    }
    for index in 0..Tile::NUM_FLOWERS {
        deck.push(Tile::from_flower(index).unwrap());
    }
    deck
}

/// The live wall (drawn from the front) and the back wall (塊尾, drawn to
/// replace flowers and to serve kong replacement draws).
#[derive(Clone, Debug, Default)]
pub struct Wall {
    pub live: Vec<Tile>,
    pub back: Vec<Tile>,
}

impl Wall {
    /// Shuffles a fresh 144-tile deck with `rng` and splits it according to
    /// `ruleset.back_wall_size`. The RNG is caller-supplied so that games
    /// can be replayed deterministically from a stored seed.
    pub fn shuffle_new(rng: &mut impl Rng, ruleset: &Ruleset) -> Self {
        let mut deck = build_full_deck();
        deck.shuffle(rng);
        let split = deck.len() - ruleset.back_wall_size as usize;
        let back = deck.split_off(split);
        Wall { live: deck, back }
    }

    /// Draws the next tile from the head of the live wall.
    pub fn draw(&mut self) -> Result<Tile, ResourceExhausted> {
        if self.live.is_empty() {
            return Err(ResourceExhausted::WallEmpty);
        }
        Ok(self.live.remove(0))
    }

    /// Draws a replacement tile from the back wall (flower replacement or
    /// kong replacement draw).
    pub fn draw_from_back(&mut self) -> Result<Tile, ResourceExhausted> {
        self.back.pop().ok_or(ResourceExhausted::NoFlowerReplacement(Tile::MIN))
    }

    pub fn live_count(&self) -> usize { self.live.len() }
    pub fn back_count(&self) -> usize { self.back.len() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn full_deck_has_144_tiles() {
        assert_eq!(build_full_deck().len(), 144);
    }

    #[test]
    fn full_deck_has_four_of_each_standard_and_one_of_each_flower() {
        let deck = build_full_deck();
        for encoding in 0..Tile::NUM_STANDARD {
            let tile = Tile::from_encoding(encoding).unwrap();
            assert_eq!(deck.iter().filter(|&&t| t == tile).count(), 4);
        }
        for index in 0..Tile::NUM_FLOWERS {
            let tile = Tile::from_flower(index).unwrap();
            assert_eq!(deck.iter().filter(|&&t| t == tile).count(), 1);
        }
    }

    #[test]
    fn shuffle_splits_into_live_and_back() {
        let mut rng = StdRng::seed_from_u64(42);
        let ruleset = Ruleset::default();
        let wall = Wall::shuffle_new(&mut rng, &ruleset);
        assert_eq!(wall.live.len(), 144 - 16);
        assert_eq!(wall.back.len(), 16);
    }

    #[test]
    fn same_seed_reproduces_same_wall() {
        let ruleset = Ruleset::default();
        let mut rng1 = StdRng::seed_from_u64(7);
        let mut rng2 = StdRng::seed_from_u64(7);
        let wall1 = Wall::shuffle_new(&mut rng1, &ruleset);
        let wall2 = Wall::shuffle_new(&mut rng2, &ruleset);
        assert_eq!(wall1.live, wall2.live);
        assert_eq!(wall1.back, wall2.back);
    }

    #[test]
    fn draw_consumes_from_head() {
        let mut wall = Wall { live: vec![Tile::from_encoding(1).unwrap(), Tile::from_encoding(2).unwrap()], back: vec![] };
        assert_eq!(wall.draw().unwrap(), Tile::from_encoding(1).unwrap());
        assert_eq!(wall.live_count(), 1);
    }

    #[test]
    fn draw_from_empty_wall_errors() {
        let mut wall = Wall::default();
        assert!(matches!(wall.draw(), Err(ResourceExhausted::WallEmpty)));
    }
}
