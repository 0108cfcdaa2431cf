//! Validators for chi, pong, and the three kong variants.

use mahjong_elements::meld::Meld;
use mahjong_elements::player::Player;
use mahjong_elements::tile::Tile;

/// Counts how many copies of `tile` are present in `hand`.
fn count_in(hand: &[Tile], tile: Tile) -> usize { hand.iter().filter(|&&t| t == tile).count() }

/// All valid 3-tile sequences containing `discard` that can be formed
/// using 2 tiles from `hand`. `discard` may sit at the low, middle, or
/// high end of the sequence.
pub fn chi_combinations(hand: &[Tile], discard: Tile) -> Vec<[Tile; 3]> {
    if !discard.is_number() {
        return Vec::new();
    }
    let suit = discard.suit();
    let val = discard.num() as i32;
    let mut combos = Vec::new();
    for offset in 0..3i32 {
        let seq_vals: Vec<i32> = (0..3).map(|i| val - offset + i).collect();
        if seq_vals.iter().any(|&v| !(1..=9).contains(&v)) {
            continue;
        }
        let seq: Vec<Tile> = seq_vals
            .iter()
            .map(|&v| Tile::from_num_suit(v as u8, suit).unwrap())
            .collect();
        let mut remaining = hand.to_vec();
        let needed: Vec<Tile> = seq.iter().copied().filter(|&t| t != discard).collect();
        let mut ok = true;
        for &t in &needed {
            if let Some(pos) = remaining.iter().position(|&x| x == t) {
                remaining.remove(pos);
            } else {
                ok = false;
                break;
            }
        }
        if ok {
            let mut tiles = [seq[0], seq[1], seq[2]];
            tiles.sort();
            if !combos.contains(&tiles) {
                combos.push(tiles);
            }
        }
    }
    combos
}

pub fn validate_chi(hand: &[Tile], discard: Tile) -> bool { !chi_combinations(hand, discard).is_empty() }

pub fn validate_pong(hand: &[Tile], discard: Tile) -> bool { count_in(hand, discard) >= 2 }

pub fn validate_open_kong(hand: &[Tile], discard: Tile) -> bool { count_in(hand, discard) >= 3 }

pub fn validate_added_kong(melds: &[Meld], drawn_tile: Tile) -> bool {
    melds.iter().any(|m| matches!(m, Meld::Pong { tile, .. } if *tile == drawn_tile))
}

pub fn validate_concealed_kong(hand: &[Tile], tile: Tile) -> bool { count_in(hand, tile) >= 4 }

/// Builds the [`Meld`] for a validated claim. Callers must validate first.
pub fn make_chi(tiles: [Tile; 3], from_player: Player) -> Meld { Meld::Chi { tiles, from_player } }
pub fn make_pong(tile: Tile, from_player: Player) -> Meld { Meld::Pong { tile, from_player } }
pub fn make_open_kong(tile: Tile, from_player: Player) -> Meld { Meld::OpenKong { tile, from_player } }
pub fn make_added_kong(tile: Tile, from_player: Player) -> Meld { Meld::AddedKong { tile, from_player } }
pub fn make_concealed_kong(tile: Tile) -> Meld { Meld::ConcealedKong { tile } }
