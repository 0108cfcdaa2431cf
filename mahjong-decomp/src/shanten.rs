//! Shanten number calculator for Taiwan 16-tile Mahjong.
//!
//! Grounded directly on the reference `shanten.py` count-vector recursion:
//! mutate the histogram in place while descending, restore on unwind,
//! prune whenever the remaining tiles cannot possibly beat the current
//! best.

use mahjong_elements::tile::Tile;
use mahjong_elements::tile_set::TileSet34;

const NUM_TILE_TYPES: u8 = 34;

/// Shanten number for a concealed `hand` given `sets_needed` (`5 -
/// melds.len()`).
///
/// Returns -1 for an already-winning hand, 0 for tenpai, n for n tiles
/// away from tenpai.
pub fn shanten_number(hand: &[Tile], sets_needed: usize) -> i32 {
    let counts: TileSet34 = hand.iter().copied().collect();
    let mut counts = counts.0;
    let mut best = 2 * sets_needed as i32;
    search(&mut counts, 0, sets_needed as i32, 0, 0, false, &mut best);
    best
}

#[allow(clippy::too_many_arguments)]
fn search(
    counts: &mut [u8; 34],
    mut idx: u8,
    sets_needed: i32,
    mentsu: i32,
    taatsu: i32,
    jantai: bool,
    best: &mut i32,
) {
    let effective_taatsu = taatsu.min(sets_needed - mentsu);
    let s = 2 * (sets_needed - mentsu) - effective_taatsu - i32::from(jantai);
    if s < *best {
        *best = s;
    }
    if *best <= -1 {
        return;
    }

    while idx < NUM_TILE_TYPES && counts[idx as usize] == 0 {
        idx += 1;
    }
    if idx >= NUM_TILE_TYPES {
        return;
    }

    let remaining: i32 = counts[idx as usize..].iter().map(|&c| c as i32).sum();
    let max_new_mentsu = remaining / 3;
    let max_new_taatsu = (remaining - max_new_mentsu * 3) / 2;
    let theoretical_best = 2 * (sets_needed - mentsu - max_new_mentsu)
        - (taatsu + max_new_taatsu).min(sets_needed - mentsu - max_new_mentsu)
        - 1;
    if theoretical_best >= *best {
        return;
    }

    let i = idx as usize;
    let in_suit_pos = idx % 9;
    let is_number = idx < 27;

    // Triplet.
    if counts[i] >= 3 {
        counts[i] -= 3;
        search(counts, idx, sets_needed, mentsu + 1, taatsu, jantai, best);
        counts[i] += 3;
    }

    // Sequence.
    if is_number && in_suit_pos <= 6 && counts[i] >= 1 && counts[i + 1] >= 1 && counts[i + 2] >= 1 {
        counts[i] -= 1;
        counts[i + 1] -= 1;
        counts[i + 2] -= 1;
        search(counts, idx, sets_needed, mentsu + 1, taatsu, jantai, best);
        counts[i] += 1;
        counts[i + 1] += 1;
        counts[i + 2] += 1;
    }

    // Pair as the hand's jantou (pair).
    if !jantai && counts[i] >= 2 {
        counts[i] -= 2;
        search(counts, idx, sets_needed, mentsu, taatsu, true, best);
        counts[i] += 2;
    }

    if taatsu < sets_needed - mentsu {
        // Pair used as a partial set (once jantou is already claimed).
        if jantai && counts[i] >= 2 {
            counts[i] -= 2;
            search(counts, idx, sets_needed, mentsu, taatsu + 1, jantai, best);
            counts[i] += 2;
        }

        // Adjacent partial sequence (e.g. 4m5m waiting on 3m/6m).
        if is_number && in_suit_pos <= 7 && counts[i] >= 1 && counts[i + 1] >= 1 {
            counts[i] -= 1;
            counts[i + 1] -= 1;
            search(counts, idx, sets_needed, mentsu, taatsu + 1, jantai, best);
            counts[i] += 1;
            counts[i + 1] += 1;
        }

        // Skip-one partial sequence (e.g. 4m6m waiting on 5m).
        if is_number && in_suit_pos <= 6 && counts[i] >= 1 && counts[i + 2] >= 1 {
            counts[i] -= 1;
            counts[i + 2] -= 1;
            search(counts, idx, sets_needed, mentsu, taatsu + 1, jantai, best);
            counts[i] += 1;
            counts[i + 2] += 1;
        }
    }

    // Skip this tile type entirely.
    let saved = counts[i];
    counts[i] = 0;
    search(counts, idx + 1, sets_needed, mentsu, taatsu, jantai, best);
    counts[i] = saved;
}

#[cfg(test)]
mod tests {
    use super::*;
    use mahjong_elements::tile::tiles_from_str;

    fn hand(s: &str) -> Vec<Tile> { tiles_from_str(s).collect() }

    #[test]
    fn complete_hand_is_minus_one() {
        let h = hand("123456789m123p456p1s1s");
        assert_eq!(shanten_number(&h, 5), -1);
    }

    #[test]
    fn single_tile_away_is_tenpai() {
        let h = hand("123456789m123p456p1s");
        assert_eq!(shanten_number(&h, 5), 0);
    }

    #[test]
    fn far_from_tenpai_hand() {
        let h = hand("19m19p19s1m3m5m7m9p2p4p");
        assert!(shanten_number(&h, 5) > 0);
    }

    #[test]
    fn all_triplets_is_minus_one() {
        let h = hand("111m222m333m444m555p99s");
        assert_eq!(shanten_number(&h, 5), -1);
    }

    #[test]
    fn fewer_sets_needed_with_melds() {
        // Only 2 sets + pair needed (3 melds already exposed).
        let h = hand("123m456p1s1s");
        assert_eq!(shanten_number(&h, 2), -1);
    }
}
