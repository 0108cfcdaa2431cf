//! Win detection: standard hands plus the two flower-based special wins.

use mahjong_decomp::{decompose_hand, Decomposition};
use mahjong_elements::tile::Tile;

/// Which condition produced a win.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WinKind {
    Standard,
    /// 八仙過海: all 8 flowers collected.
    BajianGuohai,
    /// 七搶一: held 7 flowers, claimed the 8th off someone else's draw.
    QiqiangYi,
}

/// 八仙過海: holding all 8 distinct flower tiles.
pub fn is_bajian_guohai(flowers: &[Tile]) -> bool {
    if flowers.len() != 8 {
        return false;
    }
    let mut sorted = flowers.to_vec();
    sorted.sort();
    sorted.dedup();
    sorted.len() == 8
}

/// 七搶一: holding 7 distinct flowers, and `incoming` is the 8th.
pub fn is_qiqiang_yi(flowers: &[Tile], incoming: Tile) -> bool {
    if !incoming.is_flower() || flowers.len() != 7 {
        return false;
    }
    let mut combined = flowers.to_vec();
    combined.push(incoming);
    combined.sort();
    combined.dedup();
    combined.len() == 8
}

/// Checks every win condition. `hand` excludes `win_tile`; `flowers`
/// excludes it too (the caller decides whether `win_tile` itself is a
/// flower, for 八仙過海 purposes).
///
/// `is_flower_steal` corresponds to a 七搶一 claim: in that situation only
/// the flower-completion check applies, the discarder never exposed a real
/// discard to decompose a standard hand from.
pub fn is_winning_hand(
    hand: &[Tile],
    sets_needed: usize,
    flowers: &[Tile],
    win_tile: Tile,
    is_flower_steal: bool,
) -> Option<(WinKind, Option<Decomposition>)> {
    if is_flower_steal {
        return if is_qiqiang_yi(flowers, win_tile) {
            Some((WinKind::QiqiangYi, None))
        } else {
            None
        };
    }

    let mut flower_set = flowers.to_vec();
    if win_tile.is_flower() {
        flower_set.push(win_tile);
    }
    if is_bajian_guohai(&flower_set) {
        return Some((WinKind::BajianGuohai, None));
    }

    let mut full_hand = hand.to_vec();
    full_hand.push(win_tile);
    decompose_hand(&full_hand, sets_needed).map(|d| (WinKind::Standard, Some(d)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mahjong_elements::tile::tiles_from_str;

    #[test]
    fn standard_win_detected() {
        let hand: Vec<Tile> = tiles_from_str("123456789m123p456p1s").collect();
        let result = is_winning_hand(&hand, 5, &[], mahjong_elements::t!("1s"), false);
        assert!(matches!(result, Some((WinKind::Standard, Some(_)))));
    }

    #[test]
    fn bajian_guohai_from_all_flowers() {
        let flowers: Vec<Tile> = (0..7).map(|i| Tile::from_flower(i).unwrap()).collect();
        let result = is_winning_hand(&[], 5, &flowers, Tile::from_flower(7).unwrap(), false);
        assert!(matches!(result, Some((WinKind::BajianGuohai, None))));
    }

    #[test]
    fn qiqiang_yi_on_flower_steal() {
        let flowers: Vec<Tile> = (0..7).map(|i| Tile::from_flower(i).unwrap()).collect();
        let result = is_winning_hand(&[], 5, &flowers, Tile::from_flower(7).unwrap(), true);
        assert!(matches!(result, Some((WinKind::QiqiangYi, None))));
    }

    #[test]
    fn not_a_win_returns_none() {
        let hand: Vec<Tile> = tiles_from_str("123456789m123p456p1s").collect();
        assert!(is_winning_hand(&hand, 5, &[], mahjong_elements::t!("3s"), false).is_none());
    }
}
