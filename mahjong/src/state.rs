//! Core data structures describing one hand's state.

use mahjong_elements::meld::Meld;
use mahjong_elements::player::Player;
use mahjong_elements::tile::Tile;

/// Per-player state: concealed hand, declared melds, collected flowers,
/// discards, and dealer bookkeeping.
#[derive(Clone, Debug)]
pub struct PlayerState {
    pub seat: Player,
    pub hand: Vec<Tile>,
    pub melds: Vec<Meld>,
    pub flowers: Vec<Tile>,
    pub discards: Vec<Tile>,
    pub is_dealer: bool,
    /// Consecutive dealer rounds (連莊/拉莊 streak), only meaningful while
    /// `is_dealer` is true.
    pub streak: u32,
}

impl PlayerState {
    pub fn new(seat: Player) -> Self {
        PlayerState {
            seat,
            hand: Vec::new(),
            melds: Vec::new(),
            flowers: Vec::new(),
            discards: Vec::new(),
            is_dealer: false,
            streak: 0,
        }
    }

    /// Number of sets still needed to complete a standard hand, given the
    /// melds already declared.
    pub fn sets_needed(&self) -> usize { 5 - self.melds.len() }
}

/// Which phase of a hand is currently active.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Deal,
    FlowerReplacement,
    Play,
    Win,
    Draw,
}

/// Full state of one hand in progress.
#[derive(Clone, Debug)]
pub struct GameState {
    pub players: [PlayerState; 4],
    pub discard_pool: Vec<Tile>,
    pub current_player: Player,
    pub round_wind: Player,
    pub round_number: u32,
    pub dealer_index: Player,
    pub last_discard: Option<Tile>,
    pub phase: Phase,
    /// Per-player tenpai-after-deal flag, used to detect 天聽/地聽.
    pub tenpai_after_deal: [bool; 4],
    /// Set once `phase` becomes `Win`.
    pub winner: Option<Player>,
}

impl GameState {
    pub fn new_hand(dealer: Player, round_wind: Player, round_number: u32) -> Self {
        let mut players = [
            PlayerState::new(dealer),
            PlayerState::new(dealer.add_u8(1)),
            PlayerState::new(dealer.add_u8(2)),
            PlayerState::new(dealer.add_u8(3)),
        ];
        players.sort_by_key(|p| p.seat.to_usize());
        players[dealer.to_usize()].is_dealer = true;
        GameState {
            players,
            discard_pool: Vec::new(),
            current_player: dealer,
            round_wind,
            round_number,
            dealer_index: dealer,
            last_discard: None,
            phase: Phase::Deal,
            tenpai_after_deal: [false; 4],
            winner: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mahjong_elements::player::P1;

    #[test]
    fn new_hand_marks_dealer_and_orders_seats() {
        let gs = GameState::new_hand(P1, P1, 0);
        assert!(gs.players[1].is_dealer);
        assert_eq!(gs.players[0].seat.to_usize(), 0);
        assert_eq!(gs.players[3].seat.to_usize(), 3);
        assert_eq!(gs.current_player, P1);
    }

    #[test]
    fn sets_needed_shrinks_with_melds() {
        let mut p = PlayerState::new(P1);
        assert_eq!(p.sets_needed(), 5);
        p.melds.push(crate::actions::make_pong(mahjong_elements::t!("5s"), P1));
        assert_eq!(p.sets_needed(), 4);
    }
}
