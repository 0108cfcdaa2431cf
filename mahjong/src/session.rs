//! Turn/claim state machine for one hand: draw, discard, claims, and the
//! win-over-kong-over-pong-over-chi-over-pass priority arbitration.

use mahjong_elements::meld::Meld;
use mahjong_elements::player::Player;
use mahjong_elements::tile::Tile;

use crate::actions::{
    chi_combinations, make_added_kong, make_chi, make_concealed_kong, make_open_kong, make_pong,
    validate_added_kong, validate_chi, validate_concealed_kong, validate_open_kong, validate_pong,
};
use crate::deal::{deal_initial_hands, flower_replacement};
use crate::errors::{EngineError, InvalidAction, ResourceExhausted};
use crate::rules::Ruleset;
use crate::state::{GameState, Phase};
use crate::wall::Wall;
use crate::win::is_winning_hand;

/// A claimable action offered to a player after a discard, or an
/// active-turn action offered to the player on turn.
///
/// Active-turn variants (`Draw`, `Discard`, `ConcealedKong`, `AddedKong`,
/// `Win`) always apply to the session's current player. Claim variants
/// (`Chi`, `Pong`, `OpenKong`, `ClaimWin`, `Pass`) carry the claimant's
/// `player` index, since more than one player may hold a legal claim on
/// the same discard and [`GameSession::step`] must know which one is
/// acting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Draw,
    Discard(Tile),
    ConcealedKong(Tile),
    AddedKong(Tile),
    Win,
    Chi { player: Player, tiles: [Tile; 3] },
    Pong { player: Player },
    OpenKong { player: Player },
    ClaimWin { player: Player },
    Pass { player: Player },
}

/// The claimant of a claim-phase action, or `None` for active-turn actions.
fn claim_player(action: &Action) -> Option<Player> {
    match *action {
        Action::Chi { player, .. }
        | Action::Pong { player }
        | Action::OpenKong { player }
        | Action::ClaimWin { player }
        | Action::Pass { player } => Some(player),
        _ => None,
    }
}

/// Priority of a claim action: lower sorts first. Matches win > open_kong
/// > pong > chi > pass.
fn claim_priority(action: &Action) -> u8 {
    match action {
        Action::ClaimWin { .. } => 0,
        Action::OpenKong { .. } => 1,
        Action::Pong { .. } => 2,
        Action::Chi { .. } => 3,
        Action::Pass { .. } => 4,
        _ => 99,
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum SubPhase {
    ActiveTurn,
    Claim,
}

/// Drives one hand of play: wall, per-player state, and the turn/claim
/// sub-phase machinery.
pub struct GameSession {
    pub state: GameState,
    pub wall: Wall,
    pub ruleset: Ruleset,
    sub_phase: SubPhase,
    pending_discard: Option<Tile>,
    pending_discarder: Option<Player>,
    just_drew: bool,
    after_kong: bool,
    passed_players: Vec<Player>,
}

impl GameSession {
    pub fn new(
        rng: &mut impl rand::Rng,
        ruleset: Ruleset,
        dealer: Player,
        round_wind: Player,
        round_number: u32,
    ) -> Result<Self, EngineError> {
        let mut state = GameState::new_hand(dealer, round_wind, round_number);
        let mut wall = Wall::shuffle_new(rng, &ruleset);
        deal_initial_hands(&mut wall, &mut state.players, dealer)?;
        state.phase = Phase::FlowerReplacement;
        flower_replacement(&mut wall, &mut state.players, dealer)?;
        state.phase = Phase::Play;
        state.current_player = dealer;
        Ok(GameSession {
            state,
            wall,
            ruleset,
            sub_phase: SubPhase::ActiveTurn,
            pending_discard: None,
            pending_discarder: None,
            just_drew: true, // dealer's 17th tile acts like a draw
            after_kong: false,
            passed_players: Vec::new(),
        })
    }

    /// Legal actions for `player` in the current state.
    pub fn legal_actions(&self, player: Player) -> Vec<Action> {
        if self.state.phase != Phase::Play {
            return Vec::new();
        }
        match self.sub_phase {
            SubPhase::Claim => {
                if Some(player) == self.pending_discarder || self.passed_players.contains(&player)
                {
                    Vec::new()
                } else {
                    self.claim_actions(player)
                }
            }
            SubPhase::ActiveTurn => {
                if player != self.state.current_player {
                    return Vec::new();
                }
                self.active_turn_actions(player)
            }
        }
    }

    fn active_turn_actions(&self, player: Player) -> Vec<Action> {
        let ps = &self.state.players[player.to_usize()];
        if ps.hand.len() <= 16 && !self.just_drew {
            return vec![Action::Draw];
        }
        let mut actions = Vec::new();
        if self.just_drew {
            let mut distinct: Vec<Tile> = ps.hand.clone();
            distinct.sort();
            distinct.dedup();
            for &tile in &distinct {
                let mut rest = ps.hand.clone();
                let pos = rest.iter().position(|&t| t == tile).unwrap();
                rest.remove(pos);
                if is_winning_hand(&rest, ps.sets_needed(), &ps.flowers, tile, false).is_some() {
                    actions.push(Action::Win);
                    break;
                }
            }
        }
        let mut distinct: Vec<Tile> = ps.hand.clone();
        distinct.sort();
        distinct.dedup();
        for &tile in &distinct {
            if validate_concealed_kong(&ps.hand, tile) {
                actions.push(Action::ConcealedKong(tile));
            }
            if validate_added_kong(&ps.melds, tile) {
                actions.push(Action::AddedKong(tile));
            }
        }
        for &tile in &distinct {
            actions.push(Action::Discard(tile));
        }
        actions
    }

    fn claim_actions(&self, player: Player) -> Vec<Action> {
        let Some(discard) = self.pending_discard else { return Vec::new() };
        let Some(discarder) = self.pending_discarder else { return Vec::new() };
        let ps = &self.state.players[player.to_usize()];
        let mut actions = Vec::new();

        if is_winning_hand(&ps.hand, ps.sets_needed(), &ps.flowers, discard, false).is_some() {
            actions.push(Action::ClaimWin { player });
        }
        if validate_open_kong(&ps.hand, discard) {
            actions.push(Action::OpenKong { player });
        }
        if validate_pong(&ps.hand, discard) {
            actions.push(Action::Pong { player });
        }
        if player == discarder.add_u8(1) && validate_chi(&ps.hand, discard) {
            for tiles in chi_combinations(&ps.hand, discard) {
                actions.push(Action::Chi { player, tiles });
            }
        }
        actions.push(Action::Pass { player });
        actions
    }

    /// Given every claimant's chosen action for the pending discard,
    /// resolves who actually gets to act: win beats open-kong beats pong
    /// beats chi beats pass; ties break by proximity (counter-clockwise)
    /// to the discarder.
    pub fn resolve_claims(&self, candidates: &[Action]) -> Option<Action> {
        let discarder = self.pending_discarder?;
        candidates
            .iter()
            .filter(|action| !matches!(action, Action::Pass { .. }))
            .filter_map(|action| claim_player(action).map(|player| (player, action)))
            .min_by_key(|(player, action)| {
                let distance = (player.to_u8() + 4 - discarder.to_u8()) % 4;
                (claim_priority(action), distance)
            })
            .map(|(_, action)| action.clone())
    }

    /// Applies `action`, the single public mutation entry point. Dispatches
    /// active-turn actions to the current player and claim actions to the
    /// player they name.
    pub fn step(&mut self, action: Action) -> Result<(), EngineError> {
        match action {
            Action::Draw => self.draw(),
            Action::Discard(tile) => self.discard(tile),
            Action::ConcealedKong(tile) => self.declare_concealed_kong(tile),
            Action::AddedKong(tile) => self.declare_added_kong(tile),
            Action::Win => {
                self.declare_win(self.state.current_player);
                Ok(())
            }
            Action::Chi { player, tiles } => self.claim_chi(player, tiles),
            Action::Pong { player } => self.claim_pong(player),
            Action::OpenKong { player } => self.claim_open_kong(player),
            Action::ClaimWin { player } => {
                self.declare_win(player);
                Ok(())
            }
            Action::Pass { player } => {
                self.pass(player);
                Ok(())
            }
        }
    }

    /// Draws for the current player, handling flower auto-replacement.
    fn draw(&mut self) -> Result<(), EngineError> {
        let player = self.state.current_player;
        let Ok(tile) = self.wall.draw() else {
            self.state.phase = Phase::Draw;
            return Ok(());
        };
        if tile.is_flower() {
            self.state.players[player.to_usize()].flowers.push(tile);
            return self.draw_replacement(player);
        }
        self.state.players[player.to_usize()].hand.push(tile);
        self.just_drew = true;
        self.after_kong = false;
        self.sub_phase = SubPhase::ActiveTurn;
        Ok(())
    }

    fn draw_replacement(&mut self, player: Player) -> Result<(), EngineError> {
        let tile = match self.wall.draw_from_back() {
            Ok(t) => t,
            Err(ResourceExhausted::NoFlowerReplacement(_)) => match self.wall.draw() {
                Ok(t) => t,
                Err(_) => {
                    self.state.phase = Phase::Draw;
                    return Ok(());
                }
            },
            Err(e) => return Err(e.into()),
        };
        if tile.is_flower() {
            self.state.players[player.to_usize()].flowers.push(tile);
            return self.draw_replacement(player);
        }
        self.state.players[player.to_usize()].hand.push(tile);
        self.just_drew = true;
        self.after_kong = true;
        self.sub_phase = SubPhase::ActiveTurn;
        Ok(())
    }

    fn discard(&mut self, tile: Tile) -> Result<(), EngineError> {
        let player = self.state.current_player;
        let ps = &mut self.state.players[player.to_usize()];
        let pos = ps
            .hand
            .iter()
            .position(|&t| t == tile)
            .ok_or(InvalidAction::TileNotInHand(tile, player))?;
        ps.hand.remove(pos);
        ps.discards.push(tile);
        self.state.discard_pool.push(tile);
        self.state.last_discard = Some(tile);

        self.pending_discard = Some(tile);
        self.pending_discarder = Some(player);
        self.just_drew = false;
        self.after_kong = false;
        self.sub_phase = SubPhase::Claim;
        Ok(())
    }

    fn claim_chi(&mut self, claimer: Player, tiles: [Tile; 3]) -> Result<(), EngineError> {
        let discard = self.pending_discard.ok_or(InvalidAction::OutOfTurn {
            expected: self.state.current_player,
            actual: claimer,
        })?;
        let discarder = self.pending_discarder.unwrap();
        let ps = &mut self.state.players[claimer.to_usize()];
        for &t in tiles.iter() {
            if t != discard {
                let pos =
                    ps.hand.iter().position(|&x| x == t).ok_or(InvalidAction::TileNotInHand(t, claimer))?;
                ps.hand.remove(pos);
            }
        }
        ps.melds.push(make_chi(tiles, discarder));
        self.advance_after_claim(claimer);
        Ok(())
    }

    fn claim_pong(&mut self, claimer: Player) -> Result<(), EngineError> {
        let discard = self.pending_discard.unwrap();
        let discarder = self.pending_discarder.unwrap();
        let ps = &mut self.state.players[claimer.to_usize()];
        for _ in 0..2 {
            let pos =
                ps.hand.iter().position(|&x| x == discard).ok_or(InvalidAction::TileNotInHand(discard, claimer))?;
            ps.hand.remove(pos);
        }
        ps.melds.push(make_pong(discard, discarder));
        self.advance_after_claim(claimer);
        Ok(())
    }

    fn claim_open_kong(&mut self, claimer: Player) -> Result<(), EngineError> {
        let discard = self.pending_discard.unwrap();
        let discarder = self.pending_discarder.unwrap();
        let ps = &mut self.state.players[claimer.to_usize()];
        for _ in 0..3 {
            let pos =
                ps.hand.iter().position(|&x| x == discard).ok_or(InvalidAction::TileNotInHand(discard, claimer))?;
            ps.hand.remove(pos);
        }
        ps.melds.push(make_open_kong(discard, discarder));
        self.pending_discard = None;
        self.pending_discarder = None;
        self.passed_players.clear();
        self.just_drew = false;
        self.sub_phase = SubPhase::ActiveTurn;
        self.state.current_player = claimer;
        self.draw_replacement(claimer)
    }

    fn declare_added_kong(&mut self, tile: Tile) -> Result<(), EngineError> {
        let player = self.state.current_player;
        let ps = &mut self.state.players[player.to_usize()];
        if !validate_added_kong(&ps.melds, tile) {
            return Err(InvalidAction::NoPongForAddedKong { tile, from_player: player }.into());
        }
        let idx = ps
            .melds
            .iter()
            .position(|m| matches!(m, Meld::Pong { tile: t, .. } if *t == tile))
            .unwrap();
        let from_player = ps.melds[idx].from_player().unwrap();
        ps.melds[idx] = make_added_kong(tile, from_player);
        let pos = ps.hand.iter().position(|&t| t == tile).ok_or(InvalidAction::TileNotInHand(tile, player))?;
        ps.hand.remove(pos);
        self.just_drew = false;
        self.sub_phase = SubPhase::ActiveTurn;
        self.draw_replacement(player)
    }

    fn declare_concealed_kong(&mut self, tile: Tile) -> Result<(), EngineError> {
        let player = self.state.current_player;
        let ps = &mut self.state.players[player.to_usize()];
        if !validate_concealed_kong(&ps.hand, tile) {
            return Err(InvalidAction::NotEnoughForConcealedKong(tile).into());
        }
        for _ in 0..4 {
            let pos = ps.hand.iter().position(|&t| t == tile).unwrap();
            ps.hand.remove(pos);
        }
        ps.melds.push(make_concealed_kong(tile));
        self.just_drew = false;
        self.sub_phase = SubPhase::ActiveTurn;
        self.draw_replacement(player)
    }

    fn advance_after_claim(&mut self, claimer: Player) {
        self.state.current_player = claimer;
        self.pending_discard = None;
        self.pending_discarder = None;
        self.passed_players.clear();
        self.just_drew = true;
        self.sub_phase = SubPhase::ActiveTurn;
    }

    fn declare_win(&mut self, winner: Player) {
        self.state.phase = Phase::Win;
        self.state.winner = Some(winner);
    }

    fn pass(&mut self, player: Player) {
        let Some(discarder) = self.pending_discarder else { return };
        if !self.passed_players.contains(&player) {
            self.passed_players.push(player);
        }
        let all_passed = (0..4).map(|i| discarder.add_u8(i + 1)).take(3).all(|p| self.passed_players.contains(&p));
        if all_passed {
            self.state.current_player = discarder.add_u8(1);
            self.pending_discard = None;
            self.pending_discarder = None;
            self.passed_players.clear();
            self.just_drew = false;
            self.sub_phase = SubPhase::ActiveTurn;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use mahjong_elements::player::{P0, P1, P2, P3};
    use mahjong_elements::t;

    use super::*;

    #[test]
    fn priority_win_beats_everything() {
        let candidates = vec![
            Action::Chi { player: P1, tiles: [t!("1m"), t!("2m"), t!("3m")] },
            Action::Pong { player: P2 },
            Action::ClaimWin { player: P3 },
        ];
        let session = make_session_with_pending_discard(P0, t!("5s"));
        let winning = session.resolve_claims(&candidates).unwrap();
        assert_eq!(winning, Action::ClaimWin { player: P3 });
    }

    #[test]
    fn priority_kong_beats_pong_beats_chi() {
        let candidates = vec![
            Action::Chi { player: P1, tiles: [t!("1m"), t!("2m"), t!("3m")] },
            Action::Pong { player: P2 },
            Action::OpenKong { player: P3 },
        ];
        let session = make_session_with_pending_discard(P0, t!("5s"));
        let winning = session.resolve_claims(&candidates).unwrap();
        assert_eq!(winning, Action::OpenKong { player: P3 });
    }

    #[test]
    fn all_pass_resolves_to_none() {
        let candidates =
            vec![Action::Pass { player: P1 }, Action::Pass { player: P2 }, Action::Pass { player: P3 }];
        let session = make_session_with_pending_discard(P0, t!("5s"));
        assert!(session.resolve_claims(&candidates).is_none());
    }

    #[test]
    fn active_turn_draw_then_discard_transitions_to_claim_phase() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut session = GameSession::new(&mut rng, Ruleset::default(), P0, P0, 0).unwrap();

        // The dealer's 17th tile already acts as a draw, so they can discard directly.
        let discard = session.state.players[0].hand[0];
        session.step(Action::Discard(discard)).unwrap();
        assert_eq!(session.sub_phase, SubPhase::Claim);
        assert_eq!(session.pending_discard, Some(discard));

        for i in 1..=3 {
            session.step(Action::Pass { player: P0.add_u8(i) }).unwrap();
        }
        assert_eq!(session.sub_phase, SubPhase::ActiveTurn);
        assert_eq!(session.state.current_player, P1);

        assert_eq!(session.legal_actions(P1), vec![Action::Draw]);
        session.step(Action::Draw).unwrap();
        assert_eq!(session.state.players[1].hand.len(), 17);
    }

    #[test]
    fn scenario_d_claim_priority_resolves_to_pong_via_step() {
        let discard = t!("5m");
        let mut session = make_session_with_pending_discard(P0, discard);
        session.state.players[1].hand = vec![t!("4m"), t!("6m")];
        session.state.players[2].hand = vec![t!("5m"), t!("5m"), t!("1s")];
        session.state.players[3].hand = vec![];

        let chi = session
            .legal_actions(P1)
            .into_iter()
            .find(|a| matches!(a, Action::Chi { .. }))
            .unwrap();
        let pong = session
            .legal_actions(P2)
            .into_iter()
            .find(|a| matches!(a, Action::Pong { .. }))
            .unwrap();
        let pass = session
            .legal_actions(P3)
            .into_iter()
            .find(|a| matches!(a, Action::Pass { .. }))
            .unwrap();

        let winning = session.resolve_claims(&[chi, pong.clone(), pass]).unwrap();
        assert_eq!(winning, pong);

        session.step(winning).unwrap();
        assert_eq!(session.state.current_player, P2);
        assert_eq!(session.sub_phase, SubPhase::ActiveTurn);
        assert!(session.state.players[2]
            .melds
            .iter()
            .any(|m| matches!(m, Meld::Pong { tile, .. } if *tile == discard)));
        assert_eq!(session.legal_actions(P2).iter().filter(|a| matches!(a, Action::Discard(_))).count(), 1);
    }

    #[test]
    fn open_kong_claim_draws_replacement_and_requires_discard() {
        let discard = t!("3p");
        let mut session = make_session_with_pending_discard(P0, discard);
        session.state.players[1].hand = vec![discard, discard, discard];
        session.wall.back = vec![t!("9p")];

        session.step(Action::OpenKong { player: P1 }).unwrap();

        assert!(session.state.players[1]
            .melds
            .iter()
            .any(|m| matches!(m, Meld::OpenKong { tile, .. } if *tile == discard)));
        assert_eq!(session.state.players[1].hand, vec![t!("9p")]);
        assert_eq!(session.state.current_player, P1);
        assert_eq!(session.sub_phase, SubPhase::ActiveTurn);
    }

    #[test]
    fn scenario_e_concealed_kong_draws_replacement() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut session = GameSession::new(&mut rng, Ruleset::default(), P0, P0, 0).unwrap();
        let player = session.state.current_player;
        session.state.players[player.to_usize()].hand = vec![t!("7p"), t!("7p"), t!("7p"), t!("7p")];
        session.wall.back = vec![t!("1s")];
        session.just_drew = true;

        session.step(Action::ConcealedKong(t!("7p"))).unwrap();

        let ps = &session.state.players[player.to_usize()];
        assert!(ps.melds.iter().any(|m| matches!(m, Meld::ConcealedKong { tile } if *tile == t!("7p"))));
        assert!(!ps.hand.contains(&t!("7p")));
        assert_eq!(ps.hand, vec![t!("1s")]);
        assert_eq!(session.sub_phase, SubPhase::ActiveTurn);
    }

    #[test]
    fn scenario_f_exhaustive_draw_ends_hand() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = GameSession::new(&mut rng, Ruleset::default(), P0, P0, 0).unwrap();
        session.wall.live.clear();
        session.wall.back.clear();

        session.step(Action::Draw).unwrap();

        assert_eq!(session.state.phase, Phase::Draw);
        assert!(session.legal_actions(session.state.current_player).is_empty());
    }

    #[test]
    fn random_driver_conserves_tiles_and_terminates_within_500_actions() {
        for seed in 0..5 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut session =
                GameSession::new(&mut rng, Ruleset::default(), P0, P0, 0).unwrap();
            assert_eq!(total_tiles_in_play(&session), 144);

            let mut steps = 0;
            while session.state.phase == Phase::Play {
                steps += 1;
                assert!(steps <= 500, "seed {seed}: hand did not terminate within 500 actions");

                match session.sub_phase {
                    SubPhase::ActiveTurn => {
                        let actions = session.legal_actions(session.state.current_player);
                        let chosen = actions[rng.gen_range(0..actions.len())].clone();
                        session.step(chosen).unwrap();
                    }
                    SubPhase::Claim => {
                        let discarder = session.pending_discarder.unwrap();
                        let claimants = mahjong_elements::player::other_players_after(discarder);
                        let mut candidates = Vec::new();
                        for &player in &claimants {
                            if session.passed_players.contains(&player) {
                                continue;
                            }
                            let actions = session.legal_actions(player);
                            if actions.is_empty() {
                                continue;
                            }
                            candidates.push(actions[rng.gen_range(0..actions.len())].clone());
                        }
                        match session.resolve_claims(&candidates) {
                            Some(winning) => session.step(winning).unwrap(),
                            None => {
                                for &player in &claimants {
                                    if !session.passed_players.contains(&player) {
                                        session.step(Action::Pass { player }).unwrap();
                                    }
                                }
                            }
                        }
                    }
                }

                assert_eq!(total_tiles_in_play(&session), 144, "seed {seed}: tile count drifted");
            }

            assert!(matches!(session.state.phase, Phase::Win | Phase::Draw));
        }
    }

    /// Total tile count across every location a tile can be: hands, melds,
    /// flowers, the walls, and discards still sitting on the table. Per-player
    /// discard history (`PlayerState::discards`) is a redundant view of the
    /// same tiles already counted in `discard_pool` and is excluded.
    ///
    /// `discard_pool` is a permanent log (牌海): a discard claimed into a
    /// Chi/Pong/OpenKong meld (or an AddedKong's underlying Pong) stays
    /// logged there even though its physical tile has moved into the meld,
    /// so each such meld's one claimed tile is subtracted back out to avoid
    /// counting it twice. ConcealedKong claims nothing from the discard pool.
    fn total_tiles_in_play(session: &GameSession) -> usize {
        let mut total = 0;
        let mut claimed_from_pool = 0;
        for ps in &session.state.players {
            total += ps.hand.len();
            total += ps.flowers.len();
            total += ps.melds.iter().map(Meld::len).sum::<usize>();
            claimed_from_pool += ps
                .melds
                .iter()
                .filter(|m| matches!(m, Meld::Chi { .. } | Meld::Pong { .. } | Meld::OpenKong { .. } | Meld::AddedKong { .. }))
                .count();
        }
        total += session.state.discard_pool.len() - claimed_from_pool;
        total += session.wall.live_count();
        total += session.wall.back_count();
        total
    }

    fn make_session_with_pending_discard(discarder: Player, discard: Tile) -> GameSession {
        let mut rng = rand::rngs::mock::StepRng::new(0, 1);
        let mut session = GameSession::new(&mut rng, Ruleset::default(), P0, P0, 0).unwrap();
        session.pending_discard = Some(discard);
        session.pending_discarder = Some(discarder);
        session.sub_phase = SubPhase::Claim;
        session
    }
}
