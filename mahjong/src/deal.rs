//! Initial hand distribution and flower replacement.

use mahjong_elements::player::Player;

use crate::errors::ResourceExhausted;
use crate::state::PlayerState;
use crate::wall::Wall;

/// Deals the initial hands for all 4 players, 4 rounds of 4 tiles each in
/// turn order starting at `dealer`, with the dealer drawing one extra tile
/// (17 total; non-dealers get 16).
pub fn deal_initial_hands(
    wall: &mut Wall,
    players: &mut [PlayerState; 4],
    dealer: Player,
) -> Result<(), ResourceExhausted> {
    let order: Vec<Player> = (0..4).map(|i| dealer.add_u8(i)).collect();
    for _round in 0..4 {
        for &p in &order {
            for _ in 0..4 {
                let tile = wall.draw()?;
                players[p.to_usize()].hand.push(tile);
            }
        }
    }
    let extra = wall.draw()?;
    players[dealer.to_usize()].hand.push(extra);
    Ok(())
}

/// Replaces flowers in dealer-first, counter-clockwise order. Any flower
/// drawn as a replacement is itself replaced, recursively.
pub fn flower_replacement(
    wall: &mut Wall,
    players: &mut [PlayerState; 4],
    dealer: Player,
) -> Result<(), ResourceExhausted> {
    let order: Vec<Player> = (0..4).map(|i| dealer.add_u8(i)).collect();
    for p in order {
        replace_flowers_for_player(wall, &mut players[p.to_usize()])?;
    }
    Ok(())
}

fn replace_flowers_for_player(
    wall: &mut Wall,
    player: &mut PlayerState,
) -> Result<(), ResourceExhausted> {
    loop {
        let flower_positions: Vec<usize> =
            player.hand.iter().enumerate().filter(|(_, t)| t.is_flower()).map(|(i, _)| i).collect();
        if flower_positions.is_empty() {
            return Ok(());
        }
        for &i in flower_positions.iter().rev() {
            let flower = player.hand.remove(i);
            player.flowers.push(flower);
        }
        for _ in &flower_positions {
            let replacement = wall.draw_from_back()?;
            player.hand.push(replacement);
        }
    }
}

/// 八仙過海: player was dealt (and replaced into) all 8 flower tiles.
pub fn check_bajian_guohai(player: &PlayerState) -> bool { player.flowers.len() == 8 }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Ruleset;
    use mahjong_elements::tile::Tile;
    use mahjong_elements::player::P0 as DEALER;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn empty_players() -> [PlayerState; 4] {
        [
            PlayerState::new(mahjong_elements::player::P0),
            PlayerState::new(mahjong_elements::player::P1),
            PlayerState::new(mahjong_elements::player::P2),
            PlayerState::new(mahjong_elements::player::P3),
        ]
    }

    #[test]
    fn deal_gives_dealer_seventeen_and_others_sixteen() {
        let mut rng = StdRng::seed_from_u64(1);
        let ruleset = Ruleset::default();
        let mut wall = Wall::shuffle_new(&mut rng, &ruleset);
        let mut players = empty_players();
        deal_initial_hands(&mut wall, &mut players, DEALER).unwrap();
        assert_eq!(players[0].hand.len(), 17);
        for player in &players[1..4] {
            assert_eq!(player.hand.len(), 16);
        }
        assert_eq!(wall.live_count(), 144 - 16 - (16 * 4 + 1));
    }

    #[test]
    fn flower_replacement_keeps_hand_size_constant() {
        let mut players = empty_players();
        players[0].hand = vec![Tile::from_flower(0).unwrap(); 1]
            .into_iter()
            .chain(std::iter::repeat_n(mahjong_elements::t!("1m"), 16))
            .collect();
        let mut wall = Wall { live: vec![], back: vec![mahjong_elements::t!("2m")] };
        flower_replacement(&mut wall, &mut players, DEALER).unwrap();
        assert_eq!(players[0].hand.len(), 17);
        assert_eq!(players[0].flowers.len(), 1);
        assert!(players[0].hand.iter().all(|t| !t.is_flower()));
    }

    #[test]
    fn recursive_flower_replacement() {
        let mut players = empty_players();
        players[0].hand =
            vec![Tile::from_flower(0).unwrap()].into_iter().chain(std::iter::repeat_n(mahjong_elements::t!("1m"), 16)).collect();
        let mut wall =
            Wall { live: vec![], back: vec![mahjong_elements::t!("2m"), Tile::from_flower(1).unwrap()] };
        flower_replacement(&mut wall, &mut players, DEALER).unwrap();
        assert_eq!(players[0].flowers.len(), 2);
        assert_eq!(players[0].hand.len(), 17);
    }
}
