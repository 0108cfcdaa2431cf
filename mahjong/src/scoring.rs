//! Scoring (計台): tallying applicable yaku and converting to payments.

use mahjong_decomp::Decomposition;
use mahjong_elements::meld::Meld;
use mahjong_elements::player::Player;
use mahjong_elements::tile::Tile;

use crate::rules::Ruleset;

/// Whether the winning tile was drawn by the winner or claimed off a
/// discard.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WinSource {
    SelfDraw,
    Discard { from_player: Player },
}

/// Special win circumstances that flow in from the session state machine
/// rather than being derivable from the hand alone.
#[derive(Clone, Debug, Default)]
pub struct WinCircumstances {
    pub is_two_sided_wait: bool,
    pub is_qiangang: bool,
    pub is_gangshang: bool,
    pub is_haidi: bool,
    pub is_diting: bool,
    pub is_tianting: bool,
    pub is_tianhu: bool,
    pub is_dihu: bool,
    pub is_renhu: bool,
    pub is_qiqiang_yi: bool,
    pub is_bajian_guohai: bool,
    pub is_peipai_huahu: bool,
}

/// Everything needed to score one winning hand.
pub struct WinContext<'a> {
    pub winner: Player,
    pub seat_wind: Player,
    pub round_wind: Player,
    pub is_dealer: bool,
    pub dealer_streak: u32,
    pub win_tile: Tile,
    pub source: WinSource,
    pub melds: &'a [Meld],
    pub flowers: &'a [Tile],
    pub decomp: &'a Decomposition,
    pub circumstances: WinCircumstances,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoringResult {
    pub yaku: Vec<(&'static str, u32)>,
    pub subtotal: u32,
    pub total: u32,
    /// Indexed by `Player::to_usize()`. Positive = owed to the winner,
    /// negative = the winner's net receipt.
    pub payments: [i32; 4],
}

fn is_triplet(set: &[Tile; 3]) -> bool { set[0] == set[1] && set[1] == set[2] }

fn is_sequence(set: &[Tile; 3]) -> bool {
    set.iter().all(|t| t.is_number())
        && set[0].suit() == set[1].suit()
        && set[1].suit() == set[2].suit()
        && {
            let mut vals = [set[0].num(), set[1].num(), set[2].num()];
            vals.sort_unstable();
            vals[1] == vals[0] + 1 && vals[2] == vals[1] + 1
        }
}

/// Scores a winning hand, returning the applicable yaku, capped total, and
/// per-player payment deltas.
pub fn score_hand(ctx: &WinContext, ruleset: &Ruleset) -> ScoringResult {
    let is_self_draw = matches!(ctx.source, WinSource::SelfDraw);
    let open_meld_count = ctx
        .melds
        .iter()
        .filter(|m| !matches!(m, Meld::ConcealedKong { .. }))
        .count();
    let is_concealed = open_meld_count == 0;

    let all_sets: Vec<[Tile; 3]> =
        ctx.decomp.sets.iter().copied().chain(ctx.melds.iter().map(Meld::as_set)).collect();

    let mut yaku: Vec<(&'static str, u32)> = Vec::new();

    // 16-tai yaku.
    if ctx.circumstances.is_tianhu {
        yaku.push(("天胡", 16));
    }
    if ctx.circumstances.is_dihu {
        yaku.push(("地胡", 16));
    }
    if ctx.circumstances.is_renhu {
        yaku.push(("人胡", 16));
    }
    let wind_triplets = all_sets.iter().filter(|s| is_triplet(s) && s[0].is_wind()).count();
    let wind_pair = ctx.decomp.pair[0].is_wind();
    if wind_triplets == 4 {
        yaku.push(("大四喜", 16));
    }
    if all_tiles_are_honors(ctx) {
        yaku.push(("字一色", 16));
    }

    // 12-tai yaku.
    if ctx.circumstances.is_peipai_huahu {
        yaku.push(("配牌花胡", 12));
    }

    // 8-tai yaku.
    if ctx.circumstances.is_tianting {
        yaku.push(("天聽", 8));
    }
    if ctx.circumstances.is_bajian_guohai {
        yaku.push(("八仙過海", 8));
    }
    if ctx.circumstances.is_qiqiang_yi {
        yaku.push(("七搶一", 8));
    }
    let dragon_triplets = all_sets.iter().filter(|s| is_triplet(s) && s[0].is_dragon()).count();
    if dragon_triplets == 3 {
        yaku.push(("大三元", 8));
    }
    if wind_triplets == 3 && wind_pair {
        yaku.push(("小四喜", 8));
    }
    let qingyise = is_qingyise(ctx);
    if qingyise {
        yaku.push(("清一色", 8));
    }
    let concealed_triplets = count_concealed_triplets(ctx, is_self_draw)
        + ctx.melds.iter().filter(|m| matches!(m, Meld::ConcealedKong { .. })).count();
    if concealed_triplets >= 5 {
        yaku.push(("五暗坎", 8));
    }

    // 5-tai yaku.
    if concealed_triplets == 4 && !yaku.iter().any(|&(n, _)| n == "五暗坎") {
        yaku.push(("四暗坎", 5));
    }

    // 4-tai yaku.
    if ctx.circumstances.is_diting {
        yaku.push(("地聽", 4));
    }
    let duiduihu = all_sets.len() == 5 && all_sets.iter().all(is_triplet);
    if duiduihu {
        yaku.push(("對對胡", 4));
    }
    if dragon_triplets == 2 && ctx.decomp.pair[0].is_dragon() {
        yaku.push(("小三元", 4));
    }
    let hunyise = is_hunyise(ctx);
    if hunyise && !qingyise && !all_tiles_are_honors(ctx) {
        yaku.push(("湊一色", 4));
    }
    if concealed_triplets == 3 && !yaku.iter().any(|&(n, _)| n == "四暗坎" || n == "五暗坎") {
        yaku.push(("三暗坎", 2));
    }

    // 2-tai yaku.
    let buqiu = is_concealed && is_self_draw;
    if buqiu {
        yaku.push(("不求", 2));
    }
    if is_pinghu(ctx, &all_sets, is_self_draw) {
        yaku.push(("平胡", 2));
    }
    if open_meld_count == 4 && !is_self_draw {
        yaku.push(("全求", 2));
    }
    let season_count = ctx.flowers.iter().filter(|t| t.is_season_flower()).count();
    let plant_count = ctx.flowers.iter().filter(|t| t.is_plant_flower()).count();
    if season_count == 4 {
        yaku.push(("花槓", 2));
    }
    if plant_count == 4 {
        yaku.push(("花槓", 2));
    }

    // 1-tai yaku.
    if ctx.is_dealer {
        yaku.push(("作莊", 1));
    }
    if ctx.dealer_streak > 0 {
        yaku.push(("連莊", ctx.dealer_streak));
    }
    if is_concealed && !is_self_draw && !buqiu {
        yaku.push(("門清", 1));
    }
    if is_self_draw && !buqiu {
        yaku.push(("自摸", 1));
    }
    if has_wind_triplet(&all_sets, ctx.seat_wind) {
        yaku.push(("風牌", 1));
    }
    if has_wind_triplet(&all_sets, ctx.round_wind) {
        yaku.push(("風圈", 1));
    }
    for _ in all_sets.iter().filter(|s| is_triplet(s) && s[0].is_dragon()) {
        yaku.push(("箭字坎", 1));
    }
    let seat_flowers = [
        Tile::from_flower(ctx.seat_wind.to_u8()).unwrap(),
        Tile::from_flower(4 + ctx.seat_wind.to_u8()).unwrap(),
    ];
    for flower in ctx.flowers.iter().filter(|f| seat_flowers.contains(f)) {
        let _ = flower;
        yaku.push(("花牌", 1));
    }
    if ctx.circumstances.is_qiangang {
        yaku.push(("搶槓", 1));
    }
    if ctx.circumstances.is_gangshang {
        yaku.push(("槓上開花", 1));
    }
    if ctx.circumstances.is_haidi {
        yaku.push(if is_self_draw { ("海底撈月", 1) } else { ("河底撈魚", 1) });
    }

    let subtotal_raw: u32 = yaku.iter().map(|&(_, tai)| tai).sum();
    let subtotal = subtotal_raw.max(ruleset.min_tai_floor as u32);
    let total = subtotal.min(ruleset.max_tai as u32);

    let payments = compute_payments(ctx, total);

    ScoringResult { yaku, subtotal, total, payments }
}

fn compute_payments(ctx: &WinContext, total_tai: u32) -> [i32; 4] {
    let lazhuang = ctx.dealer_streak;
    let mut payments = [0i32; 4];
    let winner = ctx.winner.to_usize();
    let mut received = 0i32;
    for (i, payment) in payments.iter_mut().enumerate() {
        if i == winner {
            continue;
        }
        let amount = match ctx.source {
            WinSource::SelfDraw => total_tai + lazhuang,
            WinSource::Discard { from_player } => {
                if i == from_player.to_usize() { total_tai + lazhuang } else { lazhuang }
            }
        } as i32;
        *payment = amount;
        received += amount;
    }
    payments[winner] = -received;
    payments
}

fn count_concealed_triplets(ctx: &WinContext, is_self_draw: bool) -> usize {
    let mut count = 0;
    let mut win_tile_used = false;
    for set in &ctx.decomp.sets {
        if is_triplet(set) {
            if !is_self_draw && !win_tile_used && set[0] == ctx.win_tile {
                win_tile_used = true;
                continue;
            }
            count += 1;
        }
    }
    count
}

fn has_wind_triplet(all_sets: &[[Tile; 3]], wind: Player) -> bool {
    let wind_tile = Tile::from_wind(wind);
    all_sets.iter().any(|s| is_triplet(s) && s[0] == wind_tile)
}

fn full_hand_tiles(ctx: &WinContext) -> Vec<Tile> {
    let mut tiles = ctx.decomp.to_tiles();
    for meld in ctx.melds {
        tiles.extend(meld.to_tiles());
    }
    tiles
}

fn all_tiles_are_honors(ctx: &WinContext) -> bool {
    full_hand_tiles(ctx).iter().all(|t| t.is_honor())
}

fn is_qingyise(ctx: &WinContext) -> bool {
    let tiles = full_hand_tiles(ctx);
    if !tiles.iter().all(|t| t.is_number()) {
        return false;
    }
    let mut suits: Vec<u8> = tiles.iter().map(|t| t.suit()).collect();
    suits.sort_unstable();
    suits.dedup();
    suits.len() == 1
}

fn is_hunyise(ctx: &WinContext) -> bool {
    let tiles = full_hand_tiles(ctx);
    let mut suits = Vec::new();
    let mut has_honors = false;
    for tile in &tiles {
        if tile.is_number() {
            suits.push(tile.suit());
        } else if tile.is_honor() {
            has_honors = true;
        } else {
            return false;
        }
    }
    suits.sort_unstable();
    suits.dedup();
    suits.len() == 1 && has_honors
}

fn is_pinghu(ctx: &WinContext, all_sets: &[[Tile; 3]], is_self_draw: bool) -> bool {
    if !ctx.melds.is_empty() {
        return false;
    }
    if is_self_draw {
        return false;
    }
    if !ctx.circumstances.is_two_sided_wait {
        return false;
    }
    if !full_hand_tiles(ctx).iter().all(|t| t.is_number()) {
        return false;
    }
    if !ctx.decomp.pair[0].is_number() {
        return false;
    }
    all_sets.len() == 5 && all_sets.iter().all(is_sequence)
}
