//! Configurable rules and interpretations of rules for a game, bundled as [`Ruleset`].

use derivative::Derivative;

/// Bundle of configurable rules and interpretations of rules for a game.
///
/// A [`Default::default()`] ruleset matches common Taiwanese 16-tile table
/// rules. See the documentation on each field for what can be configured.
///
/// ## Key exceptions (what cannot be configured here)
///
/// - The composition of the 144-tile deck (34 standard kinds x 4, 8 flowers).
/// - Seating and dealer rotation, which live outside a single hand's engine.
#[derive(Derivative)]
#[derive(Clone, Debug)]
#[derivative(Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub struct Ruleset {
    /// Number of tiles held back as the "dead wall" that can never be
    /// drawn, only used to replace flowers and to seed kong replacement
    /// draws.
    ///
    /// **Default: 16**.
    #[derivative(Default(value = "16"))]
    pub back_wall_size: u8,

    /// Tai (台) cap applied to a hand's summed score before payment.
    ///
    /// **Default: 81** (seen as the "limit hand" ceiling at many tables).
    #[derivative(Default(value = "81"))]
    pub max_tai: u16,

    /// Floor applied to a hand's tai subtotal before the `max_tai` cap, so
    /// that every valid win pays at least this many tai even with no
    /// named yaku.
    ///
    /// **Default: 1**.
    #[derivative(Default(value = "1"))]
    pub min_tai_floor: u16,

    /// May a player call Chi on the tile exposed by a robbed kong
    /// (搶槓/qiangang)?
    ///
    /// **Default: no.** Only Ron is offered against a robbed kong tile;
    /// allowing Chi as well would let a player claim a meld off a kong
    /// that was never actually discarded.
    #[derivative(Default(value = "false"))]
    pub allow_chi_on_robbed_kong: bool,

    /// Does a self-drawn win immediately following a flower replacement
    /// still qualify as 天胡/地胡/人胡 (a win on the player's first
    /// uninterrupted turn)?
    ///
    /// **Default: yes.** Flower replacement does not count as a "real"
    /// turn action for the purposes of these immediate-win patterns.
    #[derivative(Default(value = "true"))]
    pub flower_replacement_preserves_immediate_win: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let ruleset = Ruleset::default();
        assert_eq!(ruleset.back_wall_size, 16);
        assert_eq!(ruleset.max_tai, 81);
        assert_eq!(ruleset.min_tai_floor, 1);
        assert!(!ruleset.allow_chi_on_robbed_kong);
        assert!(ruleset.flower_replacement_preserves_immediate_win);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn ruleset_roundtrips_through_json() {
        let ruleset = Ruleset { max_tai: 64, ..Ruleset::default() };
        let json = serde_json::to_string(&ruleset).unwrap();
        let back: Ruleset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ruleset);
    }
}
