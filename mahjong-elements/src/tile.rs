//! [`Tile`] 牌, Taiwan 16-tile Mahjong tile identities.
//!
//! ## Ref
//! - <https://en.wikipedia.org/wiki/Mahjong_tiles>

use core::{
    cmp::Ordering,
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::typedefs::*;

/// Represents one tile (牌).
///
/// Encoded as a 6-bit integer:
///
/// | Encoding   |  Shorthand  | Category       |
/// |------------|-------------|----------------|
/// | 0  ..= 8   |  1m ..= 9m  | characters 萬子 |
/// | 9  ..= 17  |  1p ..= 9p  | dots 筒子       |
/// | 18 ..= 26  |  1s ..= 9s  | bamboos 索子    |
/// | 27 ..= 30  |  E,S,W,N    | winds 風牌      |
/// | 31, 32, 33 |  C,F,B      | dragons 三元牌  |
/// | 34 ..= 37  |  f1 ..= f4  | season flowers 春夏秋冬 |
/// | 38 ..= 41  |  f5 ..= f8  | plant flowers 梅蘭菊竹  |
///
/// There are no red fives in Taiwan 16-tile Mahjong; all number tiles are
/// "normal". Flowers are singletons (one copy each in a 144-tile deck).
///
/// Details of this encoding are significant and implicitly assumed across
/// the crate. It should never be changed.
///
///
/// ## Optional `serde` support
///
/// The common string shorthand (e.g. `"1m"`, `"E"`, `"f3"`) is used as the
/// serialization format.
///
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "&str"))]
pub struct Tile(u8);

impl Tile {
    pub const MIN_ENCODING: u8 = 0;
    pub const MAX_ENCODING: u8 = 41;
    pub const MIN: Self = Self(Self::MIN_ENCODING);
    pub const MAX: Self = Self(Self::MAX_ENCODING);

    /// Number of distinct standard (non-flower) tile kinds.
    pub const NUM_STANDARD: u8 = 34;
    /// Number of distinct flower kinds.
    pub const NUM_FLOWERS: u8 = 8;

    pub const fn from_encoding(encoding: u8) -> Option<Self> {
        if encoding <= Self::MAX_ENCODING { Some(Self(encoding)) } else { None }
    }

    pub const fn from_num_suit(num: u8, suit: u8) -> Option<Self> {
        if !(1 <= num && num <= 9 && suit <= 2) { return None; }
        Some(Self(suit * 9 + num - 1))
    }

    pub fn from_wind(wind: Wind) -> Self { Self(27 + wind.to_u8()) }

    pub const fn from_dragon(dragon: u8) -> Option<Self> {
        if dragon <= 2 { Some(Self(31 + dragon)) } else { None }
    }

    /// `index` in 0..=7: 0..=3 are season flowers (f1..f4), 4..=7 are plant
    /// flowers (f5..f8).
    pub const fn from_flower(index: u8) -> Option<Self> {
        if index <= 7 { Some(Self(34 + index)) } else { None }
    }

    pub const fn is_valid(self) -> bool { self.0 <= Self::MAX_ENCODING }

    /// Numerals := Characters + Dots + Bamboos ; 数牌
    pub const fn is_number(self) -> bool { self.0 <= 26 }
    /// Pure terminals := {1,9}{m,p,s} 老頭牌
    pub const fn is_pure_terminal(self) -> bool {
        matches!(self.0, 0 | 8 | 9 | 17 | 18 | 26)
    }
    /// Middle numerals := {2..=8}{m,p,s}
    pub const fn is_middle(self) -> bool { self.is_number() && !self.is_pure_terminal() }

    /// Winds 風牌 := {E,S,W,N}
    pub const fn is_wind(self) -> bool { 27 <= self.0 && self.0 <= 30 }
    /// Dragons 三元牌 := {C,F,B}
    pub const fn is_dragon(self) -> bool { 31 <= self.0 && self.0 <= 33 }
    /// Honors := Winds + Dragons ; 字牌
    pub const fn is_honor(self) -> bool { 27 <= self.0 && self.0 <= 33 }
    /// Terminals := Pure terminals + Honors ; 么九牌
    pub const fn is_terminal(self) -> bool { self.is_pure_terminal() || self.is_honor() }

    /// Flowers 花牌 := {f1..f8}. Never participate in hand decomposition.
    pub const fn is_flower(self) -> bool { 34 <= self.0 && self.0 <= 41 }
    /// Season flowers 春夏秋冬 := {f1..f4}, bound to seats E,S,W,N.
    pub const fn is_season_flower(self) -> bool { 34 <= self.0 && self.0 <= 37 }
    /// Plant flowers 梅蘭菊竹 := {f5..f8}, bound to seats E,S,W,N.
    pub const fn is_plant_flower(self) -> bool { 38 <= self.0 && self.0 <= 41 }

    pub const fn encoding(self) -> u8 {
        debug_assert!(self.is_valid());
        self.0
    }

    /// Converts to the corresponding wind (ESWN) if this is a wind tile.
    pub const fn wind(self) -> Option<Wind> {
        if self.is_wind() { Some(Wind::new(self.0 - 27)) } else { None }
    }

    /// Returns the "number" part of the shorthand (1..=9). Panics-in-debug
    /// for non-number tiles.
    pub const fn num(self) -> u8 {
        debug_assert!(self.is_number());
        self.0 % 9 + 1
    }
    /// Returns the "suit" part of the shorthand (0, 1, 2 for m, p, s).
    pub const fn suit(self) -> u8 {
        debug_assert!(self.is_number());
        self.0 / 9
    }

    /// For numerals 1 to 8, returns 2 to 9 respectively. Otherwise None.
    pub const fn succ(self) -> Option<Self> {
        if self.is_number() && self.num() <= 8 { Some(Self(self.0 + 1)) } else { None }
    }
    /// For numerals 1 to 7, returns 3 to 9 respectively. Otherwise None.
    pub const fn succ2(self) -> Option<Self> {
        if self.is_number() && self.num() <= 7 { Some(Self(self.0 + 2)) } else { None }
    }

    /// Seat (0..=3) that owns this flower, if this is a flower tile.
    pub const fn flower_seat(self) -> Option<Wind> {
        if self.is_season_flower() {
            Some(Wind::new(self.0 - 34))
        } else if self.is_plant_flower() {
            Some(Wind::new(self.0 - 38))
        } else {
            None
        }
    }

    /// Sort key used by the decomposer: m < p < s < winds < dragons <
    /// flowers, then by value within each group. Flowers never appear
    /// inside hand decomposition, but still need a total order for
    /// display/testing.
    const fn to_ordering_key(self) -> u8 {
        debug_assert!(self.is_valid());
        self.0
    }
}

impl PartialOrd<Self> for Tile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for Tile {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_ordering_key().cmp(&other.to_ordering_key())
    }
}

// String/Char Conversions

pub(crate) const fn suit_from_char(c: char) -> Option<u8> {
    match c {
        'm' => Some(0),
        'p' => Some(1),
        's' => Some(2),
        _ => None,
    }
}

pub(crate) const fn char_from_suit(suit: u8) -> Option<char> {
    match suit {
        0 => Some('m'),
        1 => Some('p'),
        2 => Some('s'),
        _ => None,
    }
}

impl Tile {
    pub fn suit_char(self) -> char {
        debug_assert!(self.is_number());
        char_from_suit(self.suit()).unwrap()
    }

    /// Returns the standard shorthand string of this tile.
    pub const fn as_str(self) -> &'static str {
        debug_assert!(self.is_valid());
        [
            "1m", "2m", "3m", "4m", "5m", "6m", "7m", "8m", "9m", //
            "1p", "2p", "3p", "4p", "5p", "6p", "7p", "8p", "9p", //
            "1s", "2s", "3s", "4s", "5s", "6s", "7s", "8s", "9s", //
            "E", "S", "W", "N", //
            "C", "F", "B", //
            "f1", "f2", "f3", "f4", "f5", "f6", "f7", "f8", //
        ][self.encoding() as usize]
    }
}

impl FromStr for Tile {
    type Err = UnspecifiedError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "E" => return Ok(Self(27)),
            "S" => return Ok(Self(28)),
            "W" => return Ok(Self(29)),
            "N" => return Ok(Self(30)),
            "C" => return Ok(Self(31)),
            "F" => return Ok(Self(32)),
            "B" => return Ok(Self(33)),
            _ => {}
        }
        if let Some(rest) = s.strip_prefix('f') {
            let index: u8 = rest.parse().map_err(|_| UnspecifiedError)?;
            if (1..=8).contains(&index) {
                return Self::from_flower(index - 1).ok_or(UnspecifiedError);
            }
            return Err(UnspecifiedError);
        }
        if s.len() == 2 {
            let mut chars = s.chars();
            let (num_char, suit_char) = (chars.next().unwrap(), chars.next().unwrap());
            let num = num_char.to_digit(10).ok_or(UnspecifiedError)? as u8;
            let suit = suit_from_char(suit_char).ok_or(UnspecifiedError)?;
            return Self::from_num_suit(num, suit).ok_or(UnspecifiedError);
        }
        Err(UnspecifiedError)
    }
}

impl TryFrom<&str> for Tile {
    type Error = UnspecifiedError;
    fn try_from(value: &str) -> Result<Self, Self::Error> { value.parse() }
}

impl TryFrom<String> for Tile {
    type Error = UnspecifiedError;
    fn try_from(value: String) -> Result<Self, Self::Error> { value.parse() }
}

impl From<Tile> for &'static str {
    fn from(tile: Tile) -> &'static str { tile.as_str() }
}

impl Display for Tile {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse shorthand for a list of tiles, e.g. `"1112m8p8pEEE"`.
///
/// Example:
/// ```
/// use mahjong_elements::tile::*;
/// use mahjong_elements::t;
/// let tiles: Vec<_> = tiles_from_str("112233mEEE").collect();
/// assert_eq!(tiles, vec![
///     t!("1m"), t!("1m"), t!("2m"), t!("2m"), t!("3m"), t!("3m"),
///     t!("E"), t!("E"), t!("E"),
/// ]);
/// ```
pub fn tiles_from_str(s: &str) -> impl Iterator<Item = Tile> + '_ {
    let mut tiles = Vec::new();
    let mut digits: Vec<u8> = Vec::new();
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if let Some(d) = c.to_digit(10) {
            digits.push(d as u8);
            continue;
        }
        match c {
            'm' | 'p' | 's' => {
                let suit = suit_from_char(c).unwrap();
                tiles.extend(digits.drain(..).filter_map(|num| Tile::from_num_suit(num, suit)));
            }
            'E' | 'S' | 'W' | 'N' | 'C' | 'F' | 'B' => {
                digits.clear();
                if let Ok(tile) = c.to_string().parse() {
                    tiles.push(tile);
                }
            }
            'f' => {
                digits.clear();
                if let Some(index) = chars.peek().and_then(|c| c.to_digit(10)) {
                    chars.next();
                    if let Some(tile) = Tile::from_flower(index as u8 - 1) {
                        tiles.push(tile);
                    }
                }
            }
            _ => digits.clear(),
        }
    }
    tiles.into_iter()
}

/// Shortcut for creating a tile literal through its string shorthand.
#[macro_export]
macro_rules! t {
    ($s:expr) => {{
        use core::str::FromStr;
        $crate::tile::Tile::from_str($s).unwrap()
    }};
}
pub use t;
