//! Tile notation for the mjai protocol.
//!
//! Provides the 34-slot count-vector representation of a hand and pure
//! conversions between it, the per-tile mjai symbol list, and the compact
//! tenhou.net/2 string. Red fives live in the same count slot as plain
//! fives and are tracked by three per-suit flags.

use crate::errors::{ClientError, ClientResult};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Total number of distinct tile types (0-33).
pub const NUM_TILE_TYPES: usize = 34;

/// Number of ranks per suited category (1-9).
pub const NUM_SUIT_TILES: usize = 9;

// Suit range starts (tile type indices).
pub const MANZU_START: u8 = 0;
pub const PINZU_START: u8 = 9;
pub const SOUZU_START: u8 = 18;
pub const JIHAI_START: u8 = 27;

/// Count-vector slots occupied by the five of each numeric suit. A red five
/// is drawn from the same slot as the plain five of its suit.
pub const FIVE_MANZU: usize = 4;
pub const FIVE_PINZU: usize = 13;
pub const FIVE_SOUZU: usize = 22;

/// mjai-style names for tile types, honors in E S W N P F C order.
const TILE_NAMES: [&str; NUM_TILE_TYPES] = [
    "1m", "2m", "3m", "4m", "5m", "6m", "7m", "8m", "9m", "1p", "2p", "3p", "4p", "5p", "6p", "7p",
    "8p", "9p", "1s", "2s", "3s", "4s", "5s", "6s", "7s", "8s", "9s", "E", "S", "W", "N", "P", "F",
    "C",
];

/// mjai-style names for the three red fives, indexed by numeric suit.
const RED_NAMES: [&str; 3] = ["5mr", "5pr", "5sr"];

const SUIT_LETTERS: [char; 3] = ['m', 'p', 's'];

// ---------------------------------------------------------------------------
// Single-tile conversion
// ---------------------------------------------------------------------------

/// Returns the mjai-style name for a tile type (0-33).
/// Out-of-range values return "??".
#[inline]
pub fn tile_to_mjai(tile: u8) -> &'static str {
    TILE_NAMES.get(tile as usize).copied().unwrap_or("??")
}

/// Parses an mjai tile symbol into its tile type (0-33).
///
/// Red fives ("5mr"/"5pr"/"5sr") map to their base five slot; honors are
/// accepted both as letters ("E".."C") and as "1z".."7z".
pub fn mjai_to_tile(symbol: &str) -> Option<u8> {
    let honors = ["E", "S", "W", "N", "P", "F", "C"];
    if let Some(pos) = honors.iter().position(|&h| h == symbol) {
        return Some(JIHAI_START + pos as u8);
    }

    match symbol {
        "5mr" => return Some(FIVE_MANZU as u8),
        "5pr" => return Some(FIVE_PINZU as u8),
        "5sr" => return Some(FIVE_SOUZU as u8),
        _ => {}
    }

    let mut chars = symbol.chars();
    let num = chars.next()?.to_digit(10)? as u8;
    let suit = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    let start = match suit {
        'm' => MANZU_START,
        'p' => PINZU_START,
        's' => SOUZU_START,
        'z' => {
            return if (1..=7).contains(&num) {
                Some(JIHAI_START + num - 1)
            } else {
                None
            };
        }
        _ => return None,
    };
    if (1..=9).contains(&num) {
        Some(start + num - 1)
    } else {
        None
    }
}

/// True for the three red-five symbols.
#[inline]
pub fn mjai_is_red(symbol: &str) -> bool {
    matches!(symbol, "5mr" | "5pr" | "5sr")
}

/// If `slot` is the five of a numeric suit, returns the suit index (0-2).
#[inline]
const fn five_suit(slot: usize) -> Option<usize> {
    match slot {
        FIVE_MANZU => Some(0),
        FIVE_PINZU => Some(1),
        FIVE_SOUZU => Some(2),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Hand conversion
// ---------------------------------------------------------------------------

/// Converts a count vector to an mjai symbol list.
///
/// Ordering is manzu ascending, pinzu, souzu, honors E S W N P F C, with red
/// fives appended last. Each set red flag suppresses one plain "5" of its
/// suit so the red tile is not double-counted.
pub fn tiles_to_mjai(counts: &[u8; NUM_TILE_TYPES], akas: &[bool; 3]) -> Vec<String> {
    let total: usize = counts.iter().map(|&c| c as usize).sum();
    let mut tiles = Vec::with_capacity(total);
    let mut reds = Vec::new();

    for (slot, &count) in counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let mut plain = count;
        if let Some(suit) = five_suit(slot) {
            if akas[suit] {
                reds.push(RED_NAMES[suit].to_owned());
                plain -= 1;
            }
        }
        for _ in 0..plain {
            tiles.push(tile_to_mjai(slot as u8).to_owned());
        }
    }

    tiles.extend(reds);
    tiles
}

/// Converts a count vector to tenhou.net/2 notation (like `123m0456p789s11z`).
///
/// Digit runs are ascending per suit; a red five renders as a leading "0"
/// replacing one "5" in its suit's run; honors render as digits 1-7 with
/// suffix "z".
pub fn tiles_to_tenhou(counts: &[u8; NUM_TILE_TYPES], akas: &[bool; 3]) -> String {
    let mut out = String::new();

    for (suit, &letter) in SUIT_LETTERS.iter().enumerate() {
        let start = suit * NUM_SUIT_TILES;
        let mut run = String::new();
        if akas[suit] && counts[start + 4] > 0 {
            run.push('0');
        }
        for rank in 0..NUM_SUIT_TILES {
            let mut n = counts[start + rank];
            if rank == 4 && akas[suit] && n > 0 {
                n -= 1;
            }
            for _ in 0..n {
                run.push((b'1' + rank as u8) as char);
            }
        }
        if !run.is_empty() {
            out.push_str(&run);
            out.push(letter);
        }
    }

    let mut honors = String::new();
    for rank in 0..7 {
        for _ in 0..counts[JIHAI_START as usize + rank] {
            honors.push((b'1' + rank as u8) as char);
        }
    }
    if !honors.is_empty() {
        out.push_str(&honors);
        out.push('z');
    }

    out
}

/// Parses tenhou.net/2 notation back into a count vector and red-five flags.
///
/// Exact inverse of [`tiles_to_tenhou`]: round-tripping reproduces counts
/// and flags bit-for-bit. A "0" digit in a numeric suit is the red five and
/// contributes to that suit's five slot.
pub fn parse_tenhou(text: &str) -> ClientResult<([u8; NUM_TILE_TYPES], [bool; 3])> {
    let mut counts = [0u8; NUM_TILE_TYPES];
    let mut akas = [false; 3];
    let mut pending: Vec<u8> = Vec::new();

    let parse_err = |message: String| ClientError::ProtocolParse {
        message: format!("tenhou notation '{}': {}", text, message),
    };

    let mut bump = |slot: usize| -> Result<(), String> {
        if counts[slot] >= 4 {
            return Err(format!("more than four copies of tile {}", slot));
        }
        counts[slot] += 1;
        Ok(())
    };

    for c in text.chars() {
        if let Some(d) = c.to_digit(10) {
            pending.push(d as u8);
            continue;
        }
        let suit = match c {
            'm' => 0,
            'p' => 1,
            's' => 2,
            'z' => 3,
            other => return Err(parse_err(format!("unexpected character '{}'", other))),
        };
        for &d in &pending {
            let slot = match (d, suit) {
                (0, 0..=2) => {
                    if akas[suit] {
                        return Err(parse_err(format!(
                            "duplicate red five in suit '{}'",
                            SUIT_LETTERS[suit]
                        )));
                    }
                    akas[suit] = true;
                    suit * NUM_SUIT_TILES + 4
                }
                (1..=9, 0..=2) => suit * NUM_SUIT_TILES + d as usize - 1,
                (1..=7, 3) => JIHAI_START as usize + d as usize - 1,
                _ => return Err(parse_err(format!("digit '{}' is invalid for honors", d))),
            };
            bump(slot).map_err(&parse_err)?;
        }
        pending.clear();
    }

    if !pending.is_empty() {
        return Err(parse_err("pending digits without suit".to_owned()));
    }

    Ok((counts, akas))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
