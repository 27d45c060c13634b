// Copyright (c) 2026 glyphrain contributors

use rand::Rng;

const FALLBACK: char = '0';

const ASCII: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!·$%&/()=?¿*-:;ºª";
const HIRAGANA: &str = "あいうえおかきくけこさしすせそたちつてとなにぬねの";
const KATAKANA: &str = "アイウエオカキクケコサシスセソタチツテトナニヌネノ";
const KANJI: &str = "一二三四五六七八九十百千万円口目手足早長明正高中大";
const HEX: &str = "1234567890ABCDEF";
const BIN: &str = "01";

/// The alphabet the rain is drawn from. Chosen once at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlyphSet {
    Ascii,
    Japanese,
    Hex,
    Bin,
}

impl GlyphSet {
    /// Case-insensitive name lookup; anything unrecognized selects `Bin`.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "ascii" => GlyphSet::Ascii,
            "japanese" => GlyphSet::Japanese,
            "hex" => GlyphSet::Hex,
            _ => GlyphSet::Bin,
        }
    }

    /// Draw one glyph. The Japanese set picks a script first and a character
    /// within it second, so each script carries equal weight regardless of
    /// its size. Not the same distribution as a flat draw over the three
    /// scripts concatenated.
    pub fn next(self, rng: &mut impl Rng) -> char {
        match self {
            GlyphSet::Ascii => pick(rng, ASCII),
            GlyphSet::Japanese => match rng.random_range(0..3) {
                0 => pick(rng, HIRAGANA),
                1 => pick(rng, KATAKANA),
                _ => pick(rng, KANJI),
            },
            GlyphSet::Hex => pick(rng, HEX),
            GlyphSet::Bin => pick(rng, BIN),
        }
    }
}

fn pick(rng: &mut impl Rng, alphabet: &str) -> char {
    let len = alphabet.chars().count();
    if len == 0 {
        return FALLBACK;
    }
    let idx = rng.random_range(0..len);
    alphabet.chars().nth(idx).unwrap_or(FALLBACK)
}
