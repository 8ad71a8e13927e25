//! Background colors: hex (`#RGB`, `#RRGGBB`) and a short list of named colors.

use core::fmt;

/// Opaque sRGB color, 8 bits per channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// `#ffffff`
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// `#e8e8e8`, the light grey some visa standards ask for.
    pub const LIGHT_GREY: Self = Self::new(232, 232, 232);

    /// Create a color from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex or named color.
    ///
    /// Accepts `#RGB` / `RGB`, `#RRGGBB` / `RRGGBB`, and the names in
    /// [`NAMED`] (case-insensitive). Alpha forms are rejected: document
    /// backgrounds are always opaque.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        let hex = s.strip_prefix('#').unwrap_or(s);
        parse_hex(hex).or_else(|| lookup_named(s))
    }
}

impl fmt::Display for Rgb {
    /// Lowercase `#rrggbb`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let bytes = hex.as_bytes();
    match bytes.len() {
        3 => Some(Rgb::new(
            expand_nibble(bytes[0])?,
            expand_nibble(bytes[1])?,
            expand_nibble(bytes[2])?,
        )),
        6 => Some(Rgb::new(
            parse_byte(bytes[0], bytes[1])?,
            parse_byte(bytes[2], bytes[3])?,
            parse_byte(bytes[4], bytes[5])?,
        )),
        _ => None,
    }
}

/// `'f'` → `0xFF`, `'a'` → `0xAA`.
fn expand_nibble(ch: u8) -> Option<u8> {
    let n = hex_val(ch)?;
    Some(n << 4 | n)
}

fn parse_byte(hi: u8, lo: u8) -> Option<u8> {
    Some(hex_val(hi)? << 4 | hex_val(lo)?)
}

fn hex_val(ch: u8) -> Option<u8> {
    match ch {
        b'0'..=b'9' => Some(ch - b'0'),
        b'a'..=b'f' => Some(ch - b'a' + 10),
        b'A'..=b'F' => Some(ch - b'A' + 10),
        _ => None,
    }
}

fn lookup_named(name: &str) -> Option<Rgb> {
    NAMED
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, c)| c)
}

/// Named colors accepted by [`Rgb::parse`]. Pale tones used for photo backdrops.
pub const NAMED: &[(&str, Rgb)] = &[
    ("aliceblue", Rgb::new(240, 248, 255)),
    ("azure", Rgb::new(240, 255, 255)),
    ("black", Rgb::new(0, 0, 0)),
    ("gainsboro", Rgb::new(220, 220, 220)),
    ("ghostwhite", Rgb::new(248, 248, 255)),
    ("gray", Rgb::new(128, 128, 128)),
    ("grey", Rgb::new(128, 128, 128)),
    ("ivory", Rgb::new(255, 255, 240)),
    ("lightblue", Rgb::new(173, 216, 230)),
    ("lightgray", Rgb::new(211, 211, 211)),
    ("lightgrey", Rgb::new(211, 211, 211)),
    ("lightskyblue", Rgb::new(135, 206, 250)),
    ("red", Rgb::new(255, 0, 0)),
    ("silver", Rgb::new(192, 192, 192)),
    ("skyblue", Rgb::new(135, 206, 235)),
    ("snow", Rgb::new(255, 250, 250)),
    ("white", Rgb::new(255, 255, 255)),
    ("whitesmoke", Rgb::new(245, 245, 245)),
];

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn named_table_is_sorted() {
        for w in NAMED.windows(2) {
            assert!(w[0].0 < w[1].0, "NAMED not sorted: {:?} >= {:?}", w[0].0, w[1].0);
        }
    }

    #[test]
    fn hex_3_digit() {
        assert_eq!(Rgb::parse("fff"), Some(Rgb::WHITE));
        assert_eq!(Rgb::parse("#f80"), Some(Rgb::new(255, 136, 0)));
    }

    #[test]
    fn hex_6_digit() {
        assert_eq!(Rgb::parse("#E8E8E8"), Some(Rgb::LIGHT_GREY));
        assert_eq!(Rgb::parse("ff8000"), Some(Rgb::new(255, 128, 0)));
    }

    #[test]
    fn named_case_insensitive() {
        assert_eq!(Rgb::parse("WhiteSmoke"), Some(Rgb::new(245, 245, 245)));
    }

    #[test]
    fn alpha_and_garbage_rejected() {
        assert_eq!(Rgb::parse(""), None);
        assert_eq!(Rgb::parse("ffffff80"), None);
        assert_eq!(Rgb::parse("#12345"), None);
        assert_eq!(Rgb::parse("notacolor"), None);
    }

    #[test]
    fn displays_lowercase_hex() {
        assert_eq!(Rgb::new(232, 232, 232).to_string(), "#e8e8e8");
    }
}
