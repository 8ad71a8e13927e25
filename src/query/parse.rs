//! Query string tokenizer and value parsers.

use alloc::string::String;
use alloc::vec::Vec;

use super::ParseWarning;
use super::descriptor::{LayoutDescriptor, SpecDescriptor, Unit};
use crate::color::Rgb;
use crate::print::PaperSize;
use crate::spec::{AspectRatio, Background};

pub(crate) fn parse_spec_query(query: &str) -> (SpecDescriptor, Vec<ParseWarning>) {
    let mut d = SpecDescriptor::default();
    let mut warnings = Vec::new();
    for (key, value) in pairs(query) {
        dispatch_spec_key(&key, &value, &mut d, &mut warnings);
    }
    (d, warnings)
}

pub(crate) fn parse_layout_query(query: &str) -> (LayoutDescriptor, Vec<ParseWarning>) {
    let mut d = LayoutDescriptor::default();
    let mut warnings = Vec::new();
    for (key, value) in pairs(query) {
        dispatch_layout_key(&key, &value, &mut d, &mut warnings);
    }
    (d, warnings)
}

/// Decoded `(lowercase key, value)` pairs.
fn pairs(query: &str) -> impl Iterator<Item = (String, String)> + '_ {
    split_query(query).map(|pair| {
        let (raw_key, raw_value) = split_pair(pair);
        (
            percent_decode(raw_key).to_ascii_lowercase(),
            percent_decode(raw_value),
        )
    })
}

fn dispatch_spec_key(
    key: &str,
    value: &str,
    d: &mut SpecDescriptor,
    warnings: &mut Vec<ParseWarning>,
) {
    match key {
        "w" | "width" => {
            let parsed = checked(parse_u32(value), "w", value, "expected a positive integer", warnings);
            set_or_warn(&mut d.width, parsed, key, value, warnings);
        }
        "h" | "height" => {
            let parsed = checked(parse_u32(value), "h", value, "expected a positive integer", warnings);
            set_or_warn(&mut d.height, parsed, key, value, warnings);
        }
        "unit" => {
            let parsed = checked(parse_unit(value), "unit", value, "expected mm|px", warnings);
            set_or_warn(&mut d.unit, parsed, key, value, warnings);
        }
        "dpi" => {
            let parsed = checked(parse_u32(value), "dpi", value, "expected a positive integer", warnings);
            set_or_warn(&mut d.dpi, parsed, key, value, warnings);
        }
        "ratio" => {
            let parsed = checked(
                value.parse::<AspectRatio>().ok(),
                "ratio",
                value,
                "expected W:H with non-zero terms",
                warnings,
            );
            set_or_warn(&mut d.ratio, parsed, key, value, warnings);
        }
        "bg" | "background" => {
            let parsed = checked(
                parse_background(value),
                "bg",
                value,
                "expected any, a hex color, or a color name",
                warnings,
            );
            set_or_warn(&mut d.background, parsed, key, value, warnings);
        }
        "face" => {
            let parsed = checked(parse_range(value), "face", value, "expected min-max or min,max", warnings);
            set_or_warn(&mut d.face, parsed, key, value, warnings);
        }
        "eye" | "eyeline" => {
            let parsed = checked(
                parse_f64(value),
                "eye",
                value,
                "expected a fraction of the photo height",
                warnings,
            );
            set_or_warn(&mut d.eye_line, parsed, key, value, warnings);
        }
        _ => warnings.push(ParseWarning::KeyNotRecognized {
            key: String::from(key),
            value: String::from(value),
        }),
    }
}

fn dispatch_layout_key(
    key: &str,
    value: &str,
    d: &mut LayoutDescriptor,
    warnings: &mut Vec<ParseWarning>,
) {
    match key {
        "cols" => {
            let parsed = checked(parse_u32(value), "cols", value, "expected a positive integer", warnings);
            set_or_warn(&mut d.cols, parsed, key, value, warnings);
        }
        "rows" => {
            let parsed = checked(parse_u32(value), "rows", value, "expected a positive integer", warnings);
            set_or_warn(&mut d.rows, parsed, key, value, warnings);
        }
        "paper" => {
            let parsed = checked(
                parse_paper(value),
                "paper",
                value,
                "expected a4|10x15|auto or WxH in mm",
                warnings,
            );
            set_or_warn(&mut d.paper, parsed, key, value, warnings);
        }
        "gap" => {
            let parsed = checked(
                parse_f64(value).filter(|&v| v >= 0.0),
                "gap",
                value,
                "expected a non-negative number of mm",
                warnings,
            );
            set_or_warn(&mut d.gap_mm, parsed, key, value, warnings);
        }
        "cut" | "cutlines" => {
            let parsed = checked(
                parse_bool(value),
                "cut",
                value,
                "expected true|false|1|0|yes|no|on|off",
                warnings,
            );
            set_or_warn(&mut d.cut_lines, parsed, key, value, warnings);
        }
        _ => warnings.push(ParseWarning::KeyNotRecognized {
            key: String::from(key),
            value: String::from(value),
        }),
    }
}

/// Pass `parsed` through, warning when it is `None`.
fn checked<T>(
    parsed: Option<T>,
    key: &'static str,
    value: &str,
    reason: &'static str,
    warnings: &mut Vec<ParseWarning>,
) -> Option<T> {
    if parsed.is_none() {
        warnings.push(ParseWarning::ValueInvalid {
            key,
            value: String::from(value),
            reason,
        });
    }
    parsed
}

/// Set a field, warning on duplicate.
fn set_or_warn<T>(
    field: &mut Option<T>,
    parsed: Option<T>,
    key: &str,
    value: &str,
    warnings: &mut Vec<ParseWarning>,
) {
    if let Some(v) = parsed {
        if field.is_some() {
            warnings.push(ParseWarning::DuplicateKey {
                key: String::from(key),
                value: String::from(value),
            });
        }
        *field = Some(v);
    }
}

// ---- Value parsers ----

fn parse_u32(s: &str) -> Option<u32> {
    s.trim().parse::<u32>().ok().filter(|&v| v > 0)
}

fn parse_f64(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_unit(s: &str) -> Option<Unit> {
    match s.trim().to_ascii_lowercase().as_str() {
        "mm" => Some(Unit::Millimetres),
        "px" => Some(Unit::Pixels),
        _ => None,
    }
}

fn parse_background(s: &str) -> Option<Background> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("any") || s.eq_ignore_ascii_case("none") {
        return Some(Background::Any);
    }
    Rgb::parse(s).map(Background::Fixed)
}

/// `"70-80"` or `"70,80"`.
fn parse_range(s: &str) -> Option<(f64, f64)> {
    let (min, max) = s.split_once(['-', ','])?;
    Some((parse_f64(min)?, parse_f64(max)?))
}

/// Named paper, `auto`/`none` for an auto-sized sheet, or `WxH` in mm.
fn parse_paper(s: &str) -> Option<Option<PaperSize>> {
    let s = s.trim();
    let lower = s.to_ascii_lowercase();
    match lower.as_str() {
        "a4" => return Some(Some(PaperSize::A4)),
        "10x15" | "10×15" => return Some(Some(PaperSize::PHOTO_10X15)),
        "auto" | "none" => return Some(None),
        _ => {}
    }
    let (w, h) = lower.split_once(['x', '×'])?;
    let w = parse_f64(w).filter(|&v| v > 0.0)?;
    let h = parse_f64(h).filter(|&v| v > 0.0)?;
    Some(Some(PaperSize::new("custom", w, h)))
}

// ---- Tokenizer ----

/// Split query string on '&'.
fn split_query(query: &str) -> impl Iterator<Item = &str> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query.split('&').filter(|s| !s.is_empty())
}

/// Split a single "key=value" pair on the first '='.
fn split_pair(pair: &str) -> (&str, &str) {
    pair.split_once('=').unwrap_or((pair, ""))
}

/// Percent-decode a URL component. Also handles '+' as space.
///
/// Decoded bytes are reassembled as UTF-8; invalid sequences become U+FFFD.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                if let (Some(hi), Some(lo)) = (hex_digit(bytes[i + 1]), hex_digit(bytes[i + 2])) {
                    out.push(hi << 4 | lo);
                    i += 3;
                } else {
                    out.push(b'%');
                    i += 1;
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
