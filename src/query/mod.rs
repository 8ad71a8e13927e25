//! Query-string descriptors for custom specs and print layouts.
//!
//! Parses strings like `?w=35&h=45&bg=white` into a [`SpecDescriptor`] and
//! `cols=2&rows=3&paper=a4` into a [`LayoutDescriptor`]. Parsing never fails:
//! malformed input becomes a [`ParseWarning`] and the field stays unset.
//! Converting a descriptor applies its values over the catalog's custom
//! templates and checks the result.
//!
//! # Example
//!
//! ```
//! use zenidphoto::query;
//!
//! let result = query::parse_spec("w=40&h=60&bg=%23f0f0f0&face=60-75");
//! assert!(result.warnings.is_empty());
//!
//! let spec = result.value.to_spec().expect("valid spec");
//! assert_eq!(spec.ratio.to_string(), "2:3");
//! assert_eq!(spec.face.min, 60.0);
//! ```

mod descriptor;
mod parse;

pub use descriptor::{LayoutDescriptor, SpecDescriptor, Unit};

use alloc::string::String;
use alloc::vec::Vec;

/// Parsed value plus any non-fatal warnings.
#[derive(Debug, Clone)]
pub struct ParseResult<T> {
    /// The parsed descriptor.
    pub value: T,
    /// Non-fatal parse warnings.
    pub warnings: Vec<ParseWarning>,
}

/// Non-fatal warning from descriptor parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// A key appeared more than once (last value wins).
    DuplicateKey { key: String, value: String },
    /// A key has no meaning for this descriptor.
    KeyNotRecognized { key: String, value: String },
    /// A key was recognized but its value could not be parsed.
    ValueInvalid {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Parse a spec descriptor (with or without leading `?`).
pub fn parse_spec(query: &str) -> ParseResult<SpecDescriptor> {
    let (value, warnings) = parse::parse_spec_query(query);
    ParseResult { value, warnings }
}

/// Parse a print layout descriptor (with or without leading `?`).
pub fn parse_layout(query: &str) -> ParseResult<LayoutDescriptor> {
    let (value, warnings) = parse::parse_layout_query(query);
    ParseResult { value, warnings }
}
