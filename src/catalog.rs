//! Built-in document standards and print layouts.

use crate::color::Rgb;
use crate::print::{PaperSize, PrintLayout};
use crate::spec::{AspectRatio, Background, DocumentSpec, FaceRange, SizeMode};

const WHITE: Background = Background::Fixed(Rgb::WHITE);

/// Kyrgyz passport, 35×45 mm.
pub const PASSPORT_KG: DocumentSpec =
    DocumentSpec::physical("passport_kg", "Passport (KG)", 35, 45, WHITE, (70.0, 80.0), 0.45);

/// US visa, 2×2 in.
pub const VISA_US: DocumentSpec =
    DocumentSpec::physical("visa_us", "US visa", 51, 51, WHITE, (50.0, 69.0), 0.45);

/// Schengen visa, light grey background.
pub const VISA_SCHENGEN: DocumentSpec = DocumentSpec::physical(
    "visa_schengen",
    "Schengen visa",
    35,
    45,
    Background::Fixed(Rgb::LIGHT_GREY),
    (70.0, 80.0),
    0.45,
);

/// Kyrgyz driving licence, 30×40 mm.
pub const LICENSE_KG: DocumentSpec =
    DocumentSpec::physical("license_kg", "Driving licence (KG)", 30, 40, WHITE, (70.0, 80.0), 0.45);

/// Kyrgyz ID card.
pub const ID_KG: DocumentSpec =
    DocumentSpec::physical("id_kg", "ID card (KG)", 35, 45, WHITE, (70.0, 80.0), 0.45);

/// Russian passport.
pub const PASSPORT_RU: DocumentSpec =
    DocumentSpec::physical("passport_ru", "Passport (RU)", 35, 45, WHITE, (70.0, 80.0), 0.45);

/// Chinese visa, 33×48 mm (11:16).
pub const VISA_CHINA: DocumentSpec =
    DocumentSpec::physical("visa_china", "China visa", 33, 48, WHITE, (70.0, 80.0), 0.45);

/// Japanese visa, 45×45 mm.
pub const VISA_JAPAN: DocumentSpec =
    DocumentSpec::physical("visa_japan", "Japan visa", 45, 45, WHITE, (60.0, 70.0), 0.45);

/// Korean visa.
pub const VISA_KOREA: DocumentSpec =
    DocumentSpec::physical("visa_korea", "Korea visa", 35, 45, WHITE, (70.0, 80.0), 0.45);

/// Profile picture, 600×600 px, any background.
pub const LINKEDIN: DocumentSpec = DocumentSpec {
    id: "linkedin",
    name: "LinkedIn / CV",
    ratio: AspectRatio::reduced(1, 1),
    size: SizeMode::Pixel {
        width: 600,
        height: 600,
        dpi: 72,
    },
    background: Background::Any,
    face: FaceRange {
        min: 40.0,
        max: 60.0,
    },
    eye_line: 0.40,
};

/// Template for [`DocumentSpec::custom`]: its id, name, face range, eye line,
/// and dpi carry over to every custom spec.
pub const CUSTOM: DocumentSpec =
    DocumentSpec::physical("custom", "Custom", 35, 45, WHITE, (50.0, 90.0), 0.45);

/// Every built-in document spec, in display order.
pub const DOCUMENT_SPECS: &[DocumentSpec] = &[
    PASSPORT_KG,
    VISA_US,
    VISA_SCHENGEN,
    LICENSE_KG,
    ID_KG,
    PASSPORT_RU,
    VISA_CHINA,
    VISA_JAPAN,
    VISA_KOREA,
    LINKEDIN,
    CUSTOM,
];

/// One photo on its own auto-sized sheet.
pub const SINGLE: PrintLayout = PrintLayout::new("single", "1 photo", 1, 1, None);
/// Four photos on 10×15.
pub const GRID_2X2: PrintLayout =
    PrintLayout::new("2x2", "4 photos (2×2)", 2, 2, Some(PaperSize::PHOTO_10X15));
/// Six photos on 10×15.
pub const GRID_2X3: PrintLayout =
    PrintLayout::new("2x3", "6 photos (2×3)", 2, 3, Some(PaperSize::PHOTO_10X15));
/// Eight photos on A4.
pub const GRID_2X4: PrintLayout =
    PrintLayout::new("2x4", "8 photos (2×4)", 2, 4, Some(PaperSize::A4));
/// Template for [`PrintLayout::custom_grid`].
pub const CUSTOM_GRID: PrintLayout =
    PrintLayout::new("custom_grid", "Custom grid", 2, 2, Some(PaperSize::A4));

/// Every built-in print layout, in display order.
pub const PRINT_LAYOUTS: &[PrintLayout] = &[SINGLE, GRID_2X2, GRID_2X3, GRID_2X4, CUSTOM_GRID];

/// Look up a document spec by id.
pub fn document_spec(id: &str) -> Option<&'static DocumentSpec> {
    DOCUMENT_SPECS.iter().find(|s| s.id == id)
}

/// Look up a print layout by id.
pub fn print_layout(id: &str) -> Option<&'static PrintLayout> {
    PRINT_LAYOUTS.iter().find(|l| l.id == id)
}
