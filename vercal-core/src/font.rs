//! Font resolution for the PDF canvas.
//!
//! A font reference is either one of the standard 14 PDF font names (nothing
//! to embed) or a path to a `.ttf` file, which is embedded as a simple
//! /TrueType font. Embedding needs the advance widths for the WinAnsi code
//! range; `ab_glyph` reads them from the font program.

use std::fs;
use std::path::Path;

use ab_glyph::{Font as _, FontRef};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};

use crate::error::{VercalError, VercalResult};

const STANDARD_FONTS: [&str; 14] = [
    "Helvetica",
    "Helvetica-Bold",
    "Helvetica-Oblique",
    "Helvetica-BoldOblique",
    "Courier",
    "Courier-Bold",
    "Courier-Oblique",
    "Courier-BoldOblique",
    "Times-Roman",
    "Times-Bold",
    "Times-Italic",
    "Times-BoldItalic",
    "Symbol",
    "ZapfDingbats",
];

/// WinAnsi code points 0x80..=0x9f that differ from Latin-1.
const WINANSI_HIGH: [(u8, char); 27] = [
    (0x80, '\u{20ac}'), // euro sign
    (0x82, '\u{201a}'),
    (0x83, '\u{0192}'),
    (0x84, '\u{201e}'),
    (0x85, '\u{2026}'),
    (0x86, '\u{2020}'),
    (0x87, '\u{2021}'),
    (0x88, '\u{02c6}'),
    (0x89, '\u{2030}'),
    (0x8a, '\u{0160}'),
    (0x8b, '\u{2039}'),
    (0x8c, '\u{0152}'),
    (0x8e, '\u{017d}'),
    (0x91, '\u{2018}'),
    (0x92, '\u{2019}'),
    (0x93, '\u{201c}'),
    (0x94, '\u{201d}'),
    (0x95, '\u{2022}'),
    (0x96, '\u{2013}'),
    (0x97, '\u{2014}'),
    (0x98, '\u{02dc}'),
    (0x99, '\u{2122}'),
    (0x9a, '\u{0161}'),
    (0x9b, '\u{203a}'),
    (0x9c, '\u{0153}'),
    (0x9e, '\u{017e}'),
    (0x9f, '\u{0178}'),
];

/// Encode text as WinAnsi bytes, substituting `?` for unencodable chars.
pub fn encode_winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match u32::from(ch) {
            0x20..=0x7e => ch as u8,
            0xa0..=0xff => u32::from(ch) as u8,
            _ => WINANSI_HIGH
                .iter()
                .find(|(_, c)| *c == ch)
                .map(|(code, _)| *code)
                .unwrap_or(b'?'),
        })
        .collect()
}

fn winansi_char(code: u8) -> char {
    if (0x80..=0x9f).contains(&code) {
        WINANSI_HIGH
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, ch)| *ch)
            .unwrap_or('\u{fffd}')
    } else {
        char::from(code)
    }
}

/// A font ready to be attached to a PDF document.
#[derive(Debug)]
pub enum Font {
    /// One of the standard 14 fonts, referenced by name.
    Standard(&'static str),
    /// An embedded TrueType font.
    TrueType(TrueTypeFont),
}

/// An embedded TrueType font: the raw font program plus the metrics the
/// font dictionary needs, already scaled to 1000-unit glyph space.
#[derive(Debug)]
pub struct TrueTypeFont {
    pub name: String,
    pub data: Vec<u8>,
    pub ascent: i64,
    pub descent: i64,
    /// Advance widths for WinAnsi codes 32..=255.
    pub widths: Vec<i64>,
}

impl Font {
    /// Resolve a font reference: a standard-14 name, or a path to a `.ttf`
    /// file. Failures surface here, before any page is drawn.
    pub fn load(reference: &str) -> VercalResult<Self> {
        if let Some(name) = STANDARD_FONTS
            .iter()
            .copied()
            .find(|name| name.eq_ignore_ascii_case(reference))
        {
            return Ok(Font::Standard(name));
        }

        let path = Path::new(reference);
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        if extension.as_deref() != Some("ttf") {
            return Err(VercalError::FontLoad(format!(
                "'{}' is neither a standard PDF font name nor a .ttf file",
                reference
            )));
        }

        let data = fs::read(path)
            .map_err(|e| VercalError::FontLoad(format!("{}: {}", reference, e)))?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Embedded")
            .replace(' ', "-");
        truetype_metrics(data, name).map(Font::TrueType)
    }

    /// Build the font dictionary for this font, adding any supporting
    /// objects (font program, descriptor) to `doc`.
    pub fn to_dictionary(&self, doc: &mut Document) -> Dictionary {
        match self {
            Font::Standard(name) => dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => Object::Name(name.as_bytes().to_vec()),
                "Encoding" => "WinAnsiEncoding",
            },
            Font::TrueType(ttf) => {
                let max_width = ttf.widths.iter().copied().max().unwrap_or(1000);

                let font_file = doc.add_object(Stream::new(
                    dictionary! { "Length1" => ttf.data.len() as i64 },
                    ttf.data.clone(),
                ));
                let descriptor = doc.add_object(dictionary! {
                    "Type" => "FontDescriptor",
                    "FontName" => Object::Name(ttf.name.clone().into_bytes()),
                    "Flags" => 32,
                    "FontBBox" => vec![
                        Object::Integer(0),
                        Object::Integer(ttf.descent),
                        Object::Integer(max_width),
                        Object::Integer(ttf.ascent),
                    ],
                    "ItalicAngle" => 0,
                    "Ascent" => ttf.ascent,
                    "Descent" => ttf.descent,
                    "CapHeight" => ttf.ascent,
                    "StemV" => 80,
                    "FontFile2" => font_file,
                });
                dictionary! {
                    "Type" => "Font",
                    "Subtype" => "TrueType",
                    "BaseFont" => Object::Name(ttf.name.clone().into_bytes()),
                    "FirstChar" => 32,
                    "LastChar" => 255,
                    "Widths" => ttf.widths.iter().map(|w| Object::Integer(*w)).collect::<Vec<_>>(),
                    "Encoding" => "WinAnsiEncoding",
                    "FontDescriptor" => descriptor,
                }
            }
        }
    }
}

/// Read the metrics for the WinAnsi range out of a TrueType font program.
/// Unmapped code points fall back to the advance of the missing glyph.
fn truetype_metrics(data: Vec<u8>, name: String) -> VercalResult<TrueTypeFont> {
    let font = FontRef::try_from_slice(&data)
        .map_err(|e| VercalError::FontLoad(format!("{}: {}", name, e)))?;
    let units_per_em = font.units_per_em().ok_or_else(|| {
        VercalError::FontLoad(format!("{}: font reports no units per em", name))
    })?;
    let scale = 1000.0 / units_per_em;
    let to_glyph_space = |v: f32| f64::from(v * scale).round() as i64;

    let ascent = to_glyph_space(font.ascent_unscaled());
    let descent = to_glyph_space(font.descent_unscaled());
    let widths = (32u8..=255)
        .map(|code| {
            let glyph = font.glyph_id(winansi_char(code));
            to_glyph_space(font.h_advance_unscaled(glyph))
        })
        .collect();

    Ok(TrueTypeFont {
        name,
        data,
        ascent,
        descent,
        widths,
    })
}
