//! # Font Management
//!
//! Font identity, lookup, and text measurement.
//!
//! The engine renders with the 14 standard PDF fonts, which ship with every
//! viewer and need no embedding. Custom TTF/OTF fonts can be registered to
//! drive *measurement* (so layout matches a canvas target that loads the same
//! font); the PDF target substitutes the closest standard font for them —
//! embedding is future work.

pub mod metrics;

pub use metrics::StandardFontMetrics;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::LaudoError;

/// Identity of a font face: family + weight + italic. This triple travels
/// inside draw instructions so render targets can reproduce the exact face.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontKey {
    pub family: String,
    pub weight: u32,
    pub italic: bool,
}

impl FontKey {
    pub fn new(family: &str, weight: u32, italic: bool) -> Self {
        Self {
            family: family.to_string(),
            weight,
            italic,
        }
    }
}

/// Resolved font data behind a key.
#[derive(Debug, Clone)]
pub enum FontData {
    /// One of the 14 standard PDF fonts. No embedding needed.
    Standard(StandardFont),
    /// A registered TrueType/OpenType font, kept for its metrics only.
    Custom(CustomFontMetrics),
}

/// Parsed metrics from a TrueType/OpenType font via ttf-parser.
#[derive(Debug, Clone)]
pub struct CustomFontMetrics {
    pub units_per_em: u16,
    pub advance_widths: HashMap<char, u16>,
    pub default_advance: u16,
    pub ascender: i16,
    pub descender: i16,
}

impl CustomFontMetrics {
    /// Advance width of a character in points.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        let w = self
            .advance_widths
            .get(&ch)
            .copied()
            .unwrap_or(self.default_advance);
        (w as f64 / self.units_per_em as f64) * font_size
    }

    /// Parse metrics from raw font data.
    pub fn from_font_data(data: &[u8]) -> Result<Self, LaudoError> {
        let face = ttf_parser::Face::parse(data, 0)
            .map_err(|e| LaudoError::Font(format!("could not parse font data: {}", e)))?;
        let units_per_em = face.units_per_em();
        let ascender = face.ascender();
        let descender = face.descender();

        let mut advance_widths = HashMap::new();
        let mut default_advance = 0u16;

        // Latin coverage (plus general punctuation) is enough for report text;
        // anything else falls back to the default advance.
        let ranges = [0x20u32..=0x2AF, 0x2000..=0x20AC];
        for code in ranges.into_iter().flatten() {
            if let Some(ch) = char::from_u32(code) {
                if let Some(glyph_id) = face.glyph_index(ch) {
                    let advance = face.glyph_hor_advance(glyph_id).unwrap_or(0);
                    advance_widths.insert(ch, advance);
                    if ch == ' ' {
                        default_advance = advance;
                    }
                }
            }
        }

        if default_advance == 0 {
            default_advance = units_per_em / 2;
        }

        Ok(CustomFontMetrics {
            units_per_em,
            advance_widths,
            default_advance,
            ascender,
            descender,
        })
    }
}

/// The 14 standard PDF fonts.
#[derive(Debug, Clone, Copy)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    TimesRoman,
    TimesBold,
    TimesItalic,
    TimesBoldItalic,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
    Symbol,
    ZapfDingbats,
}

impl StandardFont {
    /// The PDF base-font name.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::HelveticaOblique => "Helvetica-Oblique",
            Self::HelveticaBoldOblique => "Helvetica-BoldOblique",
            Self::TimesRoman => "Times-Roman",
            Self::TimesBold => "Times-Bold",
            Self::TimesItalic => "Times-Italic",
            Self::TimesBoldItalic => "Times-BoldItalic",
            Self::Courier => "Courier",
            Self::CourierBold => "Courier-Bold",
            Self::CourierOblique => "Courier-Oblique",
            Self::CourierBoldOblique => "Courier-BoldOblique",
            Self::Symbol => "Symbol",
            Self::ZapfDingbats => "ZapfDingbats",
        }
    }

    /// Advance-width table for this font. The oblique/italic cuts share
    /// their upright widths; Symbol and ZapfDingbats carry no Latin text and
    /// are approximated (they are unreachable through family resolution).
    pub fn metrics(&self) -> &'static StandardFontMetrics {
        match self {
            Self::Helvetica | Self::HelveticaOblique => &metrics::HELVETICA,
            Self::HelveticaBold | Self::HelveticaBoldOblique => &metrics::HELVETICA_BOLD,
            Self::TimesRoman | Self::TimesItalic => &metrics::TIMES_ROMAN,
            Self::TimesBold | Self::TimesBoldItalic => &metrics::TIMES_BOLD,
            Self::Courier
            | Self::CourierBold
            | Self::CourierOblique
            | Self::CourierBoldOblique => &metrics::COURIER,
            Self::Symbol | Self::ZapfDingbats => &metrics::HELVETICA,
        }
    }
}

/// Maps font family + weight + style to font data.
pub struct FontRegistry {
    fonts: HashMap<FontKey, FontData>,
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FontRegistry {
    pub fn new() -> Self {
        let mut fonts = HashMap::new();

        let standard_mappings = vec![
            (("Helvetica", 400, false), StandardFont::Helvetica),
            (("Helvetica", 700, false), StandardFont::HelveticaBold),
            (("Helvetica", 400, true), StandardFont::HelveticaOblique),
            (("Helvetica", 700, true), StandardFont::HelveticaBoldOblique),
            (("Times", 400, false), StandardFont::TimesRoman),
            (("Times", 700, false), StandardFont::TimesBold),
            (("Times", 400, true), StandardFont::TimesItalic),
            (("Times", 700, true), StandardFont::TimesBoldItalic),
            (("Courier", 400, false), StandardFont::Courier),
            (("Courier", 700, false), StandardFont::CourierBold),
            (("Courier", 400, true), StandardFont::CourierOblique),
            (("Courier", 700, true), StandardFont::CourierBoldOblique),
        ];

        for ((family, weight, italic), font) in standard_mappings {
            fonts.insert(FontKey::new(family, weight, italic), FontData::Standard(font));
        }

        Self { fonts }
    }

    /// Look up a font: exact key, then snapped weight (≥600 → 700, else 400),
    /// then Helvetica at the snapped weight.
    pub fn resolve(&self, family: &str, weight: u32, italic: bool) -> &FontData {
        if let Some(font) = self.fonts.get(&FontKey::new(family, weight, italic)) {
            return font;
        }

        let snapped = if weight >= 600 { 700 } else { 400 };
        if let Some(font) = self.fonts.get(&FontKey::new(family, snapped, italic)) {
            return font;
        }

        self.fonts
            .get(&FontKey::new("Helvetica", snapped, italic))
            .unwrap_or_else(|| {
                self.fonts
                    .get(&FontKey::new("Helvetica", 400, false))
                    .expect("Helvetica must be registered")
            })
    }

    /// Register a custom font for measurement.
    pub fn register(
        &mut self,
        family: &str,
        weight: u32,
        italic: bool,
        data: &[u8],
    ) -> Result<(), LaudoError> {
        let metrics = CustomFontMetrics::from_font_data(data)?;
        self.fonts.insert(
            FontKey::new(family, weight, italic),
            FontData::Custom(metrics),
        );
        Ok(())
    }
}

/// Shared font context used by layout and the PDF target.
/// Provides text measurement with real glyph metrics.
pub struct FontContext {
    registry: FontRegistry,
}

impl Default for FontContext {
    fn default() -> Self {
        Self::new()
    }
}

impl FontContext {
    pub fn new() -> Self {
        Self {
            registry: FontRegistry::new(),
        }
    }

    /// Advance width of a single character in points.
    pub fn char_width(&self, ch: char, family: &str, weight: u32, italic: bool, font_size: f64) -> f64 {
        match self.registry.resolve(family, weight, italic) {
            FontData::Standard(std_font) => std_font.metrics().char_width(ch, font_size),
            FontData::Custom(m) => m.char_width(ch, font_size),
        }
    }

    /// Width of a string in points.
    pub fn measure_string(
        &self,
        text: &str,
        family: &str,
        weight: u32,
        italic: bool,
        font_size: f64,
        letter_spacing: f64,
    ) -> f64 {
        match self.registry.resolve(family, weight, italic) {
            FontData::Standard(std_font) => {
                std_font.metrics().measure_string(text, font_size, letter_spacing)
            }
            FontData::Custom(m) => {
                let mut width = 0.0;
                for ch in text.chars() {
                    width += m.char_width(ch, font_size) + letter_spacing;
                }
                width
            }
        }
    }

    /// Resolve a font key to its font data.
    pub fn resolve(&self, family: &str, weight: u32, italic: bool) -> &FontData {
        self.registry.resolve(family, weight, italic)
    }

    /// Register a custom font for measurement.
    pub fn register(
        &mut self,
        family: &str,
        weight: u32,
        italic: bool,
        data: &[u8],
    ) -> Result<(), LaudoError> {
        self.registry.register(family, weight, italic, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helvetica_body_size_widths() {
        let ctx = FontContext::new();
        // 'o' is 556/1000 em in the Helvetica AFM table.
        let w = ctx.char_width('o', "Helvetica", 400, false, 10.5);
        assert!((w - 5.838).abs() < 0.001);
    }

    #[test]
    fn test_bold_labels_measure_wider() {
        let ctx = FontContext::new();
        let regular = ctx.measure_string("Placa", "Helvetica", 400, false, 10.5, 0.0);
        let bold = ctx.measure_string("Placa", "Helvetica", 700, false, 10.5, 0.0);
        assert!(bold > regular);
    }

    #[test]
    fn test_unknown_family_falls_back_to_helvetica() {
        let ctx = FontContext::new();
        let helvetica = ctx.measure_string("motor", "Helvetica", 400, false, 10.0, 0.0);
        let unknown = ctx.measure_string("motor", "Grotesque Sans", 400, false, 10.0, 0.0);
        assert!((helvetica - unknown).abs() < 0.001);
    }

    #[test]
    fn test_intermediate_weights_snap() {
        let ctx = FontContext::new();
        let w700 = ctx.char_width('R', "Helvetica", 700, false, 13.0);
        let w650 = ctx.char_width('R', "Helvetica", 650, false, 13.0);
        let w300 = ctx.char_width('R', "Helvetica", 300, false, 13.0);
        let w400 = ctx.char_width('R', "Helvetica", 400, false, 13.0);
        assert!((w700 - w650).abs() < 0.001);
        assert!((w400 - w300).abs() < 0.001);
    }

    #[test]
    fn test_measure_string_accented() {
        let ctx = FontContext::new();
        let plain = ctx.measure_string("analise", "Helvetica", 400, false, 10.0, 0.0);
        let accented = ctx.measure_string("análise", "Helvetica", 400, false, 10.0, 0.0);
        assert!((plain - accented).abs() < 0.001);
    }

    #[test]
    fn test_register_rejects_garbage() {
        let mut ctx = FontContext::new();
        let err = ctx.register("Broken", 400, false, b"not a font").unwrap_err();
        assert!(matches!(err, LaudoError::Font(_)));
    }
}
