//! # Text Measurement and Wrapping
//!
//! Real-metrics measurement plus greedy word wrapping. Words are
//! whitespace-delimited and never split: a word wider than the wrap width
//! gets a line of its own. Wrapping is the only line-breaking policy in the
//! engine — report text carries no soft hyphens or bidi runs.

use crate::error::LaudoError;
use crate::font::{FontContext, FontKey};

/// Measures and wraps text against a font context.
pub struct TextMeasurer<'a> {
    fonts: &'a FontContext,
}

impl<'a> TextMeasurer<'a> {
    pub fn new(fonts: &'a FontContext) -> Self {
        Self { fonts }
    }

    /// Rendered width of `text` in points.
    pub fn measure(&self, text: &str, font: &FontKey, size: f64) -> f64 {
        self.fonts
            .measure_string(text, &font.family, font.weight, font.italic, size, 0.0)
    }

    /// Greedy word wrap: append the next word to the current line while the
    /// joined line still fits, otherwise flush and start over with that word.
    /// Empty (or all-whitespace) input produces zero lines, never one empty
    /// line.
    pub fn wrap(
        &self,
        text: &str,
        font: &FontKey,
        size: f64,
        max_width: f64,
    ) -> Result<Vec<String>, LaudoError> {
        if max_width <= 0.0 {
            return Err(LaudoError::InvalidLayout(format!(
                "wrap width must be positive, got {}",
                max_width
            )));
        }

        let mut lines = Vec::new();
        let mut current = String::new();

        for word in text.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if self.measure(&candidate, font, size) <= max_width || current.is_empty() {
                // An over-wide word with nothing before it stays as the
                // current line: it ships alone, never split mid-word.
                current = candidate;
            } else {
                lines.push(current);
                current = word.to_string();
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }

        Ok(lines)
    }
}
