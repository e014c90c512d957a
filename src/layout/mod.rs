//! # Layout Vocabulary
//!
//! The two command languages the engine speaks, plus the page geometry and
//! visual theme shared by every render target.
//!
//! ```text
//! [LayoutCommand]      position-free content, built by the report builder
//!       ↓  FlowWriter (PageCursor + TextMeasurer)
//! [DrawInstruction]    absolute page/x/y primitives, consumed by a backend
//! ```
//!
//! Commands never carry coordinates; instructions never carry layout policy.
//! Both sides serialize, so a browser canvas target can consume the same
//! frozen instruction stream the PDF writer does.

pub mod cursor;
pub mod flow;

pub use cursor::PageCursor;
pub use flow::FlowWriter;

use serde::{Deserialize, Serialize};

use crate::error::LaudoError;
use crate::font::FontKey;

/// A position-free piece of report content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LayoutCommand {
    Heading {
        text: String,
        level: u8,
    },
    Paragraph {
        text: String,
    },
    KeyValue {
        label: String,
        value: String,
    },
    /// Horizontal divider across the content width.
    Rule,
    /// A colored status chip. Draws at the current cursor position without
    /// advancing; rows pairing a chip with other content advance once for
    /// the whole row (see `ComponentBlock`).
    Badge {
        text: String,
        #[serde(rename = "colorKind")]
        color_kind: BadgeKind,
    },
    /// One assessed component: bold name, status chip, optional wrapped note.
    ComponentBlock {
        name: String,
        status: String,
        #[serde(default)]
        note: Option<String>,
    },
    /// Forces a page break regardless of remaining space.
    PageBreakHint,
}

/// Closed set of semantic chip colors. Unrecognized serialized values fall
/// back to `Neutral` instead of failing the render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum BadgeKind {
    Low,
    Medium,
    Neutral,
}

impl BadgeKind {
    /// The two-tier status mapping used everywhere a status string becomes a
    /// chip color. Upstream classification emits "Reparo estético" for the
    /// low tier and free-form text otherwise.
    pub fn for_status(status: &str) -> Self {
        if status == "Reparo estético" {
            BadgeKind::Low
        } else {
            BadgeKind::Medium
        }
    }

    fn from_name(name: &str) -> Self {
        match name {
            "Low" => BadgeKind::Low,
            "Medium" => BadgeKind::Medium,
            _ => BadgeKind::Neutral,
        }
    }
}

impl From<String> for BadgeKind {
    fn from(name: String) -> Self {
        BadgeKind::from_name(&name)
    }
}

/// A fully positioned, backend-agnostic primitive. `y` grows downward from
/// the page top; text `y` is the baseline. Instructions are produced once
/// per run and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DrawInstruction {
    Text {
        page: usize,
        x: f64,
        y: f64,
        content: String,
        font: FontKey,
        size: f64,
        color: Color,
    },
    FilledRect {
        page: usize,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Color,
    },
    StrokedRect {
        page: usize,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: Color,
        width: f64,
    },
    Line {
        page: usize,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
        width: f64,
    },
}

impl DrawInstruction {
    /// Zero-based page this instruction lands on.
    pub fn page(&self) -> usize {
        match self {
            DrawInstruction::Text { page, .. }
            | DrawInstruction::FilledRect { page, .. }
            | DrawInstruction::StrokedRect { page, .. }
            | DrawInstruction::Line { page, .. } => *page,
        }
    }
}

/// The finished output of one FlowWriter run: the frozen structure handed to
/// a render target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub page_width: f64,
    pub page_height: f64,
    pub page_count: usize,
    pub instructions: Vec<DrawInstruction>,
}

/// An RGBA color, each channel 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Standard page sizes in points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom {
        width: f64,
        height: f64,
    },
}

impl PageSize {
    /// Returns (width, height) in points.
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::A3 => (841.89, 1190.55),
            PageSize::A5 => (419.53, 595.28),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Tabloid => (792.0, 1224.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

/// Edge values (top, right, bottom, left) used for page margins.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Edges {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Edges {
    pub fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Page size and margins for one render. Configurable per report; never
/// hard-coded in the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    #[serde(default)]
    pub size: PageSize,
    #[serde(default = "default_margin")]
    pub margin: Edges,
}

fn default_margin() -> Edges {
    Edges::uniform(54.0) // ~0.75 inch
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            size: PageSize::A4,
            margin: default_margin(),
        }
    }
}

impl PageGeometry {
    pub fn width(&self) -> f64 {
        self.size.dimensions().0
    }

    pub fn height(&self) -> f64 {
        self.size.dimensions().1
    }

    pub fn content_left(&self) -> f64 {
        self.margin.left
    }

    pub fn content_right(&self) -> f64 {
        self.width() - self.margin.right
    }

    pub fn content_width(&self) -> f64 {
        self.width() - self.margin.horizontal()
    }

    pub fn content_height(&self) -> f64 {
        self.height() - self.margin.vertical()
    }

    /// Rejects unusable geometry before any layout output is produced.
    pub fn validate(&self) -> Result<(), LaudoError> {
        let (width, height) = self.size.dimensions();
        if width <= 0.0 || height <= 0.0 {
            return Err(LaudoError::InvalidLayout(format!(
                "page dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        let m = &self.margin;
        if m.top < 0.0 || m.right < 0.0 || m.bottom < 0.0 || m.left < 0.0 {
            return Err(LaudoError::InvalidLayout(
                "page margins must not be negative".to_string(),
            ));
        }
        if self.content_width() <= 0.0 {
            return Err(LaudoError::InvalidLayout(
                "horizontal margins leave no content width".to_string(),
            ));
        }
        if self.content_height() <= 0.0 {
            return Err(LaudoError::InvalidLayout(
                "vertical margins leave no content height".to_string(),
            ));
        }
        Ok(())
    }
}

/// The fixed visual constants shared by every render target. Geometry varies
/// per report; the theme stays engine-side so targets cannot drift apart.
#[derive(Debug, Clone)]
pub struct Theme {
    pub font_family: String,
    pub title_size: f64,
    pub heading_size: f64,
    pub body_size: f64,
    pub note_size: f64,
    pub badge_size: f64,
    /// Line box height as a multiple of font size.
    pub line_height: f64,
    pub heading_gap: f64,
    pub rule_gap: f64,
    pub block_gap: f64,
    pub badge_pad_x: f64,
    pub badge_pad_y: f64,
    /// Horizontal gap between a row label and its chip.
    pub badge_gap: f64,
    /// Left indent for component note text.
    pub indent: f64,
    pub rule_width: f64,
    pub text_color: Color,
    pub muted_color: Color,
    pub rule_color: Color,
    pub badge_text_color: Color,
    pub badge_low: Color,
    pub badge_medium: Color,
    pub badge_neutral: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            font_family: "Helvetica".to_string(),
            title_size: 18.0,
            heading_size: 13.0,
            body_size: 10.5,
            note_size: 10.0,
            badge_size: 9.0,
            line_height: 1.4,
            heading_gap: 6.0,
            rule_gap: 10.0,
            block_gap: 8.0,
            badge_pad_x: 6.0,
            badge_pad_y: 3.0,
            badge_gap: 8.0,
            indent: 14.0,
            rule_width: 0.75,
            text_color: Color::BLACK,
            muted_color: Color::rgb(0.35, 0.35, 0.38),
            rule_color: Color::rgb(0.78, 0.78, 0.80),
            badge_text_color: Color::WHITE,
            badge_low: Color::rgb(0.18, 0.49, 0.20),
            badge_medium: Color::rgb(0.85, 0.56, 0.09),
            badge_neutral: Color::rgb(0.46, 0.46, 0.46),
        }
    }
}

impl Theme {
    /// Cap height of the Helvetica family in em units; chips use it to box
    /// their text around the shared row baseline.
    pub const CAP_HEIGHT: f64 = 0.72;
    /// Descender depth in em units; baselines sit this far above the bottom
    /// of their line box.
    pub const DESCENT: f64 = 0.20;

    /// Height of one line box at the given font size.
    pub fn line_box(&self, size: f64) -> f64 {
        size * self.line_height
    }

    /// Font size for a heading level: 1 is the document title, 2 a section
    /// heading, deeper levels fall back to body size.
    pub fn size_for_level(&self, level: u8) -> f64 {
        match level {
            0 | 1 => self.title_size,
            2 => self.heading_size,
            _ => self.body_size,
        }
    }

    pub fn badge_fill(&self, kind: BadgeKind) -> Color {
        match kind {
            BadgeKind::Low => self.badge_low,
            BadgeKind::Medium => self.badge_medium,
            BadgeKind::Neutral => self.badge_neutral,
        }
    }

    pub fn regular(&self) -> FontKey {
        FontKey::new(&self.font_family, 400, false)
    }

    pub fn bold(&self) -> FontKey {
        FontKey::new(&self.font_family, 700, false)
    }
}
