//! Single-pass flow layout: commands in, positioned instructions out.
//!
//! The writer walks the command list once, top to bottom. A [`PageCursor`]
//! owns the vertical position and page breaks; every drawing decision is
//! made against measured text widths, never against character counts.

use crate::error::LaudoError;
use crate::font::{FontContext, FontKey};
use crate::layout::cursor::PageCursor;
use crate::layout::{
    BadgeKind, Color, DrawInstruction, Layout, LayoutCommand, PageGeometry, Theme,
};
use crate::text::TextMeasurer;

/// Lays out a command stream into absolute draw instructions.
///
/// A writer is cheap to build and does not retain any state between runs:
/// running the same commands twice produces identical layouts.
pub struct FlowWriter<'a> {
    fonts: &'a FontContext,
    geometry: PageGeometry,
    theme: Theme,
}

impl<'a> FlowWriter<'a> {
    pub fn new(fonts: &'a FontContext, geometry: PageGeometry) -> Result<Self, LaudoError> {
        geometry.validate()?;
        Ok(Self {
            fonts,
            geometry,
            theme: Theme::default(),
        })
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Runs the full pipeline over `commands` and freezes the result.
    pub fn run(&self, commands: &[LayoutCommand]) -> Result<Layout, LaudoError> {
        let mut flow = Flow {
            measurer: TextMeasurer::new(self.fonts),
            theme: &self.theme,
            geometry: &self.geometry,
            cursor: PageCursor::from_geometry(&self.geometry)?,
            regular: self.theme.regular(),
            bold: self.theme.bold(),
            out: Vec::new(),
        };
        for command in commands {
            flow.handle(command)?;
        }
        let page_count = flow.cursor.page_index() + 1;
        log::debug!(
            "flow complete: {} commands -> {} instructions on {} page(s)",
            commands.len(),
            flow.out.len(),
            page_count
        );
        Ok(Layout {
            page_width: self.geometry.width(),
            page_height: self.geometry.height(),
            page_count,
            instructions: flow.out,
        })
    }
}

/// Mutable state for one run.
struct Flow<'a> {
    measurer: TextMeasurer<'a>,
    theme: &'a Theme,
    geometry: &'a PageGeometry,
    cursor: PageCursor,
    regular: FontKey,
    bold: FontKey,
    out: Vec<DrawInstruction>,
}

impl<'a> Flow<'a> {
    fn handle(&mut self, command: &LayoutCommand) -> Result<(), LaudoError> {
        match command {
            LayoutCommand::Heading { text, level } => self.heading(text, *level),
            LayoutCommand::Paragraph { text } => self.paragraph(text)?,
            LayoutCommand::KeyValue { label, value } => self.key_value(label, value),
            LayoutCommand::Rule => self.rule(),
            LayoutCommand::Badge { text, color_kind } => self.badge(text, *color_kind),
            LayoutCommand::ComponentBlock { name, status, note } => {
                self.component_block(name, status, note.as_deref())?
            }
            LayoutCommand::PageBreakHint => self.cursor.force_new_page(),
        }
        Ok(())
    }

    /// Advances one line box, retrying once after a page break so the line
    /// lands at the top of the fresh page.
    fn advance_line(&mut self, height: f64) {
        if self.cursor.advance(height) {
            self.cursor.advance(height);
        }
    }

    /// Baseline of the line box the cursor just advanced past.
    fn baseline(&self, size: f64) -> f64 {
        self.cursor.y() - Theme::DESCENT * size
    }

    fn push_text(&mut self, x: f64, baseline: f64, content: String, font: FontKey, size: f64, color: Color) {
        self.out.push(DrawInstruction::Text {
            page: self.cursor.page_index(),
            x,
            y: baseline,
            content,
            font,
            size,
            color,
        });
    }

    /// A heading keeps with the first body line that follows it: if the
    /// heading, its gap, and one body line no longer fit, the whole group
    /// moves to the next page. A heading already at the top of a page stays
    /// put even when oversized, so a too-small page cannot loop forever.
    fn heading(&mut self, text: &str, level: u8) {
        let size = self.theme.size_for_level(level);
        let line = self.theme.line_box(size);
        let needed = line + self.theme.heading_gap + self.theme.line_box(self.theme.body_size);
        if !self.cursor.ensure_space(needed) && !self.cursor.at_page_top() {
            self.cursor.force_new_page();
        }
        self.advance_line(line);
        let baseline = self.baseline(size);
        self.push_text(
            self.geometry.content_left(),
            baseline,
            text.to_string(),
            self.bold.clone(),
            size,
            self.theme.text_color,
        );
        self.cursor.advance(self.theme.heading_gap);
    }

    /// Body text wrapped to the content width. Lines flow one at a time and
    /// may span any number of pages; empty text produces nothing at all.
    fn paragraph(&mut self, text: &str) -> Result<(), LaudoError> {
        let size = self.theme.body_size;
        let lines = self
            .measurer
            .wrap(text, &self.regular, size, self.geometry.content_width())?;
        let line = self.theme.line_box(size);
        for text_line in lines {
            self.advance_line(line);
            let baseline = self.baseline(size);
            self.push_text(
                self.geometry.content_left(),
                baseline,
                text_line,
                self.regular.clone(),
                size,
                self.theme.text_color,
            );
        }
        Ok(())
    }

    /// One line, bold "Label: " prefix followed by the value in regular
    /// weight. Key/value rows never wrap; an oversized value overflows to
    /// the right rather than disturbing the vertical rhythm.
    fn key_value(&mut self, label: &str, value: &str) {
        let size = self.theme.body_size;
        self.advance_line(self.theme.line_box(size));
        let baseline = self.baseline(size);
        let left = self.geometry.content_left();
        let prefix = format!("{}: ", label);
        let prefix_width = self.measurer.measure(&prefix, &self.bold, size);
        self.push_text(left, baseline, prefix, self.bold.clone(), size, self.theme.text_color);
        self.push_text(
            left + prefix_width,
            baseline,
            value.to_string(),
            self.regular.clone(),
            size,
            self.theme.text_color,
        );
    }

    fn rule(&mut self) {
        let y = self.cursor.y();
        self.out.push(DrawInstruction::Line {
            page: self.cursor.page_index(),
            x1: self.geometry.content_left(),
            y1: y,
            x2: self.geometry.content_right(),
            y2: y,
            color: self.theme.rule_color,
            width: self.theme.rule_width,
        });
        self.cursor.advance(self.theme.rule_gap);
    }

    /// A bare badge draws at the cursor without advancing it: callers that
    /// want a chip inside a row advance once for the whole row instead.
    fn badge(&mut self, text: &str, kind: BadgeKind) {
        let baseline =
            self.cursor.y() + self.theme.badge_pad_y + Theme::CAP_HEIGHT * self.theme.badge_size;
        self.draw_chip(self.geometry.content_left(), baseline, text, kind);
    }

    /// One assessed component: a row with the bold name and its status chip
    /// on a shared baseline, then the note wrapped under an indent.
    fn component_block(
        &mut self,
        name: &str,
        status: &str,
        note: Option<&str>,
    ) -> Result<(), LaudoError> {
        let body = self.theme.body_size;
        self.advance_line(self.theme.line_box(body));
        let baseline = self.baseline(body);
        let left = self.geometry.content_left();
        let name_width = self.measurer.measure(name, &self.bold, body);
        self.push_text(
            left,
            baseline,
            name.to_string(),
            self.bold.clone(),
            body,
            self.theme.text_color,
        );
        self.draw_chip(
            left + name_width + self.theme.badge_gap,
            baseline,
            status,
            BadgeKind::for_status(status),
        );

        if let Some(note) = note {
            let size = self.theme.note_size;
            let lines = self.measurer.wrap(
                note,
                &self.regular,
                size,
                self.geometry.content_width() - self.theme.indent,
            )?;
            let line = self.theme.line_box(size);
            for text_line in lines {
                self.advance_line(line);
                let note_baseline = self.baseline(size);
                self.push_text(
                    left + self.theme.indent,
                    note_baseline,
                    text_line,
                    self.regular.clone(),
                    size,
                    self.theme.muted_color,
                );
            }
        }
        self.cursor.advance(self.theme.block_gap);
        Ok(())
    }

    /// Draws a status chip whose text sits on `baseline`. The fill is boxed
    /// around the cap height and descender of the chip text rather than the
    /// full line box, so it hugs the glyphs.
    fn draw_chip(&mut self, x: f64, baseline: f64, text: &str, kind: BadgeKind) {
        let size = self.theme.badge_size;
        let text_width = self.measurer.measure(text, &self.bold, size);
        let w = text_width + 2.0 * self.theme.badge_pad_x;
        let top = baseline - Theme::CAP_HEIGHT * size - self.theme.badge_pad_y;
        let h = (Theme::CAP_HEIGHT + Theme::DESCENT) * size + 2.0 * self.theme.badge_pad_y;
        self.out.push(DrawInstruction::FilledRect {
            page: self.cursor.page_index(),
            x,
            y: top,
            w,
            h,
            color: self.theme.badge_fill(kind),
        });
        self.push_text(
            x + self.theme.badge_pad_x,
            baseline,
            text.to_string(),
            self.bold.clone(),
            size,
            self.theme.badge_text_color,
        );
    }
}
