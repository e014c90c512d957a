//! # laudo
//!
//! Layout engine for vehicle condition reports ("laudo cautelar").
//!
//! A structured report goes in; absolutely positioned draw instructions and
//! a finished PDF come out:
//!
//! ```text
//! Report ──build_commands──▶ [LayoutCommand]          (what, in order)
//!        ──FlowWriter──────▶ Layout { instructions }  (where, per page)
//!        ──PdfWriter───────▶ Vec<u8>                  (PDF 1.7 bytes)
//! ```
//!
//! The middle artifact is the point of the design: [`Layout`] serializes, so
//! a target that cannot run the engine (a browser canvas, a print service)
//! can replay a frozen instruction stream and reproduce the document
//! pixel-for-pixel. Pagination, wrapping, and keep-with-next decisions all
//! happen in the flow stage against real font metrics; backends never
//! measure anything.

pub mod error;
pub mod font;
pub mod layout;
pub mod pdf;
pub mod report;
pub mod text;

pub use error::LaudoError;
pub use font::FontContext;
pub use layout::{DrawInstruction, FlowWriter, Layout, LayoutCommand, PageGeometry};
pub use pdf::PdfWriter;
pub use report::{build_commands, Report};

/// Lays out a parsed report into positioned draw instructions.
pub fn layout_report(report: &Report) -> Result<Layout, LaudoError> {
    let fonts = FontContext::new();
    let writer = FlowWriter::new(&fonts, report.page.clone())?;
    writer.run(&build_commands(report))
}

/// Renders a parsed report straight to PDF bytes.
pub fn render(report: &Report) -> Result<Vec<u8>, LaudoError> {
    let fonts = FontContext::new();
    let writer = FlowWriter::new(&fonts, report.page.clone())?;
    let layout = writer.run(&build_commands(report))?;
    Ok(PdfWriter::write(&layout, &report.metadata, &fonts))
}

/// Parses report JSON and renders it to PDF bytes.
pub fn render_json(json: &str) -> Result<Vec<u8>, LaudoError> {
    let report: Report = serde_json::from_str(json)?;
    render(&report)
}
