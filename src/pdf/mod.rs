//! # PDF Output Target
//!
//! Renders a frozen [`Layout`] into a complete PDF 1.7 file.
//!
//! The writer is a pure instruction interpreter: every positioning decision
//! was already made by the flow stage, so this module only translates
//! instructions into content-stream operators and assembles the object
//! table around them.
//!
//! ```text
//! %PDF-1.7            <- header
//! 1 0 obj ... endobj  <- 1 Catalog, 2 Pages, fonts, content/page pairs, Info
//! ...
//! xref                <- byte offsets of each object
//! trailer             <- points at the catalog and info dict
//! %%EOF
//! ```
//!
//! Content streams are Flate-compressed. Text is written with WinAnsi
//! encoding, which covers the Latin-1 range the standard fonts (and pt-BR
//! report text) need.

use std::collections::BTreeMap;

use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::font::{FontContext, FontData, FontKey, StandardFont};
use crate::layout::{DrawInstruction, Layout};
use crate::report::Metadata;

pub struct PdfWriter;

impl PdfWriter {
    /// Serializes `layout` into PDF bytes. Infallible: the layout was
    /// validated when it was produced, and unencodable characters degrade
    /// to '?' rather than failing the whole document.
    pub fn write(layout: &Layout, metadata: &Metadata, fonts: &FontContext) -> Vec<u8> {
        let faces = collect_faces(layout, fonts);
        let slots: BTreeMap<&'static str, usize> =
            faces.iter().enumerate().map(|(i, n)| (*n, i + 1)).collect();

        // Object number = index + 1. Catalog and Pages are finished last,
        // once every page object exists.
        let mut objects: Vec<Vec<u8>> = vec![Vec::new(), Vec::new()];

        for name in &faces {
            objects.push(
                format!(
                    "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                    name
                )
                .into_bytes(),
            );
        }
        let font_resources: String = faces
            .iter()
            .enumerate()
            .map(|(i, _)| format!("/F{} {} 0 R", i + 1, 3 + i))
            .collect::<Vec<_>>()
            .join(" ");

        let mut page_ids = Vec::with_capacity(layout.page_count);
        for page in 0..layout.page_count {
            let content = page_content(layout, page, &slots, fonts);
            let compressed = compress_to_vec_zlib(&content, 6);
            let mut stream = format!(
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            )
            .into_bytes();
            stream.extend_from_slice(&compressed);
            stream.extend_from_slice(b"\nendstream");
            objects.push(stream);
            let content_id = objects.len();

            objects.push(
                format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                     /Contents {} 0 R /Resources << /Font << {} >> >> >>",
                    layout.page_width, layout.page_height, content_id, font_resources
                )
                .into_bytes(),
            );
            page_ids.push(objects.len());
        }

        objects.push(info_dict(metadata));
        let info_id = objects.len();

        objects[0] = b"<< /Type /Catalog /Pages 2 0 R >>".to_vec();
        let kids: String = page_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        objects[1] = format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids, layout.page_count
        )
        .into_bytes();

        let bytes = serialize(&objects, info_id);
        log::debug!(
            "pdf: {} page(s), {} objects, {} bytes",
            layout.page_count,
            objects.len(),
            bytes.len()
        );
        bytes
    }
}

/// Base-font names in use, sorted for a stable object order. Custom faces
/// are substituted with the Helvetica cut closest to their key.
fn collect_faces(layout: &Layout, fonts: &FontContext) -> Vec<&'static str> {
    let mut faces: Vec<&'static str> = layout
        .instructions
        .iter()
        .filter_map(|instruction| match instruction {
            DrawInstruction::Text { font, .. } => Some(base_font_name(fonts, font)),
            _ => None,
        })
        .collect();
    faces.sort_unstable();
    faces.dedup();
    faces
}

fn base_font_name(fonts: &FontContext, key: &FontKey) -> &'static str {
    match fonts.resolve(&key.family, key.weight, key.italic) {
        FontData::Standard(font) => font.pdf_name(),
        FontData::Custom(_) => {
            let bold = key.weight >= 600;
            let substitute = match (bold, key.italic) {
                (true, true) => StandardFont::HelveticaBoldOblique,
                (true, false) => StandardFont::HelveticaBold,
                (false, true) => StandardFont::HelveticaOblique,
                (false, false) => StandardFont::Helvetica,
            };
            substitute.pdf_name()
        }
    }
}

/// Content-stream operators for one page. PDF's y axis grows upward, so
/// every layout y is flipped against the page height here and nowhere else.
fn page_content(
    layout: &Layout,
    page: usize,
    slots: &BTreeMap<&'static str, usize>,
    fonts: &FontContext,
) -> Vec<u8> {
    let height = layout.page_height;
    let mut ops = Vec::new();
    for instruction in layout.instructions.iter().filter(|i| i.page() == page) {
        match instruction {
            DrawInstruction::Text {
                x,
                y,
                content,
                font,
                size,
                color,
                ..
            } => {
                let name = base_font_name(fonts, font);
                let slot = slots.get(name).copied().unwrap_or(1);
                ops.extend_from_slice(
                    format!(
                        "{:.3} {:.3} {:.3} rg\nBT\n/F{} {:.2} Tf\n{:.2} {:.2} Td\n(",
                        color.r,
                        color.g,
                        color.b,
                        slot,
                        size,
                        x,
                        height - y
                    )
                    .as_bytes(),
                );
                encode_win_ansi(content, &mut ops);
                ops.extend_from_slice(b") Tj\nET\n");
            }
            DrawInstruction::FilledRect { x, y, w, h, color, .. } => {
                ops.extend_from_slice(
                    format!(
                        "{:.3} {:.3} {:.3} rg\n{:.2} {:.2} {:.2} {:.2} re\nf\n",
                        color.r,
                        color.g,
                        color.b,
                        x,
                        height - y - h,
                        w,
                        h
                    )
                    .as_bytes(),
                );
            }
            DrawInstruction::StrokedRect {
                x,
                y,
                w,
                h,
                color,
                width,
                ..
            } => {
                ops.extend_from_slice(
                    format!(
                        "{:.3} {:.3} {:.3} RG\n{:.2} w\n{:.2} {:.2} {:.2} {:.2} re\nS\n",
                        color.r,
                        color.g,
                        color.b,
                        width,
                        x,
                        height - y - h,
                        w,
                        h
                    )
                    .as_bytes(),
                );
            }
            DrawInstruction::Line {
                x1,
                y1,
                x2,
                y2,
                color,
                width,
                ..
            } => {
                ops.extend_from_slice(
                    format!(
                        "{:.3} {:.3} {:.3} RG\n{:.2} w\n{:.2} {:.2} m\n{:.2} {:.2} l\nS\n",
                        color.r,
                        color.g,
                        color.b,
                        width,
                        x1,
                        height - y1,
                        x2,
                        height - y2
                    )
                    .as_bytes(),
                );
            }
        }
    }
    ops
}

fn info_dict(metadata: &Metadata) -> Vec<u8> {
    let mut info: Vec<u8> = b"<<".to_vec();
    let mut push_entry = |key: &str, value: &str| {
        info.extend_from_slice(format!(" /{} ", key).as_bytes());
        info.push(b'(');
        encode_win_ansi(value, &mut info);
        info.push(b')');
    };
    if let Some(title) = &metadata.title {
        push_entry("Title", title);
    }
    if let Some(author) = &metadata.author {
        push_entry("Author", author);
    }
    if let Some(subject) = &metadata.subject {
        push_entry("Subject", subject);
    }
    let creator = metadata.creator.as_deref().unwrap_or("laudo");
    push_entry("Creator", creator);
    push_entry("Producer", concat!("laudo ", env!("CARGO_PKG_VERSION")));
    info.extend_from_slice(b" >>");
    info
}

fn serialize(objects: &[Vec<u8>], info_id: usize) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n");

    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
        out.extend_from_slice(body);
        out.extend_from_slice(b"\nendobj\n");
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            info_id,
            xref_offset
        )
        .as_bytes(),
    );
    out
}

/// Encodes text as escaped WinAnsi bytes inside a literal string. Characters
/// outside the encoding degrade to '?'.
fn encode_win_ansi(text: &str, out: &mut Vec<u8>) {
    for ch in text.chars() {
        let byte = win_ansi_byte(ch);
        if matches!(byte, b'(' | b')' | b'\\') {
            out.push(b'\\');
        }
        out.push(byte);
    }
}

/// WinAnsi (CP1252) code for a character: ASCII and Latin-1 map straight
/// through, the 0x80–0x9F window holds the usual typographic extras.
fn win_ansi_byte(ch: char) -> u8 {
    let code = ch as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => code as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95,
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => b'?',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Color;

    fn bytes_contain(haystack: &[u8], needle: &str) -> bool {
        haystack
            .windows(needle.len())
            .any(|window| window == needle.as_bytes())
    }

    fn empty_layout(pages: usize) -> Layout {
        Layout {
            page_width: 595.28,
            page_height: 841.89,
            page_count: pages,
            instructions: Vec::new(),
        }
    }

    fn text_instruction(content: &str, weight: u32) -> DrawInstruction {
        DrawInstruction::Text {
            page: 0,
            x: 54.0,
            y: 75.6,
            content: content.to_string(),
            font: FontKey::new("Helvetica", weight, false),
            size: 10.5,
            color: Color::BLACK,
        }
    }

    #[test]
    fn test_win_ansi_maps_latin1_and_typographic_extras() {
        assert_eq!(win_ansi_byte('A'), 0x41);
        assert_eq!(win_ansi_byte('é'), 0xE9);
        assert_eq!(win_ansi_byte('ç'), 0xE7);
        assert_eq!(win_ansi_byte('—'), 0x97);
        assert_eq!(win_ansi_byte('–'), 0x96);
        assert_eq!(win_ansi_byte('€'), 0x80);
        assert_eq!(win_ansi_byte('•'), 0x95);
        // Outside the encoding entirely.
        assert_eq!(win_ansi_byte('→'), b'?');
        assert_eq!(win_ansi_byte('✓'), b'?');
    }

    #[test]
    fn test_encode_escapes_string_delimiters() {
        let mut out = Vec::new();
        encode_win_ansi(r"a(b)c\", &mut out);
        assert_eq!(out, b"a\\(b\\)c\\\\");
    }

    #[test]
    fn test_empty_layout_produces_wellformed_pdf() {
        let fonts = FontContext::new();
        let bytes = PdfWriter::write(&empty_layout(1), &Metadata::default(), &fonts);
        assert!(bytes.starts_with(b"%PDF-1.7"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        assert!(bytes_contain(&bytes, "/Type /Catalog"));
        assert!(bytes_contain(&bytes, "/Count 1"));
        assert!(bytes_contain(&bytes, "xref"));
        assert!(bytes_contain(&bytes, "startxref"));
    }

    #[test]
    fn test_page_objects_match_page_count() {
        let fonts = FontContext::new();
        let bytes = PdfWriter::write(&empty_layout(3), &Metadata::default(), &fonts);
        assert!(bytes_contain(&bytes, "/Count 3"));
        let pages = bytes
            .windows(b"/Type /Page ".len())
            .filter(|w| *w == b"/Type /Page ")
            .count();
        assert_eq!(pages, 3);
    }

    #[test]
    fn test_registers_one_font_object_per_face_in_use() {
        let fonts = FontContext::new();
        let layout = Layout {
            instructions: vec![
                text_instruction("Placa: ", 700),
                text_instruction("BRA2E19", 400),
            ],
            ..empty_layout(1)
        };
        let bytes = PdfWriter::write(&layout, &Metadata::default(), &fonts);
        assert!(bytes_contain(&bytes, "/BaseFont /Helvetica "));
        assert!(bytes_contain(&bytes, "/BaseFont /Helvetica-Bold "));
        assert!(bytes_contain(&bytes, "/Encoding /WinAnsiEncoding"));
        assert!(!bytes_contain(&bytes, "/BaseFont /Times"));
    }

    #[test]
    fn test_unregistered_family_substitutes_helvetica() {
        let fonts = FontContext::new();
        let name = base_font_name(&fonts, &FontKey::new("Inter", 650, false));
        assert_eq!(name, "Helvetica-Bold");
    }

    #[test]
    fn test_metadata_lands_in_info_dict() {
        let fonts = FontContext::new();
        let metadata = Metadata {
            title: Some("Laudo Cautelar".to_string()),
            author: Some("Vistoria XYZ".to_string()),
            subject: None,
            creator: None,
        };
        let bytes = PdfWriter::write(&empty_layout(1), &metadata, &fonts);
        assert!(bytes_contain(&bytes, "/Title (Laudo Cautelar)"));
        assert!(bytes_contain(&bytes, "/Author (Vistoria XYZ)"));
        assert!(bytes_contain(&bytes, "/Producer (laudo "));
        assert!(!bytes_contain(&bytes, "/Subject"));
    }

    #[test]
    fn test_content_streams_are_flate_compressed() {
        let fonts = FontContext::new();
        let layout = Layout {
            instructions: (0..6)
                .map(|_| text_instruction("conteúdo do laudo técnico", 400))
                .collect(),
            ..empty_layout(1)
        };
        let bytes = PdfWriter::write(&layout, &Metadata::default(), &fonts);
        assert!(bytes_contain(&bytes, "/Filter /FlateDecode"));
        // The raw text must not appear uncompressed anywhere in the file.
        assert!(!bytes_contain(&bytes, "do laudo"));
    }
}
