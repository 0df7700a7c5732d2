//! PDF encoder: turns a laid-out `Surface` into PDF 1.5 bytes with lopdf.
//!
//! Pages are A4. Text uses the three standard Helvetica faces with
//! WinAnsiEncoding, so no font program is embedded. Each rasterized photo is
//! written once as a DCT image XObject with a Flate-compressed soft mask.

use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

use crate::layout::cursor::PAGE_HEIGHT;
use crate::layout::font_metrics::{FontFace, PT_PER_MM};
use crate::render::assembler::RenderError;
use crate::render::surface::{DrawCommand, Page, Surface};
use crate::render::theme::Rgb;

/// A4 in PDF points.
const MEDIA_BOX: [f32; 4] = [0.0, 0.0, 595.28, 841.89];
const PRODUCER: &str = "resume-api";

/// Document-level metadata written to the Info dictionary.
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
}

/// Encodes every page of `surface` into a single PDF file.
pub fn encode(surface: &Surface, info: &DocumentInfo) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for face in FontFace::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(face.resource_name(), font_id);
    }

    let mut xobjects = Dictionary::new();
    for (index, photo) in surface.images().iter().enumerate() {
        let mask = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => photo.width as i64,
                "Height" => photo.height as i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8_i64,
            },
            photo.alpha.clone(),
        );
        let mask_id = doc.add_object(mask);

        // The JPEG is already compressed; DCTDecode is its only filter.
        let image = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => photo.width as i64,
                "Height" => photo.height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8_i64,
                "Filter" => "DCTDecode",
                "SMask" => mask_id,
            },
            photo.jpeg.clone(),
        )
        .with_compression(false);
        let image_id = doc.add_object(image);
        xobjects.set(image_name(index), image_id);
    }

    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
        "XObject" => xobjects,
    });

    let mut kids: Vec<Object> = Vec::with_capacity(surface.page_count());
    for page in surface.pages() {
        let content = Content {
            operations: page_operations(page),
        };
        let encoded = content.encode().map_err(pdf_error)?;
        let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => surface.page_count() as i64,
        "MediaBox" => MEDIA_BOX.iter().map(|&v| v.into()).collect::<Vec<Object>>(),
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let created = Utc::now().format("D:%Y%m%d%H%M%SZ").to_string();
    let info_id = doc.add_object(dictionary! {
        "Title" => text_string(&info.title),
        "Author" => text_string(&info.author),
        "Producer" => text_string(PRODUCER),
        "CreationDate" => text_string(&created),
    });
    doc.trailer.set("Info", info_id);

    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).map_err(pdf_error)?;
    Ok(buffer)
}

// ────────────────────────────────────────────────────────────────────────────
// Content streams
// ────────────────────────────────────────────────────────────────────────────

fn page_operations(page: &Page) -> Vec<Operation> {
    let mut ops = Vec::new();
    for command in &page.commands {
        match command {
            DrawCommand::FillRect { rect, color } => {
                ops.push(color_op("rg", *color));
                ops.push(Operation::new(
                    "re",
                    vec![
                        pt(rect.x).into(),
                        flip(rect.bottom()).into(),
                        pt(rect.width).into(),
                        pt(rect.height).into(),
                    ],
                ));
                ops.push(Operation::new("f", vec![]));
            }
            DrawCommand::Line {
                from,
                to,
                color,
                width,
            } => {
                ops.push(color_op("RG", *color));
                ops.push(Operation::new("w", vec![pt(*width).into()]));
                ops.push(Operation::new("m", vec![pt(from.0).into(), flip(from.1).into()]));
                ops.push(Operation::new("l", vec![pt(to.0).into(), flip(to.1).into()]));
                ops.push(Operation::new("S", vec![]));
            }
            DrawCommand::Text {
                x,
                y,
                text,
                face,
                size_pt,
                color,
            } => {
                ops.push(Operation::new("BT", vec![]));
                ops.push(color_op("rg", *color));
                ops.push(Operation::new(
                    "Tf",
                    vec![name(face.resource_name()), (*size_pt).into()],
                ));
                ops.push(Operation::new("Td", vec![pt(*x).into(), flip(*y).into()]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            DrawCommand::Image { rect, image } => {
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new(
                    "cm",
                    vec![
                        pt(rect.width).into(),
                        0_i64.into(),
                        0_i64.into(),
                        pt(rect.height).into(),
                        pt(rect.x).into(),
                        flip(rect.bottom()).into(),
                    ],
                ));
                ops.push(Operation::new("Do", vec![name(&image_name(*image))]));
                ops.push(Operation::new("Q", vec![]));
            }
        }
    }
    ops
}

fn color_op(operator: &str, color: Rgb) -> Operation {
    let [r, g, b] = color.unit();
    Operation::new(operator, vec![r.into(), g.into(), b.into()])
}

fn pt(mm: f32) -> f32 {
    mm * PT_PER_MM
}

/// Top-left millimetres to bottom-left points.
fn flip(y_mm: f32) -> f32 {
    pt(PAGE_HEIGHT - y_mm)
}

fn name(value: &str) -> Object {
    Object::Name(value.as_bytes().to_vec())
}

fn image_name(index: usize) -> String {
    format!("Im{index}")
}

fn text_string(value: &str) -> Object {
    Object::String(to_win_ansi(value), StringFormat::Literal)
}

fn pdf_error(e: impl std::fmt::Display) -> RenderError {
    RenderError::Pdf(e.to_string())
}

/// Maps text to WinAnsiEncoding bytes. Characters outside the code page
/// become `?`.
pub fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' | '\u{a0}'..='\u{ff}' => c as u8,
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8A,
            '‹' => 0x8B,
            'Œ' => 0x8C,
            'Ž' => 0x8E,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9A,
            '›' => 0x9B,
            'œ' => 0x9C,
            'ž' => 0x9E,
            'Ÿ' => 0x9F,
            _ => b'?',
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
