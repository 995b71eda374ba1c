//! PDF canvas built on lopdf.

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::canvas::Canvas;
use crate::error::{VercalError, VercalResult};
use crate::font::{encode_winansi, Font};

/// Control-point offset for approximating a quarter circle with a Bezier.
const CIRCLE_K: f64 = 0.5523;

fn real(value: f64) -> Object {
    Object::Real(value as f32)
}

/// A paginated PDF drawing surface. Pages accumulate operations until
/// `show_page`; `save` assembles the document and writes it atomically.
pub struct PdfCanvas {
    doc: Document,
    pages_id: ObjectId,
    font_id: ObjectId,
    finished_pages: Vec<Vec<Operation>>,
    operations: Vec<Operation>,
    page_width: f64,
    page_height: f64,
    font_size: f64,
}

impl PdfCanvas {
    /// Create a canvas for `page_width` x `page_height` point pages using
    /// `font` for all text.
    pub fn new(page_width: f64, page_height: f64, font: &Font) -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_dict = font.to_dictionary(&mut doc);
        let font_id = doc.add_object(font_dict);
        PdfCanvas {
            doc,
            pages_id,
            font_id,
            finished_pages: Vec::new(),
            operations: Vec::new(),
            page_width,
            page_height,
            font_size: 12.0,
        }
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.operations.push(Operation::new(operator, operands));
    }

    /// Assemble the document and write it to `path`. The bytes go to a
    /// sibling temporary file that is persisted over `path` only once the
    /// whole document has been written, so a failure never leaves a
    /// truncated file at the destination.
    pub fn save(mut self, path: &Path) -> VercalResult<()> {
        if !self.operations.is_empty() {
            let trailing = std::mem::take(&mut self.operations);
            self.finished_pages.push(trailing);
        }

        let mut kids: Vec<Object> = Vec::with_capacity(self.finished_pages.len());
        let pages = std::mem::take(&mut self.finished_pages);
        for operations in pages {
            let encoded = Content { operations }
                .encode()
                .map_err(|e| VercalError::Pdf(e.to_string()))?;
            let content_id = self
                .doc
                .add_object(Stream::new(Dictionary::new(), encoded));
            let page_id = self.doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => self.pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), real(self.page_width), real(self.page_height)],
            "Resources" => dictionary! {
                "Font" => dictionary! { "F1" => self.font_id },
            },
        };
        self.doc
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));
        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc.compress();

        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut temp = tempfile::NamedTempFile::new_in(dir)?;
        self.doc
            .save_to(temp.as_file_mut())
            .map_err(|e| VercalError::Pdf(e.to_string()))?;
        temp.persist(path).map_err(|e| VercalError::Io(e.error))?;
        Ok(())
    }
}

impl Canvas for PdfCanvas {
    fn set_font(&mut self, size: f64) {
        self.font_size = size;
    }

    fn set_dash(&mut self, on: i64, off: i64) {
        let pattern = if off == 0 {
            Vec::new()
        } else {
            vec![on.into(), off.into()]
        };
        self.push("d", vec![Object::Array(pattern), 0.into()]);
    }

    fn set_line_width(&mut self, width: f64) {
        self.push("w", vec![real(width)]);
    }

    fn set_stroke_color(&mut self, r: f64, g: f64, b: f64) {
        self.push("RG", vec![real(r), real(g), real(b)]);
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.push("m", vec![real(x1), real(y1)]);
        self.push("l", vec![real(x2), real(y2)]);
        self.push("S", vec![]);
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.push("re", vec![real(x), real(y), real(width), real(height)]);
        self.push("S", vec![]);
    }

    fn circle(&mut self, cx: f64, cy: f64, radius: f64) {
        let k = CIRCLE_K * radius;
        let r = radius;
        self.push("m", vec![real(cx - r), real(cy)]);
        self.push(
            "c",
            vec![real(cx - r), real(cy + k), real(cx - k), real(cy + r), real(cx), real(cy + r)],
        );
        self.push(
            "c",
            vec![real(cx + k), real(cy + r), real(cx + r), real(cy + k), real(cx + r), real(cy)],
        );
        self.push(
            "c",
            vec![real(cx + r), real(cy - k), real(cx + k), real(cy - r), real(cx), real(cy - r)],
        );
        self.push(
            "c",
            vec![real(cx - k), real(cy - r), real(cx - r), real(cy - k), real(cx - r), real(cy)],
        );
        self.push("S", vec![]);
    }

    fn text(&mut self, x: f64, y: f64, text: &str) {
        self.push("BT", vec![]);
        self.push("Tf", vec!["F1".into(), real(self.font_size)]);
        self.push("Td", vec![real(x), real(y)]);
        self.push(
            "Tj",
            vec![Object::String(encode_winansi(text), StringFormat::Literal)],
        );
        self.push("ET", vec![]);
    }

    fn show_page(&mut self) {
        let operations = std::mem::take(&mut self.operations);
        self.finished_pages.push(operations);
    }
}
