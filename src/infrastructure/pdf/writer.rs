//! Single-page PDF canvas on top of `lopdf`.
//!
//! Only what a text document needs: the two standard Helvetica faces with
//! WinAnsi encoding, text runs and stroked lines. No `/Info` dictionary is
//! written, so equal drawing calls give equal bytes.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};

use crate::domain::document::{Canvas, FontFace, PageGeometry, TextStyle};

const PDF_VERSION: &str = "1.4";
const RULE_WIDTH: f32 = 0.5;

/// Canvas that records drawing operators for one page.
pub struct PdfCanvas {
  page: PageGeometry,
  operations: Vec<Operation>,
}

impl PdfCanvas {
  pub fn new(page: PageGeometry) -> Self {
    Self {
      page,
      operations: Vec::new(),
    }
  }

  /// Builds the document around the recorded operators and serializes it.
  pub fn finish(self) -> lopdf::Result<Vec<u8>> {
    let mut doc = Document::with_version(PDF_VERSION);
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(font_dictionary(FontFace::Helvetica));
    let bold_id = doc.add_object(font_dictionary(FontFace::HelveticaBold));

    let content = Content {
      operations: self.operations,
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = doc.add_object(dictionary! {
      "Type" => "Page",
      "Parent" => pages_id,
      "MediaBox" => vec![0.into(), 0.into(), coord(self.page.width), coord(self.page.height)],
      "Resources" => dictionary! {
        "Font" => dictionary! {
          resource_name(FontFace::Helvetica) => regular_id,
          resource_name(FontFace::HelveticaBold) => bold_id,
        },
      },
      "Contents" => content_id,
    });

    doc.objects.insert(
      pages_id,
      Object::Dictionary(dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
      }),
    );

    let catalog_id = doc.add_object(dictionary! {
      "Type" => "Catalog",
      "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
  }
}

impl Canvas for PdfCanvas {
  fn draw_text(&mut self, x: f32, y: f32, style: TextStyle, text: &str) {
    let encoded: Vec<u8> = text.chars().map(win_ansi).collect();
    self.operations.extend([
      Operation::new("BT", vec![]),
      Operation::new(
        "Tf",
        vec![resource_name(style.face).into(), coord(style.size)],
      ),
      Operation::new("Td", vec![coord(x), coord(y)]),
      Operation::new("Tj", vec![Object::String(encoded, StringFormat::Literal)]),
      Operation::new("ET", vec![]),
    ]);
  }

  fn draw_line(&mut self, from: (f32, f32), to: (f32, f32)) {
    self.operations.extend([
      Operation::new("w", vec![coord(RULE_WIDTH)]),
      Operation::new("m", vec![coord(from.0), coord(from.1)]),
      Operation::new("l", vec![coord(to.0), coord(to.1)]),
      Operation::new("S", vec![]),
    ]);
  }
}

fn resource_name(face: FontFace) -> &'static str {
  match face {
    FontFace::Helvetica => "F1",
    FontFace::HelveticaBold => "F2",
  }
}

fn font_dictionary(face: FontFace) -> lopdf::Dictionary {
  dictionary! {
    "Type" => "Font",
    "Subtype" => "Type1",
    "BaseFont" => face.postscript_name(),
    "Encoding" => "WinAnsiEncoding",
  }
}

/// Page coordinate kept to two decimals.
fn coord(value: f32) -> Object {
  let rounded = (value * 100.0).round() / 100.0;
  if rounded == 0.0 {
    return 0.0_f32.into();
  }
  rounded.into()
}

/// WinAnsi code for `ch`, or `?` when the encoding has none.
fn win_ansi(ch: char) -> u8 {
  match ch {
    ' '..='~' => ch as u8,
    '\u{A0}'..='\u{FF}' => ch as u32 as u8,
    '€' => 0x80,
    '…' => 0x85,
    '‘' => 0x91,
    '’' => 0x92,
    '“' => 0x93,
    '”' => 0x94,
    '•' => 0x95,
    '–' => 0x96,
    '—' => 0x97,
    _ => b'?',
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample() -> Vec<u8> {
    let mut canvas = PdfCanvas::new(PageGeometry::letter());
    canvas.draw_text(72.0, 700.0, TextStyle::bold(10.0), "CUENTA DE COBRO No.1");
    canvas.draw_text(72.0, 688.5, TextStyle::regular(9.0), "Crédito (30 días)");
    canvas.draw_line((72.0, 100.0), (540.0, 100.0));
    canvas.finish().unwrap()
  }

  fn page_operations(doc: &Document) -> Vec<Operation> {
    let (_, page_id) = doc.get_pages().into_iter().next().unwrap();
    let data = doc.get_page_content(page_id).unwrap();
    Content::decode(&data).unwrap().operations
  }

  #[test]
  fn test_win_ansi_encoding() {
    assert_eq!(win_ansi('a'), b'a');
    assert_eq!(win_ansi('í'), 0xED);
    assert_eq!(win_ansi('É'), 0xC9);
    assert_eq!(win_ansi('€'), 0x80);
    assert_eq!(win_ansi('漢'), b'?');
  }

  #[test]
  fn test_coordinates_keep_two_decimals() {
    assert_eq!(coord(20.571).as_float().unwrap(), 20.57);
    assert_eq!(coord(688.5).as_float().unwrap(), 688.5);
    assert_eq!(coord(-0.001).as_float().unwrap(), 0.0);
  }

  #[test]
  fn test_document_parses_back() {
    let pdf = sample();
    assert!(pdf.starts_with(b"%PDF-1.4"));

    let doc = Document::load_mem(&pdf).unwrap();
    assert_eq!(doc.version, "1.4");
    assert_eq!(doc.get_pages().len(), 1);

    let mut fonts: Vec<Vec<u8>> = doc
      .objects
      .values()
      .filter_map(|object| object.as_dict().ok())
      .filter_map(|dict| dict.get(b"BaseFont").ok())
      .filter_map(|name| name.as_name().ok())
      .map(|name| name.to_vec())
      .collect();
    fonts.sort();
    assert_eq!(fonts, vec![b"Helvetica".to_vec(), b"Helvetica-Bold".to_vec()]);
  }

  #[test]
  fn test_text_runs_use_face_and_win_ansi_bytes() {
    let doc = Document::load_mem(&sample()).unwrap();
    let operations = page_operations(&doc);
    let operators: Vec<&str> = operations.iter().map(|op| op.operator.as_str()).collect();
    assert_eq!(
      operators,
      vec![
        "BT", "Tf", "Td", "Tj", "ET", "BT", "Tf", "Td", "Tj", "ET", "w", "m", "l", "S"
      ]
    );

    assert_eq!(operations[1].operands[0].as_name().unwrap(), b"F2");
    assert_eq!(operations[6].operands[0].as_name().unwrap(), b"F1");
    assert_eq!(
      operations[3].operands[0].as_str().unwrap(),
      b"CUENTA DE COBRO No.1"
    );
    assert_eq!(
      operations[8].operands[0].as_str().unwrap(),
      b"Cr\xE9dito (30 d\xEDas)"
    );
  }

  #[test]
  fn test_output_is_deterministic() {
    assert_eq!(sample(), sample());
  }
}
