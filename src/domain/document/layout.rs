use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::metrics;

/// Built-in faces available on every page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFace {
  Helvetica,
  HelveticaBold,
}

impl FontFace {
  pub fn postscript_name(&self) -> &'static str {
    match self {
      FontFace::Helvetica => "Helvetica",
      FontFace::HelveticaBold => "Helvetica-Bold",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
  pub face: FontFace,
  pub size: f32,
}

impl TextStyle {
  pub const fn regular(size: f32) -> Self {
    Self {
      face: FontFace::Helvetica,
      size,
    }
  }

  pub const fn bold(size: f32) -> Self {
    Self {
      face: FontFace::HelveticaBold,
      size,
    }
  }
}

/// Page size and horizontal margins, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
  pub width: f32,
  pub height: f32,
  pub left_margin: f32,
  pub right_margin: f32,
}

impl PageGeometry {
  /// US Letter with one-inch side margins.
  pub const fn letter() -> Self {
    Self {
      width: 612.0,
      height: 792.0,
      left_margin: 72.0,
      right_margin: 72.0,
    }
  }

  pub fn left(&self) -> f32 {
    self.left_margin
  }

  pub fn right(&self) -> f32 {
    self.width - self.right_margin
  }

  pub fn center(&self) -> f32 {
    self.width / 2.0
  }

  pub fn content_width(&self) -> f32 {
    self.right() - self.left()
  }
}

/// Measures rendered text width in points.
pub trait TextMeasurer: Send + Sync {
  fn measure(&self, text: &str, face: FontFace, size: f32) -> f32;
}

/// Adobe core-font metrics for Helvetica and Helvetica-Bold.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardFontMetrics;

impl TextMeasurer for StandardFontMetrics {
  fn measure(&self, text: &str, face: FontFace, size: f32) -> f32 {
    metrics::text_width_units(face, text) as f32 * size / 1000.0
  }
}

/// Drawing surface for one page. Coordinates are PDF points with the origin
/// at the bottom-left corner.
pub trait Canvas {
  fn draw_text(&mut self, x: f32, y: f32, style: TextStyle, text: &str);
  fn draw_line(&mut self, from: (f32, f32), to: (f32, f32));
}

/// Vertical write position, moving down the page as lines are drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
  y: f32,
}

impl Cursor {
  pub fn at(y: f32) -> Self {
    Self { y }
  }

  pub fn y(&self) -> f32 {
    self.y
  }

  /// Move down by `amount` points.
  pub fn advance(&mut self, amount: f32) {
    self.y -= amount;
  }
}

/// Greedy word wrapping and aligned text placement.
#[derive(Clone)]
pub struct LayoutEngine {
  page: PageGeometry,
  measurer: Arc<dyn TextMeasurer>,
}

impl LayoutEngine {
  pub fn new(page: PageGeometry) -> Self {
    Self::with_measurer(page, Arc::new(StandardFontMetrics))
  }

  pub fn with_measurer(page: PageGeometry, measurer: Arc<dyn TextMeasurer>) -> Self {
    Self { page, measurer }
  }

  pub fn page(&self) -> &PageGeometry {
    &self.page
  }

  pub fn measure_width(&self, text: &str, face: FontFace, size: f32) -> f32 {
    self.measurer.measure(text, face, size)
  }

  /// Splits `text` into lines no wider than `max_width`.
  ///
  /// Words are never broken: a word wider than `max_width` gets a line of its
  /// own. Whitespace runs collapse to a single space.
  pub fn wrap(&self, text: &str, face: FontFace, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
      if current.is_empty() {
        current.push_str(word);
        continue;
      }
      let candidate = format!("{} {}", current, word);
      if self.measure_width(&candidate, face, size) <= max_width {
        current = candidate;
      } else {
        lines.push(std::mem::replace(&mut current, word.to_string()));
      }
    }

    if !current.is_empty() {
      lines.push(current);
    }
    lines
  }

  /// Draws `text` starting at `x`, then moves the cursor down.
  pub fn draw_left(
    &self,
    canvas: &mut dyn Canvas,
    cursor: &mut Cursor,
    x: f32,
    text: &str,
    style: TextStyle,
    line_height: f32,
  ) {
    canvas.draw_text(x, cursor.y(), style, text);
    cursor.advance(line_height);
  }

  /// Draws `text` centred on the page, then moves the cursor down.
  pub fn draw_centered(
    &self,
    canvas: &mut dyn Canvas,
    cursor: &mut Cursor,
    text: &str,
    style: TextStyle,
    line_height: f32,
  ) {
    let width = self.measure_width(text, style.face, style.size);
    canvas.draw_text(self.page.center() - width / 2.0, cursor.y(), style, text);
    cursor.advance(line_height);
  }

  /// Draws `text` flush against the right margin, then moves the cursor down.
  pub fn draw_right(
    &self,
    canvas: &mut dyn Canvas,
    cursor: &mut Cursor,
    text: &str,
    style: TextStyle,
    line_height: f32,
  ) {
    let width = self.measure_width(text, style.face, style.size);
    canvas.draw_text(self.page.right() - width, cursor.y(), style, text);
    cursor.advance(line_height);
  }

  /// Wraps `text` to the content width and draws each line at the left margin.
  pub fn draw_paragraph(
    &self,
    canvas: &mut dyn Canvas,
    cursor: &mut Cursor,
    text: &str,
    style: TextStyle,
    line_height: f32,
  ) {
    let lines = self.wrap(text, style.face, style.size, self.page.content_width());
    for line in &lines {
      self.draw_left(canvas, cursor, self.page.left(), line, style, line_height);
    }
  }

  /// Horizontal rule across the content width at the cursor.
  pub fn draw_rule(&self, canvas: &mut dyn Canvas, cursor: &mut Cursor, line_height: f32) {
    canvas.draw_line(
      (self.page.left(), cursor.y()),
      (self.page.right(), cursor.y()),
    );
    cursor.advance(line_height);
  }
}
