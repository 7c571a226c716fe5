//! Glyph advance widths for the standard Type 1 Helvetica faces, in 1/1000 em.
//!
//! Values come from the Adobe core font metrics and cover the WinAnsi range
//! that Spanish text uses. Characters outside it measure like `?`, which is
//! also what the PDF encoder substitutes for them.

use super::layout::FontFace;

const FALLBACK: char = '?';

// U+0020 ..= U+007E
const HELVETICA_ASCII: [u16; 95] = [
  278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' ' .. '/'
  556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0' .. '9'
  278, 278, 584, 584, 584, 556, 1015, // ':' .. '@'
  667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A' .. 'M'
  722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N' .. 'Z'
  278, 278, 278, 469, 556, 333, // '[' .. '`'
  556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a' .. 'm'
  556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n' .. 'z'
  334, 260, 334, 584, // '{' .. '~'
];

// U+00A0 ..= U+00FF
const HELVETICA_LATIN1: [u16; 96] = [
  278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // A0 .. AF
  400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // B0 .. BF
  667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // C0 .. CF
  722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // D0 .. DF
  556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // E0 .. EF
  556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // F0 .. FF
];

const HELVETICA_BOLD_ASCII: [u16; 95] = [
  278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' ' .. '/'
  556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0' .. '9'
  333, 333, 584, 584, 584, 611, 975, // ':' .. '@'
  722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // 'A' .. 'M'
  722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N' .. 'Z'
  333, 278, 333, 584, 556, 333, // '[' .. '`'
  556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // 'a' .. 'm'
  611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // 'n' .. 'z'
  389, 280, 389, 584, // '{' .. '~'
];

const HELVETICA_BOLD_LATIN1: [u16; 96] = [
  278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333, // A0 .. AF
  400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611, // B0 .. BF
  722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // C0 .. CF
  722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // D0 .. DF
  556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278, // E0 .. EF
  611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556, // F0 .. FF
];

/// Width of one character in 1/1000 em.
pub fn char_width(face: FontFace, ch: char) -> u16 {
  let (ascii, latin1) = match face {
    FontFace::Helvetica => (&HELVETICA_ASCII, &HELVETICA_LATIN1),
    FontFace::HelveticaBold => (&HELVETICA_BOLD_ASCII, &HELVETICA_BOLD_LATIN1),
  };
  match ch as u32 {
    code @ 0x20..=0x7E => ascii[(code - 0x20) as usize],
    code @ 0xA0..=0xFF => latin1[(code - 0xA0) as usize],
    _ => match (ch, face) {
      ('€', _) => 556,
      ('–', _) => 556,
      ('—', _) => 1000,
      ('…', _) => 1000,
      ('•', _) => 350,
      ('‘' | '’', FontFace::Helvetica) => 222,
      ('‘' | '’', FontFace::HelveticaBold) => 278,
      ('“' | '”', FontFace::Helvetica) => 333,
      ('“' | '”', FontFace::HelveticaBold) => 500,
      _ => ascii[(FALLBACK as u32 - 0x20) as usize],
    },
  }
}

/// Width of `text` in 1/1000 em, without kerning.
pub fn text_width_units(face: FontFace, text: &str) -> u32 {
  text.chars().map(|ch| char_width(face, ch) as u32).sum()
}
