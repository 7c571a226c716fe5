pub mod renderer;
pub mod writer;

pub use renderer::{PDF_CONTENT_TYPE, PdfRenderer};
pub use writer::PdfCanvas;
