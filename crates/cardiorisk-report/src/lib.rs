//! Report layer: lays out the last assessment and renders it to PDF.

mod error;
mod layout;
mod render;

pub use error::ReportError;
pub use layout::{Block, ReportView, TITLE, layout};
pub use render::{BUNDLED_FONT, ReportFont, ReportWriter, render_pdf};
