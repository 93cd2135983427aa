//! pdc-report - inspection report rendering
//!
//! Pure transform from an inspection record to a paginated document: vehicle
//! details, the condition groups (label + status badge + issue description)
//! and whatever photos are present, flowed onto A4-proportioned pages. The
//! HTML writer turns the document into a self-contained printable page.

pub mod html;
pub mod layout;

pub use html::to_html;
pub use layout::{render, suggested_filename, Block, Page, Report};
