//! Output renderers
//!
//! - [`html`] - input form and the paginated results table
//! - [`csv`] - the full export as a CSV document

pub mod csv;
pub mod html;
